use anyhow::{bail, Result};
use clap::Args;
use disclosure_lib::validation;
use disclosure_lib::{ApplyOutcome, ClientConfig, DisclosureFeed, FeedFilter, FeedState};

use crate::output::{print_disclosures, OutputFormat};

#[derive(Args)]
pub struct BrowseArgs {
    /// Exchange: all, shenzhen (sz), hongkong (hk)
    #[arg(long, default_value = "all")]
    pub exchange: String,

    /// Only disclosures on or after this day (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Only disclosures on or before this day (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Stop after this many pages
    #[arg(long, default_value = "3")]
    pub pages: usize,

    /// Server base URL (overrides DISCLOSURES_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,
}

pub async fn run(args: &BrowseArgs, format: &OutputFormat) -> Result<()> {
    let exchange = validation::validate_exchange(&args.exchange)?;
    let range = validation::validate_date_range(args.from.as_deref(), args.to.as_deref())?;
    if args.pages == 0 {
        bail!("--pages must be at least 1");
    }

    let mut config = ClientConfig::from_env();
    if let Some(ref base_url) = args.base_url {
        config.base_url = base_url.clone();
    }

    let mut feed = DisclosureFeed::new(config.client());
    if feed.change_filter(FeedFilter::new(exchange, range)).await != ApplyOutcome::Applied {
        let reason = match feed.state() {
            FeedState::Error { message } => message.clone(),
            _ => "no response".to_string(),
        };
        bail!("Failed to load disclosures: {}", reason);
    }

    let max_pages = i64::try_from(args.pages).unwrap_or(i64::MAX);
    while feed.page() < max_pages {
        match feed.load_more().await {
            Some(ApplyOutcome::Applied) => {}
            Some(ApplyOutcome::Failed) => {
                eprintln!("Stopped after page {}: the next page failed to load", feed.page());
                break;
            }
            Some(ApplyOutcome::Stale) | None => break,
        }
    }

    eprintln!(
        "Loaded {} disclosures over {} page(s){}",
        feed.items().len(),
        feed.page(),
        if feed.has_more() { ", more available" } else { "" }
    );

    print_disclosures(feed.items(), format)
}
