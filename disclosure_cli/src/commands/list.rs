use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use disclosure_lib::validation;
use disclosure_lib::{
    run_query, CategoryResolver, ClientConfig, DisclosureQuery, FileDatasetSource, Query,
    QueryParams, QueryPipeline,
};

use crate::output::{print_disclosures, OutputFormat};

#[derive(Args)]
pub struct ListArgs {
    /// Exchange: all, shenzhen (sz), hongkong (hk)
    #[arg(long, default_value = "all")]
    pub exchange: String,

    /// Only disclosures on or after this day (YYYY-MM-DD)
    #[arg(long)]
    pub from: Option<String>,

    /// Only disclosures on or before this day (YYYY-MM-DD)
    #[arg(long)]
    pub to: Option<String>,

    /// Page number
    #[arg(long, default_value = "1")]
    pub page: i64,

    /// Read datasets from this directory instead of asking a server
    #[arg(long, conflicts_with = "base_url")]
    pub data_dir: Option<PathBuf>,

    /// Server base URL (overrides DISCLOSURES_BASE_URL)
    #[arg(long)]
    pub base_url: Option<String>,
}

pub async fn run(args: &ListArgs, format: &OutputFormat) -> Result<()> {
    let exchange = validation::validate_exchange(&args.exchange)?;
    let range = validation::validate_date_range(args.from.as_deref(), args.to.as_deref())?;
    let page = validation::validate_page(args.page)?;

    let query = DisclosureQuery::default()
        .with_exchange_filter(exchange)
        .with_date_range(range.start, range.end)
        .with_page(page);

    let resp = match args.data_dir {
        Some(ref dir) => {
            let pipeline = QueryPipeline::new(
                FileDatasetSource::new(dir.clone()),
                CategoryResolver::builtin()?,
            );
            run_query(Arc::new(pipeline), QueryParams::from(&query)).await?
        }
        None => {
            let mut config = ClientConfig::from_env();
            if let Some(ref base_url) = args.base_url {
                config.base_url = base_url.clone();
            }
            config.client().get_disclosures(&query).await?
        }
    };

    eprintln!(
        "Page {} ({} of {} disclosures{})",
        page,
        resp.disclosures.len(),
        resp.total,
        if resp.has_more { ", more available" } else { "" }
    );

    print_disclosures(&resp.disclosures, format)
}
