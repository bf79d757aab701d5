use anyhow::Result;
use clap::Args;
use disclosure_lib::validation;
use disclosure_lib::CategoryResolver;

use crate::output::{print_categories, OutputFormat};

#[derive(Args)]
pub struct CategoriesArgs {
    /// Exchange: all, shenzhen (sz), hongkong (hk)
    #[arg(long, default_value = "all")]
    pub exchange: String,
}

pub fn run(args: &CategoriesArgs, format: &OutputFormat) -> Result<()> {
    let exchange = validation::validate_exchange(&args.exchange)?;
    let resolver = CategoryResolver::builtin()?;

    let tables: Vec<_> = exchange
        .selected()
        .into_iter()
        .map(|exchange| (exchange, resolver.entries(exchange)))
        .collect();

    print_categories(&tables, format)
}
