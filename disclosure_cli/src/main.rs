mod commands;
mod output;
mod server;

use anyhow::{bail, Result};
use clap::{Parser, Subcommand};

use crate::output::OutputFormat;

#[derive(Parser)]
#[command(name = "disclosures")]
#[command(about = "Browse Shenzhen and Hong Kong exchange disclosures")]
struct Cli {
    /// Output format: table, json, csv, markdown
    #[arg(long, default_value = "table", global = true)]
    output: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Serve the disclosure API over HTTP
    Serve(commands::serve::ServeArgs),
    /// Fetch one page of disclosures
    List(commands::list::ListArgs),
    /// Page through disclosures from a running server
    Browse(commands::browse::BrowseArgs),
    /// Show the category table for an exchange
    Categories(commands::categories::CategoriesArgs),
}

#[tokio::main]
async fn main() -> Result<()> {
    dotenvy::dotenv().ok();

    tracing_subscriber::fmt()
        .with_env_filter(
            tracing_subscriber::EnvFilter::from_default_env()
                .add_directive("disclosure_lib=info".parse()?)
                .add_directive("disclosure_cli=info".parse()?),
        )
        .with_target(false)
        .init();

    let cli = Cli::parse();

    let format = match cli.output.as_str() {
        "table" => OutputFormat::Table,
        "json" => OutputFormat::Json,
        "csv" => OutputFormat::Csv,
        "markdown" | "md" => OutputFormat::Markdown,
        other => bail!(
            "unknown output format '{}'. Valid values: table, json, csv, markdown",
            other
        ),
    };

    match &cli.command {
        Commands::Serve(args) => commands::serve::run(args).await?,
        Commands::List(args) => commands::list::run(args, &format).await?,
        Commands::Browse(args) => commands::browse::run(args, &format).await?,
        Commands::Categories(args) => commands::categories::run(args, &format)?,
    }

    Ok(())
}
