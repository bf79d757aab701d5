use std::net::SocketAddr;
use std::path::PathBuf;
use std::sync::Arc;

use anyhow::Result;
use clap::Args;
use disclosure_lib::dataset::file_name;
use disclosure_lib::types::Exchange;
use disclosure_lib::{CategoryResolver, FileDatasetSource, QueryPipeline, ServeConfig};

use crate::server;

#[derive(Args)]
pub struct ServeArgs {
    /// Directory holding shenzhen.json and hongkong.json (overrides DISCLOSURES_DATA_DIR)
    #[arg(long)]
    pub data_dir: Option<PathBuf>,

    /// Address to listen on, e.g. 127.0.0.1:3000 (overrides DISCLOSURES_BIND)
    #[arg(long)]
    pub bind: Option<SocketAddr>,
}

pub async fn run(args: &ServeArgs) -> Result<()> {
    let mut config = ServeConfig::from_env();
    if let Some(ref dir) = args.data_dir {
        config.data_dir = dir.clone();
    }
    if let Some(bind) = args.bind {
        config.bind = bind;
    }

    for exchange in Exchange::ALL {
        let path = config.data_dir.join(file_name(exchange));
        if !path.is_file() {
            tracing::warn!("{} dataset not found at {}; it will be served as empty", exchange, path.display());
        }
    }

    let pipeline = QueryPipeline::new(
        FileDatasetSource::new(config.data_dir.clone()),
        CategoryResolver::builtin()?,
    );
    let app = server::router(Arc::new(pipeline));

    let listener = tokio::net::TcpListener::bind(config.bind).await?;
    tracing::info!(
        "Serving disclosures from {} on {}",
        config.data_dir.display(),
        config.bind
    );
    axum::serve(listener, app).await?;
    Ok(())
}
