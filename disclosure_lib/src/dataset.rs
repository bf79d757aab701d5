//! Where the per-exchange dataset documents come from.
//!
//! Datasets are read-only and loaded whole on every call; nothing is cached
//! between queries.

use std::path::{Path, PathBuf};

use disclosure_api::types::Exchange;
use serde_json::Value;
use thiserror::Error;

/// Error types for dataset loading.
#[derive(Error, Debug)]
pub enum DatasetError {
    #[error("Failed to read dataset {}: {}", .path.display(), .source)]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },
    #[error("Failed to parse dataset {}: {}", .path.display(), .source)]
    Parse {
        path: PathBuf,
        #[source]
        source: serde_json::Error,
    },
    #[error("No dataset available for {0}")]
    Missing(Exchange),
}

/// Supplies the raw dataset document for an exchange.
pub trait DatasetSource: Send + Sync {
    fn load(&self, exchange: Exchange) -> Result<Value, DatasetError>;
}

/// Reads `shenzhen.json` and `hongkong.json` from a directory.
#[derive(Clone, Debug)]
pub struct FileDatasetSource {
    dir: PathBuf,
}

impl FileDatasetSource {
    pub fn new(dir: impl Into<PathBuf>) -> Self {
        Self { dir: dir.into() }
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the dataset file for `exchange`.
    pub fn path_for(&self, exchange: Exchange) -> PathBuf {
        self.dir.join(file_name(exchange))
    }
}

pub fn file_name(exchange: Exchange) -> &'static str {
    match exchange {
        Exchange::Shenzhen => "shenzhen.json",
        Exchange::Hongkong => "hongkong.json",
    }
}

impl DatasetSource for FileDatasetSource {
    fn load(&self, exchange: Exchange) -> Result<Value, DatasetError> {
        let path = self.path_for(exchange);
        let text = std::fs::read_to_string(&path).map_err(|source| DatasetError::Io {
            path: path.clone(),
            source,
        })?;
        serde_json::from_str(&text).map_err(|source| DatasetError::Parse { path, source })
    }
}

/// Serves datasets held in memory.
#[derive(Clone, Debug, Default)]
pub struct StaticDatasetSource {
    shenzhen: Option<Value>,
    hongkong: Option<Value>,
}

impl StaticDatasetSource {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_dataset(mut self, exchange: Exchange, dataset: Value) -> Self {
        match exchange {
            Exchange::Shenzhen => self.shenzhen = Some(dataset),
            Exchange::Hongkong => self.hongkong = Some(dataset),
        }
        self
    }
}

impl DatasetSource for StaticDatasetSource {
    fn load(&self, exchange: Exchange) -> Result<Value, DatasetError> {
        let dataset = match exchange {
            Exchange::Shenzhen => &self.shenzhen,
            Exchange::Hongkong => &self.hongkong,
        };
        dataset.clone().ok_or(DatasetError::Missing(exchange))
    }
}
