//! Error types for the library layer.

use std::fmt;

use crate::category::CategoryError;
use crate::dataset::DatasetError;

/// Errors produced by the library layer, wrapping upstream API errors
/// and adding dataset, serialization, and input validation failures.
#[derive(Debug)]
pub enum DisclosureError {
    /// An error from the underlying API client.
    Api(disclosure_api::Error),
    /// A dataset could not be read or parsed.
    Dataset(DatasetError),
    /// The embedded category tables are invalid.
    Category(CategoryError),
    /// JSON serialization or deserialization failed.
    Serialization(serde_json::Error),
    /// User-provided input failed validation.
    InvalidInput(String),
    /// A query task failed to run to completion.
    Internal(String),
}

impl fmt::Display for DisclosureError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Api(e) => write!(f, "API error: {}", e),
            Self::Dataset(e) => write!(f, "Dataset error: {}", e),
            Self::Category(e) => write!(f, "Category table error: {}", e),
            Self::Serialization(e) => write!(f, "Serialization error: {}", e),
            Self::InvalidInput(msg) => write!(f, "Invalid input: {}", msg),
            Self::Internal(msg) => write!(f, "Internal error: {}", msg),
        }
    }
}

impl std::error::Error for DisclosureError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            Self::Api(e) => Some(e),
            Self::Dataset(e) => Some(e),
            Self::Category(e) => Some(e),
            Self::Serialization(e) => Some(e),
            _ => None,
        }
    }
}

impl From<disclosure_api::Error> for DisclosureError {
    fn from(e: disclosure_api::Error) -> Self {
        Self::Api(e)
    }
}

impl From<DatasetError> for DisclosureError {
    fn from(e: DatasetError) -> Self {
        Self::Dataset(e)
    }
}

impl From<CategoryError> for DisclosureError {
    fn from(e: CategoryError) -> Self {
        Self::Category(e)
    }
}

impl From<serde_json::Error> for DisclosureError {
    fn from(e: serde_json::Error) -> Self {
        Self::Serialization(e)
    }
}
