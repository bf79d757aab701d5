//! Library layer for the exchange disclosure browser.
//!
//! Turns the raw per-exchange dataset documents into [`types::Disclosure`] records,
//! answers filtered and paginated queries over them, and drives incremental
//! loading on the client side against the HTTP API in `disclosure_api`.

pub mod category;
pub mod config;
pub mod dataset;
pub mod dates;
pub mod error;
pub mod feed;
pub mod pipeline;
pub mod transform;
pub mod validation;

pub use disclosure_api;
pub use disclosure_api::types;
pub use disclosure_api::{DisclosureQuery, Query};

pub use category::{CategoryEntry, CategoryError, CategoryResolver};
pub use config::{ClientConfig, ServeConfig};
pub use dataset::{DatasetError, DatasetSource, FileDatasetSource, StaticDatasetSource};
pub use dates::{DateInput, DateRange, DayFrame, ExchangeZone};
pub use error::DisclosureError;
pub use feed::{ApplyOutcome, DisclosureFeed, DisclosureFetcher, FeedFilter, FeedState, LoadKind};
pub use pipeline::{run_query, QueryParams, QueryPipeline, PAGE_SIZE};
pub use transform::transform;
