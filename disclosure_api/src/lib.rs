//! Wire types, query builder and HTTP client for the disclosure browsing API.

mod client;
mod errors;
mod query;
pub mod types;
pub use self::client::Client;
pub use self::errors::Error;
pub use self::query::{DisclosureQuery, Query, QueryCommon};
