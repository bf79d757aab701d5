use serde::{Deserialize, Serialize};

use super::Exchange;

/// A normalized, displayable record of one regulatory filing.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Disclosure {
    /// Unique within one exchange's dataset only.
    pub id: String,

    /// Publication instant exactly as the dataset wrote it. UTC when no offset is given.
    pub date: String,

    pub sec_name: String,

    pub sec_code: String,

    pub exchange: Exchange,

    pub topics: Vec<String>,

    /// Korean category label, empty when the code has no mapping.
    pub category: String,

    pub title: String,

    pub content: String,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_url: Option<String>,
}
