use serde::{Deserialize, Serialize};

use super::Disclosure;

/// One page of query results, the body of `GET /api/disclosures`.
#[derive(Serialize, Deserialize, Clone, Debug, Default, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DisclosurePage {
    pub disclosures: Vec<Disclosure>,

    pub has_more: bool,

    /// Size of the filtered result set before pagination.
    #[serde(default)]
    pub total: usize,

    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl DisclosurePage {
    /// Body sent with an internal-failure status: no rows and a generic message.
    pub fn failure(message: &str) -> Self {
        Self {
            disclosures: Vec::new(),
            has_more: false,
            total: 0,
            error: Some(message.to_string()),
        }
    }
}
