//! Records as they appear in the per-exchange dataset documents
//! (`{ "data": { "getDisclosure": [...] } }`).

use serde::{Deserialize, Serialize};

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawRecord {
    pub id: String,

    pub data_date: String,

    pub kor_name: String,

    pub details: RawDetails,

    pub analysis_details: RawAnalysisDetails,
}

#[derive(Serialize, Deserialize, Clone, Debug, Default)]
#[serde(rename_all = "camelCase")]
pub struct RawDetails {
    #[serde(default)]
    pub sec_name: Option<Vec<String>>,

    #[serde(default)]
    pub sec_code: Option<Vec<String>>,

    #[serde(default)]
    pub category_id: CategoryId,

    #[serde(default)]
    pub file_link: Option<String>,
}

impl RawDetails {
    /// First security name, or empty.
    pub fn primary_sec_name(&self) -> &str {
        first_or_empty(self.sec_name.as_deref())
    }

    /// First security code, or empty.
    pub fn primary_sec_code(&self) -> &str {
        first_or_empty(self.sec_code.as_deref())
    }
}

#[derive(Serialize, Deserialize, Clone, Debug)]
#[serde(rename_all = "camelCase")]
pub struct RawAnalysisDetails {
    /// Comma-joined Korean topics.
    pub topic_kor: String,

    pub summarize_tiny_kor: String,

    pub summarize_long_kor: String,

    #[serde(default)]
    pub category_kor: Option<String>,
}

/// `details.categoryId` is written either as a single code or as a list of codes.
#[derive(Serialize, Deserialize, Clone, Debug, PartialEq)]
#[serde(untagged)]
pub enum CategoryId {
    Single(String),
    Many(Vec<String>),
    Other(serde_json::Value),
}

impl Default for CategoryId {
    fn default() -> Self {
        CategoryId::Other(serde_json::Value::Null)
    }
}

impl CategoryId {
    /// The code used for lookup: the string itself, the first list element,
    /// or empty for an empty list or any other shape.
    pub fn primary(&self) -> &str {
        match self {
            CategoryId::Single(code) => code,
            CategoryId::Many(codes) => first_or_empty(Some(codes.as_slice())),
            CategoryId::Other(_) => "",
        }
    }
}

fn first_or_empty(values: Option<&[String]>) -> &str {
    values
        .and_then(|values| values.first())
        .map(String::as_str)
        .unwrap_or("")
}
