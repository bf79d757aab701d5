//! Conversion of raw per-exchange dataset documents into [`Disclosure`]s.

use disclosure_api::types::{Disclosure, Exchange, RawRecord};
use serde_json::Value;

use crate::category::CategoryResolver;

/// Converts one exchange's dataset document into disclosures, in record order.
///
/// A document without a `data.getDisclosure` array yields an empty list.
/// Records that do not match the expected shape are skipped with a warning.
pub fn transform(
    dataset: &Value,
    exchange: Exchange,
    categories: &CategoryResolver,
) -> Vec<Disclosure> {
    let Some(records) = dataset
        .get("data")
        .and_then(|data| data.get("getDisclosure"))
        .and_then(Value::as_array)
    else {
        tracing::warn!("{} dataset has no data.getDisclosure array", exchange);
        return Vec::new();
    };

    records
        .iter()
        .enumerate()
        .filter_map(|(index, record)| {
            match serde_json::from_value::<RawRecord>(record.clone()) {
                Ok(raw) => Some(transform_record(raw, exchange, categories)),
                Err(e) => {
                    tracing::warn!("Skipping malformed {} record #{}: {}", exchange, index, e);
                    None
                }
            }
        })
        .collect()
}

/// Converts a single raw record.
pub fn transform_record(
    raw: RawRecord,
    exchange: Exchange,
    categories: &CategoryResolver,
) -> Disclosure {
    let topics = split_topics(&raw.analysis_details.topic_kor);
    let category = categories
        .resolve(raw.details.category_id.primary(), exchange)
        .to_string();
    let sec_name = display_name(&raw.kor_name, raw.details.primary_sec_name());

    Disclosure {
        id: raw.id,
        date: raw.data_date,
        sec_name,
        sec_code: raw.details.primary_sec_code().to_string(),
        exchange,
        topics,
        category,
        title: raw.analysis_details.summarize_tiny_kor,
        content: raw.analysis_details.summarize_long_kor,
        original_url: raw.details.file_link,
    }
}

/// Splits a comma-joined topic list, trimming each entry. Empty entries are kept.
pub fn split_topics(topic_kor: &str) -> Vec<String> {
    topic_kor
        .split(',')
        .map(|topic| topic.trim().to_string())
        .collect()
}

fn display_name(kor_name: &str, sec_name: &str) -> String {
    if sec_name.is_empty() {
        kor_name.to_string()
    } else {
        format!("{} ({})", kor_name, sec_name)
    }
}
