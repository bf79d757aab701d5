use chrono::NaiveDate;
use disclosure_api::types::{Exchange, ExchangeFilter};

use crate::dates::DateRange;
use crate::error::DisclosureError;

/// Normalize a raw `page` query value: missing, non-numeric, or < 1 becomes 1.
pub fn normalize_page(input: Option<&str>) -> usize {
    input
        .and_then(|raw| raw.trim().parse::<i64>().ok())
        .filter(|page| *page >= 1)
        .and_then(|page| usize::try_from(page).ok())
        .unwrap_or(1)
}

/// Validate page number (must be >= 1).
pub fn validate_page(page: i64) -> Result<i64, DisclosureError> {
    if page < 1 {
        return Err(DisclosureError::InvalidInput(
            "page must be >= 1".to_string(),
        ));
    }
    Ok(page)
}

/// Validate an absolute date in YYYY-MM-DD format.
pub fn validate_date(input: &str) -> Result<NaiveDate, DisclosureError> {
    let trimmed = input.trim();
    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d").map_err(|_| {
        DisclosureError::InvalidInput(format!(
            "invalid date '{}'. Expected format: YYYY-MM-DD (e.g., 2024-06-01)",
            trimmed
        ))
    })
}

/// Validate optional start/end dates and check that end is not before start.
pub fn validate_date_range(
    start: Option<&str>,
    end: Option<&str>,
) -> Result<DateRange, DisclosureError> {
    let range = DateRange::new(
        start.map(validate_date).transpose()?,
        end.map(validate_date).transpose()?,
    );
    if !range.is_valid() {
        return Err(DisclosureError::InvalidInput(
            "end date must be on or after start date".to_string(),
        ));
    }
    Ok(range)
}

/// Validate an exchange selector: case-insensitive, supports shorthand
/// sz/hk and the Korean names.
pub fn validate_exchange(input: &str) -> Result<ExchangeFilter, DisclosureError> {
    match input.trim().to_lowercase().as_str() {
        "all" | "" => Ok(ExchangeFilter::All),
        "shenzhen" | "sz" | "szse" | "심천" => Ok(ExchangeFilter::Only(Exchange::Shenzhen)),
        "hongkong" | "hong-kong" | "hk" | "hkex" | "홍콩" => {
            Ok(ExchangeFilter::Only(Exchange::Hongkong))
        }
        _ => Err(DisclosureError::InvalidInput(format!(
            "unknown exchange '{}'. Valid values: all, shenzhen (sz), hongkong (hk)",
            input
        ))),
    }
}
