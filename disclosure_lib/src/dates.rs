//! Calendar-day comparison and display formatting for disclosure timestamps.
//!
//! Every comparison truncates both sides to a calendar day in a [`DayFrame`]
//! before comparing, so a disclosure at 23:59 and one at 00:01 on a boundary
//! date are treated alike. String inputs are normalized first. A string that
//! cannot be parsed never produces an error: predicates answer `false`,
//! formatters return `""`, and a warning is logged.

use std::cmp::Ordering;

use chrono::{DateTime, FixedOffset, NaiveDate, NaiveDateTime, Offset, TimeZone, Utc};
use disclosure_api::types::Exchange;

/// Display pattern shared by [`local_time`] and [`utc_time`].
pub const DISPLAY_FORMAT: &str = "%Y/%m/%d %H:%M:%S";

/// Wire format for date filter bounds.
pub const ISO_DATE_FORMAT: &str = "%Y-%m-%d";

const NAIVE_DATETIME_FORMATS: &[&str] = &["%Y-%m-%dT%H:%M:%S%.f", "%Y-%m-%d %H:%M:%S%.f"];

/// A value that can be compared at day granularity.
#[derive(Clone, Copy, Debug)]
pub enum DateInput<'a> {
    Instant(DateTime<Utc>),
    Date(NaiveDate),
    Text(&'a str),
}

impl<'a> From<&'a str> for DateInput<'a> {
    fn from(value: &'a str) -> Self {
        DateInput::Text(value)
    }
}

impl<'a> From<&'a String> for DateInput<'a> {
    fn from(value: &'a String) -> Self {
        DateInput::Text(value.as_str())
    }
}

impl From<DateTime<Utc>> for DateInput<'_> {
    fn from(value: DateTime<Utc>) -> Self {
        DateInput::Instant(value)
    }
}

impl From<NaiveDate> for DateInput<'_> {
    fn from(value: NaiveDate) -> Self {
        DateInput::Date(value)
    }
}

/// A normalized input: either already a calendar day or an absolute instant.
#[derive(Clone, Copy, Debug, PartialEq)]
enum Normalized {
    Day(NaiveDate),
    Instant(DateTime<Utc>),
}

impl DateInput<'_> {
    fn normalize(&self) -> Option<Normalized> {
        match self {
            DateInput::Instant(instant) => Some(Normalized::Instant(*instant)),
            DateInput::Date(date) => Some(Normalized::Day(*date)),
            DateInput::Text(text) => {
                let text = text.trim();
                if let Ok(date) = NaiveDate::parse_from_str(text, ISO_DATE_FORMAT) {
                    return Some(Normalized::Day(date));
                }
                parse_instant(text).map(Normalized::Instant)
            }
        }
    }

    fn describe(&self) -> String {
        match self {
            DateInput::Instant(instant) => instant.to_rfc3339(),
            DateInput::Date(date) => date.to_string(),
            DateInput::Text(text) => (*text).to_string(),
        }
    }
}

/// Parses a timestamp as an absolute instant.
///
/// Accepts RFC 3339 (with offset), `YYYY-MM-DDTHH:MM:SS[.fff][+hhmm]`,
/// naive `YYYY-MM-DD[T ]HH:MM:SS[.fff]` (taken as UTC) and bare
/// `YYYY-MM-DD` (midnight UTC).
pub fn parse_instant(value: &str) -> Option<DateTime<Utc>> {
    let value = value.trim();
    if let Ok(parsed) = DateTime::parse_from_rfc3339(value) {
        return Some(parsed.with_timezone(&Utc));
    }
    if let Ok(parsed) = DateTime::parse_from_str(value, "%Y-%m-%dT%H:%M:%S%.f%z") {
        return Some(parsed.with_timezone(&Utc));
    }
    for format in NAIVE_DATETIME_FORMATS {
        if let Ok(naive) = NaiveDateTime::parse_from_str(value, format) {
            return Some(Utc.from_utc_datetime(&naive));
        }
    }
    NaiveDate::parse_from_str(value, ISO_DATE_FORMAT)
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| Utc.from_utc_datetime(&naive))
}

/// Parses a strict `YYYY-MM-DD` date, as sent for filter bounds.
pub fn parse_date(value: &str) -> Option<NaiveDate> {
    if value.is_empty() {
        return None;
    }
    match NaiveDate::parse_from_str(value, ISO_DATE_FORMAT) {
        Ok(date) => Some(date),
        Err(e) => {
            tracing::warn!("Date parsing error for '{}': {}", value, e);
            None
        }
    }
}

/// Formats a date as `YYYY-MM-DD`.
pub fn format_date(date: NaiveDate) -> String {
    date.format(ISO_DATE_FORMAT).to_string()
}

/// Formats a date as `YYYY년 MM월 DD일`.
pub fn format_date_korean(date: NaiveDate) -> String {
    date.format("%Y년 %m월 %d일").to_string()
}

/// The civil time zone an exchange publishes in.
///
/// Shenzhen and Hong Kong are both UTC+8 today but are separate
/// administrative zones, so each keeps its own entry.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct ExchangeZone {
    /// IANA zone name.
    pub name: &'static str,
    utc_offset_secs: i32,
}

pub const SHENZHEN_ZONE: ExchangeZone = ExchangeZone {
    name: "Asia/Shanghai",
    utc_offset_secs: 8 * 3600,
};

pub const HONGKONG_ZONE: ExchangeZone = ExchangeZone {
    name: "Asia/Hong_Kong",
    utc_offset_secs: 8 * 3600,
};

impl ExchangeZone {
    pub fn for_exchange(exchange: Exchange) -> &'static ExchangeZone {
        match exchange {
            Exchange::Shenzhen => &SHENZHEN_ZONE,
            Exchange::Hongkong => &HONGKONG_ZONE,
        }
    }

    pub fn offset(&self) -> FixedOffset {
        FixedOffset::east_opt(self.utc_offset_secs).unwrap_or_else(|| Utc.fix())
    }
}

/// The reference frame in which instants are truncated to calendar days.
/// Inputs that are already bare dates are never shifted.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum DayFrame {
    #[default]
    Utc,
    Exchange(Exchange),
}

impl DayFrame {
    fn offset(&self) -> FixedOffset {
        match self {
            DayFrame::Utc => Utc.fix(),
            DayFrame::Exchange(exchange) => ExchangeZone::for_exchange(*exchange).offset(),
        }
    }

    /// The calendar day of `input` in this frame, or `None` if it cannot be parsed.
    pub fn day<'a>(&self, input: impl Into<DateInput<'a>>) -> Option<NaiveDate> {
        let input = input.into();
        match input.normalize() {
            Some(Normalized::Day(date)) => Some(date),
            Some(Normalized::Instant(instant)) => {
                Some(instant.with_timezone(&self.offset()).date_naive())
            }
            None => {
                tracing::warn!("Date parsing error: unrecognized date '{}'", input.describe());
                None
            }
        }
    }

    fn compare_days<'a, 'b>(
        &self,
        a: impl Into<DateInput<'a>>,
        b: impl Into<DateInput<'b>>,
    ) -> Option<Ordering> {
        let a = self.day(a)?;
        let b = self.day(b)?;
        Some(a.cmp(&b))
    }

    pub fn is_same_day<'a, 'b>(
        &self,
        a: impl Into<DateInput<'a>>,
        b: impl Into<DateInput<'b>>,
    ) -> bool {
        matches!(self.compare_days(a, b), Some(Ordering::Equal))
    }

    pub fn is_same_or_after_day<'a, 'b>(
        &self,
        a: impl Into<DateInput<'a>>,
        b: impl Into<DateInput<'b>>,
    ) -> bool {
        matches!(
            self.compare_days(a, b),
            Some(Ordering::Equal | Ordering::Greater)
        )
    }

    pub fn is_same_or_before_day<'a, 'b>(
        &self,
        a: impl Into<DateInput<'a>>,
        b: impl Into<DateInput<'b>>,
    ) -> bool {
        matches!(
            self.compare_days(a, b),
            Some(Ordering::Equal | Ordering::Less)
        )
    }
}

/// True iff `a` and `b` fall on the same UTC calendar day.
pub fn is_same_day<'a, 'b>(a: impl Into<DateInput<'a>>, b: impl Into<DateInput<'b>>) -> bool {
    DayFrame::Utc.is_same_day(a, b)
}

/// True iff `a`'s UTC calendar day is the same as or after `b`'s.
pub fn is_same_or_after_day<'a, 'b>(
    a: impl Into<DateInput<'a>>,
    b: impl Into<DateInput<'b>>,
) -> bool {
    DayFrame::Utc.is_same_or_after_day(a, b)
}

/// True iff `a`'s UTC calendar day is the same as or before `b`'s.
pub fn is_same_or_before_day<'a, 'b>(
    a: impl Into<DateInput<'a>>,
    b: impl Into<DateInput<'b>>,
) -> bool {
    DayFrame::Utc.is_same_or_before_day(a, b)
}

fn to_instant(input: DateInput<'_>) -> Option<DateTime<Utc>> {
    match input.normalize()? {
        Normalized::Instant(instant) => Some(instant),
        Normalized::Day(date) => date
            .and_hms_opt(0, 0, 0)
            .map(|naive| Utc.from_utc_datetime(&naive)),
    }
}

/// Renders an instant in the exchange's local time as `YYYY/MM/DD HH:MM:SS`.
pub fn local_time<'a>(instant: impl Into<DateInput<'a>>, exchange: Exchange) -> String {
    let input = instant.into();
    match to_instant(input) {
        Some(instant) => {
            let zone = ExchangeZone::for_exchange(exchange);
            instant
                .with_timezone(&zone.offset())
                .format(DISPLAY_FORMAT)
                .to_string()
        }
        None => {
            tracing::warn!(
                "Local time conversion error for {}: unrecognized date '{}'",
                exchange,
                input.describe()
            );
            String::new()
        }
    }
}

/// Renders an instant in UTC as `YYYY/MM/DD HH:MM:SS`.
pub fn utc_time<'a>(instant: impl Into<DateInput<'a>>) -> String {
    let input = instant.into();
    match to_instant(input) {
        Some(instant) => instant.format(DISPLAY_FORMAT).to_string(),
        None => {
            tracing::warn!("Date formatting error: unrecognized date '{}'", input.describe());
            String::new()
        }
    }
}

/// An inclusive pair of optional calendar-day bounds.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub struct DateRange {
    pub start: Option<NaiveDate>,
    pub end: Option<NaiveDate>,
}

impl DateRange {
    pub fn new(start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        Self { start, end }
    }

    pub fn unbounded() -> Self {
        Self::default()
    }

    /// A range with a missing bound is always valid; otherwise `end` must not precede `start`.
    pub fn is_valid(&self) -> bool {
        match (self.start, self.end) {
            (Some(start), Some(end)) => end >= start,
            _ => true,
        }
    }

    pub fn with_start(self, start: Option<NaiveDate>) -> Self {
        Self { start, ..self }
    }

    pub fn with_end(self, end: Option<NaiveDate>) -> Self {
        Self { end, ..self }
    }

    /// Bounds as `(startDate, endDate)` query strings.
    pub fn to_query_params(&self) -> (Option<String>, Option<String>) {
        (self.start.map(format_date), self.end.map(format_date))
    }
}
