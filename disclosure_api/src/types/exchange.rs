use std::str::FromStr;

use serde::{Deserialize, Serialize};

/// A market whose disclosures are served. `ALL` is a query-time selector
/// (see [`ExchangeFilter`]) and never appears on a record.
#[derive(Serialize, Deserialize, Clone, Copy, Debug, PartialEq, Eq, Hash)]
#[serde(rename_all = "UPPERCASE")]
pub enum Exchange {
    Shenzhen,
    Hongkong,
}

impl Exchange {
    /// Both exchanges in merge order: Shenzhen first, then Hong Kong.
    pub const ALL: [Exchange; 2] = [Exchange::Shenzhen, Exchange::Hongkong];

    pub fn as_str(&self) -> &'static str {
        match self {
            Exchange::Shenzhen => "SHENZHEN",
            Exchange::Hongkong => "HONGKONG",
        }
    }

    /// Korean display name used on disclosure cards.
    pub fn korean_label(&self) -> &'static str {
        match self {
            Exchange::Shenzhen => "심천",
            Exchange::Hongkong => "홍콩",
        }
    }
}

impl std::fmt::Display for Exchange {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

impl FromStr for Exchange {
    type Err = ();

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "SHENZHEN" => Ok(Exchange::Shenzhen),
            "HONGKONG" => Ok(Exchange::Hongkong),
            _ => Err(()),
        }
    }
}

/// The `exchange` query parameter.
///
/// Values other than `SHENZHEN`, `HONGKONG` and `ALL` are kept as
/// [`ExchangeFilter::Unrecognized`]; such a filter includes no exchange, so
/// the merged result is empty rather than a validation error.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub enum ExchangeFilter {
    #[default]
    All,
    Only(Exchange),
    Unrecognized(String),
}

impl ExchangeFilter {
    /// Interprets a raw query value. An empty value means `ALL`.
    pub fn from_param(value: &str) -> Self {
        if value.is_empty() || value == "ALL" {
            return ExchangeFilter::All;
        }
        match value.parse::<Exchange>() {
            Ok(exchange) => ExchangeFilter::Only(exchange),
            Err(()) => ExchangeFilter::Unrecognized(value.to_string()),
        }
    }

    /// Whether records from `exchange` are part of this selection.
    pub fn includes(&self, exchange: Exchange) -> bool {
        match self {
            ExchangeFilter::All => true,
            ExchangeFilter::Only(only) => *only == exchange,
            ExchangeFilter::Unrecognized(_) => false,
        }
    }

    /// The exchanges to load, in merge order.
    pub fn selected(&self) -> Vec<Exchange> {
        Exchange::ALL
            .into_iter()
            .filter(|exchange| self.includes(*exchange))
            .collect()
    }
}

impl std::fmt::Display for ExchangeFilter {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            ExchangeFilter::All => write!(f, "ALL"),
            ExchangeFilter::Only(exchange) => write!(f, "{}", exchange),
            ExchangeFilter::Unrecognized(raw) => write!(f, "{}", raw),
        }
    }
}

impl From<Exchange> for ExchangeFilter {
    fn from(exchange: Exchange) -> Self {
        ExchangeFilter::Only(exchange)
    }
}
