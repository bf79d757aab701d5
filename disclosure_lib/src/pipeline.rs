//! The disclosure query pipeline: load, merge, filter, sort, paginate.

use std::sync::Arc;

use disclosure_api::types::{Disclosure, DisclosurePage, ExchangeFilter};
use disclosure_api::DisclosureQuery;

use crate::category::CategoryResolver;
use crate::dataset::DatasetSource;
use crate::dates::{self, format_date};
use crate::error::DisclosureError;
use crate::transform::transform;
use crate::validation::normalize_page;

/// Number of disclosures per page.
pub const PAGE_SIZE: usize = 10;

/// Request-scoped query parameters, taken from untrusted input.
///
/// Date bounds stay as the caller sent them; a bound that cannot be parsed
/// excludes every row rather than failing the request.
#[derive(Clone, Debug, PartialEq)]
pub struct QueryParams {
    pub exchange: ExchangeFilter,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    /// 1-based page number, never below 1.
    pub page: usize,
}

impl Default for QueryParams {
    fn default() -> Self {
        Self {
            exchange: ExchangeFilter::All,
            start_date: None,
            end_date: None,
            page: 1,
        }
    }
}

impl QueryParams {
    /// Builds parameters from raw query-string values. Empty strings count as absent.
    pub fn from_request(
        exchange: Option<&str>,
        start_date: Option<&str>,
        end_date: Option<&str>,
        page: Option<&str>,
    ) -> Self {
        Self {
            exchange: ExchangeFilter::from_param(exchange.unwrap_or("")),
            start_date: non_empty(start_date),
            end_date: non_empty(end_date),
            page: normalize_page(page),
        }
    }

    pub fn with_exchange(mut self, exchange: impl Into<ExchangeFilter>) -> Self {
        self.exchange = exchange.into();
        self
    }

    pub fn with_start_date(mut self, start_date: &str) -> Self {
        self.start_date = Some(start_date.to_string());
        self
    }

    pub fn with_end_date(mut self, end_date: &str) -> Self {
        self.end_date = Some(end_date.to_string());
        self
    }

    pub fn with_page(mut self, page: usize) -> Self {
        self.page = page.max(1);
        self
    }
}

impl From<&DisclosureQuery> for QueryParams {
    fn from(query: &DisclosureQuery) -> Self {
        Self {
            exchange: query.exchange.clone(),
            start_date: query.start_date.map(format_date),
            end_date: query.end_date.map(format_date),
            page: usize::try_from(query.page()).unwrap_or(1).max(1),
        }
    }
}

fn non_empty(value: Option<&str>) -> Option<String> {
    value.filter(|v| !v.is_empty()).map(str::to_string)
}

/// Runs queries against the datasets of a [`DatasetSource`].
///
/// Holds no per-request state: every query reloads and re-transforms the
/// selected datasets.
pub struct QueryPipeline<S> {
    source: S,
    categories: CategoryResolver,
}

impl<S: DatasetSource> QueryPipeline<S> {
    pub fn new(source: S, categories: CategoryResolver) -> Self {
        Self { source, categories }
    }

    pub fn source(&self) -> &S {
        &self.source
    }

    pub fn categories(&self) -> &CategoryResolver {
        &self.categories
    }

    /// Loads and transforms the selected exchanges, Shenzhen first.
    /// A dataset that fails to load contributes nothing.
    pub fn load(&self, exchange: &ExchangeFilter) -> Vec<Disclosure> {
        let mut merged = Vec::new();
        for selected in exchange.selected() {
            match self.source.load(selected) {
                Ok(dataset) => merged.extend(transform(&dataset, selected, &self.categories)),
                Err(e) => tracing::warn!("Treating {} as empty: {}", selected, e),
            }
        }
        merged
    }

    /// Runs the full pipeline for one page.
    pub fn query(&self, params: &QueryParams) -> DisclosurePage {
        let merged = self.load(&params.exchange);
        let mut filtered = filter_by_date_range(
            merged,
            params.start_date.as_deref(),
            params.end_date.as_deref(),
        );
        sort_newest_first(&mut filtered);
        let page = paginate(filtered, params.page);
        tracing::debug!(
            "exchange={} start={:?} end={:?} page={} returned={} total={}",
            params.exchange,
            params.start_date,
            params.end_date,
            params.page,
            page.disclosures.len(),
            page.total
        );
        page
    }
}

/// Runs [`QueryPipeline::query`] on the blocking thread pool, since dataset
/// loading reads files.
pub async fn run_query<S>(
    pipeline: Arc<QueryPipeline<S>>,
    params: QueryParams,
) -> Result<DisclosurePage, DisclosureError>
where
    S: DatasetSource + 'static,
{
    tokio::task::spawn_blocking(move || pipeline.query(&params))
        .await
        .map_err(|e| DisclosureError::Internal(e.to_string()))
}

/// Keeps disclosures whose calendar day lies within the inclusive bounds.
/// Absent bounds are unbounded on that side.
pub fn filter_by_date_range(
    disclosures: Vec<Disclosure>,
    start_date: Option<&str>,
    end_date: Option<&str>,
) -> Vec<Disclosure> {
    if start_date.is_none() && end_date.is_none() {
        return disclosures;
    }
    disclosures
        .into_iter()
        .filter(|disclosure| {
            let after_start = start_date
                .map(|start| dates::is_same_or_after_day(&disclosure.date, start))
                .unwrap_or(true);
            let before_end = end_date
                .map(|end| dates::is_same_or_before_day(&disclosure.date, end))
                .unwrap_or(true);
            after_start && before_end
        })
        .collect()
}

/// Stable sort, newest instant first. Equal instants keep merge order;
/// dates that cannot be parsed go last.
pub fn sort_newest_first(disclosures: &mut [Disclosure]) {
    disclosures.sort_by_cached_key(|disclosure| {
        let instant = dates::parse_instant(&disclosure.date);
        (instant.is_none(), std::cmp::Reverse(instant))
    });
}

/// Slices out one page of [`PAGE_SIZE`] items from the full sorted sequence.
pub fn paginate(disclosures: Vec<Disclosure>, page: usize) -> DisclosurePage {
    let total = disclosures.len();
    let start = page.max(1).saturating_sub(1).saturating_mul(PAGE_SIZE);
    let end = start.saturating_add(PAGE_SIZE);
    let items = disclosures
        .into_iter()
        .skip(start)
        .take(PAGE_SIZE)
        .collect();
    DisclosurePage {
        disclosures: items,
        has_more: end < total,
        total,
        error: None,
    }
}
