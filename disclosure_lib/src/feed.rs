//! Client-side incremental loading of disclosures.
//!
//! [`DisclosureFeed`] holds one growing list for the current filter. A filter
//! change resets the list and fetches page 1; "load more" appends the next
//! page. Every fetch carries a request token, and a response is applied only
//! while its token is still current, so a late "load more" response for an
//! old filter cannot leak into the list built for the new one.

use std::future::Future;

use disclosure_api::types::{Disclosure, DisclosurePage, ExchangeFilter};
use disclosure_api::{DisclosureQuery, Query};

use crate::dates::DateRange;
use crate::error::DisclosureError;

/// Fetches one page of disclosures for a query.
pub trait DisclosureFetcher {
    fn fetch(
        &self,
        query: &DisclosureQuery,
    ) -> impl Future<Output = Result<DisclosurePage, DisclosureError>> + Send;
}

impl DisclosureFetcher for disclosure_api::Client {
    fn fetch(
        &self,
        query: &DisclosureQuery,
    ) -> impl Future<Output = Result<DisclosurePage, DisclosureError>> + Send {
        async move { Ok(self.get_disclosures(query).await?) }
    }
}

/// The user's current selection: exchange plus date range.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct FeedFilter {
    pub exchange: ExchangeFilter,
    pub range: DateRange,
}

impl FeedFilter {
    pub fn new(exchange: ExchangeFilter, range: DateRange) -> Self {
        Self { exchange, range }
    }

    /// The API query for `page` under this filter.
    pub fn to_query(&self, page: i64) -> DisclosureQuery {
        DisclosureQuery::default()
            .with_exchange_filter(self.exchange.clone())
            .with_date_range(self.range.start, self.range.end)
            .with_page(page)
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LoadKind {
    FilterChange,
    More,
}

#[derive(Clone, Debug, PartialEq)]
pub enum FeedState {
    Idle,
    Loading { token: u64, kind: LoadKind, page: i64 },
    Error { message: String },
}

/// A fetch the feed has committed to; its response goes back through [`DisclosureFeed::apply`].
#[derive(Clone, Debug, PartialEq)]
pub struct PendingRequest {
    pub token: u64,
    pub kind: LoadKind,
    pub query: DisclosureQuery,
}

/// What [`DisclosureFeed::apply`] did with a response.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum ApplyOutcome {
    Applied,
    /// The response belonged to a superseded request and was dropped.
    Stale,
    /// The fetch failed; items, page and `has_more` are unchanged.
    Failed,
}

pub struct DisclosureFeed<F> {
    fetcher: F,
    state: FeedState,
    items: Vec<Disclosure>,
    /// Last page successfully loaded; 0 before anything is loaded.
    page: i64,
    has_more: bool,
    filter: FeedFilter,
    last_token: u64,
}

impl<F> DisclosureFeed<F> {
    /// An empty feed with the default filter. The first [`load_more`](Self::load_more)
    /// fetches page 1.
    pub fn new(fetcher: F) -> Self {
        Self {
            fetcher,
            state: FeedState::Idle,
            items: Vec::new(),
            page: 0,
            has_more: true,
            filter: FeedFilter::default(),
            last_token: 0,
        }
    }

    /// A feed seeded with an already-fetched first page for the default filter.
    pub fn with_initial(fetcher: F, initial: DisclosurePage) -> Self {
        Self {
            items: initial.disclosures,
            page: 1,
            has_more: initial.has_more,
            ..Self::new(fetcher)
        }
    }

    pub fn items(&self) -> &[Disclosure] {
        &self.items
    }

    pub fn page(&self) -> i64 {
        self.page
    }

    pub fn has_more(&self) -> bool {
        self.has_more
    }

    pub fn filter(&self) -> &FeedFilter {
        &self.filter
    }

    pub fn state(&self) -> &FeedState {
        &self.state
    }

    pub fn is_loading(&self) -> bool {
        matches!(self.state, FeedState::Loading { .. })
    }

    fn next_token(&mut self) -> u64 {
        self.last_token += 1;
        self.last_token
    }

    /// Switches to `filter`: clears the list, requests page 1 and
    /// optimistically sets `has_more`. Any request still in flight becomes stale.
    /// The page counter stays at 0 until page 1 arrives.
    pub fn begin_filter_change(&mut self, filter: FeedFilter) -> PendingRequest {
        let token = self.next_token();
        self.filter = filter;
        self.items.clear();
        self.page = 0;
        self.has_more = true;
        self.state = FeedState::Loading {
            token,
            kind: LoadKind::FilterChange,
            page: 1,
        };
        PendingRequest {
            token,
            kind: LoadKind::FilterChange,
            query: self.filter.to_query(1),
        }
    }

    /// Requests the next page under the current filter. Returns `None` while
    /// another request is outstanding or when there is nothing more to load.
    pub fn begin_load_more(&mut self) -> Option<PendingRequest> {
        if self.is_loading() || !self.has_more {
            return None;
        }
        let token = self.next_token();
        let page = self.page + 1;
        self.state = FeedState::Loading {
            token,
            kind: LoadKind::More,
            page,
        };
        Some(PendingRequest {
            token,
            kind: LoadKind::More,
            query: self.filter.to_query(page),
        })
    }

    /// Applies the result of the request identified by `token`.
    pub fn apply(
        &mut self,
        token: u64,
        result: Result<DisclosurePage, DisclosureError>,
    ) -> ApplyOutcome {
        let (kind, page) = match self.state {
            FeedState::Loading {
                token: current,
                kind,
                page,
            } if current == token => (kind, page),
            _ => {
                tracing::debug!("Dropping stale response for request {}", token);
                return ApplyOutcome::Stale;
            }
        };

        match result {
            Ok(response) => {
                match kind {
                    LoadKind::FilterChange => self.items = response.disclosures,
                    LoadKind::More => self.items.extend(response.disclosures),
                }
                self.page = page;
                self.has_more = response.has_more;
                self.state = FeedState::Idle;
                ApplyOutcome::Applied
            }
            Err(e) => {
                tracing::warn!("Failed to load disclosures (page {}): {}", page, e);
                self.state = FeedState::Error {
                    message: e.to_string(),
                };
                ApplyOutcome::Failed
            }
        }
    }
}

impl<F: DisclosureFetcher> DisclosureFeed<F> {
    /// Changes the filter and loads its first page.
    pub async fn change_filter(&mut self, filter: FeedFilter) -> ApplyOutcome {
        let request = self.begin_filter_change(filter);
        let result = self.fetcher.fetch(&request.query).await;
        self.apply(request.token, result)
    }

    /// Loads and appends the next page, if one may be requested.
    pub async fn load_more(&mut self) -> Option<ApplyOutcome> {
        let request = self.begin_load_more()?;
        let result = self.fetcher.fetch(&request.query).await;
        Some(self.apply(request.token, result))
    }
}
