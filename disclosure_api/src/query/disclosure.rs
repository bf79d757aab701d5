use chrono::NaiveDate;
use url::Url;

use crate::types::{Exchange, ExchangeFilter};

use super::common::{Query, QueryCommon};

/// Query for `GET /api/disclosures`.
///
/// `exchange` is omitted from the URL when it is `ALL`, and absent date
/// bounds are omitted; the page number is always sent.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct DisclosureQuery {
    pub common: QueryCommon,
    pub exchange: ExchangeFilter,
    pub start_date: Option<NaiveDate>,
    pub end_date: Option<NaiveDate>,
}

impl Query for DisclosureQuery {
    fn get_common(&mut self) -> &mut QueryCommon {
        &mut self.common
    }

    fn add_to_url(&self, url: &Url) -> Url {
        let mut url = url.clone();
        if self.exchange != ExchangeFilter::All {
            url.query_pairs_mut()
                .append_pair("exchange", &self.exchange.to_string());
        }
        if let Some(start_date) = self.start_date {
            url.query_pairs_mut()
                .append_pair("startDate", &start_date.format("%Y-%m-%d").to_string());
        }
        if let Some(end_date) = self.end_date {
            url.query_pairs_mut()
                .append_pair("endDate", &end_date.format("%Y-%m-%d").to_string());
        }
        self.common.add_to_url(&url)
    }
}

impl DisclosureQuery {
    pub fn with_exchange(mut self, exchange: Exchange) -> Self {
        self.exchange = ExchangeFilter::Only(exchange);
        self
    }

    pub fn with_exchange_filter(mut self, exchange: ExchangeFilter) -> Self {
        self.exchange = exchange;
        self
    }

    pub fn with_start_date(mut self, start_date: NaiveDate) -> Self {
        self.start_date = Some(start_date);
        self
    }

    pub fn with_end_date(mut self, end_date: NaiveDate) -> Self {
        self.end_date = Some(end_date);
        self
    }

    /// Sets both bounds at once; `None` leaves that side unbounded.
    pub fn with_date_range(mut self, start: Option<NaiveDate>, end: Option<NaiveDate>) -> Self {
        self.start_date = start;
        self.end_date = end;
        self
    }

    pub fn page(&self) -> i64 {
        self.common.page
    }
}
