//! HTTP surface over the query pipeline.

use std::sync::Arc;

use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::Json,
    routing::get,
    Router,
};
use disclosure_lib::types::DisclosurePage;
use disclosure_lib::{run_query, DatasetSource, QueryParams, QueryPipeline};
use serde::Deserialize;
use serde_json::{json, Value};
use tower::ServiceBuilder;
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

/// The only error text a client ever sees.
pub const GENERIC_ERROR: &str = "Failed to load disclosures";

/// Raw query string of `GET /api/disclosures`. Everything stays a string so
/// that bad values are normalized instead of rejected.
#[derive(Debug, Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DisclosureParams {
    pub exchange: Option<String>,
    pub start_date: Option<String>,
    pub end_date: Option<String>,
    pub page: Option<String>,
}

impl DisclosureParams {
    fn to_query_params(&self) -> QueryParams {
        QueryParams::from_request(
            self.exchange.as_deref(),
            self.start_date.as_deref(),
            self.end_date.as_deref(),
            self.page.as_deref(),
        )
    }
}

pub fn router<S>(pipeline: Arc<QueryPipeline<S>>) -> Router
where
    S: DatasetSource + 'static,
{
    Router::new()
        .route("/api/disclosures", get(list_disclosures::<S>))
        .route("/disclosures", get(list_disclosures::<S>))
        .route("/healthz", get(health_check))
        .layer(
            ServiceBuilder::new()
                .layer(TraceLayer::new_for_http())
                .layer(
                    CorsLayer::new()
                        .allow_origin(Any)
                        .allow_methods(Any)
                        .allow_headers(Any),
                ),
        )
        .with_state(pipeline)
}

async fn health_check() -> Json<Value> {
    Json(json!({ "status": "ok" }))
}

async fn list_disclosures<S>(
    State(pipeline): State<Arc<QueryPipeline<S>>>,
    Query(params): Query<DisclosureParams>,
) -> (StatusCode, Json<DisclosurePage>)
where
    S: DatasetSource + 'static,
{
    match run_query(pipeline, params.to_query_params()).await {
        Ok(page) => (StatusCode::OK, Json(page)),
        Err(e) => {
            tracing::error!("Disclosure query failed: {}", e);
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(DisclosurePage::failure(GENERIC_ERROR)),
            )
        }
    }
}
