use std::sync::Arc;

use axum::extract::{Query, State};
use axum::http::{StatusCode, Uri};
use axum::routing::get;
use axum::{Json, Router};
use tracing::{error, info, warn};

use ticker::{RunOptions, Ticker, TickerCollection, TickerError};
use ticker_http::CatalogClient;

use crate::envelope::{
    CatalogData, ERROR_CATALOG_FETCHING, ERROR_FORECASTS_PROCESSING, ERROR_PAGES_PARSING,
    HttpError, HttpErrorDetails, HttpResponse,
};

/// Shared handler state.
#[derive(Clone)]
pub struct AppState {
    ticker: Arc<Ticker>,
    catalog: Arc<CatalogClient>,
}

impl AppState {
    /// Wrap the orchestrator and catalog client for sharing across handlers.
    pub fn new(ticker: Ticker, catalog: CatalogClient) -> Self {
        Self {
            ticker: Arc::new(ticker),
            catalog: Arc::new(catalog),
        }
    }
}

/// Build the service router.
pub fn app(state: AppState) -> Router {
    Router::new()
        .route("/", get(job_handler))
        .route("/catalog/fetch", get(catalog_handler))
        .with_state(state)
}

/// Lenient boolean as accepted in query strings.
#[must_use]
pub fn parse_flag(raw: &str) -> Option<bool> {
    match raw {
        "1" | "t" | "T" | "TRUE" | "true" | "True" => Some(true),
        "0" | "f" | "F" | "FALSE" | "false" | "False" => Some(false),
        _ => None,
    }
}

/// First value given for `key`; later repeats are ignored.
fn first_param<'a>(params: &'a [(String, String)], key: &str) -> Option<&'a str> {
    params
        .iter()
        .find(|(k, _)| k == key)
        .map(|(_, v)| v.as_str())
}

type Reply<T> = (StatusCode, Json<HttpResponse<T>>);

async fn job_handler(
    State(state): State<AppState>,
    uri: Uri,
    Query(params): Query<Vec<(String, String)>>,
) -> Reply<TickerCollection> {
    let method = uri.path().to_string();
    let mut opts = RunOptions::default();
    if let Some(raw) = first_param(&params, "filterExtremeEnabled") {
        match parse_flag(raw) {
            Some(flag) => opts.filter_extreme_enabled = flag,
            None => error!("cannot parse filterExtremeEnabled value {{{raw}}}"),
        }
    }
    info!(filter_extreme_enabled = opts.filter_extreme_enabled, "running job");

    match state.ticker.run(opts).await {
        Ok(collection) => {
            info!(tickers = collection.tickers.len(), "job finished");
            (StatusCode::OK, Json(HttpResponse::ok(collection, method)))
        }
        Err(e) => {
            error!(error = %e, "job failed");
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HttpResponse::failed(job_error(e, state.catalog.base_url()), method)),
            )
        }
    }
}

fn job_error(err: TickerError, catalog_base_url: &str) -> HttpError {
    match err {
        TickerError::PagesFailed(errors) => HttpError::new(
            "cannot parse pages",
            ERROR_PAGES_PARSING,
            errors
                .into_iter()
                .flat_map(TickerError::flatten)
                .map(|e| HttpErrorDetails::from_page_error(&e))
                .collect(),
        ),
        e @ TickerError::Catalog { .. } => HttpError::new(
            "cannot fetch catalog",
            ERROR_CATALOG_FETCHING,
            vec![HttpErrorDetails::from_catalog_error(&e, catalog_base_url)],
        ),
        other => HttpError::new(
            "cannot process forecasts",
            ERROR_FORECASTS_PROCESSING,
            vec![HttpErrorDetails {
                reason: other.to_string(),
                message: "cannot process forecasts".to_string(),
                location: String::new(),
                location_type: "run".to_string(),
                extended_help: None,
            }],
        ),
    }
}

async fn catalog_handler(State(state): State<AppState>, uri: Uri) -> Reply<CatalogData> {
    let method = uri.path().to_string();
    info!(path = %method, "catalog requested");

    match state.catalog.fetch_all().await {
        Ok(items) => {
            info!(items = items.len(), "catalog items fetched");
            (StatusCode::OK, Json(HttpResponse::ok(CatalogData::new(items), method)))
        }
        Err(e) => {
            warn!(error = %e, "catalog fetch failed");
            let details = HttpErrorDetails::from_catalog_error(&e, state.catalog.base_url());
            (
                StatusCode::INTERNAL_SERVER_ERROR,
                Json(HttpResponse::failed(
                    HttpError::new("cannot fetch catalog", ERROR_CATALOG_FETCHING, vec![details]),
                    method,
                )),
            )
        }
    }
}
