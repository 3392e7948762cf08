use serde::{Deserialize, Serialize};
use ticker_types::{CatalogItem, TickerError};

/// Version reported in every envelope.
pub const API_VERSION: u32 = 1;

/// Error code: the catalog could not be fetched.
pub const ERROR_CATALOG_FETCHING: u32 = 1001;
/// Error code: one or more instrument pages failed.
pub const ERROR_PAGES_PARSING: u32 = 1002;
/// Error code: the forecasts could not be processed after a complete gather.
pub const ERROR_FORECASTS_PROCESSING: u32 = 1003;

/// Response envelope. `data` and `error` are always present, one of them `null`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpResponse<T> {
    /// Always [`API_VERSION`].
    pub api_version: u32,
    /// Path of the request being answered.
    pub method: String,
    /// Payload on success.
    pub data: Option<T>,
    /// Failure description; `None` on success.
    pub error: Option<HttpError>,
}

impl<T> HttpResponse<T> {
    /// Successful answer carrying `data`.
    pub fn ok(data: T, method: impl Into<String>) -> Self {
        Self {
            api_version: API_VERSION,
            method: method.into(),
            data: Some(data),
            error: None,
        }
    }

    /// Failed answer carrying `error`.
    pub fn failed(error: HttpError, method: impl Into<String>) -> Self {
        Self {
            api_version: API_VERSION,
            method: method.into(),
            data: None,
            error: Some(error),
        }
    }
}

/// Error half of the envelope.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct HttpError {
    /// Short summary of what failed.
    pub message: String,
    /// One of the `ERROR_*` codes.
    pub code: u32,
    /// Individual causes.
    pub errors: Vec<HttpErrorDetails>,
}

impl HttpError {
    /// Error with the given summary, code and causes.
    pub fn new(message: impl Into<String>, code: u32, errors: Vec<HttpErrorDetails>) -> Self {
        Self {
            message: message.into(),
            code,
            errors,
        }
    }
}

/// One cause of an [`HttpError`].
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HttpErrorDetails {
    /// Underlying error text.
    pub reason: String,
    /// What the service was doing.
    pub message: String,
    /// URL, catalog page number or config key the cause points at.
    pub location: String,
    /// `url`, `page`, `config` or `run`.
    pub location_type: String,
    /// Hint for fixing the configuration, when there is one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extended_help: Option<String>,
}

impl HttpErrorDetails {
    /// Describe a per-page failure, located at the page URL.
    #[must_use]
    pub fn from_page_error(err: &TickerError) -> Self {
        let message = match err {
            TickerError::Extract { .. } => "cannot extract forecasts",
            TickerError::FetchTimeout { .. } => "page fetch timed out",
            _ => "cannot fetch page",
        };
        Self {
            reason: err.to_string(),
            message: message.to_string(),
            location: err.url().unwrap_or_default().to_string(),
            location_type: "url".to_string(),
            extended_help: None,
        }
    }

    /// Describe a catalog failure; `base_url` is echoed back in the help text.
    #[must_use]
    pub fn from_catalog_error(err: &TickerError, base_url: &str) -> Self {
        let extended_help = Some(format!(
            "check your configuration parameter: parser.catalog.baseUrl\ncurrent value: {base_url}"
        ));
        match err {
            TickerError::Catalog {
                location,
                msg,
                reason,
            } => Self {
                reason: reason.clone(),
                message: msg.clone(),
                location: location.clone(),
                location_type: if location.parse::<usize>().is_ok() {
                    "page"
                } else {
                    "url"
                }
                .to_string(),
                extended_help,
            },
            TickerError::Config(reason) => Self {
                reason: reason.clone(),
                message: "invalid catalog configuration".to_string(),
                location: "parser.catalog.pageSize".to_string(),
                location_type: "config".to_string(),
                extended_help: None,
            },
            other => Self {
                reason: other.to_string(),
                message: "cannot fetch catalog".to_string(),
                location: base_url.to_string(),
                location_type: "url".to_string(),
                extended_help,
            },
        }
    }
}

/// Payload of `GET /catalog/fetch`.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogData {
    /// Number of entries in `items`.
    pub current_item_count: usize,
    /// Every catalog entry, in page order.
    pub items: Vec<CatalogItem>,
}

impl CatalogData {
    /// Wrap `items`, counting them.
    #[must_use]
    pub fn new(items: Vec<CatalogItem>) -> Self {
        Self {
            current_item_count: items.len(),
            items,
        }
    }
}
