use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Unified error type for the ticker workspace.
///
/// Per-page failures (fetch, decode, extraction) are attributed to the URL they
/// happened on so that the orchestrator can report them individually; the
/// aggregate `PagesFailed` is what the API boundary returns when any page of a
/// run failed.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum TickerError {
    /// The transport failed before a response was received.
    #[error("cannot get document ({url}): {msg}")]
    Fetch {
        /// Page that was requested.
        url: String,
        /// Transport error message.
        msg: String,
    },

    /// The server answered with a non-success status.
    #[error("cannot get document ({url}): status code is {status}")]
    Status {
        /// Page that was requested.
        url: String,
        /// HTTP status code received.
        status: u16,
    },

    /// The body could not be read or converted to UTF-8.
    #[error("cannot convert document ({url}) to utf-8: {msg}")]
    Decode {
        /// Page that was requested.
        url: String,
        /// Decoder error message.
        msg: String,
    },

    /// The per-page deadline elapsed while the page was being fetched.
    #[error("timed out fetching {url}")]
    FetchTimeout {
        /// Page that was requested.
        url: String,
    },

    /// The document was retrieved but is malformed or partially rendered.
    #[error("cannot extract forecasts from {url}: {reason}")]
    Extract {
        /// Page the document came from.
        url: String,
        /// Structured reason.
        reason: ExtractError,
    },

    /// An internal invariant did not hold.
    #[error("invariant violated: {0}")]
    Invariant(String),

    /// One or more pages of a run failed; contains the individual failures.
    #[error("cannot parse pages: {0:?}")]
    PagesFailed(Vec<TickerError>),

    /// The catalog pager failed.
    #[error("{msg} ({location}): {reason}")]
    Catalog {
        /// Page number when no URL could be built, otherwise the page URL.
        location: String,
        /// What the pager was doing.
        msg: String,
        /// Underlying cause.
        reason: String,
    },

    /// Invalid input argument.
    #[error("invalid argument: {0}")]
    InvalidArg(String),

    /// Invalid configuration value.
    #[error("invalid configuration: {0}")]
    Config(String),

    /// Unknown/opaque error.
    #[error("unknown error: {0}")]
    Other(String),
}

/// Reasons a retrieved document does not yield an instrument record.
///
/// `name` is the instrument's full display name as far as it could be read,
/// which may be empty on badly broken pages.
#[derive(Debug, Error, Serialize, Deserialize, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum ExtractError {
    /// The current price could not be parsed.
    #[error("error parsing the price ({raw}) for {name}")]
    Price {
        /// Instrument full name.
        name: String,
        /// Raw text of the price region.
        raw: String,
    },

    /// The current price parsed but is zero or negative.
    #[error("price ({raw}) for {name} is not positive")]
    NonPositivePrice {
        /// Instrument full name.
        name: String,
        /// Raw text of the price region.
        raw: String,
    },

    /// A forecast target price could not be parsed.
    #[error("error parsing a forecast target price ({raw}) for {name}")]
    ForecastPrice {
        /// Instrument full name.
        name: String,
        /// Raw text of the forecast region.
        raw: String,
    },

    /// A forecast timestamp matched neither date layout.
    #[error("error parsing the time ({raw}) for {name}")]
    Timestamp {
        /// Instrument full name.
        name: String,
        /// Raw text of the date region.
        raw: String,
    },

    /// More timestamps than forecast prices were found.
    #[error("too many time values for {forecasts} forecasts for {name}")]
    TooManyDates {
        /// Instrument full name.
        name: String,
        /// Number of forecast prices found.
        forecasts: usize,
    },

    /// Fewer timestamps than forecast prices were found.
    #[error("dates count {dates} is differ from forecasts count {forecasts} for {name}")]
    CountMismatch {
        /// Instrument full name.
        name: String,
        /// Number of timestamps found.
        dates: usize,
        /// Number of forecast prices found.
        forecasts: usize,
    },

    /// The page carries no forecasts at all.
    #[error("no forecasts found for {name}")]
    NoForecasts {
        /// Instrument full name.
        name: String,
    },
}

impl TickerError {
    /// Helper: build a `Fetch` error.
    pub fn fetch(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Fetch {
            url: url.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `Status` error.
    pub fn status(url: impl Into<String>, status: u16) -> Self {
        Self::Status {
            url: url.into(),
            status,
        }
    }

    /// Helper: build a `Decode` error.
    pub fn decode(url: impl Into<String>, msg: impl Into<String>) -> Self {
        Self::Decode {
            url: url.into(),
            msg: msg.into(),
        }
    }

    /// Helper: build a `FetchTimeout` error.
    pub fn fetch_timeout(url: impl Into<String>) -> Self {
        Self::FetchTimeout { url: url.into() }
    }

    /// Helper: attribute an extraction failure to a page.
    pub fn extract(url: impl Into<String>, reason: ExtractError) -> Self {
        Self::Extract {
            url: url.into(),
            reason,
        }
    }

    /// Helper: build a `Catalog` error.
    pub fn catalog(
        location: impl Into<String>,
        msg: impl Into<String>,
        reason: impl Into<String>,
    ) -> Self {
        Self::Catalog {
            location: location.into(),
            msg: msg.into(),
            reason: reason.into(),
        }
    }

    /// URL of the page this error is attributed to, if any.
    #[must_use]
    pub fn url(&self) -> Option<&str> {
        match self {
            Self::Fetch { url, .. }
            | Self::Status { url, .. }
            | Self::Decode { url, .. }
            | Self::FetchTimeout { url }
            | Self::Extract { url, .. } => Some(url),
            _ => None,
        }
    }

    /// Returns true for failures tied to a single page rather than the whole run.
    #[must_use]
    pub const fn is_page_error(&self) -> bool {
        matches!(
            self,
            Self::Fetch { .. }
                | Self::Status { .. }
                | Self::Decode { .. }
                | Self::FetchTimeout { .. }
                | Self::Extract { .. }
        )
    }

    /// Flatten nested `PagesFailed` structures into a plain vector.
    #[must_use]
    pub fn flatten(self) -> Vec<Self> {
        match self {
            Self::PagesFailed(list) => list.into_iter().flat_map(Self::flatten).collect(),
            other => vec![other],
        }
    }
}
