//! ticker-http
//!
//! Network side of the ticker consensus service: a `PageSource` that retrieves
//! instrument pages over HTTP and a `CatalogClient` that pages through the
//! instrument catalog and doubles as an `InstrumentSource`.
#![warn(missing_docs)]

/// Paginated instrument catalog client.
pub mod catalog;
/// Instrument page fetcher.
pub mod fetcher;
mod transport;

pub use catalog::CatalogClient;
pub use fetcher::HttpPageFetcher;

/// Build the shared HTTP client with the service's user agent.
///
/// # Errors
/// Returns `Other` if the TLS backend cannot be initialised.
pub fn default_client(
    timeout: Option<std::time::Duration>,
) -> Result<reqwest::Client, ticker_core::TickerError> {
    let mut builder = reqwest::Client::builder().user_agent(concat!(
        "ticker-parser/",
        env!("CARGO_PKG_VERSION")
    ));
    if let Some(t) = timeout {
        builder = builder.timeout(t);
    }
    builder
        .build()
        .map_err(|e| ticker_core::TickerError::Other(e.to_string()))
}
