use async_trait::async_trait;
use ticker_core::{Page, PageSource, TickerError};

use crate::transport::get_ok;

/// Retrieves instrument pages over HTTP and normalizes them to UTF-8.
///
/// The document encoding comes from the `charset` parameter of the response's
/// `Content-Type` header and defaults to UTF-8; legacy single-byte encodings
/// such as windows-1251 are transcoded.
#[derive(Debug, Clone)]
pub struct HttpPageFetcher {
    http: reqwest::Client,
}

impl HttpPageFetcher {
    /// Name reported through `PageSource::name`.
    pub const NAME: &'static str = "ticker-http";

    /// Wrap an existing client; clones share the connection pool.
    #[must_use]
    pub const fn new(http: reqwest::Client) -> Self {
        Self { http }
    }

    /// Build with a fresh client from [`crate::default_client`].
    ///
    /// # Errors
    /// Returns `Other` if the client cannot be built.
    pub fn new_default() -> Result<Self, TickerError> {
        Ok(Self::new(crate::default_client(None)?))
    }
}

#[async_trait]
impl PageSource for HttpPageFetcher {
    fn name(&self) -> &'static str {
        Self::NAME
    }

    async fn fetch(&self, url: &str) -> Result<Page, TickerError> {
        let resp = get_ok(&self.http, url).await?;
        let body = resp
            .text_with_charset("utf-8")
            .await
            .map_err(|e| TickerError::decode(url, e.to_string()))?;
        Ok(Page::new(url, body))
    }
}
