use async_trait::async_trait;

use crate::TickerError;

/// A retrieved instrument page, already decoded to UTF-8.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Page {
    /// URL the page was requested from.
    pub url: String,
    /// Decoded document markup.
    pub body: String,
}

impl Page {
    /// Build a page from its URL and decoded body.
    pub fn new(url: impl Into<String>, body: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            body: body.into(),
        }
    }
}

/// Retrieves instrument pages.
///
/// Implementations must report transport failures, non-success statuses and
/// decoding failures as per-page errors (`Fetch`, `Status`, `Decode`) so the
/// orchestrator can keep sibling pages going.
#[async_trait]
pub trait PageSource: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Fetch and decode one page.
    async fn fetch(&self, url: &str) -> Result<Page, TickerError>;
}

/// Supplies the ordered list of instrument pages a run should process.
#[async_trait]
pub trait InstrumentSource: Send + Sync {
    /// Absolute URLs of instrument pages.
    async fn instrument_urls(&self) -> Result<Vec<String>, TickerError>;
}

/// Fixed list of instrument pages, typically from configuration.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StaticUrls(pub Vec<String>);

impl StaticUrls {
    /// Wrap a list of URLs.
    pub fn new<I, S>(urls: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        Self(urls.into_iter().map(Into::into).collect())
    }
}

#[async_trait]
impl InstrumentSource for StaticUrls {
    async fn instrument_urls(&self) -> Result<Vec<String>, TickerError> {
        Ok(self.0.clone())
    }
}
