use async_trait::async_trait;
use ticker_core::{CatalogConfig, CatalogItem, InstrumentSource, TickerError};
use url::Url;

use crate::transport::get_ok;

/// Walks the paginated instrument catalog.
///
/// Page `n` is requested as `base_url?sort=leaders&type=share&offset=n*page_size&limit=page_size`.
/// Paging stops at the first page whose length differs from `page_size`.
#[derive(Debug, Clone)]
pub struct CatalogClient {
    http: reqwest::Client,
    base_url: String,
    page_size: usize,
}

impl CatalogClient {
    /// Create a client for the configured catalog endpoint.
    #[must_use]
    pub fn new(http: reqwest::Client, cfg: &CatalogConfig) -> Self {
        Self {
            http,
            base_url: cfg.base_url.clone(),
            page_size: cfg.page_size,
        }
    }

    /// Configured catalog endpoint.
    #[must_use]
    pub fn base_url(&self) -> &str {
        &self.base_url
    }

    /// Configured page size.
    #[must_use]
    pub const fn page_size(&self) -> usize {
        self.page_size
    }

    /// URL of catalog page `page` (zero-based).
    ///
    /// # Errors
    /// Returns `Catalog` if the base URL does not parse.
    pub fn page_url(&self, page: usize) -> Result<Url, TickerError> {
        let mut url = Url::parse(&self.base_url).map_err(|e| {
            TickerError::catalog(page.to_string(), "cannot get catalog page url", e.to_string())
        })?;
        let offset = page.saturating_mul(self.page_size);
        url.query_pairs_mut()
            .append_pair("sort", "leaders")
            .append_pair("type", "share")
            .append_pair("offset", &offset.to_string())
            .append_pair("limit", &self.page_size.to_string());
        Ok(url)
    }

    /// Fetch and decode a single catalog page.
    ///
    /// # Errors
    /// Returns `Catalog` for an unusable base URL, a transport failure, a
    /// non-200 status or a body that is not a JSON array of items.
    pub async fn fetch_page(&self, page: usize) -> Result<Vec<CatalogItem>, TickerError> {
        let url = self.page_url(page)?;
        let location = url.to_string();

        let resp = get_ok(&self.http, url.as_str()).await.map_err(|e| {
            TickerError::catalog(&location, "cannot fetch catalog page", e.to_string())
        })?;
        let bytes = resp.bytes().await.map_err(|e| {
            TickerError::catalog(&location, "cannot read catalog page", e.to_string())
        })?;
        serde_json::from_slice(&bytes).map_err(|e| {
            TickerError::catalog(&location, "cannot parse catalog page", e.to_string())
        })
    }

    /// Fetch every catalog page in order and concatenate the items.
    ///
    /// # Errors
    /// Returns `Config` when the page size is zero, otherwise the first page
    /// error encountered.
    pub async fn fetch_all(&self) -> Result<Vec<CatalogItem>, TickerError> {
        if self.page_size == 0 {
            return Err(TickerError::Config(
                "parser.catalog.pageSize must be greater than zero".into(),
            ));
        }

        let mut items = Vec::new();
        let mut page = 0usize;
        loop {
            let batch = self.fetch_page(page).await?;
            let len = batch.len();

            #[cfg(feature = "tracing")]
            tracing::debug!(target: "ticker::catalog", page, items = len, "catalog page fetched");

            items.extend(batch);
            if len != self.page_size {
                break;
            }
            page += 1;
        }

        #[cfg(feature = "tracing")]
        tracing::info!(target: "ticker::catalog", pages = page + 1, items = items.len(), "catalog fetched");

        Ok(items)
    }
}

#[async_trait]
impl InstrumentSource for CatalogClient {
    async fn instrument_urls(&self) -> Result<Vec<String>, TickerError> {
        Ok(self
            .fetch_all()
            .await?
            .into_iter()
            .map(|item| item.url)
            .filter(|url| !url.is_empty())
            .collect())
    }
}
