use ticker_types::{RunOptions, TickerCollection, TickerError};

use crate::Ticker;

impl Ticker {
    /// Gather `urls`, then filter and aggregate the records.
    ///
    /// All-or-nothing: if any page failed the whole call fails, even though
    /// other pages were processed.
    ///
    /// # Errors
    /// Returns `PagesFailed` with every per-page error, or `Invariant` from the
    /// filter chain or an unrepresentable consensus.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(name = "ticker::collect", skip(self, urls), fields(urls = urls.len()))
    )]
    pub async fn collect(
        &self,
        urls: &[String],
        opts: RunOptions,
    ) -> Result<TickerCollection, TickerError> {
        let now = self.clock.now();
        let report = self.gather_at(urls, now).await;
        if !report.is_complete() {
            #[cfg(feature = "tracing")]
            tracing::warn!(
                target: "ticker::collect",
                failed = report.errors.len(),
                succeeded = report.records.len(),
                "discarding run with failed pages"
            );
            return Err(TickerError::PagesFailed(report.errors));
        }

        let tickers = self.refine_at(report.records, opts, now)?;
        Ok(TickerCollection { tickers })
    }

    /// Pull the instrument URLs from the instrument source and [`collect`](Self::collect) them.
    ///
    /// # Errors
    /// Propagates instrument source errors and the errors of `collect`.
    pub async fn run(&self, opts: RunOptions) -> Result<TickerCollection, TickerError> {
        let urls = self.instruments.instrument_urls().await?;
        self.collect(&urls, opts).await
    }
}
