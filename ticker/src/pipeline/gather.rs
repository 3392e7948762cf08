use std::sync::Arc;

use chrono::{DateTime, Utc};
use tokio::sync::mpsc;
use tokio::task::JoinSet;

use ticker_core::{InstrumentRecord, PageExtractor, PageSource};
use ticker_types::{GatherReport, TickerError};

use crate::Ticker;

impl Ticker {
    /// Fetch and extract every URL concurrently.
    ///
    /// Behavior:
    /// - One worker per URL; workers share nothing but the two result queues.
    /// - Every worker yields exactly one record or one error. A worker that
    ///   panics is reported as an `Other` error instead of being lost.
    /// - No policy is applied here: partial success is returned as is.
    pub async fn gather(&self, urls: &[String]) -> GatherReport {
        self.gather_at(urls, self.clock.now()).await
    }

    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ticker::gather",
            skip(self, urls),
            fields(urls = urls.len(), source = self.source.name()),
        )
    )]
    pub(crate) async fn gather_at(&self, urls: &[String], now: DateTime<Utc>) -> GatherReport {
        let (rec_tx, mut rec_rx) = mpsc::unbounded_channel::<InstrumentRecord>();
        let (err_tx, mut err_rx) = mpsc::unbounded_channel::<TickerError>();
        let timeout = self.cfg.parser.fetch_timeout();

        let mut workers = JoinSet::new();
        for url in urls {
            let url = url.clone();
            let source = Arc::clone(&self.source);
            let extractor = Arc::clone(&self.extractor);
            let rec_tx = rec_tx.clone();
            let err_tx = err_tx.clone();
            workers.spawn(async move {
                match fetch_and_extract(source.as_ref(), &extractor, &url, timeout, now).await {
                    Ok(record) => {
                        let _ = rec_tx.send(record);
                    }
                    Err(e) => {
                        #[cfg(feature = "tracing")]
                        tracing::debug!(target: "ticker::gather", url = %url, error = %e, "page failed");
                        let _ = err_tx.send(e);
                    }
                }
            });
        }
        drop(rec_tx);
        drop(err_tx);

        let mut report = GatherReport::default();
        while let Some(joined) = workers.join_next().await {
            if let Err(e) = joined {
                report
                    .errors
                    .push(TickerError::Other(format!("page worker failed: {e}")));
            }
        }

        // All senders are gone once every worker has finished
        while let Some(record) = rec_rx.recv().await {
            report.records.push(record);
        }
        while let Some(err) = err_rx.recv().await {
            report.errors.push(err);
        }

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "ticker::gather",
            records = report.records.len(),
            errors = report.errors.len(),
            "pages gathered"
        );

        report
    }
}

async fn fetch_and_extract(
    source: &dyn PageSource,
    extractor: &PageExtractor,
    url: &str,
    timeout: Option<std::time::Duration>,
    now: DateTime<Utc>,
) -> Result<InstrumentRecord, TickerError> {
    let page = Ticker::fetch_with_timeout(source, url, timeout).await?;
    extractor.extract(&page.url, &page.body, now)
}
