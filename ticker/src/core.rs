use std::sync::Arc;
use std::time::Duration;

use ticker_core::{
    Clock, InstrumentSource, Page, PageExtractor, PageSource, StaticUrls, SystemClock,
};
use ticker_types::{TickerConfig, TickerError};

/// Orchestrator that runs the fetch/extract/filter/consensus pipeline.
pub struct Ticker {
    pub(crate) source: Arc<dyn PageSource>,
    pub(crate) instruments: Arc<dyn InstrumentSource>,
    pub(crate) extractor: Arc<PageExtractor>,
    pub(crate) clock: Arc<dyn Clock>,
    pub(crate) cfg: Arc<TickerConfig>,
}

/// Builder for constructing a [`Ticker`].
pub struct TickerBuilder {
    source: Option<Arc<dyn PageSource>>,
    instruments: Option<Arc<dyn InstrumentSource>>,
    clock: Arc<dyn Clock>,
    cfg: TickerConfig,
}

impl Default for TickerBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TickerBuilder {
    /// Create a builder with default configuration and the system clock.
    ///
    /// A page source must be registered with [`with_source`](Self::with_source)
    /// before [`build`](Self::build). Without an instrument source the
    /// configured `parser.urls` are used.
    #[must_use]
    pub fn new() -> Self {
        Self {
            source: None,
            instruments: None,
            clock: Arc::new(SystemClock),
            cfg: TickerConfig::default(),
        }
    }

    /// Register the page source that retrieves instrument documents.
    #[must_use]
    pub fn with_source(mut self, source: Arc<dyn PageSource>) -> Self {
        self.source = Some(source);
        self
    }

    /// Register where [`Ticker::run`] takes its instrument URLs from.
    #[must_use]
    pub fn with_instruments(mut self, instruments: Arc<dyn InstrumentSource>) -> Self {
        self.instruments = Some(instruments);
        self
    }

    /// Replace the whole configuration.
    #[must_use]
    pub fn config(mut self, cfg: TickerConfig) -> Self {
        self.cfg = cfg;
        self
    }

    /// Replace the clock; tests pin it with `FixedClock`.
    #[must_use]
    pub fn clock(mut self, clock: Arc<dyn Clock>) -> Self {
        self.clock = clock;
        self
    }

    /// Build the orchestrator.
    ///
    /// # Errors
    /// Returns `InvalidArg` when no page source was registered and `Config`
    /// when a configured selector does not parse.
    pub fn build(self) -> Result<Ticker, TickerError> {
        let source = self
            .source
            .ok_or_else(|| TickerError::InvalidArg("no page source registered".into()))?;
        let extractor = PageExtractor::from_config(&self.cfg.parser)?;
        let instruments = self
            .instruments
            .unwrap_or_else(|| Arc::new(StaticUrls::new(self.cfg.parser.urls.clone())));

        Ok(Ticker {
            source,
            instruments,
            extractor: Arc::new(extractor),
            clock: self.clock,
            cfg: Arc::new(self.cfg),
        })
    }
}

impl Ticker {
    /// Start building a new `Ticker`.
    #[must_use]
    pub fn builder() -> TickerBuilder {
        TickerBuilder::new()
    }

    /// Configuration the orchestrator was built with.
    #[must_use]
    pub fn config(&self) -> &TickerConfig {
        &self.cfg
    }

    /// Fetch one page, bounded by `timeout` when set.
    #[cfg_attr(
        feature = "tracing",
        tracing::instrument(
            name = "ticker::core::fetch_with_timeout",
            skip(source),
            fields(
                source = source.name(),
                timeout_ms = timeout.map(|t| u64::try_from(t.as_millis()).unwrap_or(u64::MAX)),
            ),
        )
    )]
    pub(crate) async fn fetch_with_timeout(
        source: &dyn PageSource,
        url: &str,
        timeout: Option<Duration>,
    ) -> Result<Page, TickerError> {
        match timeout {
            Some(t) => (tokio::time::timeout(t, source.fetch(url)).await)
                .unwrap_or_else(|_| Err(TickerError::fetch_timeout(url))),
            None => source.fetch(url).await,
        }
    }
}
