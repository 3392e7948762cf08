//! Configuration types consumed by the orchestrator, the filters and the service.
//!
//! Every field has a default so a partial (or missing) configuration file still
//! yields a usable value. Keys are camelCase on the wire.

use std::time::Duration;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Top-level configuration of the service.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct TickerConfig {
    /// Lower the default log level to `debug`.
    pub debug: bool,
    /// HTTP listener settings.
    pub server: ServerConfig,
    /// Forecast filter settings.
    pub filters: FiltersConfig,
    /// Page retrieval and extraction settings.
    pub parser: ParserConfig,
}

/// HTTP listener settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ServerConfig {
    /// TCP port to listen on.
    pub port: u16,
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self { port: 8080 }
    }
}

/// Settings of the forecast filter chain.
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct FiltersConfig {
    /// Age filter settings.
    pub age: AgeFilterConfig,
    /// Extreme-value filter settings.
    pub extreme_values: ExtremeValuesConfig,
}

/// Age filter settings. The window is fixed at one calendar month.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct AgeFilterConfig {
    /// Instruments with fewer fresh forecasts than this are rejected.
    pub min_forecasts: usize,
}

impl Default for AgeFilterConfig {
    fn default() -> Self {
        Self { min_forecasts: 5 }
    }
}

/// Extreme-value filter settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ExtremeValuesConfig {
    /// Run the filter at all.
    pub enabled: bool,
    /// Gap, in percentage points, above which the edge value is dropped.
    pub threshold: Decimal,
}

impl Default for ExtremeValuesConfig {
    fn default() -> Self {
        Self {
            enabled: true,
            threshold: Decimal::new(5, 0),
        }
    }
}

/// Page retrieval and extraction settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct ParserConfig {
    /// Instrument pages processed by a run.
    pub urls: Vec<String>,
    /// Take the instrument pages from the catalog instead of `urls`.
    pub use_catalog: bool,
    /// Forecast count above which a warning is logged.
    pub expected_forecasts: usize,
    /// Optional per-page deadline in milliseconds.
    pub fetch_timeout_ms: Option<u64>,
    /// CSS selectors of the known document regions.
    pub selectors: SelectorConfig,
    /// Catalog pager settings.
    pub catalog: CatalogConfig,
}

impl ParserConfig {
    /// Per-page deadline, if configured.
    #[must_use]
    pub fn fetch_timeout(&self) -> Option<Duration> {
        self.fetch_timeout_ms.map(Duration::from_millis)
    }
}

impl Default for ParserConfig {
    fn default() -> Self {
        Self {
            urls: Vec::new(),
            use_catalog: false,
            expected_forecasts: 5,
            fetch_timeout_ms: None,
            selectors: SelectorConfig::default(),
            catalog: CatalogConfig::default(),
        }
    }
}

/// CSS selectors of the document regions the extractor reads.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct SelectorConfig {
    /// Full display name.
    pub name_full: String,
    /// Short display name (ticker symbol).
    pub name_short: String,
    /// Current price.
    pub current_price: String,
    /// Repeated forecast target price.
    pub forecast_price: String,
    /// Repeated forecast date.
    pub forecast_date: String,
}

impl Default for SelectorConfig {
    fn default() -> Self {
        Self {
            name_full: ".header__tool__name-full".to_string(),
            name_short: ".header__tool__name-short".to_string(),
            current_price: ".chart__info__sum".to_string(),
            forecast_price: ".js-review .item__review__sum".to_string(),
            forecast_date: ".js-review .item__review__date_big".to_string(),
        }
    }
}

/// Catalog pager settings.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default, rename_all = "camelCase")]
pub struct CatalogConfig {
    /// Endpoint that lists instruments page by page.
    pub base_url: String,
    /// Items requested per page.
    pub page_size: usize,
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            base_url: String::new(),
            page_size: 25,
        }
    }
}
