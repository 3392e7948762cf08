use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

/// Display names of an instrument as rendered on its page.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct InstrumentName {
    /// Full display name, e.g. the company name.
    pub full: String,
    /// Short display name, e.g. the ticker symbol.
    pub short: String,
}

/// One analyst price target relative to the instrument's current price.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Forecast {
    /// `(target - current) / current * 100`.
    pub expected_diff: Decimal,
    /// When the forecast was published.
    pub timestamp: DateTime<Utc>,
}

/// Forecast data extracted from a single instrument page.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InstrumentRecord {
    /// Display names.
    pub name: InstrumentName,
    /// Reference price the forecasts are relative to; always positive.
    pub current_price: Decimal,
    /// Forecasts in document order until the filters reorder them.
    pub forecasts: Vec<Forecast>,
    /// Mean of `expected_diff` over the surviving forecasts; `None` until aggregated.
    pub consensus: Option<Decimal>,
}

/// The collection returned by a successful run.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TickerCollection {
    /// Instruments that passed every filter, with consensus set.
    pub tickers: Vec<InstrumentRecord>,
}
