use chrono::{DateTime, Datelike, Utc};
use rust_decimal::Decimal;
use scraper::{Html, Selector};

use crate::normalize::date::parse_timestamp;
use crate::normalize::number::parse_price;
use crate::{
    ExtractError, Forecast, InstrumentName, InstrumentRecord, ParserConfig, SelectorConfig,
    TickerError,
};

/// Extracts one `InstrumentRecord` from an instrument page.
///
/// Extraction is all-or-nothing: a single unparsable forecast, or a date list
/// that does not line up with the price list, rejects the whole page.
#[derive(Debug)]
pub struct PageExtractor {
    name_full: Selector,
    name_short: Selector,
    current_price: Selector,
    forecast_price: Selector,
    forecast_date: Selector,
    expected_forecasts: usize,
}

impl PageExtractor {
    /// Compile the region selectors.
    ///
    /// # Errors
    /// Returns `Config` if any selector is not valid CSS.
    pub fn new(selectors: &SelectorConfig, expected_forecasts: usize) -> Result<Self, TickerError> {
        Ok(Self {
            name_full: compile(&selectors.name_full)?,
            name_short: compile(&selectors.name_short)?,
            current_price: compile(&selectors.current_price)?,
            forecast_price: compile(&selectors.forecast_price)?,
            forecast_date: compile(&selectors.forecast_date)?,
            expected_forecasts,
        })
    }

    /// Build an extractor from the parser section of the configuration.
    ///
    /// # Errors
    /// Returns `Config` if any configured selector is not valid CSS.
    pub fn from_config(cfg: &ParserConfig) -> Result<Self, TickerError> {
        Self::new(&cfg.selectors, cfg.expected_forecasts)
    }

    /// Forecast count above which a warning is logged.
    #[must_use]
    pub const fn expected_forecasts(&self) -> usize {
        self.expected_forecasts
    }

    /// Extract a record from `document`; `url` is used for error attribution only.
    ///
    /// `now` supplies the year of forecast dates rendered without one.
    ///
    /// # Errors
    /// Returns `TickerError::Extract` when the current price or any forecast is
    /// unparsable, no forecasts are present, or prices and dates do not pair up.
    pub fn extract(
        &self,
        url: &str,
        document: &str,
        now: DateTime<Utc>,
    ) -> Result<InstrumentRecord, TickerError> {
        #[cfg(feature = "tracing")]
        tracing::debug!(target: "ticker::extract", url, "parsing started");

        let fail = |reason: ExtractError| TickerError::extract(url, reason);
        let doc = Html::parse_document(document);

        let name = InstrumentName {
            full: text_of(&doc, &self.name_full).trim().to_string(),
            short: text_of(&doc, &self.name_short).trim().to_string(),
        };

        let price_raw = text_of(&doc, &self.current_price);
        let current_price = parse_price(&price_raw).map_err(|_| {
            fail(ExtractError::Price {
                name: name.full.clone(),
                raw: price_raw.clone(),
            })
        })?;
        if current_price <= Decimal::ZERO {
            return Err(fail(ExtractError::NonPositivePrice {
                name: name.full.clone(),
                raw: price_raw,
            }));
        }

        let mut diffs: Vec<Decimal> = Vec::new();
        for el in doc.select(&self.forecast_price) {
            let raw: String = el.text().collect();
            let diff = parse_price(&raw)
                .ok()
                .and_then(|target| expected_diff(target, current_price))
                .ok_or_else(|| {
                    fail(ExtractError::ForecastPrice {
                        name: name.full.clone(),
                        raw: raw.clone(),
                    })
                })?;
            diffs.push(diff);
        }

        if diffs.is_empty() {
            return Err(fail(ExtractError::NoForecasts {
                name: name.full.clone(),
            }));
        }
        #[cfg(feature = "tracing")]
        if diffs.len() > self.expected_forecasts {
            tracing::warn!(
                target: "ticker::extract",
                expected = self.expected_forecasts,
                got = diffs.len(),
                name = %name.full,
                "more forecasts than expected",
            );
        }

        let year = now.year();
        let mut stamps: Vec<DateTime<Utc>> = Vec::with_capacity(diffs.len());
        for (i, el) in doc.select(&self.forecast_date).enumerate() {
            if i >= diffs.len() {
                return Err(fail(ExtractError::TooManyDates {
                    name: name.full.clone(),
                    forecasts: diffs.len(),
                }));
            }
            let raw: String = el.text().collect();
            let ts = parse_timestamp(&raw, year).map_err(|_| {
                fail(ExtractError::Timestamp {
                    name: name.full.clone(),
                    raw: raw.clone(),
                })
            })?;
            stamps.push(ts);
        }

        if stamps.len() != diffs.len() {
            return Err(fail(ExtractError::CountMismatch {
                name: name.full.clone(),
                dates: stamps.len(),
                forecasts: diffs.len(),
            }));
        }

        let forecasts: Vec<Forecast> = diffs
            .into_iter()
            .zip(stamps)
            .map(|(expected_diff, timestamp)| Forecast {
                expected_diff,
                timestamp,
            })
            .collect();

        #[cfg(feature = "tracing")]
        tracing::debug!(
            target: "ticker::extract",
            url,
            name = %name.full,
            forecasts = forecasts.len(),
            "parsing finished",
        );

        Ok(InstrumentRecord {
            name,
            current_price,
            forecasts,
            consensus: None,
        })
    }
}

/// Percentage deviation of `target` from `current`; `None` on overflow.
fn expected_diff(target: Decimal, current: Decimal) -> Option<Decimal> {
    target
        .checked_sub(current)?
        .checked_div(current)?
        .checked_mul(Decimal::ONE_HUNDRED)
}

fn compile(css: &str) -> Result<Selector, TickerError> {
    Selector::parse(css).map_err(|e| TickerError::Config(format!("invalid selector {css:?}: {e:?}")))
}

/// Concatenated text of every element matching `sel`, like jQuery's `.text()`.
fn text_of(doc: &Html, sel: &Selector) -> String {
    doc.select(sel).flat_map(|el| el.text()).collect()
}
