//! Composable per-instrument forecast filters.
//!
//! A filter takes a record by value and either hands back a (possibly smaller)
//! record or rejects it. The chain threads a record through its filters in
//! order and stops at the first rejection. Rejection is an expected outcome,
//! not an error; `Err` is reserved for broken internal invariants.

use core::fmt;

use chrono::{DateTime, Utc};

use crate::{FiltersConfig, InstrumentRecord, TickerError};

mod age;
mod extreme;

pub use age::AgeFilter;
pub use extreme::ExtremeValueFilter;

/// Result of running a filter over one record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FilterOutcome {
    /// The record continues, possibly with fewer forecasts.
    Accept(InstrumentRecord),
    /// The record is dropped from the output.
    Reject(Rejection),
}

/// Why an instrument was excluded from the output.
#[derive(Debug, Clone, PartialEq, Eq)]
#[non_exhaustive]
pub enum Rejection {
    /// Too few forecasts survived the age window.
    InsufficientForecasts {
        /// Instrument full name.
        name: String,
        /// Forecasts left after filtering.
        remaining: usize,
        /// Minimum required.
        required: usize,
    },
}

impl fmt::Display for Rejection {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InsufficientForecasts {
                name,
                remaining,
                required,
            } => write!(
                f,
                "not enough actual forecasts for {name}: {remaining} < {required}"
            ),
        }
    }
}

/// One step of the filter chain.
pub trait ForecastFilter: Send + Sync {
    /// Short identifier used in logs.
    fn name(&self) -> &'static str;

    /// Accept (possibly trimmed) or reject `record`.
    ///
    /// # Errors
    /// Returns `Invariant` if the filter's own bookkeeping is inconsistent.
    fn apply(&self, record: InstrumentRecord) -> Result<FilterOutcome, TickerError>;
}

/// Ordered sequence of filters.
#[derive(Default)]
pub struct FilterChain {
    filters: Vec<Box<dyn ForecastFilter>>,
}

impl FilterChain {
    /// An empty chain that accepts everything unchanged.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Append a filter.
    #[must_use]
    pub fn with(mut self, filter: impl ForecastFilter + 'static) -> Self {
        self.filters.push(Box::new(filter));
        self
    }

    /// The standard chain: age filter, then the extreme-value filter when
    /// `extreme_enabled` and the configuration both allow it.
    #[must_use]
    pub fn from_config(cfg: &FiltersConfig, now: DateTime<Utc>, extreme_enabled: bool) -> Self {
        let chain = Self::new().with(AgeFilter::new(now, cfg.age.min_forecasts));
        if extreme_enabled && cfg.extreme_values.enabled {
            chain.with(ExtremeValueFilter::new(cfg.extreme_values.threshold))
        } else {
            chain
        }
    }

    /// Names of the filters in execution order.
    #[must_use]
    pub fn names(&self) -> Vec<&'static str> {
        self.filters.iter().map(|f| f.name()).collect()
    }

    /// Thread `record` through every filter, stopping at the first rejection.
    ///
    /// # Errors
    /// Propagates invariant violations from any filter.
    pub fn apply(&self, record: InstrumentRecord) -> Result<FilterOutcome, TickerError> {
        let mut current = record;
        for filter in &self.filters {
            match filter.apply(current)? {
                FilterOutcome::Accept(next) => current = next,
                reject @ FilterOutcome::Reject(_) => {
                    #[cfg(feature = "tracing")]
                    if let FilterOutcome::Reject(reason) = &reject {
                        tracing::debug!(
                            target: "ticker::filter",
                            filter = filter.name(),
                            %reason,
                            "instrument rejected",
                        );
                    }
                    return Ok(reject);
                }
            }
        }
        Ok(FilterOutcome::Accept(current))
    }

    /// Run every record through the chain and keep the accepted ones.
    ///
    /// # Errors
    /// Propagates the first invariant violation.
    pub fn run<I>(&self, records: I) -> Result<Vec<InstrumentRecord>, TickerError>
    where
        I: IntoIterator<Item = InstrumentRecord>,
    {
        let mut kept = Vec::new();
        for record in records {
            if let FilterOutcome::Accept(r) = self.apply(record)? {
                kept.push(r);
            }
        }
        Ok(kept)
    }
}
