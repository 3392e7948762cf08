use chrono::{DateTime, Months, Utc};

use super::{FilterOutcome, ForecastFilter, Rejection};
use crate::{InstrumentRecord, TickerError};

/// Drops forecasts published more than one calendar month before `now` and
/// rejects instruments left with fewer than `min_forecasts`.
#[derive(Debug, Clone, Copy)]
pub struct AgeFilter {
    cutoff: DateTime<Utc>,
    min_forecasts: usize,
}

impl AgeFilter {
    /// Filter relative to `now`.
    #[must_use]
    pub fn new(now: DateTime<Utc>, min_forecasts: usize) -> Self {
        let cutoff = now
            .checked_sub_months(Months::new(1))
            .unwrap_or(DateTime::<Utc>::MIN_UTC);
        Self {
            cutoff,
            min_forecasts,
        }
    }

    /// Oldest publication time that is still kept.
    #[must_use]
    pub const fn cutoff(&self) -> DateTime<Utc> {
        self.cutoff
    }
}

impl ForecastFilter for AgeFilter {
    fn name(&self) -> &'static str {
        "age"
    }

    fn apply(&self, mut record: InstrumentRecord) -> Result<FilterOutcome, TickerError> {
        record.forecasts.retain(|f| f.timestamp >= self.cutoff);

        if record.forecasts.len() < self.min_forecasts {
            return Ok(FilterOutcome::Reject(Rejection::InsufficientForecasts {
                name: record.name.full,
                remaining: record.forecasts.len(),
                required: self.min_forecasts,
            }));
        }
        Ok(FilterOutcome::Accept(record))
    }
}
