use rust_decimal::Decimal;

use super::{FilterOutcome, ForecastFilter};
use crate::{Forecast, InstrumentRecord, TickerError};

/// Trims at most one low and one high outlier.
///
/// With the diffs sorted, the minimum is dropped when it lies more than
/// `threshold` percentage points below the next value, and the maximum when it
/// lies more than `threshold` above the previous one. Both checks use the
/// sorted values before any removal; the filter does not iterate to a fixed
/// point. Remaining forecasts are reordered by the removal.
#[derive(Debug, Clone, Copy)]
pub struct ExtremeValueFilter {
    threshold: Decimal,
}

impl ExtremeValueFilter {
    /// Filter with the given gap threshold in percentage points.
    #[must_use]
    pub const fn new(threshold: Decimal) -> Self {
        Self { threshold }
    }
}

impl ForecastFilter for ExtremeValueFilter {
    fn name(&self) -> &'static str {
        "extreme-values"
    }

    fn apply(&self, mut record: InstrumentRecord) -> Result<FilterOutcome, TickerError> {
        let mut diffs: Vec<Decimal> = record.forecasts.iter().map(|f| f.expected_diff).collect();
        diffs.sort_unstable();

        let n = diffs.len();
        if n < 2 {
            return Ok(FilterOutcome::Accept(record));
        }

        if self.exceeds(diffs[1], diffs[0]) {
            remove_forecast(&mut record.forecasts, diffs[0])?;
        }
        if self.exceeds(diffs[n - 1], diffs[n - 2]) {
            remove_forecast(&mut record.forecasts, diffs[n - 1])?;
        }

        Ok(FilterOutcome::Accept(record))
    }
}

impl ExtremeValueFilter {
    /// Gap `upper - lower` is above the threshold; a gap too wide to represent always is.
    fn exceeds(&self, upper: Decimal, lower: Decimal) -> bool {
        upper
            .checked_sub(lower)
            .is_none_or(|gap| gap > self.threshold)
    }
}

/// Remove the first forecast whose diff equals `value` by swapping in the last one.
fn remove_forecast(forecasts: &mut Vec<Forecast>, value: Decimal) -> Result<(), TickerError> {
    let idx = forecasts
        .iter()
        .position(|f| f.expected_diff == value)
        .ok_or_else(|| {
            TickerError::Invariant(format!("cannot find value {value} to remove forecast"))
        })?;
    forecasts.swap_remove(idx);
    Ok(())
}
