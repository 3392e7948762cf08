use rust_decimal::Decimal;

use crate::{Forecast, InstrumentRecord, TickerError};

/// Arithmetic mean of `expected_diff`; `None` for an empty slice or when the
/// sum does not fit in a `Decimal`.
#[must_use]
pub fn consensus(forecasts: &[Forecast]) -> Option<Decimal> {
    if forecasts.is_empty() {
        return None;
    }
    let sum = forecasts
        .iter()
        .try_fold(Decimal::ZERO, |acc, f| acc.checked_add(f.expected_diff))?;
    sum.checked_div(Decimal::from(forecasts.len()))
}

/// Finalize a filtered record by writing its consensus.
///
/// # Errors
/// Returns `Invariant` if the record has forecasts but their mean cannot be
/// represented.
pub fn aggregate(mut record: InstrumentRecord) -> Result<InstrumentRecord, TickerError> {
    record.consensus = consensus(&record.forecasts);
    if record.consensus.is_none() && !record.forecasts.is_empty() {
        return Err(TickerError::Invariant(format!(
            "consensus of {} forecasts for {} overflows",
            record.forecasts.len(),
            record.name.full
        )));
    }

    #[cfg(feature = "tracing")]
    tracing::info!(
        target: "ticker::consensus",
        name = %record.name.full,
        forecasts = record.forecasts.len(),
        consensus = ?record.consensus,
        "consensus computed",
    );

    Ok(record)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::{TimeZone, Utc};

    fn forecasts(diffs: &[i64]) -> Vec<Forecast> {
        diffs
            .iter()
            .map(|d| Forecast {
                expected_diff: Decimal::from(*d),
                timestamp: Utc.with_ymd_and_hms(2020, 1, 1, 0, 0, 0).unwrap(),
            })
            .collect()
    }

    #[test]
    fn mean_of_one_to_five_is_three() {
        assert_eq!(consensus(&forecasts(&[1, 2, 3, 4, 5])), Some(Decimal::new(30, 1)));
    }

    #[test]
    fn mean_keeps_fractions() {
        assert_eq!(consensus(&forecasts(&[1, 2])), Some(Decimal::new(15, 1)));
    }

    #[test]
    fn empty_has_no_consensus() {
        assert_eq!(consensus(&[]), None);
    }

    #[test]
    fn overflowing_sum_is_an_invariant_error() {
        let huge = Decimal::from_str_exact("69999999999999999999999999900").unwrap();
        let mut fs = forecasts(&[0, 0, 0]);
        fs[0].expected_diff = huge;
        fs[1].expected_diff = huge;
        assert_eq!(consensus(&fs), None);

        let record = InstrumentRecord {
            name: crate::InstrumentName {
                full: "Huge".into(),
                short: "HUGE".into(),
            },
            current_price: Decimal::ONE,
            forecasts: fs,
            consensus: None,
        };
        assert!(matches!(aggregate(record), Err(TickerError::Invariant(msg)) if msg.contains("Huge")));
    }
}
