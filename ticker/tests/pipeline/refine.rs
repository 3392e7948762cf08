use proptest::prelude::*;
use ticker::{Forecast, InstrumentName, InstrumentRecord, RunOptions};
use ticker_core::Decimal;

use crate::helpers::*;

fn record(diffs: &[i64]) -> InstrumentRecord {
    InstrumentRecord {
        name: InstrumentName {
            full: "Acme".into(),
            short: "ACME".into(),
        },
        current_price: Decimal::from(100),
        forecasts: diffs
            .iter()
            .enumerate()
            .map(|(i, d)| Forecast {
                expected_diff: Decimal::from(*d),
                timestamp: dt(2020, 2, 1, 10, u32::try_from(i).unwrap_or(0)),
            })
            .collect(),
        consensus: None,
    }
}

#[test]
fn stale_forecasts_are_dropped_before_counting() {
    let (ticker, _ctl) = mock_ticker();
    let mut rec = record(&[1, 2, 3, 4, 5]);
    rec.forecasts[0].timestamp = dt(2019, 12, 31, 10, 0);

    let out = ticker
        .refine(vec![rec], RunOptions::default())
        .expect("refine");
    assert!(out.is_empty());
}

#[test]
fn refine_trims_outliers_and_aggregates() {
    let (ticker, _ctl) = mock_ticker();
    let out = ticker
        .refine(vec![record(&[-20, -3, -1, 0, 2, 3, 40])], RunOptions::default())
        .expect("refine");
    assert_eq!(out.len(), 1);
    let mut diffs: Vec<Decimal> = out[0].forecasts.iter().map(|f| f.expected_diff).collect();
    diffs.sort();
    assert_eq!(diffs, [-3, -1, 0, 2, 3].map(Decimal::from));
    assert_eq!(out[0].consensus, Some(Decimal::new(2, 1)));
}

proptest! {
    #[test]
    fn survivors_always_carry_a_consensus(diffs in prop::collection::vec(-50i64..50, 0..12)) {
        let (ticker, _ctl) = mock_ticker();
        let out = ticker.refine(vec![record(&diffs)], RunOptions::default()).expect("refine");
        prop_assert!(out.len() <= 1);
        if let Some(r) = out.first() {
            prop_assert!(r.forecasts.len() >= 3);
            prop_assert!(r.consensus.is_some());
        } else {
            prop_assert!(diffs.len() < 5);
        }
    }
}
