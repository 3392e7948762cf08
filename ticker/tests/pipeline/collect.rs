use std::sync::Arc;

use async_trait::async_trait;
use ticker::{RunOptions, Ticker, TickerCollection, TickerConfig, TickerError};
use ticker_core::{Decimal, FixedClock, InstrumentSource};
use ticker_mock::{MockBehavior, MockPageSource};

use crate::helpers::*;

fn sorted(mut c: TickerCollection) -> TickerCollection {
    c.tickers.sort_by(|a, b| a.name.short.cmp(&b.name.short));
    c
}

#[tokio::test]
async fn any_failed_page_fails_the_whole_run() {
    let (ticker, ctl) = mock_ticker();
    ctl.serve(SBER, plain_page("SBER")).await;
    ctl.set_behavior(GAZP, MockBehavior::Fail(TickerError::status(GAZP, 503)))
        .await;

    let err = ticker
        .collect(&urls(&[SBER, GAZP]), RunOptions::default())
        .await
        .expect_err("one page failed");

    match err {
        TickerError::PagesFailed(errors) => {
            assert_eq!(errors, vec![TickerError::status(GAZP, 503)]);
        }
        other => panic!("unexpected {other:?}"),
    }
}

#[tokio::test]
async fn unrepresentable_consensus_is_an_invariant_error() {
    let (ticker, ctl) = mock_ticker();
    ctl.serve(SBER, overflow_page("SBER")).await;

    let err = ticker
        .collect(&urls(&[SBER]), RunOptions::default())
        .await
        .expect_err("mean does not fit");

    assert!(matches!(err, TickerError::Invariant(msg) if msg.contains("SBER PJSC")));
}

#[tokio::test]
async fn successful_run_sets_consensus() {
    let (ticker, ctl) = mock_ticker();
    ctl.serve(SBER, plain_page("SBER")).await;
    ctl.serve(GAZP, outlier_page("GAZP")).await;

    let out = sorted(
        ticker
            .collect(&urls(&[SBER, GAZP]), RunOptions::default())
            .await
            .expect("collection"),
    );

    let names: Vec<&str> = out.tickers.iter().map(|t| t.name.short.as_str()).collect();
    assert_eq!(names, ["GAZP", "SBER"]);
    assert_eq!(out.tickers[0].forecasts.len(), 5);
    assert_eq!(out.tickers[0].consensus, Some(Decimal::new(2, 1)));
    assert_eq!(out.tickers[1].consensus, Some(Decimal::from(3)));
    assert_eq!(out.tickers[1].name.full, "SBER PJSC");
    assert_eq!(out.tickers[1].current_price, Decimal::from(100));
}

#[tokio::test]
async fn rejected_instruments_are_dropped_silently() {
    let (ticker, ctl) = mock_ticker();
    ctl.serve(SBER, plain_page("SBER")).await;
    ctl.serve(GAZP, page("GAZP", &["101,00", "102,00", "103,00", "104,00"]))
        .await;

    let out = ticker
        .collect(&urls(&[SBER, GAZP]), RunOptions::default())
        .await
        .expect("rejection is not an error");
    assert_eq!(out.tickers.len(), 1);
    assert_eq!(out.tickers[0].name.short, "SBER");
}

#[tokio::test]
async fn identical_input_gives_identical_output() {
    let (ticker, ctl) = mock_ticker();
    ctl.serve(SBER, plain_page("SBER")).await;
    ctl.serve(GAZP, outlier_page("GAZP")).await;
    ctl.serve(LKOH, plain_page("LKOH")).await;
    let list = urls(&[SBER, GAZP, LKOH]);

    let first = sorted(ticker.collect(&list, RunOptions::default()).await.expect("first"));
    let second = sorted(ticker.collect(&list, RunOptions::default()).await.expect("second"));
    assert_eq!(first, second);
}

#[tokio::test]
async fn query_switch_disables_extreme_filter() {
    let (ticker, ctl) = mock_ticker();
    ctl.serve(GAZP, outlier_page("GAZP")).await;

    let out = ticker
        .collect(
            &urls(&[GAZP]),
            RunOptions {
                filter_extreme_enabled: false,
            },
        )
        .await
        .expect("collection");
    assert_eq!(out.tickers[0].forecasts.len(), 7);
    assert_eq!(out.tickers[0].consensus, Some(Decimal::from(3)));
}

#[tokio::test]
async fn config_switch_disables_extreme_filter() {
    let mut cfg = TickerConfig::default();
    cfg.filters.extreme_values.enabled = false;
    let (ticker, ctl) = mock_ticker_with(cfg);
    ctl.serve(GAZP, outlier_page("GAZP")).await;

    let out = ticker
        .collect(&urls(&[GAZP]), RunOptions::default())
        .await
        .expect("collection");
    assert_eq!(out.tickers[0].forecasts.len(), 7);
}

#[tokio::test]
async fn run_uses_configured_urls_by_default() {
    let mut cfg = TickerConfig::default();
    cfg.parser.urls = urls(&[SBER]);
    let (ticker, ctl) = mock_ticker_with(cfg);
    ctl.serve(SBER, plain_page("SBER")).await;

    let out = ticker.run(RunOptions::default()).await.expect("run");
    assert_eq!(out.tickers.len(), 1);
    assert_eq!(ctl.requests().await, urls(&[SBER]));
}

struct BrokenCatalog;

#[async_trait]
impl InstrumentSource for BrokenCatalog {
    async fn instrument_urls(&self) -> Result<Vec<String>, TickerError> {
        Err(TickerError::catalog("0", "cannot fetch catalog page", "connection refused"))
    }
}

#[tokio::test]
async fn run_propagates_instrument_source_errors() {
    let (source, ctl) = MockPageSource::new_with_controller("mock");
    let ticker = Ticker::builder()
        .with_source(source)
        .with_instruments(Arc::new(BrokenCatalog))
        .clock(Arc::new(FixedClock(now())))
        .build()
        .expect("builds");

    let err = ticker.run(RunOptions::default()).await.expect_err("catalog down");
    assert!(matches!(err, TickerError::Catalog { .. }), "{err:?}");
    assert!(ctl.requests().await.is_empty());
}
