use std::sync::Arc;
use std::time::Duration;

use async_trait::async_trait;
use ticker::{Ticker, TickerConfig, TickerError};
use ticker_core::{ExtractError, Page, PageSource};
use ticker_mock::{MockBehavior, PageFixture};

use crate::helpers::*;

#[tokio::test]
async fn failing_page_does_not_block_its_sibling() {
    let (ticker, ctl) = mock_ticker();
    ctl.serve(SBER, plain_page("SBER")).await;
    ctl.set_behavior(GAZP, MockBehavior::Fail(TickerError::fetch(GAZP, "connection reset")))
        .await;

    let report = ticker.gather(&urls(&[SBER, GAZP])).await;

    assert!(!report.is_complete());
    assert_eq!(report.records.len(), 1);
    assert_eq!(report.records[0].name.short, "SBER");
    assert_eq!(report.errors.len(), 1);
    assert_eq!(report.errors[0].url(), Some(GAZP));
}

#[tokio::test]
async fn extraction_errors_are_attributed_per_page() {
    let (ticker, ctl) = mock_ticker();
    ctl.serve(SBER, plain_page("SBER")).await;
    let broken = PageFixture::new("Gazprom", "GAZP", "n/a")
        .forecast("150,00 ₽", FRESH[0])
        .render();
    ctl.serve(GAZP, broken).await;

    let report = ticker.gather(&urls(&[SBER, GAZP])).await;

    assert_eq!(report.records.len(), 1);
    match &report.errors[..] {
        [TickerError::Extract { url, reason }] => {
            assert_eq!(url, GAZP);
            assert!(matches!(reason, ExtractError::Price { .. }), "{reason:?}");
        }
        other => panic!("unexpected errors {other:?}"),
    }
}

#[tokio::test]
async fn gather_applies_no_filters() {
    let (ticker, ctl) = mock_ticker();
    // four forecasts would be rejected by the age filter
    ctl.serve(SBER, page("SBER", &["101,00", "102,00", "103,00", "104,00"]))
        .await;

    let report = ticker.gather(&urls(&[SBER])).await;
    assert!(report.is_complete());
    assert_eq!(report.records[0].forecasts.len(), 4);
    assert_eq!(report.records[0].consensus, None);
}

#[tokio::test]
async fn empty_url_list_yields_empty_report() {
    let (ticker, _ctl) = mock_ticker();
    let report = ticker.gather(&[]).await;
    assert!(report.records.is_empty());
    assert!(report.errors.is_empty());
}

#[tokio::test(start_paused = true)]
async fn workers_run_concurrently() {
    let (ticker, ctl) = mock_ticker();
    let list: Vec<String> = (0..40)
        .map(|i| format!("https://quotes.test/stocks/T{i}/"))
        .collect();
    for (i, url) in list.iter().enumerate() {
        ctl.set_behavior(
            url.clone(),
            MockBehavior::Delay(Duration::from_secs(1), plain_page(&format!("T{i}"))),
        )
        .await;
    }

    let started = tokio::time::Instant::now();
    let report = ticker.gather(&list).await;
    let elapsed = started.elapsed();

    assert_eq!(report.records.len(), 40);
    assert!(report.errors.is_empty());
    assert!(elapsed < Duration::from_secs(2), "took {elapsed:?}");

    let mut seen: Vec<String> = report.records.into_iter().map(|r| r.name.short).collect();
    seen.sort();
    seen.dedup();
    assert_eq!(seen.len(), 40);
}

#[tokio::test(start_paused = true)]
async fn stalled_page_times_out_when_deadline_is_set() {
    let mut cfg = TickerConfig::default();
    cfg.parser.fetch_timeout_ms = Some(500);
    let (ticker, ctl) = mock_ticker_with(cfg);
    ctl.serve(SBER, plain_page("SBER")).await;
    ctl.set_behavior(GAZP, MockBehavior::Hang).await;

    let report = ticker.gather(&urls(&[SBER, GAZP])).await;

    assert_eq!(report.records.len(), 1);
    assert_eq!(
        report.errors,
        vec![TickerError::FetchTimeout { url: GAZP.into() }]
    );
}

struct PanickingSource;

#[async_trait]
impl PageSource for PanickingSource {
    fn name(&self) -> &'static str {
        "panicking"
    }

    async fn fetch(&self, url: &str) -> Result<Page, TickerError> {
        if url == LKOH {
            panic!("worker blew up");
        }
        Ok(Page::new(url, plain_page("SBER")))
    }
}

#[tokio::test]
async fn panicked_worker_becomes_an_error() {
    let ticker = Ticker::builder()
        .with_source(Arc::new(PanickingSource))
        .clock(Arc::new(ticker_core::FixedClock(now())))
        .build()
        .expect("builds");

    let report = ticker.gather(&urls(&[SBER, LKOH])).await;

    assert_eq!(report.records.len(), 1);
    assert!(
        matches!(&report.errors[..], [TickerError::Other(msg)] if msg.contains("page worker failed")),
        "{:?}",
        report.errors
    );
}
