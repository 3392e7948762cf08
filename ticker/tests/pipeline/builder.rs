use std::sync::Arc;

use ticker::{Ticker, TickerConfig, TickerError};
use ticker_mock::MockPageSource;

#[test]
fn build_requires_a_page_source() {
    let err = Ticker::builder().build().err().expect("missing source");
    assert!(matches!(err, TickerError::InvalidArg(_)), "{err:?}");
}

#[test]
fn build_rejects_an_invalid_selector() {
    let mut cfg = TickerConfig::default();
    cfg.parser.selectors.current_price = "div[".into();
    let (source, _ctl) = MockPageSource::new_with_controller("mock");
    let err = Ticker::builder()
        .with_source(source)
        .config(cfg)
        .build()
        .err()
        .expect("bad selector");
    assert!(matches!(err, TickerError::Config(_)), "{err:?}");
}

#[test]
fn config_is_kept_as_given() {
    let mut cfg = TickerConfig::default();
    cfg.parser.fetch_timeout_ms = Some(250);
    let (source, _ctl) = MockPageSource::new_with_controller("mock");
    let ticker = Ticker::builder()
        .with_source(Arc::clone(&source))
        .config(cfg.clone())
        .build()
        .expect("builds");
    assert_eq!(ticker.config(), &cfg);
}
