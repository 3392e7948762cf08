// Shared fixtures so tests can `use crate::helpers::*;`
#![allow(dead_code)]

use std::sync::Arc;

use chrono::{DateTime, Utc};
use ticker::{Ticker, TickerConfig};
use ticker_core::FixedClock;
use ticker_mock::{MockPageController, MockPageSource, PageFixture};

pub const SBER: &str = "https://quotes.test/stocks/SBER/";
pub const GAZP: &str = "https://quotes.test/stocks/GAZP/";
pub const LKOH: &str = "https://quotes.test/stocks/LKOH/";

/// Construct a UTC `DateTime` from components for readability in tests.
pub fn dt(y: i32, m: u32, d: u32, hh: u32, mm: u32) -> DateTime<Utc> {
    let date = chrono::NaiveDate::from_ymd_opt(y, m, d).expect("invalid date");
    let naive = date.and_hms_opt(hh, mm, 0).expect("invalid time components");
    DateTime::<Utc>::from_naive_utc_and_offset(naive, Utc)
}

/// The instant every test runs at.
pub fn now() -> DateTime<Utc> {
    dt(2020, 2, 10, 9, 0)
}

/// Dates inside the one-month window ending at [`now`], rendered without a year.
pub const FRESH: [&str; 7] = [
    "01 фев, 10:00",
    "02 фев, 10:00",
    "03 фев, 10:00",
    "04 фев, 10:00",
    "30 янв, 12:27",
    "20 ЯНВ, 08:15",
    "15 янв, 18:40",
];

/// A date well outside the window.
pub const STALE: &str = "04 фев 2019, 12:02";

/// Page quoted at 100 with one fresh forecast per target.
pub fn page(short: &str, targets: &[&str]) -> String {
    let mut fixture = PageFixture::new(&format!("{short} PJSC"), short, "100,00 ₽");
    for (target, date) in targets.iter().zip(FRESH.iter().cycle()) {
        fixture = fixture.forecast(target, date);
    }
    fixture.render()
}

/// Five fresh forecasts at +1..+5 %, consensus 3.
pub fn plain_page(short: &str) -> String {
    page(short, &["101,00 ₽", "102,00 ₽", "103,00 ₽", "104,00 ₽", "105,00 ₽"])
}

/// Seven fresh forecasts at -20, -3, -1, 0, 2, 3, 40 %.
pub fn outlier_page(short: &str) -> String {
    page(
        short,
        &[
            "80,00 ₽", "97,00 ₽", "99,00 ₽", "100,00 ₽", "102,00 ₽", "103,00 ₽", "140,00 ₽",
        ],
    )
}

/// Quoted at 1 with two targets so far above that the forecasts cannot be averaged.
pub fn overflow_page(short: &str) -> String {
    let targets = [
        "0,00 ₽",
        "700000000000000000000000000 ₽",
        "1,00 ₽",
        "1,00 ₽",
        "700000000000000000000000000 ₽",
    ];
    let mut fixture = PageFixture::new(&format!("{short} PJSC"), short, "1,00 ₽");
    for (target, date) in targets.iter().zip(FRESH.iter()) {
        fixture = fixture.forecast(target, date);
    }
    fixture.render()
}

/// Orchestrator over a fresh mock source, pinned to [`now`].
pub fn mock_ticker_with(cfg: TickerConfig) -> (Ticker, MockPageController) {
    let (source, ctl) = MockPageSource::new_with_controller("mock");
    let ticker = Ticker::builder()
        .with_source(source)
        .config(cfg)
        .clock(Arc::new(FixedClock(now())))
        .build()
        .expect("ticker builds");
    (ticker, ctl)
}

pub fn mock_ticker() -> (Ticker, MockPageController) {
    mock_ticker_with(TickerConfig::default())
}

pub fn urls(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| (*s).to_string()).collect()
}
