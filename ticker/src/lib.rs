//! Ticker collects analyst price-target forecasts from instrument pages and
//! computes a consensus per instrument.
//!
//! Overview
//! - Fans out one fetch+extract worker per instrument URL through a
//!   [`ticker_core::PageSource`] and fans the records and errors back in.
//! - Runs the surviving records through the configured filter chain (age
//!   window, then extreme-value trimming) and writes the consensus.
//! - Applies an all-or-nothing policy at the boundary: if any page failed,
//!   [`Ticker::collect`] returns `PagesFailed` with every per-page error.
//!
//! Key behaviors
//! - One clock reading per run drives both year inference for dates without a
//!   year and the age filter cut-off.
//! - `parser.fetchTimeoutMs` bounds each fetch; a timed-out page is reported as
//!   `FetchTimeout` and its in-flight request is cancelled.
//! - Records and errors arrive in completion order; callers should compare
//!   collections as sets.
//!
//! Example
//! ```rust,ignore
//! use std::sync::Arc;
//! use ticker::{RunOptions, Ticker};
//! use ticker_http::HttpPageFetcher;
//!
//! let ticker = Ticker::builder()
//!     .with_source(Arc::new(HttpPageFetcher::new_default()?))
//!     .config(cfg)
//!     .build()?;
//! let collection = ticker.run(RunOptions::default()).await?;
//! for t in &collection.tickers {
//!     println!("{} {:?}", t.name.short, t.consensus);
//! }
//! ```
#![warn(missing_docs)]

pub(crate) mod core;
mod pipeline;

pub use core::{Ticker, TickerBuilder};

// Re-export the data model for convenience
pub use ticker_types::{
    Forecast, GatherReport, InstrumentName, InstrumentRecord, RunOptions, TickerCollection,
    TickerConfig, TickerError,
};
