//! ticker-core
//!
//! Building blocks of the forecast pipeline that do not touch the network.
//!
//! - `normalize`: locale-aware parsing of prices and forecast dates.
//! - `extract`: turns one instrument page into an `InstrumentRecord`.
//! - `filter`: the composable per-instrument filter chain.
//! - `consensus`: the mean forecast of a filtered record.
//! - `source`: the `PageSource` and `InstrumentSource` seams implemented by
//!   network and mock crates.
//! - `clock`: injectable "now" so runs are reproducible under test.
#![warn(missing_docs)]

/// Injectable wall clock.
pub mod clock;
/// Consensus computation over filtered forecasts.
pub mod consensus;
/// Page extraction into instrument records.
pub mod extract;
/// Forecast filter chain.
pub mod filter;
/// Price and date normalizers.
pub mod normalize;
/// Source traits for pages and instrument lists.
pub mod source;
pub mod types;

pub use clock::{Clock, FixedClock, SystemClock};
pub use consensus::{aggregate, consensus};
pub use extract::PageExtractor;
pub use filter::{
    AgeFilter, ExtremeValueFilter, FilterChain, FilterOutcome, ForecastFilter, Rejection,
};
pub use normalize::date::{parse_timestamp, replace_month};
pub use normalize::number::{PriceParseError, parse_price};
pub use source::{InstrumentSource, Page, PageSource, StaticUrls};
pub use types::*;
