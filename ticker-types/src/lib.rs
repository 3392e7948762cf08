//! Data transfer objects, configuration primitives and the unified error type
//! shared by every crate of the ticker consensus service.
#![warn(missing_docs)]

mod catalog;
mod config;
mod error;
mod record;
mod reports;

pub use catalog::{CatalogCompany, CatalogItem};
pub use config::{
    AgeFilterConfig, CatalogConfig, ExtremeValuesConfig, FiltersConfig, ParserConfig,
    SelectorConfig, ServerConfig, TickerConfig,
};
pub use error::{ExtractError, TickerError};
pub use record::{Forecast, InstrumentName, InstrumentRecord, TickerCollection};
pub use reports::{GatherReport, RunOptions};

pub use rust_decimal::Decimal;
