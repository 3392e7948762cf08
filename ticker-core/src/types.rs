//! Re-export of the shared data model from `ticker-types`.
// Consolidated re-exports so downstream crates can depend on `ticker-core` only

pub use ticker_types::{
    AgeFilterConfig, CatalogConfig, CatalogCompany, CatalogItem, Decimal, ExtractError,
    ExtremeValuesConfig, FiltersConfig, Forecast, GatherReport, InstrumentName, InstrumentRecord,
    ParserConfig, RunOptions, SelectorConfig, ServerConfig, TickerCollection, TickerConfig,
    TickerError,
};
