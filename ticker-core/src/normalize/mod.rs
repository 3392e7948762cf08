/// Locale-aware forecast date parsing.
pub mod date;
/// Price text parsing.
pub mod number;
