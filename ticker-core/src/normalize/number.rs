use core::str::FromStr;

use rust_decimal::Decimal;
use thiserror::Error;

/// Raised when price text does not reduce to a decimal number.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot parse price from {raw:?} (cleaned: {cleaned:?})")]
pub struct PriceParseError {
    /// Text as found in the document.
    pub raw: String,
    /// Text after stripping everything but digits and the decimal comma.
    pub cleaned: String,
}

/// Parse a price rendered with a decimal comma, e.g. `"1 234,56 $"` -> `1234.56`.
///
/// Every character that is neither an ASCII digit nor a comma is dropped (currency
/// signs, thousands separators, signs, non-breaking spaces), then the comma
/// becomes the decimal point.
///
/// # Errors
/// Fails when nothing numeric is left or more than one comma survives.
pub fn parse_price(raw: &str) -> Result<Decimal, PriceParseError> {
    let cleaned: String = raw
        .chars()
        .filter(|c| c.is_ascii_digit() || *c == ',')
        .map(|c| if c == ',' { '.' } else { c })
        .collect();

    let fail = || PriceParseError {
        raw: raw.to_string(),
        cleaned: cleaned.clone(),
    };
    if !cleaned.bytes().any(|b| b.is_ascii_digit()) || cleaned.matches('.').count() > 1 {
        return Err(fail());
    }
    Decimal::from_str(&cleaned).map_err(|_| fail())
}
