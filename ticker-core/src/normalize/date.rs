use core::ops::Range;

use chrono::format::{self, Parsed, StrftimeItems};
use chrono::{DateTime, NaiveDateTime, Utc};
use thiserror::Error;

/// Layout of dates from the current year, which the source renders without a year.
const THIS_YEAR_LAYOUT: &str = "%d %b, %H:%M";
/// Layout of older dates, rendered with an explicit year.
const OTHER_YEAR_LAYOUT: &str = "%d %b %Y, %H:%M";

/// Localized month abbreviations (lower case) and their canonical English codes.
const LOCAL_MONTHS: [(&str, &str); 12] = [
    ("янв", "Jan"),
    ("фев", "Feb"),
    ("мар", "Mar"),
    ("апр", "Apr"),
    ("май", "May"),
    ("июн", "Jun"),
    ("июл", "Jul"),
    ("авг", "Aug"),
    ("сен", "Sep"),
    ("окт", "Oct"),
    ("ноя", "Nov"),
    ("дек", "Dec"),
];

/// Raised when a forecast date matches neither known layout.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("cannot parse date {raw:?} (normalized: {normalized:?})")]
pub struct DateParseError {
    /// Text as found in the document.
    pub raw: String,
    /// Text after month substitution.
    pub normalized: String,
}

/// Replace the first localized month abbreviation with its English code.
///
/// Matching is case-insensitive and the table is scanned in calendar order;
/// everything around the match is preserved byte for byte. Strings without a
/// known abbreviation are returned unchanged.
#[must_use]
pub fn replace_month(date: &str) -> String {
    for (local, english) in LOCAL_MONTHS {
        if let Some(span) = find_ignoring_case(date, local) {
            return format!("{}{}{}", &date[..span.start], english, &date[span.end..]);
        }
    }
    date.to_string()
}

/// Parse a forecast date such as `"30 янв, 12:27"` or `"04 фев 2019, 12:02"`.
///
/// Dates without a year belong to `current_year`. Times carry no zone on the
/// page and are taken as UTC.
///
/// # Errors
/// Returns `DateParseError` if the text matches neither layout, including
/// dates that do not exist in the inferred year (29 Feb of a common year).
pub fn parse_timestamp(raw: &str, current_year: i32) -> Result<DateTime<Utc>, DateParseError> {
    let normalized = replace_month(raw.trim());
    parse_this_year(&normalized, current_year)
        .or_else(|| parse_other_year(&normalized))
        .ok_or_else(|| DateParseError {
            raw: raw.to_string(),
            normalized,
        })
}

fn parse_this_year(s: &str, year: i32) -> Option<DateTime<Utc>> {
    let mut parsed = Parsed::new();
    format::parse(&mut parsed, s, StrftimeItems::new(THIS_YEAR_LAYOUT)).ok()?;
    parsed.set_year(i64::from(year)).ok()?;
    parsed
        .to_naive_datetime_with_offset(0)
        .ok()
        .map(|naive| naive.and_utc())
}

fn parse_other_year(s: &str) -> Option<DateTime<Utc>> {
    NaiveDateTime::parse_from_str(s, OTHER_YEAR_LAYOUT)
        .ok()
        .map(|naive| naive.and_utc())
}

/// Byte range of the first case-insensitive occurrence of a lower-case `needle`.
fn find_ignoring_case(haystack: &str, needle: &str) -> Option<Range<usize>> {
    haystack.char_indices().find_map(|(start, _)| {
        let mut rest = haystack[start..].char_indices();
        for expected in needle.chars() {
            let (_, c) = rest.next()?;
            if !c.to_lowercase().eq(core::iter::once(expected)) {
                return None;
            }
        }
        let end = rest.next().map_or(haystack.len(), |(i, _)| start + i);
        Some(start..end)
    })
}
