use serde::{Deserialize, Serialize};

use crate::{InstrumentRecord, TickerError};

/// Fan-in result of one concurrent fetch/extract pass.
///
/// Both sets are unordered: records and errors arrive in completion order.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatherReport {
    /// Records of the pages that were fetched and extracted successfully.
    pub records: Vec<InstrumentRecord>,
    /// One error per page that failed.
    pub errors: Vec<TickerError>,
}

impl GatherReport {
    /// True when no page failed.
    #[must_use]
    pub fn is_complete(&self) -> bool {
        self.errors.is_empty()
    }
}

/// Per-run switches supplied by the caller.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RunOptions {
    /// Run the extreme-value filter, when the configuration enables it too.
    pub filter_extreme_enabled: bool,
}

impl Default for RunOptions {
    fn default() -> Self {
        Self {
            filter_extreme_enabled: true,
        }
    }
}
