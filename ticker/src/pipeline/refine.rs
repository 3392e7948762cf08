use chrono::{DateTime, Utc};

use ticker_core::{FilterChain, InstrumentRecord, aggregate};
use ticker_types::{RunOptions, TickerError};

use crate::Ticker;

impl Ticker {
    /// Run the filter chain over `records` and write the consensus of every
    /// survivor.
    ///
    /// Rejected instruments are dropped silently. The extreme-value filter
    /// runs only when both the configuration and `opts` enable it.
    ///
    /// # Errors
    /// Returns `Invariant` if a filter finds its own bookkeeping inconsistent
    /// or a consensus cannot be represented.
    pub fn refine(
        &self,
        records: Vec<InstrumentRecord>,
        opts: RunOptions,
    ) -> Result<Vec<InstrumentRecord>, TickerError> {
        self.refine_at(records, opts, self.clock.now())
    }

    pub(crate) fn refine_at(
        &self,
        records: Vec<InstrumentRecord>,
        opts: RunOptions,
        now: DateTime<Utc>,
    ) -> Result<Vec<InstrumentRecord>, TickerError> {
        let chain = FilterChain::from_config(&self.cfg.filters, now, opts.filter_extreme_enabled);
        chain.run(records)?.into_iter().map(aggregate).collect()
    }
}
