//! Upload lifecycle with stale-completion protection.
//!
//! A table load is asynchronous from the caller's point of view: content is
//! requested, then arrives some time later. If a second load starts before
//! the first completes, only the most recent one may install its table, so
//! [`AnalyticsSession`] hands out monotonically increasing load tokens and
//! ignores completions carrying anything older.

use tracing::debug;

use crate::error::Result;
use crate::table::Table;

/// Identifies one load attempt. Only the most recently issued token may
/// complete.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct LoadToken(u64);

/// Holds the current table and serializes competing loads.
///
/// Single-threaded by design: one session per consumer, no locking. The
/// table is replaced wholesale on every successful load; a failed parse
/// leaves the previous table in place so the caller can simply retry.
#[derive(Debug, Default)]
pub struct AnalyticsSession {
    table: Option<Table>,
    latest_token: u64,
}

impl AnalyticsSession {
    /// Creates an empty session.
    pub fn new() -> Self {
        Self::default()
    }

    /// Starts a new load attempt, invalidating all previously issued tokens.
    pub fn begin_load(&mut self) -> LoadToken {
        self.latest_token += 1;
        debug!(token = self.latest_token, "load started");
        LoadToken(self.latest_token)
    }

    /// Completes a load attempt with the raw content that arrived.
    ///
    /// Returns `Ok(true)` when the table was parsed and installed, and
    /// `Ok(false)` when the token is stale (a newer load has started) and the
    /// completion was ignored.
    ///
    /// # Errors
    ///
    /// Propagates parse errors from [`Table::parse`]; the current table is
    /// left untouched.
    pub fn complete_load(&mut self, token: LoadToken, text: &str) -> Result<bool> {
        if token.0 != self.latest_token {
            debug!(
                token = token.0,
                latest = self.latest_token,
                "ignoring stale load completion"
            );
            return Ok(false);
        }
        let table = Table::parse(text)?;
        self.table = Some(table);
        Ok(true)
    }

    /// Returns the currently installed table, if any.
    pub fn table(&self) -> Option<&Table> {
        self.table.as_ref()
    }

    /// Discards the current table.
    pub fn clear(&mut self) {
        self.table = None;
    }
}
