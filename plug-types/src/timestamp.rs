//! Ledger timestamps.
//!
//! The host runtime stamps every transaction with a UTC instant. Records
//! carry those instants in their `createTime`/`updateTime` style fields, and
//! a field that was never stamped holds the zero instant
//! `0001-01-01T00:00:00Z`. The merge engine relies on [`LedgerTime::is_zero`]
//! to tell "not provided" apart from a real time.

use crate::{Error, Result};
use chrono::{DateTime, SecondsFormat, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Seconds between the Unix epoch and `0001-01-01T00:00:00Z`.
const ZERO_UNIX_SECS: i64 = -62_135_596_800;

/// A transaction or record timestamp with second-to-nanosecond precision.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LedgerTime(DateTime<Utc>);

impl LedgerTime {
    /// The zero instant, `0001-01-01T00:00:00Z`.
    #[must_use]
    pub fn zero() -> Self {
        // ZERO_UNIX_SECS is well inside chrono's supported range.
        Self(DateTime::<Utc>::from_timestamp(ZERO_UNIX_SECS, 0).unwrap_or(DateTime::<Utc>::MIN_UTC))
    }

    /// The current wall-clock time.
    #[must_use]
    pub fn now() -> Self {
        Self(Utc::now())
    }

    /// Wraps an existing UTC instant.
    #[must_use]
    pub const fn from_datetime(dt: DateTime<Utc>) -> Self {
        Self(dt)
    }

    /// Builds a timestamp from Unix seconds and nanoseconds, the shape the
    /// host runtime uses for transaction timestamps.
    pub fn from_unix(secs: i64, nanos: u32) -> Result<Self> {
        DateTime::<Utc>::from_timestamp(secs, nanos)
            .map(Self)
            .ok_or_else(|| Error::InvalidTimestamp(format!("{secs}s {nanos}ns is out of range")))
    }

    /// Returns the underlying UTC instant.
    #[must_use]
    pub const fn as_datetime(&self) -> DateTime<Utc> {
        self.0
    }

    /// True if this is the zero instant.
    #[must_use]
    pub fn is_zero(&self) -> bool {
        self.0.timestamp() == ZERO_UNIX_SECS && self.0.timestamp_subsec_nanos() == 0
    }
}

impl Default for LedgerTime {
    fn default() -> Self {
        Self::zero()
    }
}

impl fmt::Display for LedgerTime {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0.to_rfc3339_opts(SecondsFormat::AutoSi, true))
    }
}

impl FromStr for LedgerTime {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self> {
        DateTime::parse_from_rfc3339(s)
            .map(|dt| Self(dt.with_timezone(&Utc)))
            .map_err(|e| Error::InvalidTimestamp(format!("{s}: {e}")))
    }
}
