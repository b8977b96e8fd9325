//! Monotonic write timestamps.
//!
//! Every committed write is stamped while the connection lock is held, so
//! stamp order is commit order. Two writes never share a stamp, even when the
//! wall clock stalls or steps backwards.

use chrono::{DateTime, SubsecRound, TimeDelta, Utc};

/// Stamps are stored with microsecond precision.
const STAMP_PRECISION_DIGITS: u16 = 6;

#[derive(Debug, Default)]
pub struct Stamper {
    last: Option<DateTime<Utc>>,
}

impl Stamper {
    /// Start after `last`, typically the newest `updated_at` already on disk.
    pub fn new(last: Option<DateTime<Utc>>) -> Self {
        Self { last }
    }

    /// Next stamp: `now` truncated to microseconds, bumped past the previous
    /// stamp if it would not be strictly greater.
    pub fn next(&mut self, now: DateTime<Utc>) -> DateTime<Utc> {
        let now = now.trunc_subsecs(STAMP_PRECISION_DIGITS);
        let stamp = match self.last {
            Some(last) if now <= last => last + TimeDelta::microseconds(1),
            _ => now,
        };
        self.last = Some(stamp);
        stamp
    }

    pub fn last(&self) -> Option<DateTime<Utc>> {
        self.last
    }
}
