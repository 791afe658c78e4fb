//! Reference instant shared by the statistics and forecast engines.
//!
//! Every time-derived key (hour of day, weekday, day of year, calendar date)
//! is computed in the offset carried here, so a pinned instant makes both
//! engines fully reproducible.

use chrono::{DateTime, Duration, FixedOffset, Local, NaiveDate, Utc};

// ---

/// The "now" both engines anchor to, together with its local offset.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ReferenceInstant(DateTime<FixedOffset>);

impl ReferenceInstant {
    // ---
    /// Wall-clock time of the host, in the host's local offset.
    pub fn now() -> Self {
        Self(Local::now().fixed_offset())
    }

    /// Pin the reference to an explicit instant and offset.
    pub fn at(instant: DateTime<FixedOffset>) -> Self {
        Self(instant)
    }

    pub fn local(&self) -> DateTime<FixedOffset> {
        self.0
    }

    pub fn utc(&self) -> DateTime<Utc> {
        self.0.with_timezone(&Utc)
    }

    /// Convert a UTC timestamp into the reference's local offset.
    pub fn localize(&self, timestamp: &DateTime<Utc>) -> DateTime<FixedOffset> {
        timestamp.with_timezone(self.0.offset())
    }

    /// The local calendar date `days` days after the reference instant.
    pub fn date_after(&self, days: i64) -> NaiveDate {
        (self.0 + Duration::days(days)).date_naive()
    }
}
