use std::fmt::{Debug, Formatter};

use chrono::{DateTime, TimeZone};
use chrono_tz::Tz;

/// Zone-local time interval.
#[derive(Copy, Clone, Eq, PartialEq)]
#[must_use]
pub struct Interval {
    /// Inclusive.
    pub start: DateTime<Tz>,

    /// Exclusive.
    pub end: DateTime<Tz>,
}

impl Debug for Interval {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}..{:?}", self.start, self.end)
    }
}

impl Interval {
    pub const fn new(start: DateTime<Tz>, end: DateTime<Tz>) -> Self {
        Self { start, end }
    }

    #[must_use]
    pub fn timezone(self) -> Tz {
        self.start.timezone()
    }

    #[must_use]
    pub fn contains<Z: TimeZone>(self, other: &DateTime<Z>) -> bool {
        (self.start <= *other) && (*other < self.end)
    }
}
