use chrono::{DateTime, FixedOffset, TimeZone};

use crate::core::{DateRange, PriceRecord, Statistics};

/// Normalized prices of one zone over one resolved date range.
#[must_use]
#[derive(Clone, Debug)]
pub struct PriceTable {
    pub zone: String,
    pub zone_name: String,
    pub range: DateRange,

    /// Chronological, as returned by the provider.
    pub records: Vec<PriceRecord>,
}

impl PriceTable {
    #[must_use]
    pub const fn len(&self) -> usize {
        self.records.len()
    }

    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Earliest and latest timestamps.
    #[must_use]
    pub fn time_span(&self) -> Option<(DateTime<FixedOffset>, DateTime<FixedOffset>)> {
        let start = self.records.iter().map(|record| record.timestamp).min()?;
        let end = self.records.iter().map(|record| record.timestamp).max()?;
        Some((start, end))
    }

    /// Record in effect at the moment, that is the latest one which has already started.
    #[must_use]
    pub fn latest_at<Tz: TimeZone>(&self, now: &DateTime<Tz>) -> Option<&PriceRecord> {
        self.records
            .iter()
            .filter(|record| record.timestamp <= *now)
            .max_by_key(|record| record.timestamp)
    }

    /// Price statistics, or [`None`] for an empty table.
    pub fn statistics(&self) -> Option<Statistics> {
        Statistics::from_prices(self.records.iter().map(|record| record.price))
    }
}
