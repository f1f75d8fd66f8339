use async_trait::async_trait;
use chrono::DateTime;
use chrono_tz::Tz;

use crate::{core::Interval, prelude::*};

/// Source of day-ahead prices, in euro per megawatt-hour.
#[async_trait]
pub trait DayAheadPrices: Send + Sync {
    /// Get the prices of the provider area, chronologically ordered.
    ///
    /// Timestamps are converted into the interval's timezone.
    async fn get_prices(
        &self,
        area_code: &str,
        interval: Interval,
    ) -> Result<Vec<(DateTime<Tz>, f64)>>;
}
