use chrono::NaiveDate;
use chrono_tz::Tz;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum PricingServiceError {
    #[error("zone `{0}` not found in configuration")]
    UnknownZone(String),

    #[error("invalid date `{0}`, expected `YYYY-MM-DD`")]
    InvalidDate(String),

    #[error("start date {start} is after end date {end}")]
    InvertedRange { start: NaiveDate, end: NaiveDate },

    #[error("midnight of {date} does not exist in {timezone}")]
    NonexistentLocalTime { date: NaiveDate, timezone: Tz },

    #[error("error fetching data for zone `{zone}`")]
    Fetch {
        zone: String,

        #[source]
        source: anyhow::Error,
    },
}
