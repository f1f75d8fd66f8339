use chrono::{DateTime, Datelike, FixedOffset, NaiveDate, Timelike, Weekday};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};

/// Single price point of a zone.
#[must_use]
#[derive(Clone, Debug, PartialEq, Serialize, Deserialize)]
pub struct PriceRecord {
    /// Zone-local start of the settlement period.
    pub timestamp: DateTime<FixedOffset>,

    #[serde(rename = "price_eur_mwh")]
    pub price: f64,

    pub zone: String,

    pub zone_name: String,

    #[serde(flatten)]
    pub time: Option<TimeColumns>,
}

/// Calendar fields derived from the zone-local timestamp.
#[must_use]
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize)]
pub struct TimeColumns {
    pub date: NaiveDate,

    /// Hour of the day, `0..=23`.
    pub hour: u32,

    /// Full English day name, for example `Monday`.
    pub day_of_week: String,

    /// Day of the week, Monday is `0`.
    pub weekday: u32,
}

impl TimeColumns {
    pub fn from_timestamp(timestamp: &DateTime<Tz>) -> Self {
        let weekday = timestamp.weekday();
        Self {
            date: timestamp.date_naive(),
            hour: timestamp.hour(),
            day_of_week: day_name(weekday).to_owned(),
            weekday: weekday.num_days_from_monday(),
        }
    }
}

const fn day_name(weekday: Weekday) -> &'static str {
    match weekday {
        Weekday::Mon => "Monday",
        Weekday::Tue => "Tuesday",
        Weekday::Wed => "Wednesday",
        Weekday::Thu => "Thursday",
        Weekday::Fri => "Friday",
        Weekday::Sat => "Saturday",
        Weekday::Sun => "Sunday",
    }
}
