//! Market documents returned by the transparency platform.

use std::{
    collections::BTreeMap,
    fmt::{Display, Formatter},
    iter,
};

use chrono::{DateTime, NaiveDateTime, TimeDelta, Utc};
use itertools::Itertools;
use serde::{
    Deserialize,
    Deserializer,
    de::{self, Unexpected},
};

/// Either a publication or an acknowledgement document, the root element is not checked.
#[derive(Deserialize)]
pub struct MarketDocument {
    #[serde(rename = "TimeSeries", default)]
    time_series: Vec<TimeSeries>,

    /// Only acknowledgements carry the top-level reasons.
    #[serde(rename = "Reason", default)]
    reasons: Vec<Reason>,
}

impl MarketDocument {
    /// Reason of the rejected request.
    #[must_use]
    pub fn rejection(&self) -> Option<&Reason> {
        if self.time_series.is_empty() { self.reasons.first() } else { None }
    }

    /// Flatten the periods into the chronological prices.
    ///
    /// Hourly periods are preferred, otherwise the finest resolution is used.
    /// Duplicate timestamps of overlapping periods are dropped.
    #[must_use]
    pub fn into_prices(self) -> Vec<(DateTime<Utc>, f64)> {
        let periods = self
            .time_series
            .into_iter()
            .flat_map(|series| {
                let forward_fill =
                    series.curve_type.as_deref() == Some(CURVE_TYPE_SEQUENTIAL_FIXED);
                series.periods.into_iter().map(move |period| (period, forward_fill))
            })
            .collect_vec();
        let resolutions = periods.iter().map(|(period, _)| period.resolution);
        let Some(resolution) = preferred_resolution(resolutions) else {
            return Vec::new();
        };
        periods
            .into_iter()
            .filter(|(period, _)| period.resolution == resolution)
            .flat_map(|(period, forward_fill)| period.into_prices(forward_fill))
            .sorted_by_key(|(timestamp, _)| *timestamp)
            .dedup_by(|(lhs, _), (rhs, _)| lhs == rhs)
            .collect()
    }
}

#[derive(Deserialize)]
pub struct Reason {
    code: String,

    #[serde(default)]
    text: String,
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        write!(f, "{} (code {})", self.text, self.code)
    }
}

/// Points are omitted when the price does not change.
const CURVE_TYPE_SEQUENTIAL_FIXED: &str = "A03";

#[derive(Deserialize)]
struct TimeSeries {
    #[serde(rename = "curveType")]
    curve_type: Option<String>,

    #[serde(rename = "Period", default)]
    periods: Vec<Period>,
}

#[derive(Deserialize)]
struct Period {
    #[serde(rename = "timeInterval")]
    time_interval: TimeInterval,

    #[serde(deserialize_with = "deserialize_resolution")]
    resolution: TimeDelta,

    #[serde(rename = "Point", default)]
    points: Vec<Point>,
}

impl Period {
    fn into_prices(self, forward_fill: bool) -> Vec<(DateTime<Utc>, f64)> {
        let prices: BTreeMap<u32, f64> =
            self.points.into_iter().map(|point| (point.position, point.price)).collect();
        let end = self.time_interval.end;
        let slots = iter::successors(Some(self.time_interval.start), |start| {
            start.checked_add_signed(self.resolution)
        })
        .take_while(|start| *start < end);

        let mut last_price = None;
        let mut output = Vec::new();
        for (position, timestamp) in (1_u32..).zip(slots) {
            let fallback = if forward_fill { last_price } else { None };
            let price = prices.get(&position).copied().or(fallback);
            if let Some(price) = price {
                output.push((timestamp, price));
                last_price = Some(price);
            }
        }
        output
    }
}

#[derive(Deserialize)]
struct TimeInterval {
    #[serde(deserialize_with = "deserialize_timestamp")]
    start: DateTime<Utc>,

    #[serde(deserialize_with = "deserialize_timestamp")]
    end: DateTime<Utc>,
}

#[derive(Deserialize)]
struct Point {
    position: u32,

    #[serde(rename = "price.amount")]
    price: f64,
}

fn preferred_resolution(resolutions: impl IntoIterator<Item = TimeDelta>) -> Option<TimeDelta> {
    let hourly = TimeDelta::hours(1);
    let mut finest = None;
    for resolution in resolutions {
        if resolution == hourly {
            return Some(hourly);
        }
        finest = Some(finest.map_or(resolution, |finest: TimeDelta| finest.min(resolution)));
    }
    finest
}

/// Parse the ISO 8601 duration, only the forms used for the resolutions are supported.
fn parse_resolution(text: &str) -> Option<TimeDelta> {
    let text = text.trim();
    let (is_time, rest) = match text.strip_prefix("PT") {
        Some(rest) => (true, rest),
        None => (false, text.strip_prefix('P')?),
    };
    let unit = rest.chars().last()?;
    let amount: i64 = rest[..rest.len() - unit.len_utf8()].parse().ok()?;
    let resolution = match (is_time, unit) {
        (true, 'M') => TimeDelta::try_minutes(amount)?,
        (true, 'H') => TimeDelta::try_hours(amount)?,
        (false, 'D') => TimeDelta::try_days(amount)?,
        _ => return None,
    };
    (resolution > TimeDelta::zero()).then_some(resolution)
}

fn deserialize_resolution<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<TimeDelta, D::Error> {
    let text = String::deserialize(deserializer)?;
    parse_resolution(&text).ok_or_else(|| {
        de::Error::invalid_value(Unexpected::Str(&text), &"a resolution like `PT60M`")
    })
}

/// Timestamps are UTC without seconds, for example `2024-01-01T23:00Z`.
fn deserialize_timestamp<'de, D: Deserializer<'de>>(
    deserializer: D,
) -> Result<DateTime<Utc>, D::Error> {
    let text = String::deserialize(deserializer)?;
    NaiveDateTime::parse_from_str(text.trim(), "%Y-%m-%dT%H:%MZ")
        .map(|timestamp| timestamp.and_utc())
        .map_err(|_| {
            let expected = &"a timestamp like `2024-01-01T23:00Z`";
            de::Error::invalid_value(Unexpected::Str(&text), expected)
        })
}
