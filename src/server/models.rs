use std::collections::BTreeMap;

use chrono::{DateTime, FixedOffset, Local, NaiveDate};
use itertools::Itertools;
use serde::{Deserialize, Serialize};

use crate::{
    config::ZoneConfig,
    core::{PriceQuery, PriceRecord, PriceTable, Statistics, parse_date},
    server::error::ApiError,
};

pub const MAX_DAYS_BACK: u32 = 365;

/// Query parameters, both camel and snake case are accepted.
#[derive(Default, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PriceParams {
    /// Comma-separated zone identifiers.
    pub zones: Option<String>,

    #[serde(alias = "days_back")]
    pub days_back: Option<u32>,

    #[serde(alias = "start_date")]
    pub start_date: Option<String>,

    #[serde(alias = "end_date")]
    pub end_date: Option<String>,

    #[serde(alias = "include_statistics")]
    pub include_statistics: Option<bool>,
}

impl PriceParams {
    /// Zone identifiers, trimmed and uppercased, or [`None`] when the parameter is absent.
    #[must_use]
    pub fn zones(&self) -> Option<Vec<String>> {
        self.zones.as_deref().map(|zones| {
            zones
                .split(',')
                .map(|zone| zone.trim().to_uppercase())
                .filter(|zone| !zone.is_empty())
                .collect()
        })
    }

    pub fn to_query(&self, zones: Vec<String>) -> Result<PriceQuery, ApiError> {
        if let Some(days_back) = self.days_back
            && !(1..=MAX_DAYS_BACK).contains(&days_back)
        {
            return Err(ApiError::BadRequest(format!(
                "`daysBack` must be between 1 and {MAX_DAYS_BACK}, got {days_back}"
            )));
        }
        Ok(PriceQuery::builder()
            .zones(zones)
            .maybe_start_date(self.start_date.as_deref().map(parse_date).transpose()?)
            .maybe_end_date(self.end_date.as_deref().map(parse_date).transpose()?)
            .maybe_days_back(self.days_back)
            .build())
    }
}

#[derive(Serialize)]
pub struct ServiceInfo {
    pub name: &'static str,
    pub version: &'static str,
    pub status: &'static str,
    pub description: &'static str,
    pub endpoints: BTreeMap<&'static str, &'static str>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Health {
    pub status: &'static str,
    pub timestamp: DateTime<Local>,
    pub available_zone_count: usize,
}

#[derive(Serialize)]
pub struct ZoneInfo {
    pub name: String,
    pub code: String,
    pub timezone: String,
    pub description: String,
}

impl From<&ZoneConfig> for ZoneInfo {
    fn from(zone: &ZoneConfig) -> Self {
        Self {
            name: zone.name.clone(),
            code: zone.area_code.clone(),
            timezone: zone.timezone.name().to_owned(),
            description: zone.description.clone(),
        }
    }
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PricePoint {
    pub timestamp: DateTime<FixedOffset>,
    pub price_eur_mwh: f64,
    pub zone: String,
    pub zone_name: String,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub date: Option<NaiveDate>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub hour: Option<u32>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub day_of_week: Option<String>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub weekday: Option<u32>,
}

impl From<&PriceRecord> for PricePoint {
    fn from(record: &PriceRecord) -> Self {
        let time = record.time.as_ref();
        Self {
            timestamp: record.timestamp,
            price_eur_mwh: record.price,
            zone: record.zone.clone(),
            zone_name: record.zone_name.clone(),
            date: time.map(|time| time.date),
            hour: time.map(|time| time.hour),
            day_of_week: time.map(|time| time.day_of_week.clone()),
            weekday: time.map(|time| time.weekday),
        }
    }
}

/// Earliest and latest timestamps of the returned data.
#[derive(Serialize)]
pub struct TimeSpan {
    pub start: DateTime<FixedOffset>,
    pub end: DateTime<FixedOffset>,
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ZonePrices {
    pub zone: String,
    pub zone_name: String,
    pub data_points: usize,
    pub date_range: TimeSpan,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub statistics: Option<Statistics>,

    pub data: Vec<PricePoint>,
}

impl ZonePrices {
    /// Build the response, or [`None`] for an empty table.
    #[must_use]
    pub fn from_table(table: &PriceTable, include_statistics: bool) -> Option<Self> {
        let (start, end) = table.time_span()?;
        Some(Self {
            zone: table.zone.clone(),
            zone_name: table.zone_name.clone(),
            data_points: table.len(),
            date_range: TimeSpan { start, end },
            statistics: if include_statistics { table.statistics() } else { None },
            data: table.records.iter().map(PricePoint::from).collect_vec(),
        })
    }
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum ZoneEntry {
    Prices(ZonePrices),

    Unavailable {
        error: String,

        #[serde(rename = "zoneName")]
        zone_name: String,
    },
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CurrentPrices {
    pub timestamp: DateTime<Local>,
    pub current_prices: BTreeMap<String, CurrentPrice>,
}

#[derive(Serialize)]
#[serde(untagged)]
pub enum CurrentPrice {
    Latest(PricePoint),
    Unavailable { zone: String, error: String },
}
