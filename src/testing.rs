//! Test doubles shared by the unit tests.

use std::sync::Arc;

use async_trait::async_trait;
use chrono::{DateTime, TimeDelta, Timelike};
use chrono_tz::Tz;

use crate::{
    api::DayAheadPrices,
    config::Config,
    core::{Interval, PricingService},
    prelude::*,
};

// language=toml
pub const TEST_CONFIG: &str = r#"
    [api]
    token = "dummy-token"

    [zones.SE4]
    name = "Sweden - South"
    code = "SE_4"
    timezone = "Europe/Stockholm"
    description = "Southern Sweden bidding zone"

    [zones.NO1]
    name = "Norway - Oslo"
    code = "NO_1"
    timezone = "Europe/Oslo"
    description = "Eastern Norway bidding zone"

    [service]
    default_zones = ["SE4", "NO1"]
    default_days_back = 1
"#;

pub fn test_config() -> Config {
    Config::parse(TEST_CONFIG, None).unwrap()
}

pub fn test_service(prices: impl DayAheadPrices + 'static) -> PricingService {
    PricingService::new(Arc::new(test_config()), Box::new(prices))
}

/// Hourly prices equal to the hour of the day, spilling one hour over the both interval ends.
#[derive(Default)]
pub struct HourlyPrices {
    failing_areas: Vec<&'static str>,
}

impl HourlyPrices {
    pub fn failing_on(areas: &[&'static str]) -> Self {
        Self { failing_areas: areas.to_vec() }
    }
}

#[async_trait]
impl DayAheadPrices for HourlyPrices {
    async fn get_prices(
        &self,
        area_code: &str,
        interval: Interval,
    ) -> Result<Vec<(DateTime<Tz>, f64)>> {
        let is_failing = self.failing_areas.iter().any(|area| *area == area_code);
        ensure!(!is_failing, "`{area_code}` is unavailable");
        let mut points = Vec::new();
        let mut timestamp = interval.start - TimeDelta::hours(1);
        while timestamp <= interval.end {
            points.push((timestamp, f64::from(timestamp.hour())));
            timestamp += TimeDelta::hours(1);
        }
        Ok(points)
    }
}

/// Returns the same points regardless of the request.
pub struct FixedPrices(pub Vec<(DateTime<Tz>, f64)>);

#[async_trait]
impl DayAheadPrices for FixedPrices {
    async fn get_prices(
        &self,
        _area_code: &str,
        _interval: Interval,
    ) -> Result<Vec<(DateTime<Tz>, f64)>> {
        Ok(self.0.clone())
    }
}
