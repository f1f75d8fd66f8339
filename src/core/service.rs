use std::{collections::BTreeMap, sync::Arc};

use bon::Builder;
use chrono::{Local, NaiveDate};
use itertools::Itertools;

use crate::{
    api::DayAheadPrices,
    config::{Config, ZoneConfig},
    core::{
        DateRange,
        PriceRecord,
        PriceTable,
        PricingServiceError,
        TimeColumns,
        ZoneOutcome,
        ZoneResults,
    },
    prelude::*,
};

/// Optional overrides of the configured defaults.
#[must_use]
#[derive(Clone, Default, Builder)]
pub struct PriceQuery {
    /// Zone identifiers, the configured default zones when omitted.
    pub zones: Option<Vec<String>>,

    pub start_date: Option<NaiveDate>,

    /// Inclusive, today when omitted.
    pub end_date: Option<NaiveDate>,

    /// Lookback from the end date, only used when the start date is omitted.
    pub days_back: Option<u32>,
}

/// Fetches and normalizes the prices of the configured zones.
pub struct PricingService {
    config: Arc<Config>,
    prices: Box<dyn DayAheadPrices>,
}

impl PricingService {
    pub fn new(config: Arc<Config>, prices: Box<dyn DayAheadPrices>) -> Self {
        Self { config, prices }
    }

    #[must_use]
    pub fn config(&self) -> &Config {
        &self.config
    }

    #[must_use]
    pub fn zones(&self) -> &BTreeMap<String, ZoneConfig> {
        &self.config.zones
    }

    /// Fetch the prices of the zones, isolating the per-zone failures.
    ///
    /// Fails only when the date range itself is invalid.
    pub async fn fetch_prices(
        &self,
        query: &PriceQuery,
    ) -> Result<ZoneResults, PricingServiceError> {
        self.fetch_prices_on(query, Local::now().date_naive()).await
    }

    #[instrument(skip_all, fields(today = %today))]
    pub async fn fetch_prices_on(
        &self,
        query: &PriceQuery,
        today: NaiveDate,
    ) -> Result<ZoneResults, PricingServiceError> {
        let range = DateRange::resolve(
            query.start_date,
            query.end_date,
            query.days_back.unwrap_or(self.config.service.default_days_back),
            today,
        )?;
        let zones = query.zones.as_deref().unwrap_or(&self.config.service.default_zones);
        info!(?zones, %range, "fetching the prices…");

        let mut results = ZoneResults::new(range);
        for zone in zones.iter().unique() {
            let outcome = match self.fetch_zone_prices(zone, range).await {
                Ok(table) => ZoneOutcome::Fetched(table),
                Err(error) => {
                    let error = Error::from(error);
                    error!(zone, "failed to fetch the prices: {error:#}");
                    ZoneOutcome::Failed { reason: format!("{error:#}") }
                }
            };
            results.push(zone.clone(), outcome);
        }
        Ok(results)
    }

    /// Fetch the prices of a single configured zone.
    #[instrument(skip_all, fields(zone = zone, range = %range))]
    pub async fn fetch_zone_prices(
        &self,
        zone: &str,
        range: DateRange,
    ) -> Result<PriceTable, PricingServiceError> {
        let zone_config = self
            .config
            .zone(zone)
            .ok_or_else(|| PricingServiceError::UnknownZone(zone.to_owned()))?;
        let interval = range.localize(zone_config.timezone)?;
        let points = self
            .prices
            .get_prices(&zone_config.area_code, interval)
            .await
            .map_err(|source| PricingServiceError::Fetch { zone: zone.to_owned(), source })?;

        let include_time_columns = self.config.service.output.include_time_columns;
        let records: Vec<_> = points
            .into_iter()
            .filter(|(timestamp, _)| interval.contains(timestamp))
            .map(|(timestamp, price)| PriceRecord {
                timestamp: timestamp.fixed_offset(),
                price,
                zone: zone_config.id.clone(),
                zone_name: zone_config.name.clone(),
                time: include_time_columns.then(|| TimeColumns::from_timestamp(&timestamp)),
            })
            .collect();
        info!(n_records = records.len(), "fetched");

        Ok(PriceTable {
            zone: zone_config.id.clone(),
            zone_name: zone_config.name.clone(),
            range,
            records,
        })
    }
}
