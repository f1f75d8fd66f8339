use std::{collections::BTreeMap, sync::Arc};

use axum::{
    Json,
    extract::{Path, Query, State, rejection::QueryRejection},
};
use chrono::Local;
use itertools::Itertools;

use crate::{
    core::{PricingService, ZoneOutcome},
    prelude::*,
    server::{
        AppState,
        error::ApiError,
        models::{CurrentPrice, CurrentPrices, PricePoint, PriceParams, ZoneEntry, ZonePrices},
    },
};

#[instrument(skip_all, fields(zone = zone.as_str()))]
pub async fn get_zone_prices(
    State(state): State<Arc<AppState>>,
    Path(zone): Path<String>,
    params: Result<Query<PriceParams>, QueryRejection>,
) -> Result<Json<ZonePrices>, ApiError> {
    let service = state.service()?;
    let Query(params) = params?;
    if service.config().zone(&zone).is_none() {
        return Err(ApiError::NotFound(format!(
            "zone `{zone}` not found, available zones: {}",
            available_zones(service),
        )));
    }

    let results = service.fetch_prices(&params.to_query(vec![zone.clone()])?).await?;
    let include_statistics = include_statistics(service, &params);
    let outcome = results
        .get(&zone)
        .ok_or_else(|| ApiError::NotFound(format!("no data available for zone `{zone}`")))?;
    outcome
        .usable_table()
        .and_then(|table| ZonePrices::from_table(table, include_statistics))
        .map(Json)
        .ok_or_else(|| ApiError::NotFound(no_data_message(&zone, outcome)))
}

#[instrument(skip_all)]
pub async fn get_prices(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PriceParams>, QueryRejection>,
) -> Result<Json<BTreeMap<String, ZoneEntry>>, ApiError> {
    let service = state.service()?;
    let Query(params) = params?;

    let zones = params.zones().unwrap_or_default();
    if zones.is_empty() {
        return Err(ApiError::BadRequest("no zones requested".to_owned()));
    }
    let invalid_zones =
        zones.iter().filter(|zone| service.config().zone(zone).is_none()).join(", ");
    if !invalid_zones.is_empty() {
        return Err(ApiError::BadRequest(format!(
            "invalid zones: {invalid_zones}, available zones: {}",
            available_zones(service),
        )));
    }

    let results = service.fetch_prices(&params.to_query(zones)?).await?;
    let include_statistics = include_statistics(service, &params);
    let entries = results
        .into_iter()
        .map(|(zone, outcome)| {
            let entry = outcome
                .usable_table()
                .and_then(|table| ZonePrices::from_table(table, include_statistics))
                .map_or_else(
                    || ZoneEntry::Unavailable {
                        error: no_data_message(&zone, &outcome),
                        zone_name: service
                            .config()
                            .zone(&zone)
                            .map(|config| config.name.clone())
                            .unwrap_or_default(),
                    },
                    ZoneEntry::Prices,
                );
            (zone, entry)
        })
        .collect();
    Ok(Json(entries))
}

/// Price in effect now in each zone, the zones default to the configured ones.
#[instrument(skip_all)]
pub async fn get_current_prices(
    State(state): State<Arc<AppState>>,
    params: Result<Query<PriceParams>, QueryRejection>,
) -> Result<Json<CurrentPrices>, ApiError> {
    let service = state.service()?;
    let Query(params) = params?;

    let zones = params
        .zones()
        .filter(|zones| !zones.is_empty())
        .unwrap_or_else(|| service.config().service.default_zones.clone());
    let query = PriceParams { days_back: Some(1), ..PriceParams::default() }.to_query(zones)?;
    let results = service.fetch_prices(&query).await?;

    let now = Local::now();
    let current_prices = results
        .into_iter()
        .map(|(zone, outcome)| {
            let latest = outcome.usable_table().and_then(|table| table.latest_at(&now));
            let price = match latest {
                Some(record) => CurrentPrice::Latest(PricePoint::from(record)),
                None => CurrentPrice::Unavailable {
                    zone: zone.clone(),
                    error: no_data_message(&zone, &outcome),
                },
            };
            (zone, price)
        })
        .collect();
    Ok(Json(CurrentPrices { timestamp: now, current_prices }))
}

fn include_statistics(service: &PricingService, params: &PriceParams) -> bool {
    params.include_statistics.unwrap_or(service.config().service.output.include_statistics)
}

fn available_zones(service: &PricingService) -> String {
    service.zones().keys().join(", ")
}

fn no_data_message(zone: &str, outcome: &ZoneOutcome) -> String {
    match outcome {
        ZoneOutcome::Failed { reason } => format!("no data available for zone `{zone}`: {reason}"),
        ZoneOutcome::Fetched(_) => format!("no data available for zone `{zone}`"),
    }
}
