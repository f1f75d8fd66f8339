use std::{collections::BTreeMap, sync::Arc};

use axum::{Json, extract::State};
use chrono::Local;

use crate::server::{
    AppState,
    error::ApiError,
    models::{Health, ServiceInfo},
};

pub async fn get_info(State(state): State<Arc<AppState>>) -> Json<ServiceInfo> {
    Json(ServiceInfo {
        name: "Day-ahead Electricity Pricing API",
        version: env!("CARGO_PKG_VERSION"),
        status: if state.service().is_ok() { "running" } else { "error" },
        description: "Day-ahead electricity prices of the configured bidding zones",
        endpoints: BTreeMap::from([
            ("health", "/health"),
            ("zones", "/zones"),
            ("zonePrices", "/zones/{zone}/prices"),
            ("prices", "/prices"),
            ("currentPrices", "/prices/current"),
        ]),
    })
}

pub async fn get_health(State(state): State<Arc<AppState>>) -> Result<Json<Health>, ApiError> {
    let service = state.service()?;
    Ok(Json(Health {
        status: "healthy",
        timestamp: Local::now(),
        available_zone_count: service.zones().len(),
    }))
}
