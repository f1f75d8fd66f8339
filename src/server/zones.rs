use std::{collections::BTreeMap, sync::Arc};

use axum::{Json, extract::State};

use crate::server::{AppState, error::ApiError, models::ZoneInfo};

pub async fn get_zones(
    State(state): State<Arc<AppState>>,
) -> Result<Json<BTreeMap<String, ZoneInfo>>, ApiError> {
    let zones = state
        .service()?
        .zones()
        .iter()
        .map(|(id, zone)| (id.clone(), ZoneInfo::from(zone)))
        .collect();
    Ok(Json(zones))
}
