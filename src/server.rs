//! HTTP surface of the pricing service.

mod error;
mod health;
mod models;
mod prices;
mod zones;

use std::{net::SocketAddr, sync::Arc, time::Duration};

use axum::{Router, routing::get};
use tokio::net::TcpListener;
use tower_http::{
    cors::{Any, CorsLayer},
    timeout::TimeoutLayer,
    trace::TraceLayer,
};

use self::error::ApiError;
use crate::{core::PricingService, prelude::*};

/// Shared state of the handlers.
pub enum AppState {
    Ready(PricingService),

    /// The service failed to initialize, the handlers answer with 503.
    Unavailable { reason: String },
}

impl AppState {
    fn service(&self) -> Result<&PricingService, ApiError> {
        match self {
            Self::Ready(service) => Ok(service),
            Self::Unavailable { reason } => Err(ApiError::Unavailable(reason.clone())),
        }
    }
}

pub fn router(state: Arc<AppState>, request_timeout: Duration) -> Router {
    Router::new()
        .route("/", get(health::get_info))
        .route("/health", get(health::get_health))
        .route("/zones", get(zones::get_zones))
        .route("/zones/{zone}/prices", get(prices::get_zone_prices))
        .route("/prices", get(prices::get_prices))
        .route("/prices/current", get(prices::get_current_prices))
        .with_state(state)
        .layer(CorsLayer::new().allow_origin(Any).allow_methods(Any).allow_headers(Any))
        .layer(TimeoutLayer::new(request_timeout))
        .layer(TraceLayer::new_for_http())
}

/// Serve until Ctrl+C.
#[instrument(skip_all, fields(address = %address))]
pub async fn serve(
    state: Arc<AppState>,
    address: SocketAddr,
    request_timeout: Duration,
) -> Result {
    let listener =
        TcpListener::bind(address).await.with_context(|| format!("failed to bind `{address}`"))?;
    info!("listening…");
    axum::serve(listener, router(state, request_timeout))
        .with_graceful_shutdown(shutdown_signal())
        .await
        .context("server failed")?;
    info!("stopped");
    Ok(())
}

async fn shutdown_signal() {
    if let Err(error) = tokio::signal::ctrl_c().await {
        error!("failed to listen for the shutdown signal: {error:#}");
        return;
    }
    info!("shutting down…");
}

#[cfg(test)]
mod tests {
    use axum::{
        body::{Body, to_bytes},
        http::{Request, StatusCode},
    };
    use chrono::{DateTime, TimeDelta};
    use serde_json::Value;
    use tower::ServiceExt;

    use super::*;
    use crate::testing::{HourlyPrices, test_service};

    fn ready(prices: HourlyPrices) -> Router {
        router(Arc::new(AppState::Ready(test_service(prices))), Duration::from_secs(10))
    }

    fn unavailable() -> Router {
        let state = AppState::Unavailable { reason: "failed to build the client".to_owned() };
        router(Arc::new(state), Duration::from_secs(10))
    }

    async fn get(router: Router, uri: &str) -> Result<(StatusCode, Value)> {
        let response = router.oneshot(Request::get(uri).body(Body::empty())?).await?;
        let status = response.status();
        let body = to_bytes(response.into_body(), usize::MAX).await?;
        Ok((status, serde_json::from_slice(&body)?))
    }

    #[tokio::test]
    async fn info_ok() -> Result {
        let (status, body) = get(ready(HourlyPrices::default()), "/").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "running");
        assert_eq!(body["endpoints"]["zonePrices"], "/zones/{zone}/prices");

        let (status, body) = get(unavailable(), "/").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "error");
        Ok(())
    }

    #[tokio::test]
    async fn health_ok() -> Result {
        let (status, body) = get(ready(HourlyPrices::default()), "/health").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["availableZoneCount"], 2);
        Ok(())
    }

    #[tokio::test]
    async fn health_unavailable_err() -> Result {
        let (status, body) = get(unavailable(), "/health").await?;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        assert_eq!(body["code"], 503);
        assert!(body["message"].as_str().unwrap().contains("failed to build the client"));
        Ok(())
    }

    #[tokio::test]
    async fn zones_ok() -> Result {
        let (status, body) = get(ready(HourlyPrices::default()), "/zones").await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["SE4"]["name"], "Sweden - South");
        assert_eq!(body["SE4"]["code"], "SE_4");
        assert_eq!(body["SE4"]["timezone"], "Europe/Stockholm");
        assert_eq!(body["NO1"]["description"], "Eastern Norway bidding zone");

        let (status, _) = get(unavailable(), "/zones").await?;
        assert_eq!(status, StatusCode::SERVICE_UNAVAILABLE);
        Ok(())
    }

    #[tokio::test]
    async fn zone_prices_ok() -> Result {
        let uri = "/zones/SE4/prices?startDate=2024-01-01&endDate=2024-01-01";
        let (status, body) = get(ready(HourlyPrices::default()), uri).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["zone"], "SE4");
        assert_eq!(body["zoneName"], "Sweden - South");
        assert_eq!(body["dataPoints"], 24);
        assert_eq!(body["dateRange"]["start"], "2024-01-01T00:00:00+01:00");
        assert_eq!(body["dateRange"]["end"], "2024-01-01T23:00:00+01:00");
        assert_eq!(body["statistics"]["count"], 24);
        assert_eq!(body["statistics"]["max"], 23.0);

        let first = &body["data"][0];
        assert_eq!(first["timestamp"], "2024-01-01T00:00:00+01:00");
        assert_eq!(first["priceEurMwh"], 0.0);
        assert_eq!(first["date"], "2024-01-01");
        assert_eq!(first["dayOfWeek"], "Monday");
        assert_eq!(first["weekday"], 0);
        Ok(())
    }

    #[tokio::test]
    async fn zone_prices_snake_case_params_ok() -> Result {
        let uri = "/zones/NO1/prices\
            ?start_date=2024-01-01&end_date=2024-01-02&include_statistics=false";
        let (status, body) = get(ready(HourlyPrices::default()), uri).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["dataPoints"], 48);
        assert!(body.get("statistics").is_none());
        Ok(())
    }

    #[tokio::test]
    async fn zone_prices_unknown_zone_err() -> Result {
        let (status, body) = get(ready(HourlyPrices::default()), "/zones/XX/prices").await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["code"], 404);
        Ok(())
    }

    #[tokio::test]
    async fn zone_prices_fetch_failure_err() -> Result {
        let router = ready(HourlyPrices::failing_on(&["SE_4"]));
        let (status, body) = get(router, "/zones/SE4/prices?daysBack=1").await?;
        assert_eq!(status, StatusCode::NOT_FOUND);
        let message = body["message"].as_str().unwrap();
        assert!(message.contains("no data available for zone `SE4`"), "{message}");
        assert!(message.contains("`SE_4` is unavailable"), "{message}");
        Ok(())
    }

    #[tokio::test]
    async fn zone_prices_bad_request_err() -> Result {
        for uri in [
            "/zones/SE4/prices?daysBack=0",
            "/zones/SE4/prices?daysBack=366",
            "/zones/SE4/prices?daysBack=seven",
            "/zones/SE4/prices?startDate=2024-13-01",
            "/zones/SE4/prices?startDate=2024-01-03&endDate=2024-01-01",
        ] {
            let (status, body) = get(ready(HourlyPrices::default()), uri).await?;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
            assert_eq!(body["code"], 400, "{uri}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn prices_ok() -> Result {
        let router = ready(HourlyPrices::failing_on(&["NO_1"]));
        let uri = "/prices?zones=se4,%20NO1&startDate=2024-01-01&endDate=2024-01-01";
        let (status, body) = get(router, uri).await?;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["SE4"]["dataPoints"], 24);
        assert_eq!(body["NO1"]["zoneName"], "Norway - Oslo");
        assert!(body["NO1"]["error"].as_str().unwrap().contains("unavailable"));
        Ok(())
    }

    #[tokio::test]
    async fn prices_bad_request_err() -> Result {
        for uri in ["/prices?zones=SE4,DK1", "/prices?zones=,", "/prices"] {
            let (status, _) = get(ready(HourlyPrices::default()), uri).await?;
            assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        }
        Ok(())
    }

    #[tokio::test]
    async fn current_prices_ok() -> Result {
        let (status, body) =
            get(ready(HourlyPrices::default()), "/prices/current?zones=SE4,DK1").await?;
        assert_eq!(status, StatusCode::OK);
        let current_prices = &body["currentPrices"];
        assert_eq!(current_prices["SE4"]["zone"], "SE4");
        assert_eq!(
            current_prices["SE4"]["priceEurMwh"].as_f64(),
            current_prices["SE4"]["hour"].as_f64(),
        );

        // The hourly period containing the response time, never a future one:
        let parse = |value: &Value| DateTime::parse_from_rfc3339(value.as_str().unwrap());
        let now = parse(&body["timestamp"])?;
        let current = parse(&current_prices["SE4"]["timestamp"])?;
        assert!(current <= now, "now={now} current={current}");
        assert!(now - current < TimeDelta::hours(1), "now={now} current={current}");

        assert_eq!(current_prices["DK1"]["zone"], "DK1");
        assert!(current_prices["DK1"]["error"].is_string());
        Ok(())
    }

    #[tokio::test]
    async fn current_prices_default_zones_ok() -> Result {
        let (status, body) = get(ready(HourlyPrices::default()), "/prices/current").await?;
        assert_eq!(status, StatusCode::OK);
        let zones = body["currentPrices"].as_object().unwrap().keys().cloned().collect::<Vec<_>>();
        assert_eq!(zones, ["NO1", "SE4"]);
        Ok(())
    }
}
