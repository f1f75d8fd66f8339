use axum::{
    Json,
    extract::rejection::QueryRejection,
    http::StatusCode,
    response::{IntoResponse, Response},
};
use serde::Serialize;
use thiserror::Error;

use crate::{core::PricingServiceError, prelude::*};

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("pricing service not available: {0}")]
    Unavailable(String),

    #[error("{0}")]
    NotFound(String),

    #[error("{0}")]
    BadRequest(String),

    #[error(transparent)]
    Internal(#[from] anyhow::Error),
}

impl From<PricingServiceError> for ApiError {
    fn from(error: PricingServiceError) -> Self {
        match error {
            PricingServiceError::UnknownZone(_) => Self::NotFound(error.to_string()),
            PricingServiceError::InvalidDate(_)
            | PricingServiceError::InvertedRange { .. }
            | PricingServiceError::NonexistentLocalTime { .. } => {
                Self::BadRequest(error.to_string())
            }
            PricingServiceError::Fetch { .. } => Self::Internal(error.into()),
        }
    }
}

impl From<QueryRejection> for ApiError {
    fn from(rejection: QueryRejection) -> Self {
        Self::BadRequest(rejection.body_text())
    }
}

#[derive(Serialize)]
struct ErrorBody {
    code: u16,
    message: String,
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, message) = match &self {
            Self::Unavailable(_) => (StatusCode::SERVICE_UNAVAILABLE, self.to_string()),
            Self::NotFound(message) => (StatusCode::NOT_FOUND, message.clone()),
            Self::BadRequest(message) => (StatusCode::BAD_REQUEST, message.clone()),
            Self::Internal(error) => {
                error!("failed to handle the request: {error:#}");
                (StatusCode::INTERNAL_SERVER_ERROR, format!("{error:#}"))
            }
        };
        (status, Json(ErrorBody { code: status.as_u16(), message })).into_response()
    }
}
