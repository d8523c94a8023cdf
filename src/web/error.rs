//! Mapping of request failures onto HTTP responses

use crate::quality::QualityError;
use crate::search::InvalidRequest;
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};

/// Every way a search request can end without a result body
#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("invalid JSON payload")]
    InvalidJson(#[source] serde_json::Error),

    #[error(transparent)]
    InvalidRequest(#[from] InvalidRequest),

    #[error("quality service error: {0}")]
    Upstream(#[from] QualityError),

    #[error("unable to encode response")]
    Encode(#[source] serde_json::Error),
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            Self::InvalidJson(_) | Self::InvalidRequest(_) => StatusCode::BAD_REQUEST,
            Self::Upstream(_) => StatusCode::BAD_GATEWAY,
            Self::Encode(_) => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        match &self {
            Self::Upstream(e) => tracing::warn!("Quality service failed: {}", e),
            Self::Encode(e) => tracing::error!("Response encoding failed: {}", e),
            _ => tracing::debug!("Rejected request: {}", self),
        }
        (self.status(), format!("{}\n", self)).into_response()
    }
}
