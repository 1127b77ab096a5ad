//! HTTP-facing errors

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use expo_common::ExpoError;
use std::sync::Arc;
use thiserror::Error;
use tracing::warn;

#[derive(Debug, Error)]
pub enum DashboardError {
    #[error(transparent)]
    Fetch(Arc<ExpoError>),

    #[error(transparent)]
    Render(#[from] ExpoError),

    #[error("Not found: {0}")]
    NotFound(String),
}

impl From<Arc<ExpoError>> for DashboardError {
    fn from(err: Arc<ExpoError>) -> Self {
        Self::Fetch(err)
    }
}

impl DashboardError {
    pub fn status_code(&self) -> StatusCode {
        match self {
            Self::Fetch(e) if e.is_network() => StatusCode::BAD_GATEWAY,
            Self::Fetch(_) | Self::Render(_) => StatusCode::INTERNAL_SERVER_ERROR,
            Self::NotFound(_) => StatusCode::NOT_FOUND,
        }
    }
}

impl IntoResponse for DashboardError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        warn!(%status, error = %self, "Request failed");
        (status, self.to_string()).into_response()
    }
}
