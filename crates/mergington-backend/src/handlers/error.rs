use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Response},
};

use mergington::data::ErrorResponse;
use mergington::errors::ActivityError;
use mergington::log;

/// Wraps a domain error so handlers can return it straight to the client.
#[derive(Debug)]
pub struct ApiError(pub ActivityError);

impl From<ActivityError> for ApiError {
    fn from(err: ActivityError) -> Self {
        Self(err)
    }
}

impl ApiError {
    pub fn status_code(&self) -> StatusCode {
        match &self.0 {
            ActivityError::NotFound(_) => StatusCode::NOT_FOUND,
            ActivityError::DuplicateRegistration { .. }
            | ActivityError::NotRegistered { .. }
            | ActivityError::Full { .. } => StatusCode::BAD_REQUEST,
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status_code();
        log::debug!(error = ?self.0, %status, "request rejected");

        let body = ErrorResponse {
            detail: self.0.to_string(),
        };
        (status, Json(body)).into_response()
    }
}
