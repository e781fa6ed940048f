//! Mapping of failures to HTTP responses.
//!
//! Every error leaves the service as `{"error": "<code> <reason>: <message>", "message": ...}`
//! with the matching status code.

use api_shared::{AuthError, ErrorRes};
use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use case_core::CaseError;

#[derive(Debug, thiserror::Error)]
pub enum ApiError {
    #[error("Unauthorized")]
    Unauthorized,
    #[error("{0}")]
    BadRequest(String),
    #[error("{0}")]
    NotFound(String),
    #[error("Internal error")]
    Internal,
}

impl ApiError {
    pub fn status(&self) -> StatusCode {
        match self {
            ApiError::Unauthorized => StatusCode::UNAUTHORIZED,
            ApiError::BadRequest(_) => StatusCode::BAD_REQUEST,
            ApiError::NotFound(_) => StatusCode::NOT_FOUND,
            ApiError::Internal => StatusCode::INTERNAL_SERVER_ERROR,
        }
    }
}

impl From<AuthError> for ApiError {
    fn from(_: AuthError) -> Self {
        ApiError::Unauthorized
    }
}

impl From<CaseError> for ApiError {
    fn from(err: CaseError) -> Self {
        match err {
            CaseError::MissingFields(_) => ApiError::BadRequest(err.to_string()),
            CaseError::NotFound(_) => ApiError::NotFound("Case not found".into()),
            CaseError::InvalidConfig(_) | CaseError::Source(_) => {
                tracing::error!("Case operation error: {:?}", err);
                ApiError::Internal
            }
        }
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let status = self.status();
        let message = self.to_string();
        let body = ErrorRes {
            error: format!(
                "{} {}: {}",
                status.as_u16(),
                status.canonical_reason().unwrap_or("Error"),
                message
            ),
            message,
        };

        (status, Json(body)).into_response()
    }
}
