use crate::error::ApiError;
use crate::AppState;
use api_shared::AuthError;
use axum::{
    extract::{Request, State},
    http::header::AUTHORIZATION,
    middleware::Next,
    response::Response,
};

/// Rejects the request with 401 unless it carries a valid bearer token.
///
/// Runs as a route layer, so it executes before any handler extractor reads the body.
pub async fn require_auth(
    State(state): State<AppState>,
    request: Request,
    next: Next,
) -> Result<Response, ApiError> {
    let verdict = match request.headers().get(AUTHORIZATION) {
        None => state.auth.check(None),
        Some(value) => match value.to_str() {
            Ok(value) => state.auth.check(Some(value)),
            Err(_) => Err(AuthError::Malformed),
        },
    };

    if let Err(reason) = verdict {
        tracing::debug!(
            method = %request.method(),
            path = request.uri().path(),
            %reason,
            "request rejected"
        );
        return Err(reason.into());
    }

    Ok(next.run(request).await)
}
