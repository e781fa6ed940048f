//! HTTP handlers for the case registry.
//!
//! Handlers are thin: they decode the request, call into `case-core` and let [`ApiError`] shape
//! failures. Authentication is applied by [`crate::middleware::require_auth`] before any of the
//! `/api` handlers run.

use crate::error::ApiError;
use crate::AppState;
use api_shared::{CreateCaseReq, ErrorRes, HealthRes, HealthService, UpdateCaseReq};
use axum::{
    body::Bytes,
    extract::{Path, State},
    http::{header::CONTENT_TYPE, HeaderMap, StatusCode},
    response::Json,
};
use case_core::validation::payload_from_slice;
use case_core::{Case, CaseList, CaseUpdate, NewCase, Payload, PollOutcome};

/// Decodes a JSON request body.
///
/// Bodies without a JSON content type are treated as empty, as are bodies that fail to decode.
fn json_payload(headers: &HeaderMap, body: &Bytes) -> Payload {
    if is_json_content_type(headers) {
        payload_from_slice(body)
    } else {
        Payload::new()
    }
}

fn is_json_content_type(headers: &HeaderMap) -> bool {
    let Some(value) = headers.get(CONTENT_TYPE).and_then(|v| v.to_str().ok()) else {
        return false;
    };
    let mime = value
        .split(';')
        .next()
        .unwrap_or_default()
        .trim()
        .to_ascii_lowercase();

    mime == "application/json" || (mime.starts_with("application/") && mime.ends_with("+json"))
}

#[utoipa::path(
    get,
    path = "/health",
    responses(
        (status = 200, description = "Health check response", body = HealthRes)
    )
)]
/// Health check endpoint
///
/// Open to unauthenticated callers; used by monitors and load balancers.
#[axum::debug_handler]
pub async fn health(State(state): State<AppState>) -> Json<HealthRes> {
    Json(HealthService::check_health(state.clock.as_ref()))
}

#[utoipa::path(
    get,
    path = "/api/cases",
    responses(
        (status = 200, description = "All cases in creation order", body = CaseList),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorRes)
    ),
    security(("bearer" = []))
)]
/// List every case
#[axum::debug_handler]
pub async fn list_cases(State(state): State<AppState>) -> Json<CaseList> {
    Json(state.store.list())
}

#[utoipa::path(
    post,
    path = "/api/cases",
    request_body = CreateCaseReq,
    responses(
        (status = 201, description = "Case created", body = Case),
        (status = 400, description = "Required fields missing", body = ErrorRes),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorRes)
    ),
    security(("bearer" = []))
)]
/// Create a case
///
/// `patient_id`, `diagnosis` and `reported_at` are required; `notes` defaults to empty. Values of
/// any JSON type are stored as text.
///
/// # Errors
/// Returns `400 Bad Request` naming every missing required field. Nothing is stored.
#[axum::debug_handler]
pub async fn create_case(
    State(state): State<AppState>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<(StatusCode, Json<Case>), ApiError> {
    let payload = json_payload(&headers, &body);
    let new_case = NewCase::from_payload(&payload)?;
    let case = state.store.create(new_case);
    tracing::info!(case_id = %case.id, "case created");
    Ok((StatusCode::CREATED, Json(case)))
}

#[utoipa::path(
    get,
    path = "/api/cases/{id}",
    params(("id" = String, Path, description = "Case id")),
    responses(
        (status = 200, description = "Case found", body = Case),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorRes),
        (status = 404, description = "No case with this id", body = ErrorRes)
    ),
    security(("bearer" = []))
)]
/// Fetch a single case
#[axum::debug_handler]
pub async fn get_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
) -> Result<Json<Case>, ApiError> {
    Ok(Json(state.store.get(&id)?))
}

#[utoipa::path(
    put,
    path = "/api/cases/{id}",
    params(("id" = String, Path, description = "Case id")),
    request_body = UpdateCaseReq,
    responses(
        (status = 200, description = "Case updated", body = Case),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorRes),
        (status = 404, description = "No case with this id", body = ErrorRes)
    ),
    security(("bearer" = []))
)]
/// Update a case
///
/// Only `diagnosis`, `reported_at` and `notes` can change; other keys are ignored. `updated_at`
/// is refreshed on every call, including one with an empty body.
#[axum::debug_handler]
pub async fn update_case(
    State(state): State<AppState>,
    Path(id): Path<String>,
    headers: HeaderMap,
    body: Bytes,
) -> Result<Json<Case>, ApiError> {
    let payload = json_payload(&headers, &body);
    let case = state.store.update(&id, CaseUpdate::from_payload(&payload))?;
    tracing::info!(case_id = %case.id, "case updated");
    Ok(Json(case))
}

#[utoipa::path(
    post,
    path = "/api/poll",
    responses(
        (status = 200, description = "Cases imported from the external feed", body = PollOutcome),
        (status = 401, description = "Missing or invalid bearer token", body = ErrorRes)
    ),
    security(("bearer" = []))
)]
/// Run one ingestion poll
///
/// Pulls from the configured external source and appends whatever it returns. With the stub
/// source this always adds exactly one case.
#[axum::debug_handler]
pub async fn poll(State(state): State<AppState>) -> Result<Json<PollOutcome>, ApiError> {
    Ok(Json(state.ingestion.poll(&state.store)?))
}

/// Fallback for unknown routes.
pub async fn not_found() -> ApiError {
    ApiError::NotFound("Not found".into())
}
