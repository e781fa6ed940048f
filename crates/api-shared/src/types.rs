//! Request and response bodies shared by the HTTP layer.
//!
//! The case record itself and the list/poll envelopes come from `case-core`; the types here cover
//! the remaining JSON shapes. Request types document the accepted fields for OpenAPI only: the
//! handlers decode bodies leniently and coerce values to text.

use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

/// Health check body.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct HealthRes {
    pub status: String,
    pub time: String,
}

/// Body returned for every error status.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct ErrorRes {
    /// Status line and message, e.g. `404 Not Found: Case not found`.
    pub error: String,
    /// Human-readable description.
    pub message: String,
}

/// Fields accepted when creating a case.
#[derive(Clone, Debug, Serialize, Deserialize, ToSchema)]
pub struct CreateCaseReq {
    pub patient_id: String,
    pub diagnosis: String,
    pub reported_at: String,
    #[serde(default)]
    pub notes: Option<String>,
}

/// Fields accepted when updating a case. Unknown fields are ignored.
#[derive(Clone, Debug, Default, Serialize, Deserialize, ToSchema)]
pub struct UpdateCaseReq {
    pub diagnosis: Option<String>,
    pub reported_at: Option<String>,
    pub notes: Option<String>,
}
