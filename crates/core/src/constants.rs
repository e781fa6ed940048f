//! Constants used throughout the case core crate.
//!
//! Field names, defaults and the fixed values written by the ingestion stub live here so the
//! store, the payload parsing and the API layer agree on them.

/// Payload key for the subject identifier.
pub const PATIENT_ID_FIELD: &str = "patient_id";

/// Payload key for the diagnosis text.
pub const DIAGNOSIS_FIELD: &str = "diagnosis";

/// Payload key for the caller-supplied report timestamp.
pub const REPORTED_AT_FIELD: &str = "reported_at";

/// Payload key for free-text notes.
pub const NOTES_FIELD: &str = "notes";

/// Fields that must be present when creating a case, in reporting order.
pub const REQUIRED_CREATE_FIELDS: [&str; 3] = [PATIENT_ID_FIELD, DIAGNOSIS_FIELD, REPORTED_AT_FIELD];

/// Shared secret used when `API_TOKEN` is not set.
pub const DEFAULT_API_TOKEN: &str = "dev-token";

/// Bind host used when `HOST` is not set.
pub const DEFAULT_HOST: &str = "0.0.0.0";

/// Listening port used when `PORT` is not set.
pub const DEFAULT_PORT: u16 = 5000;

/// Placeholder subject written by the ingestion stub.
pub const STUB_PATIENT_ID: &str = "external-123";

/// Placeholder diagnosis written by the ingestion stub.
pub const STUB_DIAGNOSIS: &str = "influenza_like_illness";

/// Note attached to every stub-ingested case.
pub const STUB_NOTES: &str = "Simulated import from external source";
