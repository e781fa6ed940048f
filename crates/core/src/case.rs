//! The `Case` record and the inputs that create or modify it.
//!
//! A [`Case`] is only ever constructed by the [`CaseStore`](crate::store::CaseStore); callers
//! describe what they want with a [`NewCase`] or a [`CaseUpdate`], both of which are built from a
//! loosely-typed JSON payload.

use crate::constants::{
    DIAGNOSIS_FIELD, NOTES_FIELD, PATIENT_ID_FIELD, REPORTED_AT_FIELD, REQUIRED_CREATE_FIELDS,
};
use crate::validation::{coerce_text, Payload};
use crate::{CaseError, CaseResult};
use serde::{Deserialize, Serialize};
use std::borrow::Borrow;
use std::fmt;
use utoipa::ToSchema;

/// Server-generated case identifier.
///
/// Rendered as a hyphenated lowercase UUID v4, for example
/// `1b4e28ba-2fa1-41d2-883f-0016d3cca427`.
#[derive(Clone, Debug, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(transparent)]
pub struct CaseId(String);

impl CaseId {
    /// Generates a fresh random identifier.
    pub fn generate() -> Self {
        Self(uuid::Uuid::new_v4().to_string())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

// Lets the store index be queried with a plain `&str` from the request path.
impl Borrow<str> for CaseId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for CaseId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// Where a case came from when it was not created through the API.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum CaseSource {
    /// Produced by the simulated external feed.
    ExternalStub,
}

/// A tracked case record.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct Case {
    pub id: CaseId,
    pub patient_id: String,
    pub diagnosis: String,
    /// Caller-supplied report time. Stored as given, not parsed.
    pub reported_at: String,
    pub notes: String,
    pub created_at: String,
    /// Set by the first update and refreshed by every later one.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub updated_at: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub source: Option<CaseSource>,
}

/// Fields supplied when creating a case.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct NewCase {
    pub patient_id: String,
    pub diagnosis: String,
    pub reported_at: String,
    pub notes: String,
    pub source: Option<CaseSource>,
}

impl NewCase {
    /// Builds a `NewCase` from a request payload.
    ///
    /// `patient_id`, `diagnosis` and `reported_at` must be present (a `null` value counts as
    /// present). `notes` defaults to an empty string. Every value is coerced to text.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::MissingFields`] listing every absent required field.
    pub fn from_payload(payload: &Payload) -> CaseResult<Self> {
        let missing: Vec<&'static str> = REQUIRED_CREATE_FIELDS
            .iter()
            .copied()
            .filter(|field| !payload.contains_key(*field))
            .collect();
        if !missing.is_empty() {
            return Err(CaseError::MissingFields(missing));
        }

        let text = |field: &str| payload.get(field).map(coerce_text).unwrap_or_default();

        Ok(Self {
            patient_id: text(PATIENT_ID_FIELD),
            diagnosis: text(DIAGNOSIS_FIELD),
            reported_at: text(REPORTED_AT_FIELD),
            notes: text(NOTES_FIELD),
            source: None,
        })
    }
}

/// Partial set of mutable fields applied by an update.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct CaseUpdate {
    pub diagnosis: Option<String>,
    pub reported_at: Option<String>,
    pub notes: Option<String>,
}

impl CaseUpdate {
    /// Picks the updatable fields out of a payload, ignoring every other key.
    pub fn from_payload(payload: &Payload) -> Self {
        let text = |field: &str| payload.get(field).map(coerce_text);
        Self {
            diagnosis: text(DIAGNOSIS_FIELD),
            reported_at: text(REPORTED_AT_FIELD),
            notes: text(NOTES_FIELD),
        }
    }

    pub(crate) fn apply_to(self, case: &mut Case) {
        if let Some(diagnosis) = self.diagnosis {
            case.diagnosis = diagnosis;
        }
        if let Some(reported_at) = self.reported_at {
            case.reported_at = reported_at;
        }
        if let Some(notes) = self.notes {
            case.notes = notes;
        }
    }
}
