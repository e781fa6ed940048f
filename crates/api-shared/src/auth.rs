//! Shared-secret bearer authentication.
//!
//! Protected routes expect `Authorization: Bearer <token>`. The header must split into exactly
//! two whitespace-separated parts: a scheme matching `bearer` in any case, and a token equal to
//! the configured secret byte for byte.

use constant_time_eq::constant_time_eq;
use std::sync::Arc;

/// Why a request was refused.
///
/// Every variant maps to the same 401 response; the distinction only feeds logs.
#[derive(Debug, Clone, Copy, PartialEq, Eq, thiserror::Error)]
pub enum AuthError {
    #[error("missing Authorization header")]
    MissingHeader,
    #[error("Authorization header is not `<scheme> <token>`")]
    Malformed,
    #[error("Authorization scheme is not Bearer")]
    UnsupportedScheme,
    #[error("bearer token does not match")]
    InvalidToken,
}

/// Validates bearer tokens against a single configured secret.
#[derive(Clone)]
pub struct BearerAuth {
    secret: Arc<str>,
}

impl BearerAuth {
    pub fn new(secret: impl Into<String>) -> Self {
        Self {
            secret: Arc::from(secret.into()),
        }
    }

    /// Checks the raw value of an `Authorization` header.
    ///
    /// Pure: no logging and no state change.
    ///
    /// # Errors
    ///
    /// Returns an [`AuthError`] describing the first problem found.
    pub fn check(&self, header_value: Option<&str>) -> Result<(), AuthError> {
        let header_value = header_value.ok_or(AuthError::MissingHeader)?;

        let parts: Vec<&str> = header_value.split_whitespace().collect();
        let [scheme, token] = parts.as_slice() else {
            return Err(AuthError::Malformed);
        };

        if !scheme.eq_ignore_ascii_case("bearer") {
            return Err(AuthError::UnsupportedScheme);
        }

        if constant_time_eq(token.as_bytes(), self.secret.as_bytes()) {
            Ok(())
        } else {
            Err(AuthError::InvalidToken)
        }
    }
}
