//! # API Shared
//!
//! Shared utilities and definitions for the case registry API.
//!
//! Contains:
//! - Wire types for health, errors and request documentation (`types` module)
//! - `HealthService`
//! - Bearer-token authentication, independent of any HTTP framework
//!
//! Used by `api-rest`.

pub mod auth;
pub mod health;
pub mod types;

pub use auth::{AuthError, BearerAuth};
pub use health::HealthService;
pub use types::*;
