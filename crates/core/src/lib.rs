//! # Case Core
//!
//! Core business logic for the case registry.
//!
//! This crate contains pure data operations:
//! - The `Case` record and payload coercion for create/update inputs
//! - The in-memory, insertion-ordered `CaseStore`
//! - Ingestion from external feeds (currently a simulated stub)
//! - Startup configuration and the clock used for timestamps
//!
//! **No API concerns**: Authentication, HTTP servers, or response shapes belong in `api-shared`
//! or `api-rest`.

pub mod case;
pub mod clock;
pub mod config;
pub mod constants;
pub mod error;
pub mod ingest;
pub mod store;
pub mod validation;

pub use case::{Case, CaseId, CaseSource, CaseUpdate, NewCase};
pub use clock::{Clock, SystemClock};
pub use config::CoreConfig;
pub use error::{CaseError, CaseResult};
pub use ingest::{ExternalSource, IngestionService, PollOutcome, StubSource};
pub use store::{CaseList, CaseStore};
pub use validation::Payload;
