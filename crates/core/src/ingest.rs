//! Ingestion of cases from external feeds.
//!
//! An [`ExternalSource`] yields new case records; the [`IngestionService`] pulls from it and
//! appends the results to a [`CaseStore`] through the normal creation path, so ingested cases get
//! ids and ordering exactly like API-created ones.
//!
//! Only a simulated feed ([`StubSource`]) exists today. A real feed client would implement the
//! same trait and be handed to [`IngestionService::new`].

use crate::case::{Case, CaseSource, NewCase};
use crate::clock::Clock;
use crate::constants::{STUB_DIAGNOSIS, STUB_NOTES, STUB_PATIENT_ID};
use crate::store::CaseStore;
use crate::CaseResult;
use serde::{Deserialize, Serialize};
use std::sync::Arc;
use utoipa::ToSchema;

/// A feed of case records produced outside this service.
pub trait ExternalSource: Send + Sync {
    /// Short name used in logs.
    fn name(&self) -> &str;

    /// Returns records that have appeared since the last call.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::Source`](crate::CaseError::Source) if the feed cannot be read.
    fn fetch_new(&self) -> CaseResult<Vec<NewCase>>;
}

/// Simulated feed that produces one placeholder case per call.
pub struct StubSource {
    clock: Arc<dyn Clock>,
}

impl StubSource {
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self { clock }
    }
}

impl ExternalSource for StubSource {
    fn name(&self) -> &str {
        "external_stub"
    }

    fn fetch_new(&self) -> CaseResult<Vec<NewCase>> {
        Ok(vec![NewCase {
            patient_id: STUB_PATIENT_ID.into(),
            diagnosis: STUB_DIAGNOSIS.into(),
            reported_at: self.clock.now_text(),
            notes: STUB_NOTES.into(),
            source: Some(CaseSource::ExternalStub),
        }])
    }
}

/// Result of a single poll.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct PollOutcome {
    pub added: usize,
    pub items: Vec<Case>,
}

/// Pulls from an [`ExternalSource`] into a [`CaseStore`].
#[derive(Clone)]
pub struct IngestionService {
    source: Arc<dyn ExternalSource>,
}

impl IngestionService {
    pub fn new(source: Arc<dyn ExternalSource>) -> Self {
        Self { source }
    }

    /// Fetches new records and appends them to `store` in one batch.
    ///
    /// No deduplication is done against earlier polls.
    ///
    /// # Errors
    ///
    /// Propagates the source's error; nothing is stored in that case.
    pub fn poll(&self, store: &CaseStore) -> CaseResult<PollOutcome> {
        let fetched = self.source.fetch_new()?;
        let items = store.create_batch(fetched);
        tracing::info!(
            source = self.source.name(),
            added = items.len(),
            "ingestion poll completed"
        );
        Ok(PollOutcome {
            added: items.len(),
            items,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::clock::SystemClock;
    use crate::CaseError;

    struct FailingSource;

    impl ExternalSource for FailingSource {
        fn name(&self) -> &str {
            "failing"
        }

        fn fetch_new(&self) -> CaseResult<Vec<NewCase>> {
            Err(CaseError::Source("feed unavailable".into()))
        }
    }

    fn stub_service(clock: Arc<dyn Clock>) -> IngestionService {
        IngestionService::new(Arc::new(StubSource::new(clock)))
    }

    #[test]
    fn poll_adds_exactly_one_tagged_case() {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = CaseStore::new(clock.clone());
        let service = stub_service(clock);

        let outcome = service.poll(&store).unwrap();

        assert_eq!(outcome.added, 1);
        assert_eq!(outcome.items.len(), 1);
        let case = &outcome.items[0];
        assert_eq!(case.source, Some(CaseSource::ExternalStub));
        assert_eq!(case.patient_id, STUB_PATIENT_ID);
        assert_eq!(case.diagnosis, STUB_DIAGNOSIS);
        assert_eq!(case.notes, STUB_NOTES);
        assert!(case.updated_at.is_none());
        assert_eq!(store.get(case.id.as_str()).unwrap(), *case);
    }

    #[test]
    fn repeated_polls_each_add_a_new_case() {
        let clock: Arc<dyn Clock> = Arc::new(SystemClock);
        let store = CaseStore::new(clock.clone());
        let service = stub_service(clock);

        let first = service.poll(&store).unwrap();
        let second = service.poll(&store).unwrap();

        assert_eq!(store.len(), 2);
        assert_ne!(first.items[0].id, second.items[0].id);
    }

    #[test]
    fn source_failure_leaves_store_untouched() {
        let store = CaseStore::new(Arc::new(SystemClock));
        let service = IngestionService::new(Arc::new(FailingSource));

        assert!(matches!(service.poll(&store), Err(CaseError::Source(_))));
        assert!(store.is_empty());
    }
}
