//! In-memory case storage.
//!
//! The [`CaseStore`] owns every [`Case`] for the lifetime of the process. Records are kept in
//! insertion order with a side index from id to position, so listing preserves creation order
//! while lookups stay O(1). There is no delete, which keeps positions stable.
//!
//! ## Concurrency
//!
//! All state sits behind one `RwLock`. Mutations take the write lock for their whole duration;
//! `list` and `get` share the read lock and never see a half-applied change. Callers only ever
//! receive clones.

use crate::case::{Case, CaseId, CaseUpdate, NewCase};
use crate::clock::Clock;
use crate::{CaseError, CaseResult};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::sync::{Arc, PoisonError, RwLock, RwLockReadGuard, RwLockWriteGuard};
use utoipa::ToSchema;

/// Snapshot of every stored case.
#[derive(Clone, Debug, PartialEq, Eq, Serialize, Deserialize, ToSchema)]
pub struct CaseList {
    pub items: Vec<Case>,
    pub count: usize,
}

#[derive(Default)]
struct Cases {
    items: Vec<Case>,
    index: HashMap<CaseId, usize>,
}

impl Cases {
    fn position(&self, id: &str) -> Option<usize> {
        self.index.get(id).copied()
    }

    fn insert(&mut self, new_case: NewCase, created_at: String) -> Case {
        let case = Case {
            id: CaseId::generate(),
            patient_id: new_case.patient_id,
            diagnosis: new_case.diagnosis,
            reported_at: new_case.reported_at,
            notes: new_case.notes,
            created_at,
            updated_at: None,
            source: new_case.source,
        };
        self.index.insert(case.id.clone(), self.items.len());
        self.items.push(case.clone());
        case
    }
}

/// Shared, thread-safe case collection.
pub struct CaseStore {
    clock: Arc<dyn Clock>,
    cases: RwLock<Cases>,
}

impl CaseStore {
    /// Creates an empty store that stamps records using `clock`.
    pub fn new(clock: Arc<dyn Clock>) -> Self {
        Self {
            clock,
            cases: RwLock::new(Cases::default()),
        }
    }

    // A panic while holding the lock cannot leave a record half-written: every mutation below
    // computes its values before touching the collection.
    fn read(&self) -> RwLockReadGuard<'_, Cases> {
        self.cases.read().unwrap_or_else(PoisonError::into_inner)
    }

    fn write(&self) -> RwLockWriteGuard<'_, Cases> {
        self.cases.write().unwrap_or_else(PoisonError::into_inner)
    }

    /// Returns every case in insertion order along with the total count.
    pub fn list(&self) -> CaseList {
        let cases = self.read();
        CaseList {
            items: cases.items.clone(),
            count: cases.items.len(),
        }
    }

    /// Stores a new case, assigning its id and `created_at`.
    pub fn create(&self, new_case: NewCase) -> Case {
        let created_at = self.clock.now_text();
        let case = self.write().insert(new_case, created_at);
        tracing::debug!(case_id = %case.id, "case created");
        case
    }

    /// Stores several cases atomically, in the given order.
    ///
    /// Other readers see either none or all of the batch.
    pub fn create_batch(&self, new_cases: Vec<NewCase>) -> Vec<Case> {
        let created_at = self.clock.now_text();
        let mut cases = self.write();
        new_cases
            .into_iter()
            .map(|new_case| cases.insert(new_case, created_at.clone()))
            .collect()
    }

    /// Fetches a case by id.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::NotFound`] if no case has this id.
    pub fn get(&self, id: &str) -> CaseResult<Case> {
        let cases = self.read();
        cases
            .position(id)
            .map(|pos| cases.items[pos].clone())
            .ok_or_else(|| CaseError::NotFound(id.to_owned()))
    }

    /// Applies `update` to the case with this id and stamps `updated_at`.
    ///
    /// `updated_at` is refreshed even when `update` carries no fields.
    ///
    /// # Errors
    ///
    /// Returns [`CaseError::NotFound`] if no case has this id.
    pub fn update(&self, id: &str, update: CaseUpdate) -> CaseResult<Case> {
        let updated_at = self.clock.now_text();
        let mut cases = self.write();
        let pos = cases
            .position(id)
            .ok_or_else(|| CaseError::NotFound(id.to_owned()))?;

        let case = &mut cases.items[pos];
        update.apply_to(case);
        case.updated_at = Some(updated_at);
        tracing::debug!(case_id = %case.id, "case updated");
        Ok(case.clone())
    }

    pub fn len(&self) -> usize {
        self.read().items.len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::case::CaseSource;
    use chrono::{DateTime, Duration, TimeZone, Utc};
    use std::borrow::Borrow;
    use std::collections::HashSet;
    use std::sync::Mutex;

    /// Clock that advances one second per reading.
    struct SteppingClock {
        next: Mutex<DateTime<Utc>>,
    }

    impl SteppingClock {
        fn new() -> Self {
            Self {
                next: Mutex::new(Utc.with_ymd_and_hms(2024, 1, 1, 0, 0, 0).unwrap()),
            }
        }
    }

    impl Clock for SteppingClock {
        fn now(&self) -> DateTime<Utc> {
            let mut next = self.next.lock().unwrap();
            let now = *next;
            *next = now + Duration::seconds(1);
            now
        }
    }

    fn test_store() -> CaseStore {
        CaseStore::new(Arc::new(SteppingClock::new()))
    }

    fn new_case(patient_id: &str, diagnosis: &str) -> NewCase {
        NewCase {
            patient_id: patient_id.into(),
            diagnosis: diagnosis.into(),
            reported_at: "2024-01-01T00:00:00Z".into(),
            notes: String::new(),
            source: None,
        }
    }

    #[test]
    fn create_assigns_unique_ids_and_created_at() {
        let store = test_store();
        let mut seen = HashSet::new();
        for i in 0..50 {
            let case = store.create(new_case(&format!("p{i}"), "flu"));
            assert!(!case.id.as_str().is_empty());
            assert!(seen.insert(case.id.clone()), "duplicate id {}", case.id);
            assert!(case.updated_at.is_none());
        }

        let first = store.list().items.remove(0);
        assert_eq!(first.created_at, "2024-01-01T00:00:00.000000+00:00");
    }

    #[test]
    fn list_preserves_insertion_order() {
        let store = test_store();
        assert!(store.is_empty());

        let created: Vec<Case> = ["a", "b", "c"]
            .iter()
            .map(|p| store.create(new_case(p, "flu")))
            .collect();

        let listed = store.list();
        assert_eq!(listed.count, 3);
        assert_eq!(listed.items, created);
        assert_eq!(store.len(), 3);
    }

    #[test]
    fn get_returns_the_created_case() {
        let store = test_store();
        store.create(new_case("other", "cold"));
        let created = store.create(new_case("p1", "flu"));

        assert_eq!(store.get(created.id.as_str()).unwrap(), created);
    }

    #[test]
    fn get_and_update_unknown_id_are_not_found() {
        let store = test_store();
        store.create(new_case("p1", "flu"));

        assert!(matches!(store.get("missing"), Err(CaseError::NotFound(id)) if id == "missing"));
        assert!(matches!(
            store.update("missing", CaseUpdate::default()),
            Err(CaseError::NotFound(_))
        ));
        assert_eq!(store.len(), 1);
    }

    #[test]
    fn update_changes_only_supplied_fields() {
        let store = test_store();
        let before = store.create(new_case("p1", "flu"));

        let after = store
            .update(
                before.id.as_str(),
                CaseUpdate {
                    diagnosis: Some("covid".into()),
                    ..CaseUpdate::default()
                },
            )
            .unwrap();

        assert_eq!(after.diagnosis, "covid");
        assert_eq!(
            after.updated_at.as_deref(),
            Some("2024-01-01T00:00:01.000000+00:00")
        );
        assert_eq!(
            Case {
                diagnosis: before.diagnosis.clone(),
                updated_at: None,
                ..after.clone()
            },
            before
        );
        assert_eq!(store.get(before.id.as_str()).unwrap(), after);
    }

    #[test]
    fn empty_update_still_stamps_updated_at() {
        let store = test_store();
        let case = store.create(new_case("p1", "flu"));

        let first = store.update(case.id.as_str(), CaseUpdate::default()).unwrap();
        let second = store.update(case.id.as_str(), CaseUpdate::default()).unwrap();

        assert!(first.updated_at.is_some());
        assert_ne!(first.updated_at, second.updated_at);
        assert_eq!(second.diagnosis, "flu");
    }

    #[test]
    fn index_lookup_by_str_matches_case_id() {
        let store = test_store();
        let case = store.create(new_case("p1", "flu"));
        let key: &str = case.id.borrow();

        assert_eq!(key, case.id.as_str());
        assert_eq!(store.read().position(key), Some(0));
        assert_eq!(store.read().position(&key.to_uppercase()), None);
    }

    #[test]
    fn create_batch_appends_in_order() {
        let store = test_store();
        store.create(new_case("first", "flu"));

        let mut ingested = new_case("external", "ili");
        ingested.source = Some(CaseSource::ExternalStub);
        let added = store.create_batch(vec![ingested, new_case("second", "cold")]);

        assert_eq!(added.len(), 2);
        let listed = store.list();
        let patients: Vec<&str> = listed.items.iter().map(|c| c.patient_id.as_str()).collect();
        assert_eq!(patients, vec!["first", "external", "second"]);
        assert_eq!(listed.items[1].source, Some(CaseSource::ExternalStub));
        assert_eq!(store.get(added[1].id.as_str()).unwrap(), added[1]);
    }

    #[test]
    fn concurrent_creates_are_all_kept() {
        let store = Arc::new(test_store());
        let handles: Vec<_> = (0..8)
            .map(|t| {
                let store = Arc::clone(&store);
                std::thread::spawn(move || {
                    for i in 0..25 {
                        store.create(new_case(&format!("t{t}-{i}"), "flu"));
                    }
                })
            })
            .collect();
        for handle in handles {
            handle.join().unwrap();
        }

        let listed = store.list();
        assert_eq!(listed.count, 200);
        let ids: HashSet<_> = listed.items.iter().map(|c| c.id.clone()).collect();
        assert_eq!(ids.len(), 200);
    }
}
