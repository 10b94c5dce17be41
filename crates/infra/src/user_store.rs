//! In-memory `users` collection.
//!
//! Intended for tests/dev. Not optimized for performance.

use std::collections::{HashMap, VecDeque};
use std::sync::{Mutex, RwLock};

use chrono::Utc;
use uuid::Uuid;

use huddle_core::{SubjectId, UserId};
use huddle_session::{
    NewUserRecord, StoreError, UserOrder, UserQuery, UserRecord, UserRecordPatch, UserStore,
};

/// In-memory user store with scripted fault injection.
///
/// Enforces the subject-uniqueness invariant the way the backing table's
/// unique index on `auth_user_id` would: inserting a second record for the
/// same subject is a `Conflict`.
#[derive(Debug, Default)]
pub struct InMemoryUserStore {
    rows: RwLock<HashMap<Uuid, UserRecord>>,
    /// Errors consumed by the next store calls, in order (tests only).
    faults: Mutex<VecDeque<StoreError>>,
}

impl InMemoryUserStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Script the next store call to fail with `err`.
    pub fn fail_next(&self, err: StoreError) {
        if let Ok(mut faults) = self.faults.lock() {
            faults.push_back(err);
        }
    }

    fn take_fault(&self) -> Option<StoreError> {
        self.faults
            .lock()
            .ok()
            .and_then(|mut faults| faults.pop_front())
    }

    fn lock_err() -> StoreError {
        StoreError::Backend("lock poisoned".to_string())
    }
}

impl UserStore for InMemoryUserStore {
    fn find_by_subject(&self, subject: &SubjectId) -> Result<Option<UserRecord>, StoreError> {
        if let Some(err) = self.take_fault() {
            return Err(err);
        }

        let rows = self.rows.read().map_err(|_| Self::lock_err())?;
        Ok(rows
            .values()
            .find(|r| r.auth_user_id == subject.as_str())
            .cloned())
    }

    fn insert(&self, record: NewUserRecord) -> Result<UserRecord, StoreError> {
        if let Some(err) = self.take_fault() {
            return Err(err);
        }

        let mut rows = self.rows.write().map_err(|_| Self::lock_err())?;

        if rows
            .values()
            .any(|r| r.auth_user_id == record.auth_user_id)
        {
            return Err(StoreError::Conflict(format!(
                "user already exists for subject '{}'",
                record.auth_user_id
            )));
        }

        let stored = UserRecord {
            id: Uuid::now_v7(),
            auth_user_id: record.auth_user_id,
            email: record.email,
            full_name: record.full_name,
            role: record.role,
            user_type: record.user_type,
            bio: None,
            location: None,
            interests: Vec::new(),
            linkedin_url: None,
            twitter_url: None,
            website_url: None,
            avatar_url: None,
            created_at: Utc::now(),
            updated_at: None,
        };
        rows.insert(stored.id, stored.clone());
        Ok(stored)
    }

    fn update(&self, id: UserId, patch: UserRecordPatch) -> Result<(), StoreError> {
        if let Some(err) = self.take_fault() {
            return Err(err);
        }

        let mut rows = self.rows.write().map_err(|_| Self::lock_err())?;
        let row = rows
            .get_mut(id.as_uuid())
            .ok_or_else(|| StoreError::Backend(format!("no user record with id {id}")))?;

        if let Some(v) = patch.full_name {
            row.full_name = v;
        }
        if let Some(v) = patch.role {
            row.role = v;
        }
        if let Some(v) = patch.user_type {
            row.user_type = v;
        }
        if let Some(v) = patch.bio {
            row.bio = Some(v);
        }
        if let Some(v) = patch.location {
            row.location = Some(v);
        }
        if let Some(v) = patch.interests {
            row.interests = v;
        }
        if let Some(v) = patch.linkedin_url {
            row.linkedin_url = Some(v);
        }
        if let Some(v) = patch.twitter_url {
            row.twitter_url = Some(v);
        }
        if let Some(v) = patch.website_url {
            row.website_url = Some(v);
        }
        if let Some(v) = patch.avatar_url {
            row.avatar_url = Some(v);
        }
        row.updated_at = Some(Utc::now());
        Ok(())
    }

    fn list(&self, query: &UserQuery) -> Result<Vec<UserRecord>, StoreError> {
        if let Some(err) = self.take_fault() {
            return Err(err);
        }

        let rows = self.rows.read().map_err(|_| Self::lock_err())?;

        let mut records: Vec<UserRecord> = rows
            .values()
            .filter(|r| query.role.as_deref().is_none_or(|role| r.role == role))
            .filter(|r| {
                query.search.as_deref().is_none_or(|needle| {
                    let needle = needle.to_lowercase();
                    r.full_name.to_lowercase().contains(&needle)
                        || r.email.to_lowercase().contains(&needle)
                })
            })
            .cloned()
            .collect();

        match query.order {
            // UUIDv7 ids are time-ordered, which breaks created_at ties.
            UserOrder::NewestFirst => records.sort_by(|a, b| b.id.cmp(&a.id)),
            UserOrder::NameAsc => {
                records.sort_by(|a, b| a.full_name.to_lowercase().cmp(&b.full_name.to_lowercase()))
            }
        }

        if let Some(limit) = query.limit {
            records.truncate(limit);
        }

        Ok(records)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn new_record(subject: &str, name: &str) -> NewUserRecord {
        NewUserRecord {
            auth_user_id: subject.to_string(),
            email: format!("{subject}@example.com"),
            full_name: name.to_string(),
            role: "Talent".to_string(),
            user_type: "user".to_string(),
        }
    }

    #[test]
    fn insert_then_find_by_subject() {
        let store = InMemoryUserStore::new();
        let stored = store.insert(new_record("sub-1", "Alice")).unwrap();

        let found = store
            .find_by_subject(&SubjectId::new("sub-1"))
            .unwrap()
            .unwrap();
        assert_eq!(found, stored);

        assert!(store
            .find_by_subject(&SubjectId::new("sub-2"))
            .unwrap()
            .is_none());
    }

    #[test]
    fn duplicate_subject_insert_conflicts() {
        let store = InMemoryUserStore::new();
        store.insert(new_record("sub-1", "Alice")).unwrap();

        let err = store.insert(new_record("sub-1", "Imposter")).unwrap_err();
        assert!(matches!(err, StoreError::Conflict(_)));
    }

    #[test]
    fn update_applies_only_present_fields() {
        let store = InMemoryUserStore::new();
        let stored = store.insert(new_record("sub-1", "Alice")).unwrap();

        store
            .update(
                UserId::from_uuid(stored.id),
                UserRecordPatch {
                    bio: Some("hello".to_string()),
                    ..Default::default()
                },
            )
            .unwrap();

        let row = store
            .find_by_subject(&SubjectId::new("sub-1"))
            .unwrap()
            .unwrap();
        assert_eq!(row.bio.as_deref(), Some("hello"));
        assert_eq!(row.full_name, "Alice");
        assert!(row.updated_at.is_some());
    }

    #[test]
    fn update_unknown_id_fails() {
        let store = InMemoryUserStore::new();
        let err = store
            .update(UserId::new(), UserRecordPatch::default())
            .unwrap_err();
        assert!(matches!(err, StoreError::Backend(_)));
    }

    #[test]
    fn list_orders_newest_first_by_default() {
        let store = InMemoryUserStore::new();
        store.insert(new_record("sub-1", "First")).unwrap();
        store.insert(new_record("sub-2", "Second")).unwrap();
        store.insert(new_record("sub-3", "Third")).unwrap();

        let rows = store.list(&UserQuery::default()).unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["Third", "Second", "First"]);
    }

    #[test]
    fn list_orders_by_name_when_asked() {
        let store = InMemoryUserStore::new();
        store.insert(new_record("sub-1", "carol")).unwrap();
        store.insert(new_record("sub-2", "Alice")).unwrap();
        store.insert(new_record("sub-3", "bob")).unwrap();

        let rows = store
            .list(&UserQuery {
                order: UserOrder::NameAsc,
                ..Default::default()
            })
            .unwrap();
        let names: Vec<_> = rows.iter().map(|r| r.full_name.as_str()).collect();
        assert_eq!(names, ["Alice", "bob", "carol"]);
    }

    #[test]
    fn scripted_fault_fires_once() {
        let store = InMemoryUserStore::new();
        store.fail_next(StoreError::ClaimsExpired("expired".to_string()));

        let err = store
            .find_by_subject(&SubjectId::new("sub-1"))
            .unwrap_err();
        assert!(err.is_claims_expired());

        // Next call succeeds.
        assert!(store
            .find_by_subject(&SubjectId::new("sub-1"))
            .unwrap()
            .is_none());
    }
}
