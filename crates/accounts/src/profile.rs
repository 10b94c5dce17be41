//! Self-service profile editing.

use huddle_auth::{User, UserPatch};
use huddle_core::DomainError;
use huddle_session::{mapping, UserStore};

use crate::error::AccountError;

/// Apply a profile edit for the actor's own record.
///
/// Role is editable here (it is self-described); privilege level is not —
/// see [`crate::admin::change_privilege`]. Store failures are returned to
/// the caller; the published session state is untouched either way.
pub fn update_profile<S>(store: &S, actor: &User, patch: &UserPatch) -> Result<(), AccountError>
where
    S: UserStore,
{
    let Some(actor_id) = actor.id else {
        return Err(DomainError::invariant("profile edits require a persisted user").into());
    };

    if patch.is_empty() {
        return Err(DomainError::validation("empty profile patch").into());
    }

    store.update(actor_id, mapping::patch_to_record_patch(patch))?;
    tracing::info!(user_id = %actor_id, "profile updated");
    Ok(())
}

#[cfg(test)]
mod tests {
    use chrono::Utc;
    use huddle_auth::{Role, UserType};
    use huddle_core::{SubjectId, UserId};
    use huddle_infra::InMemoryUserStore;
    use huddle_session::{NewUserRecord, StoreError, UserQuery};

    use super::*;

    fn seeded(store: &InMemoryUserStore, subject: &str) -> User {
        let record = store
            .insert(NewUserRecord {
                auth_user_id: subject.to_string(),
                email: format!("{subject}@example.com"),
                full_name: subject.to_string(),
                role: "Talent".to_string(),
                user_type: "user".to_string(),
            })
            .unwrap();
        mapping::to_user(&record)
    }

    #[test]
    fn profile_edit_updates_role_and_fields() {
        let store = InMemoryUserStore::new();
        let actor = seeded(&store, "sub-1");

        let patch = UserPatch {
            role: Some(Role::Solopreneur),
            bio: Some("indie".to_string()),
            ..Default::default()
        };
        update_profile(&store, &actor, &patch).unwrap();

        let rows = store.list(&UserQuery::default()).unwrap();
        assert_eq!(rows[0].role, "Solopreneur");
        assert_eq!(rows[0].bio.as_deref(), Some("indie"));
        // Privilege never moves through this path.
        assert_eq!(rows[0].user_type, "user");
    }

    #[test]
    fn fallback_actor_cannot_edit() {
        let store = InMemoryUserStore::new();
        let actor = User {
            id: None,
            subject: SubjectId::new("sub-x"),
            email: String::new(),
            full_name: "User".to_string(),
            role: Role::Talent,
            user_type: UserType::User,
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

        let patch = UserPatch {
            bio: Some("nope".to_string()),
            ..Default::default()
        };
        let err = update_profile(&store, &actor, &patch).unwrap_err();
        assert!(matches!(err, AccountError::Domain(_)));
    }

    #[test]
    fn empty_patch_is_rejected() {
        let store = InMemoryUserStore::new();
        let actor = seeded(&store, "sub-1");
        let err = update_profile(&store, &actor, &UserPatch::default()).unwrap_err();
        assert!(matches!(
            err,
            AccountError::Domain(DomainError::Validation(_))
        ));
    }

    #[test]
    fn store_failure_is_surfaced_not_swallowed() {
        let store = InMemoryUserStore::new();
        let actor = seeded(&store, "sub-1");
        store.fail_next(StoreError::Backend("down".to_string()));

        let patch = UserPatch {
            bio: Some("bio".to_string()),
            ..Default::default()
        };
        let err = update_profile(&store, &actor, &patch).unwrap_err();
        assert!(matches!(err, AccountError::Store(StoreError::Backend(_))));
    }

    #[test]
    fn unknown_actor_id_is_a_store_error() {
        let store = InMemoryUserStore::new();
        let mut actor = seeded(&store, "sub-1");
        actor.id = Some(UserId::new());

        let patch = UserPatch {
            bio: Some("bio".to_string()),
            ..Default::default()
        };
        assert!(update_profile(&store, &actor, &patch).is_err());
    }
}
