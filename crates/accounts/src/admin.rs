//! Admin-only privilege management.

use huddle_auth::{policy, User, UserType};
use huddle_core::DomainError;
use huddle_session::{UserRecordPatch, UserStore};

use crate::error::AccountError;

/// Change `target`'s privilege level.
///
/// Gated by [`policy::can_change_privilege`]: only a super admin may change
/// privilege, and never their own (self-lockout guard). Store failures are
/// surfaced to the actor and leave the target untouched.
pub fn change_privilege<S>(
    store: &S,
    actor: &User,
    target: &User,
    new_type: UserType,
) -> Result<(), AccountError>
where
    S: UserStore,
{
    if !policy::can_change_privilege(actor, target) {
        tracing::warn!(
            actor = %actor.subject,
            target = %target.subject,
            "privilege change denied"
        );
        return Err(DomainError::Unauthorized.into());
    }

    // can_change_privilege only holds when both ids are present.
    let target_id = target
        .id
        .ok_or_else(|| DomainError::invariant("target has no persisted record"))?;

    store.update(
        target_id,
        UserRecordPatch {
            user_type: Some(new_type.as_str().to_string()),
            ..Default::default()
        },
    )?;

    tracing::info!(
        actor = %actor.subject,
        target = %target.subject,
        new_type = %new_type,
        "privilege level changed"
    );
    Ok(())
}

#[cfg(test)]
mod tests {
    use huddle_infra::InMemoryUserStore;
    use huddle_session::{mapping, NewUserRecord, StoreError, UserQuery};

    use super::*;

    fn seeded(store: &InMemoryUserStore, subject: &str, user_type: &str) -> User {
        let record = store
            .insert(NewUserRecord {
                auth_user_id: subject.to_string(),
                email: format!("{subject}@example.com"),
                full_name: subject.to_string(),
                role: "Talent".to_string(),
                user_type: user_type.to_string(),
            })
            .unwrap();
        mapping::to_user(&record)
    }

    #[test]
    fn super_admin_promotes_a_member() {
        let store = InMemoryUserStore::new();
        let actor = seeded(&store, "boss", "super_admin");
        let target = seeded(&store, "member", "user");

        change_privilege(&store, &actor, &target, UserType::Admin).unwrap();

        let rows = store.list(&UserQuery::default()).unwrap();
        let row = rows.iter().find(|r| r.auth_user_id == "member").unwrap();
        assert_eq!(row.user_type, "admin");
    }

    #[test]
    fn plain_admin_is_denied() {
        let store = InMemoryUserStore::new();
        let actor = seeded(&store, "admin", "admin");
        let target = seeded(&store, "member", "user");

        let err = change_privilege(&store, &actor, &target, UserType::Admin).unwrap_err();
        assert!(matches!(
            err,
            AccountError::Domain(DomainError::Unauthorized)
        ));
    }

    #[test]
    fn self_change_is_denied_even_for_super_admin() {
        let store = InMemoryUserStore::new();
        let actor = seeded(&store, "boss", "super_admin");

        let err = change_privilege(&store, &actor, &actor, UserType::User).unwrap_err();
        assert!(matches!(
            err,
            AccountError::Domain(DomainError::Unauthorized)
        ));

        // Target untouched.
        let rows = store.list(&UserQuery::default()).unwrap();
        assert_eq!(rows[0].user_type, "super_admin");
    }

    #[test]
    fn store_failure_leaves_target_unchanged() {
        let store = InMemoryUserStore::new();
        let actor = seeded(&store, "boss", "super_admin");
        let target = seeded(&store, "member", "user");
        store.fail_next(StoreError::Backend("down".to_string()));

        let err = change_privilege(&store, &actor, &target, UserType::Admin).unwrap_err();
        assert!(matches!(err, AccountError::Store(_)));

        let rows = store.list(&UserQuery::default()).unwrap();
        let row = rows.iter().find(|r| r.auth_user_id == "member").unwrap();
        assert_eq!(row.user_type, "user");
    }
}
