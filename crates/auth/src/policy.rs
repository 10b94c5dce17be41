//! Pure authorization predicates over a `User` snapshot.
//!
//! - No IO
//! - No panics
//! - Absence of a user is always least-privileged (`false` everywhere)
//!
//! These predicates gate navigation, feature affordances and admin-only
//! views; they are recomputed against whatever snapshot the session layer
//! last published, never cached beyond it.

use crate::{User, UserType};

/// True iff the user holds admin-or-above privilege.
pub fn is_admin(user: Option<&User>) -> bool {
    matches!(
        user.map(|u| u.user_type),
        Some(UserType::Admin) | Some(UserType::SuperAdmin)
    )
}

/// True iff the user holds the highest privilege level.
pub fn is_super_admin(user: Option<&User>) -> bool {
    matches!(user.map(|u| u.user_type), Some(UserType::SuperAdmin))
}

/// Whether `actor` may change `target`'s privilege level.
///
/// Only super admins may, and never on themselves — self-demotion through
/// this path would be an accidental lockout. Unpersisted (fallback) users
/// have no id and can neither act nor be targeted.
pub fn can_change_privilege(actor: &User, target: &User) -> bool {
    let (Some(actor_id), Some(target_id)) = (actor.id, target.id) else {
        return false;
    };
    is_super_admin(Some(actor)) && actor_id != target_id
}

/// Whether the admin panel is visible to this user.
pub fn can_view_admin_panel(user: Option<&User>) -> bool {
    is_admin(user)
}

// ─────────────────────────────────────────────────────────────────────────────
// Tests
// ─────────────────────────────────────────────────────────────────────────────
