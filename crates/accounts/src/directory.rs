//! Member directory browsing and search.

use huddle_auth::{Role, User};
use huddle_core::{DomainError, SubjectId};
use huddle_session::{mapping, UserOrder, UserQuery, UserStore};

use crate::error::AccountError;

/// Typed directory filter, translated to the store's query at the boundary.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct DirectoryQuery {
    pub role: Option<Role>,
    /// Case-insensitive substring match over full name and email.
    pub search: Option<String>,
    pub order: UserOrder,
    pub limit: Option<usize>,
}

/// List members matching the query.
pub fn directory<S>(store: &S, query: &DirectoryQuery) -> Result<Vec<User>, AccountError>
where
    S: UserStore,
{
    let records = store.list(&UserQuery {
        role: query.role.map(|r| r.as_str().to_string()),
        search: query.search.clone(),
        order: query.order,
        limit: query.limit,
    })?;

    Ok(records.iter().map(mapping::to_user).collect())
}

/// Look up a single member by their identity-provider subject.
///
/// Distinct from the synchronizer's own lookup: this is the profile-view
/// path, so a missing record is a `NotFound` for the caller rather than a
/// trigger for lazy creation.
pub fn find_member<S>(store: &S, subject: &SubjectId) -> Result<User, AccountError>
where
    S: UserStore,
{
    let record = store
        .find_by_subject(subject)?
        .ok_or_else(DomainError::not_found)?;
    Ok(mapping::to_user(&record))
}
