//! Role resolution: one authoritative assignment per user.

use watchpost_core::UserId;

use crate::error::AuthError;
use crate::store::{CredentialStore, RoleAssignment};

/// Resolve the user's single role assignment.
///
/// The schema allows many assignment rows, but the authorization design
/// assumes exactly one meaningful role per user. That assumption is enforced
/// here instead of silently indexing the first row: zero rows is
/// [`AuthError::RoleNotAssigned`] (malformed account state, surfaced as an
/// authorization failure, never as a missing-user 404), more than one is
/// [`AuthError::AmbiguousAssignment`].
pub async fn resolve_role(
    store: &dyn CredentialStore,
    user_id: UserId,
) -> Result<RoleAssignment, AuthError> {
    let mut assignments = store.role_assignments(user_id).await?;

    match assignments.len() {
        0 => Err(AuthError::RoleNotAssigned),
        1 => Ok(assignments.remove(0)),
        n => {
            tracing::warn!(%user_id, count = n, "user holds multiple role assignments");
            Err(AuthError::AmbiguousAssignment)
        }
    }
}
