//! Scope classification: which contextual ids a role's token must carry.

use watchpost_core::{OfficeId, OrganizationId, UserId};

use crate::error::AuthError;
use crate::roles::RoleName;
use crate::store::CredentialStore;

/// The shape of scope a role is entitled to, independent of any user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeKind {
    Base,
    Organization,
    Office,
}

/// A concrete scope decision for one user.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ScopeDecision {
    /// No contextual ids beyond basic identity.
    Base,
    /// The caller administers this organization.
    Organization(OrganizationId),
    /// The caller operates inside this office of this organization.
    Office(OrganizationId, OfficeId),
}

impl ScopeDecision {
    pub fn kind(&self) -> ScopeKind {
        match self {
            ScopeDecision::Base => ScopeKind::Base,
            ScopeDecision::Organization(_) => ScopeKind::Organization,
            ScopeDecision::Office(_, _) => ScopeKind::Office,
        }
    }
}

/// Decide the claim scope for `role` held by `user_id`.
///
/// Ordered policy, no fallthrough ambiguity:
/// 1. organization-scoped roles require an organization owned by the user,
///    else [`AuthError::MissingOrganization`];
/// 2. office-scoped roles additionally require an office assignment, else
///    [`AuthError::MissingOfficeAssignment`] (the organization lookup runs
///    first, so a missing organization wins);
/// 3. everything else is base scope.
pub async fn classify(
    store: &dyn CredentialStore,
    role: RoleName,
    user_id: UserId,
) -> Result<ScopeDecision, AuthError> {
    match role.scope_kind() {
        ScopeKind::Base => Ok(ScopeDecision::Base),
        ScopeKind::Organization => {
            let org = store
                .find_organization_by_owner(user_id)
                .await?
                .ok_or(AuthError::MissingOrganization)?;
            Ok(ScopeDecision::Organization(org.id))
        }
        ScopeKind::Office => {
            let org = store
                .find_organization_by_owner(user_id)
                .await?
                .ok_or(AuthError::MissingOrganization)?;
            let office = store
                .find_office_assignment(user_id)
                .await?
                .ok_or(AuthError::MissingOfficeAssignment)?;
            Ok(ScopeDecision::Office(org.id, office.office_id))
        }
    }
}
