//! Authorization error taxonomy.

use thiserror::Error;

use crate::store::StoreError;

/// Every way authentication or authorization can fail.
///
/// Bad email and bad password deliberately collapse into one
/// [`AuthError::InvalidCredentials`] message so callers cannot enumerate
/// accounts. Scope-configuration failures (`Missing*`) stay distinct: they
/// describe a broken account setup, not a bad guess. None of these are
/// transient; nothing here is retried.
#[derive(Debug, Error)]
pub enum AuthError {
    /// Unknown email or wrong password (indistinguishable by design).
    #[error("invalid credentials")]
    InvalidCredentials,

    /// An organization-scoped role with no organization row owned by the user.
    #[error("organization not found for this account")]
    MissingOrganization,

    /// An office-scoped role with an organization but no office assignment.
    #[error("office assignment not found for this account")]
    MissingOfficeAssignment,

    /// Token signature or expiry verification failed.
    #[error("invalid token")]
    InvalidToken,

    /// The token verified cryptographically but its claim set is structurally
    /// unusable (missing subject/role, or inconsistent scope claims).
    #[error("malformed token claims")]
    MalformedToken,

    /// The token's claimed role assignment no longer exists.
    #[error("role assignment is no longer active")]
    StaleAssignment,

    /// Authenticated, but the live role is not in the endpoint's required set.
    #[error("access denied, required role(s): {0}")]
    InsufficientRole(String),

    /// The account has no role assignment at all (malformed account state).
    #[error("account has no role assignment")]
    RoleNotAssigned,

    /// The account has more than one role assignment; the design assumes
    /// exactly one and refuses to pick one arbitrarily.
    #[error("account has multiple role assignments")]
    AmbiguousAssignment,

    /// Credential store failure.
    #[error(transparent)]
    Store(#[from] StoreError),

    /// Password hash computation/parsing failure (corrupt stored hash).
    #[error("password hash error")]
    PasswordHash(#[source] bcrypt::BcryptError),
}
