//! Credential Store port.
//!
//! The authorization core never talks to a database directly; it consumes
//! this trait. Implementations (in-memory, Postgres) live in
//! `watchpost-store`.

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use watchpost_core::{OfficeId, OrganizationId, RoleId, UserId};

use crate::roles::RoleName;

/// A stored user identity.
///
/// `password_hash` is an opaque one-way hash; it must never be serialized
/// into API responses or logs.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UserRecord {
    pub id: UserId,
    pub email: String,
    pub password_hash: String,
    pub user_name: String,
    pub profile_image: Option<String>,
}

/// Role reference data.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoleRecord {
    pub id: RoleId,
    pub name: RoleName,
}

/// A user's role assignment, joined with its named role.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct RoleAssignment {
    pub user_id: UserId,
    pub role_id: RoleId,
    pub role: RoleName,
}

/// An organization owned by a single admin user.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct OrganizationRecord {
    pub id: OrganizationId,
    pub owner: UserId,
    pub name: String,
}

/// Links a staff-tier user to the office they operate in.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct OfficeAssignment {
    pub user_id: UserId,
    pub organization_id: OrganizationId,
    pub office_id: OfficeId,
}

/// Credential Store failure.
#[derive(Debug, Error)]
pub enum StoreError {
    /// The backend could not serve the lookup (connectivity, SQL, ...).
    #[error("credential store backend error: {0}")]
    Backend(String),

    /// A stored record could not be interpreted (e.g. a role name outside
    /// the closed set).
    #[error("corrupt credential record: {0}")]
    Corrupt(String),
}

/// Lookup operations the authorization core needs.
///
/// All operations are read-only from this crate's perspective; writes
/// (signup, assignment management) are the concern of the surrounding
/// platform.
#[async_trait]
pub trait CredentialStore: Send + Sync {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError>;

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError>;

    /// All role assignments for a user, joined with role names.
    ///
    /// The schema permits several rows per user; role resolution rejects
    /// anything other than exactly one (see [`crate::resolver`]).
    async fn role_assignments(&self, user_id: UserId) -> Result<Vec<RoleAssignment>, StoreError>;

    /// The exact (user, role) assignment pair, if still active.
    ///
    /// This is the re-verification read the access gate performs on every
    /// protected call.
    async fn find_role_assignment(
        &self,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<Option<RoleAssignment>, StoreError>;

    async fn find_role(&self, role_id: RoleId) -> Result<Option<RoleRecord>, StoreError>;

    async fn list_roles(&self) -> Result<Vec<RoleRecord>, StoreError>;

    /// The organization whose owning user is `user_id`, if any.
    async fn find_organization_by_owner(
        &self,
        user_id: UserId,
    ) -> Result<Option<OrganizationRecord>, StoreError>;

    /// The user's office assignment, if any.
    async fn find_office_assignment(
        &self,
        user_id: UserId,
    ) -> Result<Option<OfficeAssignment>, StoreError>;
}
