//! `watchpost-auth` — identity and authorization core.
//!
//! This crate owns the security-sensitive path of the platform: credential
//! verification, role resolution, claim-scope selection, token minting, and
//! the per-call access gate. It is intentionally decoupled from HTTP and
//! storage: persistence is reached only through the [`CredentialStore`] port.

pub mod claims;
pub mod error;
pub mod gate;
pub mod login;
pub mod password;
pub mod resolver;
pub mod roles;
pub mod scope;
pub mod store;
pub mod token;

#[cfg(test)]
pub(crate) mod test_support;

pub use claims::AccessClaims;
pub use error::AuthError;
pub use gate::{AccessGate, AuthenticatedPrincipal};
pub use login::{Authenticator, LoginOutcome};
pub use resolver::resolve_role;
pub use roles::{RoleName, RoleSet, UnknownRole};
pub use scope::{ScopeDecision, ScopeKind, classify};
pub use store::{
    CredentialStore, OfficeAssignment, OrganizationRecord, RoleAssignment, RoleRecord, StoreError,
    UserRecord,
};
pub use token::JwtCodec;
