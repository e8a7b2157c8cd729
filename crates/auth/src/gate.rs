//! The access gate: per-call token validation and role enforcement.

use std::sync::Arc;

use serde::Serialize;

use watchpost_core::{OfficeId, OrganizationId, RoleId, UserId};

use crate::error::AuthError;
use crate::roles::{RoleName, RoleSet};
use crate::scope::ScopeDecision;
use crate::store::CredentialStore;
use crate::token::JwtCodec;

/// The identity handed to downstream handlers after the gate allows a call.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct AuthenticatedPrincipal {
    pub user_id: UserId,
    pub email: String,
    pub role_id: RoleId,
    pub role: RoleName,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub organization_id: Option<OrganizationId>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub office_id: Option<OfficeId>,
}

/// Enforcement point for protected calls.
///
/// The gate does not trust signed claims alone: on every call it re-reads
/// the claimed role assignment (and any claimed organization/office links)
/// from the Credential Store, so a role revoked after issuance is caught
/// immediately instead of surviving until the 24-hour expiry. That read per
/// protected call is a deliberate trade and must not be optimized away.
pub struct AccessGate {
    store: Arc<dyn CredentialStore>,
    codec: Arc<JwtCodec>,
}

impl AccessGate {
    pub fn new(store: Arc<dyn CredentialStore>, codec: Arc<JwtCodec>) -> Self {
        Self { store, codec }
    }

    /// Validate `token` against `required` and resolve the caller's identity.
    ///
    /// Returns `Ok(None)` when `required` is empty: no restriction is
    /// declared, so no check is performed at all, not even token decoding.
    /// Otherwise, in order:
    ///
    /// 1. decode and cryptographically verify the token
    ///    ([`AuthError::InvalidToken`] / [`AuthError::MalformedToken`]);
    /// 2. reject structurally inconsistent scope claims
    ///    ([`AuthError::MalformedToken`]);
    /// 3. re-verify the claimed (user, role) assignment against the store
    ///    ([`AuthError::StaleAssignment`]);
    /// 4. re-verify any claimed organization/office links still exist;
    ///    dangling claims are rejected, not trusted
    ///    ([`AuthError::StaleAssignment`]);
    /// 5. check the live role against `required`
    ///    ([`AuthError::InsufficientRole`]).
    pub async fn authorize(
        &self,
        token: &str,
        required: &RoleSet,
    ) -> Result<Option<AuthenticatedPrincipal>, AuthError> {
        if required.is_empty() {
            return Ok(None);
        }

        let claims = self.codec.decode(token)?;
        let scope = claims.scope().ok_or(AuthError::MalformedToken)?;

        let assignment = self
            .store
            .find_role_assignment(claims.sub, claims.role_id)
            .await?
            .ok_or(AuthError::StaleAssignment)?;

        self.verify_scope_links(claims.sub, &scope).await?;

        if !required.contains(assignment.role) {
            tracing::debug!(
                user_id = %claims.sub,
                role = %assignment.role,
                required = %required.describe(),
                "role not in required set"
            );
            return Err(AuthError::InsufficientRole(required.describe()));
        }

        Ok(Some(AuthenticatedPrincipal {
            user_id: claims.sub,
            email: claims.email,
            role_id: claims.role_id,
            role: assignment.role,
            organization_id: claims.organization_id,
            office_id: claims.office_id,
        }))
    }

    /// Organization/office claims must still resolve to live records owned
    /// by or assigned to the subject.
    async fn verify_scope_links(
        &self,
        user_id: UserId,
        scope: &ScopeDecision,
    ) -> Result<(), AuthError> {
        let claimed_org = match *scope {
            ScopeDecision::Base => return Ok(()),
            ScopeDecision::Organization(org) => org,
            ScopeDecision::Office(org, _) => org,
        };

        let org = self
            .store
            .find_organization_by_owner(user_id)
            .await?
            .ok_or(AuthError::StaleAssignment)?;
        if org.id != claimed_org {
            return Err(AuthError::StaleAssignment);
        }

        if let ScopeDecision::Office(_, claimed_office) = *scope {
            let office = self
                .store
                .find_office_assignment(user_id)
                .await?
                .ok_or(AuthError::StaleAssignment)?;
            if office.office_id != claimed_office {
                return Err(AuthError::StaleAssignment);
            }
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use chrono::Utc;

    use crate::roles::RoleName;
    use crate::test_support::StubStore;

    struct Fixture {
        store: Arc<StubStore>,
        gate: AccessGate,
        codec: Arc<JwtCodec>,
    }

    fn fixture() -> Fixture {
        let store = Arc::new(StubStore::new());
        let codec = Arc::new(JwtCodec::new(b"test-secret"));
        let gate = AccessGate::new(store.clone() as Arc<dyn CredentialStore>, codec.clone());
        Fixture { store, gate, codec }
    }

    #[tokio::test]
    async fn empty_required_set_allows_without_any_check() {
        let f = fixture();

        let decision = f
            .gate
            .authorize("complete-garbage", &RoleSet::none())
            .await
            .unwrap();

        assert!(decision.is_none());
    }

    #[tokio::test]
    async fn malformed_token_is_denied_when_a_check_is_required() {
        let f = fixture();

        let err = f
            .gate
            .authorize("complete-garbage", &RoleSet::any())
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::InvalidToken));
    }

    #[tokio::test]
    async fn live_assignment_in_required_set_is_allowed() {
        let f = fixture();
        let user = f.store.add_user("m@x.com", "secret");
        let assignment = f.store.assign_role(user.id, RoleName::Manager);
        let org = f.store.add_organization(user.id, "Acme Security");
        let office = f.store.assign_office(user.id, org.id);

        let token = f
            .codec
            .issue(
                &user,
                assignment.role_id,
                &ScopeDecision::Office(org.id, office.office_id),
                Utc::now(),
            )
            .unwrap();

        let principal = f
            .gate
            .authorize(&token, &RoleSet::from(RoleName::Manager))
            .await
            .unwrap()
            .expect("required set is non-empty");

        assert_eq!(principal.user_id, user.id);
        assert_eq!(principal.role, RoleName::Manager);
        assert_eq!(principal.organization_id, Some(org.id));
        assert_eq!(principal.office_id, Some(office.office_id));
    }

    #[tokio::test]
    async fn revoked_assignment_is_denied_despite_valid_signature() {
        let f = fixture();
        let user = f.store.add_user("s@x.com", "secret");
        let assignment = f.store.assign_role(user.id, RoleName::Staff);

        let token = f
            .codec
            .issue(&user, assignment.role_id, &ScopeDecision::Base, Utc::now())
            .unwrap();

        f.store.remove_role_assignment(user.id, assignment.role_id);

        let err = f
            .gate
            .authorize(&token, &RoleSet::from(RoleName::Staff))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::StaleAssignment));
    }

    #[tokio::test]
    async fn dangling_organization_claim_is_denied() {
        let f = fixture();
        let user = f.store.add_user("admin@x.com", "secret");
        let assignment = f.store.assign_role(user.id, RoleName::OrganizationAdmin);
        let org = f.store.add_organization(user.id, "Acme Security");

        let token = f
            .codec
            .issue(
                &user,
                assignment.role_id,
                &ScopeDecision::Organization(org.id),
                Utc::now(),
            )
            .unwrap();

        f.store.remove_organization(org.id);

        let err = f
            .gate
            .authorize(&token, &RoleSet::from(RoleName::OrganizationAdmin))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::StaleAssignment));
    }

    #[tokio::test]
    async fn role_outside_required_set_is_denied() {
        let f = fixture();
        let user = f.store.add_user("g@x.com", "secret");
        let assignment = f.store.assign_role(user.id, RoleName::Guard);

        let token = f
            .codec
            .issue(&user, assignment.role_id, &ScopeDecision::Base, Utc::now())
            .unwrap();

        let err = f
            .gate
            .authorize(&token, &RoleSet::from(RoleName::SuperAdmin))
            .await
            .unwrap_err();

        match err {
            AuthError::InsufficientRole(required) => assert_eq!(required, "superAdmin"),
            other => panic!("expected InsufficientRole, got {other:?}"),
        }
    }

    #[tokio::test]
    async fn office_claim_without_organization_claim_is_malformed() {
        use jsonwebtoken::{Algorithm, EncodingKey, Header};

        let f = fixture();
        let user = f.store.add_user("x@x.com", "secret");
        let assignment = f.store.assign_role(user.id, RoleName::Staff);

        // No issuance path produces this shape; forge it directly.
        let claims = serde_json::json!({
            "sub": user.id,
            "email": user.email,
            "roleId": assignment.role_id,
            "officeId": watchpost_core::OfficeId::new(),
            "iat": Utc::now().timestamp(),
            "exp": (Utc::now() + chrono::Duration::hours(1)).timestamp(),
        });
        let token = jsonwebtoken::encode(
            &Header::new(Algorithm::HS256),
            &claims,
            &EncodingKey::from_secret(b"test-secret"),
        )
        .unwrap();

        let err = f
            .gate
            .authorize(&token, &RoleSet::from(RoleName::Staff))
            .await
            .unwrap_err();

        assert!(matches!(err, AuthError::MalformedToken));
    }
}
