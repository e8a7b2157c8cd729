//! Access token claim set.

use chrono::{DateTime, Duration, Utc};
use serde::{Deserialize, Serialize};

use watchpost_core::{OfficeId, OrganizationId, RoleId, UserId};

use crate::scope::ScopeDecision;
use crate::store::UserRecord;

/// The payload embedded in a signed access token.
///
/// Three shapes exist, selected by the role's scope at issuance:
/// base (`sub`/`email`/`roleId`), organization (base + `organizationId`),
/// and office (organization + `officeId`). Optional ids are omitted from
/// the wire form, never encoded as null.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct AccessClaims {
    /// Subject: the authenticated user.
    pub sub: UserId,

    pub email: String,

    #[serde(rename = "roleId")]
    pub role_id: RoleId,

    #[serde(
        rename = "organizationId",
        default,
        skip_serializing_if = "Option::is_none"
    )]
    pub organization_id: Option<OrganizationId>,

    #[serde(rename = "officeId", default, skip_serializing_if = "Option::is_none")]
    pub office_id: Option<OfficeId>,

    /// Issued-at, unix seconds.
    pub iat: i64,

    /// Expiry, unix seconds.
    pub exp: i64,
}

impl AccessClaims {
    /// Build the claim set for a user under the given scope decision.
    pub fn for_scope(
        user: &UserRecord,
        role_id: RoleId,
        scope: &ScopeDecision,
        issued_at: DateTime<Utc>,
        ttl: Duration,
    ) -> Self {
        let (organization_id, office_id) = match *scope {
            ScopeDecision::Base => (None, None),
            ScopeDecision::Organization(org) => (Some(org), None),
            ScopeDecision::Office(org, office) => (Some(org), Some(office)),
        };

        Self {
            sub: user.id,
            email: user.email.clone(),
            role_id,
            organization_id,
            office_id,
            iat: issued_at.timestamp(),
            exp: (issued_at + ttl).timestamp(),
        }
    }

    /// Recover the scope shape this claim set encodes.
    ///
    /// `None` means the claims are structurally inconsistent (an office id
    /// without an organization id); no issuance path produces that, so the
    /// token must be treated as malformed.
    pub fn scope(&self) -> Option<ScopeDecision> {
        match (self.organization_id, self.office_id) {
            (None, None) => Some(ScopeDecision::Base),
            (Some(org), None) => Some(ScopeDecision::Organization(org)),
            (Some(org), Some(office)) => Some(ScopeDecision::Office(org, office)),
            (None, Some(_)) => None,
        }
    }
}
