use core::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::scope::ScopeKind;

/// The closed set of role names the platform knows about.
///
/// Roles are deliberately an enum rather than opaque strings: every variant
/// carries an explicit [`ScopeKind`] mapping, so adding a role forces a scope
/// decision at compile time instead of silently defaulting to base scope.
///
/// Wire names (serde and `Display`) are the camelCase strings stored in the
/// role table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum RoleName {
    #[serde(rename = "superAdmin")]
    SuperAdmin,
    #[serde(rename = "organizationAdmin")]
    OrganizationAdmin,
    #[serde(rename = "manager")]
    Manager,
    #[serde(rename = "staff")]
    Staff,
    #[serde(rename = "guard")]
    Guard,
    #[serde(rename = "client")]
    Client,
}

/// A role name outside the closed set.
#[derive(Debug, Error, Clone, PartialEq, Eq)]
#[error("unknown role name: {0}")]
pub struct UnknownRole(pub String);

impl RoleName {
    pub const ALL: [RoleName; 6] = [
        RoleName::SuperAdmin,
        RoleName::OrganizationAdmin,
        RoleName::Manager,
        RoleName::Staff,
        RoleName::Guard,
        RoleName::Client,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            RoleName::SuperAdmin => "superAdmin",
            RoleName::OrganizationAdmin => "organizationAdmin",
            RoleName::Manager => "manager",
            RoleName::Staff => "staff",
            RoleName::Guard => "guard",
            RoleName::Client => "client",
        }
    }

    /// The claim scope this role is issued with.
    ///
    /// Exactly two roles receive enriched scopes: organization admins carry
    /// their organization id, managers additionally carry their office id.
    /// Everything else (superAdmin included) collapses to base scope.
    pub fn scope_kind(&self) -> ScopeKind {
        match self {
            RoleName::OrganizationAdmin => ScopeKind::Organization,
            RoleName::Manager => ScopeKind::Office,
            RoleName::SuperAdmin
            | RoleName::Staff
            | RoleName::Guard
            | RoleName::Client => ScopeKind::Base,
        }
    }

    /// Whether an organization may grant this role to its own people.
    ///
    /// Platform-level roles (superAdmin, organizationAdmin) and externally
    /// provisioned ones (guard, client) are excluded.
    pub fn organization_assignable(&self) -> bool {
        !matches!(
            self,
            RoleName::SuperAdmin
                | RoleName::OrganizationAdmin
                | RoleName::Guard
                | RoleName::Client
        )
    }
}

impl core::fmt::Display for RoleName {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for RoleName {
    type Err = UnknownRole;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        RoleName::ALL
            .iter()
            .copied()
            .find(|r| r.as_str() == s)
            .ok_or_else(|| UnknownRole(s.to_string()))
    }
}

/// The set of role names an endpoint requires.
///
/// An **empty** set means no restriction check is performed at all; the
/// endpoint behaves as public. "Authenticated but unrestricted" is expressed
/// with [`RoleSet::any`] (every role listed), not with emptiness.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct RoleSet(Vec<RoleName>);

impl RoleSet {
    /// No requirement: the access gate skips the check entirely.
    pub fn none() -> Self {
        Self(Vec::new())
    }

    pub fn of(roles: impl IntoIterator<Item = RoleName>) -> Self {
        Self(roles.into_iter().collect())
    }

    /// Every role: any authenticated caller with a live assignment passes.
    pub fn any() -> Self {
        Self(RoleName::ALL.to_vec())
    }

    pub fn is_empty(&self) -> bool {
        self.0.is_empty()
    }

    pub fn contains(&self, role: RoleName) -> bool {
        self.0.contains(&role)
    }

    /// Comma-joined wire names, for denial messages.
    pub fn describe(&self) -> String {
        self.0
            .iter()
            .map(|r| r.as_str())
            .collect::<Vec<_>>()
            .join(", ")
    }
}

impl From<RoleName> for RoleSet {
    fn from(role: RoleName) -> Self {
        Self(vec![role])
    }
}

impl<const N: usize> From<[RoleName; N]> for RoleSet {
    fn from(roles: [RoleName; N]) -> Self {
        Self(roles.to_vec())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn wire_names_round_trip() {
        for role in RoleName::ALL {
            assert_eq!(role.as_str().parse::<RoleName>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_rejected() {
        assert!("auditor".parse::<RoleName>().is_err());
    }

    #[test]
    fn only_two_roles_receive_enriched_scopes() {
        let enriched: Vec<_> = RoleName::ALL
            .iter()
            .filter(|r| r.scope_kind() != ScopeKind::Base)
            .collect();
        assert_eq!(
            enriched,
            vec![&RoleName::OrganizationAdmin, &RoleName::Manager]
        );
    }

    #[test]
    fn organization_assignable_excludes_platform_roles() {
        assert!(RoleName::Manager.organization_assignable());
        assert!(RoleName::Staff.organization_assignable());
        assert!(!RoleName::SuperAdmin.organization_assignable());
        assert!(!RoleName::OrganizationAdmin.organization_assignable());
        assert!(!RoleName::Guard.organization_assignable());
        assert!(!RoleName::Client.organization_assignable());
    }

    #[test]
    fn empty_role_set_is_distinct_from_any() {
        assert!(RoleSet::none().is_empty());
        assert!(!RoleSet::any().is_empty());
        assert!(RoleSet::any().contains(RoleName::Client));
    }
}
