//! Per-endpoint role requirements.
//!
//! An explicit registration table, built once at startup and consulted
//! directly by the gate middleware. Routes are keyed by method plus the
//! router's path pattern (what `MatchedPath` reports), so path parameters
//! are handled naturally.

use std::collections::HashMap;

use axum::http::Method;

use watchpost_auth::RoleSet;

#[derive(Default)]
pub struct EndpointRequirements {
    table: HashMap<(Method, &'static str), RoleSet>,
}

impl EndpointRequirements {
    pub fn new() -> Self {
        Self::default()
    }

    /// Declare the required role set for one route.
    pub fn require(
        mut self,
        method: Method,
        path: &'static str,
        roles: impl Into<RoleSet>,
    ) -> Self {
        self.table.insert((method, path), roles.into());
        self
    }

    /// The declared requirement, or the empty set when nothing was declared.
    ///
    /// An empty set means no restriction check is performed at all; the
    /// route behaves as public.
    pub fn lookup(&self, method: &Method, matched_path: &str) -> RoleSet {
        self.table
            .get(&(method.clone(), matched_path))
            .cloned()
            .unwrap_or_default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use watchpost_auth::RoleName;

    #[test]
    fn declared_routes_resolve_their_role_set() {
        let reqs = EndpointRequirements::new()
            .require(Method::GET, "/roles", RoleName::SuperAdmin);

        let set = reqs.lookup(&Method::GET, "/roles");
        assert!(set.contains(RoleName::SuperAdmin));
        assert!(!set.contains(RoleName::Staff));
    }

    #[test]
    fn undeclared_routes_resolve_to_the_empty_set() {
        let reqs = EndpointRequirements::new();
        assert!(reqs.lookup(&Method::GET, "/anything").is_empty());
    }

    #[test]
    fn method_is_part_of_the_key() {
        let reqs = EndpointRequirements::new()
            .require(Method::POST, "/roles", RoleName::SuperAdmin);

        assert!(reqs.lookup(&Method::GET, "/roles").is_empty());
    }
}
