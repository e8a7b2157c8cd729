//! In-memory credential store for tests/dev.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;

use watchpost_auth::{
    CredentialStore, OfficeAssignment, OrganizationRecord, RoleAssignment, RoleName, RoleRecord,
    StoreError, UserRecord, password,
};
use watchpost_core::{OfficeId, OrganizationId, RoleId, UserId};

#[derive(Default)]
struct Tables {
    users: HashMap<UserId, UserRecord>,
    roles: HashMap<RoleId, RoleRecord>,
    assignments: Vec<RoleAssignment>,
    organizations: HashMap<OrganizationId, OrganizationRecord>,
    offices: Vec<OfficeAssignment>,
}

/// In-memory credential store.
///
/// Backs development mode (no `DATABASE_URL`) and the black-box API tests.
/// The mutation helpers exist so tests can set up accounts and then revoke
/// assignments/organizations to exercise the gate's staleness checks.
#[derive(Default)]
pub struct InMemoryCredentialStore {
    inner: RwLock<Tables>,
}

impl InMemoryCredentialStore {
    pub fn new() -> Self {
        let store = Self::default();
        store.seed_roles();
        store
    }

    /// Insert the closed role catalog (idempotent).
    fn seed_roles(&self) {
        let mut tables = self.inner.write().unwrap();
        for name in RoleName::ALL {
            if !tables.roles.values().any(|r| r.name == name) {
                let record = RoleRecord {
                    id: RoleId::new(),
                    name,
                };
                tables.roles.insert(record.id, record);
            }
        }
    }

    pub fn role_id(&self, name: RoleName) -> RoleId {
        self.inner
            .read()
            .unwrap()
            .roles
            .values()
            .find(|r| r.name == name)
            .map(|r| r.id)
            .expect("role catalog is seeded at construction")
    }

    /// Create a user with a freshly hashed password.
    pub fn insert_user(
        &self,
        email: &str,
        plain_password: &str,
        user_name: &str,
    ) -> Result<UserRecord, StoreError> {
        let hash = password::hash(plain_password)
            .map_err(|e| StoreError::Backend(e.to_string()))?;
        let user = UserRecord {
            id: UserId::new(),
            email: email.to_string(),
            password_hash: hash,
            user_name: user_name.to_string(),
            profile_image: None,
        };
        self.inner
            .write()
            .unwrap()
            .users
            .insert(user.id, user.clone());
        Ok(user)
    }

    pub fn assign_role(&self, user_id: UserId, role: RoleName) -> RoleAssignment {
        let role_id = self.role_id(role);
        let assignment = RoleAssignment {
            user_id,
            role_id,
            role,
        };
        self.inner.write().unwrap().assignments.push(assignment);
        assignment
    }

    pub fn remove_role_assignment(&self, user_id: UserId, role_id: RoleId) {
        self.inner
            .write()
            .unwrap()
            .assignments
            .retain(|a| !(a.user_id == user_id && a.role_id == role_id));
    }

    pub fn insert_organization(&self, owner: UserId, name: &str) -> OrganizationRecord {
        let org = OrganizationRecord {
            id: OrganizationId::new(),
            owner,
            name: name.to_string(),
        };
        self.inner
            .write()
            .unwrap()
            .organizations
            .insert(org.id, org.clone());
        org
    }

    pub fn remove_organization(&self, id: OrganizationId) {
        self.inner.write().unwrap().organizations.remove(&id);
    }

    pub fn assign_office(
        &self,
        user_id: UserId,
        organization_id: OrganizationId,
    ) -> OfficeAssignment {
        let office = OfficeAssignment {
            user_id,
            organization_id,
            office_id: OfficeId::new(),
        };
        self.inner.write().unwrap().offices.push(office);
        office
    }

    pub fn remove_office_assignment(&self, user_id: UserId) {
        self.inner
            .write()
            .unwrap()
            .offices
            .retain(|o| o.user_id != user_id);
    }

    fn tables(&self) -> Result<std::sync::RwLockReadGuard<'_, Tables>, StoreError> {
        self.inner
            .read()
            .map_err(|_| StoreError::Backend("credential store lock poisoned".to_string()))
    }
}

#[async_trait]
impl CredentialStore for InMemoryCredentialStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .tables()?
            .users
            .values()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self.tables()?.users.get(&id).cloned())
    }

    async fn role_assignments(&self, user_id: UserId) -> Result<Vec<RoleAssignment>, StoreError> {
        Ok(self
            .tables()?
            .assignments
            .iter()
            .filter(|a| a.user_id == user_id)
            .copied()
            .collect())
    }

    async fn find_role_assignment(
        &self,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<Option<RoleAssignment>, StoreError> {
        Ok(self
            .tables()?
            .assignments
            .iter()
            .find(|a| a.user_id == user_id && a.role_id == role_id)
            .copied())
    }

    async fn find_role(&self, role_id: RoleId) -> Result<Option<RoleRecord>, StoreError> {
        Ok(self.tables()?.roles.get(&role_id).copied())
    }

    async fn list_roles(&self) -> Result<Vec<RoleRecord>, StoreError> {
        let mut roles: Vec<_> = self.tables()?.roles.values().copied().collect();
        roles.sort_by_key(|r| r.name.as_str());
        Ok(roles)
    }

    async fn find_organization_by_owner(
        &self,
        user_id: UserId,
    ) -> Result<Option<OrganizationRecord>, StoreError> {
        Ok(self
            .tables()?
            .organizations
            .values()
            .find(|o| o.owner == user_id)
            .cloned())
    }

    async fn find_office_assignment(
        &self,
        user_id: UserId,
    ) -> Result<Option<OfficeAssignment>, StoreError> {
        Ok(self
            .tables()?
            .offices
            .iter()
            .find(|o| o.user_id == user_id)
            .copied())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[tokio::test]
    async fn role_catalog_is_seeded() {
        let store = InMemoryCredentialStore::new();
        let roles = store.list_roles().await.unwrap();
        assert_eq!(roles.len(), RoleName::ALL.len());
    }

    #[tokio::test]
    async fn email_lookup_finds_inserted_user() {
        let store = InMemoryCredentialStore::new();
        let user = store.insert_user("a@x.com", "secret", "A").unwrap();

        let found = store.find_user_by_email("a@x.com").await.unwrap().unwrap();
        assert_eq!(found.id, user.id);
        assert!(store.find_user_by_email("b@x.com").await.unwrap().is_none());

        let by_id = store.find_user_by_id(user.id).await.unwrap().unwrap();
        assert_eq!(by_id.email, "a@x.com");
    }

    #[tokio::test]
    async fn revoking_an_assignment_removes_the_exact_pair() {
        let store = InMemoryCredentialStore::new();
        let user = store.insert_user("a@x.com", "secret", "A").unwrap();
        let assignment = store.assign_role(user.id, RoleName::Manager);

        assert!(store
            .find_role_assignment(user.id, assignment.role_id)
            .await
            .unwrap()
            .is_some());

        store.remove_role_assignment(user.id, assignment.role_id);

        assert!(store
            .find_role_assignment(user.id, assignment.role_id)
            .await
            .unwrap()
            .is_none());
    }

    #[tokio::test]
    async fn office_assignment_round_trip() {
        let store = InMemoryCredentialStore::new();
        let user = store.insert_user("m@x.com", "secret", "M").unwrap();
        let org = store.insert_organization(user.id, "Acme Security");
        let office = store.assign_office(user.id, org.id);

        let found = store.find_office_assignment(user.id).await.unwrap().unwrap();
        assert_eq!(found.office_id, office.office_id);
        assert_eq!(found.organization_id, org.id);

        store.remove_office_assignment(user.id);
        assert!(store.find_office_assignment(user.id).await.unwrap().is_none());
    }
}
