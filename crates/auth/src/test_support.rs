//! In-test credential store fixture.

use std::sync::Mutex;

use async_trait::async_trait;

use watchpost_core::{OfficeId, OrganizationId, RoleId, UserId};

use crate::roles::RoleName;
use crate::store::{
    CredentialStore, OfficeAssignment, OrganizationRecord, RoleAssignment, RoleRecord, StoreError,
    UserRecord,
};

/// Minimal credential store for unit tests.
///
/// Passwords are hashed at bcrypt's minimum cost to keep the suite fast.
#[derive(Default)]
pub struct StubStore {
    users: Mutex<Vec<UserRecord>>,
    roles: Mutex<Vec<RoleRecord>>,
    assignments: Mutex<Vec<RoleAssignment>>,
    organizations: Mutex<Vec<OrganizationRecord>>,
    offices: Mutex<Vec<OfficeAssignment>>,
}

impl StubStore {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn add_user(&self, email: &str, password: &str) -> UserRecord {
        let user = UserRecord {
            id: UserId::new(),
            email: email.to_string(),
            password_hash: bcrypt::hash(password, 4).unwrap(),
            user_name: email.split('@').next().unwrap_or("user").to_string(),
            profile_image: None,
        };
        self.users.lock().unwrap().push(user.clone());
        user
    }

    pub fn assign_role(&self, user_id: UserId, role: RoleName) -> RoleAssignment {
        let role_id = self.role_id_for(role);
        let assignment = RoleAssignment {
            user_id,
            role_id,
            role,
        };
        self.assignments.lock().unwrap().push(assignment);
        assignment
    }

    pub fn add_organization(&self, owner: UserId, name: &str) -> OrganizationRecord {
        let org = OrganizationRecord {
            id: OrganizationId::new(),
            owner,
            name: name.to_string(),
        };
        self.organizations.lock().unwrap().push(org.clone());
        org
    }

    pub fn assign_office(&self, user_id: UserId, organization_id: OrganizationId) -> OfficeAssignment {
        let office = OfficeAssignment {
            user_id,
            organization_id,
            office_id: OfficeId::new(),
        };
        self.offices.lock().unwrap().push(office);
        office
    }

    pub fn remove_role_assignment(&self, user_id: UserId, role_id: RoleId) {
        self.assignments
            .lock()
            .unwrap()
            .retain(|a| !(a.user_id == user_id && a.role_id == role_id));
    }

    pub fn remove_organization(&self, id: OrganizationId) {
        self.organizations.lock().unwrap().retain(|o| o.id != id);
    }

    fn role_id_for(&self, role: RoleName) -> RoleId {
        let mut roles = self.roles.lock().unwrap();
        if let Some(existing) = roles.iter().find(|r| r.name == role) {
            return existing.id;
        }
        let record = RoleRecord {
            id: RoleId::new(),
            name: role,
        };
        roles.push(record);
        record.id
    }
}

#[async_trait]
impl CredentialStore for StubStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.email == email)
            .cloned())
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        Ok(self
            .users
            .lock()
            .unwrap()
            .iter()
            .find(|u| u.id == id)
            .cloned())
    }

    async fn role_assignments(&self, user_id: UserId) -> Result<Vec<RoleAssignment>, StoreError> {
        Ok(self
            .assignments
            .lock()
            .unwrap()
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
            .assignments
            .lock()
            .unwrap()
            .iter()
            .find(|a| a.user_id == user_id && a.role_id == role_id)
            .copied())
    }

    async fn find_role(&self, role_id: RoleId) -> Result<Option<RoleRecord>, StoreError> {
        Ok(self
            .roles
            .lock()
            .unwrap()
            .iter()
            .find(|r| r.id == role_id)
            .copied())
    }

    async fn list_roles(&self) -> Result<Vec<RoleRecord>, StoreError> {
        Ok(self.roles.lock().unwrap().clone())
    }

    async fn find_organization_by_owner(
        &self,
        user_id: UserId,
    ) -> Result<Option<OrganizationRecord>, StoreError> {
        Ok(self
            .organizations
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.owner == user_id)
            .cloned())
    }

    async fn find_office_assignment(
        &self,
        user_id: UserId,
    ) -> Result<Option<OfficeAssignment>, StoreError> {
        Ok(self
            .offices
            .lock()
            .unwrap()
            .iter()
            .find(|o| o.user_id == user_id)
            .copied())
    }
}
