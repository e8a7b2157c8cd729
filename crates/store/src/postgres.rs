//! Postgres-backed credential store.
//!
//! Expected schema (managed by the platform's migrations):
//!
//! ```sql
//! users         (id uuid pk, email text unique, password_hash text,
//!                user_name text, profile_image text null)
//! roles         (id uuid pk, role_name text unique)
//! user_roles    (user_id uuid fk, role_id uuid fk)
//! organizations (id uuid pk, user_id uuid fk, organization_name text)
//! user_offices  (user_id uuid fk, organization_id uuid fk, office_id uuid fk)
//! ```
//!
//! Every operation is a single parameterized read; transactional isolation
//! is the pool's concern, not this module's.

use core::str::FromStr;

use async_trait::async_trait;
use sqlx::{PgPool, Row, postgres::PgRow};
use uuid::Uuid;

use watchpost_auth::{
    CredentialStore, OfficeAssignment, OrganizationRecord, RoleAssignment, RoleName, RoleRecord,
    StoreError, UserRecord,
};
use watchpost_core::{OfficeId, OrganizationId, RoleId, UserId};

pub struct PostgresCredentialStore {
    pool: PgPool,
}

impl PostgresCredentialStore {
    pub fn new(pool: PgPool) -> Self {
        Self { pool }
    }
}

fn backend(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.to_string())
}

fn parse_role_name(raw: &str) -> Result<RoleName, StoreError> {
    RoleName::from_str(raw).map_err(|e| StoreError::Corrupt(e.to_string()))
}

fn user_from_row(row: &PgRow) -> Result<UserRecord, StoreError> {
    Ok(UserRecord {
        id: UserId::from_uuid(row.try_get::<Uuid, _>("id").map_err(backend)?),
        email: row.try_get("email").map_err(backend)?,
        password_hash: row.try_get("password_hash").map_err(backend)?,
        user_name: row.try_get("user_name").map_err(backend)?,
        profile_image: row.try_get("profile_image").map_err(backend)?,
    })
}

fn assignment_from_row(row: &PgRow) -> Result<RoleAssignment, StoreError> {
    Ok(RoleAssignment {
        user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id").map_err(backend)?),
        role_id: RoleId::from_uuid(row.try_get::<Uuid, _>("role_id").map_err(backend)?),
        role: parse_role_name(row.try_get::<&str, _>("role_name").map_err(backend)?)?,
    })
}

#[async_trait]
impl CredentialStore for PostgresCredentialStore {
    async fn find_user_by_email(&self, email: &str) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, user_name, profile_image
            FROM users
            WHERE email = $1
            "#,
        )
        .bind(email)
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn find_user_by_id(&self, id: UserId) -> Result<Option<UserRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, email, password_hash, user_name, profile_image
            FROM users
            WHERE id = $1
            "#,
        )
        .bind(id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.as_ref().map(user_from_row).transpose()
    }

    async fn role_assignments(&self, user_id: UserId) -> Result<Vec<RoleAssignment>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT ur.user_id, ur.role_id, r.role_name
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            WHERE ur.user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.iter().map(assignment_from_row).collect()
    }

    async fn find_role_assignment(
        &self,
        user_id: UserId,
        role_id: RoleId,
    ) -> Result<Option<RoleAssignment>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT ur.user_id, ur.role_id, r.role_name
            FROM user_roles ur
            JOIN roles r ON r.id = ur.role_id
            WHERE ur.user_id = $1 AND ur.role_id = $2
            "#,
        )
        .bind(user_id.as_uuid())
        .bind(role_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.as_ref().map(assignment_from_row).transpose()
    }

    async fn find_role(&self, role_id: RoleId) -> Result<Option<RoleRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, role_name
            FROM roles
            WHERE id = $1
            "#,
        )
        .bind(role_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(|row| {
            Ok(RoleRecord {
                id: RoleId::from_uuid(row.try_get::<Uuid, _>("id").map_err(backend)?),
                name: parse_role_name(row.try_get::<&str, _>("role_name").map_err(backend)?)?,
            })
        })
        .transpose()
    }

    async fn list_roles(&self) -> Result<Vec<RoleRecord>, StoreError> {
        let rows = sqlx::query(
            r#"
            SELECT id, role_name
            FROM roles
            ORDER BY role_name
            "#,
        )
        .fetch_all(&self.pool)
        .await
        .map_err(backend)?;

        rows.into_iter()
            .map(|row| {
                Ok(RoleRecord {
                    id: RoleId::from_uuid(row.try_get::<Uuid, _>("id").map_err(backend)?),
                    name: parse_role_name(row.try_get::<&str, _>("role_name").map_err(backend)?)?,
                })
            })
            .collect()
    }

    async fn find_organization_by_owner(
        &self,
        user_id: UserId,
    ) -> Result<Option<OrganizationRecord>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT id, user_id, organization_name
            FROM organizations
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(|row| {
            Ok(OrganizationRecord {
                id: row
                    .try_get::<Uuid, _>("id")
                    .map(OrganizationId::from_uuid)
                    .map_err(backend)?,
                owner: UserId::from_uuid(row.try_get::<Uuid, _>("user_id").map_err(backend)?),
                name: row.try_get("organization_name").map_err(backend)?,
            })
        })
        .transpose()
    }

    async fn find_office_assignment(
        &self,
        user_id: UserId,
    ) -> Result<Option<OfficeAssignment>, StoreError> {
        let row = sqlx::query(
            r#"
            SELECT user_id, organization_id, office_id
            FROM user_offices
            WHERE user_id = $1
            "#,
        )
        .bind(user_id.as_uuid())
        .fetch_optional(&self.pool)
        .await
        .map_err(backend)?;

        row.map(|row| {
            Ok(OfficeAssignment {
                user_id: UserId::from_uuid(row.try_get::<Uuid, _>("user_id").map_err(backend)?),
                organization_id: row
                    .try_get::<Uuid, _>("organization_id")
                    .map(OrganizationId::from_uuid)
                    .map_err(backend)?,
                office_id: row
                    .try_get::<Uuid, _>("office_id")
                    .map(OfficeId::from_uuid)
                    .map_err(backend)?,
            })
        })
        .transpose()
    }
}
