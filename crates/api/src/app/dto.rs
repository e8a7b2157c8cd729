//! Request/response DTOs and JSON mapping.

use serde::{Deserialize, Serialize};

use watchpost_auth::{RoleRecord, UserRecord};
use watchpost_core::{RoleId, UserId};

#[derive(Debug, Deserialize)]
pub struct LoginRequest {
    pub email: String,
    pub password: String,
}

/// Public view of a user. The password hash never leaves the store layer.
#[derive(Debug, Serialize)]
pub struct UserDto {
    pub id: UserId,
    pub email: String,
    #[serde(rename = "userName")]
    pub user_name: String,
    #[serde(rename = "profileImage", skip_serializing_if = "Option::is_none")]
    pub profile_image: Option<String>,
}

impl From<&UserRecord> for UserDto {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            email: user.email.clone(),
            user_name: user.user_name.clone(),
            profile_image: user.profile_image.clone(),
        }
    }
}

#[derive(Debug, Serialize)]
pub struct LoginResponse {
    pub token: String,
    pub user: UserDto,
}

#[derive(Debug, Serialize)]
pub struct RoleDto {
    pub id: RoleId,
    #[serde(rename = "roleName")]
    pub role_name: String,
}

impl From<&RoleRecord> for RoleDto {
    fn from(role: &RoleRecord) -> Self {
        Self {
            id: role.id,
            role_name: role.name.as_str().to_string(),
        }
    }
}
