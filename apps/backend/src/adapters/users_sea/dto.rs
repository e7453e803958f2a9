//! DTOs for users_sea adapter.

use crate::entities::{users, UserRole};
use crate::repos::users::UserRecord;

/// DTO for creating a new user.
#[derive(Debug, Clone)]
pub struct UserCreate {
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
}

impl UserCreate {
    pub fn new(username: impl Into<String>, password_hash: impl Into<String>) -> Self {
        Self {
            username: username.into(),
            password_hash: password_hash.into(),
            role: UserRole::User,
        }
    }

    pub fn with_role(mut self, role: UserRole) -> Self {
        self.role = role;
        self
    }
}

impl From<users::Model> for UserRecord {
    fn from(model: users::Model) -> Self {
        Self {
            id: model.id,
            username: model.username,
            password_hash: model.password_hash,
            role: model.role,
            created_at: model.created_at,
        }
    }
}
