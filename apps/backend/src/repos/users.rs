//! User directory contract.

use async_trait::async_trait;
use serde::Serialize;
use time::OffsetDateTime;

use crate::entities::UserRole;
use crate::errors::domain::DomainError;

/// User domain model
#[derive(Debug, Clone, PartialEq)]
pub struct UserRecord {
    pub id: i64,
    pub username: String,
    pub password_hash: String,
    pub role: UserRole,
    pub created_at: OffsetDateTime,
}

/// Public participant summary embedded in session views.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct UserProfile {
    pub id: i64,
    pub username: String,
    pub role: UserRole,
}

impl From<&UserRecord> for UserProfile {
    fn from(user: &UserRecord) -> Self {
        Self {
            id: user.id,
            username: user.username.clone(),
            role: user.role,
        }
    }
}

#[async_trait]
pub trait UserStore: Send + Sync {
    /// Fails with `Conflict(UniqueUsername)` when the username exists.
    async fn create_user(
        &self,
        username: &str,
        password_hash: &str,
        role: UserRole,
    ) -> Result<UserRecord, DomainError>;

    async fn find_by_id(&self, user_id: i64) -> Result<Option<UserRecord>, DomainError>;

    async fn find_by_username(&self, username: &str) -> Result<Option<UserRecord>, DomainError>;

    /// Ordered by id.
    async fn list_users(&self) -> Result<Vec<UserRecord>, DomainError>;

    /// Replace the stored digest. Returns false when no such user existed.
    async fn update_password_hash(
        &self,
        user_id: i64,
        password_hash: &str,
    ) -> Result<bool, DomainError>;

    /// Returns false when no such user existed.
    async fn delete_by_username(&self, username: &str) -> Result<bool, DomainError>;

    async fn find_profile(&self, user_id: i64) -> Result<Option<UserProfile>, DomainError> {
        Ok(self
            .find_by_id(user_id)
            .await?
            .as_ref()
            .map(UserProfile::from))
    }
}
