//! Account glue: registration, login and admin user management.

use std::sync::Arc;
use std::time::SystemTime;

use tracing::{debug, info, warn};
use unicode_normalization::UnicodeNormalization;

use crate::auth::jwt::mint_access_token;
use crate::auth::password::{hash_password, needs_rehash, verify_password};
use crate::entities::UserRole;
use crate::error::AppError;
use crate::errors::domain::{DomainError, NotFoundKind, ValidationKind};
use crate::logging::pii::MaskedUsername;
use crate::repos::users::{UserRecord, UserStore};
use crate::state::security_config::SecurityConfig;

pub const MAX_USERNAME_LEN: usize = 64;

/// NFKC-normalize, trim and lowercase a username. Blank input is rejected.
pub fn normalize_username(raw: &str) -> Result<String, DomainError> {
    let normalized: String = raw.nfkc().collect::<String>().trim().to_lowercase();
    if normalized.is_empty() {
        return Err(DomainError::invalid(
            ValidationKind::Username,
            "Username is required",
        ));
    }
    if normalized.chars().count() > MAX_USERNAME_LEN {
        return Err(DomainError::invalid(
            ValidationKind::Username,
            format!("Username must be at most {MAX_USERNAME_LEN} characters"),
        ));
    }
    Ok(normalized)
}

fn require_password(raw: &str) -> Result<&str, DomainError> {
    if raw.trim().is_empty() {
        return Err(DomainError::invalid(
            ValidationKind::Password,
            "Password is required",
        ));
    }
    Ok(raw)
}

pub struct UserService {
    users: Arc<dyn UserStore>,
}

impl UserService {
    pub fn new(users: Arc<dyn UserStore>) -> Self {
        Self { users }
    }

    pub async fn register(&self, username: &str, password: &str) -> Result<UserRecord, AppError> {
        let username = normalize_username(username)?;
        let password = require_password(password)?;

        let user = self
            .users
            .create_user(&username, &hash_password(password)?, UserRole::User)
            .await?;
        info!(user_id = user.id, username = %MaskedUsername(&user.username), "user registered");
        Ok(user)
    }

    /// Check credentials and mint an access token.
    ///
    /// Unknown users and wrong passwords are indistinguishable to the caller.
    pub async fn login(
        &self,
        username: &str,
        password: &str,
        security: &SecurityConfig,
    ) -> Result<String, AppError> {
        let username = normalize_username(username)?;
        let password = require_password(password)?;

        let Some(user) = self.users.find_by_username(&username).await? else {
            warn!(username = %MaskedUsername(&username), "login for unknown user");
            return Err(AppError::invalid_credentials());
        };
        if !verify_password(password, &user.password_hash) {
            warn!(user_id = user.id, "login with wrong password");
            return Err(AppError::invalid_credentials());
        }
        if needs_rehash(&user.password_hash) {
            self.users
                .update_password_hash(user.id, &hash_password(password)?)
                .await?;
            info!(user_id = user.id, "password digest upgraded to argon2id");
        }

        let token = mint_access_token(user.id, &user.username, SystemTime::now(), security)?;
        debug!(user_id = user.id, "access token issued");
        Ok(token)
    }

    pub async fn list(&self) -> Result<Vec<UserRecord>, AppError> {
        Ok(self.users.list_users().await?)
    }

    pub async fn delete(&self, username: &str) -> Result<(), AppError> {
        let username = normalize_username(username)?;
        if !self.users.delete_by_username(&username).await? {
            return Err(DomainError::not_found(
                NotFoundKind::User,
                format!("User '{username}' not found"),
            )
            .into());
        }
        info!(username = %MaskedUsername(&username), "user deleted");
        Ok(())
    }

    /// Create the bootstrap admin if no user with that name exists yet.
    ///
    /// An existing user of that name is left untouched, whatever its role.
    pub async fn ensure_admin(&self, username: &str, password: &str) -> Result<bool, AppError> {
        let username = normalize_username(username)?;
        let password = require_password(password)?;

        if self.users.find_by_username(&username).await?.is_some() {
            debug!(username = %MaskedUsername(&username), "bootstrap admin already present");
            return Ok(false);
        }
        let user = self
            .users
            .create_user(&username, &hash_password(password)?, UserRole::Admin)
            .await?;
        info!(user_id = user.id, "bootstrap admin created");
        Ok(true)
    }
}
