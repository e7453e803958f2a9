use std::sync::Arc;

use sea_orm::DatabaseConnection;

use super::security_config::SecurityConfig;
use crate::adapters::{GamesSea, MemoryGames, MemoryUsers, UsersSea};
use crate::repos::games::GameStore;
use crate::repos::users::UserStore;
use crate::services::game_lifecycle::GameLifecycle;
use crate::services::users::UserService;

/// Application state containing shared resources
#[derive(Clone)]
pub struct AppState {
    /// Database connection; `None` when running on in-memory stores
    pub db: Option<DatabaseConnection>,
    /// Security configuration including JWT settings
    pub security: SecurityConfig,
    pub users: Arc<dyn UserStore>,
    pub lifecycle: Arc<GameLifecycle>,
    pub accounts: Arc<UserService>,
}

impl AppState {
    /// SeaORM-backed stores on the given connection
    pub fn new(db: DatabaseConnection, security: SecurityConfig) -> Self {
        let games: Arc<dyn GameStore> = Arc::new(GamesSea::new(db.clone()));
        let users: Arc<dyn UserStore> = Arc::new(UsersSea::new(db.clone()));
        Self::from_stores(Some(db), security, games, users)
    }

    /// Process-local stores, no database
    pub fn without_db(security: SecurityConfig) -> Self {
        Self::from_stores(
            None,
            security,
            Arc::new(MemoryGames::new()),
            Arc::new(MemoryUsers::new()),
        )
    }

    /// Wire services over caller-provided stores.
    pub fn from_stores(
        db: Option<DatabaseConnection>,
        security: SecurityConfig,
        games: Arc<dyn GameStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        Self {
            db,
            security,
            lifecycle: Arc::new(GameLifecycle::new(games, users.clone())),
            accounts: Arc::new(UserService::new(users.clone())),
            users,
        }
    }

    pub fn db(&self) -> Option<&DatabaseConnection> {
        self.db.as_ref()
    }
}
