use std::sync::Arc;

use crate::config::db::{DbProfile, StoreBackend};
use crate::error::AppError;
use crate::infra::db::bootstrap_db;
use crate::repos::games::GameStore;
use crate::repos::users::UserStore;
use crate::state::app_state::AppState;
use crate::state::security_config::SecurityConfig;

/// Builder for creating AppState instances (used in both tests and main)
pub struct StateBuilder {
    security_config: SecurityConfig,
    db_profile: Option<DbProfile>,
    stores: Option<(Arc<dyn GameStore>, Arc<dyn UserStore>)>,
}

impl StateBuilder {
    pub fn new() -> Self {
        Self {
            security_config: SecurityConfig::default(),
            db_profile: None,
            stores: None,
        }
    }

    pub fn with_db(mut self, profile: DbProfile) -> Self {
        self.db_profile = Some(profile);
        self
    }

    pub fn with_backend(self, backend: StoreBackend) -> Self {
        match backend {
            StoreBackend::Database(profile) => self.with_db(profile),
            StoreBackend::Memory => self,
        }
    }

    /// Inject custom stores; takes precedence over any database profile.
    pub fn with_stores(
        mut self,
        games: Arc<dyn GameStore>,
        users: Arc<dyn UserStore>,
    ) -> Self {
        self.stores = Some((games, users));
        self
    }

    pub fn with_security(mut self, security_config: SecurityConfig) -> Self {
        self.security_config = security_config;
        self
    }

    pub async fn build(self) -> Result<AppState, AppError> {
        if let Some((games, users)) = self.stores {
            return Ok(AppState::from_stores(
                None,
                self.security_config,
                games,
                users,
            ));
        }
        if let Some(profile) = self.db_profile {
            // single entrypoint: connect + migrate
            let conn = bootstrap_db(profile).await?;
            Ok(AppState::new(conn, self.security_config))
        } else {
            Ok(AppState::without_db(self.security_config))
        }
    }
}

impl Default for StateBuilder {
    fn default() -> Self {
        Self::new()
    }
}

pub fn build_state() -> StateBuilder {
    StateBuilder::new()
}
