use std::error::Error;
use std::sync::Arc;

use backend::adapters::{MemoryGames, MemoryUsers};
use backend::config::db::{DbProfile, StoreBackend};
use backend::infra::state::build_state;
use backend::repos::users::UserStore;

use crate::support::test_state::test_security;

#[tokio::test]
async fn memory_backend_has_no_connection() -> Result<(), Box<dyn Error>> {
    let state = build_state()
        .with_backend(StoreBackend::Memory)
        .with_security(test_security())
        .build()
        .await?;
    assert!(state.db().is_none());
    Ok(())
}

#[tokio::test]
async fn injected_stores_win_over_db_profile() -> Result<(), Box<dyn Error>> {
    let users = Arc::new(MemoryUsers::new());
    let state = build_state()
        .with_db(DbProfile::InMemory)
        .with_stores(Arc::new(MemoryGames::new()), users.clone())
        .build()
        .await?;
    assert!(state.db().is_none());

    state.accounts.register("zoe", "pw").await?;
    assert!(users.find_by_username("zoe").await?.is_some());
    Ok(())
}

#[tokio::test]
async fn sqlite_profile_runs_migrations() -> Result<(), Box<dyn Error>> {
    let state = build_state()
        .with_backend(StoreBackend::Database(DbProfile::InMemory))
        .build()
        .await?;
    let db = state.db().expect("connection");
    assert_eq!(migration::count_applied_migrations(db).await?, 1);
    Ok(())
}
