use std::error::Error;
use std::sync::Arc;

use backend::adapters::{MemoryGames, MemoryUsers};
use backend::entities::UserRole;
use backend::errors::domain::{ConflictKind, DomainError};
use backend::repos::games::GameStore;
use backend::repos::users::UserStore;
use backend::services::game_lifecycle::{GameLifecycle, MAX_COMMIT_ATTEMPTS};

use crate::support::flaky_games::FlakyGames;

async fn setup(conflicts: usize) -> (Arc<FlakyGames>, GameLifecycle, i64, i64) {
    let users: Arc<dyn UserStore> = Arc::new(MemoryUsers::new());
    let mm = users.create_user("mm", "x", UserRole::User).await.unwrap();
    let g = users.create_user("g", "x", UserRole::User).await.unwrap();

    let flaky = Arc::new(FlakyGames::new(Arc::new(MemoryGames::new()), 0));
    let lifecycle = GameLifecycle::new(flaky.clone() as Arc<dyn GameStore>, users.clone());
    let game = lifecycle
        .start(mm.id, "MULTIPLAYER", "MASTERMIND")
        .await
        .unwrap();
    lifecycle.join(g.id, game.id, "GUESSER").await.unwrap();

    // Conflicts only apply from here on
    let flaky_with_conflicts = Arc::new(FlakyGames::new(flaky as Arc<dyn GameStore>, conflicts));
    let lifecycle = GameLifecycle::new(flaky_with_conflicts.clone() as Arc<dyn GameStore>, users);
    (flaky_with_conflicts, lifecycle, game.id, mm.id)
}

#[tokio::test]
async fn version_conflicts_are_retried() -> Result<(), Box<dyn Error>> {
    let (store, lifecycle, game_id, mm) = setup(MAX_COMMIT_ATTEMPTS - 1).await;

    lifecycle.set_code(mm, game_id, "1234").await?;
    assert_eq!(store.save_attempts(), MAX_COMMIT_ATTEMPTS);
    Ok(())
}

#[tokio::test]
async fn persistent_conflicts_surface_after_max_attempts() -> Result<(), Box<dyn Error>> {
    let (store, lifecycle, game_id, mm) = setup(MAX_COMMIT_ATTEMPTS).await;

    let err = lifecycle.set_code(mm, game_id, "1234").await.unwrap_err();
    assert!(matches!(err, DomainError::Conflict(ConflictKind::OptimisticLock, _)));
    assert_eq!(store.save_attempts(), MAX_COMMIT_ATTEMPTS);

    let view = lifecycle.get(game_id).await?;
    assert!(view.guesses.is_empty());
    Ok(())
}
