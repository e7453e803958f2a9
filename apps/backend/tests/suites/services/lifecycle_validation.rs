use std::error::Error;

use backend::entities::GameStatus;
use backend::errors::domain::{
    DomainError, ForbiddenKind, NotFoundKind, StateKind, ValidationKind,
};

use crate::support::factory::{create_test_user, started_multiplayer};
use crate::support::test_state::memory_state;

#[tokio::test]
async fn start_rejects_unknown_type_role_and_vs_computer() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let u = create_test_user(&state, "u").await;

    let err = state.lifecycle.start(u.id(), "TEAM", "GUESSER").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(ValidationKind::GameType, _)));

    let err = state.lifecycle.start(u.id(), "SINGLE", "REFEREE").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(ValidationKind::Role, _)));

    let err = state
        .lifecycle
        .start(u.id(), "VS_COMPUTER", "GUESSER")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(ValidationKind::GameType, _)));
    Ok(())
}

#[tokio::test]
async fn join_errors_follow_state_then_slot() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let mm = create_test_user(&state, "mm").await;
    let g = create_test_user(&state, "g").await;
    let late = create_test_user(&state, "late").await;

    let game = state
        .lifecycle
        .start(mm.id(), "MULTIPLAYER", "MASTERMIND")
        .await?;

    let err = state.lifecycle.join(mm.id(), game.id, "GUESSER").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(StateKind::AlreadyJoined, _)));

    let err = state.lifecycle.join(g.id(), game.id, "MASTERMIND").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(StateKind::RoleTaken, _)));

    state.lifecycle.stop(mm.id(), game.id).await?;
    let err = state.lifecycle.join(late.id(), game.id, "GUESSER").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(StateKind::GameFinished, _)));
    Ok(())
}

#[tokio::test]
async fn unknown_game_is_not_found() {
    let state = memory_state().await;
    let u = create_test_user(&state, "u").await;

    let err = state.lifecycle.get(999).await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
    let err = state.lifecycle.guess(u.id(), 999, "1234").await.unwrap_err();
    assert!(matches!(err, DomainError::NotFound(NotFoundKind::Game, _)));
}

#[tokio::test]
async fn only_the_mastermind_sets_the_code_once() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let mm = create_test_user(&state, "mm").await;
    let g = create_test_user(&state, "g").await;
    let game = started_multiplayer(&state, &mm, &g).await;

    let err = state.lifecycle.set_code(g.id(), game.id, "1234").await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(ForbiddenKind::NotMastermind, _)));

    let err = state.lifecycle.set_code(mm.id(), game.id, "12a4").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidArgument(ValidationKind::Code, _)));

    state.lifecycle.set_code(mm.id(), game.id, "1234").await?;
    let err = state.lifecycle.set_code(mm.id(), game.id, "5678").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(StateKind::CodeAlreadySet, _)));
    Ok(())
}

#[tokio::test]
async fn non_mastermind_set_code_is_forbidden_in_every_state() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let mm = create_test_user(&state, "mm").await;
    let g = create_test_user(&state, "g").await;
    let stranger = create_test_user(&state, "x").await;

    let waiting = state
        .lifecycle
        .start(mm.id(), "MULTIPLAYER", "MASTERMIND")
        .await?;
    assert_eq!(waiting.status, GameStatus::Waiting);

    let coded = started_multiplayer(&state, &mm, &g).await;
    state.lifecycle.set_code(mm.id(), coded.id, "1234").await?;

    let finished = started_multiplayer(&state, &mm, &g).await;
    state.lifecycle.stop(mm.id(), finished.id).await?;

    for game_id in [waiting.id, coded.id, finished.id] {
        for caller in [g.id(), stranger.id()] {
            let err = state
                .lifecycle
                .set_code(caller, game_id, "5678")
                .await
                .unwrap_err();
            assert!(
                matches!(err, DomainError::Forbidden(ForbiddenKind::NotMastermind, _)),
                "game {game_id} caller {caller}: {err:?}"
            );
        }
    }
    Ok(())
}

#[tokio::test]
async fn guess_before_code_is_rejected() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let mm = create_test_user(&state, "mm").await;
    let g = create_test_user(&state, "g").await;
    let game = started_multiplayer(&state, &mm, &g).await;

    let err = state.lifecycle.guess(g.id(), game.id, "1234").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(StateKind::CodeNotSet, _)));
    Ok(())
}

#[tokio::test]
async fn guess_in_waiting_game_is_not_started() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let u = create_test_user(&state, "u").await;

    let game = state.lifecycle.start(u.id(), "SINGLE", "GUESSER").await?;
    let err = state.lifecycle.guess(u.id(), game.id, "1234").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(StateKind::GameNotStarted, _)));
    Ok(())
}

#[tokio::test]
async fn rejected_guesses_leave_no_trace() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let mm = create_test_user(&state, "mm").await;
    let g = create_test_user(&state, "g").await;
    let stranger = create_test_user(&state, "x").await;
    let game = started_multiplayer(&state, &mm, &g).await;
    state.lifecycle.set_code(mm.id(), game.id, "1234").await?;

    for bad in ["123", "12345", "12a4", "", " 1234"] {
        let err = state.lifecycle.guess(g.id(), game.id, bad).await.unwrap_err();
        assert!(
            matches!(err, DomainError::InvalidArgument(ValidationKind::Guess, _)),
            "{bad:?}"
        );
    }

    let err = state
        .lifecycle
        .guess(stranger.id(), game.id, "1234")
        .await
        .unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(ForbiddenKind::NotGuesser, _)));

    let view = state.lifecycle.get(game.id).await?;
    assert!(view.guesses.is_empty());
    assert_eq!(view.status, GameStatus::Started);
    Ok(())
}

#[tokio::test]
async fn finished_game_rejects_everything() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let mm = create_test_user(&state, "mm").await;
    let g = create_test_user(&state, "g").await;
    let game = started_multiplayer(&state, &mm, &g).await;
    state.lifecycle.set_code(mm.id(), game.id, "1234").await?;
    state.lifecycle.stop(g.id(), game.id).await?;

    let err = state.lifecycle.guess(g.id(), game.id, "1234").await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(StateKind::GameFinished, _)));
    let err = state.lifecycle.stop(mm.id(), game.id).await.unwrap_err();
    assert!(matches!(err, DomainError::InvalidState(StateKind::GameFinished, _)));
    Ok(())
}

#[tokio::test]
async fn outsiders_cannot_stop() -> Result<(), Box<dyn Error>> {
    let state = memory_state().await;
    let mm = create_test_user(&state, "mm").await;
    let g = create_test_user(&state, "g").await;
    let stranger = create_test_user(&state, "x").await;
    let game = started_multiplayer(&state, &mm, &g).await;

    let err = state.lifecycle.stop(stranger.id(), game.id).await.unwrap_err();
    assert!(matches!(err, DomainError::Forbidden(ForbiddenKind::NotParticipant, _)));
    assert_eq!(state.lifecycle.get(game.id).await?.status, GameStatus::Started);
    Ok(())
}
