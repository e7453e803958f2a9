// Unit tests for error mapping - pure domain logic without HTTP or database dependencies
use crate::errors::domain::{
    ConflictKind, DomainError, ForbiddenKind, InfraErrorKind, NotFoundKind, StateKind,
    ValidationKind,
};
use crate::{AppError, ErrorCode};

#[test]
fn maps_invalid_argument_to_400() {
    let de = DomainError::invalid(ValidationKind::Guess, "guess must be four digits");
    let app: AppError = de.into();
    assert_eq!(app.code(), ErrorCode::InvalidGuess);
    assert_eq!(app.status().as_u16(), 400);

    let other: AppError = DomainError::invalid(ValidationKind::Other("x".into()), "x").into();
    assert_eq!(other.code(), ErrorCode::ValidationError);
}

#[test]
fn maps_forbidden_to_403() {
    let app: AppError = DomainError::forbidden(ForbiddenKind::NotMastermind, "no").into();
    assert_eq!(app.code().as_str(), "NOT_MASTERMIND");
    assert_eq!(app.status().as_u16(), 403);
}

#[test]
fn maps_invalid_state_to_409() {
    let app: AppError = DomainError::invalid_state(StateKind::GameFinished, "done").into();
    assert_eq!(app.code().as_str(), "GAME_FINISHED");
    assert_eq!(app.status().as_u16(), 409);
    assert!(matches!(app, AppError::InvalidState { .. }));
}

#[test]
fn maps_conflicts() {
    let lock: AppError = DomainError::conflict(ConflictKind::OptimisticLock, "stale").into();
    assert_eq!(lock.code().as_str(), "OPTIMISTIC_LOCK");
    assert_eq!(lock.status().as_u16(), 409);

    let unique: AppError = DomainError::conflict(ConflictKind::UniqueUsername, "taken").into();
    assert_eq!(unique.code().as_str(), "USERNAME_TAKEN");

    let other: AppError =
        DomainError::conflict(ConflictKind::Other("x".to_string()), "generic").into();
    assert_eq!(other.code().as_str(), "CONFLICT");
}

#[test]
fn maps_not_found() {
    let app: AppError = DomainError::not_found(NotFoundKind::Game, "no game").into();
    assert_eq!(app.code().as_str(), "GAME_NOT_FOUND");
    assert_eq!(app.status().as_u16(), 404);
}

#[test]
fn maps_infra() {
    let t: AppError = DomainError::infra(InfraErrorKind::Timeout, "timeout").into();
    assert_eq!(t.code().as_str(), "DB_TIMEOUT");
    assert_eq!(t.status().as_u16(), 504);

    let down: AppError = DomainError::infra(InfraErrorKind::DbUnavailable, "down").into();
    assert_eq!(down.code().as_str(), "DB_UNAVAILABLE");
    assert_eq!(down.status().as_u16(), 503);

    let corrupt: AppError = DomainError::infra(InfraErrorKind::DataCorruption, "bad row").into();
    assert_eq!(corrupt.status().as_u16(), 500);
}
