//! Error codes for the Cows and Bulls backend API.
//!
//! Add new codes here; never pass ad-hoc strings as error codes.
//!
//! All error codes are SCREAMING_SNAKE_CASE and map 1:1 to the strings
//! that appear in HTTP responses.

use core::fmt;

/// Centralized error codes for the backend API.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorCode {
    // Authentication & Authorization
    /// Authentication required
    Unauthorized,
    /// Missing or malformed Bearer token
    UnauthorizedMissingBearer,
    /// Invalid JWT token
    UnauthorizedInvalidJwt,
    /// JWT token has expired
    UnauthorizedExpiredJwt,
    /// Username/password pair did not match
    InvalidCredentials,
    /// Access denied
    Forbidden,
    /// Token subject no longer exists
    ForbiddenUserNotFound,
    /// Operation requires the admin role
    AdminRequired,
    /// Only the mastermind may set the code
    NotMastermind,
    /// Only the guesser may guess in multiplayer games
    NotGuesser,
    /// Caller is not bound to the game
    NotParticipant,

    // Request Validation
    /// Invalid game ID provided
    InvalidGameId,
    /// Unknown or unsupported game type
    InvalidGameType,
    /// Unknown participant role
    InvalidRole,
    /// Secret code is not four digits
    InvalidCode,
    /// Guess is not four digits
    InvalidGuess,
    /// Missing or blank username
    InvalidUsername,
    /// Missing or blank password
    InvalidPassword,
    /// General validation error
    ValidationError,
    /// General bad request error
    BadRequest,

    // Game state
    /// Game already finished
    GameFinished,
    /// Game has not started yet
    GameNotStarted,
    /// Secret code has not been set
    CodeNotSet,
    /// Secret code was already set
    CodeAlreadySet,
    /// Requested role slot is occupied
    RoleTaken,
    /// Caller is already bound to the game
    AlreadyJoined,
    /// General invalid state error
    InvalidState,

    // Resource Not Found
    /// Game not found
    GameNotFound,
    /// User not found
    UserNotFound,
    /// General not found error
    NotFound,

    // Conflicts
    /// Username already registered
    UsernameTaken,
    /// Optimistic lock failure
    OptimisticLock,
    /// General conflict
    Conflict,

    // System Errors
    /// Database error
    DbError,
    /// Database unavailable
    DbUnavailable,
    /// Database timeout
    DbTimeout,
    /// Unique constraint violation
    UniqueViolation,
    /// Foreign key violation
    FkViolation,
    /// Stored data failed to decode
    DataCorruption,
    /// Internal server error
    Internal,
    /// Configuration error
    ConfigError,
}

impl ErrorCode {
    /// Returns the canonical SCREAMING_SNAKE_CASE string for this error code.
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Unauthorized => "UNAUTHORIZED",
            Self::UnauthorizedMissingBearer => "UNAUTHORIZED_MISSING_BEARER",
            Self::UnauthorizedInvalidJwt => "UNAUTHORIZED_INVALID_JWT",
            Self::UnauthorizedExpiredJwt => "UNAUTHORIZED_EXPIRED_JWT",
            Self::InvalidCredentials => "INVALID_CREDENTIALS",
            Self::Forbidden => "FORBIDDEN",
            Self::ForbiddenUserNotFound => "FORBIDDEN_USER_NOT_FOUND",
            Self::AdminRequired => "ADMIN_REQUIRED",
            Self::NotMastermind => "NOT_MASTERMIND",
            Self::NotGuesser => "NOT_GUESSER",
            Self::NotParticipant => "NOT_PARTICIPANT",
            Self::InvalidGameId => "INVALID_GAME_ID",
            Self::InvalidGameType => "INVALID_GAME_TYPE",
            Self::InvalidRole => "INVALID_ROLE",
            Self::InvalidCode => "INVALID_CODE",
            Self::InvalidGuess => "INVALID_GUESS",
            Self::InvalidUsername => "INVALID_USERNAME",
            Self::InvalidPassword => "INVALID_PASSWORD",
            Self::ValidationError => "VALIDATION_ERROR",
            Self::BadRequest => "BAD_REQUEST",
            Self::GameFinished => "GAME_FINISHED",
            Self::GameNotStarted => "GAME_NOT_STARTED",
            Self::CodeNotSet => "CODE_NOT_SET",
            Self::CodeAlreadySet => "CODE_ALREADY_SET",
            Self::RoleTaken => "ROLE_TAKEN",
            Self::AlreadyJoined => "ALREADY_JOINED",
            Self::InvalidState => "INVALID_STATE",
            Self::GameNotFound => "GAME_NOT_FOUND",
            Self::UserNotFound => "USER_NOT_FOUND",
            Self::NotFound => "NOT_FOUND",
            Self::UsernameTaken => "USERNAME_TAKEN",
            Self::OptimisticLock => "OPTIMISTIC_LOCK",
            Self::Conflict => "CONFLICT",
            Self::DbError => "DB_ERROR",
            Self::DbUnavailable => "DB_UNAVAILABLE",
            Self::DbTimeout => "DB_TIMEOUT",
            Self::UniqueViolation => "UNIQUE_VIOLATION",
            Self::FkViolation => "FK_VIOLATION",
            Self::DataCorruption => "DATA_CORRUPTION",
            Self::Internal => "INTERNAL",
            Self::ConfigError => "CONFIG_ERROR",
        }
    }
}

impl fmt::Display for ErrorCode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
