//! Domain layer: pure game logic types and helpers.

pub mod code;
pub mod policy;
pub mod scoring;
pub mod session;

// Re-exports for ergonomics
pub use code::FourDigits;
pub use scoring::{score, Score};
pub use session::{GameSession, Guess, NewSession, PendingGuess};
