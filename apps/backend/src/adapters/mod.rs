//! Adapters for external dependencies.

pub mod games_sea;
pub mod memory;
pub mod users_sea;

pub use games_sea::GamesSea;
pub use memory::{MemoryGames, MemoryUsers};
pub use users_sea::UsersSea;
