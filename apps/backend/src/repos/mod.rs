//! Repository traits for domain layer.
//!
//! Services receive these as `Arc<dyn ...>` through `AppState`; adapters
//! provide SeaORM and in-memory implementations.

pub mod games;
pub mod users;

pub use games::GameStore;
pub use users::{UserProfile, UserRecord, UserStore};
