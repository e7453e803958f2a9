pub mod game_lifecycle;
pub mod session_locks;
pub mod users;

pub use game_lifecycle::{GameLifecycle, SessionView};
pub use users::UserService;
