pub mod games;
pub mod guesses;
pub mod users;

pub use games::Entity as Games;
pub use games::Model as Game;
pub use games::{GameStatus, GameType, Role};
pub use guesses::Entity as Guesses;
pub use guesses::Model as GuessRow;
pub use users::Entity as Users;
pub use users::Model as User;
pub use users::UserRole;
