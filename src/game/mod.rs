// Public API
pub use models::{Game, GamePlayer, GameStatus, GameType, Round, DEFAULT_MAX_POINTS};
pub use repository::{GameRepository, InMemoryGameRepository};

// Internal modules
mod models;
mod repository;
