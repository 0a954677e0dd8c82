// Library crate for the game night statistics server
// This file exposes the public API for integration tests

pub mod game;
pub mod insights;
pub mod leaderboard;
pub mod shared;
pub mod user;

// Re-export commonly used types for easier access in tests
pub use game::{Game, GamePlayer, GameRepository, GameStatus, GameType, InMemoryGameRepository, Round};
pub use insights::InsightsService;
pub use leaderboard::LeaderboardService;
pub use shared::{AppError, AppState};
pub use user::{InMemoryUserRepository, UserProfile, UserRepository};
