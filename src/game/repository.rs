use async_trait::async_trait;
use std::sync::Arc;
use tokio::sync::RwLock;
use tracing::debug;

use super::models::{Game, GameStatus, GameType};
use crate::shared::AppError;

/// Read access to the game log.
///
/// The statistics engine only ever needs a filtered snapshot; everything it
/// derives is recomputed from that snapshot on each call.
#[async_trait]
pub trait GameRepository: Send + Sync {
    async fn add_game(&self, game: Game) -> Result<(), AppError>;

    /// All games of one type in the given status, in insertion order.
    async fn games_of_type(
        &self,
        game_type: GameType,
        status: GameStatus,
    ) -> Result<Vec<Game>, AppError>;
}

/// In-memory implementation of GameRepository for development and testing
#[derive(Debug, Default)]
pub struct InMemoryGameRepository {
    games: Arc<RwLock<Vec<Game>>>,
}

impl InMemoryGameRepository {
    pub fn new() -> Self {
        Self {
            games: Arc::new(RwLock::new(Vec::new())),
        }
    }
}

#[async_trait]
impl GameRepository for InMemoryGameRepository {
    async fn add_game(&self, game: Game) -> Result<(), AppError> {
        debug!(game_id = %game.id, game_type = %game.game_type, "Storing game record");

        let mut games = self.games.write().await;
        if games.iter().any(|g| g.id == game.id) {
            return Err(AppError::DatabaseError(format!(
                "Game {} already exists",
                game.id
            )));
        }
        games.push(game);
        Ok(())
    }

    async fn games_of_type(
        &self,
        game_type: GameType,
        status: GameStatus,
    ) -> Result<Vec<Game>, AppError> {
        let games = self.games.read().await;
        let matching: Vec<Game> = games
            .iter()
            .filter(|g| g.game_type == game_type && g.status == status)
            .cloned()
            .collect();

        debug!(
            game_type = %game_type,
            count = matching.len(),
            "Fetched games from memory"
        );

        Ok(matching)
    }
}
