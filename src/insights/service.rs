use std::collections::BTreeMap;
use std::sync::Arc;
use tracing::{debug, info, instrument};

use super::accumulator::accumulate;
use super::categories::{rank_categories, user_contributions, user_values};
use super::comparison::compare_pair;
use super::models::{
    CategoryLeader, ComparisonResponse, ComparisonSide, InsightsResponse, PlayerTally,
};
use crate::game::{GameRepository, GameStatus, GameType};
use crate::shared::AppError;
use crate::user::{UserProfile, UserRepository};

/// Service for the statistics aggregation and ranking endpoints.
///
/// Loads an immutable snapshot of the game log once per call and runs the
/// pure aggregation over it; nothing is cached or written back.
pub struct InsightsService {
    games: Arc<dyn GameRepository>,
    users: Arc<dyn UserRepository>,
}

impl InsightsService {
    pub fn new(games: Arc<dyn GameRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { games, users }
    }

    /// Computes the achievement category rankings for one game type.
    #[instrument(skip(self))]
    pub async fn category_insights(
        &self,
        game_type: GameType,
        current_user: Option<&str>,
    ) -> Result<InsightsResponse, AppError> {
        let games = self
            .games
            .games_of_type(game_type, GameStatus::Completed)
            .await?;
        let total_games = games.len() as u32;
        debug!(game_type = %game_type, total_games, "Replaying game log");

        let tallies = accumulate(game_type, &games);
        let ranked = rank_categories(game_type, &tallies);

        let mut stats = BTreeMap::new();
        for (key, entry) in ranked {
            let leader = match entry {
                Some(ranked) => Some(CategoryLeader {
                    player: self.profile_or_unknown(&ranked.player_id).await?,
                    value: ranked.value.value,
                    count: ranked.value.count,
                    sample: ranked.value.sample,
                    game_id: ranked.value.game_id,
                }),
                None => None,
            };
            stats.insert(key, leader);
        }

        let (current_user_stats, current_user_game_ids) = match current_user {
            Some(user_id) => {
                let tally = tallies
                    .get(user_id)
                    .cloned()
                    .unwrap_or_else(|| PlayerTally::new(user_id));
                (
                    Some(user_values(game_type, &tally)),
                    Some(user_contributions(game_type, &tally)),
                )
            }
            None => (None, None),
        };

        info!(
            game_type = %game_type,
            total_games,
            players = tallies.len(),
            "Category rankings computed"
        );

        Ok(InsightsResponse {
            game_type,
            total_games,
            stats,
            current_user_stats,
            current_user_game_ids,
        })
    }

    /// Builds the symmetric head-to-head comparison for two players.
    #[instrument(skip(self))]
    pub async fn compare_players(
        &self,
        game_type: GameType,
        first: &str,
        second: &str,
    ) -> Result<ComparisonResponse, AppError> {
        if first == second {
            return Err(AppError::Validation(
                "Cannot compare a player with themselves".to_string(),
            ));
        }

        let first_profile = self
            .users
            .get_user(first)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player {first} not found")))?;
        let second_profile = self
            .users
            .get_user(second)
            .await?
            .ok_or_else(|| AppError::NotFound(format!("Player {second} not found")))?;

        let games = self
            .games
            .games_of_type(game_type, GameStatus::Completed)
            .await?;
        let (first_stats, second_stats) = compare_pair(game_type, &games, first, second);

        info!(
            game_type = %game_type,
            first,
            second,
            shared_games = first_stats.total_games,
            "Player comparison computed"
        );

        Ok(ComparisonResponse {
            game_type,
            player1: ComparisonSide {
                id: first_profile.id,
                name: first_profile.name,
                profile_photo: first_profile.profile_photo,
                stats: first_stats,
            },
            player2: ComparisonSide {
                id: second_profile.id,
                name: second_profile.name,
                profile_photo: second_profile.profile_photo,
                stats: second_stats,
            },
        })
    }

    async fn profile_or_unknown(&self, player_id: &str) -> Result<UserProfile, AppError> {
        Ok(self
            .users
            .get_user(player_id)
            .await?
            .unwrap_or_else(|| UserProfile::unknown(player_id)))
    }
}
