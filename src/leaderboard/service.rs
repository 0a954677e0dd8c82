use std::collections::{BTreeMap, HashMap};
use std::sync::Arc;
use strum::IntoEnumIterator;
use tracing::{info, instrument};

use super::models::{LeaderboardEntry, LeaderboardResponse, PlayerOverviewResponse, TypeOverview};
use super::rating;
use crate::game::{GameRepository, GameStatus, GameType};
use crate::insights::{accumulate, PlayerTally};
use crate::shared::AppError;
use crate::user::{UserProfile, UserRepository};

/// Number of rows on the public leaderboard.
const LEADERBOARD_SIZE: usize = 10;

/// Service for weighted-rating leaderboards and per-player rank summaries.
pub struct LeaderboardService {
    games: Arc<dyn GameRepository>,
    users: Arc<dyn UserRepository>,
}

impl LeaderboardService {
    pub fn new(games: Arc<dyn GameRepository>, users: Arc<dyn UserRepository>) -> Self {
        Self { games, users }
    }

    /// Top players of one game type, ranked by weighted rating.
    #[instrument(skip(self))]
    pub async fn leaderboard(&self, game_type: GameType) -> Result<LeaderboardResponse, AppError> {
        let tallies = self.tallies_for(game_type).await?;

        let mut entries = Vec::with_capacity(tallies.len());
        let mut player_ids: Vec<&String> = tallies.keys().collect();
        player_ids.sort();
        for player_id in player_ids {
            let tally = &tallies[player_id];
            let profile = self.profile_or_unknown(player_id).await?;
            entries.push(LeaderboardEntry {
                id: profile.id,
                name: profile.name,
                profile_photo: profile.profile_photo,
                wins: tally.match_wins,
                draws: tally.draws,
                total_games: tally.games_played,
                finals: tally.finals,
                win_percentage: rating::win_percentage(game_type, tally),
                wpr: rating::weighted_rating(game_type, tally),
                drop_percentage: rating::drop_percentage(tally),
                round_wins: tally.round_wins,
                total_rounds: tally.total_rounds,
                round_win_rate: rating::round_win_rate(tally),
            });
        }

        entries.sort_by(|a, b| {
            b.wpr
                .cmp(&a.wpr)
                .then(b.wins.cmp(&a.wins))
                .then(b.total_games.cmp(&a.total_games))
                .then(a.id.cmp(&b.id))
        });
        entries.truncate(LEADERBOARD_SIZE);

        info!(game_type = %game_type, rows = entries.len(), "Leaderboard computed");

        Ok(LeaderboardResponse {
            game_type,
            top_players: entries,
        })
    }

    /// A player's totals and rank across every game type.
    #[instrument(skip(self))]
    pub async fn player_overview(&self, user_id: &str) -> Result<PlayerOverviewResponse, AppError> {
        let player = self
            .users
            .get_user(user_id)
            .await?
            .ok_or_else(|| AppError::NotFound("Player not found".to_string()))?;

        let mut stats = BTreeMap::new();
        for game_type in GameType::iter() {
            let tallies = self.tallies_for(game_type).await?;
            stats.insert(game_type.to_string(), type_overview(game_type, &tallies, user_id));
        }

        Ok(PlayerOverviewResponse { player, stats })
    }

    async fn tallies_for(
        &self,
        game_type: GameType,
    ) -> Result<HashMap<String, PlayerTally>, AppError> {
        let games = self
            .games
            .games_of_type(game_type, GameStatus::Completed)
            .await?;
        Ok(accumulate(game_type, &games))
    }

    async fn profile_or_unknown(&self, player_id: &str) -> Result<UserProfile, AppError> {
        Ok(self
            .users
            .get_user(player_id)
            .await?
            .unwrap_or_else(|| UserProfile::unknown(player_id)))
    }
}

fn type_overview(
    game_type: GameType,
    tallies: &HashMap<String, PlayerTally>,
    user_id: &str,
) -> TypeOverview {
    // Rank every player by win percentage to place the requested one.
    let mut ranked: Vec<&PlayerTally> = tallies.values().collect();
    ranked.sort_by(|a, b| {
        rating::win_percentage(game_type, b)
            .cmp(&rating::win_percentage(game_type, a))
            .then(b.match_wins.cmp(&a.match_wins))
            .then(b.games_played.cmp(&a.games_played))
            .then(a.player_id.cmp(&b.player_id))
    });

    let rank = ranked
        .iter()
        .position(|t| t.player_id == user_id)
        .map(|index| index as u32 + 1);

    let tally = tallies.get(user_id);
    let (games_played, wins, draws, finals) = tally.map_or((0, 0, 0, 0), |t| {
        (t.games_played, t.match_wins, t.draws, t.finals)
    });

    TypeOverview {
        total_games: games_played,
        wins,
        draws,
        finals,
        losses: games_played - wins - draws,
        win_percentage: tally.map_or(0, |t| rating::win_percentage(game_type, t)),
        rank,
        total_players: ranked.len() as u32,
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::game::{Game, GamePlayer, InMemoryGameRepository, Round};
    use crate::user::InMemoryUserRepository;
    use chrono::{TimeZone, Utc};

    fn player(id: &str) -> GamePlayer {
        GamePlayer {
            id: id.to_string(),
            is_lost: false,
        }
    }

    fn game(
        id: &str,
        game_type: GameType,
        day: u32,
        winner: Option<&str>,
        players: Vec<GamePlayer>,
        rounds: Vec<Round>,
    ) -> Game {
        Game {
            id: id.to_string(),
            game_type,
            status: GameStatus::Completed,
            created_at: Utc.with_ymd_and_hms(2024, 5, day, 9, 0, 0).unwrap(),
            completed_at: Some(Utc.with_ymd_and_hms(2024, 5, day, 10, 0, 0).unwrap()),
            max_points: Some(120),
            winner: winner.map(|w| w.to_string()),
            winners: vec![],
            players,
            rounds,
        }
    }

    async fn service_with(games: Vec<Game>, users: Vec<(&str, &str)>) -> LeaderboardService {
        let game_repo = Arc::new(InMemoryGameRepository::new());
        for g in games {
            game_repo.add_game(g).await.unwrap();
        }
        let user_repo = Arc::new(InMemoryUserRepository::new());
        for (id, name) in users {
            user_repo
                .register_user(UserProfile {
                    id: id.to_string(),
                    name: name.to_string(),
                    profile_photo: None,
                })
                .await
                .unwrap();
        }
        LeaderboardService::new(game_repo, user_repo)
    }

    #[tokio::test]
    async fn leaderboard_orders_by_rating_then_wins_then_games() {
        let games = vec![
            game(
                "g1",
                GameType::Chess,
                1,
                Some("p1"),
                vec![player("p1"), player("p2")],
                vec![],
            ),
            game(
                "g2",
                GameType::Chess,
                2,
                Some("p1"),
                vec![player("p1"), player("p2")],
                vec![],
            ),
            game(
                "g3",
                GameType::Chess,
                3,
                Some("p2"),
                vec![player("p1"), player("p2")],
                vec![],
            ),
        ];
        let service = service_with(games, vec![("p1", "Alice"), ("p2", "Bob")]).await;

        let response = service.leaderboard(GameType::Chess).await.unwrap();
        assert_eq!(response.top_players.len(), 2);
        assert_eq!(response.top_players[0].id, "p1");
        assert_eq!(response.top_players[0].wpr, 67);
        assert_eq!(response.top_players[1].wpr, 33);
    }

    #[tokio::test]
    async fn chess_draws_earn_half_a_win_point() {
        let games = vec![
            game(
                "g1",
                GameType::Chess,
                1,
                None,
                vec![player("p1"), player("p2")],
                vec![],
            ),
            game(
                "g2",
                GameType::Chess,
                2,
                Some("p2"),
                vec![player("p1"), player("p2")],
                vec![],
            ),
        ];
        let service = service_with(games, vec![("p1", "Alice"), ("p2", "Bob")]).await;

        let response = service.leaderboard(GameType::Chess).await.unwrap();
        let p1 = response
            .top_players
            .iter()
            .find(|e| e.id == "p1")
            .unwrap();
        assert_eq!(p1.draws, 1);
        // 0.5 win points over 2 games.
        assert_eq!(p1.win_percentage, 25);
    }

    #[tokio::test]
    async fn leaderboard_is_capped_at_ten_rows() {
        let players: Vec<GamePlayer> = (0..12).map(|i| player(&format!("p{i:02}"))).collect();
        let games = vec![game(
            "g1",
            GameType::Ace,
            1,
            Some("p00"),
            players,
            vec![],
        )];
        let service = service_with(games, vec![]).await;

        let response = service.leaderboard(GameType::Ace).await.unwrap();
        assert_eq!(response.top_players.len(), 10);
        // Unregistered players still show up, just unnamed.
        assert_eq!(response.top_players[0].name, "Unknown");
    }

    #[tokio::test]
    async fn overview_reports_rank_per_game_type() {
        let games = vec![
            game(
                "g1",
                GameType::Chess,
                1,
                Some("p1"),
                vec![player("p1"), player("p2")],
                vec![],
            ),
            game(
                "g2",
                GameType::Chess,
                2,
                Some("p1"),
                vec![player("p1"), player("p2")],
                vec![],
            ),
        ];
        let service = service_with(games, vec![("p2", "Bob")]).await;

        let response = service.player_overview("p2").await.unwrap();
        let chess = &response.stats["Chess"];
        assert_eq!(chess.total_games, 2);
        assert_eq!(chess.wins, 0);
        assert_eq!(chess.losses, 2);
        assert_eq!(chess.rank, Some(2));
        assert_eq!(chess.total_players, 2);

        // No Rummy games at all: empty slice with no rank.
        let rummy = &response.stats["Rummy"];
        assert_eq!(rummy.total_games, 0);
        assert_eq!(rummy.rank, None);
        assert_eq!(rummy.total_players, 0);
    }

    #[tokio::test]
    async fn overview_for_unknown_player_is_not_found() {
        let service = service_with(vec![], vec![]).await;
        let result = service.player_overview("nobody").await;
        assert!(matches!(result, Err(AppError::NotFound(_))));
    }
}
