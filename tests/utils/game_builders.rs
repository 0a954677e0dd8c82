use chrono::{TimeZone, Utc};
use std::collections::HashMap;

use gamenight::{Game, GamePlayer, GameStatus, GameType, Round};

// ============================================================================
// Round Construction
// ============================================================================

/// Builds one round from parallel slices of scores, round winners, drops and
/// double drops.
pub fn round(
    scores: &[(&str, i64)],
    winners: &[&str],
    drops: &[&str],
    double_drops: &[&str],
) -> Round {
    let to_flags = |ids: &[&str]| -> HashMap<String, bool> {
        ids.iter().map(|id| (id.to_string(), true)).collect()
    };

    Round {
        round_number: 0, // assigned by GameBuilder::build
        scores: scores
            .iter()
            .map(|(id, score)| (id.to_string(), *score))
            .collect(),
        winners: to_flags(winners),
        drops: to_flags(drops),
        double_drops: to_flags(double_drops),
    }
}

// ============================================================================
// Game Construction
// ============================================================================

pub struct GameBuilder {
    id: String,
    game_type: GameType,
    day: u32,
    max_points: Option<i64>,
    winner: Option<String>,
    winners: Vec<String>,
    players: Vec<GamePlayer>,
    rounds: Vec<Round>,
}

impl GameBuilder {
    fn new(id: &str, game_type: GameType) -> Self {
        Self {
            id: id.to_string(),
            game_type,
            day: 1,
            max_points: None,
            winner: None,
            winners: vec![],
            players: vec![],
            rounds: vec![],
        }
    }

    pub fn rummy(id: &str) -> Self {
        let mut builder = Self::new(id, GameType::Rummy);
        builder.max_points = Some(120);
        builder
    }

    pub fn chess(id: &str) -> Self {
        Self::new(id, GameType::Chess)
    }

    pub fn ace(id: &str) -> Self {
        Self::new(id, GameType::Ace)
    }

    /// Completion day within a fixed month, for chronological ordering.
    pub fn on_day(mut self, day: u32) -> Self {
        self.day = day;
        self
    }

    pub fn max_points(mut self, points: i64) -> Self {
        self.max_points = Some(points);
        self
    }

    pub fn winner(mut self, id: &str) -> Self {
        self.winner = Some(id.to_string());
        self
    }

    /// Tied multi-winner ending (Ace).
    pub fn winners(mut self, ids: &[&str]) -> Self {
        self.winners = ids.iter().map(|id| id.to_string()).collect();
        self
    }

    pub fn player(mut self, id: &str) -> Self {
        self.players.push(GamePlayer {
            id: id.to_string(),
            is_lost: false,
        });
        self
    }

    pub fn lost_player(mut self, id: &str) -> Self {
        self.players.push(GamePlayer {
            id: id.to_string(),
            is_lost: true,
        });
        self
    }

    pub fn round(mut self, round: Round) -> Self {
        self.rounds.push(round);
        self
    }

    pub fn build(self) -> Game {
        let mut rounds = self.rounds;
        for (index, round) in rounds.iter_mut().enumerate() {
            round.round_number = index as u32 + 1;
        }

        Game {
            id: self.id,
            game_type: self.game_type,
            status: GameStatus::Completed,
            created_at: Utc.with_ymd_and_hms(2024, 7, self.day, 9, 0, 0).unwrap(),
            completed_at: Some(Utc.with_ymd_and_hms(2024, 7, self.day, 11, 0, 0).unwrap()),
            max_points: self.max_points,
            winner: self.winner,
            winners: self.winners,
            players: self.players,
            rounds,
        }
    }
}
