use serde::{Deserialize, Serialize};
use std::collections::{BTreeMap, BTreeSet};

use crate::game::GameType;
use crate::user::UserProfile;

/// Guarded percentage; a zero denominator yields 0 rather than NaN.
pub fn percentage(numerator: u32, denominator: u32) -> f64 {
    if denominator == 0 {
        0.0
    } else {
        numerator as f64 / denominator as f64 * 100.0
    }
}

/// Guarded average over a point total.
pub fn average(total: i64, count: u32) -> f64 {
    if count == 0 {
        0.0
    } else {
        total as f64 / count as f64
    }
}

/// Streak counters maintained during the chronological replay.
///
/// Three independent streak families: match wins across games, round wins
/// within a single game, and finals appearances across games. Each resets on
/// its own breaking condition and never on games the player sat out.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct StreakState {
    pub current_match_streak: u32,
    pub max_match_streak: u32,
    pub current_round_streak: u32,
    pub max_round_streak: u32,
    pub max_round_streak_game: Option<String>,
    pub current_finals_streak: u32,
    pub max_finals_streak: u32,
}

impl StreakState {
    pub fn record_match(&mut self, won: bool) {
        if won {
            self.current_match_streak += 1;
            self.max_match_streak = self.max_match_streak.max(self.current_match_streak);
        } else {
            self.current_match_streak = 0;
        }
    }

    pub fn record_final(&mut self, reached: bool) {
        if reached {
            self.current_finals_streak += 1;
            self.max_finals_streak = self.max_finals_streak.max(self.current_finals_streak);
        } else {
            self.current_finals_streak = 0;
        }
    }

    /// The round-win streak is scoped to a single game; its best run can
    /// never exceed the round count of the game that produced it.
    pub fn begin_game(&mut self) {
        self.current_round_streak = 0;
    }

    pub fn record_round(&mut self, won: bool, game_id: &str) {
        if won {
            self.current_round_streak += 1;
            if self.current_round_streak > self.max_round_streak {
                self.max_round_streak = self.current_round_streak;
                self.max_round_streak_game = Some(game_id.to_string());
            }
        } else {
            self.current_round_streak = 0;
        }
    }
}

/// Game ids that contributed to each counter family, for drill-down links.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Contributions {
    pub match_wins: BTreeSet<String>,
    pub finals: BTreeSet<String>,
    pub final_wins: BTreeSet<String>,
    pub final_losses: BTreeSet<String>,
    pub round_wins: BTreeSet<String>,
    pub drops: BTreeSet<String>,
    pub played: BTreeSet<String>,
    pub scores_80: BTreeSet<String>,
    pub must_play: BTreeSet<String>,
}

/// A single-game record worth surfacing with its originating game.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct GameHighlight {
    pub value: u32,
    pub game_id: Option<String>,
}

/// Elimination round record for Chess/Ace knockouts.
#[derive(Debug, Clone, PartialEq)]
pub struct Elimination {
    pub round: u32,
    pub game_id: String,
}

/// Per-player counters accumulated over one chronological replay of the log.
///
/// Rebuilt fresh on every request; nothing here is persisted.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PlayerTally {
    pub player_id: String,
    pub games_played: u32,
    pub match_wins: u32,
    pub draws: u32,
    pub finals: u32,
    pub final_wins: u32,
    pub final_losses: u32,
    pub round_wins: u32,
    pub total_rounds: u32,
    pub played_rounds: u32,
    pub drops: u32,
    pub double_drops: u32,
    pub scores_80: u32,
    pub must_play_rounds: u32,
    /// Must-play rounds the player outright won.
    pub must_play_round_wins: u32,
    /// Must-play rounds the player finished still below the elimination cap.
    pub must_play_survivals: u32,
    pub streaks: StreakState,
    pub earliest_elimination: Option<Elimination>,
    pub max_rounds_single_game: GameHighlight,
    pub contributions: Contributions,
}

impl PlayerTally {
    pub fn new(player_id: &str) -> Self {
        Self {
            player_id: player_id.to_string(),
            ..Self::default()
        }
    }

    pub fn drop_percentage(&self) -> f64 {
        percentage(self.drops + self.double_drops, self.total_rounds)
    }

    pub fn finals_percentage(&self) -> f64 {
        percentage(self.finals, self.games_played)
    }

    pub fn final_win_percentage(&self) -> f64 {
        percentage(self.final_wins, self.finals)
    }

    pub fn final_loss_percentage(&self) -> f64 {
        percentage(self.final_losses, self.finals)
    }

    pub fn win_percentage(&self) -> f64 {
        percentage(self.match_wins, self.games_played)
    }

    pub fn round_win_percentage(&self) -> f64 {
        percentage(self.round_wins, self.total_rounds)
    }

    pub fn played_percentage(&self) -> f64 {
        percentage(self.played_rounds, self.total_rounds)
    }

    pub fn eighty_percentage(&self) -> f64 {
        percentage(self.scores_80, self.played_rounds)
    }

    pub fn clutch_survival_percentage(&self) -> f64 {
        percentage(self.must_play_survivals, self.must_play_rounds)
    }

    pub fn clutch_win_percentage(&self) -> f64 {
        percentage(self.must_play_round_wins, self.must_play_rounds)
    }
}

/// Winner of one achievement category.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryLeader {
    pub player: UserProfile,
    pub value: f64,
    /// Raw counter behind the value (first tie-breaker).
    pub count: u32,
    /// Sample size behind the value (second tie-breaker).
    pub sample: u32,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub game_id: Option<String>,
}

/// Category-ranking response for one game type.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsResponse {
    pub game_type: GameType,
    pub total_games: u32,
    pub stats: BTreeMap<String, Option<CategoryLeader>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user_stats: Option<BTreeMap<String, f64>>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub current_user_game_ids: Option<BTreeMap<String, Vec<String>>>,
}

/// Head-to-head subsection of a comparison; omitted when the two players
/// share no games.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HeadToHead {
    pub games: u32,
    pub wins: u32,
    pub win_percentage: f64,
}

/// One player's side of a two-player comparison.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct ComparisonStats {
    pub total_games: u32,
    pub wins: u32,
    pub win_percentage: f64,
    pub finals: u32,
    pub finals_percentage: f64,
    pub round_wins: u32,
    pub total_rounds: u32,
    pub round_win_percentage: f64,
    pub drops: u32,
    pub double_drops: u32,
    pub drop_percentage: f64,
    pub scores_80: u32,
    pub scores_80_percentage: f64,
    pub must_play_rounds: u32,
    pub must_play_wins: u32,
    pub clutch_percentage: f64,
    pub max_consecutive_wins: u32,
    pub max_consecutive_finals: u32,
    pub total_points: i64,
    pub avg_points_per_game: f64,
    pub avg_points_per_round: f64,
    pub highest_score: i64,
    pub lowest_score: i64,
    pub perfect_games: u32,
    /// Win-percentage rating stand-in until a real rating system lands.
    pub rating: u32,
    pub head_to_head: Option<HeadToHead>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonSide {
    pub id: String,
    pub name: String,
    pub profile_photo: Option<String>,
    pub stats: ComparisonStats,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ComparisonResponse {
    pub game_type: GameType,
    pub player1: ComparisonSide,
    pub player2: ComparisonSide,
}
