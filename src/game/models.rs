use chrono::{DateTime, Utc};
use serde::{de, Deserialize, Deserializer, Serialize, Serializer};
use std::collections::HashMap;
use strum_macros::{Display, EnumIter, EnumString};

/// Default Rummy elimination threshold when a game record carries none.
pub const DEFAULT_MAX_POINTS: i64 = 120;

/// Game families tracked by the score log.
///
/// Query parameters and stored records spell these in arbitrary case
/// ("rummy", "Rummy", "RUMMY"), so parsing is case-insensitive.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Display, EnumString, EnumIter)]
#[strum(ascii_case_insensitive)]
pub enum GameType {
    Rummy,
    Chess,
    Ace,
}

impl Serialize for GameType {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(&self.to_string())
    }
}

impl<'de> Deserialize<'de> for GameType {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let raw = String::deserialize(deserializer)?;
        raw.parse()
            .map_err(|_| de::Error::custom(format!("unknown game type: {raw}")))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum GameStatus {
    InProgress,
    Completed,
}

/// A participant entry on a game record.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct GamePlayer {
    pub id: String,
    #[serde(default)]
    pub is_lost: bool,
}

/// One scored round inside a game.
///
/// Maps are keyed by player id; a player absent from `scores` did not
/// participate in the round (joined later or already eliminated).
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase", default)]
pub struct Round {
    pub round_number: u32,
    pub scores: HashMap<String, i64>,
    pub winners: HashMap<String, bool>,
    pub drops: HashMap<String, bool>,
    pub double_drops: HashMap<String, bool>,
}

impl Round {
    pub fn score(&self, player_id: &str) -> Option<i64> {
        self.scores.get(player_id).copied()
    }

    pub fn won(&self, player_id: &str) -> bool {
        self.winners.get(player_id).copied().unwrap_or(false)
    }

    pub fn dropped(&self, player_id: &str) -> bool {
        self.drops.get(player_id).copied().unwrap_or(false)
    }

    pub fn double_dropped(&self, player_id: &str) -> bool {
        self.double_drops.get(player_id).copied().unwrap_or(false)
    }

    /// True when the player sat the round out with either drop kind.
    pub fn any_drop(&self, player_id: &str) -> bool {
        self.dropped(player_id) || self.double_dropped(player_id)
    }
}

/// An immutable game record from the log.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Game {
    pub id: String,
    #[serde(rename = "type")]
    pub game_type: GameType,
    pub status: GameStatus,
    pub created_at: DateTime<Utc>,
    #[serde(default)]
    pub completed_at: Option<DateTime<Utc>>,
    /// Elimination threshold; only meaningful for Rummy.
    #[serde(default)]
    pub max_points: Option<i64>,
    #[serde(default)]
    pub winner: Option<String>,
    /// Multi-winner endings (Ace games can finish in a points tie).
    #[serde(default)]
    pub winners: Vec<String>,
    pub players: Vec<GamePlayer>,
    #[serde(default)]
    pub rounds: Vec<Round>,
}

impl Game {
    /// Date used for chronological replay ordering.
    pub fn sort_date(&self) -> DateTime<Utc> {
        self.completed_at.unwrap_or(self.created_at)
    }

    pub fn max_points_or_default(&self) -> i64 {
        self.max_points.unwrap_or(DEFAULT_MAX_POINTS)
    }

    /// Winner test covering both single-winner and tied multi-winner endings.
    pub fn is_winner(&self, player_id: &str) -> bool {
        if !self.winners.is_empty() {
            self.winners.iter().any(|w| w == player_id)
        } else {
            self.winner.as_deref() == Some(player_id)
        }
    }

    pub fn has_player(&self, player_id: &str) -> bool {
        self.players.iter().any(|p| p.id == player_id)
    }

    /// A completed game with no declared winner at all (Chess draws).
    pub fn is_draw(&self) -> bool {
        self.winner.is_none() && self.winners.is_empty()
    }
}
