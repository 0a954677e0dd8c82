use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

use crate::game::GameType;
use crate::user::UserProfile;

/// One leaderboard row, sorted by weighted rating.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardEntry {
    pub id: String,
    pub name: String,
    pub profile_photo: Option<String>,
    pub wins: u32,
    pub draws: u32,
    pub total_games: u32,
    pub finals: u32,
    pub win_percentage: i64,
    pub wpr: i64,
    pub drop_percentage: i64,
    pub round_wins: u32,
    pub total_rounds: u32,
    pub round_win_rate: i64,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardResponse {
    pub game_type: GameType,
    pub top_players: Vec<LeaderboardEntry>,
}

/// One game type's slice of a player's profile page.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct TypeOverview {
    pub total_games: u32,
    pub wins: u32,
    pub draws: u32,
    pub finals: u32,
    pub losses: u32,
    pub win_percentage: i64,
    pub rank: Option<u32>,
    pub total_players: u32,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PlayerOverviewResponse {
    pub player: UserProfile,
    pub stats: BTreeMap<String, TypeOverview>,
}
