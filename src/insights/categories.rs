//! Achievement category rankings.
//!
//! Every category is one row in a declarative table (eligibility floor,
//! metric, sort direction, applicable game types); a single generic top-pick
//! routine consumes the table. Ties on the primary metric break on the raw
//! counter, then the sample size, then ascending player id, so rankings never
//! depend on map iteration order.

use std::cmp::Ordering;
use std::collections::{BTreeMap, BTreeSet, HashMap};

use super::models::PlayerTally;
use crate::game::GameType;

/// Minimum games played before percentage-of-games categories apply.
pub const MIN_GAMES: u32 = 3;
/// Minimum rounds on record before percentage-of-rounds categories apply.
pub const MIN_ROUNDS: u32 = 10;
/// Minimum forced rounds before the clutch category applies.
pub const MIN_MUST_PLAY_ROUNDS: u32 = 3;

const ALL_TYPES: &[GameType] = &[GameType::Rummy, GameType::Chess, GameType::Ace];
const RUMMY_ONLY: &[GameType] = &[GameType::Rummy];
const KNOCKOUT_TYPES: &[GameType] = &[GameType::Chess, GameType::Ace];

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Higher is better (every category except EarlyExit).
    Descending,
    /// Lower is better (earliest elimination).
    Ascending,
}

/// A player's standing in one category.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryValue {
    pub value: f64,
    /// Raw counter behind the value; first tie-breaker, higher wins.
    pub count: u32,
    /// Sample size behind the value; second tie-breaker, higher wins.
    pub sample: u32,
    pub game_id: Option<String>,
}

/// One row of the category table.
pub struct CategoryDef {
    pub key: &'static str,
    pub applies_to: &'static [GameType],
    pub direction: Direction,
    pub eligible: fn(&PlayerTally) -> bool,
    pub evaluate: fn(&PlayerTally) -> Option<CategoryValue>,
    pub contributions: fn(&PlayerTally) -> Vec<String>,
}

fn ratio(value: f64, count: u32, sample: u32) -> Option<CategoryValue> {
    if count == 0 {
        return None;
    }
    Some(CategoryValue {
        value,
        count,
        sample,
        game_id: None,
    })
}

fn count_value(count: u32, sample: u32, game_id: Option<String>) -> Option<CategoryValue> {
    if count == 0 {
        return None;
    }
    Some(CategoryValue {
        value: count as f64,
        count,
        sample,
        game_id,
    })
}

fn ids(set: &BTreeSet<String>) -> Vec<String> {
    set.iter().cloned().collect()
}

pub const CATEGORIES: &[CategoryDef] = &[
    CategoryDef {
        key: "dropSpecialist",
        applies_to: ALL_TYPES,
        direction: Direction::Descending,
        eligible: |t| t.total_rounds >= MIN_ROUNDS,
        evaluate: |t| ratio(t.drop_percentage(), t.drops + t.double_drops, t.total_rounds),
        contributions: |t| ids(&t.contributions.drops),
    },
    CategoryDef {
        key: "strategist",
        applies_to: RUMMY_ONLY,
        direction: Direction::Descending,
        eligible: |t| t.games_played >= MIN_GAMES,
        evaluate: |t| ratio(t.finals_percentage(), t.finals, t.games_played),
        contributions: |t| ids(&t.contributions.finals),
    },
    CategoryDef {
        key: "finalHero",
        applies_to: RUMMY_ONLY,
        direction: Direction::Descending,
        eligible: |t| t.games_played >= MIN_GAMES,
        evaluate: |t| ratio(t.final_win_percentage(), t.final_wins, t.finals),
        contributions: |t| ids(&t.contributions.final_wins),
    },
    CategoryDef {
        key: "warrior",
        applies_to: RUMMY_ONLY,
        direction: Direction::Descending,
        eligible: |t| t.games_played >= MIN_GAMES,
        evaluate: |t| ratio(t.final_loss_percentage(), t.final_losses, t.finals),
        contributions: |t| ids(&t.contributions.final_losses),
    },
    CategoryDef {
        key: "consistent",
        applies_to: RUMMY_ONLY,
        direction: Direction::Descending,
        eligible: |t| t.games_played >= 1,
        evaluate: |t| count_value(t.streaks.max_finals_streak, t.games_played, None),
        contributions: |t| ids(&t.contributions.finals),
    },
    CategoryDef {
        key: "onFire",
        applies_to: ALL_TYPES,
        direction: Direction::Descending,
        eligible: |t| t.games_played >= 1,
        evaluate: |t| count_value(t.streaks.max_match_streak, t.games_played, None),
        contributions: |t| ids(&t.contributions.match_wins),
    },
    CategoryDef {
        key: "roundDominator",
        applies_to: ALL_TYPES,
        direction: Direction::Descending,
        eligible: |t| t.games_played >= 1,
        evaluate: |t| {
            count_value(
                t.streaks.max_round_streak,
                t.total_rounds,
                t.streaks.max_round_streak_game.clone(),
            )
        },
        contributions: |t| ids(&t.contributions.round_wins),
    },
    CategoryDef {
        key: "eightyClub",
        applies_to: RUMMY_ONLY,
        direction: Direction::Descending,
        eligible: |t| t.total_rounds >= MIN_ROUNDS,
        evaluate: |t| ratio(t.eighty_percentage(), t.scores_80, t.played_rounds),
        contributions: |t| ids(&t.contributions.scores_80),
    },
    CategoryDef {
        key: "roundWinChampion",
        applies_to: ALL_TYPES,
        direction: Direction::Descending,
        eligible: |t| t.total_rounds >= MIN_ROUNDS,
        evaluate: |t| ratio(t.round_win_percentage(), t.round_wins, t.total_rounds),
        contributions: |t| ids(&t.contributions.round_wins),
    },
    CategoryDef {
        key: "bravePlayer",
        applies_to: RUMMY_ONLY,
        direction: Direction::Descending,
        eligible: |t| t.total_rounds >= MIN_ROUNDS,
        evaluate: |t| ratio(t.played_percentage(), t.played_rounds, t.total_rounds),
        contributions: |t| ids(&t.contributions.played),
    },
    CategoryDef {
        key: "earlyExit",
        applies_to: KNOCKOUT_TYPES,
        direction: Direction::Ascending,
        eligible: |t| t.games_played >= 1,
        evaluate: |t| {
            t.earliest_elimination.as_ref().map(|e| CategoryValue {
                value: e.round as f64,
                count: t.games_played,
                sample: t.games_played,
                game_id: Some(e.game_id.clone()),
            })
        },
        contributions: |t| {
            t.earliest_elimination
                .as_ref()
                .map(|e| vec![e.game_id.clone()])
                .unwrap_or_default()
        },
    },
    CategoryDef {
        key: "marathonPlayer",
        applies_to: RUMMY_ONLY,
        direction: Direction::Descending,
        eligible: |t| t.games_played >= 1,
        evaluate: |t| {
            count_value(
                t.max_rounds_single_game.value,
                t.games_played,
                t.max_rounds_single_game.game_id.clone(),
            )
        },
        contributions: |t| {
            t.max_rounds_single_game
                .game_id
                .clone()
                .map(|id| vec![id])
                .unwrap_or_default()
        },
    },
    CategoryDef {
        key: "clutchPlayer",
        applies_to: RUMMY_ONLY,
        direction: Direction::Descending,
        eligible: |t| t.must_play_rounds >= MIN_MUST_PLAY_ROUNDS,
        evaluate: |t| {
            ratio(
                t.clutch_survival_percentage(),
                t.must_play_survivals,
                t.must_play_rounds,
            )
        },
        contributions: |t| ids(&t.contributions.must_play),
    },
];

/// Category table rows that apply to one game type.
pub fn applicable(game_type: GameType) -> impl Iterator<Item = &'static CategoryDef> {
    CATEGORIES
        .iter()
        .filter(move |def| def.applies_to.contains(&game_type))
}

/// The top player of one category, before profile resolution.
#[derive(Debug, Clone, PartialEq)]
pub struct RankedCategory {
    pub player_id: String,
    pub value: CategoryValue,
}

/// Picks the single top-ranked player for a category, or None when nobody
/// qualifies.
pub fn pick_top(
    def: &CategoryDef,
    tallies: &HashMap<String, PlayerTally>,
) -> Option<RankedCategory> {
    let mut player_ids: Vec<&String> = tallies.keys().collect();
    player_ids.sort();

    let mut best: Option<RankedCategory> = None;
    for player_id in player_ids {
        let tally = &tallies[player_id];
        if !(def.eligible)(tally) {
            continue;
        }
        let Some(value) = (def.evaluate)(tally) else {
            continue;
        };
        let candidate = RankedCategory {
            player_id: player_id.clone(),
            value,
        };
        best = match best {
            None => Some(candidate),
            Some(incumbent) => {
                if beats(def.direction, &candidate, &incumbent) {
                    Some(candidate)
                } else {
                    Some(incumbent)
                }
            }
        };
    }
    best
}

fn beats(direction: Direction, candidate: &RankedCategory, incumbent: &RankedCategory) -> bool {
    let primary = match direction {
        Direction::Descending => candidate.value.value.partial_cmp(&incumbent.value.value),
        Direction::Ascending => incumbent.value.value.partial_cmp(&candidate.value.value),
    }
    .unwrap_or(Ordering::Equal);

    primary
        .then(candidate.value.count.cmp(&incumbent.value.count))
        .then(candidate.value.sample.cmp(&incumbent.value.sample))
        .then(incumbent.player_id.cmp(&candidate.player_id))
        == Ordering::Greater
}

/// Ranks every applicable category for one game type.
pub fn rank_categories(
    game_type: GameType,
    tallies: &HashMap<String, PlayerTally>,
) -> BTreeMap<String, Option<RankedCategory>> {
    applicable(game_type)
        .map(|def| (def.key.to_string(), pick_top(def, tallies)))
        .collect()
}

/// Per-category values for one player, for the "your score" panel.
pub fn user_values(game_type: GameType, tally: &PlayerTally) -> BTreeMap<String, f64> {
    applicable(game_type)
        .map(|def| {
            let value = (def.evaluate)(tally).map(|v| v.value).unwrap_or(0.0);
            (def.key.to_string(), value)
        })
        .collect()
}

/// Per-category contributing game ids for one player.
pub fn user_contributions(
    game_type: GameType,
    tally: &PlayerTally,
) -> BTreeMap<String, Vec<String>> {
    applicable(game_type)
        .map(|def| (def.key.to_string(), (def.contributions)(tally)))
        .collect()
}
