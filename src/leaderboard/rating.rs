//! Win-point and weighted-rating formulas.
//!
//! Each game family scores wins on its own scale: Chess grants half a point
//! for a draw, Rummy grants a quarter point for reaching the final without
//! winning, Ace counts plain wins. The weighted rating (WPR) folds finals
//! presence, drop discipline and round wins into a 0-100 score for Rummy.

use crate::game::GameType;
use crate::insights::{percentage, PlayerTally};

/// Win points on a game-type-specific scale.
pub fn win_points(game_type: GameType, tally: &PlayerTally) -> f64 {
    match game_type {
        GameType::Chess => tally.match_wins as f64 + tally.draws as f64 * 0.5,
        GameType::Rummy => {
            let finals_without_wins = tally.finals.saturating_sub(tally.match_wins);
            tally.match_wins as f64 + finals_without_wins as f64 * 0.25
        }
        GameType::Ace => tally.match_wins as f64,
    }
}

/// Rounded win percentage based on win points.
pub fn win_percentage(game_type: GameType, tally: &PlayerTally) -> i64 {
    if tally.games_played == 0 {
        return 0;
    }
    (win_points(game_type, tally) / tally.games_played as f64 * 100.0).round() as i64
}

/// Weighted performance rating on a 0-100 scale.
pub fn weighted_rating(game_type: GameType, tally: &PlayerTally) -> i64 {
    if tally.games_played == 0 {
        return 0;
    }
    let games = tally.games_played as f64;

    match game_type {
        GameType::Rummy => {
            let drop_share = tally.drop_percentage() / 100.0;
            let score = (tally.match_wins as f64 * 100.0
                + tally.finals as f64 * 25.0
                + (1.0 - drop_share) * 50.0
                + tally.round_wins as f64 * 2.0)
                / games;
            (score.round() as i64).min(100)
        }
        GameType::Chess => {
            ((tally.match_wins as f64 * 100.0 + tally.draws as f64 * 50.0) / games).round() as i64
        }
        GameType::Ace => ((tally.match_wins as f64 * 100.0) / games).round() as i64,
    }
}

/// Rounded drop percentage for leaderboard rows.
pub fn drop_percentage(tally: &PlayerTally) -> i64 {
    percentage(tally.drops + tally.double_drops, tally.total_rounds).round() as i64
}

/// Rounded round-win rate for leaderboard rows.
pub fn round_win_rate(tally: &PlayerTally) -> i64 {
    percentage(tally.round_wins, tally.total_rounds).round() as i64
}
