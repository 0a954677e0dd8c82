//! Two-player head-to-head comparison.
//!
//! A parallel reduction over the games both players took part in. Ace games
//! have no single match winner, so wins and the head-to-head verdict come
//! from round wins there; Rummy and Chess use the game's winner field.

use super::accumulator::reached_final;
use super::models::{average, percentage, ComparisonStats, HeadToHead};
use super::pressure;
use crate::game::{Game, GameStatus, GameType};

/// Completed games of the right type where both players participated, in
/// chronological order.
pub fn shared_games<'a>(
    game_type: GameType,
    games: &'a [Game],
    first: &str,
    second: &str,
) -> Vec<&'a Game> {
    let mut shared: Vec<&Game> = games
        .iter()
        .filter(|g| g.game_type == game_type && g.status == GameStatus::Completed)
        .filter(|g| g.has_player(first) && g.has_player(second))
        .collect();
    shared.sort_by_key(|g| g.sort_date());
    shared
}

/// Builds the two symmetric stat blocks for a player pair.
pub fn compare_pair(
    game_type: GameType,
    games: &[Game],
    first: &str,
    second: &str,
) -> (ComparisonStats, ComparisonStats) {
    let shared = shared_games(game_type, games, first, second);
    (
        tally_matchup(game_type, &shared, first, second),
        tally_matchup(game_type, &shared, second, first),
    )
}

fn round_wins_in_game(game: &Game, player_id: &str) -> u32 {
    game.rounds.iter().filter(|r| r.won(player_id)).count() as u32
}

fn head_to_head_won(game_type: GameType, game: &Game, subject: &str, opponent: &str) -> bool {
    match game_type {
        GameType::Ace => round_wins_in_game(game, subject) > round_wins_in_game(game, opponent),
        _ => game.winner.as_deref() == Some(subject),
    }
}

fn tally_matchup(
    game_type: GameType,
    shared: &[&Game],
    subject: &str,
    opponent: &str,
) -> ComparisonStats {
    let mut stats = ComparisonStats::default();
    let mut win_streak = 0u32;
    let mut finals_streak = 0u32;
    let mut lowest: Option<i64> = None;
    let mut head_to_head_wins = 0u32;

    for game in shared {
        stats.total_games += 1;

        if head_to_head_won(game_type, game, subject, opponent) {
            head_to_head_wins += 1;
        }

        match game_type {
            GameType::Ace => {
                // No match winner in Ace; every round win counts as a win,
                // and the streak tracks games with at least one.
                let wins_here = round_wins_in_game(game, subject);
                stats.wins += wins_here;
                if wins_here > 0 {
                    win_streak += 1;
                    stats.max_consecutive_wins = stats.max_consecutive_wins.max(win_streak);
                } else {
                    win_streak = 0;
                }
            }
            _ => {
                if game.winner.as_deref() == Some(subject) {
                    stats.wins += 1;
                    win_streak += 1;
                    stats.max_consecutive_wins = stats.max_consecutive_wins.max(win_streak);
                } else {
                    win_streak = 0;
                }
            }
        }

        if game_type == GameType::Rummy && !game.rounds.is_empty() {
            if reached_final(game, subject) {
                stats.finals += 1;
                finals_streak += 1;
                stats.max_consecutive_finals = stats.max_consecutive_finals.max(finals_streak);
            } else {
                finals_streak = 0;
            }
        }

        let max_points = game.max_points_or_default();
        let mut points_before = 0i64;
        let mut game_points = 0i64;

        for (index, round) in game.rounds.iter().enumerate() {
            let Some(score) = round.score(subject) else {
                continue;
            };
            stats.total_rounds += 1;
            game_points += score;

            if score > stats.highest_score {
                stats.highest_score = score;
            }
            if score > 0 && lowest.map_or(true, |l| score < l) {
                lowest = Some(score);
            }

            let won_round = round.won(subject);
            if won_round {
                stats.round_wins += 1;
            }

            if game_type == GameType::Rummy {
                let dropped = round.dropped(subject);
                let double_dropped = round.double_dropped(subject);
                if dropped {
                    stats.drops += 1;
                }
                if double_dropped {
                    stats.double_drops += 1;
                }

                if !dropped
                    && !double_dropped
                    && pressure::is_must_play(
                        &game.rounds,
                        index,
                        subject,
                        points_before,
                        max_points,
                    )
                {
                    stats.must_play_rounds += 1;
                    if won_round {
                        stats.must_play_wins += 1;
                    }
                }

                if score == pressure::FULL_HAND_SCORE
                    && pressure::is_avoidable_eighty(
                        &game.rounds,
                        index,
                        subject,
                        points_before,
                        max_points,
                    )
                {
                    stats.scores_80 += 1;
                }
            }

            points_before += score;
        }

        stats.total_points += game_points;

        if game.winner.as_deref() == Some(subject) && game_points == 0 {
            stats.perfect_games += 1;
        }
    }

    stats.win_percentage = percentage(stats.wins, stats.total_games);
    stats.finals_percentage = percentage(stats.finals, stats.total_games);
    stats.round_win_percentage = percentage(stats.round_wins, stats.total_rounds);
    stats.drop_percentage = percentage(stats.drops + stats.double_drops, stats.total_rounds);
    stats.clutch_percentage = percentage(stats.must_play_wins, stats.must_play_rounds);
    stats.scores_80_percentage = percentage(stats.scores_80, stats.total_games);
    stats.avg_points_per_game = average(stats.total_points, stats.total_games);
    stats.avg_points_per_round = average(stats.total_points, stats.total_rounds);
    stats.lowest_score = lowest.unwrap_or(0);
    stats.rating = stats.win_percentage.round() as u32;

    stats.head_to_head = if stats.total_games > 0 {
        Some(HeadToHead {
            games: stats.total_games,
            wins: head_to_head_wins,
            win_percentage: percentage(head_to_head_wins, stats.total_games),
        })
    } else {
        None
    };

    stats
}
