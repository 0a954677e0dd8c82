//! Chronological replay of the game log into per-player tallies.
//!
//! One pure reducer per game, folded left-to-right over the log sorted by
//! completion date. The replay never mutates game records and holds no state
//! beyond the tallies it is building.

use std::collections::{HashMap, HashSet};

use super::models::{Elimination, GameHighlight, PlayerTally};
use super::pressure;
use crate::game::{Game, GameStatus, GameType};

/// Replays every completed game of `game_type` and returns one tally per
/// player who appears in the log.
pub fn accumulate(game_type: GameType, games: &[Game]) -> HashMap<String, PlayerTally> {
    let mut ordered: Vec<&Game> = games
        .iter()
        .filter(|g| g.game_type == game_type && g.status == GameStatus::Completed)
        .collect();
    ordered.sort_by_key(|g| g.sort_date());

    let mut tallies = HashMap::new();
    for game in ordered {
        apply_game(&mut tallies, game_type, game);
    }
    tallies
}

/// Whether the player was still in contention in the game's last round:
/// they have a score entry there, and either scored points or were never
/// flagged as eliminated. A round-winning finalist (0 points, not lost)
/// counts.
pub fn reached_final(game: &Game, player_id: &str) -> bool {
    let Some(last) = game.rounds.last() else {
        return false;
    };
    let Some(score) = last.score(player_id) else {
        return false;
    };
    let is_lost = game
        .players
        .iter()
        .find(|p| p.id == player_id)
        .map_or(false, |p| p.is_lost);
    score != 0 || !is_lost
}

fn tally_entry<'a>(
    tallies: &'a mut HashMap<String, PlayerTally>,
    player_id: &str,
) -> &'a mut PlayerTally {
    tallies
        .entry(player_id.to_string())
        .or_insert_with(|| PlayerTally::new(player_id))
}

fn apply_game(tallies: &mut HashMap<String, PlayerTally>, game_type: GameType, game: &Game) {
    let finalists = final_round_survivors(game_type, game);

    for player in &game.players {
        let tally = tally_entry(tallies, &player.id);
        tally.games_played += 1;

        let won_match = game.is_winner(&player.id);
        if won_match {
            tally.match_wins += 1;
            tally.contributions.match_wins.insert(game.id.clone());
        }
        // Streaks only move for participants; sitting a game out leaves
        // them untouched.
        tally.streaks.record_match(won_match);

        if game_type == GameType::Chess && game.is_draw() {
            tally.draws += 1;
        }

        if game_type == GameType::Rummy {
            let in_final = finalists.contains(&player.id);
            if in_final {
                tally.finals += 1;
                tally.contributions.finals.insert(game.id.clone());
                if won_match {
                    tally.final_wins += 1;
                    tally.contributions.final_wins.insert(game.id.clone());
                } else {
                    tally.final_losses += 1;
                    tally.contributions.final_losses.insert(game.id.clone());
                }
            }
            tally.streaks.record_final(in_final);
        }

        tally.streaks.begin_game();
    }

    apply_rounds(tallies, game_type, game);

    if game_type != GameType::Rummy {
        apply_eliminations(tallies, game);
    }
}

/// Rummy finalists: everyone still in contention in the last round, counted
/// only once the game has a declared winner.
fn final_round_survivors(game_type: GameType, game: &Game) -> HashSet<String> {
    let mut survivors = HashSet::new();
    if game_type != GameType::Rummy || game.winner.is_none() || game.rounds.is_empty() {
        return survivors;
    }
    for player in &game.players {
        if reached_final(game, &player.id) {
            survivors.insert(player.id.clone());
        }
    }
    survivors
}

fn apply_rounds(tallies: &mut HashMap<String, PlayerTally>, game_type: GameType, game: &Game) {
    if game.rounds.is_empty() {
        return;
    }

    let max_points = game.max_points_or_default();
    let mut points_at_round: HashMap<&str, i64> = HashMap::new();
    let mut rounds_played: HashMap<&str, u32> = HashMap::new();

    for (index, round) in game.rounds.iter().enumerate() {
        for player in &game.players {
            let Some(score) = round.score(&player.id) else {
                continue;
            };
            let points_before = points_at_round.get(player.id.as_str()).copied().unwrap_or(0);
            let tally = tally_entry(tallies, &player.id);
            tally.total_rounds += 1;

            let dropped = round.dropped(&player.id);
            let double_dropped = round.double_dropped(&player.id);
            if dropped {
                tally.drops += 1;
                tally.contributions.drops.insert(game.id.clone());
            }
            if double_dropped {
                tally.double_drops += 1;
                tally.contributions.drops.insert(game.id.clone());
            }

            let won_round = round.won(&player.id);

            if !dropped && !double_dropped {
                tally.played_rounds += 1;
                tally.contributions.played.insert(game.id.clone());
                *rounds_played.entry(player.id.as_str()).or_default() += 1;

                if game_type == GameType::Rummy
                    && pressure::is_must_play(
                        &game.rounds,
                        index,
                        &player.id,
                        points_before,
                        max_points,
                    )
                {
                    tally.must_play_rounds += 1;
                    tally.contributions.must_play.insert(game.id.clone());
                    if won_round {
                        tally.must_play_round_wins += 1;
                    }
                    if points_before + score < max_points {
                        tally.must_play_survivals += 1;
                    }
                }
            }

            if won_round {
                tally.round_wins += 1;
                tally.contributions.round_wins.insert(game.id.clone());
            }
            tally.streaks.record_round(won_round, &game.id);

            if game_type == GameType::Rummy
                && score == pressure::FULL_HAND_SCORE
                && pressure::is_avoidable_eighty(
                    &game.rounds,
                    index,
                    &player.id,
                    points_before,
                    max_points,
                )
            {
                tally.scores_80 += 1;
                tally.contributions.scores_80.insert(game.id.clone());
            }

            *points_at_round.entry(player.id.as_str()).or_insert(0) += score;
        }
    }

    if game_type == GameType::Rummy {
        for player in &game.players {
            let played = rounds_played.get(player.id.as_str()).copied().unwrap_or(0);
            let tally = tally_entry(tallies, &player.id);
            if played > tally.max_rounds_single_game.value {
                tally.max_rounds_single_game = GameHighlight {
                    value: played,
                    game_id: Some(game.id.clone()),
                };
            }
        }
    }
}

/// Chess/Ace knockouts: the elimination round is the first one where the
/// player's running total reaches the cap.
fn apply_eliminations(tallies: &mut HashMap<String, PlayerTally>, game: &Game) {
    if game.rounds.is_empty() {
        return;
    }
    let max_points = game.max_points_or_default();

    for player in &game.players {
        if !player.is_lost {
            continue;
        }
        let Some(round) = elimination_round(game, &player.id, max_points) else {
            continue;
        };
        let tally = tally_entry(tallies, &player.id);
        let is_earlier = tally
            .earliest_elimination
            .as_ref()
            .map_or(true, |e| round < e.round);
        if is_earlier {
            tally.earliest_elimination = Some(Elimination {
                round,
                game_id: game.id.clone(),
            });
        }
    }
}

fn elimination_round(game: &Game, player_id: &str, max_points: i64) -> Option<u32> {
    let mut total = 0;
    for (index, round) in game.rounds.iter().enumerate() {
        if let Some(score) = round.score(player_id) {
            total += score;
            if total >= max_points {
                return Some(index as u32 + 1);
            }
        }
    }
    None
}
