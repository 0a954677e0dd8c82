//! Must-play and pressure detection for Rummy rounds.
//!
//! A round is forced ("must-play") when the player has burned three straight
//! drops, or when one bad round would push them over the elimination cap.

use crate::game::Round;

/// Consecutive prior drops that force the next hand to be played.
pub const MUST_PLAY_DROP_RUN: u32 = 3;

/// Margin below the elimination cap that puts a player under pressure.
pub const PRESSURE_MARGIN: i64 = 20;

/// Score of a full-hand bust.
pub const FULL_HAND_SCORE: i64 = 80;

/// Counts the unbroken run of dropped rounds immediately before `index`,
/// scanning backward until a round the player actually played.
pub fn consecutive_drops_before(rounds: &[Round], index: usize, player_id: &str) -> u32 {
    let mut run = 0;
    for round in rounds[..index].iter().rev() {
        if round.any_drop(player_id) {
            run += 1;
        } else {
            break;
        }
    }
    run
}

/// Whether the round at `index` was a forced play for this player.
pub fn is_must_play(
    rounds: &[Round],
    index: usize,
    player_id: &str,
    points_before: i64,
    max_points: i64,
) -> bool {
    consecutive_drops_before(rounds, index, player_id) >= MUST_PLAY_DROP_RUN
        || max_points - points_before < PRESSURE_MARGIN
}

/// Whether a full-hand bust at `index` was avoidable: the player was not
/// forced in by drops and still had a comfortable margin after taking it.
pub fn is_avoidable_eighty(
    rounds: &[Round],
    index: usize,
    player_id: &str,
    points_before: i64,
    max_points: i64,
) -> bool {
    let remaining = max_points - (points_before + FULL_HAND_SCORE);
    remaining > PRESSURE_MARGIN
        && consecutive_drops_before(rounds, index, player_id) < MUST_PLAY_DROP_RUN
}

#[cfg(test)]
mod tests {
    use super::*;
    use rstest::rstest;

    fn round(scores: Vec<(&str, i64)>, drops: Vec<&str>, double_drops: Vec<&str>) -> Round {
        Round {
            scores: scores
                .into_iter()
                .map(|(id, score)| (id.to_string(), score))
                .collect(),
            drops: drops.into_iter().map(|id| (id.to_string(), true)).collect(),
            double_drops: double_drops
                .into_iter()
                .map(|id| (id.to_string(), true))
                .collect(),
            ..Round::default()
        }
    }

    fn three_drops_then_play() -> Vec<Round> {
        vec![
            round(vec![("p1", 20)], vec!["p1"], vec![]),
            round(vec![("p1", 20)], vec!["p1"], vec![]),
            round(vec![("p1", 20)], vec!["p1"], vec![]),
            round(vec![("p1", 0)], vec![], vec![]),
        ]
    }

    #[test]
    fn counts_consecutive_drops_backwards() {
        let rounds = three_drops_then_play();
        assert_eq!(consecutive_drops_before(&rounds, 3, "p1"), 3);
        assert_eq!(consecutive_drops_before(&rounds, 2, "p1"), 2);
        assert_eq!(consecutive_drops_before(&rounds, 0, "p1"), 0);
    }

    #[test]
    fn run_breaks_at_first_played_round() {
        let rounds = vec![
            round(vec![("p1", 20)], vec!["p1"], vec![]),
            round(vec![("p1", 15)], vec![], vec![]),
            round(vec![("p1", 40)], vec![], vec!["p1"]),
            round(vec![("p1", 20)], vec!["p1"], vec![]),
            round(vec![("p1", 0)], vec![], vec![]),
        ];
        // Only the double-drop + drop pair directly before index 4 count.
        assert_eq!(consecutive_drops_before(&rounds, 4, "p1"), 2);
    }

    #[test]
    fn double_drops_count_toward_the_run() {
        let rounds = vec![
            round(vec![("p1", 40)], vec![], vec!["p1"]),
            round(vec![("p1", 20)], vec!["p1"], vec![]),
            round(vec![("p1", 40)], vec![], vec!["p1"]),
            round(vec![("p1", 0)], vec![], vec![]),
        ];
        assert_eq!(consecutive_drops_before(&rounds, 3, "p1"), 3);
        assert!(is_must_play(&rounds, 3, "p1", 100, 120));
    }

    #[test]
    fn three_prior_drops_force_the_round() {
        let rounds = three_drops_then_play();
        // 60 points of drops against a 120 cap: no score pressure yet, the
        // drop run alone forces the hand.
        assert!(is_must_play(&rounds, 3, "p1", 60, 120));
    }

    #[rstest]
    #[case(100, 120, true)] // 20 from the cap: one bad round eliminates
    #[case(101, 120, true)]
    #[case(90, 120, false)] // 30 from the cap: still breathing room
    #[case(100, 200, false)]
    fn score_pressure_forces_the_round(
        #[case] points_before: i64,
        #[case] max_points: i64,
        #[case] expected: bool,
    ) {
        let rounds = vec![round(vec![("p1", 10)], vec![], vec![])];
        assert_eq!(
            is_must_play(&rounds, 0, "p1", points_before, max_points),
            expected
        );
    }

    #[rstest]
    #[case(10, 120, true)] // 120 - 90 = 30 > 20: avoidable bust
    #[case(20, 120, false)] // 120 - 100 = 20: cutting it too close
    #[case(30, 120, false)]
    fn avoidable_eighty_needs_margin_after_the_bust(
        #[case] points_before: i64,
        #[case] max_points: i64,
        #[case] expected: bool,
    ) {
        let rounds = vec![round(vec![("p1", 80)], vec![], vec![])];
        assert_eq!(
            is_avoidable_eighty(&rounds, 0, "p1", points_before, max_points),
            expected
        );
    }

    #[test]
    fn forced_eighty_is_not_avoidable() {
        let rounds = vec![
            round(vec![("p1", 20)], vec!["p1"], vec![]),
            round(vec![("p1", 20)], vec!["p1"], vec![]),
            round(vec![("p1", 20)], vec!["p1"], vec![]),
            round(vec![("p1", 80)], vec![], vec![]),
        ];
        // Plenty of margin against a 300 cap, but the player was forced in.
        assert!(!is_avoidable_eighty(&rounds, 3, "p1", 60, 300));
    }
}
