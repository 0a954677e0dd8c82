//! Statistics aggregation and ranking engine.
//!
//! A pure, synchronous reduction over an immutable snapshot of completed
//! games: the accumulator replays the log chronologically into per-player
//! tallies, the category selector ranks them, and the comparator runs the
//! same kind of reduction restricted to two players. Every request recomputes
//! from scratch; the engine holds no cache and never mutates game records.

pub mod handlers;

mod accumulator;
mod categories;
mod comparison;
mod models;
mod pressure;
mod service;

pub use accumulator::accumulate;
pub use categories::{
    applicable, pick_top, rank_categories, CategoryDef, CategoryValue, Direction, CATEGORIES,
    MIN_GAMES, MIN_MUST_PLAY_ROUNDS, MIN_ROUNDS,
};
pub use comparison::compare_pair;
pub use models::{
    percentage, CategoryLeader, ComparisonResponse, ComparisonSide, ComparisonStats, Contributions,
    Elimination, GameHighlight, HeadToHead, InsightsResponse, PlayerTally, StreakState,
};
pub use pressure::{
    consecutive_drops_before, is_avoidable_eighty, is_must_play, FULL_HAND_SCORE,
    MUST_PLAY_DROP_RUN, PRESSURE_MARGIN,
};
pub use service::InsightsService;
