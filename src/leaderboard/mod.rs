//! Weighted-rating leaderboards and per-player rank summaries, built on the
//! same tallies the insights engine produces.

pub mod handlers;

mod models;
mod rating;
mod service;

pub use models::{LeaderboardEntry, LeaderboardResponse, PlayerOverviewResponse, TypeOverview};
pub use rating::{weighted_rating, win_percentage, win_points};
pub use service::LeaderboardService;
