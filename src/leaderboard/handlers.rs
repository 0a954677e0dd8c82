use axum::{
    extract::{Path, Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::service::LeaderboardService;
use crate::shared::{no_cache, parse_game_type, AppError, AppState};

/// Query parameters for the leaderboard endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct LeaderboardQuery {
    pub game_type: Option<String>,
}

/// HTTP handler for the weighted-rating leaderboard
///
/// GET /stats/leaderboard?gameType=chess
/// Returns the top ten players of the requested game type
#[instrument(name = "leaderboard", skip(state))]
pub async fn leaderboard(
    State(state): State<AppState>,
    Query(query): Query<LeaderboardQuery>,
) -> Result<impl IntoResponse, AppError> {
    let game_type = parse_game_type(query.game_type.as_deref())?;
    info!(game_type = %game_type, "Computing leaderboard");

    let service = LeaderboardService::new(
        Arc::clone(&state.game_repository),
        Arc::clone(&state.user_repository),
    );
    let response = service.leaderboard(game_type).await?;

    Ok(no_cache(Json(response)))
}

/// HTTP handler for a player's cross-game-type summary
///
/// GET /stats/player/:user_id
/// Returns totals and rank per game type; 404 for unknown players
#[instrument(name = "player_overview", skip(state))]
pub async fn player_overview(
    State(state): State<AppState>,
    Path(user_id): Path<String>,
) -> Result<impl IntoResponse, AppError> {
    info!(user_id = %user_id, "Computing player overview");

    let service = LeaderboardService::new(
        Arc::clone(&state.game_repository),
        Arc::clone(&state.user_repository),
    );
    let response = service.player_overview(&user_id).await?;

    Ok(no_cache(Json(response)))
}
