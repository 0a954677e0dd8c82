use axum::{
    extract::{Query, State},
    response::IntoResponse,
    Json,
};
use serde::Deserialize;
use std::sync::Arc;
use tracing::{info, instrument};

use super::service::InsightsService;
use crate::shared::{no_cache, parse_game_type, AppError, AppState};

/// Query parameters for the category rankings endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct InsightsQuery {
    pub game_type: Option<String>,
    pub user_id: Option<String>,
}

/// Query parameters for the comparison endpoint
#[derive(Debug, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CompareQuery {
    pub player1: Option<String>,
    pub player2: Option<String>,
    pub game_type: Option<String>,
}

/// HTTP handler for achievement category rankings
///
/// GET /stats/insights?gameType=rummy&userId=u1
/// Returns the top player per category plus the requesting user's own values
#[instrument(name = "game_insights", skip(state))]
pub async fn game_insights(
    State(state): State<AppState>,
    Query(query): Query<InsightsQuery>,
) -> Result<impl IntoResponse, AppError> {
    let game_type = parse_game_type(query.game_type.as_deref())?;
    info!(game_type = %game_type, "Computing category insights");

    // Use injected repositories from app state
    let service = InsightsService::new(
        Arc::clone(&state.game_repository),
        Arc::clone(&state.user_repository),
    );
    let response = service
        .category_insights(game_type, query.user_id.as_deref())
        .await?;

    Ok(no_cache(Json(response)))
}

/// HTTP handler for two-player head-to-head comparison
///
/// GET /stats/compare?player1=a&player2=b&gameType=rummy
/// Rejects missing or identical player ids before any aggregation runs
#[instrument(name = "compare_players", skip(state))]
pub async fn compare_players(
    State(state): State<AppState>,
    Query(query): Query<CompareQuery>,
) -> Result<impl IntoResponse, AppError> {
    let game_type = parse_game_type(query.game_type.as_deref())?;

    let (first, second) = match (query.player1.as_deref(), query.player2.as_deref()) {
        (Some(first), Some(second)) if !first.is_empty() && !second.is_empty() => (first, second),
        _ => {
            return Err(AppError::Validation(
                "Both player1 and player2 IDs are required".to_string(),
            ))
        }
    };

    info!(game_type = %game_type, first, second, "Comparing players");

    let service = InsightsService::new(
        Arc::clone(&state.game_repository),
        Arc::clone(&state.user_repository),
    );
    let response = service.compare_players(game_type, first, second).await?;

    Ok(no_cache(Json(response)))
}
