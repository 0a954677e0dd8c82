use axum::{
    body::Body,
    http::{HeaderMap, Request, StatusCode},
    routing::get,
    Router,
};
use std::sync::Arc;
use tower::ServiceExt; // for `oneshot`

use gamenight::game::InMemoryGameRepository;
use gamenight::shared::AppState;
use gamenight::user::InMemoryUserRepository;
use gamenight::{insights, leaderboard, Game, GameRepository, UserProfile, UserRepository};

/// Seeded repositories plus the full statistics router.
pub struct TestSetup {
    pub game_repository: Arc<InMemoryGameRepository>,
    pub user_repository: Arc<InMemoryUserRepository>,
}

impl TestSetup {
    pub fn new() -> Self {
        Self {
            game_repository: Arc::new(InMemoryGameRepository::new()),
            user_repository: Arc::new(InMemoryUserRepository::new()),
        }
    }

    pub async fn with_games(self, games: Vec<Game>) -> Self {
        for game in games {
            self.game_repository.add_game(game).await.unwrap();
        }
        self
    }

    pub async fn with_users(self, users: &[(&str, &str)]) -> Self {
        for (id, name) in users {
            self.user_repository
                .register_user(UserProfile {
                    id: id.to_string(),
                    name: name.to_string(),
                    profile_photo: None,
                })
                .await
                .unwrap();
        }
        self
    }

    /// Builds the same route set `main` wires up.
    pub fn router(&self) -> Router {
        let state = AppState::new(
            self.game_repository.clone(),
            self.user_repository.clone(),
        );
        Router::new()
            .route("/stats/insights", get(insights::handlers::game_insights))
            .route("/stats/compare", get(insights::handlers::compare_players))
            .route(
                "/stats/leaderboard",
                get(leaderboard::handlers::leaderboard),
            )
            .route(
                "/stats/player/:user_id",
                get(leaderboard::handlers::player_overview),
            )
            .with_state(state)
    }

    pub async fn get(&self, uri: &str) -> (StatusCode, serde_json::Value, HeaderMap) {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();

        let status = response.status();
        let headers = response.headers().clone();
        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&body).unwrap_or(serde_json::Value::Null);
        (status, json, headers)
    }

    /// Raw body bytes, for byte-identical determinism checks.
    pub async fn get_raw(&self, uri: &str) -> Vec<u8> {
        let response = self
            .router()
            .oneshot(Request::builder().uri(uri).body(Body::empty()).unwrap())
            .await
            .unwrap();
        axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap()
            .to_vec()
    }
}

impl Default for TestSetup {
    fn default() -> Self {
        Self::new()
    }
}
