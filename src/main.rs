use axum::{routing::get, Router};
use std::sync::Arc;
use tower_http::{cors::CorsLayer, trace::TraceLayer};
use tracing::info;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

use gamenight::game::InMemoryGameRepository;
use gamenight::shared::AppState;
use gamenight::user::InMemoryUserRepository;
use gamenight::{insights, leaderboard};

#[tokio::main]
async fn main() {
    // Initialize tracing
    tracing_subscriber::registry()
        .with(
            tracing_subscriber::EnvFilter::try_from_default_env()
                .unwrap_or_else(|_| "gamenight=debug,tower_http=debug".into()),
        )
        .with(tracing_subscriber::fmt::layer())
        .init();

    info!("Starting game night statistics server");

    // Create shared application state with dependency injection
    // Easy to switch to database-backed repositories later
    let game_repository = Arc::new(InMemoryGameRepository::new());
    let user_repository = Arc::new(InMemoryUserRepository::new());
    let app_state = AppState::new(game_repository, user_repository);

    // build our application with the statistics routes
    let app = Router::new()
        .route("/", get(|| async { "game night statistics server" }))
        .route(
            "/stats/insights",
            get(insights::handlers::game_insights),
        )
        .route(
            "/stats/compare",
            get(insights::handlers::compare_players),
        )
        .route(
            "/stats/leaderboard",
            get(leaderboard::handlers::leaderboard),
        )
        .route(
            "/stats/player/:user_id",
            get(leaderboard::handlers::player_overview),
        )
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(app_state);

    // run our app with hyper, listening globally on port 3000
    let listener = tokio::net::TcpListener::bind("0.0.0.0:3000").await.unwrap();
    info!("Server running on http://localhost:3000");
    axum::serve(listener, app).await.unwrap();
}
