use std::sync::Arc;

use axum::{
    http::{HeaderValue, Method},
    routing::get,
    Router,
};
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::db::PlayerStore;

pub mod health;
pub mod players;

/// Store handle shared by every handler.
pub type SharedStore = Arc<dyn PlayerStore>;

pub fn router(store: SharedStore, cors_origins: Vec<HeaderValue>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(AllowOrigin::list(cors_origins))
        .allow_methods([Method::GET, Method::POST, Method::PUT, Method::DELETE])
        .allow_headers(Any);

    Router::new()
        // Root and health
        .route("/", get(|| async { "Soccer Player API - v1.0" }))
        .route("/health", get(health::health_check))

        // Player endpoints
        .route("/api/players", get(players::get_players).post(players::create_player))
        .route("/api/players/search", get(players::search_players))
        .route(
            "/api/players/{id}",
            get(players::get_player_by_id)
                .put(players::update_player)
                .delete(players::delete_player),
        )
        .route("/api/players/position/{position}", get(players::get_players_by_position))
        .route("/api/players/team/{team}", get(players::get_players_by_team))

        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(store)
}
