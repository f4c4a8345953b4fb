//! API Routes
//!
//! Configures the Axum router with all registry endpoints.

use axum::{
    routing::{get, post, put},
    Router,
};
use tower_http::{
    cors::{Any, CorsLayer},
    trace::TraceLayer,
};

use super::handlers::{
    create_handler, delete_handler, disable_refresh_handler, enable_refresh_handler, get_handler,
    health_handler, list_handler, reload_handler, stats_handler, update_handler, AppState,
};

/// Creates the main router with all endpoints configured.
///
/// # Endpoints
/// - `GET /players[?remote=true]` - List players, optionally reloading from remote
/// - `POST /players` - Create a player
/// - `GET /players/:id` - Get a player (cache, local, then remote)
/// - `PUT /players/:id` - Update a player
/// - `DELETE /players/:id` - Delete a player
/// - `POST /refresh` - Reload everything from the remote store once
/// - `PUT /refresh/auto` / `DELETE /refresh/auto` - Enable / disable auto refresh
/// - `GET /stats` - Cache statistics and auto-refresh state
/// - `GET /health` - Health check endpoint
///
/// # Middleware
/// - CORS: Allows any origin
/// - Tracing: Logs all requests
pub fn create_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/players", get(list_handler).post(create_handler))
        .route(
            "/players/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
        .route("/refresh", post(reload_handler))
        .route(
            "/refresh/auto",
            put(enable_refresh_handler).delete(disable_refresh_handler),
        )
        .route("/stats", get(stats_handler))
        .route("/health", get(health_handler))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
