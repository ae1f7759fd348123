//! Axum router configuration with middleware.
//!
//! Catalog routes live under `/api/songs`.
//! Middleware: CORS, tracing.

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::http::handlers;
use crate::state::AppState;

/// Build the complete API router with all routes and middleware.
pub fn build_router(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    let song_routes = Router::new()
        .route(
            "/",
            get(handlers::song::list_songs)
                .post(handlers::song::create_song)
                .put(handlers::song::update_song),
        )
        .route("/category/{category}", get(handlers::song::list_by_category))
        .route("/artist/{artist_name}", get(handlers::song::list_by_artist))
        .route("/melody/id/{id}", get(handlers::song::get_by_melody_id))
        .route("/melody/type/{melody_type}", get(handlers::song::list_by_melody_type))
        .route(
            "/{id}",
            get(handlers::song::get_song).delete(handlers::song::delete_song),
        );

    Router::new()
        .nest("/api/songs", song_routes)
        .route("/health", get(health_check))
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}

/// GET /health - Simple health check endpoint.
async fn health_check() -> axum::Json<serde_json::Value> {
    axum::Json(serde_json::json!({
        "status": "ok",
        "version": env!("CARGO_PKG_VERSION"),
    }))
}
