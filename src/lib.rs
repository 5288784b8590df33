//! ArtisanAI storytelling backend: multilingual craft-story translation.

pub mod config_manager;
pub mod routes;
pub mod state;
pub mod translate;

use axum::Router;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use state::AppState;

/// Build the HTTP application around `state`
pub fn build_app(state: AppState) -> Router {
    Router::new()
        .merge(routes::create_routes())
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
