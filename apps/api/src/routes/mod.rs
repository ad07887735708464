pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::quotes::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/quotes/generate", post(handlers::handle_generate))
        .route("/api/v1/quotes/current", get(handlers::handle_current))
        .route("/api/v1/quotes/copy", post(handlers::handle_copy))
        .route("/api/v1/quotes/like", post(handlers::handle_toggle_like))
        .route("/api/v1/quotes/image", get(handlers::handle_download_image))
        .with_state(state)
}
