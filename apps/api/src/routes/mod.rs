pub mod health;
pub mod options;

use axum::{
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/options", get(options::options_handler))
        .route("/api/generate", post(handlers::handle_generate))
        .with_state(state)
}
