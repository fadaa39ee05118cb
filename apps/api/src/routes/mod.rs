pub mod health;

use axum::{
    routing::{get, post},
    Router,
};

use crate::chains::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    Router::new()
        .route("/health", get(health::health_handler))
        .route("/api/v1/categories", get(handlers::handle_categories))
        .route("/api/v1/suggestions", post(handlers::handle_suggest))
        .route(
            "/api/v1/sessions/:id/history",
            get(handlers::handle_history),
        )
        .with_state(state)
}
