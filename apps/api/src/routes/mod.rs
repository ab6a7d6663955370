pub mod health;

use axum::{
    extract::DefaultBodyLimit,
    routing::{get, post},
    Router,
};

use crate::generation::handlers;
use crate::state::AppState;

pub fn build_router(state: AppState) -> Router {
    let upload_limit = DefaultBodyLimit::max(state.max_upload_bytes);

    Router::new()
        .route("/health", get(health::health_handler))
        .route(
            "/api/v1/questions",
            post(handlers::handle_generate_questions),
        )
        .route(
            "/api/v1/questions/document",
            post(handlers::handle_download_document),
        )
        .layer(upload_limit)
        .with_state(state)
}
