pub mod client;
pub mod config;
pub mod dto;
pub mod handlers;
pub mod models;
pub mod render;
pub mod service;

use axum::{
    Router,
    routing::{get, post},
};

use std::sync::Arc;

use tower_http::trace::TraceLayer;

use handlers::AppState;

/// Build the page router. Kept out of `main` so integration tests can serve
/// the exact same application.
pub fn router(state: Arc<AppState>) -> Router {
    Router::new()
        .route("/", get(handlers::home))
        .route("/notes", get(handlers::static_list))
        .route("/notes/{id}", get(handlers::static_detail))
        .route(
            "/notes/edit/{id}",
            get(handlers::edit_form).post(handlers::submit_edit),
        )
        .route("/notes-ssr", get(handlers::ssr_list))
        .route("/notes-ssr/{id}", get(handlers::ssr_detail))
        .route("/notes-ssr/{id}/delete", post(handlers::delete_note))
        .with_state(state)
        .layer(TraceLayer::new_for_http())
}
