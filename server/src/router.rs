//! Router assembly for the question API.

use axum::routing::{get, post};
use axum::Router;
use interview_store::QuestionStore;
use tower_http::cors::CorsLayer;
use tower_http::trace::TraceLayer;

use crate::handlers::{questions, system};
use crate::state::AppState;

/// Builds the axum router with every `/api` route.
///
/// Unknown paths get a JSON 404 envelope instead of axum's empty body.
pub fn build_router<S: QuestionStore + 'static>(state: AppState<S>) -> Router {
    Router::new()
        // System
        .route("/api/health", get(system::health))
        .route("/api/status", get(system::status::<S>))
        .route("/api/skills", get(system::skills::<S>))
        .route("/api/statistics", get(system::statistics::<S>))
        .route("/api/backup", get(system::backup::<S>))
        .route("/api/clear", post(system::clear::<S>))
        // Question sets
        .route("/api/questions/generate", post(questions::generate::<S>))
        .route("/api/export", post(questions::export))
        .route("/api/search", post(questions::search::<S>))
        .route("/api/import", post(questions::import::<S>))
        // Single questions
        .route("/api/questions", post(questions::add::<S>))
        .route(
            "/api/questions/{id}",
            get(questions::get_one::<S>)
                .put(questions::update::<S>)
                .delete(questions::delete::<S>),
        )
        .fallback(system::not_found)
        .layer(TraceLayer::new_for_http())
        .layer(CorsLayer::permissive())
        .with_state(state)
}
