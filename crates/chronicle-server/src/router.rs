//! Axum router construction.
//!
//! Assembles all routes into a single [`Router`] with CORS and request
//! tracing middleware.

use std::sync::Arc;

use axum::Router;
use axum::routing::get;
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::handlers;
use crate::state::AppState;

/// Build the complete Axum router.
///
/// The router includes:
/// - `GET /` -- catalog overview
/// - `GET /health` -- liveness check
/// - `GET /api/events` -- filtered events
/// - `GET /api/today` -- events on today's calendar day
/// - `GET /api/timeline` -- events of one year
/// - `GET /api/categories` -- distinct categories
/// - `GET /api/years` -- distinct known years
/// - `GET /api/quiz` -- multiple-choice quiz
///
/// Unknown paths get a JSON 404. CORS allows any origin so a separately
/// hosted frontend can call the API.
pub fn build_router(state: Arc<AppState>) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/", get(handlers::index))
        .route("/health", get(handlers::health))
        .route("/api/events", get(handlers::list_events))
        .route("/api/today", get(handlers::today))
        .route("/api/timeline", get(handlers::timeline))
        .route("/api/categories", get(handlers::list_categories))
        .route("/api/years", get(handlers::list_years))
        .route("/api/quiz", get(handlers::get_quiz))
        .fallback(handlers::not_found)
        .layer(cors)
        .layer(TraceLayer::new_for_http())
        .with_state(state)
}
