//! REST API endpoint handlers.
//!
//! All handlers read from the shared, immutable catalog in [`AppState`].
//! Query parameters are taken as raw strings and handed to the core,
//! which degrades malformed values instead of rejecting them.
//!
//! # Endpoints
//!
//! | Method | Path | Description |
//! |--------|------|-------------|
//! | `GET` | `/` | Catalog overview |
//! | `GET` | `/health` | Liveness check |
//! | `GET` | `/api/events` | Filtered events (`mmdd`, `date`, `q`, `category`, `start_year`, `end_year`, `limit`) |
//! | `GET` | `/api/today` | Events on today's UTC calendar day |
//! | `GET` | `/api/timeline` | Events of one year (`year`) |
//! | `GET` | `/api/categories` | Distinct categories |
//! | `GET` | `/api/years` | Distinct known years |
//! | `GET` | `/api/quiz` | Multiple-choice quiz (`mmdd`, `count`) |

use std::sync::Arc;

use axum::Json;
use axum::extract::{Query, State};
use axum::http::Uri;
use axum::response::IntoResponse;
use chronicle_core::query::{self, EventQuery, MAX_RESULT_LIMIT};
use chronicle_core::quiz::{self, QuizRequest};
use tracing::debug;

use crate::error::ApiError;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Query parameter structs
// ---------------------------------------------------------------------------

/// Query parameters for `GET /api/events`.
#[derive(Debug, Default, serde::Deserialize)]
pub struct EventsParams {
    /// `MM-DD` day key.
    pub mmdd: Option<String>,
    /// Full `YYYY-MM-DD` date; takes precedence over `mmdd`.
    pub date: Option<String>,
    /// Free-text search.
    pub q: Option<String>,
    /// Category name or `all`.
    pub category: Option<String>,
    /// Inclusive lower year bound.
    pub start_year: Option<String>,
    /// Inclusive upper year bound.
    pub end_year: Option<String>,
    /// Maximum number of events to return (1-200, default 200).
    pub limit: Option<String>,
}

impl EventsParams {
    /// Translate the wire parameters into a core query.
    ///
    /// A `date` that does not parse disables day filtering entirely, even
    /// if `mmdd` is also present.
    pub fn to_query(&self) -> EventQuery {
        let day_key = match self.date.as_deref().filter(|d| !d.is_empty()) {
            Some(date) => EventQuery::day_from_date(date),
            None => self.mmdd.clone(),
        };
        EventQuery {
            day_key,
            text: self.q.clone(),
            category: self.category.clone(),
            year_min: self.start_year.clone(),
            year_max: self.end_year.clone(),
        }
    }
}

/// Query parameters for `GET /api/timeline`.
#[derive(Debug, serde::Deserialize)]
pub struct TimelineParams {
    /// The year to list.
    pub year: Option<String>,
}

/// Query parameters for `GET /api/quiz`.
#[derive(Debug, serde::Deserialize)]
pub struct QuizParams {
    /// Restrict questions to one `MM-DD` day.
    pub mmdd: Option<String>,
    /// Number of questions (1-20, default 5).
    pub count: Option<String>,
}

// ---------------------------------------------------------------------------
// GET / -- overview
// ---------------------------------------------------------------------------

/// Catalog statistics plus today's event count, for UI hints.
pub async fn index(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let catalog = &state.catalog;
    let today = today_day_key();
    let today_count = catalog.on_day(&today).count();
    let (year_min, year_max) = catalog.year_range().unzip();

    Json(serde_json::json!({
        "name": "chronicle",
        "events": catalog.len(),
        "years": {
            "min": year_min,
            "max": year_max,
        },
        "categories": catalog.categories(),
        "today": {
            "day_key": today,
            "count": today_count,
        },
    }))
}

// ---------------------------------------------------------------------------
// GET /health
// ---------------------------------------------------------------------------

/// Liveness check.
pub async fn health(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    Json(serde_json::json!({
        "status": "ok",
        "events": state.catalog.len(),
    }))
}

// ---------------------------------------------------------------------------
// GET /api/events -- filtered events
// ---------------------------------------------------------------------------

/// Query events with day, text, category, and year-range filters.
///
/// Results are ordered by year then date and capped at `limit`.
pub async fn list_events(
    State(state): State<Arc<AppState>>,
    Query(params): Query<EventsParams>,
) -> Result<impl IntoResponse, ApiError> {
    let limit = query::clamp_limit(params.limit.as_deref());
    let results = query::query(&state.catalog, &params.to_query());
    let events = query::project(&results, limit);

    debug!(matched = results.len(), returned = events.len(), "events served");

    Ok(Json(serde_json::json!({
        "count": events.len(),
        "events": serde_json::to_value(&events)?,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/today -- events on today's calendar day
// ---------------------------------------------------------------------------

/// Events that happened on today's (UTC) month and day, in any year.
pub async fn today(State(state): State<Arc<AppState>>) -> Result<impl IntoResponse, ApiError> {
    let day_key = today_day_key();
    let params = EventQuery {
        day_key: Some(day_key.clone()),
        ..EventQuery::default()
    };
    let results = query::query(&state.catalog, &params);
    let events = query::project(&results, MAX_RESULT_LIMIT);

    Ok(Json(serde_json::json!({
        "day_key": day_key,
        "count": events.len(),
        "events": serde_json::to_value(&events)?,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/timeline -- one year
// ---------------------------------------------------------------------------

/// Events of a single year ordered by date.
///
/// A missing or unparsable `year` yields an empty list.
pub async fn timeline(
    State(state): State<Arc<AppState>>,
    Query(params): Query<TimelineParams>,
) -> Result<impl IntoResponse, ApiError> {
    let raw_year = params.year.unwrap_or_default();
    let events: Vec<_> = state
        .catalog
        .timeline_lenient(&raw_year)
        .into_iter()
        .map(chronicle_types::NormalizedEvent::summary)
        .collect();

    Ok(Json(serde_json::json!({
        "year": raw_year,
        "count": events.len(),
        "events": serde_json::to_value(&events)?,
    })))
}

// ---------------------------------------------------------------------------
// GET /api/categories, GET /api/years -- indexes
// ---------------------------------------------------------------------------

/// Distinct categories, sorted.
pub async fn list_categories(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let categories = state.catalog.categories();
    Json(serde_json::json!({
        "count": categories.len(),
        "categories": categories,
    }))
}

/// Distinct known years, sorted.
pub async fn list_years(State(state): State<Arc<AppState>>) -> impl IntoResponse {
    let years = state.catalog.years();
    Json(serde_json::json!({
        "count": years.len(),
        "years": years,
    }))
}

// ---------------------------------------------------------------------------
// GET /api/quiz -- multiple-choice quiz
// ---------------------------------------------------------------------------

/// Generate a year-guessing quiz.
pub async fn get_quiz(
    State(state): State<Arc<AppState>>,
    Query(params): Query<QuizParams>,
) -> Result<impl IntoResponse, ApiError> {
    let request = QuizRequest::from_raw(params.mmdd.as_deref(), params.count.as_deref());
    let questions = quiz::generate_quiz(&state.catalog, &request, &mut rand::rng());

    Ok(Json(serde_json::json!({
        "count": questions.len(),
        "questions": serde_json::to_value(&questions)?,
    })))
}

// ---------------------------------------------------------------------------
// Fallback
// ---------------------------------------------------------------------------

/// JSON 404 for unknown routes.
pub async fn not_found(uri: Uri) -> ApiError {
    ApiError::NotFound(format!("no route for {}", uri.path()))
}

// ---------------------------------------------------------------------------
// Helpers
// ---------------------------------------------------------------------------

fn today_day_key() -> String {
    chrono::Utc::now().format("%m-%d").to_string()
}
