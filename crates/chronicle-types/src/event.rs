//! Normalized events and their API projection.

use serde::{Deserialize, Serialize};
use ts_rs::TS;

/// Day key assigned to events that only carry a year.
pub const NO_DAY_KEY: &str = "__NA__";

/// Year assigned to events whose year could not be resolved.
pub const UNKNOWN_YEAR: i32 = 0;

/// Category assigned to events without one.
pub const DEFAULT_CATEGORY: &str = "General";

// ---------------------------------------------------------------------------
// NormalizedEvent
// ---------------------------------------------------------------------------

/// Canonical in-memory form of a historical event.
///
/// Built once from a [`RawEventRecord`](crate::RawEventRecord) when the
/// catalog is loaded and never mutated afterwards. All derived fields
/// (`year`, `day_key`, `search_blob`) are consistent with the others at
/// build time.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedEvent {
    /// Short headline. May be empty.
    pub title: String,
    /// Longer description. May be empty.
    pub description: String,
    /// Original ISO date string, or empty when the source had none.
    pub date: String,
    /// Resolved year, or [`UNKNOWN_YEAR`].
    pub year: i32,
    /// Canonical `MM-DD` day key, or [`NO_DAY_KEY`].
    pub day_key: String,
    /// Title-cased category, never empty.
    pub category: String,
    /// Geographic region. May be empty.
    pub region: String,
    /// Free-form tags in source order.
    pub tags: Vec<String>,
    /// Lower-cased concatenation of the text fields for substring search.
    #[serde(skip)]
    pub search_blob: String,
}

impl NormalizedEvent {
    /// Whether the event has a usable year.
    pub const fn has_known_year(&self) -> bool {
        self.year > UNKNOWN_YEAR
    }

    /// Whether the event is pinned to a specific calendar day.
    pub fn has_day(&self) -> bool {
        self.day_key != NO_DAY_KEY
    }

    /// Bounded projection of the event served by the API.
    pub fn summary(&self) -> EventSummary {
        EventSummary {
            title: self.title.clone(),
            description: self.description.clone(),
            date: self.date.clone(),
            year: self.year,
            category: self.category.clone(),
            region: self.region.clone(),
            tags: self.tags.clone(),
        }
    }
}

// ---------------------------------------------------------------------------
// EventSummary
// ---------------------------------------------------------------------------

/// The fields of an event exposed by the events API.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize, TS)]
#[ts(export, export_to = "bindings/")]
pub struct EventSummary {
    /// Short headline.
    pub title: String,
    /// Longer description.
    pub description: String,
    /// ISO date, or empty.
    pub date: String,
    /// Resolved year, `0` when unknown.
    pub year: i32,
    /// Title-cased category.
    pub category: String,
    /// Geographic region.
    pub region: String,
    /// Free-form tags.
    pub tags: Vec<String>,
}
