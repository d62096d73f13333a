//! Conjunctive event filtering with a stable `(year, date)` ordering.
//!
//! An [`EventQuery`] carries raw, unvalidated filter values as they arrive
//! from a client. [`EventQuery::predicates`] degrades anything malformed to
//! "no filter" and yields the surviving predicates in a fixed order (day,
//! text, category, minimum year, maximum year). [`query`] applies them one
//! after another and stable-sorts the survivors, so events with equal
//! `(year, date)` keep catalog order.

use chronicle_types::{EventSummary, NormalizedEvent};
use serde::Deserialize;
use tracing::debug;

use crate::catalog::Catalog;

/// Upper bound on the number of events a projection may return.
pub const MAX_RESULT_LIMIT: usize = 200;

/// Category value that disables category filtering.
const ALL_CATEGORIES: &str = "all";

// ---------------------------------------------------------------------------
// EventQuery
// ---------------------------------------------------------------------------

/// Raw filter values for [`query`]. Every field is optional.
#[derive(Debug, Clone, Default, PartialEq, Eq, Deserialize)]
pub struct EventQuery {
    /// Exact `MM-DD` day key.
    pub day_key: Option<String>,
    /// Case-insensitive substring of the event's search text.
    pub text: Option<String>,
    /// Case-insensitive category name. `all` disables the filter.
    pub category: Option<String>,
    /// Inclusive lower year bound, unparsed.
    pub year_min: Option<String>,
    /// Inclusive upper year bound, unparsed.
    pub year_max: Option<String>,
}

impl EventQuery {
    /// Derive a day key from a full `YYYY-MM-DD` date.
    ///
    /// Returns `None` when the date does not parse, which callers treat as
    /// "no day filter".
    pub fn day_from_date(date: &str) -> Option<String> {
        chrono::NaiveDate::parse_from_str(date.trim(), "%Y-%m-%d")
            .ok()
            .map(|d| d.format("%m-%d").to_string())
    }

    /// The effective predicates in application order.
    pub fn predicates(&self) -> Vec<Predicate> {
        let mut predicates = Vec::with_capacity(5);

        if let Some(day) = non_empty(self.day_key.as_deref()) {
            predicates.push(Predicate::Day(day.to_owned()));
        }
        if let Some(text) = non_empty(self.text.as_deref()) {
            predicates.push(Predicate::Text(text.to_lowercase()));
        }
        if let Some(category) = non_empty(self.category.as_deref())
            && !category.eq_ignore_ascii_case(ALL_CATEGORIES)
        {
            predicates.push(Predicate::Category(category.to_lowercase()));
        }
        if let Some(min) = parse_year_bound(self.year_min.as_deref()) {
            predicates.push(Predicate::YearMin(min));
        }
        if let Some(max) = parse_year_bound(self.year_max.as_deref()) {
            predicates.push(Predicate::YearMax(max));
        }

        predicates
    }
}

// ---------------------------------------------------------------------------
// Predicate
// ---------------------------------------------------------------------------

/// One validated filter.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Predicate {
    /// `day_key` equals the value.
    Day(String),
    /// `search_blob` contains the (lower-cased) value.
    Text(String),
    /// Lower-cased `category` equals the (lower-cased) value.
    Category(String),
    /// `year` is at least the value.
    YearMin(i32),
    /// `year` is at most the value.
    YearMax(i32),
}

impl Predicate {
    /// Whether `event` satisfies this predicate.
    pub fn matches(&self, event: &NormalizedEvent) -> bool {
        match self {
            Self::Day(day) => event.day_key == *day,
            Self::Text(needle) => event.search_blob.contains(needle.as_str()),
            Self::Category(wanted) => event.category.to_lowercase() == *wanted,
            Self::YearMin(min) => event.year >= *min,
            Self::YearMax(max) => event.year <= *max,
        }
    }
}

// ---------------------------------------------------------------------------
// Query evaluation
// ---------------------------------------------------------------------------

/// Filter the catalog and order the result by `(year, date)` ascending.
///
/// An empty result is a normal outcome. The catalog is never mutated.
pub fn query<'a>(catalog: &'a Catalog, params: &EventQuery) -> Vec<&'a NormalizedEvent> {
    let mut results: Vec<&NormalizedEvent> = catalog.events().iter().collect();

    for predicate in params.predicates() {
        results.retain(|event| predicate.matches(event));
    }

    // `sort_by` is stable, so ties keep catalog order.
    results.sort_by(|a, b| a.year.cmp(&b.year).then_with(|| a.date.cmp(&b.date)));

    debug!(matched = results.len(), total = catalog.len(), "Query evaluated");
    results
}

/// Bounded projection of query results for the API.
pub fn project(results: &[&NormalizedEvent], limit: usize) -> Vec<EventSummary> {
    results
        .iter()
        .take(limit.clamp(1, MAX_RESULT_LIMIT))
        .map(|event| event.summary())
        .collect()
}

/// Parse a caller-supplied result limit, clamped to `[1, 200]`.
///
/// Missing or unparsable values fall back to the maximum.
pub fn clamp_limit(raw: Option<&str>) -> usize {
    raw.and_then(|s| s.trim().parse::<i64>().ok())
        .map_or(MAX_RESULT_LIMIT, |requested| {
            usize::try_from(requested.max(1)).map_or(MAX_RESULT_LIMIT, |n| n.min(MAX_RESULT_LIMIT))
        })
}

fn non_empty(value: Option<&str>) -> Option<&str> {
    value.filter(|v| !v.is_empty())
}

fn parse_year_bound(raw: Option<&str>) -> Option<i32> {
    non_empty(raw).and_then(|s| s.trim().parse().ok())
}
