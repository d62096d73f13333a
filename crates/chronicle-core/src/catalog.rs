//! The immutable, process-wide event catalog.
//!
//! A [`Catalog`] is built once at startup from the source dataset and
//! shared read-only for the rest of the process lifetime, so concurrent
//! readers need no locking. The base event sequence keeps source order,
//! which later serves as the tie-break for query ordering. Only the
//! derived indexes are sorted.

use std::collections::BTreeSet;
use std::path::Path;

use chronicle_types::{NormalizedEvent, RawEventRecord};
use tracing::{debug, info};

use crate::normalize::normalize;

/// Errors that make the dataset unusable. These are startup-fatal.
#[derive(Debug, thiserror::Error)]
pub enum CatalogError {
    /// The dataset file could not be read.
    #[error("failed to read dataset {path}: {source}")]
    Io {
        /// Path that was attempted.
        path: String,
        /// The underlying I/O error.
        source: std::io::Error,
    },

    /// The dataset is not a JSON array of event records.
    #[error("failed to parse dataset: {source}")]
    Json {
        /// The underlying JSON error.
        #[from]
        source: serde_json::Error,
    },
}

/// Normalized events plus precomputed indexes.
#[derive(Debug, Clone, Default)]
pub struct Catalog {
    events: Vec<NormalizedEvent>,
    years: Vec<i32>,
    categories: Vec<String>,
}

impl Catalog {
    /// Build a catalog from raw records in a single pass.
    pub fn from_records(records: impl IntoIterator<Item = RawEventRecord>) -> Self {
        let mut events = Vec::new();
        let mut years = BTreeSet::new();
        let mut categories = BTreeSet::new();

        for raw in records {
            let event = normalize(raw);
            if event.has_known_year() {
                years.insert(event.year);
            }
            if !categories.contains(&event.category) {
                categories.insert(event.category.clone());
            }
            events.push(event);
        }

        let catalog = Self {
            events,
            years: years.into_iter().collect(),
            categories: categories.into_iter().collect(),
        };

        info!(
            events = catalog.events.len(),
            distinct_years = catalog.years.len(),
            categories = catalog.categories.len(),
            "Catalog built"
        );

        catalog
    }

    /// Parse a JSON array of raw records and build a catalog from it.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Json`] if the input is not a JSON array of
    /// objects.
    pub fn from_json_str(json: &str) -> Result<Self, CatalogError> {
        let records: Vec<RawEventRecord> = serde_json::from_str(json)?;
        debug!(records = records.len(), "Dataset parsed");
        Ok(Self::from_records(records))
    }

    /// Load the dataset file at `path`.
    ///
    /// # Errors
    ///
    /// Returns [`CatalogError::Io`] if the file is missing or unreadable,
    /// or [`CatalogError::Json`] if its contents are malformed.
    pub fn load(path: &Path) -> Result<Self, CatalogError> {
        let contents = std::fs::read_to_string(path).map_err(|source| CatalogError::Io {
            path: path.display().to_string(),
            source,
        })?;
        info!(path = %path.display(), bytes = contents.len(), "Loading dataset");
        Self::from_json_str(&contents)
    }

    /// All events in source order.
    pub fn events(&self) -> &[NormalizedEvent] {
        &self.events
    }

    /// Sorted distinct years greater than zero.
    pub fn years(&self) -> &[i32] {
        &self.years
    }

    /// Sorted distinct categories.
    pub fn categories(&self) -> &[String] {
        &self.categories
    }

    /// Number of events.
    pub const fn len(&self) -> usize {
        self.events.len()
    }

    /// Whether the catalog holds no events.
    pub const fn is_empty(&self) -> bool {
        self.events.is_empty()
    }

    /// Earliest and latest known year, if any event has one.
    pub fn year_range(&self) -> Option<(i32, i32)> {
        Some((*self.years.first()?, *self.years.last()?))
    }

    /// Events on one calendar day, in source order.
    pub fn on_day<'a>(&'a self, day_key: &'a str) -> impl Iterator<Item = &'a NormalizedEvent> {
        self.events.iter().filter(move |e| e.day_key == day_key)
    }

    /// Events of one year ordered by date. Equal dates keep source order.
    pub fn timeline(&self, year: i32) -> Vec<&NormalizedEvent> {
        let mut events: Vec<&NormalizedEvent> =
            self.events.iter().filter(|e| e.year == year).collect();
        events.sort_by(|a, b| a.date.cmp(&b.date));
        events
    }

    /// [`timeline`](Self::timeline) for an unparsed year. Unparsable input
    /// yields an empty list.
    pub fn timeline_lenient(&self, raw_year: &str) -> Vec<&NormalizedEvent> {
        raw_year
            .trim()
            .parse::<i32>()
            .map_or_else(|_| Vec::new(), |year| self.timeline(year))
    }
}
