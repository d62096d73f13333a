//! Raw dataset records.
//!
//! The source dataset is produced by an offline generator and by hand
//! curation, so records do not share a single shape: some carry a full ISO
//! `date`, some only a `year` (as a number or a string), some were already
//! pre-processed and carry `yyyy`/`mmdd`. Every field is therefore
//! optional and unknown keys are ignored.

use serde::{Deserialize, Serialize};

/// A year value that may be encoded as a JSON number or a string.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum LooseYear {
    /// A numeric year, e.g. `1947`.
    Number(serde_json::Number),
    /// A textual year, e.g. `"1947"`. May not be numeric at all.
    Text(String),
}

impl LooseYear {
    /// Interpret the value as an integer year.
    ///
    /// Returns `None` for non-integral numbers, non-numeric text, and
    /// values that do not fit in an `i32`.
    pub fn as_year(&self) -> Option<i32> {
        match self {
            Self::Number(n) => n.as_i64().and_then(|v| i32::try_from(v).ok()),
            Self::Text(s) => s.trim().parse::<i32>().ok(),
        }
    }
}

impl From<i32> for LooseYear {
    fn from(year: i32) -> Self {
        Self::Number(serde_json::Number::from(year))
    }
}

/// One event record exactly as it appears in the source JSON.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct RawEventRecord {
    /// ISO `YYYY-MM-DD` date, when the exact day is known.
    #[serde(default)]
    pub date: Option<String>,
    /// Year only, when no exact day is known.
    #[serde(default)]
    pub year: Option<LooseYear>,
    /// Pre-derived year from an earlier normalization pass.
    #[serde(default)]
    pub yyyy: Option<LooseYear>,
    /// Pre-derived `MM-DD` day key from an earlier normalization pass.
    #[serde(default)]
    pub mmdd: Option<String>,
    /// Short headline.
    #[serde(default)]
    pub title: Option<String>,
    /// Longer description.
    #[serde(default)]
    pub description: Option<String>,
    /// Free-form category name in any casing.
    #[serde(default)]
    pub category: Option<String>,
    /// Geographic region.
    #[serde(default)]
    pub region: Option<String>,
    /// Free-form tags.
    #[serde(default)]
    pub tags: Option<Vec<String>>,
}
