//! Conversion from raw dataset records to [`NormalizedEvent`].
//!
//! [`normalize`] is total: every derived field has one explicit resolution
//! chain ending in a default, so malformed or missing source fields never
//! fail a load.
//!
//! # Resolution Rules
//!
//! | Field | Chain |
//! |-------|-------|
//! | `year` | 4-digit prefix of `date` → non-zero `year` → `yyyy` → `0` |
//! | `day_key` | characters 6-10 of a 10+ character `date` → pre-derived `mmdd` (year-less records only) → `__NA__` |
//! | `category` | trimmed, title-cased `category` → `General` |

use chronicle_types::{
    DEFAULT_CATEGORY, LooseYear, NO_DAY_KEY, NormalizedEvent, RawEventRecord, UNKNOWN_YEAR,
};

/// Normalize one raw record.
pub fn normalize(raw: RawEventRecord) -> NormalizedEvent {
    let date = raw.date.unwrap_or_default();

    let date_year = year_from_date(&date);
    let field_year = raw
        .year
        .as_ref()
        .and_then(LooseYear::as_year)
        .filter(|year| *year != UNKNOWN_YEAR);
    let year = date_year
        .or(field_year)
        .or_else(|| raw.yyyy.as_ref().and_then(LooseYear::as_year))
        .unwrap_or(UNKNOWN_YEAR);

    // A pre-derived day key is only trusted when nothing else resolved a year.
    let day_key = day_key_from_date(&date)
        .or_else(|| {
            raw.mmdd
                .filter(|key| date_year.is_none() && field_year.is_none() && is_day_key(key))
        })
        .unwrap_or_else(|| NO_DAY_KEY.to_owned());

    let category = raw
        .category
        .as_deref()
        .map(str::trim)
        .filter(|c| !c.is_empty())
        .map_or_else(|| DEFAULT_CATEGORY.to_owned(), title_case);

    let title = raw.title.unwrap_or_default();
    let description = raw.description.unwrap_or_default();
    let region = raw.region.unwrap_or_default();
    let tags = raw.tags.unwrap_or_default();

    let search_blob = [
        title.as_str(),
        description.as_str(),
        category.as_str(),
        region.as_str(),
        tags.join(" ").as_str(),
    ]
    .join(" ")
    .to_lowercase();

    NormalizedEvent {
        title,
        description,
        date,
        year,
        day_key,
        category,
        region,
        tags,
        search_blob,
    }
}

/// Parse the year from the first four characters of an ISO date.
fn year_from_date(date: &str) -> Option<i32> {
    date.get(..4)
        .filter(|prefix| prefix.bytes().all(|b| b.is_ascii_digit()))
        .and_then(|prefix| prefix.parse().ok())
}

/// Characters 6-10 of a date that is at least 10 characters long.
fn day_key_from_date(date: &str) -> Option<String> {
    if date.chars().count() < 10 {
        return None;
    }
    Some(date.chars().skip(5).take(5).collect())
}

/// Whether `key` has the `MM-DD` shape.
pub fn is_day_key(key: &str) -> bool {
    matches!(
        key.as_bytes(),
        [m1, m2, b'-', d1, d2] if [m1, m2, d1, d2].iter().all(|b| b.is_ascii_digit())
    )
}

/// Capitalize the first letter of every alphabetic run and lower-case the
/// rest, so `"world WAR"` and `"World war"` group together.
pub fn title_case(input: &str) -> String {
    let mut out = String::with_capacity(input.len());
    let mut in_word = false;
    for c in input.chars() {
        if c.is_alphabetic() {
            if in_word {
                out.extend(c.to_lowercase());
            } else {
                out.extend(c.to_uppercase());
            }
            in_word = true;
        } else {
            out.push(c);
            in_word = false;
        }
    }
    out
}
