//! Shared type definitions for the Chronicle history service.
//!
//! This crate is the single source of truth for the data shapes that flow
//! between the dataset loader, the query engine, the quiz generator, and
//! the HTTP surface. The response shapes are exported to `TypeScript` via
//! `ts-rs` for the web frontend.
//!
//! # Modules
//!
//! - [`raw`] -- Heterogeneous input records as they appear in the dataset
//! - [`event`] -- Normalized events and the bounded API projection
//! - [`quiz`] -- Multiple-choice quiz questions

pub mod event;
pub mod quiz;
pub mod raw;

// Re-export all public types at crate root for convenience.
pub use event::{DEFAULT_CATEGORY, EventSummary, NO_DAY_KEY, NormalizedEvent, UNKNOWN_YEAR};
pub use quiz::Question;
pub use raw::{LooseYear, RawEventRecord};
