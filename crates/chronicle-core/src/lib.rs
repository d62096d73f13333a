//! Event catalog, query engine, and quiz generator for the Chronicle
//! history service.
//!
//! # Architecture
//!
//! Raw dataset records are normalized once at startup into an immutable
//! [`Catalog`]. Every request afterwards is a pure, bounded computation
//! over a shared reference to that catalog:
//!
//! - [`normalize`] -- total conversion from heterogeneous raw records to
//!   [`NormalizedEvent`](chronicle_types::NormalizedEvent)
//! - [`catalog`] -- the event sequence plus distinct-year and category
//!   indexes, and the JSON dataset loader
//! - [`query`] -- conjunctive day/text/category/year-range filtering with
//!   a stable `(year, date)` ordering
//! - [`quiz`] -- year-guessing questions with randomized distractors
//! - [`config`] -- typed YAML configuration for the service

pub mod catalog;
pub mod config;
pub mod normalize;
pub mod query;
pub mod quiz;

pub use catalog::{Catalog, CatalogError};
pub use config::{ChronicleConfig, ConfigError};
pub use normalize::normalize;
pub use query::{EventQuery, query};
pub use quiz::{QuizRequest, generate_quiz};
