//! JSON HTTP API for the Chronicle history service.
//!
//! This crate provides an Axum HTTP server that exposes the query engine
//! and quiz generator of [`chronicle_core`]:
//!
//! - **Events** (`/api/events`, `/api/today`, `/api/timeline`) -- filtered,
//!   ordered, bounded event listings
//! - **Indexes** (`/api/categories`, `/api/years`) -- the catalog's
//!   precomputed distinct values
//! - **Quiz** (`/api/quiz`) -- multiple-choice year questions
//! - **Overview** (`/`, `/health`) -- catalog statistics
//!
//! # Architecture
//!
//! The catalog is loaded once during startup and shared through
//! [`AppState`] as an `Arc`. It is never mutated afterwards, so handlers
//! read it without locks. Malformed query parameters are never rejected;
//! the core degrades them to "no filter" or to defaults.

pub mod error;
pub mod handlers;
pub mod router;
pub mod server;
pub mod startup;
pub mod state;

// Re-export primary types for convenience.
pub use router::build_router;
pub use server::{ServerError, start_server};
pub use startup::StartupError;
pub use state::AppState;
