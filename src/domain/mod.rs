//! Domain model for gorefresh
//!
//! Core types and structured errors shared by the resolution pipeline and
//! the update orchestrator.

pub mod errors;
pub mod types;

pub use errors::{RebuildError, RebuildStep, ResolveError};
pub use types::Outcome;
