#![forbid(unsafe_code)]

//! Core domain model and pipeline for bodylog.
//!
//! This crate provides:
//! - Unit parsing and normalization of weight/height strings
//! - Record construction (age, BMI) from raw log samples
//! - Trend derivation (interpolated daily series, best-fit lines)
//! - The chart bundle consumed by a renderer
//! - Log loading, export, configuration

pub mod types;
pub mod error;
pub mod config;
pub mod logging;
pub mod units;
pub mod normalize;
pub mod dates;
pub mod diagnostics;
pub mod sample;
pub mod pipeline;
pub mod trend;
pub mod chart;
pub mod document;
pub mod export;

// Re-export commonly used types
pub use error::{Error, Result};
pub use types::*;
pub use config::Config;
pub use diagnostics::{Diagnostic, DiagnosticKind, Severity};
pub use pipeline::{ingest, Ingest, IngestOptions};
pub use trend::{compute_trends, LinearFit, Trends};
pub use chart::ChartData;
pub use dates::parse_date;
