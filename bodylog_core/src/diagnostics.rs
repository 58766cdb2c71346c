//! Structured warnings and errors raised while ingesting samples.
//!
//! Per-sample problems never abort a run. They are collected here and
//! returned alongside the records so callers can inspect them.

use crate::Error;
use serde::Serialize;
use std::fmt;

/// How bad a diagnostic is
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum Severity {
    /// The value was used anyway
    Warning,
    /// The sample was discarded
    Error,
}

/// What went wrong
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum DiagnosticKind {
    MalformedMeasurement,
    UnrecognizedUnit,
    DateParseFailure,
}

#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Diagnostic {
    pub severity: Severity,
    pub kind: DiagnosticKind,
    pub message: String,
    /// Position of the sample in the log, `None` for document-level issues
    pub sample_index: Option<usize>,
}

impl Diagnostic {
    pub fn warning(kind: DiagnosticKind, message: impl Into<String>, sample_index: usize) -> Self {
        Self {
            severity: Severity::Warning,
            kind,
            message: message.into(),
            sample_index: Some(sample_index),
        }
    }

    pub fn error(kind: DiagnosticKind, message: impl Into<String>, sample_index: usize) -> Self {
        Self {
            severity: Severity::Error,
            kind,
            message: message.into(),
            sample_index: Some(sample_index),
        }
    }

    /// Convert a discard-worthy error into a diagnostic for one sample
    pub fn from_error(err: &Error, field: &str, sample_index: usize) -> Self {
        let kind = match err {
            Error::DateParse(_) => DiagnosticKind::DateParseFailure,
            Error::UnrecognizedUnit { .. } => DiagnosticKind::UnrecognizedUnit,
            _ => DiagnosticKind::MalformedMeasurement,
        };
        Self::error(kind, format!("bad {} record: {}", field, err), sample_index)
    }

    pub fn is_error(&self) -> bool {
        self.severity == Severity::Error
    }

    /// Emit this diagnostic through tracing
    pub fn log(&self) {
        match self.severity {
            Severity::Warning => tracing::warn!("{}", self),
            Severity::Error => tracing::error!("{}", self),
        }
    }
}

impl fmt::Display for Diagnostic {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self.severity {
            Severity::Warning => "warning",
            Severity::Error => "error",
        };
        match self.sample_index {
            Some(index) => write!(f, "{} (sample {}): {}", label, index, self.message),
            None => write!(f, "{}: {}", label, self.message),
        }
    }
}
