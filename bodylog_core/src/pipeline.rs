//! Ingest entry point: log document in, ordered records and diagnostics out.
//!
//! Only a bad date of birth stops a run. Everything that goes wrong with a
//! single sample is reported and the sample is skipped.

use crate::dates::parse_date;
use crate::diagnostics::Diagnostic;
use crate::sample::build_record;
use crate::{Config, LogDocument, Record, Result};
use chrono::NaiveDate;

/// Options for one ingest run
#[derive(Clone, Debug, Default)]
pub struct IngestOptions {
    /// Discard samples with unrecognized unit tokens
    pub strict_units: bool,
    /// Keep only records on or after this date; defaults to the date of birth
    pub after: Option<NaiveDate>,
}

impl IngestOptions {
    pub fn from_config(config: &Config) -> Self {
        Self {
            strict_units: config.units.strict,
            after: None,
        }
    }

    pub fn with_after(mut self, after: Option<NaiveDate>) -> Self {
        self.after = after;
        self
    }
}

/// Result of ingesting a log document
#[derive(Clone, Debug)]
pub struct Ingest {
    pub dob: NaiveDate,
    /// Records before this date were filtered out
    pub cutoff: NaiveDate,
    /// Ascending by date; same-day records keep log order
    pub records: Vec<Record>,
    pub diagnostics: Vec<Diagnostic>,
}

impl Ingest {
    pub fn warnings(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| !d.is_error())
    }

    pub fn errors(&self) -> impl Iterator<Item = &Diagnostic> {
        self.diagnostics.iter().filter(|d| d.is_error())
    }
}

/// Normalize every sample in the document
pub fn ingest(doc: &LogDocument, options: &IngestOptions) -> Result<Ingest> {
    let dob = parse_date(&doc.dob)?;

    let mut records = Vec::with_capacity(doc.samples.len());
    let mut diagnostics = Vec::new();

    for (index, raw) in doc.samples.iter().enumerate() {
        match build_record(index, raw, dob, options.strict_units) {
            Ok(built) => {
                for warning in &built.warnings {
                    warning.log();
                }
                diagnostics.extend(built.warnings);
                records.push(built.record);
            }
            Err(diag) => {
                diag.log();
                diagnostics.push(diag);
            }
        }
    }

    records.sort_by_key(Record::date);

    let cutoff = options.after.unwrap_or(dob);
    let before = records.len();
    let records = filter_after(records, cutoff);

    tracing::info!(
        "Ingested {} of {} samples ({} before {} filtered out, {} diagnostics)",
        records.len(),
        doc.samples.len(),
        before - records.len(),
        cutoff,
        diagnostics.len()
    );

    Ok(Ingest {
        dob,
        cutoff,
        records,
        diagnostics,
    })
}

/// Keep records dated on or after `cutoff`
pub fn filter_after(records: Vec<Record>, cutoff: NaiveDate) -> Vec<Record> {
    records
        .into_iter()
        .filter(|r| r.date() >= cutoff)
        .collect()
}
