//! Export of records, dense series and the chart bundle.
//!
//! Files are written to a temporary sibling and renamed into place so a
//! reader never sees a half-written export.

use crate::chart::ChartData;
use crate::trend::Trends;
use crate::{Error, Record, Result};
use std::io::Write;
use std::path::Path;

/// A row in records.csv
#[derive(Debug, serde::Serialize)]
struct RecordRow {
    date: String,
    age_years: f64,
    weight_kg: f64,
    height_cm: f64,
    bmi: f64,
}

impl From<&Record> for RecordRow {
    fn from(record: &Record) -> Self {
        RecordRow {
            date: record.date().to_string(),
            age_years: record.age_years(),
            weight_kg: record.weight_kg(),
            height_cm: record.height_cm(),
            bmi: record.bmi(),
        }
    }
}

/// A row in series.csv, one per day
#[derive(Debug, serde::Serialize)]
struct SeriesRow {
    date: String,
    height_cm: f64,
    weight_kg: f64,
    bmi: f64,
    weight_delta: f64,
}

/// Write the record sequence as CSV
pub fn write_records_csv(path: &Path, records: &[Record]) -> Result<usize> {
    let rows: Vec<RecordRow> = records.iter().map(RecordRow::from).collect();
    write_csv(path, &rows)?;
    tracing::info!("Wrote {} records to {:?}", rows.len(), path);
    Ok(rows.len())
}

/// Write the dense daily series as CSV
pub fn write_series_csv(path: &Path, trends: &Trends) -> Result<usize> {
    let rows: Vec<SeriesRow> = trends
        .weight
        .iter()
        .zip(&trends.height)
        .zip(&trends.bmi)
        .zip(&trends.weight_delta)
        .map(|(((w, h), b), d)| SeriesRow {
            date: w.date.to_string(),
            height_cm: h.value,
            weight_kg: w.value,
            bmi: b.value,
            weight_delta: d.value,
        })
        .collect();
    write_csv(path, &rows)?;
    tracing::info!("Wrote {} series days to {:?}", rows.len(), path);
    Ok(rows.len())
}

/// Write the chart bundle as pretty JSON
pub fn write_chart_json(path: &Path, chart: &ChartData) -> Result<()> {
    let json = serde_json::to_vec_pretty(chart)?;
    write_atomically(path, |file| {
        file.write_all(&json)?;
        Ok(())
    })?;
    tracing::info!("Wrote chart data to {:?}", path);
    Ok(())
}

fn write_csv<T: serde::Serialize>(path: &Path, rows: &[T]) -> Result<()> {
    write_atomically(path, |file| {
        let mut writer = csv::WriterBuilder::new().has_headers(true).from_writer(file);
        for row in rows {
            writer.serialize(row)?;
        }
        writer.flush()?;
        Ok(())
    })
}

fn write_atomically<F>(path: &Path, write: F) -> Result<()>
where
    F: FnOnce(&mut std::fs::File) -> Result<()>,
{
    let dir = match path.parent() {
        Some(parent) if !parent.as_os_str().is_empty() => parent,
        _ => Path::new("."),
    };
    std::fs::create_dir_all(dir)?;

    let mut temp = tempfile::NamedTempFile::new_in(dir)?;
    write(temp.as_file_mut())?;
    temp.as_file().sync_all()?;
    temp.persist(path)
        .map_err(|e| Error::Io(e.error))?;
    Ok(())
}
