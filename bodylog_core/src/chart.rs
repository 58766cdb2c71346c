//! Everything a renderer needs to draw the chart.
//!
//! Rendering is done elsewhere. `ChartData` bundles the scatter points,
//! dense series, fit lines, today marker and BMI shading bands so a
//! plotting front end only has to draw them.

use crate::trend::Trends;
use crate::{BmiClass, DataPoint, Record, Result};
use chrono::NaiveDate;
use serde::Serialize;

/// A horizontal shaded band
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Band {
    pub class: BmiClass,
    pub label: &'static str,
    pub lower: f64,
    pub upper: f64,
    pub colour: &'static str,
}

/// Raw per-record values drawn as points
#[derive(Clone, Debug, Default, Serialize)]
pub struct Scatter {
    pub height: Vec<DataPoint>,
    pub weight: Vec<DataPoint>,
    pub bmi: Vec<DataPoint>,
}

/// Best-fit lines extended past the last record
#[derive(Clone, Debug, Serialize)]
pub struct FitLines {
    pub weight: Vec<DataPoint>,
    pub bmi: Vec<DataPoint>,
}

#[derive(Clone, Debug, Serialize)]
pub struct ChartData {
    pub scatter: Scatter,
    /// Absent when there were too few records to interpolate
    pub trends: Option<Trends>,
    pub fit_lines: Option<FitLines>,
    pub today: NaiveDate,
    pub bands: Vec<Band>,
    /// Top of the y axis
    pub y_max: i64,
}

impl ChartData {
    pub fn build(
        records: &[Record],
        trends: Option<Trends>,
        today: NaiveDate,
        extension_days: i32,
    ) -> Result<Self> {
        let point = |r: &Record, value: f64| DataPoint {
            date: r.date(),
            value,
        };
        let scatter = Scatter {
            height: records.iter().map(|r| point(r, r.height_cm())).collect(),
            weight: records.iter().map(|r| point(r, r.weight_kg())).collect(),
            bmi: records.iter().map(|r| point(r, r.bmi())).collect(),
        };

        let fit_lines = match trends {
            Some(ref t) => Some(FitLines {
                weight: t.weight_fit.line_through(records, extension_days)?,
                bmi: t.bmi_fit.line_through(records, extension_days)?,
            }),
            None => None,
        };

        Ok(Self {
            scatter,
            trends,
            fit_lines,
            today,
            bands: bmi_bands(),
            y_max: y_max(records),
        })
    }
}

/// Shading bands for every BMI class
pub fn bmi_bands() -> Vec<Band> {
    BmiClass::ALL
        .iter()
        .map(|&class| {
            let (lower, upper) = class.range();
            Band {
                class,
                label: class.label(),
                lower,
                upper,
                colour: class.colour(),
            }
        })
        .collect()
}

/// Largest plotted raw value plus headroom, truncated to a whole number
fn y_max(records: &[Record]) -> i64 {
    let largest = records
        .iter()
        .map(|r| r.weight_kg().max(r.height_cm()).max(r.bmi()))
        .fold(0.0, f64::max);
    (largest + 10.0) as i64
}
