//! Trend derivation over the record sequence.
//!
//! All interpolation and fitting runs on ordinal days (days since
//! 0001-01-01, which is day 1) so irregular sample spacing is respected:
//! 1. Piecewise-linear interpolants for height and weight, evaluated daily
//! 2. Dense BMI computed pointwise from the dense height and weight
//! 3. Daily weight delta in decagrams lost per day
//! 4. Least-squares lines for weight and BMI over the raw records

use crate::{body_mass_index, DataPoint, Error, Record, Result};
use chrono::{Datelike, Duration, NaiveDate};
use serde::Serialize;

/// Day number used as the x-axis for interpolation and fitting
pub fn ordinal(date: NaiveDate) -> i32 {
    date.num_days_from_ce()
}

/// `date` moved forward by `days`, failing instead of overflowing the calendar
pub fn extend_date(date: NaiveDate, days: i32) -> Result<NaiveDate> {
    date.checked_add_signed(Duration::days(i64::from(days)))
        .ok_or_else(|| Error::Other(format!("{} + {} days is out of range", date, days)))
}

fn from_ordinal(day: i32) -> Option<NaiveDate> {
    NaiveDate::from_num_days_from_ce_opt(day)
}

// ============================================================================
// Interpolation
// ============================================================================

/// Piecewise-linear interpolant that extrapolates along its end segments
#[derive(Clone, Debug)]
pub struct Interpolant {
    xs: Vec<f64>,
    ys: Vec<f64>,
}

impl Interpolant {
    /// Build from (x, y) pairs in any order
    ///
    /// Pairs sharing an x are averaged. Fails when no points are given.
    pub fn new(points: &[(f64, f64)]) -> Result<Self> {
        if points.is_empty() {
            return Err(Error::InsufficientData(
                "interpolation needs at least one point".into(),
            ));
        }

        let mut sorted = points.to_vec();
        sorted.sort_by(|a, b| a.0.total_cmp(&b.0));

        let mut xs: Vec<f64> = Vec::with_capacity(sorted.len());
        let mut ys: Vec<f64> = Vec::with_capacity(sorted.len());
        let mut counts: Vec<f64> = Vec::with_capacity(sorted.len());
        for (x, y) in sorted {
            match xs.last() {
                Some(&last) if last == x => {
                    let i = ys.len() - 1;
                    ys[i] += y;
                    counts[i] += 1.0;
                }
                _ => {
                    xs.push(x);
                    ys.push(y);
                    counts.push(1.0);
                }
            }
        }
        for (y, n) in ys.iter_mut().zip(&counts) {
            *y /= n;
        }

        Ok(Self { xs, ys })
    }

    /// Evaluate at `x`; outside the sampled range the end segment is extended
    pub fn eval(&self, x: f64) -> f64 {
        let n = self.xs.len();
        if n == 1 {
            return self.ys[0];
        }

        // Segment whose right end is the first knot above x, clamped to the ends
        let upper = self.xs.partition_point(|&k| k <= x).clamp(1, n - 1);
        let (x0, x1) = (self.xs[upper - 1], self.xs[upper]);
        let (y0, y1) = (self.ys[upper - 1], self.ys[upper]);
        y0 + (x - x0) * (y1 - y0) / (x1 - x0)
    }
}

// ============================================================================
// Linear Fit
// ============================================================================

/// `y = slope * x + intercept`, x in ordinal days
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct LinearFit {
    pub slope: f64,
    pub intercept: f64,
}

impl LinearFit {
    /// First-degree least-squares fit
    ///
    /// Fails with fewer than two distinct x values.
    pub fn fit(points: &[(f64, f64)]) -> Result<Self> {
        if points.len() < 2 {
            return Err(Error::InsufficientData(
                "a line fit needs at least two points".into(),
            ));
        }

        let n = points.len() as f64;
        let mean_x = points.iter().map(|p| p.0).sum::<f64>() / n;
        let mean_y = points.iter().map(|p| p.1).sum::<f64>() / n;

        // Centered sums keep precision with ordinals in the 700k range
        let sxx: f64 = points.iter().map(|p| (p.0 - mean_x).powi(2)).sum();
        let sxy: f64 = points
            .iter()
            .map(|p| (p.0 - mean_x) * (p.1 - mean_y))
            .sum();

        if sxx == 0.0 {
            return Err(Error::InsufficientData(
                "a line fit needs two distinct days".into(),
            ));
        }

        let slope = sxy / sxx;
        Ok(Self {
            slope,
            intercept: mean_y - slope * mean_x,
        })
    }

    pub fn eval(&self, x: f64) -> f64 {
        self.slope * x + self.intercept
    }

    pub fn at(&self, date: NaiveDate) -> f64 {
        self.eval(f64::from(ordinal(date)))
    }

    /// The fitted line at each record date plus one point `extension_days`
    /// past the last record
    pub fn line_through(
        &self,
        records: &[Record],
        extension_days: i32,
    ) -> Result<Vec<DataPoint>> {
        let mut dates: Vec<NaiveDate> = records.iter().map(Record::date).collect();
        if let Some(&last) = dates.last() {
            dates.push(extend_date(last, extension_days)?);
        }
        Ok(dates
            .into_iter()
            .map(|date| DataPoint {
                date,
                value: self.at(date),
            })
            .collect())
    }
}

// ============================================================================
// Trends
// ============================================================================

/// Dense daily series and best-fit lines derived from the records
#[derive(Clone, Debug, Serialize)]
pub struct Trends {
    pub height: Vec<DataPoint>,
    pub weight: Vec<DataPoint>,
    pub bmi: Vec<DataPoint>,
    /// Decagrams lost per day (positive while losing weight)
    pub weight_delta: Vec<DataPoint>,
    pub weight_fit: LinearFit,
    pub bmi_fit: LinearFit,
}

impl Trends {
    /// Number of days covered by the dense series
    pub fn len(&self) -> usize {
        self.weight.len()
    }

    pub fn is_empty(&self) -> bool {
        self.weight.is_empty()
    }

    pub fn first_day(&self) -> Option<NaiveDate> {
        self.weight.first().map(|p| p.date)
    }

    pub fn last_day(&self) -> Option<NaiveDate> {
        self.weight.last().map(|p| p.date)
    }
}

/// Derive the dense series and fits for a record sequence
///
/// Needs records on at least two distinct days.
pub fn compute_trends(records: &[Record]) -> Result<Trends> {
    let ords: Vec<i32> = records.iter().map(|r| ordinal(r.date())).collect();
    let (min, max) = match (ords.iter().min(), ords.iter().max()) {
        (Some(&min), Some(&max)) if min < max => (min, max),
        _ => {
            return Err(Error::InsufficientData(format!(
                "trends need records on at least two distinct days (have {} records)",
                records.len()
            )))
        }
    };

    let pairs = |value: fn(&Record) -> f64| -> Vec<(f64, f64)> {
        records
            .iter()
            .zip(&ords)
            .map(|(r, &x)| (f64::from(x), value(r)))
            .collect()
    };

    let height_interp = Interpolant::new(&pairs(Record::height_cm))?;
    let weight_interp = Interpolant::new(&pairs(Record::weight_kg))?;
    let weight_fit = LinearFit::fit(&pairs(Record::weight_kg))?;
    let bmi_fit = LinearFit::fit(&pairs(Record::bmi))?;

    let mut height = Vec::with_capacity((max - min + 1) as usize);
    let mut weight = Vec::with_capacity(height.capacity());
    let mut bmi = Vec::with_capacity(height.capacity());
    for day in min..=max {
        let date = from_ordinal(day)
            .ok_or_else(|| Error::Other(format!("ordinal day {} out of range", day)))?;
        let h = height_interp.eval(f64::from(day));
        let w = weight_interp.eval(f64::from(day));
        height.push(DataPoint { date, value: h });
        weight.push(DataPoint { date, value: w });
        bmi.push(DataPoint {
            date,
            value: body_mass_index(w, h),
        });
    }

    let weight_delta = daily_loss(&weight);

    tracing::debug!(
        "Trends over {} days: weight slope {:.4} kg/day, bmi slope {:.4}/day",
        weight.len(),
        weight_fit.slope,
        bmi_fit.slope
    );

    Ok(Trends {
        height,
        weight,
        bmi,
        weight_delta,
        weight_fit,
        bmi_fit,
    })
}

/// Day-over-day loss in decagrams; the last day repeats the one before it
fn daily_loss(weight: &[DataPoint]) -> Vec<DataPoint> {
    let mut deltas: Vec<f64> = weight
        .windows(2)
        .map(|w| -(w[1].value - w[0].value) * 100.0)
        .collect();
    if let Some(&last) = deltas.last() {
        deltas.push(last);
    }

    weight
        .iter()
        .zip(deltas)
        .map(|(p, value)| DataPoint {
            date: p.date,
            value,
        })
        .collect()
}
