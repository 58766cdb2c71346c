//! Building records from raw log samples.
//!
//! Each sample is handled on its own: a bad date or measurement discards
//! that sample only and is reported as a diagnostic.

use crate::dates::parse_date;
use crate::diagnostics::{Diagnostic, DiagnosticKind};
use crate::normalize::{normalize_height, normalize_weight};
use crate::{RawSample, Record};
use chrono::NaiveDate;

/// Mean length of a year, in days
pub const DAYS_PER_YEAR: f64 = 365.2425;

const SECONDS_PER_DAY: f64 = 24.0 * 3600.0;

/// A record plus the warnings raised while normalizing it
#[derive(Clone, Debug)]
pub struct Built {
    pub record: Record,
    pub warnings: Vec<Diagnostic>,
}

/// Age in years on `date`, truncated to one decimal
pub fn age_years(date: NaiveDate, dob: NaiveDate) -> f64 {
    let seconds = (date - dob).num_seconds() as f64;
    let years = seconds / (DAYS_PER_YEAR * SECONDS_PER_DAY);
    (years * 10.0).trunc() / 10.0
}

/// Turn one raw sample into a record
///
/// Returns the discard diagnostic when the sample can't be used.
pub fn build_record(
    index: usize,
    raw: &RawSample,
    dob: NaiveDate,
    strict_units: bool,
) -> std::result::Result<Built, Diagnostic> {
    tracing::debug!(
        "Sample {}: date={:?} weight={:?} height={:?}",
        index,
        raw.date,
        raw.weight,
        raw.height
    );

    let discard =
        |field: &'static str| move |e: crate::Error| Diagnostic::from_error(&e, field, index);

    let date = parse_date(&raw.date).map_err(discard("date"))?;
    let weight = normalize_weight(&raw.weight, strict_units).map_err(discard("weight"))?;
    let height = normalize_height(&raw.height, strict_units).map_err(discard("height"))?;

    let warnings = [weight.warning, height.warning]
        .into_iter()
        .flatten()
        .map(|message| Diagnostic::warning(DiagnosticKind::UnrecognizedUnit, message, index))
        .collect();

    Ok(Built {
        record: Record::new(date, age_years(date, dob), weight.value, height.value),
        warnings,
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::diagnostics::Severity;
    use crate::normalize::KG_PER_LB;

    fn raw(date: &str, weight: &str, height: &str) -> RawSample {
        RawSample {
            date: date.into(),
            weight: weight.into(),
            height: height.into(),
        }
    }

    fn dob() -> NaiveDate {
        NaiveDate::from_ymd_opt(1995, 5, 24).unwrap()
    }

    #[test]
    fn test_reference_example() {
        let built = build_record(0, &raw("2020-05-24", "70 kg", "175 cm"), dob(), false).unwrap();
        let record = built.record;

        assert_eq!(record.date(), NaiveDate::from_ymd_opt(2020, 5, 24).unwrap());
        assert_eq!(record.age_years(), 25.0);
        assert_eq!(record.weight_kg(), 70.0);
        assert_eq!(record.height_cm(), 175.0);
        assert!((record.bmi() - 22.86).abs() < 0.01);
        assert!(built.warnings.is_empty());
    }

    #[test]
    fn test_age_truncates_not_rounds() {
        // 25.99 years after birth is still 25.9
        let date = NaiveDate::from_ymd_opt(2021, 5, 20).unwrap();
        assert_eq!(age_years(date, dob()), 25.9);

        let date = NaiveDate::from_ymd_opt(1995, 6, 24).unwrap();
        assert_eq!(age_years(date, dob()), 0.0);
    }

    #[test]
    fn test_age_non_decreasing_and_one_decimal() {
        let mut previous = f64::MIN;
        let start = NaiveDate::from_ymd_opt(2019, 1, 1).unwrap();
        for offset in (0..800).step_by(7) {
            let date = start + chrono::Duration::days(offset);
            let age = age_years(date, dob());
            assert!(age >= previous);
            assert!(((age * 10.0).round() - age * 10.0).abs() < 1e-9);
            previous = age;
        }
    }

    #[test]
    fn test_warnings_are_attached() {
        let built = build_record(4, &raw("2020-05-24", "154", "70 in"), dob(), false).unwrap();
        assert!((built.record.weight_kg() - 154.0 * KG_PER_LB).abs() < 1e-9);
        assert_eq!(built.record.height_cm(), 70.0);
        assert_eq!(built.warnings.len(), 2);
        assert!(built
            .warnings
            .iter()
            .all(|w| w.severity == Severity::Warning && w.sample_index == Some(4)));
    }

    #[test]
    fn test_discards_name_the_raw_value() {
        let diag = build_record(2, &raw("2020-05-24", "abc", "175 cm"), dob(), false).unwrap_err();
        assert_eq!(diag.kind, DiagnosticKind::MalformedMeasurement);
        assert!(diag.message.contains("abc"));
        assert_eq!(diag.sample_index, Some(2));

        let diag = build_record(3, &raw("2020-05-24", "70 kg", "tall"), dob(), false).unwrap_err();
        assert!(diag.message.contains("height"));
        assert!(diag.message.contains("tall"));

        let diag = build_record(5, &raw("the other day", "70 kg", "175 cm"), dob(), false).unwrap_err();
        assert_eq!(diag.kind, DiagnosticKind::DateParseFailure);
    }

    #[test]
    fn test_strict_units_discards() {
        let diag = build_record(0, &raw("2020-05-24", "70 stone", "175 cm"), dob(), true).unwrap_err();
        assert_eq!(diag.kind, DiagnosticKind::UnrecognizedUnit);
        assert!(diag.is_error());
    }
}
