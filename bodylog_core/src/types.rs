//! Core domain types for bodylog.
//!
//! This module defines:
//! - The raw log document as written by the user
//! - The normalized `Record` derived from each sample
//! - Dated values used by series and charts
//! - BMI classification bands

use chrono::NaiveDate;
use serde::{Deserialize, Deserializer, Serialize};

// ============================================================================
// Input Document
// ============================================================================

/// One log entry, exactly as written
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct RawSample {
    #[serde(deserialize_with = "free_text")]
    pub date: String,
    #[serde(deserialize_with = "free_text")]
    pub weight: String,
    #[serde(deserialize_with = "free_text")]
    pub height: String,
}

/// The whole measurement log
#[derive(Clone, Debug, Serialize, Deserialize, PartialEq)]
pub struct LogDocument {
    #[serde(rename = "DOB", deserialize_with = "free_text")]
    pub dob: String,
    pub samples: Vec<RawSample>,
}

/// YAML turns `weight: 70` into a number; keep its text instead
#[derive(Deserialize)]
#[serde(untagged)]
enum Scalar {
    Text(String),
    Int(i64),
    Float(f64),
}

fn free_text<'de, D>(deserializer: D) -> Result<String, D::Error>
where
    D: Deserializer<'de>,
{
    Ok(match Scalar::deserialize(deserializer)? {
        Scalar::Text(s) => s,
        Scalar::Int(i) => i.to_string(),
        Scalar::Float(f) => f.to_string(),
    })
}

// ============================================================================
// Records
// ============================================================================

/// One normalized measurement with its derived age and BMI
///
/// Fields are read-only; `bmi` is computed once in `Record::new` and always
/// equals `weight_kg / (height_cm / 100)^2`.
#[derive(Clone, Debug, Serialize, PartialEq)]
pub struct Record {
    date: NaiveDate,
    age_years: f64,
    weight_kg: f64,
    height_cm: f64,
    bmi: f64,
}

impl Record {
    pub fn new(date: NaiveDate, age_years: f64, weight_kg: f64, height_cm: f64) -> Self {
        Self {
            date,
            age_years,
            weight_kg,
            height_cm,
            bmi: body_mass_index(weight_kg, height_cm),
        }
    }

    pub fn date(&self) -> NaiveDate {
        self.date
    }

    pub fn age_years(&self) -> f64 {
        self.age_years
    }

    pub fn weight_kg(&self) -> f64 {
        self.weight_kg
    }

    pub fn height_cm(&self) -> f64 {
        self.height_cm
    }

    pub fn bmi(&self) -> f64 {
        self.bmi
    }
}

/// `weight / height_m^2`
pub fn body_mass_index(weight_kg: f64, height_cm: f64) -> f64 {
    weight_kg / (height_cm / 100.0).powi(2)
}

/// A value on a given day
#[derive(Clone, Copy, Debug, Serialize, PartialEq)]
pub struct DataPoint {
    pub date: NaiveDate,
    pub value: f64,
}

// ============================================================================
// BMI Classification
// ============================================================================

/// Standard BMI ranges, lowest first
#[derive(Clone, Copy, Debug, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum BmiClass {
    Underweight,
    Normal,
    Overweight,
    Obese,
    SeverelyObese,
}

/// Band edges: each class spans `[BMI_BOUNDS[i], BMI_BOUNDS[i + 1])`
pub const BMI_BOUNDS: [f64; 6] = [15.0, 18.5, 25.0, 30.0, 40.0, 50.0];

impl BmiClass {
    pub const ALL: [BmiClass; 5] = [
        BmiClass::Underweight,
        BmiClass::Normal,
        BmiClass::Overweight,
        BmiClass::Obese,
        BmiClass::SeverelyObese,
    ];

    /// Class for a BMI value, `None` outside 15..50
    pub fn classify(bmi: f64) -> Option<BmiClass> {
        Self::ALL
            .iter()
            .copied()
            .find(|class| {
                let (lower, upper) = class.range();
                bmi >= lower && bmi < upper
            })
    }

    pub fn range(&self) -> (f64, f64) {
        let i = self.index();
        (BMI_BOUNDS[i], BMI_BOUNDS[i + 1])
    }

    /// Shading colour used by the chart
    pub fn colour(&self) -> &'static str {
        match self {
            BmiClass::Underweight => "purple",
            BmiClass::Normal => "green",
            BmiClass::Overweight => "yellow",
            BmiClass::Obese => "orange",
            BmiClass::SeverelyObese => "red",
        }
    }

    pub fn label(&self) -> &'static str {
        match self {
            BmiClass::Underweight => "underweight",
            BmiClass::Normal => "normal",
            BmiClass::Overweight => "overweight",
            BmiClass::Obese => "obese",
            BmiClass::SeverelyObese => "severely obese",
        }
    }

    fn index(&self) -> usize {
        match self {
            BmiClass::Underweight => 0,
            BmiClass::Normal => 1,
            BmiClass::Overweight => 2,
            BmiClass::Obese => 3,
            BmiClass::SeverelyObese => 4,
        }
    }
}
