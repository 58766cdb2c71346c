//! Measurement normalization into kilograms and centimeters.
//!
//! Normalization tolerates unknown unit tokens: the value is used under the
//! rules below and a warning is attached, unless strict mode is on.
//!
//! Weight:
//! - exactly `kg` → kilograms, unchanged
//! - anything else → pounds, converted
//!
//! Height:
//! - `cm` → centimeters
//! - feet-inches notation → converted
//! - any other token → used as centimeters as-is (inches are NOT converted here)

use crate::units::{parse_feet_inches, parse_unit};
use crate::{Error, Result};

/// Kilograms per pound
pub const KG_PER_LB: f64 = 0.453592;

/// Centimeters per foot (0.3048 m)
pub const CM_PER_FOOT: f64 = 30.48;

/// Centimeters per inch (0.0254 m)
pub const CM_PER_INCH: f64 = 2.54;

const POUND_TOKENS: &[&str] = &["lb", "lbs", "pound", "pounds"];

/// A normalized value plus the warning raised while producing it, if any
#[derive(Clone, Debug, PartialEq)]
pub struct Normalized {
    pub value: f64,
    pub warning: Option<String>,
}

impl Normalized {
    fn clean(value: f64) -> Self {
        Self {
            value,
            warning: None,
        }
    }
}

/// Normalize a weight string to kilograms
pub fn normalize_weight(raw: &str, strict: bool) -> Result<Normalized> {
    let parsed = parse_unit(raw)?;

    if parsed.unit_token == "kg" {
        return Ok(Normalized::clean(parsed.magnitude));
    }

    let kg = parsed.magnitude * KG_PER_LB;
    if POUND_TOKENS.contains(&parsed.unit_token.as_str()) {
        return Ok(Normalized::clean(kg));
    }

    unrecognized(raw, &parsed.unit_token, strict)?;
    Ok(Normalized {
        value: kg,
        warning: Some(format!(
            "bad weight unit '{}' in '{}', expected kg or lb; assuming lb",
            parsed.unit_token, raw
        )),
    })
}

/// Normalize a height string to centimeters
pub fn normalize_height(raw: &str, strict: bool) -> Result<Normalized> {
    let primary = parse_unit(raw);

    if let Ok(ref parsed) = primary {
        if parsed.unit_token == "cm" {
            return Ok(Normalized::clean(parsed.magnitude));
        }
    }

    // "5ft11" parses as 5 with token "ft11", so compound notation is checked
    // before the token is accepted as centimeters
    if let Ok(fi) = parse_feet_inches(raw) {
        let cm = f64::from(fi.feet) * CM_PER_FOOT + f64::from(fi.inches) * CM_PER_INCH;
        return Ok(Normalized::clean(cm));
    }

    let parsed = primary?;
    unrecognized(raw, &parsed.unit_token, strict)?;
    Ok(Normalized {
        value: parsed.magnitude,
        warning: Some(format!(
            "bad height unit '{}' in '{}', expected cm or ft/in; using value as cm",
            parsed.unit_token, raw
        )),
    })
}

fn unrecognized(raw: &str, unit: &str, strict: bool) -> Result<()> {
    if strict {
        return Err(Error::UnrecognizedUnit {
            raw: raw.to_string(),
            unit: unit.to_string(),
        });
    }
    Ok(())
}
