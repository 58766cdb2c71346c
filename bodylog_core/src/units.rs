//! Unit extraction from free-form measurement strings.
//!
//! Two independent extractors, both anchored at the start of the string and
//! ignoring whatever follows the match:
//! - `parse_unit`: a number followed by an optional unit word ("70 kg", ".5lb")
//! - `parse_feet_inches`: compound imperial height ("5ft11", "5 feet 11 inches")

use crate::{Error, Result};
use once_cell::sync::Lazy;
use regex::Regex;

static UNIT_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"^(\d+(?:\.\d*)?|\.\d+)\s*(\w*)").expect("unit pattern is valid")
});

static FEET_INCHES_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)^(\d+)\s*(?:feet|foot|ft|f)\s*(\d+)\s*(?:inches|inchs|inch|in|i)?")
        .expect("feet-inches pattern is valid")
});

/// A number and the unit word that followed it
#[derive(Clone, Debug, PartialEq)]
pub struct ParsedUnit {
    pub magnitude: f64,
    /// May be empty when no unit was written
    pub unit_token: String,
}

/// Feet and inches read from compound notation
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct FeetInches {
    pub feet: u32,
    pub inches: u32,
}

/// Extract a leading number and the unit word after it
pub fn parse_unit(raw: &str) -> Result<ParsedUnit> {
    let caps = UNIT_PATTERN
        .captures(raw)
        .ok_or_else(|| Error::MalformedMeasurement(raw.to_string()))?;

    let magnitude = caps[1]
        .parse::<f64>()
        .map_err(|_| Error::MalformedMeasurement(raw.to_string()))?;

    Ok(ParsedUnit {
        magnitude,
        unit_token: caps[2].to_string(),
    })
}

/// Extract `<feet> ft <inches> [in]`, case-insensitively
pub fn parse_feet_inches(raw: &str) -> Result<FeetInches> {
    let caps = FEET_INCHES_PATTERN
        .captures(raw)
        .ok_or_else(|| Error::MalformedMeasurement(raw.to_string()))?;

    let feet = caps[1]
        .parse::<u32>()
        .map_err(|_| Error::MalformedMeasurement(raw.to_string()))?;
    let inches = caps[2]
        .parse::<u32>()
        .map_err(|_| Error::MalformedMeasurement(raw.to_string()))?;

    Ok(FeetInches { feet, inches })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_number_with_unit() {
        let parsed = parse_unit("70 kg").unwrap();
        assert_eq!(parsed.magnitude, 70.0);
        assert_eq!(parsed.unit_token, "kg");
    }

    #[test]
    fn test_number_forms() {
        assert_eq!(parse_unit(".5lb").unwrap().magnitude, 0.5);
        assert_eq!(parse_unit("12.").unwrap().magnitude, 12.0);
        assert_eq!(parse_unit("72.25 kg").unwrap().magnitude, 72.25);
    }

    #[test]
    fn test_unit_may_be_empty() {
        let parsed = parse_unit("154").unwrap();
        assert_eq!(parsed.magnitude, 154.0);
        assert_eq!(parsed.unit_token, "");
    }

    #[test]
    fn test_unit_is_longest_word_run() {
        // Trailing content after the word run is ignored
        let parsed = parse_unit("5ft11 in").unwrap();
        assert_eq!(parsed.magnitude, 5.0);
        assert_eq!(parsed.unit_token, "ft11");

        let parsed = parse_unit("180cm (morning)").unwrap();
        assert_eq!(parsed.unit_token, "cm");
    }

    #[test]
    fn test_no_leading_number_is_malformed() {
        assert!(matches!(
            parse_unit("abc"),
            Err(Error::MalformedMeasurement(_))
        ));
        assert!(matches!(
            parse_unit(" 70 kg"),
            Err(Error::MalformedMeasurement(_))
        ));
        assert!(parse_unit("").is_err());
    }

    #[test]
    fn test_feet_inches_variants() {
        let expected = FeetInches { feet: 5, inches: 11 };
        assert_eq!(parse_feet_inches("5ft11").unwrap(), expected);
        assert_eq!(parse_feet_inches("5 ft 11 in").unwrap(), expected);
        assert_eq!(parse_feet_inches("5 Feet 11 Inches").unwrap(), expected);
        assert_eq!(parse_feet_inches("5f11i").unwrap(), expected);
        assert_eq!(parse_feet_inches("5 foot 11").unwrap(), expected);
    }

    #[test]
    fn test_feet_inches_requires_both_parts() {
        assert!(parse_feet_inches("5 ft").is_err());
        assert!(parse_feet_inches("180 cm").is_err());
        assert!(parse_feet_inches("tall").is_err());
    }
}
