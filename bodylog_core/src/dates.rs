//! Free-text date parsing.
//!
//! Numeric dates are read day-first ("05/06/2020" is 5 June). ISO dates,
//! textual months, ordinal suffixes ("24th") and month-year forms are
//! accepted. Month names are case-insensitive; commas are ignored.

use crate::{Error, Result};
use chrono::{Datelike, NaiveDate, NaiveDateTime};
use once_cell::sync::Lazy;
use regex::Regex;

static ORDINAL_SUFFIX: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)\b(\d{1,2})(?:st|nd|rd|th)\b").expect("ordinal pattern is valid")
});

static WHITESPACE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"\s+").expect("whitespace pattern is valid"));

const MIN_YEAR: i32 = 1000;

/// Tried in order; ISO first, then day-first forms
const DATE_FORMATS: &[&str] = &[
    "%Y-%m-%d",
    "%Y/%m/%d",
    "%Y.%m.%d",
    "%d/%m/%Y",
    "%d-%m-%Y",
    "%d.%m.%Y",
    "%d/%m/%y",
    "%d-%m-%y",
    "%d.%m.%y",
    "%d %B %Y",
    "%d %b %Y",
    "%B %d %Y",
    "%b %d %Y",
    "%d-%b-%Y",
    "%Y %B %d",
    // Two-digit years, reached once the forms above give an implausible year
    "%d %B %y",
    "%d %b %y",
    "%B %d %y",
    "%b %d %y",
    "%d-%b-%y",
];

/// Month and year only, read as the first of the month
const MONTH_YEAR_FORMATS: &[&str] = &["%d %B %Y", "%d %b %Y", "%d %B %y", "%d %b %y"];

const DATETIME_FORMATS: &[&str] = &[
    "%Y-%m-%dT%H:%M:%S",
    "%Y-%m-%dT%H:%M",
    "%Y-%m-%d %H:%M:%S",
    "%Y-%m-%d %H:%M",
    "%d/%m/%Y %H:%M",
];

/// Parse a free-text date
pub fn parse_date(raw: &str) -> Result<NaiveDate> {
    let cleaned = clean(raw);
    if cleaned.is_empty() {
        return Err(Error::DateParse(raw.to_string()));
    }

    for fmt in DATE_FORMATS {
        match NaiveDate::parse_from_str(&cleaned, fmt) {
            Ok(date) if plausible(date) => return Ok(date),
            _ => {}
        }
    }

    for fmt in DATETIME_FORMATS {
        match NaiveDateTime::parse_from_str(&cleaned, fmt) {
            Ok(dt) if plausible(dt.date()) => return Ok(dt.date()),
            _ => {}
        }
    }

    // "May 1995" means the first of the month
    let first_of_month = format!("1 {}", cleaned);
    for fmt in MONTH_YEAR_FORMATS {
        match NaiveDate::parse_from_str(&first_of_month, fmt) {
            Ok(date) if plausible(date) => return Ok(date),
            _ => {}
        }
    }

    Err(Error::DateParse(raw.to_string()))
}

/// `%Y` happily reads "95" as year 95; such matches fall through to `%y`
fn plausible(date: NaiveDate) -> bool {
    date.year() >= MIN_YEAR
}

fn clean(raw: &str) -> String {
    let no_commas = raw.replace(',', " ");
    let no_suffix = ORDINAL_SUFFIX.replace_all(&no_commas, "$1");
    WHITESPACE.replace_all(no_suffix.trim(), " ").into_owned()
}
