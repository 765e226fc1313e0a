//! Length parsing and formatting
//!
//! Raw cabinet configuration may carry lengths as strings typed by a user
//! ("600", "60 cm", "23 1/2 in", "3/4\""). Everything is normalized to
//! millimeters. Strings without a unit suffix are millimeters.

use crate::constants::MM_PER_INCH;
use crate::error::UnitParseError;
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Length unit recognized in raw input.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum LengthUnit {
    /// Millimeters
    Millimeter,
    /// Centimeters
    Centimeter,
    /// Inches
    Inch,
}

impl Default for LengthUnit {
    fn default() -> Self {
        Self::Millimeter
    }
}

impl LengthUnit {
    /// Millimeters per one unit.
    pub fn to_mm_factor(self) -> f64 {
        match self {
            Self::Millimeter => 1.0,
            Self::Centimeter => 10.0,
            Self::Inch => MM_PER_INCH,
        }
    }

    /// Short label used when formatting.
    pub fn label(self) -> &'static str {
        match self {
            Self::Millimeter => "mm",
            Self::Centimeter => "cm",
            Self::Inch => "in",
        }
    }
}

impl fmt::Display for LengthUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

impl FromStr for LengthUnit {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_lowercase().as_str() {
            "mm" | "millimeter" | "millimeters" => Ok(Self::Millimeter),
            "cm" | "centimeter" | "centimeters" => Ok(Self::Centimeter),
            "in" | "inch" | "inches" | "\"" => Ok(Self::Inch),
            other => Err(format!("Unknown length unit: {}", other)),
        }
    }
}

/// Split a trailing unit suffix off `input`.
fn split_unit(input: &str) -> (&str, LengthUnit) {
    const SUFFIXES: [(&str, LengthUnit); 10] = [
        ("millimeters", LengthUnit::Millimeter),
        ("centimeters", LengthUnit::Centimeter),
        ("inches", LengthUnit::Inch),
        ("inch", LengthUnit::Inch),
        ("mm", LengthUnit::Millimeter),
        ("cm", LengthUnit::Centimeter),
        ("in", LengthUnit::Inch),
        ("\"", LengthUnit::Inch),
        ("millimeter", LengthUnit::Millimeter),
        ("centimeter", LengthUnit::Centimeter),
    ];

    let lower = input.to_ascii_lowercase();
    for (suffix, unit) in SUFFIXES {
        if lower.ends_with(suffix) {
            let cut = input.len() - suffix.len();
            return (input[..cut].trim_end(), unit);
        }
    }
    (input, LengthUnit::Millimeter)
}

/// Parse a number that may be a mixed fraction ("1 1/2", "3/4").
fn parse_quantity(input: &str) -> Result<f64, UnitParseError> {
    let (negative, body) = match input.strip_prefix('-') {
        Some(rest) => (true, rest.trim_start()),
        None => (false, input),
    };

    if body.is_empty() {
        return Err(UnitParseError::Empty);
    }

    let mut total = 0.0;
    for part in body.split_whitespace() {
        if part.contains('/') {
            let frac_parts: Vec<&str> = part.split('/').collect();
            if frac_parts.len() != 2 {
                return Err(UnitParseError::InvalidFraction(part.to_string()));
            }
            let num = frac_parts[0]
                .parse::<f64>()
                .map_err(|_| UnitParseError::InvalidNumber(frac_parts[0].to_string()))?;
            let den = frac_parts[1]
                .parse::<f64>()
                .map_err(|_| UnitParseError::InvalidNumber(frac_parts[1].to_string()))?;
            if den == 0.0 {
                return Err(UnitParseError::InvalidFraction(part.to_string()));
            }
            total += num / den;
        } else {
            total += part
                .parse::<f64>()
                .map_err(|_| UnitParseError::InvalidNumber(part.to_string()))?;
        }
    }

    if !total.is_finite() {
        return Err(UnitParseError::InvalidNumber(input.to_string()));
    }

    Ok(if negative { -total } else { total })
}

/// Parse a length string to millimeters.
///
/// * `input` - e.g. `"18"`, `"18 mm"`, `"1.8cm"`, `"23 1/2 in"`, `"3/4\""`
pub fn parse_length(input: &str) -> Result<f64, UnitParseError> {
    let input = input.trim();
    if input.is_empty() {
        return Err(UnitParseError::Empty);
    }

    let (quantity, unit) = split_unit(input);
    let value = parse_quantity(quantity.trim())?;
    Ok(value * unit.to_mm_factor())
}

/// Format a millimeter value in `unit`, dropping insignificant decimals.
pub fn format_length(value_mm: f64, unit: LengthUnit) -> String {
    let value = value_mm / unit.to_mm_factor();
    let mut text = format!("{:.3}", value);
    if text.contains('.') {
        let trimmed = text.trim_end_matches('0').trim_end_matches('.').len();
        text.truncate(trimmed);
    }
    if text == "-0" {
        text = "0".to_string();
    }
    format!("{} {}", text, unit.label())
}

/// Shorthand for formatting millimeters in warning messages.
pub fn mm(value_mm: f64) -> String {
    format_length(value_mm, LengthUnit::Millimeter)
}
