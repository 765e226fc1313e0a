//! Error types for CabinetKit.
//!
//! Only contract violations are errors. Infeasible configurations (reveals
//! wider than the opening, too many shelves, dividers that do not fit) are
//! reported through [`crate::LayoutWarning`] values and reduced output instead.

use thiserror::Error;

/// Contract violations raised by the layout engine.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum LayoutError {
    /// The raw partition value was not a JSON object (or null).
    #[error("Raw partition must be a JSON object, got {found}")]
    RawNotObject {
        /// JSON type name of the offending value.
        found: &'static str,
    },

    /// Interior bounds that can never describe a span.
    #[error("Invalid interior span: start {start_mm} mm, end {end_mm} mm")]
    InvalidSpan {
        /// Interior start coordinate.
        start_mm: f64,
        /// Interior end coordinate.
        end_mm: f64,
    },

    /// A cabinet dimension was NaN or infinite.
    #[error("Dimension '{name}' is not finite: {value}")]
    NonFiniteDimension {
        /// Field name of the dimension.
        name: &'static str,
        /// The offending value.
        value: f64,
    },

    /// Tunable limits failed validation.
    #[error("Invalid layout limits: {0}")]
    InvalidLimits(String),
}

/// Errors raised while parsing a length string such as `"23 1/2 in"`.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum UnitParseError {
    /// Nothing left to parse after trimming and unit removal.
    #[error("Empty length")]
    Empty,

    /// A numeric part could not be parsed.
    #[error("Invalid number '{0}'")]
    InvalidNumber(String),

    /// A fraction had a zero denominator or more than one slash.
    #[error("Invalid fraction '{0}'")]
    InvalidFraction(String),
}

/// Result type alias for layout operations.
pub type LayoutResult<T> = Result<T, LayoutError>;
