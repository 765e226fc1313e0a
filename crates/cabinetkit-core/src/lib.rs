//! # CabinetKit Core
//!
//! Shared building blocks for the CabinetKit layout engine:
//! constants and tunable limits, the partition axis type, length-unit
//! parsing, layout warnings and error types.

pub mod constants;
pub mod error;
pub mod limits;
pub mod orientation;
pub mod units;
pub mod warning;

pub use error::{LayoutError, LayoutResult, UnitParseError};
pub use limits::LayoutLimits;
pub use orientation::Orientation;
pub use units::{format_length, parse_length, LengthUnit};
pub use warning::{LayoutWarning, WarningKind};
