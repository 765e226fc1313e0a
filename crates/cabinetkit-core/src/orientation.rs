//! Partition axis.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Axis along which a partition node arranges its children.
///
/// `Vertical` nodes are split by upright dividers, so their bays run along
/// the cabinet width (x). `Horizontal` nodes are split by horizontal
/// dividers and their bays stack along the height (z), bottom to top.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Orientation {
    Vertical,
    Horizontal,
}

impl Default for Orientation {
    fn default() -> Self {
        Self::Vertical
    }
}

impl Orientation {
    /// The orientation every nested child of this node must have.
    pub fn perpendicular(self) -> Self {
        match self {
            Self::Vertical => Self::Horizontal,
            Self::Horizontal => Self::Vertical,
        }
    }

    /// Parse a loosely formatted orientation name.
    pub fn parse_loose(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "vertical" | "v" => Some(Self::Vertical),
            "horizontal" | "h" => Some(Self::Horizontal),
            _ => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Vertical => "vertical",
            Self::Horizontal => "horizontal",
        }
    }
}

impl fmt::Display for Orientation {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}
