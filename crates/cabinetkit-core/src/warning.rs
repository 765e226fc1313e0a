//! Non-fatal layout warnings.
//!
//! Every reduction the engine applies to a configuration (clamped counts,
//! dropped doors, fewer shelves) is described by a [`LayoutWarning`] so the
//! host can surface the difference between what was requested and what was
//! built.

use serde::{Deserialize, Serialize};
use std::fmt;

/// Category of a layout warning.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WarningKind {
    /// A nested orientation conflicted with the alternation rule.
    OrientationOverridden,
    /// A partition mode conflicted with its forced orientation.
    ModeOverridden,
    /// A divider count was out of range.
    CountClamped,
    /// A field could not be interpreted and fell back to its default.
    InvalidValue,
    /// More bays were supplied than the divider count allows.
    BaysTruncated,
    /// Split positions were unusable; even spacing was applied.
    PositionsFallback,
    /// Sub-partitions nested too deeply were flattened.
    NestingTooDeep,
    /// No bay fits in an interior span.
    NoBaysFit,
    /// A configured bay received no space from the range solver.
    BayWithoutSpace,
    /// A door/drawer front does not fit its opening.
    FrontInfeasible,
    /// Fewer shelves than requested were placed.
    ShelvesReduced,
    /// No shelf could be placed at all.
    ShelvesInfeasible,
}

impl fmt::Display for WarningKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let label = match self {
            Self::OrientationOverridden => "orientation overridden",
            Self::ModeOverridden => "mode overridden",
            Self::CountClamped => "count clamped",
            Self::InvalidValue => "invalid value",
            Self::BaysTruncated => "bays truncated",
            Self::PositionsFallback => "positions fallback",
            Self::NestingTooDeep => "nesting too deep",
            Self::NoBaysFit => "no bays fit",
            Self::BayWithoutSpace => "bay without space",
            Self::FrontInfeasible => "front infeasible",
            Self::ShelvesReduced => "shelves reduced",
            Self::ShelvesInfeasible => "shelves infeasible",
        };
        f.write_str(label)
    }
}

/// A human-readable, non-fatal diagnostic.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct LayoutWarning {
    pub kind: WarningKind,
    /// Location in the partition tree, e.g. `root.bays[1].subpartitions`.
    pub path: String,
    pub message: String,
}

impl LayoutWarning {
    pub fn new(kind: WarningKind, path: impl Into<String>, message: impl Into<String>) -> Self {
        Self {
            kind,
            path: path.into(),
            message: message.into(),
        }
    }
}

impl fmt::Display for LayoutWarning {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} ({}): {}", self.path, self.kind, self.message)
    }
}
