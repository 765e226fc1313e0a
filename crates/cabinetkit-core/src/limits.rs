//! Tunable layout limits.
//!
//! Every solver reads its thresholds from a [`LayoutLimits`] value instead of
//! the raw constants so a host can tighten them (e.g. a larger minimum shelf
//! gap for a workshop cabinet) without touching the engine.

use crate::constants::{
    EPSILON_MM, FRONT_SETBACK_MM, MAX_NESTING_DEPTH, MIN_BAY_WIDTH_MM, MIN_DEPTH_MM,
    MIN_VERTICAL_GAP_MM, REAR_CLEARANCE_MM,
};
use crate::error::{LayoutError, LayoutResult};
use serde::{Deserialize, Serialize};

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutLimits {
    /// Narrowest bay the range solver accepts (mm)
    pub min_bay_width_mm: f64,
    /// Tolerance for all feasibility guards (mm)
    pub epsilon_mm: f64,
    /// Minimum clear gap between shelves (mm)
    pub min_vertical_gap_mm: f64,
    /// Shelf setback from the carcass front (mm)
    pub front_setback_mm: f64,
    /// Shelf clearance in front of the back panel (mm)
    pub rear_clearance_mm: f64,
    /// Shallowest shelf emitted (mm)
    pub min_shelf_depth_mm: f64,
    /// Narrowest door leaf the double-door check reports as allowed (mm)
    pub min_door_leaf_width_mm: f64,
    /// Deepest chain of nested sub-partitions
    pub max_nesting_depth: usize,
}

impl Default for LayoutLimits {
    fn default() -> Self {
        Self {
            min_bay_width_mm: MIN_BAY_WIDTH_MM,
            epsilon_mm: EPSILON_MM,
            min_vertical_gap_mm: MIN_VERTICAL_GAP_MM,
            front_setback_mm: FRONT_SETBACK_MM,
            rear_clearance_mm: REAR_CLEARANCE_MM,
            min_shelf_depth_mm: MIN_DEPTH_MM,
            min_door_leaf_width_mm: EPSILON_MM,
            max_nesting_depth: MAX_NESTING_DEPTH,
        }
    }
}

impl LayoutLimits {
    /// Check that every threshold is finite and non-negative.
    pub fn validate(&self) -> LayoutResult<()> {
        let fields = [
            ("min_bay_width_mm", self.min_bay_width_mm),
            ("epsilon_mm", self.epsilon_mm),
            ("min_vertical_gap_mm", self.min_vertical_gap_mm),
            ("front_setback_mm", self.front_setback_mm),
            ("rear_clearance_mm", self.rear_clearance_mm),
            ("min_shelf_depth_mm", self.min_shelf_depth_mm),
            ("min_door_leaf_width_mm", self.min_door_leaf_width_mm),
        ];

        for (name, value) in fields {
            if !value.is_finite() || value < 0.0 {
                return Err(LayoutError::InvalidLimits(format!(
                    "{} must be a finite, non-negative length (got {})",
                    name, value
                )));
            }
        }

        if self.epsilon_mm == 0.0 {
            return Err(LayoutError::InvalidLimits(
                "epsilon_mm must be greater than zero".to_string(),
            ));
        }

        if self.max_nesting_depth == 0 {
            return Err(LayoutError::InvalidLimits(
                "max_nesting_depth must be at least 1".to_string(),
            ));
        }

        Ok(())
    }
}
