//! Shelf Placement Solver
//!
//! Stacks shelves evenly inside a bay opening. The requested count is
//! honored when every gap (below, between and above the shelves) is at least
//! the minimum vertical gap; otherwise the count is reduced one at a time
//! until the stack fits or no shelf is left.
//!
//! Layout of an accepted stack of `n` shelves of thickness `t`:
//!
//! ```text
//! clear_height = (n + 1) * gap + n * t
//! shelf k underside = bottom + gap + k * (t + gap)
//! ```

use crate::bay_range::BayRange;
use cabinetkit_core::units::mm;
use cabinetkit_core::{LayoutLimits, LayoutWarning, WarningKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Inputs for one bay's shelf stack.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct ShelfRequest {
    pub requested_count: u32,
    /// Clear height of the opening (mm)
    pub clear_height_mm: f64,
    pub shelf_thickness_mm: f64,
    /// z of the opening's bottom edge (mm)
    pub interior_bottom_z_mm: f64,
    /// Interior depth, front edge to back panel (mm)
    pub interior_depth_mm: f64,
}

/// One shelf board.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ShelfPlacement {
    pub name: String,
    pub bay_index: usize,
    pub width_mm: f64,
    pub depth_mm: f64,
    /// z of the upper face
    pub top_z_mm: f64,
    pub x_start_mm: f64,
    /// Distance from the carcass front edge
    pub y_start_mm: f64,
    pub thickness_mm: f64,
}

impl ShelfPlacement {
    pub fn bottom_z_mm(&self) -> f64 {
        self.top_z_mm - self.thickness_mm
    }
}

/// Result of planning one shelf stack.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct ShelfPlan {
    pub shelves: Vec<ShelfPlacement>,
    /// Shelves per bay after reduction
    pub applied_count: u32,
    /// Clear gap between shelves (mm); zero when nothing was placed
    pub gap_mm: f64,
    pub warnings: Vec<LayoutWarning>,
}

/// Plans shelf stacks.
#[derive(Debug, Clone, Default)]
pub struct ShelfPlanner {
    limits: LayoutLimits,
}

impl ShelfPlanner {
    pub fn new(limits: LayoutLimits) -> Self {
        Self { limits }
    }

    /// Largest count `<= requested` whose gaps are all at least the minimum,
    /// together with that gap.
    pub fn solve_count(
        &self,
        requested: u32,
        clear_height_mm: f64,
        shelf_thickness_mm: f64,
    ) -> Option<(u32, f64)> {
        if !clear_height_mm.is_finite()
            || !shelf_thickness_mm.is_finite()
            || shelf_thickness_mm <= 0.0
        {
            return None;
        }

        // n shelves need n * (t + min_gap) + min_gap of height, so no count
        // above clear / (t + min_gap) can succeed.
        let bound = (clear_height_mm / (shelf_thickness_mm + self.limits.min_vertical_gap_mm))
            .floor()
            .max(0.0) as u32;
        let mut n = requested.min(bound.saturating_add(1));

        while n > 0 {
            let remaining_clear = clear_height_mm - shelf_thickness_mm * n as f64;
            if remaining_clear > self.limits.epsilon_mm {
                let gap = remaining_clear / (n as f64 + 1.0);
                if gap >= self.limits.min_vertical_gap_mm {
                    return Some((n, gap));
                }
            }
            n -= 1;
        }
        None
    }

    /// Plan shelves for every usable range in `bay_ranges`.
    pub fn plan(&self, request: &ShelfRequest, bay_ranges: &[BayRange]) -> ShelfPlan {
        self.plan_at("shelves", request, bay_ranges)
    }

    /// Same as [`ShelfPlanner::plan`], tagging warnings with `path`.
    pub fn plan_at(
        &self,
        path: &str,
        request: &ShelfRequest,
        bay_ranges: &[BayRange],
    ) -> ShelfPlan {
        if request.requested_count == 0 {
            return ShelfPlan::default();
        }

        let Some((count, gap)) = self.solve_count(
            request.requested_count,
            request.clear_height_mm,
            request.shelf_thickness_mm,
        ) else {
            return self.infeasible(
                path,
                format!(
                    "no {} shelf fits a {} opening with {} minimum gaps",
                    mm(request.shelf_thickness_mm),
                    mm(request.clear_height_mm),
                    mm(self.limits.min_vertical_gap_mm)
                ),
            );
        };

        let usable_depth = request.interior_depth_mm
            - self.limits.front_setback_mm
            - self.limits.rear_clearance_mm;
        if usable_depth.is_nan() || usable_depth <= self.limits.min_shelf_depth_mm {
            return self.infeasible(
                path,
                format!(
                    "usable shelf depth {} is below the {} minimum",
                    mm(usable_depth),
                    mm(self.limits.min_shelf_depth_mm)
                ),
            );
        }

        let mut warnings = Vec::new();
        if count < request.requested_count {
            debug!(
                "Reduced shelves at {} from {} to {}",
                path, request.requested_count, count
            );
            warnings.push(LayoutWarning::new(
                WarningKind::ShelvesReduced,
                path,
                format!(
                    "{} shelves requested, {} fit with a {} gap",
                    request.requested_count,
                    count,
                    mm(gap)
                ),
            ));
        }

        let undersides: Vec<f64> = (0..count)
            .map(|k| {
                request.interior_bottom_z_mm
                    + gap
                    + k as f64 * (request.shelf_thickness_mm + gap)
            })
            .collect();

        let multiple_bays = bay_ranges.len() > 1;
        let mut shelves = Vec::new();
        for range in bay_ranges
            .iter()
            .filter(|r| r.width_mm > self.limits.min_bay_width_mm)
        {
            for (k, underside) in undersides.iter().enumerate() {
                let name = if multiple_bays {
                    format!("bay_{}_shelf_{}", range.index + 1, k + 1)
                } else {
                    format!("shelf_{}", k + 1)
                };
                shelves.push(ShelfPlacement {
                    name,
                    bay_index: range.index,
                    width_mm: range.width_mm,
                    depth_mm: usable_depth,
                    top_z_mm: underside + request.shelf_thickness_mm,
                    x_start_mm: range.start_mm,
                    y_start_mm: self.limits.front_setback_mm,
                    thickness_mm: request.shelf_thickness_mm,
                });
            }
        }

        ShelfPlan {
            shelves,
            applied_count: count,
            gap_mm: gap,
            warnings,
        }
    }

    fn infeasible(&self, path: &str, message: String) -> ShelfPlan {
        debug!("Shelves at {} infeasible: {}", path, message);
        ShelfPlan {
            warnings: vec![LayoutWarning::new(
                WarningKind::ShelvesInfeasible,
                path,
                message,
            )],
            ..ShelfPlan::default()
        }
    }
}

/// Plan shelves with default limits, stacking from z = 0.
pub fn plan_shelves(
    requested_count: u32,
    clear_height_mm: f64,
    shelf_thickness_mm: f64,
    bay_ranges: &[BayRange],
    interior_depth_mm: f64,
) -> Vec<ShelfPlacement> {
    let request = ShelfRequest {
        requested_count,
        clear_height_mm,
        shelf_thickness_mm,
        interior_bottom_z_mm: 0.0,
        interior_depth_mm,
    };
    ShelfPlanner::default().plan(&request, bay_ranges).shelves
}
