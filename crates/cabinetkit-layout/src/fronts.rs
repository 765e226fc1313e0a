//! Front Feasibility Planner
//!
//! Decides whether a single or double door fits a bay opening and computes
//! the leaf placements. Coordinates are relative to the opening: `x_start_mm`
//! from its left edge, `bottom_z_mm` from its bottom edge.
//!
//! An opening too small for the requested front produces no placements and a
//! [`WarningKind::FrontInfeasible`] warning; it is never an error.

use crate::bay_range::BayRangeSolver;
use crate::partition::{DoorMode, PartitionConfig};
use cabinetkit_core::units::mm;
use cabinetkit_core::{LayoutLimits, LayoutResult, LayoutWarning, WarningKind};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Reveal and gap settings shared by every front of a cabinet.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct FrontParameters {
    /// Gap between each side edge of the opening and the front (mm)
    pub edge_reveal_mm: f64,
    /// Gap above the front (mm)
    pub top_reveal_mm: f64,
    /// Gap below the front (mm)
    pub bottom_reveal_mm: f64,
    /// Gap between the two leaves of a double door (mm)
    pub center_gap_mm: f64,
}

impl Default for FrontParameters {
    fn default() -> Self {
        Self {
            edge_reveal_mm: 2.0,
            top_reveal_mm: 2.0,
            bottom_reveal_mm: 2.0,
            center_gap_mm: 2.0,
        }
    }
}

/// One door leaf.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DoorPlacement {
    pub name: String,
    pub x_start_mm: f64,
    pub width_mm: f64,
    pub height_mm: f64,
    pub bottom_z_mm: f64,
}

/// Placements for one opening plus what was dropped and why.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct FrontPlan {
    pub doors: Vec<DoorPlacement>,
    pub warnings: Vec<LayoutWarning>,
}

impl FrontPlan {
    fn infeasible(path: &str, message: String) -> Self {
        debug!("Front at {} infeasible: {}", path, message);
        Self {
            doors: Vec::new(),
            warnings: vec![LayoutWarning::new(WarningKind::FrontInfeasible, path, message)],
        }
    }
}

/// Whether a double door would fit, reported without building placements.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct DoubleDoorCheck {
    pub allowed: bool,
    pub leaf_width_mm: f64,
    pub min_leaf_width_mm: f64,
}

/// Plans door fronts for bay openings.
#[derive(Debug, Clone)]
pub struct FrontPlanner {
    params: FrontParameters,
    limits: LayoutLimits,
}

impl Default for FrontPlanner {
    fn default() -> Self {
        Self::new(FrontParameters::default())
    }
}

impl FrontPlanner {
    pub fn new(params: FrontParameters) -> Self {
        Self::with_limits(params, LayoutLimits::default())
    }

    pub fn with_limits(params: FrontParameters, limits: LayoutLimits) -> Self {
        Self { params, limits }
    }

    pub fn params(&self) -> &FrontParameters {
        &self.params
    }

    fn fits(&self, value: f64) -> bool {
        value.is_finite() && value > self.limits.epsilon_mm
    }

    /// Plan the front of an opening `clear_width_mm` x `clear_height_mm`.
    pub fn plan(
        &self,
        door_mode: DoorMode,
        clear_width_mm: f64,
        clear_height_mm: f64,
    ) -> FrontPlan {
        self.plan_at("front", door_mode, clear_width_mm, clear_height_mm)
    }

    /// Same as [`FrontPlanner::plan`], tagging warnings with `path`.
    pub fn plan_at(
        &self,
        path: &str,
        door_mode: DoorMode,
        clear_width_mm: f64,
        clear_height_mm: f64,
    ) -> FrontPlan {
        if !door_mode.has_doors() {
            return FrontPlan::default();
        }

        let p = &self.params;
        let usable_width = clear_width_mm - 2.0 * p.edge_reveal_mm;
        if !self.fits(usable_width) {
            return FrontPlan::infeasible(
                path,
                format!(
                    "edge reveals of {} leave no width in a {} opening",
                    mm(p.edge_reveal_mm),
                    mm(clear_width_mm)
                ),
            );
        }

        let usable_height = clear_height_mm - p.top_reveal_mm - p.bottom_reveal_mm;
        if !self.fits(usable_height) {
            return FrontPlan::infeasible(
                path,
                format!(
                    "top/bottom reveals of {}/{} leave no height in a {} opening",
                    mm(p.top_reveal_mm),
                    mm(p.bottom_reveal_mm),
                    mm(clear_height_mm)
                ),
            );
        }

        let leaf = |name: &str, x_start_mm: f64, width_mm: f64| DoorPlacement {
            name: name.to_string(),
            x_start_mm,
            width_mm,
            height_mm: usable_height,
            bottom_z_mm: p.bottom_reveal_mm,
        };

        let doors = match door_mode {
            DoorMode::DoorsLeft => vec![leaf("door_left", p.edge_reveal_mm, usable_width)],
            DoorMode::DoorsRight => vec![leaf("door_right", p.edge_reveal_mm, usable_width)],
            DoorMode::DoorsDouble => {
                let split_width = usable_width - p.center_gap_mm;
                if !self.fits(split_width) {
                    return FrontPlan::infeasible(
                        path,
                        format!(
                            "center gap of {} leaves no width for double doors",
                            mm(p.center_gap_mm)
                        ),
                    );
                }
                let leaf_width = split_width / 2.0;
                if !self.fits(leaf_width) {
                    return FrontPlan::infeasible(
                        path,
                        format!("double door leaves would be {} wide", mm(leaf_width)),
                    );
                }
                vec![
                    leaf("door_double_left", p.edge_reveal_mm, leaf_width),
                    leaf(
                        "door_double_right",
                        p.edge_reveal_mm + leaf_width + p.center_gap_mm,
                        leaf_width,
                    ),
                ]
            }
            DoorMode::None | DoorMode::Empty => Vec::new(),
        };

        FrontPlan {
            doors,
            warnings: Vec::new(),
        }
    }

    /// Report whether a double door fits an opening `clear_width_mm` wide.
    pub fn check_double_door(&self, clear_width_mm: f64) -> DoubleDoorCheck {
        let p = &self.params;
        let min_leaf_width_mm = self.limits.min_door_leaf_width_mm.max(self.limits.epsilon_mm);
        let usable_width = clear_width_mm - 2.0 * p.edge_reveal_mm;
        let split_width = usable_width - p.center_gap_mm;
        let leaf_width = split_width / 2.0;

        let allowed = self.fits(usable_width)
            && self.fits(split_width)
            && leaf_width.is_finite()
            && leaf_width > min_leaf_width_mm;

        DoubleDoorCheck {
            allowed,
            leaf_width_mm: if leaf_width.is_finite() {
                leaf_width.max(0.0)
            } else {
                0.0
            },
            min_leaf_width_mm,
        }
    }

    /// Resolve `node` and check bay `bay_index` for a double door.
    ///
    /// A bay that receives no range is reported as not allowed.
    pub fn check_double_door_in_node(
        &self,
        node: &PartitionConfig,
        bay_index: usize,
        solver: &BayRangeSolver,
        interior_start_mm: f64,
        interior_end_mm: f64,
    ) -> LayoutResult<DoubleDoorCheck> {
        let ranges = solver.resolve(node, interior_start_mm, interior_end_mm)?;
        Ok(match ranges.get(bay_index) {
            Some(range) => self.check_double_door(range.width_mm),
            None => DoubleDoorCheck {
                allowed: false,
                leaf_width_mm: 0.0,
                min_leaf_width_mm: self.limits.min_door_leaf_width_mm.max(self.limits.epsilon_mm),
            },
        })
    }
}

/// Plan a front from explicit reveals with default limits.
pub fn plan_fronts(
    door_mode: DoorMode,
    clear_width_mm: f64,
    clear_height_mm: f64,
    edge_reveal_mm: f64,
    top_reveal_mm: f64,
    bottom_reveal_mm: f64,
    center_gap_mm: f64,
) -> Vec<DoorPlacement> {
    FrontPlanner::new(FrontParameters {
        edge_reveal_mm,
        top_reveal_mm,
        bottom_reveal_mm,
        center_gap_mm,
    })
    .plan(door_mode, clear_width_mm, clear_height_mm)
    .doors
}
