//! Bay Range Solver
//!
//! Resolves a partition node into concrete 1-D bay intervals along its axis.
//! Vertical nodes produce x ranges (left to right), horizontal nodes produce
//! z ranges (bottom to top). Dividers of the resolved thickness sit between
//! consecutive ranges.
//!
//! Infeasible input (an interior narrower than the minimum bay, dividers that
//! do not fit, a non-positive divider thickness) yields an empty list.

use crate::partition::{PartitionConfig, PartitionLayout, PartitionMode};
use cabinetkit_core::{LayoutError, LayoutLimits, LayoutResult, Orientation};
use serde::{Deserialize, Serialize};
use tracing::debug;

/// Cabinet axis a range is measured along.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RangeAxis {
    /// Width
    X,
    /// Height
    Z,
}

impl From<Orientation> for RangeAxis {
    fn from(value: Orientation) -> Self {
        match value {
            Orientation::Vertical => Self::X,
            Orientation::Horizontal => Self::Z,
        }
    }
}

/// The resolved footprint of one bay.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BayRange {
    /// Position in the accepted range list
    pub index: usize,
    pub axis: RangeAxis,
    pub start_mm: f64,
    pub end_mm: f64,
    pub width_mm: f64,
}

impl BayRange {
    pub fn new(index: usize, axis: RangeAxis, start_mm: f64, end_mm: f64) -> Self {
        Self {
            index,
            axis,
            start_mm,
            end_mm,
            width_mm: end_mm - start_mm,
        }
    }
}

/// Resolves partition nodes into bay ranges.
#[derive(Debug, Clone)]
pub struct BayRangeSolver {
    /// Cabinet panel thickness, used when a node has no override
    panel_thickness_mm: f64,
    limits: LayoutLimits,
}

impl BayRangeSolver {
    pub fn new(panel_thickness_mm: f64) -> Self {
        Self::with_limits(panel_thickness_mm, LayoutLimits::default())
    }

    pub fn with_limits(panel_thickness_mm: f64, limits: LayoutLimits) -> Self {
        Self {
            panel_thickness_mm,
            limits,
        }
    }

    /// Divider thickness this solver uses for `node`.
    pub fn divider_thickness(&self, node: &PartitionConfig) -> f64 {
        node.divider_thickness(self.panel_thickness_mm)
    }

    /// Resolve `node` over `[interior_start_mm, interior_end_mm]`.
    ///
    /// Returns an error only for bounds that cannot describe a span
    /// (non-finite, or end before start).
    pub fn resolve(
        &self,
        node: &PartitionConfig,
        interior_start_mm: f64,
        interior_end_mm: f64,
    ) -> LayoutResult<Vec<BayRange>> {
        if !interior_start_mm.is_finite()
            || !interior_end_mm.is_finite()
            || interior_end_mm < interior_start_mm
        {
            return Err(LayoutError::InvalidSpan {
                start_mm: interior_start_mm,
                end_mm: interior_end_mm,
            });
        }

        let axis = RangeAxis::from(node.orientation);
        let span = interior_end_mm - interior_start_mm;
        if span < self.limits.min_bay_width_mm {
            debug!("Interior span {:.3} mm is below the minimum bay width", span);
            return Ok(Vec::new());
        }

        if node.mode == PartitionMode::None {
            return Ok(vec![BayRange::new(
                0,
                axis,
                interior_start_mm,
                interior_end_mm,
            )]);
        }

        let thickness = self.divider_thickness(node);
        if thickness.is_nan() || thickness <= 0.0 {
            debug!("Divider thickness {} is not positive", thickness);
            return Ok(Vec::new());
        }

        let ranges = match node.layout {
            PartitionLayout::Even => {
                self.resolve_even(node.count, thickness, axis, interior_start_mm, span)
            }
            PartitionLayout::Positions => self.resolve_positions(
                &node.positions_mm,
                node.count,
                thickness,
                axis,
                interior_start_mm,
                interior_end_mm,
            ),
        };
        Ok(ranges)
    }

    fn resolve_even(
        &self,
        count: u32,
        thickness: f64,
        axis: RangeAxis,
        start: f64,
        span: f64,
    ) -> Vec<BayRange> {
        let dividers = count as f64;
        let available = span - dividers * thickness;

        // A divider exactly as wide as the space left for bays is infeasible.
        if thickness >= available {
            debug!(
                "{} divider(s) of {:.3} mm leave {:.3} mm for bays",
                count, thickness, available
            );
            return Vec::new();
        }

        let bay_width = available / (dividers + 1.0);
        if bay_width < self.limits.min_bay_width_mm {
            debug!("Even bay width {:.3} mm is below the minimum", bay_width);
            return Vec::new();
        }

        (0..=count as usize)
            .map(|index| {
                let bay_start = start + index as f64 * (bay_width + thickness);
                BayRange::new(index, axis, bay_start, bay_start + bay_width)
            })
            .collect()
    }

    /// Greedy split acceptance. At most `count` splits are taken, so the
    /// result never has more than `count + 1` ranges.
    fn resolve_positions(
        &self,
        positions_mm: &[f64],
        count: u32,
        thickness: f64,
        axis: RangeAxis,
        start: f64,
        end: f64,
    ) -> Vec<BayRange> {
        let mut splits: Vec<f64> = positions_mm
            .iter()
            .filter(|p| p.is_finite())
            .map(|p| (start + p).min(end - thickness).max(start))
            .collect();
        splits.sort_by(f64::total_cmp);

        let mut ranges = Vec::with_capacity(splits.len() + 1);
        let mut cursor = start;
        for split in splits {
            if ranges.len() == count as usize {
                debug!(
                    "Ignoring split at {:.4} mm: {} divider(s) already placed",
                    split, count
                );
                continue;
            }
            let width = split - cursor;
            if width >= self.limits.min_bay_width_mm {
                ranges.push(BayRange::new(ranges.len(), axis, cursor, split));
                cursor = split + thickness;
            } else {
                debug!(
                    "Dropping split at {:.4} mm: bay would be {:.4} mm wide",
                    split, width
                );
            }
        }

        if end - cursor >= self.limits.min_bay_width_mm {
            ranges.push(BayRange::new(ranges.len(), axis, cursor, end));
        }
        ranges
    }
}

/// Resolve `node` with default limits.
pub fn resolve_ranges(
    node: &PartitionConfig,
    interior_start_mm: f64,
    interior_end_mm: f64,
    panel_thickness_mm: f64,
) -> LayoutResult<Vec<BayRange>> {
    BayRangeSolver::new(panel_thickness_mm).resolve(node, interior_start_mm, interior_end_mm)
}
