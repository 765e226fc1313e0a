//! Cabinet layout pipeline
//!
//! Runs the full chain for one cabinet: normalize the partition tree,
//! resolve bay ranges node by node (descending into sub-partitions), then
//! plan the front and shelves of every leaf bay. All placements are
//! translated into cabinet coordinates:
//!
//! - x: from the outer left face of the carcass
//! - z: from the underside of the carcass
//! - y: from the front edge (shelves only)
//!
//! The pipeline is deterministic and keeps no state between calls.

use crate::bay_range::{BayRange, BayRangeSolver, RangeAxis};
use crate::fronts::{DoorPlacement, DoubleDoorCheck, FrontParameters, FrontPlanner};
use crate::partition::{BayConfig, DoorMode, Normalized, PartitionConfig, PartitionNormalizer};
use crate::shelves::{ShelfPlacement, ShelfPlanner, ShelfRequest};
use cabinetkit_core::units::mm;
use cabinetkit_core::{
    LayoutError, LayoutLimits, LayoutResult, LayoutWarning, Orientation, WarningKind,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::{debug, info};

/// Outer carcass dimensions and board thicknesses.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CabinetDimensions {
    pub width_mm: f64,
    pub height_mm: f64,
    pub depth_mm: f64,
    /// Side, top and bottom panels; default divider thickness
    pub panel_thickness_mm: f64,
    pub back_thickness_mm: f64,
    pub shelf_thickness_mm: f64,
}

impl Default for CabinetDimensions {
    fn default() -> Self {
        Self {
            width_mm: 600.0,
            height_mm: 720.0,
            depth_mm: 560.0,
            panel_thickness_mm: 18.0,
            back_thickness_mm: 6.0,
            shelf_thickness_mm: 18.0,
        }
    }
}

impl CabinetDimensions {
    pub fn validate(&self) -> LayoutResult<()> {
        let fields = [
            ("width_mm", self.width_mm),
            ("height_mm", self.height_mm),
            ("depth_mm", self.depth_mm),
            ("panel_thickness_mm", self.panel_thickness_mm),
            ("back_thickness_mm", self.back_thickness_mm),
            ("shelf_thickness_mm", self.shelf_thickness_mm),
        ];
        for (name, value) in fields {
            if !value.is_finite() {
                return Err(LayoutError::NonFiniteDimension { name, value });
            }
        }
        Ok(())
    }

    /// The space inside the carcass panels.
    pub fn interior(&self) -> Interior {
        let t = self.panel_thickness_mm;
        Interior {
            opening: Opening {
                x_start_mm: t,
                x_end_mm: self.width_mm - t,
                z_start_mm: t,
                z_end_mm: self.height_mm - t,
            },
            depth_mm: self.depth_mm - self.back_thickness_mm,
        }
    }
}

/// A rectangular region in the cabinet's front plane.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Opening {
    pub x_start_mm: f64,
    pub x_end_mm: f64,
    pub z_start_mm: f64,
    pub z_end_mm: f64,
}

impl Opening {
    pub fn width_mm(&self) -> f64 {
        self.x_end_mm - self.x_start_mm
    }

    pub fn height_mm(&self) -> f64 {
        self.z_end_mm - self.z_start_mm
    }

    /// Bounds along `axis`.
    fn span(&self, axis: RangeAxis) -> (f64, f64) {
        match axis {
            RangeAxis::X => (self.x_start_mm, self.x_end_mm),
            RangeAxis::Z => (self.z_start_mm, self.z_end_mm),
        }
    }

    /// The part of this opening covered by `range`.
    fn restrict(&self, range: &BayRange) -> Opening {
        match range.axis {
            RangeAxis::X => Opening {
                x_start_mm: range.start_mm,
                x_end_mm: range.end_mm,
                ..*self
            },
            RangeAxis::Z => Opening {
                z_start_mm: range.start_mm,
                z_end_mm: range.end_mm,
                ..*self
            },
        }
    }
}

/// Interior opening plus usable depth.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Interior {
    pub opening: Opening,
    pub depth_mm: f64,
}

/// A divider panel between two accepted bays.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct DividerPlacement {
    /// Path of the node the divider belongs to
    pub path: String,
    pub orientation: Orientation,
    /// Position of the divider's first face along the node axis
    pub start_mm: f64,
    pub thickness_mm: f64,
    /// Extent across the node axis
    pub span_start_mm: f64,
    pub span_end_mm: f64,
}

/// Everything built for one leaf bay.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct LeafBayLayout {
    pub path: String,
    pub opening: Opening,
    pub door_mode: DoorMode,
    pub doors: Vec<DoorPlacement>,
    pub shelves: Vec<ShelfPlacement>,
    pub shelf_gap_mm: f64,
    /// Whether `DoorsDouble` could be selected for this bay
    pub double_door: DoubleDoorCheck,
}

/// The full layout model handed to a geometry emitter.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CabinetLayout {
    pub config: PartitionConfig,
    pub interior: Interior,
    pub dividers: Vec<DividerPlacement>,
    pub leaves: Vec<LeafBayLayout>,
    pub warnings: Vec<LayoutWarning>,
}

/// Builds [`CabinetLayout`]s for one cabinet.
#[derive(Debug, Clone)]
pub struct CabinetLayoutEngine {
    dimensions: CabinetDimensions,
    normalizer: PartitionNormalizer,
    ranges: BayRangeSolver,
    fronts: FrontPlanner,
    shelves: ShelfPlanner,
}

impl CabinetLayoutEngine {
    pub fn new(dimensions: CabinetDimensions, fronts: FrontParameters) -> LayoutResult<Self> {
        Self::with_options(
            dimensions,
            fronts,
            PartitionConfig::default(),
            LayoutLimits::default(),
        )
    }

    pub fn with_options(
        dimensions: CabinetDimensions,
        fronts: FrontParameters,
        defaults: PartitionConfig,
        limits: LayoutLimits,
    ) -> LayoutResult<Self> {
        dimensions.validate()?;
        limits.validate()?;

        Ok(Self {
            dimensions,
            normalizer: PartitionNormalizer::with_limits(defaults, limits.clone()),
            ranges: BayRangeSolver::with_limits(dimensions.panel_thickness_mm, limits.clone()),
            fronts: FrontPlanner::with_limits(fronts, limits.clone()),
            shelves: ShelfPlanner::new(limits),
        })
    }

    pub fn dimensions(&self) -> &CabinetDimensions {
        &self.dimensions
    }

    /// Normalize raw partition input against this engine's defaults.
    pub fn normalize(&self, raw: &Value) -> LayoutResult<Normalized<PartitionConfig>> {
        self.normalizer.normalize(raw)
    }

    /// Normalize `raw` and build the layout.
    pub fn apply(&self, raw: &Value) -> LayoutResult<CabinetLayout> {
        let (config, warnings) = self.normalize(raw)?.into_parts();
        self.build_normalized(config, warnings)
    }

    /// Build the layout for a typed tree; it is normalized first.
    pub fn build(&self, config: &PartitionConfig) -> LayoutResult<CabinetLayout> {
        let (config, warnings) = self.normalizer.normalize_config(config).into_parts();
        self.build_normalized(config, warnings)
    }

    fn build_normalized(
        &self,
        config: PartitionConfig,
        warnings: Vec<LayoutWarning>,
    ) -> LayoutResult<CabinetLayout> {
        let interior = self.dimensions.interior();
        info!(
            "Building cabinet layout {} x {} x {}",
            mm(self.dimensions.width_mm),
            mm(self.dimensions.height_mm),
            mm(self.dimensions.depth_mm)
        );

        let mut builder = LayoutBuilder {
            engine: self,
            interior_depth_mm: interior.depth_mm,
            dividers: Vec::new(),
            leaves: Vec::new(),
            warnings,
        };

        let opening = interior.opening;
        if opening.width_mm() < 0.0 || opening.height_mm() < 0.0 {
            builder.warnings.push(LayoutWarning::new(
                WarningKind::NoBaysFit,
                "root",
                format!(
                    "panels of {} leave no interior in a {} x {} cabinet",
                    mm(self.dimensions.panel_thickness_mm),
                    mm(self.dimensions.width_mm),
                    mm(self.dimensions.height_mm)
                ),
            ));
        } else {
            builder.layout_node(&config, opening, "root")?;
        }

        debug!(
            "Layout has {} leaf bay(s), {} divider(s), {} warning(s)",
            builder.leaves.len(),
            builder.dividers.len(),
            builder.warnings.len()
        );

        Ok(CabinetLayout {
            config,
            interior,
            dividers: builder.dividers,
            leaves: builder.leaves,
            warnings: builder.warnings,
        })
    }
}

struct LayoutBuilder<'a> {
    engine: &'a CabinetLayoutEngine,
    interior_depth_mm: f64,
    dividers: Vec<DividerPlacement>,
    leaves: Vec<LeafBayLayout>,
    warnings: Vec<LayoutWarning>,
}

impl LayoutBuilder<'_> {
    fn layout_node(
        &mut self,
        node: &PartitionConfig,
        region: Opening,
        path: &str,
    ) -> LayoutResult<()> {
        let axis = RangeAxis::from(node.orientation);
        let (start, end) = region.span(axis);
        let ranges = self.engine.ranges.resolve(node, start, end)?;

        if ranges.is_empty() {
            self.warnings.push(LayoutWarning::new(
                WarningKind::NoBaysFit,
                path,
                format!(
                    "no bay fits the {} {} span",
                    mm(end - start),
                    node.orientation
                ),
            ));
            return Ok(());
        }

        let thickness = self.engine.ranges.divider_thickness(node);
        let (span_start_mm, span_end_mm) = region.span(match axis {
            RangeAxis::X => RangeAxis::Z,
            RangeAxis::Z => RangeAxis::X,
        });
        for pair in ranges.windows(2) {
            self.dividers.push(DividerPlacement {
                path: path.to_string(),
                orientation: node.orientation,
                start_mm: pair[0].end_mm,
                thickness_mm: thickness,
                span_start_mm,
                span_end_mm,
            });
        }

        for missing in ranges.len()..node.bays.len() {
            self.warnings.push(LayoutWarning::new(
                WarningKind::BayWithoutSpace,
                format!("{}.bays[{}]", path, missing),
                "bay received no space after split positions were dropped",
            ));
        }

        let fallback = BayConfig::default();
        for range in &ranges {
            let bay_path = format!("{}.bays[{}]", path, range.index);
            let bay = node.bays.get(range.index).unwrap_or_else(|| {
                debug!("{} has no bay configuration; leaving it open", bay_path);
                &fallback
            });
            let bay_region = region.restrict(range);

            match bay.subpartitions.as_deref() {
                Some(child) if !bay.is_leaf() => {
                    let child_path = format!("{}.subpartitions", bay_path);
                    self.layout_node(child, bay_region, &child_path)?;
                }
                _ => self.layout_leaf(bay, bay_region, bay_path),
            }
        }
        Ok(())
    }

    fn layout_leaf(&mut self, bay: &BayConfig, opening: Opening, path: String) {
        let engine = self.engine;
        let front_plan = engine.fronts.plan_at(
            &path,
            bay.door_mode,
            opening.width_mm(),
            opening.height_mm(),
        );
        self.warnings.extend(front_plan.warnings);
        let doors = front_plan
            .doors
            .into_iter()
            .map(|door| DoorPlacement {
                x_start_mm: door.x_start_mm + opening.x_start_mm,
                bottom_z_mm: door.bottom_z_mm + opening.z_start_mm,
                ..door
            })
            .collect();

        let request = ShelfRequest {
            requested_count: bay.shelf_count,
            clear_height_mm: opening.height_mm(),
            shelf_thickness_mm: engine.dimensions.shelf_thickness_mm,
            interior_bottom_z_mm: opening.z_start_mm,
            interior_depth_mm: self.interior_depth_mm,
        };
        let footprint = BayRange::new(0, RangeAxis::X, opening.x_start_mm, opening.x_end_mm);
        let shelf_plan = engine
            .shelves
            .plan_at(&path, &request, std::slice::from_ref(&footprint));
        self.warnings.extend(shelf_plan.warnings);

        self.leaves.push(LeafBayLayout {
            double_door: engine.fronts.check_double_door(opening.width_mm()),
            path,
            opening,
            door_mode: bay.door_mode,
            doors,
            shelves: shelf_plan.shelves,
            shelf_gap_mm: shelf_plan.gap_mm,
        });
    }
}
