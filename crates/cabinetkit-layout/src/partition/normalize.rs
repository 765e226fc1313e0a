//! Partition tree normalizer
//!
//! Turns raw, possibly malformed configuration into a canonical
//! [`PartitionConfig`] tree. Normalization never fails on bad field values:
//! each one falls back to the matching default and is reported as a
//! [`LayoutWarning`]. The result always satisfies:
//!
//! - `bays.len() == count + 1` at every depth, with `count <= 20`
//! - every nested node is oriented perpendicular to its parent
//! - `layout == Positions` only with a non-empty, strictly increasing,
//!   non-negative `positions_mm`
//! - `mode == None` implies a single bay
//!
//! Warnings are returned in traversal order, so identical input always
//! yields identical output.

use super::raw::{coerce_f64, Field, RawBay, RawPartition};
use super::types::{
    BayConfig, BayMode, DoorMode, PartitionConfig, PartitionLayout, PartitionMode,
};
use cabinetkit_core::constants::MAX_PARTITION_COUNT;
use cabinetkit_core::units::mm;
use cabinetkit_core::{LayoutLimits, LayoutResult, LayoutWarning, Orientation, WarningKind};
use serde::Serialize;
use serde_json::Value;
use tracing::{debug, warn};

/// A normalized value plus the warnings produced while building it.
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Normalized<T> {
    pub value: T,
    pub warnings: Vec<LayoutWarning>,
}

impl<T> Normalized<T> {
    fn new(value: T, warnings: Vec<LayoutWarning>) -> Self {
        Self { value, warnings }
    }

    pub fn into_parts(self) -> (T, Vec<LayoutWarning>) {
        (self.value, self.warnings)
    }
}

/// Normalizes raw partition input against a set of defaults.
#[derive(Debug, Clone)]
pub struct PartitionNormalizer {
    defaults: PartitionConfig,
    limits: LayoutLimits,
}

impl PartitionNormalizer {
    pub fn new(defaults: PartitionConfig) -> Self {
        Self::with_limits(defaults, LayoutLimits::default())
    }

    pub fn with_limits(defaults: PartitionConfig, limits: LayoutLimits) -> Self {
        Self { defaults, limits }
    }

    pub fn defaults(&self) -> &PartitionConfig {
        &self.defaults
    }

    /// Normalize a raw JSON partition.
    ///
    /// Fails only when `raw` is neither an object nor `null`.
    pub fn normalize(&self, raw: &Value) -> LayoutResult<Normalized<PartitionConfig>> {
        let raw = RawPartition::from_value(raw)?;
        Ok(self.normalize_raw(&raw))
    }

    /// Normalize an already-typed tree, e.g. one edited in place by a host.
    pub fn normalize_config(&self, config: &PartitionConfig) -> Normalized<PartitionConfig> {
        let raw = RawPartition::from_value(&config.to_raw()).unwrap_or_default();
        self.normalize_raw(&raw)
    }

    pub fn normalize_raw(&self, raw: &RawPartition) -> Normalized<PartitionConfig> {
        let result = self.normalize_node(raw, &self.defaults, "root", 0, None);
        if !result.warnings.is_empty() {
            debug!(
                "Partition normalization produced {} warning(s)",
                result.warnings.len()
            );
        }
        result
    }

    /// Normalize one node. `forced` is the orientation required by the
    /// parent; it is `None` only for the root.
    fn normalize_node(
        &self,
        raw: &RawPartition,
        defaults: &PartitionConfig,
        path: &str,
        depth: usize,
        forced: Option<Orientation>,
    ) -> Normalized<PartitionConfig> {
        let mut warnings = Vec::new();

        let requested_mode = match raw.str_field("mode", PartitionMode::parse_loose) {
            Field::Value(mode) => Some(mode),
            Field::Missing => None,
            Field::Invalid => {
                warnings.push(invalid_value(path, "mode", raw.get("mode")));
                None
            }
        };
        let requested_orientation = match raw.str_field("orientation", Orientation::parse_loose) {
            Field::Value(orientation) => Some(orientation),
            Field::Missing => None,
            Field::Invalid => {
                warnings.push(invalid_value(path, "orientation", raw.get("orientation")));
                None
            }
        };

        let mut mode = requested_mode.unwrap_or(defaults.mode);
        let orientation = match forced {
            Some(forced) => {
                if let Some(requested) = requested_orientation.filter(|o| *o != forced) {
                    warnings.push(orientation_overridden(path, requested, forced));
                }
                if let Some(mode_orientation) = mode.orientation().filter(|o| *o != forced) {
                    if requested_mode.is_some() {
                        warnings.push(LayoutWarning::new(
                            WarningKind::ModeOverridden,
                            path,
                            format!(
                                "mode {} conflicts with the {} orientation required under a {} parent; using {}",
                                mode_orientation,
                                forced,
                                forced.perpendicular(),
                                forced
                            ),
                        ));
                    }
                    mode = PartitionMode::from(forced);
                }
                forced
            }
            None => match mode.orientation() {
                Some(mode_orientation) => {
                    if let Some(requested) =
                        requested_orientation.filter(|o| *o != mode_orientation)
                    {
                        warnings.push(orientation_overridden(path, requested, mode_orientation));
                    }
                    mode_orientation
                }
                None => defaults.orientation,
            },
        };

        let count = if mode == PartitionMode::None {
            0
        } else {
            self.resolve_count(raw, defaults, path, &mut warnings)
        };

        let positions_mm = self.resolve_positions(raw, defaults, path, &mut warnings);
        let mut layout = match raw.str_field("layout", PartitionLayout::parse_loose) {
            Field::Value(layout) => layout,
            Field::Missing => defaults.layout,
            Field::Invalid => {
                warnings.push(invalid_value(path, "layout", raw.get("layout")));
                defaults.layout
            }
        };
        if layout == PartitionLayout::Positions && positions_mm.is_empty() {
            warnings.push(LayoutWarning::new(
                WarningKind::PositionsFallback,
                path,
                "positions layout has no usable split positions; using even spacing",
            ));
            layout = PartitionLayout::Even;
        }

        let panel_thickness_mm = self.resolve_panel_thickness(raw, defaults, path, &mut warnings);

        let template = template_bay(defaults, orientation);
        let expected = count as usize + 1;
        let mut bays = Vec::with_capacity(expected);

        match raw.bays() {
            Field::Value(entries) => {
                if entries.len() > expected {
                    warnings.push(LayoutWarning::new(
                        WarningKind::BaysTruncated,
                        path,
                        format!(
                            "{} bay(s) supplied but count {} allows {}; dropping the last {}",
                            entries.len(),
                            count,
                            expected,
                            entries.len() - expected
                        ),
                    ));
                }
                for (index, entry) in entries.iter().take(expected).enumerate() {
                    let bay_path = format!("{}.bays[{}]", path, index);
                    let (raw_bay, rejected) = RawBay::from_entry(entry);
                    if let Some(found) = rejected {
                        warnings.push(LayoutWarning::new(
                            WarningKind::InvalidValue,
                            bay_path.as_str(),
                            format!("bay entry is a {}, not an object; using defaults", found),
                        ));
                    }
                    let bay =
                        self.normalize_bay(&raw_bay, &template, &bay_path, depth, orientation);
                    warnings.extend(bay.warnings);
                    bays.push(bay.value);
                }
            }
            Field::Invalid => {
                warnings.push(invalid_value(path, "bays", raw.get("bays")));
            }
            Field::Missing => {}
        }

        while bays.len() < expected {
            let bay_path = format!("{}.bays[{}]", path, bays.len());
            let bay = self.normalize_bay(
                &RawBay::default(),
                &template,
                &bay_path,
                depth,
                orientation,
            );
            warnings.extend(bay.warnings);
            bays.push(bay.value);
        }

        let node = PartitionConfig {
            mode,
            count: (bays.len() - 1) as u32,
            orientation,
            layout,
            positions_mm,
            panel_thickness_mm,
            bays,
        };
        Normalized::new(node, warnings)
    }

    fn resolve_count(
        &self,
        raw: &RawPartition,
        defaults: &PartitionConfig,
        path: &str,
        warnings: &mut Vec<LayoutWarning>,
    ) -> u32 {
        let requested = match raw.int_field("count") {
            Field::Value(count) => count,
            Field::Invalid => {
                warnings.push(invalid_value(path, "count", raw.get("count")));
                return defaults.count.min(MAX_PARTITION_COUNT);
            }
            Field::Missing => match raw.bays() {
                Field::Value(entries) if !entries.is_empty() => entries.len() as i64 - 1,
                _ => return defaults.count.min(MAX_PARTITION_COUNT),
            },
        };

        let clamped = requested.clamp(0, MAX_PARTITION_COUNT as i64);
        if clamped != requested {
            warnings.push(LayoutWarning::new(
                WarningKind::CountClamped,
                path,
                format!(
                    "count {} is outside 0..={}; using {}",
                    requested, MAX_PARTITION_COUNT, clamped
                ),
            ));
        }
        clamped as u32
    }

    fn resolve_positions(
        &self,
        raw: &RawPartition,
        defaults: &PartitionConfig,
        path: &str,
        warnings: &mut Vec<LayoutWarning>,
    ) -> Vec<f64> {
        let candidates: Vec<Option<f64>> = match raw.get("positions_mm") {
            None | Some(Value::Null) => defaults.positions_mm.iter().map(|p| Some(*p)).collect(),
            Some(Value::Array(items)) => items.iter().map(coerce_f64).collect(),
            Some(other) => {
                warnings.push(invalid_value(path, "positions_mm", Some(other)));
                defaults.positions_mm.iter().map(|p| Some(*p)).collect()
            }
        };

        let total = candidates.len();
        let mut positions: Vec<f64> = candidates
            .into_iter()
            .flatten()
            .filter(|p| p.is_finite() && *p >= 0.0)
            .collect();
        let dropped = total - positions.len();
        if dropped > 0 {
            warnings.push(LayoutWarning::new(
                WarningKind::InvalidValue,
                path,
                format!(
                    "dropped {} split position(s) that were negative or not numbers",
                    dropped
                ),
            ));
        }

        positions.sort_by(f64::total_cmp);
        positions.dedup();
        positions
    }

    fn resolve_panel_thickness(
        &self,
        raw: &RawPartition,
        defaults: &PartitionConfig,
        path: &str,
        warnings: &mut Vec<LayoutWarning>,
    ) -> Option<f64> {
        let fallback = defaults.panel_thickness_mm.filter(|t| t.is_finite() && *t > 0.0);
        match raw.get("panel_thickness_mm") {
            None => fallback,
            Some(Value::Null) => None,
            Some(value) => match coerce_f64(value) {
                Some(thickness) if thickness > 0.0 => Some(thickness),
                Some(thickness) => {
                    warnings.push(LayoutWarning::new(
                        WarningKind::InvalidValue,
                        path,
                        format!(
                            "panel thickness {} must be positive; using the default",
                            mm(thickness)
                        ),
                    ));
                    fallback
                }
                None => {
                    warnings.push(invalid_value(path, "panel_thickness_mm", Some(value)));
                    fallback
                }
            },
        }
    }

    /// Normalize one bay. `parent_orientation` is the orientation of the node
    /// that owns the bay; `depth` is that node's depth.
    fn normalize_bay(
        &self,
        raw: &RawBay,
        template: &BayConfig,
        path: &str,
        depth: usize,
        parent_orientation: Orientation,
    ) -> Normalized<BayConfig> {
        let mut warnings = Vec::new();

        let mut mode = match raw.str_field("mode", BayMode::parse_loose) {
            Field::Value(mode) => mode,
            Field::Missing => template.mode,
            Field::Invalid => {
                warnings.push(invalid_value(path, "mode", raw.get("mode")));
                template.mode
            }
        };

        let shelf_count = match raw.int_field("shelf_count") {
            Field::Value(count) => {
                let clamped = count.clamp(0, u32::MAX as i64);
                if clamped != count {
                    warnings.push(LayoutWarning::new(
                        WarningKind::CountClamped,
                        path,
                        format!("shelf count {} clamped to {}", count, clamped),
                    ));
                }
                clamped as u32
            }
            Field::Missing => template.shelf_count,
            Field::Invalid => {
                warnings.push(invalid_value(path, "shelf_count", raw.get("shelf_count")));
                template.shelf_count
            }
        };

        let door_mode = match raw.str_field("door_mode", DoorMode::parse_loose) {
            Field::Value(door_mode) => door_mode,
            Field::Missing => template.door_mode,
            Field::Invalid => {
                warnings.push(invalid_value(path, "door_mode", raw.get("door_mode")));
                template.door_mode
            }
        };

        if mode == BayMode::Subpartitions && depth + 1 > self.limits.max_nesting_depth {
            warn!("Sub-partitions at {} exceed the nesting limit", path);
            warnings.push(LayoutWarning::new(
                WarningKind::NestingTooDeep,
                path,
                format!(
                    "sub-partitions nested deeper than {} levels; treating bay as fronts and shelves",
                    self.limits.max_nesting_depth
                ),
            ));
            mode = BayMode::FrontsShelves;
        }

        let subpartitions = if mode == BayMode::Subpartitions {
            let child_orientation = parent_orientation.perpendicular();
            let child_defaults = child_defaults(template, child_orientation);
            let child_path = format!("{}.subpartitions", path);
            let (child_raw, rejected) = RawPartition::nested(raw.get("subpartitions"));
            if let Some(found) = rejected {
                warnings.push(LayoutWarning::new(
                    WarningKind::InvalidValue,
                    child_path.as_str(),
                    format!("subpartitions is a {}, not an object; using defaults", found),
                ));
            }
            let child = self.normalize_node(
                &child_raw,
                &child_defaults,
                &child_path,
                depth + 1,
                Some(child_orientation),
            );
            warnings.extend(child.warnings);
            Some(Box::new(child.value))
        } else {
            None
        };

        let bay = BayConfig {
            mode,
            shelf_count,
            door_mode,
            subpartitions,
            extra: raw.unknown_fields(),
        };
        Normalized::new(bay, warnings)
    }
}

/// The bay used for missing entries of a node oriented `orientation`: the
/// first default bay, with its nested node turned perpendicular.
fn template_bay(defaults: &PartitionConfig, orientation: Orientation) -> BayConfig {
    let mut template = defaults.bays.first().cloned().unwrap_or_default();
    if let Some(child) = template.subpartitions.as_deref_mut() {
        child.orientation = orientation.perpendicular();
    }
    template
}

fn child_defaults(template: &BayConfig, orientation: Orientation) -> PartitionConfig {
    let mut defaults = template
        .subpartitions
        .as_deref()
        .cloned()
        .unwrap_or_else(|| PartitionConfig::nested_default(orientation));
    defaults.orientation = orientation;
    defaults
}

fn orientation_overridden(
    path: &str,
    requested: Orientation,
    applied: Orientation,
) -> LayoutWarning {
    LayoutWarning::new(
        WarningKind::OrientationOverridden,
        path,
        format!("requested {} orientation, applied {}", requested, applied),
    )
}

fn invalid_value(path: &str, field: &str, value: Option<&Value>) -> LayoutWarning {
    let shown = value.map(Value::to_string).unwrap_or_default();
    LayoutWarning::new(
        WarningKind::InvalidValue,
        path,
        format!("unrecognized {} {}; using the default", field, shown),
    )
}

/// Normalize `raw` against `defaults` with default limits.
pub fn normalize(
    raw: &Value,
    defaults: &PartitionConfig,
) -> LayoutResult<Normalized<PartitionConfig>> {
    PartitionNormalizer::new(defaults.clone()).normalize(raw)
}
