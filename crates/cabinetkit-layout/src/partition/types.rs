//! Type definitions for the partition tree

use cabinetkit_core::Orientation;
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Keys the normalizer understands on a bay object. Anything else is carried
/// through untouched in [`BayConfig::extra`].
pub const KNOWN_BAY_KEYS: [&str; 4] = ["mode", "shelf_count", "door_mode", "subpartitions"];

/// Lowercase a raw enum token and fold `-` and spaces into `_`.
pub(crate) fn canonical_token(value: &str) -> String {
    value
        .trim()
        .to_ascii_lowercase()
        .chars()
        .map(|c| if c == '-' || c == ' ' { '_' } else { c })
        .collect()
}

/// Whether (and along which axis) a node subdivides its space.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionMode {
    None,
    Vertical,
    Horizontal,
}

impl Default for PartitionMode {
    fn default() -> Self {
        Self::None
    }
}

impl PartitionMode {
    pub fn parse_loose(value: &str) -> Option<Self> {
        match canonical_token(value).as_str() {
            "none" | "off" => Some(Self::None),
            "vertical" => Some(Self::Vertical),
            "horizontal" => Some(Self::Horizontal),
            _ => None,
        }
    }

    /// The orientation implied by a subdividing mode.
    pub fn orientation(self) -> Option<Orientation> {
        match self {
            Self::None => None,
            Self::Vertical => Some(Orientation::Vertical),
            Self::Horizontal => Some(Orientation::Horizontal),
        }
    }
}

impl From<Orientation> for PartitionMode {
    fn from(value: Orientation) -> Self {
        match value {
            Orientation::Vertical => Self::Vertical,
            Orientation::Horizontal => Self::Horizontal,
        }
    }
}

/// Bay spacing strategy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum PartitionLayout {
    /// Equal bay widths.
    Even,
    /// Explicit split offsets from `positions_mm`.
    Positions,
}

impl Default for PartitionLayout {
    fn default() -> Self {
        Self::Even
    }
}

impl PartitionLayout {
    pub fn parse_loose(value: &str) -> Option<Self> {
        match canonical_token(value).as_str() {
            "even" | "equal" => Some(Self::Even),
            "positions" | "position" => Some(Self::Positions),
            _ => None,
        }
    }
}

/// What a bay holds.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BayMode {
    /// A leaf bay with an optional front and shelves.
    FrontsShelves,
    /// A bay subdivided by a nested partition node.
    Subpartitions,
}

impl Default for BayMode {
    fn default() -> Self {
        Self::FrontsShelves
    }
}

impl BayMode {
    pub fn parse_loose(value: &str) -> Option<Self> {
        match canonical_token(value).as_str() {
            "fronts_shelves" | "fronts" => Some(Self::FrontsShelves),
            "subpartitions" | "subpartition" => Some(Self::Subpartitions),
            _ => None,
        }
    }
}

/// Door/drawer front configuration of a leaf bay.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DoorMode {
    None,
    /// Explicitly open bay.
    Empty,
    DoorsLeft,
    DoorsRight,
    DoorsDouble,
}

impl Default for DoorMode {
    fn default() -> Self {
        Self::None
    }
}

impl DoorMode {
    pub fn parse_loose(value: &str) -> Option<Self> {
        match canonical_token(value).as_str() {
            "none" => Some(Self::None),
            "empty" => Some(Self::Empty),
            "doors_left" | "left" => Some(Self::DoorsLeft),
            "doors_right" | "right" => Some(Self::DoorsRight),
            "doors_double" | "double" => Some(Self::DoorsDouble),
            _ => None,
        }
    }

    /// Whether this mode produces at least one door leaf.
    pub fn has_doors(self) -> bool {
        matches!(self, Self::DoorsLeft | Self::DoorsRight | Self::DoorsDouble)
    }
}

/// One node of the partition tree.
///
/// A canonical node (as produced by the normalizer) always has
/// `bays.len() == count + 1`, and every nested node is oriented
/// perpendicular to its parent.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PartitionConfig {
    pub mode: PartitionMode,
    /// Number of dividers
    pub count: u32,
    pub orientation: Orientation,
    pub layout: PartitionLayout,
    /// Split offsets from the interior start (mm), strictly increasing
    pub positions_mm: Vec<f64>,
    /// Divider thickness override (mm)
    pub panel_thickness_mm: Option<f64>,
    pub bays: Vec<BayConfig>,
}

impl Default for PartitionConfig {
    fn default() -> Self {
        Self::single_bay(Orientation::Vertical)
    }
}

impl PartitionConfig {
    /// An undivided node holding one default bay.
    pub fn single_bay(orientation: Orientation) -> Self {
        Self {
            mode: PartitionMode::None,
            count: 0,
            orientation,
            layout: PartitionLayout::Even,
            positions_mm: Vec::new(),
            panel_thickness_mm: None,
            bays: vec![BayConfig::default()],
        }
    }

    /// The node a bay gets when it is switched to sub-partitions without
    /// further configuration: one divider along `orientation`.
    pub fn nested_default(orientation: Orientation) -> Self {
        Self {
            mode: PartitionMode::from(orientation),
            count: 1,
            orientation,
            layout: PartitionLayout::Even,
            positions_mm: Vec::new(),
            panel_thickness_mm: None,
            bays: vec![BayConfig::default(), BayConfig::default()],
        }
    }

    /// Divider thickness, falling back to the cabinet panel thickness.
    pub fn divider_thickness(&self, cabinet_panel_thickness_mm: f64) -> f64 {
        self.panel_thickness_mm.unwrap_or(cabinet_panel_thickness_mm)
    }

    /// Serialize back into the loosely typed form the normalizer reads.
    pub fn to_raw(&self) -> Value {
        serde_json::to_value(self).unwrap_or_default()
    }

    /// Visit every node of the tree depth-first, parents before children.
    pub fn walk<'a>(&'a self, visit: &mut dyn FnMut(&'a PartitionConfig, usize)) {
        self.walk_at(0, visit);
    }

    fn walk_at<'a>(&'a self, depth: usize, visit: &mut dyn FnMut(&'a PartitionConfig, usize)) {
        visit(self, depth);
        for bay in &self.bays {
            if let Some(child) = bay.subpartitions.as_deref() {
                child.walk_at(depth + 1, visit);
            }
        }
    }
}

/// One bay of a partition node.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BayConfig {
    pub mode: BayMode,
    pub shelf_count: u32,
    pub door_mode: DoorMode,
    /// Present only when `mode` is [`BayMode::Subpartitions`]
    #[serde(skip_serializing_if = "Option::is_none")]
    pub subpartitions: Option<Box<PartitionConfig>>,
    /// Caller-defined keys preserved verbatim
    #[serde(flatten)]
    pub extra: Map<String, Value>,
}

impl Default for BayConfig {
    fn default() -> Self {
        Self {
            mode: BayMode::FrontsShelves,
            shelf_count: 0,
            door_mode: DoorMode::None,
            subpartitions: None,
            extra: Map::new(),
        }
    }
}

impl BayConfig {
    /// Whether the bay holds a front and shelves rather than a nested node.
    pub fn is_leaf(&self) -> bool {
        self.mode == BayMode::FrontsShelves || self.subpartitions.is_none()
    }
}
