//! # CabinetKit Layout
//!
//! The cabinet layout engine: a pure, synchronous computation from a
//! (possibly malformed) partition configuration plus cabinet dimensions to a
//! layout model of bays, dividers, doors and shelves.
//!
//! ## Components
//!
//! - **Partition Tree Normalizer** ([`partition`]): canonicalizes raw input
//!   into a [`PartitionConfig`] tree with alternating orientations
//! - **Bay Range Solver** ([`bay_range`]): resolves a node into bay intervals
//! - **Front Feasibility Planner** ([`fronts`]): single and double doors
//! - **Shelf Placement Solver** ([`shelves`]): evenly gapped shelf stacks
//! - **Pipeline** ([`layout`]): chains the above for a whole cabinet
//!
//! Infeasible configurations never fail; they produce a smaller layout and
//! [`LayoutWarning`]s describing what was dropped.

pub mod bay_range;
pub mod fronts;
pub mod layout;
pub mod partition;
pub mod shelves;

pub use bay_range::{resolve_ranges, BayRange, BayRangeSolver, RangeAxis};
pub use cabinetkit_core::{
    LayoutError, LayoutLimits, LayoutResult, LayoutWarning, Orientation, WarningKind,
};
pub use fronts::{
    plan_fronts, DoorPlacement, DoubleDoorCheck, FrontParameters, FrontPlan, FrontPlanner,
};
pub use layout::{
    CabinetDimensions, CabinetLayout, CabinetLayoutEngine, DividerPlacement, Interior,
    LeafBayLayout, Opening,
};
pub use partition::{
    normalize, BayConfig, BayMode, DoorMode, Normalized, PartitionConfig, PartitionLayout,
    PartitionMode, PartitionNormalizer, RawBay, RawPartition,
};
pub use shelves::{plan_shelves, ShelfPlacement, ShelfPlan, ShelfPlanner, ShelfRequest};
