//! Fixed constants of the cabinet layout engine.
//!
//! All lengths are millimeters.

/// Maximum number of dividers in a single partition node.
pub const MAX_PARTITION_COUNT: u32 = 20;

/// Narrowest bay the range solver will accept.
pub const MIN_BAY_WIDTH_MM: f64 = 5.0;

/// Tolerance used by every feasibility guard.
pub const EPSILON_MM: f64 = 1e-3;

/// Minimum clear gap between stacked shelves.
pub const MIN_VERTICAL_GAP_MM: f64 = 20.0;

/// Shelves stop this far behind the front edge of the carcass.
pub const FRONT_SETBACK_MM: f64 = 3.0;

/// Shelves stop this far in front of the back panel.
pub const REAR_CLEARANCE_MM: f64 = 2.0;

/// Shelves shallower than this are not emitted.
pub const MIN_DEPTH_MM: f64 = 5.0;

/// Deepest allowed chain of nested sub-partitions.
pub const MAX_NESTING_DEPTH: usize = 8;

/// Millimeters per inch.
pub const MM_PER_INCH: f64 = 25.4;
