//! # CabinetKit
//!
//! A parametric cabinet layout engine. Given outer cabinet dimensions and a
//! (possibly malformed) partition configuration it produces the placements of
//! every divider, door leaf and shelf.
//!
//! ## Architecture
//!
//! CabinetKit is organized as a workspace with multiple crates:
//!
//! 1. **cabinetkit-core** - Constants, limits, units, warnings, errors
//! 2. **cabinetkit-layout** - Partition normalizer, bay range solver, front
//!    planner, shelf solver and the cabinet layout pipeline
//! 3. **cabinetkit** - Request loading and the command line front end

pub mod cli;
pub mod request;

pub use cabinetkit_core::{
    format_length, parse_length, LayoutError, LayoutLimits, LayoutResult, LayoutWarning,
    LengthUnit, Orientation, UnitParseError, WarningKind,
};

pub use cabinetkit_layout::{
    normalize, plan_fronts, plan_shelves, resolve_ranges, BayConfig, BayMode, BayRange,
    BayRangeSolver, CabinetDimensions, CabinetLayout, CabinetLayoutEngine, DividerPlacement,
    DoorMode, DoorPlacement, DoubleDoorCheck, FrontParameters, FrontPlanner, LeafBayLayout,
    Normalized, PartitionConfig, PartitionLayout, PartitionMode, PartitionNormalizer,
    RangeAxis, ShelfPlacement, ShelfPlanner,
};

pub use request::{load_request, parse_request, LayoutRequest};

/// Library version
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

/// Initialize logging with the default configuration
///
/// Sets up structured logging with:
/// - Output on stderr, so stdout stays machine-readable
/// - RUST_LOG environment variable support, `info` by default
pub fn init_logging() -> anyhow::Result<()> {
    use tracing_subscriber::fmt;
    use tracing_subscriber::prelude::*;
    use tracing_subscriber::EnvFilter;

    let env_filter =
        EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info"));

    let fmt_layer = fmt::layer()
        .with_writer(std::io::stderr)
        .with_target(true)
        .with_level(true)
        .with_line_number(true);

    tracing_subscriber::registry()
        .with(env_filter)
        .with(fmt_layer)
        .try_init()?;

    Ok(())
}
