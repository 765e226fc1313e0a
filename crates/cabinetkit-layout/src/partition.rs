//! Partition tree
//!
//! The recursive cabinet configuration: partition nodes split a region into
//! bays, and each bay either holds a front plus shelves or another
//! (perpendicular) partition node.

pub mod normalize;
pub mod raw;
pub mod types;

pub use normalize::{normalize, Normalized, PartitionNormalizer};
pub use raw::{RawBay, RawPartition};
pub use types::{
    BayConfig, BayMode, DoorMode, PartitionConfig, PartitionLayout, PartitionMode, KNOWN_BAY_KEYS,
};
