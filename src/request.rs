//! Layout request files
//!
//! A request bundles everything one layout run needs:
//!
//! ```json
//! {
//!   "cabinet": { "width_mm": 900, "height_mm": 720, "depth_mm": 560 },
//!   "fronts": { "edge_reveal_mm": 2 },
//!   "limits": { "min_vertical_gap_mm": 30 },
//!   "defaults": { "mode": "vertical", "count": 1 },
//!   "partition": { "count": 2, "bays": [{ "door_mode": "doors_double" }] }
//! }
//! ```
//!
//! Every key is optional. `partition` stays raw JSON until the normalizer
//! sees it; `defaults` is normalized once before the engine is built.

use anyhow::{Context, Result};
use cabinetkit_core::{LayoutLimits, LayoutResult};
use cabinetkit_layout::{
    CabinetDimensions, CabinetLayoutEngine, FrontParameters, PartitionConfig, PartitionNormalizer,
};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::io::Read;
use std::path::Path;
use tracing::{debug, warn};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LayoutRequest {
    pub cabinet: CabinetDimensions,
    pub fronts: FrontParameters,
    pub limits: LayoutLimits,
    /// Raw defaults the partition falls back to
    pub defaults: Option<Value>,
    pub partition: Value,
}

impl LayoutRequest {
    /// Normalized defaults, or the single-bay default when none are given.
    pub fn partition_defaults(&self) -> LayoutResult<PartitionConfig> {
        let Some(raw) = self.defaults.as_ref() else {
            return Ok(PartitionConfig::default());
        };
        let normalizer =
            PartitionNormalizer::with_limits(PartitionConfig::default(), self.limits.clone());
        let (defaults, warnings) = normalizer.normalize(raw)?.into_parts();
        for warning in &warnings {
            warn!("defaults: {}", warning);
        }
        Ok(defaults)
    }

    /// Build the engine configured by this request.
    pub fn engine(&self) -> LayoutResult<CabinetLayoutEngine> {
        CabinetLayoutEngine::with_options(
            self.cabinet,
            self.fronts,
            self.partition_defaults()?,
            self.limits.clone(),
        )
    }
}

/// Parse a request from JSON text.
pub fn parse_request(text: &str) -> Result<LayoutRequest> {
    let request: LayoutRequest =
        serde_json::from_str(text).context("Failed to parse layout request")?;
    debug!(
        "Request for a {} x {} x {} mm cabinet",
        request.cabinet.width_mm, request.cabinet.height_mm, request.cabinet.depth_mm
    );
    Ok(request)
}

/// Load a request from `path`, or from stdin when `path` is `-`.
pub fn load_request(path: &Path) -> Result<LayoutRequest> {
    let text = if path == Path::new("-") {
        let mut buf = String::new();
        std::io::stdin()
            .read_to_string(&mut buf)
            .context("Failed to read request from stdin")?;
        buf
    } else {
        std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read request file {}", path.display()))?
    };
    parse_request(&text).with_context(|| format!("Invalid request in {}", path.display()))
}
