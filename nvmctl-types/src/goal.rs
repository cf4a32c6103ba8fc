// SPDX-License-Identifier: GPL-3.0-only

//! Allocation-request and goal-layout models
//!
//! These are the structures exchanged with the external allocation/layout
//! service. The request translator in `nvmctl-core` builds the request side
//! and renders the layout side; the layout computation itself is out of
//! scope for this stack.

use serde::{Deserialize, Serialize};

use crate::interleave::InterleaveGeometry;

/// Requested size of an App Direct extent
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ExtentSize {
    /// Use all capacity left over after other extents
    Remaining,
    /// Fixed size in GiB
    Gib(u64),
}

/// One requested App Direct extent: a size paired with its parsed
/// interleave settings
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AppDirectExtent {
    pub size: ExtentSize,
    pub geometry: InterleaveGeometry,
}

/// A structured allocation request for the layout service
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct AllocationRequest {
    /// Percentage of capacity for volatile memory mode (0-100)
    pub memory_mode_percent: u8,
    /// Percentage of capacity left unmapped (0-100)
    pub reserved_percent: u8,
    pub app_direct: Option<AppDirectExtent>,
    /// Restrict the request to these DIMMs; empty means all manageable DIMMs
    pub dimm_ids: Vec<String>,
    /// Restrict the request to these sockets; empty means all
    pub socket_ids: Vec<u16>,
}

/// Per-DIMM slice of a computed goal layout
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalExtent {
    pub dimm_id: String,
    pub memory_bytes: u64,
    pub app_direct_bytes: u64,
}

/// Layout-service response for an allocation request
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GoalLayout {
    pub extents: Vec<GoalExtent>,
    /// Human-readable deviations from the request (e.g. rounded sizes)
    pub warnings: Vec<String>,
}
