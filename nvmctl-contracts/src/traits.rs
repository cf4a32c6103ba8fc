// SPDX-License-Identifier: GPL-3.0-only

//! Read-only collaborator interfaces consumed by the translation layer
//!
//! All three are synchronous lookups: the translation core is invoked once
//! per CLI command on the calling thread and performs no I/O of its own.

use nvmctl_types::{AllocationRequest, CapacityUnit, GoalLayout, InterleaveWidth};

use crate::LayoutError;

/// Platform capability queries backed by the BIOS/driver capability tables
pub trait PlatformCapabilities {
    /// The platform's recommended (IMC, channel) interleave widths, if any
    fn recommended_interleave_sizes(&self) -> Option<(InterleaveWidth, InterleaveWidth)>;
}

/// Persisted user display preferences
pub trait DisplayPreferences {
    /// Preferred capacity unit, consulted only when the caller gave none
    fn capacity_unit(&self) -> Option<CapacityUnit>;
}

/// The external allocation/layout service
///
/// Layout computation is an opaque collaborator: the translation layer only
/// builds its input and renders its output.
pub trait LayoutService {
    fn compute_goal(&self, request: &AllocationRequest) -> Result<GoalLayout, LayoutError>;
}
