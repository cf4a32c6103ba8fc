// SPDX-License-Identifier: GPL-3.0-only

//! Canonical domain models for NVDIMM management
//!
//! This crate defines the single source of truth for the data types shared
//! across the management stack:
//!
//! - **nvmctl-contracts**: references these types from collaborator traits
//! - **nvmctl-core**: consumes these types in its conversion and filter engines
//!
//! All models here are plain values: created fresh per command invocation,
//! immutable once constructed, and free of I/O.

pub mod attribute;
pub mod capacity;
pub mod goal;
pub mod interleave;

pub use attribute::{AttributeRecord, AttributeValue};
pub use capacity::{
    BYTES_PER_GB, BYTES_PER_GIB, BYTES_PER_MB, BYTES_PER_MIB, BYTES_PER_TB, BYTES_PER_TIB,
    CapacityUnit, UnitPreference, best_unit_for, pretty_to_bytes,
};
pub use goal::{AllocationRequest, AppDirectExtent, ExtentSize, GoalExtent, GoalLayout};
pub use interleave::{InterleaveGeometry, InterleaveWidth};
