// SPDX-License-Identifier: GPL-3.0-only

//! Request/query translation engines for NVDIMM management
//!
//! This crate sits between parsed CLI input and the device model. It owns
//! three conversions:
//!
//! - **capacity**: byte counts to display strings, including the IDEMA
//!   advertised-capacity (`GB`) formula and its block-count inverse
//! - **interleave**: settings token strings to validated interleave geometry
//! - **filter**: narrowing record collections by target criteria, with
//!   bad-target detection
//!
//! plus the thin **request** orchestration that assembles allocation
//! requests for the external layout service and renders its output.
//!
//! Everything here is a pure, synchronous function of its inputs; the only
//! collaborators are the read-only lookup traits in `nvmctl-contracts`.

pub mod capacity;
pub mod filter;
pub mod interleave;
pub mod request;

pub use capacity::{
    CapacityFormatter, advertised_capacity_gb, block_count_for_capacity, block_size_is_4k_variant,
    block_size_is_pi,
};
pub use filter::{DanglingValue, FilterCriterion, FilterSet, MatchOutcome, apply, evaluate};
pub use interleave::{InterleaveSettingsParser, is_remaining_keyword, is_valid_number};
pub use request::{AllocationRequestBuilder, GoalError, extent_size_gib, render_goal_layout};
