// SPDX-License-Identifier: GPL-3.0-only

//! Capacity units and byte-scale helpers
//!
//! Display formatting (including the IDEMA advertised-capacity formula for
//! the `GB` unit) lives in `nvmctl-core`; this module only defines the unit
//! vocabulary and the raw scale factors.

use std::fmt;

use anyhow::Result;
use serde::{Deserialize, Serialize};

pub const BYTES_PER_MIB: u64 = 1 << 20;
pub const BYTES_PER_GIB: u64 = 1 << 30;
pub const BYTES_PER_TIB: u64 = 1 << 40;
pub const BYTES_PER_MB: u64 = 1_000_000;
pub const BYTES_PER_GB: u64 = 1_000_000_000;
pub const BYTES_PER_TB: u64 = 1_000_000_000_000;

/// Capacity units accepted on the management surface
///
/// `GB` is special: when *formatting*, it means IDEMA advertised capacity,
/// not a decimal divide. When *parsing* a user-entered size string it scales
/// decimally like `MB`/`TB`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum CapacityUnit {
    B,
    MiB,
    MB,
    GiB,
    GB,
    TiB,
    TB,
}

impl CapacityUnit {
    /// Display label, also the accepted token spelling
    pub fn label(&self) -> &'static str {
        match self {
            CapacityUnit::B => "B",
            CapacityUnit::MiB => "MiB",
            CapacityUnit::MB => "MB",
            CapacityUnit::GiB => "GiB",
            CapacityUnit::GB => "GB",
            CapacityUnit::TiB => "TiB",
            CapacityUnit::TB => "TB",
        }
    }

    /// Case-insensitive token match
    pub fn from_token(token: &str) -> Option<Self> {
        [
            CapacityUnit::B,
            CapacityUnit::MiB,
            CapacityUnit::MB,
            CapacityUnit::GiB,
            CapacityUnit::GB,
            CapacityUnit::TiB,
            CapacityUnit::TB,
        ]
        .into_iter()
        .find(|unit| unit.label().eq_ignore_ascii_case(token))
    }

    /// Bytes represented by one of this unit
    pub fn scale(&self) -> u64 {
        match self {
            CapacityUnit::B => 1,
            CapacityUnit::MiB => BYTES_PER_MIB,
            CapacityUnit::MB => BYTES_PER_MB,
            CapacityUnit::GiB => BYTES_PER_GIB,
            CapacityUnit::GB => BYTES_PER_GB,
            CapacityUnit::TiB => BYTES_PER_TIB,
            CapacityUnit::TB => BYTES_PER_TB,
        }
    }
}

impl fmt::Display for CapacityUnit {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// A caller's unit request for capacity formatting
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum UnitPreference {
    /// Caller named a unit explicitly
    Explicit(CapacityUnit),
    /// Pick the largest unit (GiB, then MiB, then B) that yields >= 1
    Auto,
    /// No unit given; consult the persisted display preference
    Unset,
}

impl UnitPreference {
    /// Case-insensitive match against a unit token or the `Auto` keyword
    pub fn from_token(token: &str) -> Option<Self> {
        if token.eq_ignore_ascii_case("auto") {
            Some(UnitPreference::Auto)
        } else {
            CapacityUnit::from_token(token).map(UnitPreference::Explicit)
        }
    }
}

/// Find the best binary display unit for a raw byte count
pub fn best_unit_for(bytes: u64) -> CapacityUnit {
    if bytes / BYTES_PER_GIB != 0 {
        CapacityUnit::GiB
    } else if bytes / BYTES_PER_MIB != 0 {
        CapacityUnit::MiB
    } else {
        CapacityUnit::B
    }
}

/// Parse a human-entered capacity string (e.g. "1.5 GiB") to bytes
pub fn pretty_to_bytes(pretty: &str) -> Result<u64> {
    let split = pretty.split_whitespace().collect::<Vec<&str>>();
    let string_value = split
        .first()
        .ok_or_else(|| anyhow::anyhow!("Invalid input"))?;

    let value: f64 = string_value.parse()?;
    let unit_token = *split
        .last()
        .ok_or_else(|| anyhow::anyhow!("Invalid input"))?;

    let unit = CapacityUnit::from_token(unit_token)
        .ok_or_else(|| anyhow::anyhow!("Invalid unit: {}", unit_token))?;

    let bytes = value * unit.scale() as f64;
    if bytes <= 0.0 {
        return Ok(0);
    }
    if bytes >= u64::MAX as f64 {
        return Ok(u64::MAX);
    }
    Ok(bytes.trunc() as u64)
}
