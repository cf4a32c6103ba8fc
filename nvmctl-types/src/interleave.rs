// SPDX-License-Identifier: GPL-3.0-only

//! Memory-interleave geometry models

use std::fmt;

use serde::{Deserialize, Serialize};

/// Interleave width for one axis of the IMC/channel geometry
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum InterleaveWidth {
    W64B,
    W128B,
    W256B,
    W4KB,
    W1GB,
    Unknown,
}

impl InterleaveWidth {
    /// Accepted token spelling, also the display label
    pub fn label(&self) -> &'static str {
        match self {
            InterleaveWidth::W64B => "64B",
            InterleaveWidth::W128B => "128B",
            InterleaveWidth::W256B => "256B",
            InterleaveWidth::W4KB => "4KB",
            InterleaveWidth::W1GB => "1GB",
            InterleaveWidth::Unknown => "Unknown",
        }
    }

    /// Width in bytes; `Unknown` has no numeric value
    pub fn bytes(&self) -> u64 {
        match self {
            InterleaveWidth::W64B => 64,
            InterleaveWidth::W128B => 128,
            InterleaveWidth::W256B => 256,
            InterleaveWidth::W4KB => 4096,
            InterleaveWidth::W1GB => 1 << 30,
            InterleaveWidth::Unknown => 0,
        }
    }

    /// Case-insensitive token match; `Unknown` is not a valid token
    pub fn from_token(token: &str) -> Option<Self> {
        [
            InterleaveWidth::W64B,
            InterleaveWidth::W128B,
            InterleaveWidth::W256B,
            InterleaveWidth::W4KB,
            InterleaveWidth::W1GB,
        ]
        .into_iter()
        .find(|width| width.label().eq_ignore_ascii_case(token))
    }
}

impl fmt::Display for InterleaveWidth {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.label())
    }
}

/// Parsed interleave geometry for an App Direct extent
///
/// Invariant (enforced by the settings parser): when both widths are given
/// explicitly, `imc_width` is numerically >= `channel_width`; when only one
/// is given, both carry the same value.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct InterleaveGeometry {
    pub imc_width: InterleaveWidth,
    pub channel_width: InterleaveWidth,
    pub by_one: bool,
    pub mirrored: bool,
}

impl Default for InterleaveGeometry {
    fn default() -> Self {
        Self {
            imc_width: InterleaveWidth::Unknown,
            channel_width: InterleaveWidth::Unknown,
            by_one: false,
            mirrored: false,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_width_tokens() {
        assert_eq!(InterleaveWidth::from_token("64b"), Some(InterleaveWidth::W64B));
        assert_eq!(InterleaveWidth::from_token("4kb"), Some(InterleaveWidth::W4KB));
        assert_eq!(InterleaveWidth::from_token("1gb"), Some(InterleaveWidth::W1GB));
        assert_eq!(InterleaveWidth::from_token("Unknown"), None);
        assert_eq!(InterleaveWidth::from_token("2GB"), None);
    }

    #[test]
    fn test_width_ordering_by_bytes() {
        assert!(InterleaveWidth::W64B.bytes() < InterleaveWidth::W128B.bytes());
        assert!(InterleaveWidth::W4KB.bytes() < InterleaveWidth::W1GB.bytes());
    }

    #[test]
    fn test_geometry_serde_roundtrip() {
        let geometry = InterleaveGeometry {
            imc_width: InterleaveWidth::W256B,
            channel_width: InterleaveWidth::W64B,
            by_one: false,
            mirrored: true,
        };
        let json = serde_json::to_string(&geometry).expect("serialize geometry");
        let parsed: InterleaveGeometry = serde_json::from_str(&json).expect("deserialize geometry");
        assert_eq!(parsed, geometry);
    }
}
