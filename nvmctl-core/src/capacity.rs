// SPDX-License-Identifier: GPL-3.0-only

//! Capacity formatting and IDEMA advertised-capacity conversion
//!
//! Two distinct conversions live here. The binary units (`MiB`, `GiB`, plus
//! the decimal `MB`/`TB` and binary `TiB` pass-throughs) are a plain divide
//! rounded to one decimal. The `GB` unit is different: it reports the
//! *advertised* capacity of a namespace or region using the IDEMA LBA1-03
//! formula, so that the number a user sees matches industry drive-capacity
//! labeling rather than a binary divide.

use tracing::{debug, warn};

use nvmctl_contracts::{DisplayPreferences, TranslateError};
use nvmctl_types::{CapacityUnit, UnitPreference, best_unit_for};

/// IDEMA LBA1-03 constants: LBA count = C1 + C2 * (advertised GB - C3)
/// for a 512-byte logical block
const IDEMA_CONSTANT_1: u64 = 97_696_368;
const IDEMA_CONSTANT_2: u64 = 1_953_504;
const IDEMA_CONSTANT_3: f64 = 50.0;

/// Block size is a protection-information variant (512, 520, 528)
pub fn block_size_is_pi(block_size: u64) -> bool {
    digit(block_size, 2) == 5
}

/// Block size is a 4K variant (4096, 4160, ...)
pub fn block_size_is_4k_variant(block_size: u64) -> bool {
    digit(block_size, 3) == 4
}

fn digit(number: u64, place: u32) -> u64 {
    (number / 10u64.pow(place)) % 10
}

/// Round half-up to one decimal place
fn round_to_one_decimal(value: f64) -> f64 {
    (value * 10.0 + 0.5).floor() / 10.0
}

fn round_up_to_multiple_of_8(value: u64) -> u64 {
    value.div_ceil(8) * 8
}

/// Advertised capacity in GB for a namespace or region
///
/// `block_size` selects the formula regime: 1 means byte-addressable
/// (App Direct), 5xx and 4xxx are the storage-namespace regimes, and
/// anything else (typically 0, meaning no block context) falls back to the
/// raw byte capacity of a pool.
pub fn advertised_capacity_gb(bytes: u64, block_count: u64, block_size: u64) -> f64 {
    let c1 = IDEMA_CONSTANT_1 as f64;
    let c2 = IDEMA_CONSTANT_2 as f64;

    if block_size == 1 {
        (block_count as f64 - c1 * 512.0) / (c2 * 512.0) + IDEMA_CONSTANT_3
    } else if block_size_is_pi(block_size) {
        (block_count as f64 - c1) / c2 + IDEMA_CONSTANT_3
    } else if block_size_is_4k_variant(block_size) {
        (block_count as f64 - c1 / 8.0) / (c2 / 8.0) + IDEMA_CONSTANT_3
    } else {
        (bytes as f64 - c1 * 512.0) / (c2 * 512.0) + IDEMA_CONSTANT_3
    }
}

/// Minimum LBA count whose advertised capacity is >= `capacity_gb`
///
/// Uses the same three block-size regimes as [`advertised_capacity_gb`] and
/// rounds the result up to the next multiple of 8 so the namespace gets an
/// even number of aligned sectors. Not an exact inverse of the forward
/// formula: both directions round independently.
pub fn block_count_for_capacity(capacity_gb: f32, block_size: u64) -> u64 {
    let gb = f64::from(capacity_gb);
    let c1 = IDEMA_CONSTANT_1 as f64;
    let c2 = IDEMA_CONSTANT_2 as f64;

    let raw = if block_size_is_pi(block_size) {
        c1 + c2 * (gb - IDEMA_CONSTANT_3)
    } else if block_size_is_4k_variant(block_size) {
        c1 / 8.0 + (c2 / 8.0) * (gb - IDEMA_CONSTANT_3)
    } else {
        // byte-addressable App Direct: constants scale up by the 512-byte
        // logical block the IDEMA formula assumes
        c1 * 512.0 + (c2 * 512.0) * (gb - IDEMA_CONSTANT_3)
    };

    if raw <= 0.0 {
        return 0;
    }
    round_up_to_multiple_of_8(raw.ceil() as u64)
}

/// Formats raw capacities for display, honoring the persisted unit
/// preference when the caller gives none
pub struct CapacityFormatter<'a> {
    preferences: &'a dyn DisplayPreferences,
}

impl<'a> CapacityFormatter<'a> {
    pub fn new(preferences: &'a dyn DisplayPreferences) -> Self {
        Self { preferences }
    }

    /// Parse a user-entered unit token, failing loudly on junk
    ///
    /// Display paths never call this; it exists for values that came
    /// directly from command input, which must not be silently defaulted.
    pub fn parse_unit(token: &str) -> Result<UnitPreference, TranslateError> {
        UnitPreference::from_token(token).ok_or_else(|| TranslateError::InvalidUnit {
            unit: token.to_string(),
        })
    }

    /// Render `bytes` in the requested unit
    ///
    /// This is a display path: it always produces a string. A missing or
    /// unusable display preference degrades to MiB rather than failing a
    /// read-only show command.
    pub fn format(&self, bytes: u64, preference: UnitPreference) -> String {
        let unit = match preference {
            UnitPreference::Explicit(unit) => unit,
            UnitPreference::Auto => best_unit_for(bytes),
            UnitPreference::Unset => match self.preferences.capacity_unit() {
                Some(unit) => unit,
                None => {
                    debug!("no persisted capacity unit preference, using MiB");
                    CapacityUnit::MiB
                }
            },
        };

        match unit {
            CapacityUnit::B => format!("{} {}", bytes, CapacityUnit::B),
            CapacityUnit::GB => self.format_advertised(bytes, 0, 0),
            unit => Self::format_scaled(bytes, unit),
        }
    }

    /// Render the advertised (IDEMA) capacity of a namespace or region
    ///
    /// Pass `block_size` 0 when no block context exists (pool capacity).
    /// Values below 0.1 GB render as raw bytes; the GB formula is not
    /// meaningful down there and must never print "0.0 GB" for a non-zero
    /// capacity.
    pub fn format_advertised(&self, bytes: u64, block_count: u64, block_size: u64) -> String {
        let gb = advertised_capacity_gb(bytes, block_count, block_size);
        if gb >= 0.1 {
            format!("{:.1} {}", round_to_one_decimal(gb), CapacityUnit::GB)
        } else {
            format!("{} {}", bytes, CapacityUnit::B)
        }
    }

    fn format_scaled(bytes: u64, unit: CapacityUnit) -> String {
        let scaled = round_to_one_decimal(bytes as f64 / unit.scale() as f64);
        if bytes != 0 && scaled == 0.0 {
            // too small to round to one decimal in this unit
            warn!(%unit, bytes, "capacity rounds to zero in requested unit, rendering bytes");
            format!("{} {}", bytes, CapacityUnit::B)
        } else {
            format!("{:.1} {}", scaled, unit)
        }
    }
}
