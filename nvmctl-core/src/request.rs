// SPDX-License-Identifier: GPL-3.0-only

//! Allocation-request building and goal-layout rendering
//!
//! Thin orchestration over the parsers: combines an interleave geometry and
//! raw size/percentage inputs into the structured request the external
//! layout service consumes, and renders the resulting layout back through
//! the capacity formatter for display.

use thiserror::Error;
use tracing::debug;

use nvmctl_contracts::{LayoutError, LayoutService, TranslateError};
use nvmctl_types::{
    AllocationRequest, AppDirectExtent, AttributeRecord, AttributeValue, BYTES_PER_GIB, ExtentSize,
    GoalLayout, UnitPreference,
};

use crate::capacity::CapacityFormatter;
use crate::interleave::{InterleaveSettingsParser, is_remaining_keyword, is_valid_number};

/// Failure of a full request translation: either the inputs did not
/// translate, or the layout service rejected the request
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GoalError {
    #[error(transparent)]
    Translate(#[from] TranslateError),
    #[error(transparent)]
    Layout(#[from] LayoutError),
}

/// Builds an [`AllocationRequest`] from parsed CLI property values
#[derive(Debug, Default)]
pub struct AllocationRequestBuilder {
    memory_mode_percent: u8,
    reserved_percent: u8,
    app_direct: Option<AppDirectExtent>,
    dimm_ids: Vec<String>,
    socket_ids: Vec<u16>,
}

impl AllocationRequestBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn memory_mode_percentage(mut self, percent: u64) -> Result<Self, TranslateError> {
        self.memory_mode_percent = validate_percentage("MemoryMode", percent)?;
        Ok(self)
    }

    pub fn reserved_percentage(mut self, percent: u64) -> Result<Self, TranslateError> {
        self.reserved_percent = validate_percentage("Reserved", percent)?;
        Ok(self)
    }

    /// Attach an App Direct extent from its size and settings property pair
    ///
    /// The size is either the `Remaining` sentinel or a GiB count; the
    /// settings string goes through the interleave parser.
    pub fn app_direct(
        mut self,
        size: &str,
        settings: &str,
        parser: &InterleaveSettingsParser<'_>,
    ) -> Result<Self, TranslateError> {
        let size = parse_extent_size(size)?;
        let geometry = parser.parse(settings)?;
        self.app_direct = Some(AppDirectExtent { size, geometry });
        Ok(self)
    }

    /// Restrict the request to specific DIMMs, dropping duplicate ids
    pub fn dimm_ids(mut self, ids: impl IntoIterator<Item = impl Into<String>>) -> Self {
        for id in ids {
            let id = id.into();
            if !self.dimm_ids.iter().any(|seen| seen.eq_ignore_ascii_case(&id)) {
                self.dimm_ids.push(id);
            }
        }
        self
    }

    /// Restrict the request to specific sockets, dropping duplicates
    pub fn socket_ids(mut self, ids: impl IntoIterator<Item = u16>) -> Self {
        for id in ids {
            if !self.socket_ids.contains(&id) {
                self.socket_ids.push(id);
            }
        }
        self
    }

    pub fn build(self) -> Result<AllocationRequest, TranslateError> {
        let combined = u64::from(self.memory_mode_percent) + u64::from(self.reserved_percent);
        if combined > 100 {
            return Err(TranslateError::InvalidPercentage {
                property: "MemoryMode+Reserved".into(),
                percent: combined,
            });
        }
        Ok(AllocationRequest {
            memory_mode_percent: self.memory_mode_percent,
            reserved_percent: self.reserved_percent,
            app_direct: self.app_direct,
            dimm_ids: self.dimm_ids,
            socket_ids: self.socket_ids,
        })
    }

    /// Build the request and hand it to the layout service
    pub fn execute(self, service: &dyn LayoutService) -> Result<GoalLayout, GoalError> {
        let request = self.build()?;
        debug!(?request, "submitting allocation request");
        Ok(service.compute_goal(&request)?)
    }
}

fn validate_percentage(property: &str, percent: u64) -> Result<u8, TranslateError> {
    if percent > 100 {
        return Err(TranslateError::InvalidPercentage {
            property: property.into(),
            percent,
        });
    }
    Ok(percent as u8)
}

fn parse_extent_size(size: &str) -> Result<ExtentSize, TranslateError> {
    if is_remaining_keyword(size) {
        return Ok(ExtentSize::Remaining);
    }
    if !is_valid_number(size) {
        return Err(TranslateError::InvalidSizeValue {
            value: size.to_string(),
        });
    }
    let gib = if let Some(hex) = size.strip_prefix("0x").or_else(|| size.strip_prefix("0X")) {
        u64::from_str_radix(hex, 16)
    } else {
        size.parse()
    }
    .map_err(|_| TranslateError::InvalidSizeValue {
        value: size.to_string(),
    })?;
    Ok(ExtentSize::Gib(gib))
}

/// Render a computed goal layout as display records
///
/// One record per DIMM extent, capacities formatted per the caller's unit
/// preference. Output order follows the layout service's extent order.
pub fn render_goal_layout(
    layout: &GoalLayout,
    formatter: &CapacityFormatter<'_>,
    preference: UnitPreference,
) -> Vec<AttributeRecord> {
    layout
        .extents
        .iter()
        .map(|extent| {
            AttributeRecord::from_pairs([
                ("DimmID", AttributeValue::from(extent.dimm_id.as_str())),
                (
                    "MemorySize",
                    AttributeValue::from(formatter.format(extent.memory_bytes, preference)),
                ),
                (
                    "AppDirect1Size",
                    AttributeValue::from(formatter.format(extent.app_direct_bytes, preference)),
                ),
            ])
        })
        .collect()
}

/// GiB count of an extent size, given the capacity left over for `Remaining`
pub fn extent_size_gib(size: ExtentSize, remaining_bytes: u64) -> u64 {
    match size {
        ExtentSize::Gib(gib) => gib,
        ExtentSize::Remaining => remaining_bytes / BYTES_PER_GIB,
    }
}
