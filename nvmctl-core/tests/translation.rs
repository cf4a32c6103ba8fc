// SPDX-License-Identifier: GPL-3.0-only

//! End-to-end translation flows with stub collaborators: CLI property
//! values in, structured request out, layout rendered back for display.

use nvmctl_contracts::{
    DisplayPreferences, LayoutError, LayoutService, PlatformCapabilities, TranslateError,
};
use nvmctl_core::{
    AllocationRequestBuilder, CapacityFormatter, FilterCriterion, InterleaveSettingsParser,
    render_goal_layout,
};
use nvmctl_types::{
    AllocationRequest, AttributeRecord, AttributeValue, BYTES_PER_GIB, CapacityUnit, ExtentSize,
    GoalExtent, GoalLayout, InterleaveWidth, UnitPreference,
};

struct StubPlatform {
    recommendation: Option<(InterleaveWidth, InterleaveWidth)>,
}

impl PlatformCapabilities for StubPlatform {
    fn recommended_interleave_sizes(&self) -> Option<(InterleaveWidth, InterleaveWidth)> {
        self.recommendation
    }
}

struct StubPreferences {
    unit: Option<CapacityUnit>,
}

impl DisplayPreferences for StubPreferences {
    fn capacity_unit(&self) -> Option<CapacityUnit> {
        self.unit
    }
}

/// Splits every DIMM evenly: memory-mode percentage to memory, rest to
/// App Direct
struct EvenSplitLayout {
    dimm_capacity_bytes: u64,
}

impl LayoutService for EvenSplitLayout {
    fn compute_goal(&self, request: &AllocationRequest) -> Result<GoalLayout, LayoutError> {
        let memory = self.dimm_capacity_bytes * u64::from(request.memory_mode_percent) / 100;
        let extents = request
            .dimm_ids
            .iter()
            .map(|dimm_id| GoalExtent {
                dimm_id: dimm_id.clone(),
                memory_bytes: memory,
                app_direct_bytes: self.dimm_capacity_bytes - memory,
            })
            .collect();
        Ok(GoalLayout {
            extents,
            warnings: Vec::new(),
        })
    }
}

#[test]
fn test_create_goal_flow_renders_layout() {
    let platform = StubPlatform {
        recommendation: Some((InterleaveWidth::W256B, InterleaveWidth::W64B)),
    };
    let parser = InterleaveSettingsParser::new(&platform);
    let service = EvenSplitLayout {
        dimm_capacity_bytes: 100 * BYTES_PER_GIB,
    };

    let layout = AllocationRequestBuilder::new()
        .memory_mode_percentage(20)
        .unwrap()
        .app_direct("Remaining", "", &parser)
        .unwrap()
        .dimm_ids(["0x0001", "0x0011"])
        .execute(&service)
        .unwrap();

    let preferences = StubPreferences {
        unit: Some(CapacityUnit::GiB),
    };
    let formatter = CapacityFormatter::new(&preferences);
    let records = render_goal_layout(&layout, &formatter, UnitPreference::Unset);

    assert_eq!(records.len(), 2);
    assert_eq!(
        records[0].get("MemorySize").unwrap().to_display_string(),
        "20.0 GiB"
    );
    assert_eq!(
        records[0].get("AppDirect1Size").unwrap().to_display_string(),
        "80.0 GiB"
    );
}

#[test]
fn test_create_goal_flow_without_platform_default_fails() {
    let platform = StubPlatform {
        recommendation: None,
    };
    let parser = InterleaveSettingsParser::new(&platform);

    let result = AllocationRequestBuilder::new().app_direct("32", "", &parser);
    assert!(matches!(
        result,
        Err(TranslateError::NoRecommendedDefault)
    ));
}

#[test]
fn test_show_flow_filters_then_formats() {
    // two DIMMs from the device model, user shows one of them in GB
    let devices = vec![
        AttributeRecord::from_pairs([
            ("DimmID", AttributeValue::from("0x0001")),
            ("Capacity", AttributeValue::from(64 * BYTES_PER_GIB)),
        ]),
        AttributeRecord::from_pairs([
            ("DimmID", AttributeValue::from("0x0011")),
            ("Capacity", AttributeValue::from(64 * BYTES_PER_GIB)),
        ]),
    ];
    let filters = vec![FilterCriterion::new("DimmID", ["0x0011"])];

    let matched = nvmctl_core::apply(&devices, &filters, true).unwrap();
    assert_eq!(matched.len(), 1);

    let preferences = StubPreferences { unit: None };
    let formatter = CapacityFormatter::new(&preferences);
    let capacity = matched[0].get("Capacity").unwrap().as_u64().unwrap();
    // 64 GiB advertised through the pool branch of the IDEMA formula
    let rendered = formatter.format_advertised(capacity, 0, 0);
    assert!(rendered.ends_with(" GB"), "got {rendered}");
}

#[test]
fn test_show_flow_bad_target_is_loud() {
    let devices = vec![AttributeRecord::from_pairs([("DimmID", "0x0001")])];
    let filters = vec![FilterCriterion::new("DimmID", ["0x0009"])];
    let error = nvmctl_core::apply(&devices, &filters, true).unwrap_err();
    assert_eq!(
        error,
        TranslateError::DanglingFilterValue {
            attribute: "DimmID".into(),
            value: "0x0009".into(),
        }
    );
}

#[test]
fn test_layout_service_error_propagates() {
    struct RejectingLayout;

    impl LayoutService for RejectingLayout {
        fn compute_goal(&self, _request: &AllocationRequest) -> Result<GoalLayout, LayoutError> {
            Err(LayoutError::new(
                nvmctl_contracts::LayoutErrorKind::NotEnoughCapacity,
                "request exceeds socket capacity",
            ))
        }
    }

    let error = AllocationRequestBuilder::new()
        .execute(&RejectingLayout)
        .unwrap_err();
    assert!(error.to_string().contains("socket capacity"));
}

#[test]
fn test_extent_size_survives_request_roundtrip() {
    let platform = StubPlatform {
        recommendation: None,
    };
    let parser = InterleaveSettingsParser::new(&platform);
    let request = AllocationRequestBuilder::new()
        .app_direct("0x20", "Mirror_128B_64B", &parser)
        .unwrap()
        .build()
        .unwrap();
    let extent = request.app_direct.unwrap();
    assert_eq!(extent.size, ExtentSize::Gib(32));
    assert!(extent.geometry.mirrored);
}
