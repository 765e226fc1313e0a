use cabinetkit_layout::{
    BayConfig, BayMode, CabinetDimensions, CabinetLayoutEngine, DoorMode, FrontParameters,
    LayoutError, LayoutLimits, Orientation, PartitionConfig, PartitionMode, WarningKind,
};
use serde_json::json;

fn engine() -> CabinetLayoutEngine {
    CabinetLayoutEngine::new(CabinetDimensions::default(), FrontParameters::default()).unwrap()
}

#[test]
fn test_three_even_bays_with_dividers() {
    let layout = engine()
        .apply(&json!({
            "mode": "vertical",
            "count": 2,
            "bays": [
                { "door_mode": "doors_left" },
                { "door_mode": "doors_double", "shelf_count": 2 },
                { "door_mode": "empty" }
            ]
        }))
        .unwrap();

    assert!(layout.warnings.is_empty());
    assert_eq!(layout.dividers.len(), 2);
    assert_eq!(layout.leaves.len(), 3);

    // 564 mm interior, two 18 mm dividers: three 176 mm bays.
    for leaf in &layout.leaves {
        assert!((leaf.opening.width_mm() - 176.0).abs() < 1e-9);
    }
    assert!((layout.dividers[0].start_mm - 194.0).abs() < 1e-9);
    assert_eq!(layout.dividers[0].orientation, Orientation::Vertical);
    assert_eq!(layout.dividers[0].span_start_mm, 18.0);
    assert_eq!(layout.dividers[0].span_end_mm, 702.0);

    let middle = &layout.leaves[1];
    assert_eq!(middle.path, "root.bays[1]");
    assert_eq!(middle.doors.len(), 2);
    assert!((middle.doors[0].x_start_mm - (212.0 + 2.0)).abs() < 1e-9);
    assert_eq!(middle.shelves.len(), 2);
    assert!(layout.leaves[2].doors.is_empty());
}

#[test]
fn test_nested_subpartition_splits_height() {
    let layout = engine()
        .apply(&json!({
            "mode": "vertical",
            "count": 1,
            "bays": [
                {
                    "mode": "subpartitions",
                    "subpartitions": {
                        "count": 1,
                        "bays": [{ "door_mode": "doors_right" }, { "door_mode": "doors_left" }]
                    }
                },
                {}
            ]
        }))
        .unwrap();

    assert_eq!(layout.leaves.len(), 3);
    assert_eq!(layout.dividers.len(), 2);
    let nested = &layout.dividers[1];
    assert_eq!(nested.path, "root.bays[0].subpartitions");
    assert_eq!(nested.orientation, Orientation::Horizontal);

    let lower = &layout.leaves[0];
    let upper = &layout.leaves[1];
    assert_eq!(lower.path, "root.bays[0].subpartitions.bays[0]");
    // 684 mm interior height, one 18 mm divider: two 333 mm openings.
    assert!((lower.opening.height_mm() - 333.0).abs() < 1e-9);
    assert!((upper.opening.z_start_mm - 369.0).abs() < 1e-9);
    assert_eq!(lower.opening.width_mm(), upper.opening.width_mm());
    assert!((upper.doors[0].bottom_z_mm - 371.0).abs() < 1e-9);
}

#[test]
fn test_dropped_positions_report_bays_without_space() {
    let layout = engine()
        .apply(&json!({
            "mode": "vertical",
            "count": 2,
            "layout": "positions",
            "positions_mm": [200, 200.0001]
        }))
        .unwrap();

    assert_eq!(layout.leaves.len(), 2);
    assert_eq!(layout.dividers.len(), 1);
    let missing: Vec<&str> = layout
        .warnings
        .iter()
        .filter(|w| w.kind == WarningKind::BayWithoutSpace)
        .map(|w| w.path.as_str())
        .collect();
    assert_eq!(missing, vec!["root.bays[2]"]);
}

#[test]
fn test_positions_never_add_unconfigured_bays() {
    let layout = engine()
        .apply(&json!({
            "mode": "vertical",
            "count": 1,
            "layout": "positions",
            "positions_mm": [100, 200, 300]
        }))
        .unwrap();

    let count = layout.config.count as usize;
    assert_eq!(count, 1);
    assert!(layout.leaves.len() <= count + 1);
    assert_eq!(layout.leaves.len(), 2);
    assert_eq!(layout.dividers.len(), 1);
    assert!((layout.dividers[0].start_mm - 118.0).abs() < 1e-9);
    assert!(layout.warnings.is_empty());
}

#[test]
fn test_infeasible_parts_degrade_with_warnings() {
    let dims = CabinetDimensions {
        height_mm: 80.0,
        ..CabinetDimensions::default()
    };
    let fronts = FrontParameters {
        edge_reveal_mm: 400.0,
        ..FrontParameters::default()
    };
    let engine = CabinetLayoutEngine::new(dims, fronts).unwrap();
    let layout = engine
        .apply(&json!({ "bays": [{ "door_mode": "doors_left", "shelf_count": 3 }] }))
        .unwrap();

    assert_eq!(layout.leaves.len(), 1);
    assert!(layout.leaves[0].doors.is_empty());
    assert!(layout.leaves[0].shelves.is_empty());
    let kinds: Vec<WarningKind> = layout.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![WarningKind::FrontInfeasible, WarningKind::ShelvesInfeasible]
    );
}

#[test]
fn test_build_normalizes_typed_config() {
    let config = PartitionConfig {
        mode: PartitionMode::Horizontal,
        count: 2,
        orientation: Orientation::Vertical,
        bays: vec![BayConfig {
            door_mode: DoorMode::DoorsDouble,
            ..BayConfig::default()
        }],
        ..PartitionConfig::default()
    };
    let layout = engine().build(&config).unwrap();

    assert_eq!(layout.config.orientation, Orientation::Horizontal);
    assert_eq!(layout.config.bays.len(), 3);
    assert_eq!(layout.leaves.len(), 3);
    assert_eq!(layout.warnings[0].kind, WarningKind::OrientationOverridden);
}

#[test]
fn test_custom_defaults_fill_missing_bays() {
    let defaults = PartitionConfig {
        mode: PartitionMode::Vertical,
        count: 1,
        orientation: Orientation::Vertical,
        bays: vec![
            BayConfig {
                mode: BayMode::FrontsShelves,
                shelf_count: 1,
                door_mode: DoorMode::DoorsLeft,
                ..BayConfig::default()
            };
            2
        ],
        ..PartitionConfig::default()
    };
    let engine = CabinetLayoutEngine::with_options(
        CabinetDimensions::default(),
        FrontParameters::default(),
        defaults,
        LayoutLimits::default(),
    )
    .unwrap();

    let layout = engine.apply(&serde_json::Value::Null).unwrap();
    assert_eq!(layout.leaves.len(), 2);
    for leaf in &layout.leaves {
        assert_eq!(leaf.doors.len(), 1);
        assert_eq!(leaf.shelves.len(), 1);
    }
}

#[test]
fn test_invalid_limits_are_rejected() {
    let limits = LayoutLimits {
        epsilon_mm: 0.0,
        ..LayoutLimits::default()
    };
    let result = CabinetLayoutEngine::with_options(
        CabinetDimensions::default(),
        FrontParameters::default(),
        PartitionConfig::default(),
        limits,
    );
    assert!(matches!(result, Err(LayoutError::InvalidLimits(_))));
}

#[test]
fn test_non_object_request_is_an_error() {
    assert!(matches!(
        engine().apply(&json!([1, 2, 3])),
        Err(LayoutError::RawNotObject { found: "array" })
    ));
}

#[test]
fn test_layout_is_deterministic() {
    let raw = json!({
        "mode": "horizontal",
        "count": 3,
        "bays": [
            { "shelf_count": 4 },
            { "mode": "subpartitions", "subpartitions": { "count": 2 } },
            { "door_mode": "doors_double" }
        ]
    });
    let engine = engine();
    let first = engine.apply(&raw).unwrap();
    let second = engine.apply(&raw).unwrap();
    assert_eq!(first, second);
    assert_eq!(
        serde_json::to_string(&first).unwrap(),
        serde_json::to_string(&second).unwrap()
    );
}
