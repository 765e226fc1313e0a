use cabinetkit_layout::{
    normalize, BayConfig, BayMode, DoorMode, Orientation, PartitionConfig, PartitionLayout,
    PartitionMode, PartitionNormalizer, WarningKind,
};
use serde_json::json;

fn vertical_defaults() -> PartitionConfig {
    PartitionConfig {
        mode: PartitionMode::Vertical,
        count: 1,
        orientation: Orientation::Vertical,
        bays: vec![
            BayConfig {
                shelf_count: 2,
                door_mode: DoorMode::DoorsLeft,
                ..BayConfig::default()
            };
            2
        ],
        ..PartitionConfig::default()
    }
}

#[test]
fn test_nested_orientation_is_forced_perpendicular() {
    let raw = json!({
        "mode": "vertical",
        "count": 1,
        "bays": [
            {
                "mode": "subpartitions",
                "subpartitions": { "mode": "vertical", "orientation": "vertical", "count": 2 }
            },
            {}
        ]
    });

    let result = normalize(&raw, &vertical_defaults()).unwrap();
    let child = result.value.bays[0].subpartitions.as_deref().unwrap();
    assert_eq!(child.orientation, Orientation::Horizontal);
    assert_eq!(child.mode, PartitionMode::Horizontal);
    assert_eq!(child.bays.len(), 3);

    let kinds: Vec<WarningKind> = result.warnings.iter().map(|w| w.kind).collect();
    assert_eq!(
        kinds,
        vec![WarningKind::OrientationOverridden, WarningKind::ModeOverridden]
    );
    assert_eq!(result.warnings[0].path, "root.bays[0].subpartitions");
}

#[test]
fn test_count_is_coerced_and_clamped() {
    let result = normalize(&json!({ "mode": "vertical", "count": "3" }), &vertical_defaults())
        .unwrap();
    assert_eq!(result.value.count, 3);
    assert_eq!(result.value.bays.len(), 4);
    assert!(result.warnings.is_empty());

    let result = normalize(&json!({ "mode": "vertical", "count": 99 }), &vertical_defaults())
        .unwrap();
    assert_eq!(result.value.count, 20);
    assert_eq!(result.value.bays.len(), 21);
    assert_eq!(result.warnings[0].kind, WarningKind::CountClamped);

    let result = normalize(&json!({ "mode": "vertical", "count": -2 }), &vertical_defaults())
        .unwrap();
    assert_eq!(result.value.count, 0);
    assert_eq!(result.value.bays.len(), 1);
}

#[test]
fn test_unparseable_count_falls_back_to_defaults() {
    let result = normalize(
        &json!({ "mode": "vertical", "count": "lots" }),
        &vertical_defaults(),
    )
    .unwrap();
    assert_eq!(result.value.count, 1);
    assert_eq!(result.warnings[0].kind, WarningKind::InvalidValue);
}

#[test]
fn test_count_inferred_from_bays_when_missing() {
    let result = normalize(
        &json!({ "mode": "vertical", "bays": [{}, {}, {}] }),
        &vertical_defaults(),
    )
    .unwrap();
    assert_eq!(result.value.count, 2);
    assert_eq!(result.value.bays.len(), 3);
}

#[test]
fn test_bays_truncated_and_padded_from_template() {
    let truncated = normalize(
        &json!({ "mode": "vertical", "count": 1, "bays": [{}, {}, { "shelf_count": 9 }] }),
        &vertical_defaults(),
    )
    .unwrap();
    assert_eq!(truncated.value.bays.len(), 2);
    assert_eq!(truncated.warnings[0].kind, WarningKind::BaysTruncated);

    let padded = normalize(
        &json!({ "mode": "vertical", "count": 3, "bays": [{ "shelf_count": 5 }] }),
        &vertical_defaults(),
    )
    .unwrap();
    assert_eq!(padded.value.bays.len(), 4);
    assert_eq!(padded.value.bays[0].shelf_count, 5);
    for bay in &padded.value.bays[1..] {
        assert_eq!(bay.shelf_count, 2);
        assert_eq!(bay.door_mode, DoorMode::DoorsLeft);
    }
    assert!(padded.warnings.is_empty());
}

#[test]
fn test_unknown_bay_keys_pass_through() {
    let raw = json!({
        "mode": "vertical",
        "count": 1,
        "bays": [
            { "door_mode": "doors_double", "handle": "bar", "finish": { "color": "oak" } },
            {}
        ]
    });
    let result = normalize(&raw, &vertical_defaults()).unwrap();
    let bay = &result.value.bays[0];
    assert_eq!(bay.door_mode, DoorMode::DoorsDouble);
    assert_eq!(bay.extra["handle"], json!("bar"));
    assert_eq!(bay.extra["finish"], json!({ "color": "oak" }));

    let serialized = result.value.to_raw();
    assert_eq!(serialized["bays"][0]["handle"], json!("bar"));
}

#[test]
fn test_positions_are_cleaned_and_sorted() {
    let raw = json!({
        "mode": "vertical",
        "count": 2,
        "layout": "positions",
        "positions_mm": [400, "200", -5, "oops", 200]
    });
    let result = normalize(&raw, &vertical_defaults()).unwrap();
    assert_eq!(result.value.layout, PartitionLayout::Positions);
    assert_eq!(result.value.positions_mm, vec![200.0, 400.0]);
    assert_eq!(result.warnings.len(), 1);
    assert_eq!(result.warnings[0].kind, WarningKind::InvalidValue);
}

#[test]
fn test_positions_layout_without_positions_falls_back_to_even() {
    let raw = json!({ "mode": "vertical", "count": 1, "layout": "positions", "positions_mm": [] });
    let result = normalize(&raw, &vertical_defaults()).unwrap();
    assert_eq!(result.value.layout, PartitionLayout::Even);
    assert_eq!(result.warnings[0].kind, WarningKind::PositionsFallback);
}

#[test]
fn test_panel_thickness_accepts_length_strings() {
    let raw = json!({ "mode": "vertical", "panel_thickness_mm": "3/4 in" });
    let result = normalize(&raw, &vertical_defaults()).unwrap();
    let thickness = result.value.panel_thickness_mm.unwrap();
    assert!((thickness - 19.05).abs() < 1e-9);

    let raw = json!({ "mode": "vertical", "panel_thickness_mm": 0 });
    let result = normalize(&raw, &vertical_defaults()).unwrap();
    assert_eq!(result.value.panel_thickness_mm, None);
    assert_eq!(result.warnings[0].kind, WarningKind::InvalidValue);
}

#[test]
fn test_invalid_enum_values_use_defaults() {
    let raw = json!({
        "mode": "vertical",
        "count": 1,
        "bays": [{ "mode": "drawers", "door_mode": "sliding", "shelf_count": "two" }, {}]
    });
    let result = normalize(&raw, &vertical_defaults()).unwrap();
    let bay = &result.value.bays[0];
    assert_eq!(bay.mode, BayMode::FrontsShelves);
    assert_eq!(bay.door_mode, DoorMode::DoorsLeft);
    assert_eq!(bay.shelf_count, 2);
    assert_eq!(result.warnings.len(), 3);
    assert!(result.warnings.iter().all(|w| w.path == "root.bays[0]"));
}

#[test]
fn test_switching_to_subpartitions_uses_nested_default() {
    let raw = json!({
        "mode": "horizontal",
        "count": 1,
        "bays": [{ "mode": "subpartitions" }, {}]
    });
    let result = normalize(&raw, &vertical_defaults()).unwrap();
    let child = result.value.bays[0].subpartitions.as_deref().unwrap();
    assert_eq!(child.orientation, Orientation::Vertical);
    assert_eq!(child.mode, PartitionMode::Vertical);
    assert_eq!(child.count, 1);
    assert_eq!(child.bays.len(), 2);
    assert!(result.value.bays[1].subpartitions.is_none());
}

#[test]
fn test_normalize_is_idempotent() {
    let raw = json!({
        "mode": "vertical",
        "count": "2",
        "orientation": "horizontal",
        "layout": "positions",
        "positions_mm": [300, 150],
        "panel_thickness_mm": "16mm",
        "bays": [
            { "door_mode": "doors-right", "label": "sink" },
            {
                "mode": "subpartitions",
                "subpartitions": {
                    "orientation": "vertical",
                    "count": 1,
                    "bays": [
                        { "shelf_count": 3 },
                        { "mode": "subpartitions", "subpartitions": { "count": 2 } }
                    ]
                }
            },
            "not a bay",
            {}
        ]
    });

    let normalizer = PartitionNormalizer::new(vertical_defaults());
    let once = normalizer.normalize(&raw).unwrap();
    let twice = normalizer.normalize(&once.value.to_raw()).unwrap();
    assert_eq!(twice.value, once.value);
    assert!(twice.warnings.is_empty());
    assert_eq!(normalizer.normalize_config(&once.value).value, once.value);
}

#[test]
fn test_normalization_is_deterministic() {
    let raw = json!({
        "mode": "vertical",
        "count": 30,
        "bays": [{ "mode": "subpartitions", "subpartitions": { "orientation": "vertical" } }]
    });
    let a = normalize(&raw, &vertical_defaults()).unwrap();
    let b = normalize(&raw, &vertical_defaults()).unwrap();
    assert_eq!(a, b);
    assert_eq!(
        serde_json::to_string(&a).unwrap(),
        serde_json::to_string(&b).unwrap()
    );
}
