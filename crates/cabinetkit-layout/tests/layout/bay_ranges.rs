use cabinetkit_layout::{
    resolve_ranges, BayConfig, BayRangeSolver, LayoutLimits, PartitionConfig, PartitionLayout,
    PartitionMode, RangeAxis,
};

fn positions_node(positions_mm: Vec<f64>) -> PartitionConfig {
    PartitionConfig {
        mode: PartitionMode::Vertical,
        count: positions_mm.len() as u32,
        layout: PartitionLayout::Positions,
        bays: vec![BayConfig::default(); positions_mm.len() + 1],
        positions_mm,
        ..PartitionConfig::default()
    }
}

#[test]
fn test_positions_drop_splits_that_make_narrow_bays() {
    let node = positions_node(vec![10.0, 10.0001, 500.0]);
    let ranges = resolve_ranges(&node, 0.0, 521.0, 18.0).unwrap();

    assert_eq!(ranges.len(), 2);
    assert_eq!((ranges[0].start_mm, ranges[0].end_mm), (0.0, 10.0));
    assert_eq!((ranges[1].start_mm, ranges[1].end_mm), (28.0, 500.0));
    // The 3 mm left after the last divider is below the minimum bay width.
    assert_eq!(ranges[1].index, 1);
}

#[test]
fn test_positions_are_offsets_from_interior_start() {
    let node = positions_node(vec![200.0]);
    let ranges = resolve_ranges(&node, 18.0, 582.0, 18.0).unwrap();

    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[0].end_mm, 218.0);
    assert_eq!(ranges[1].start_mm, 236.0);
    assert_eq!(ranges[1].end_mm, 582.0);
}

#[test]
fn test_positions_past_the_end_are_clamped() {
    let node = positions_node(vec![5000.0]);
    let ranges = resolve_ranges(&node, 0.0, 400.0, 18.0).unwrap();

    // Clamped to end - thickness, which leaves no tail bay.
    assert_eq!(ranges.len(), 1);
    assert_eq!(ranges[0].end_mm, 382.0);
}

#[test]
fn test_positions_beyond_count_are_ignored() {
    let node = PartitionConfig {
        count: 1,
        bays: vec![BayConfig::default(); 2],
        ..positions_node(vec![100.0, 200.0, 300.0])
    };
    let ranges = resolve_ranges(&node, 0.0, 600.0, 18.0).unwrap();

    assert_eq!(ranges.len(), node.count as usize + 1);
    assert_eq!((ranges[0].start_mm, ranges[0].end_mm), (0.0, 100.0));
    assert_eq!((ranges[1].start_mm, ranges[1].end_mm), (118.0, 600.0));
}

#[test]
fn test_dropped_split_does_not_use_up_count() {
    // 10.0001 is rejected, so the second divider goes at 300 and 400 is unused.
    let node = PartitionConfig {
        count: 2,
        bays: vec![BayConfig::default(); 3],
        ..positions_node(vec![10.0, 10.0001, 300.0, 400.0])
    };
    let ranges = resolve_ranges(&node, 0.0, 600.0, 18.0).unwrap();

    assert_eq!(ranges.len(), 3);
    assert_eq!(ranges[1].end_mm, 300.0);
    assert_eq!((ranges[2].start_mm, ranges[2].end_mm), (318.0, 600.0));
}

#[test]
fn test_even_split_widths_are_equal_and_ordered() {
    let node = PartitionConfig {
        mode: PartitionMode::Vertical,
        count: 3,
        bays: vec![BayConfig::default(); 4],
        ..PartitionConfig::default()
    };
    let ranges = resolve_ranges(&node, 18.0, 582.0, 18.0).unwrap();

    assert_eq!(ranges.len(), 4);
    let expected = (564.0 - 3.0 * 18.0) / 4.0;
    for (i, range) in ranges.iter().enumerate() {
        assert_eq!(range.index, i);
        assert_eq!(range.axis, RangeAxis::X);
        assert!((range.width_mm - expected).abs() < 1e-9);
    }
    for pair in ranges.windows(2) {
        assert!((pair[1].start_mm - pair[0].end_mm - 18.0).abs() < 1e-9);
    }
}

#[test]
fn test_node_thickness_overrides_cabinet_panel() {
    let node = PartitionConfig {
        mode: PartitionMode::Vertical,
        count: 1,
        panel_thickness_mm: Some(10.0),
        bays: vec![BayConfig::default(); 2],
        ..PartitionConfig::default()
    };
    let ranges = resolve_ranges(&node, 0.0, 210.0, 18.0).unwrap();
    assert_eq!(ranges[0].width_mm, 100.0);
    assert_eq!(ranges[1].start_mm, 110.0);
}

#[test]
fn test_too_many_dividers_is_empty() {
    let node = PartitionConfig {
        mode: PartitionMode::Vertical,
        count: 20,
        bays: vec![BayConfig::default(); 21],
        ..PartitionConfig::default()
    };
    assert!(resolve_ranges(&node, 0.0, 300.0, 18.0).unwrap().is_empty());
}

#[test]
fn test_custom_minimum_bay_width() {
    let limits = LayoutLimits {
        min_bay_width_mm: 150.0,
        ..LayoutLimits::default()
    };
    let solver = BayRangeSolver::with_limits(18.0, limits);
    let node = positions_node(vec![100.0, 300.0]);
    let ranges = solver.resolve(&node, 0.0, 600.0).unwrap();

    // The 100 mm bay is rejected, so the split at 300 opens from 0.
    assert_eq!(ranges.len(), 2);
    assert_eq!(ranges[0].start_mm, 0.0);
    assert_eq!(ranges[0].end_mm, 300.0);
    assert_eq!(ranges[1].start_mm, 318.0);
}
