use cabinetkit_layout::{
    plan_shelves, BayRange, RangeAxis, ShelfPlanner, ShelfRequest, WarningKind,
};

fn request(count: u32, height: f64) -> ShelfRequest {
    ShelfRequest {
        requested_count: count,
        clear_height_mm: height,
        shelf_thickness_mm: 18.0,
        interior_bottom_z_mm: 0.0,
        interior_depth_mm: 500.0,
    }
}

#[test]
fn test_count_reduced_until_gaps_fit() {
    let ranges = [BayRange::new(0, RangeAxis::X, 0.0, 400.0)];
    let plan = ShelfPlanner::default().plan(&request(10, 200.0), &ranges);

    assert_eq!(plan.applied_count, 4);
    assert!((plan.gap_mm - 25.6).abs() < 1e-9);
    let n = plan.applied_count as f64;
    assert!((n * (18.0 + plan.gap_mm) + plan.gap_mm - 200.0).abs() < 1e-6);

    assert_eq!(plan.warnings.len(), 1);
    assert_eq!(plan.warnings[0].kind, WarningKind::ShelvesReduced);
    assert_eq!(plan.shelves.len(), 4);
}

#[test]
fn test_shelf_stack_is_evenly_spaced() {
    let ranges = [BayRange::new(0, RangeAxis::X, 0.0, 400.0)];
    let plan = ShelfPlanner::default().plan(&request(4, 200.0), &ranges);

    let mut below = 0.0;
    for shelf in &plan.shelves {
        assert!((shelf.bottom_z_mm() - below - plan.gap_mm).abs() < 1e-9);
        below = shelf.top_z_mm;
    }
    assert!((200.0 - below - plan.gap_mm).abs() < 1e-9);
}

#[test]
fn test_gap_is_measured_to_shelf_underside() {
    let ranges = [BayRange::new(0, RangeAxis::X, 0.0, 400.0)];
    let shelf_request = ShelfRequest {
        interior_bottom_z_mm: 18.0,
        ..request(1, 200.0)
    };
    let plan = ShelfPlanner::default().plan(&shelf_request, &ranges);

    // (200 - 18) / 2 = 91 mm above and below the single shelf.
    assert!((plan.gap_mm - 91.0).abs() < 1e-9);
    let shelf = &plan.shelves[0];
    assert!((shelf.bottom_z_mm() - 109.0).abs() < 1e-9);
    assert!((shelf.top_z_mm - 127.0).abs() < 1e-9);
}

#[test]
fn test_no_shelf_fits_short_opening() {
    let ranges = [BayRange::new(0, RangeAxis::X, 0.0, 400.0)];
    let plan = ShelfPlanner::default().plan(&request(3, 50.0), &ranges);

    assert!(plan.shelves.is_empty());
    assert_eq!(plan.applied_count, 0);
    assert_eq!(plan.warnings[0].kind, WarningKind::ShelvesInfeasible);
}

#[test]
fn test_multiple_bays_get_prefixed_names() {
    let ranges = [
        BayRange::new(0, RangeAxis::X, 0.0, 300.0),
        BayRange::new(1, RangeAxis::X, 318.0, 618.0),
    ];
    let shelves = plan_shelves(2, 600.0, 18.0, &ranges, 500.0);

    assert_eq!(shelves.len(), 4);
    assert_eq!(shelves[0].name, "bay_1_shelf_1");
    assert_eq!(shelves[3].name, "bay_2_shelf_2");
    assert_eq!(shelves[3].x_start_mm, 318.0);
    assert_eq!(shelves[3].width_mm, 300.0);
    // 500 mm interior less the 3 mm setback and 2 mm rear clearance.
    assert_eq!(shelves[0].depth_mm, 495.0);
}

#[test]
fn test_narrow_ranges_receive_no_shelves() {
    let ranges = [
        BayRange::new(0, RangeAxis::X, 0.0, 4.0),
        BayRange::new(1, RangeAxis::X, 22.0, 300.0),
    ];
    let shelves = plan_shelves(1, 600.0, 18.0, &ranges, 500.0);
    assert_eq!(shelves.len(), 1);
    assert_eq!(shelves[0].bay_index, 1);
}

#[test]
fn test_solve_count_rejects_bad_thickness() {
    let planner = ShelfPlanner::default();
    assert_eq!(planner.solve_count(3, 600.0, 0.0), None);
    assert_eq!(planner.solve_count(3, f64::INFINITY, 18.0), None);
    assert_eq!(planner.solve_count(0, 600.0, 18.0), None);
}
