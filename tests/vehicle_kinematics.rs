use intersection_sim::config::SimulationConfig;
use intersection_sim::simulation::{occupancy, zones, Direction, RouteType, Vehicle, VehicleId};
use nalgebra::Point2;

const DT: f32 = 1.0 / 30.0;

fn vehicle(id: usize, x: f32, y: f32, direction: Direction, route: RouteType) -> Vehicle {
    Vehicle::new(VehicleId(id), Point2::new(x, y), direction, route, 120.0)
}

#[test]
fn straight_route_moves_along_direction_axis() {
    let config = SimulationConfig::default();
    let mut v = vehicle(0, 515.0, 700.0, Direction::Up, RouteType::Straight);

    v.advance(DT, &config.geometry);

    assert!((v.position.y - 696.0).abs() < 1e-3);
    assert!((v.position.x - 515.0).abs() < 1e-6);
}

#[test]
fn right_turn_from_up_pivots_once_and_never_reverts() {
    let config = SimulationConfig::default();
    let mut v = vehicle(0, 515.0, 700.0, Direction::Up, RouteType::TurnRight);
    let mut turned = false;

    for _ in 0..200 {
        let before = v.position;
        v.advance(DT, &config.geometry);

        if !turned && v.position.x > before.x {
            // Pivot crossed at y <= 415: travel swaps to the +x axis.
            assert!(before.y <= 415.0 + 120.0 * DT);
            turned = true;
        }

        if turned {
            assert!(v.position.x > before.x, "Turn must not revert to the original axis");
            assert!((v.position.y - before.y).abs() < 1e-6);
        } else {
            assert!(v.position.y < before.y);
            assert!((v.position.x - before.x).abs() < 1e-6);
        }
    }

    assert!(turned, "Vehicle never reached its pivot");
}

#[test]
fn left_turn_from_right_heads_up_after_pivot() {
    let config = SimulationConfig::default();
    let mut v = vehicle(0, 10.0, 415.0, Direction::Right, RouteType::TurnLeft);

    // Travel east until the x = 510 pivot, then north (decreasing y).
    for _ in 0..300 {
        v.advance(DT, &config.geometry);
    }

    assert!(v.position.x >= 510.0);
    assert!(v.position.x <= 510.0 + 120.0 * DT + 1e-3);
    assert!(v.position.y < 415.0, "Expected northbound travel after the pivot");
}

#[test]
fn off_screen_margin_is_75_units() {
    let config = SimulationConfig::default();
    let geometry = &config.geometry;

    assert!(!zones::is_off_screen(geometry, Point2::new(500.0, -74.0)));
    assert!(zones::is_off_screen(geometry, Point2::new(500.0, -76.0)));
    assert!(!zones::is_off_screen(geometry, Point2::new(1074.0, 400.0)));
    assert!(zones::is_off_screen(geometry, Point2::new(1076.0, 400.0)));
}

#[test]
fn zone_bands_nest_around_the_stop_line() {
    let config = SimulationConfig::default();
    let geometry = &config.geometry;

    // At the stop line: approaching and queued.
    assert!(zones::is_approaching(geometry, Point2::new(515.0, 480.0), Direction::Up));
    assert!(zones::in_queue_zone(geometry, Point2::new(515.0, 480.0), Direction::Up));

    // Further out: counted as waiting, but not yet subject to the verdict.
    assert!(!zones::is_approaching(geometry, Point2::new(515.0, 550.0), Direction::Up));
    assert!(zones::in_queue_zone(geometry, Point2::new(515.0, 550.0), Direction::Up));

    // Beyond the queue band: neither.
    assert!(!zones::is_approaching(geometry, Point2::new(515.0, 650.0), Direction::Up));
    assert!(!zones::in_queue_zone(geometry, Point2::new(515.0, 650.0), Direction::Up));
}

#[test]
fn intersection_occupancy_includes_margin() {
    let config = SimulationConfig::default();
    let geometry = &config.geometry;

    assert!(zones::in_intersection(geometry, Point2::new(500.0, 400.0)));
    // Inside the 10-unit margin past the physical rectangle.
    assert!(zones::in_intersection(geometry, Point2::new(584.0, 400.0)));
    assert!(!zones::in_intersection(geometry, Point2::new(586.0, 400.0)));
    assert!(zones::in_intersection(geometry, Point2::new(500.0, 316.0)));
    assert!(!zones::in_intersection(geometry, Point2::new(500.0, 314.0)));
}

#[test]
fn queue_counts_index_by_direction() {
    let config = SimulationConfig::default();
    let vehicles = vec![
        vehicle(0, 515.0, 500.0, Direction::Up, RouteType::Straight),
        vehicle(1, 515.0, 600.0, Direction::Up, RouteType::Straight),
        vehicle(2, 440.0, 200.0, Direction::Down, RouteType::Straight),
        vehicle(3, 440.0, 700.0, Direction::Down, RouteType::Straight), // outside its band
    ];

    let counts = zones::queue_counts(&config.geometry, &vehicles);
    assert_eq!(counts, [2, 1, 0, 0]);
}

#[test]
fn vehicle_ahead_blocks_only_within_safety_distance() {
    let config = SimulationConfig::default();
    let spacing = &config.rules.spacing;

    let leader = vehicle(0, 515.0, 600.0, Direction::Up, RouteType::Straight);
    let trailer = vehicle(1, 520.0, 620.0, Direction::Up, RouteType::Straight);

    // 20-unit gap, 5-unit lateral offset: same lane, trailer held.
    assert!(occupancy::same_lane(&trailer, &leader, spacing));
    assert!((occupancy::distance_ahead(&trailer, &leader) - 20.0).abs() < 1e-3);
    assert!(occupancy::has_vehicle_ahead(&trailer, &[leader.clone(), trailer.clone()], spacing));

    // The leading vehicle sees nothing ahead; vehicles behind never block.
    assert!(!occupancy::has_vehicle_ahead(&leader, &[leader.clone(), trailer.clone()], spacing));

    // Beyond the safety distance the lane is considered free.
    let far_trailer = vehicle(2, 515.0, 660.0, Direction::Up, RouteType::Straight);
    assert!(!occupancy::has_vehicle_ahead(&far_trailer, &[leader.clone(), far_trailer.clone()], spacing));

    // A large lateral offset means a different lane.
    let other_lane = vehicle(3, 545.0, 620.0, Direction::Up, RouteType::Straight);
    assert!(!occupancy::same_lane(&other_lane, &leader, spacing));

    // Opposing direction never shares a lane, whatever the offset.
    let opposing = vehicle(4, 515.0, 620.0, Direction::Down, RouteType::Straight);
    assert!(!occupancy::same_lane(&opposing, &leader, spacing));
}
