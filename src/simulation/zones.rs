//! Zone classification predicates. Pure functions of position, direction and
//! the static geometry; nothing here holds state.

use crate::config::GeometryConfig;
use super::{Direction, Point, RouteType, Vehicle};

/// Coordinate along a direction's travel axis (y for vertical approaches,
/// x for horizontal ones).
fn travel_axis(position: Point, direction: Direction) -> f32 {
    if direction.is_vertical() {
        position.y
    } else {
        position.x
    }
}

/// True inside the band immediately before the stop line, where the
/// controller's stop/proceed verdict is enforced.
pub fn is_approaching(geometry: &GeometryConfig, position: Point, direction: Direction) -> bool {
    geometry
        .approach
        .get(direction)
        .contains(travel_axis(position, direction))
}

/// True inside the wider band where a vehicle counts as waiting for its
/// direction, before it is adjacent to the stop line.
pub fn in_queue_zone(geometry: &GeometryConfig, position: Point, direction: Direction) -> bool {
    geometry
        .queue
        .get(direction)
        .contains(travel_axis(position, direction))
}

/// True inside the junction rectangle plus its occupancy margin. Direction
/// independent: anything in the box keeps the junction occupied.
pub fn in_intersection(geometry: &GeometryConfig, position: Point) -> bool {
    let rect = &geometry.intersection;
    let margin = rect.occupancy_margin;

    position.x >= rect.left - margin
        && position.x <= rect.right + margin
        && position.y >= rect.top - margin
        && position.y <= rect.bottom + margin
}

/// True once a position exceeds the visible bounds by the cull margin in any
/// direction; the removal trigger.
pub fn is_off_screen(geometry: &GeometryConfig, position: Point) -> bool {
    let window = &geometry.window;
    let margin = window.offscreen_margin;

    position.x < -margin
        || position.x > window.width + margin
        || position.y < -margin
        || position.y > window.height + margin
}

/// Travel-axis coordinate at which a turning vehicle leaves its original
/// axis. Straight routes have no pivot.
pub fn turn_pivot(geometry: &GeometryConfig, direction: Direction, route: RouteType) -> Option<f32> {
    match route {
        RouteType::Straight => None,
        RouteType::TurnRight => Some(*geometry.right_turn_pivots.get(direction)),
        RouteType::TurnLeft => Some(*geometry.left_turn_pivots.get(direction)),
    }
}

/// Whether travel along `direction` has reached the pivot coordinate.
pub fn pivot_reached(position: Point, direction: Direction, pivot: f32) -> bool {
    match direction {
        Direction::Up => position.y <= pivot,
        Direction::Down => position.y >= pivot,
        Direction::Left => position.x <= pivot,
        Direction::Right => position.x >= pivot,
    }
}

/// Per-direction count of vehicles in their queue zone, indexed by
/// `Direction::index`.
pub fn queue_counts(geometry: &GeometryConfig, vehicles: &[Vehicle]) -> [usize; 4] {
    let mut counts = [0usize; 4];

    for vehicle in vehicles {
        if in_queue_zone(geometry, vehicle.position, vehicle.direction) {
            counts[vehicle.direction.index()] += 1;
        }
    }

    counts
}
