//! Lane occupancy checks. O(n) per vehicle against the full active set,
//! which is fine at the scale of a few dozen concurrent vehicles.

use crate::config::SpacingRules;
use super::Vehicle;

/// Two vehicles share a lane when they travel the same direction and their
/// lateral offset (the axis perpendicular to travel) is within tolerance.
pub fn same_lane(a: &Vehicle, b: &Vehicle, spacing: &SpacingRules) -> bool {
    if a.direction != b.direction {
        return false;
    }

    let lateral_offset = if a.direction.is_vertical() {
        (a.position.x - b.position.x).abs()
    } else {
        (a.position.y - b.position.y).abs()
    };

    lateral_offset < spacing.lane_tolerance
}

/// Signed displacement from `current` to `other` along `current`'s spawn
/// direction; positive means `other` is ahead.
pub fn distance_ahead(current: &Vehicle, other: &Vehicle) -> f32 {
    let delta = other.position - current.position;
    delta.dot(&current.direction.unit())
}

/// True when any same-lane vehicle sits strictly ahead of `current` within
/// the safety distance. Zero or negative gaps (same position, or behind) do
/// not block.
pub fn has_vehicle_ahead(current: &Vehicle, vehicles: &[Vehicle], spacing: &SpacingRules) -> bool {
    vehicles.iter().any(|other| {
        if other.id == current.id || !same_lane(current, other, spacing) {
            return false;
        }

        let distance = distance_ahead(current, other);
        distance > 0.0 && distance < spacing.safe_distance
    })
}
