use crate::config::GeometryConfig;
use super::{zones, Direction, Point, RouteType, VehicleId};

/// Which leg of its route a turning vehicle is on. The transition is one-way:
/// once a vehicle crosses its pivot it never returns to the original axis.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum TurnLeg {
    Approach,
    Turned,
}

#[derive(Debug, Clone)]
pub struct Vehicle {
    pub id: VehicleId,
    pub position: Point,
    pub direction: Direction,
    pub route: RouteType,
    pub speed: f32,
    pub leg: TurnLeg,
}

impl Vehicle {
    pub fn new(
        id: VehicleId,
        position: Point,
        direction: Direction,
        route: RouteType,
        speed: f32,
    ) -> Self {
        Self {
            id,
            position,
            direction,
            route,
            speed,
            leg: TurnLeg::Approach,
        }
    }

    /// Instantaneous travel heading: the spawn direction until the turn
    /// pivot is crossed, the perpendicular turn heading afterwards.
    pub fn heading(&self) -> Direction {
        match (self.leg, self.route) {
            (TurnLeg::Turned, RouteType::TurnRight) => self.direction.turned_right(),
            (TurnLeg::Turned, RouteType::TurnLeft) => self.direction.turned_left(),
            _ => self.direction,
        }
    }

    /// Advance the vehicle by `speed * dt` along its current heading. The
    /// only mutator of `position`; the caller gates it on the controller
    /// verdict and lane occupancy.
    pub fn advance(&mut self, dt: f32, geometry: &GeometryConfig) {
        let movement = self.speed * dt;

        if self.leg == TurnLeg::Approach {
            if let Some(pivot) = zones::turn_pivot(geometry, self.direction, self.route) {
                if zones::pivot_reached(self.position, self.direction, pivot) {
                    self.leg = TurnLeg::Turned;
                }
            }
        }

        self.position += self.heading().unit() * movement;
    }

    pub fn is_off_screen(&self, geometry: &GeometryConfig) -> bool {
        zones::is_off_screen(geometry, self.position)
    }

    pub fn is_approaching(&self, geometry: &GeometryConfig) -> bool {
        zones::is_approaching(geometry, self.position, self.direction)
    }

    pub fn in_intersection(&self, geometry: &GeometryConfig) -> bool {
        zones::in_intersection(geometry, self.position)
    }

    pub fn in_queue_zone(&self, geometry: &GeometryConfig) -> bool {
        zones::in_queue_zone(geometry, self.position, self.direction)
    }
}
