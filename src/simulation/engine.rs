use crate::config::SimulationConfig;
use super::{
    occupancy, zones, Direction, LightColor, PhaseController, Point, RouteType, Vehicle, VehicleId,
};
use nalgebra::Point2;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use thiserror::Error;

#[derive(Debug, Error)]
pub enum TickError {
    #[error("invalid tick delta: {0} (must be finite and non-negative)")]
    InvalidDelta(f32),
}

/// The simulation context: owns the vehicle set and the phase controller and
/// is the sole mutator of collection membership. Single-threaded; one tick
/// runs to completion before the next begins.
pub struct Simulation {
    config: SimulationConfig,
    vehicles: Vec<Vehicle>,
    controller: PhaseController,
    rng: StdRng,
    time: f32,
    total_spawned: u32,
    next_id: usize,
}

impl Simulation {
    pub fn new(config: SimulationConfig) -> Self {
        let seed = config.rules.random.seed;
        let controller = PhaseController::new(config.rules.signal.clone(), seed);

        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        Self {
            config,
            vehicles: Vec::new(),
            controller,
            rng,
            time: 0.0,
            total_spawned: 0,
            next_id: 0,
        }
    }

    /// Advance the full simulation by one step: controller first, then each
    /// vehicle moves only if the controller verdict allows it and no vehicle
    /// occupies the lane ahead, then off-screen vehicles are pruned.
    ///
    /// A negative or non-finite `dt` is rejected before anything mutates; an
    /// oversized one is clamped so a stalled host cannot step a vehicle past
    /// a collision check.
    pub fn tick(&mut self, dt: f32) -> Result<(), TickError> {
        if !dt.is_finite() || dt < 0.0 {
            return Err(TickError::InvalidDelta(dt));
        }

        let dt = dt.min(self.config.rules.step.max_dt);
        let geometry = &self.config.geometry;

        self.controller.update(&self.vehicles, geometry, dt);

        // Every verdict is taken against the frozen pre-tick positions, so
        // the outcome does not depend on vehicle iteration order.
        let cleared: Vec<bool> = self
            .vehicles
            .iter()
            .map(|vehicle| {
                self.controller.can_proceed(vehicle, geometry)
                    && !occupancy::has_vehicle_ahead(
                        vehicle,
                        &self.vehicles,
                        &self.config.rules.spacing,
                    )
            })
            .collect();

        for (vehicle, go) in self.vehicles.iter_mut().zip(&cleared) {
            if *go {
                vehicle.advance(dt, geometry);
            }
        }

        self.vehicles
            .retain(|vehicle| !zones::is_off_screen(geometry, vehicle.position));

        self.time += dt;
        Ok(())
    }

    /// Attempt to create a vehicle at an edge position with a randomly chosen
    /// route. Rejected silently when any same-direction vehicle lies within
    /// the minimum spacing of the requested position; that is a normal
    /// outcome of spawning too rapidly into a busy lane, not an error.
    pub fn spawn_vehicle(&mut self, direction: Direction, position: Point) -> Option<VehicleId> {
        if !self.can_spawn(direction, position) {
            log::debug!("Spawn rejected for {:?} at {:?}: lane occupied", direction, position);
            return None;
        }

        let route = match self.rng.gen_range(0..3) {
            0 => RouteType::Straight,
            1 => RouteType::TurnLeft,
            _ => RouteType::TurnRight,
        };

        let id = VehicleId(self.next_id);
        self.next_id += 1;
        self.total_spawned += 1;

        self.vehicles.push(Vehicle::new(
            id,
            position,
            direction,
            route,
            self.config.rules.vehicle.speed,
        ));

        log::debug!("Spawned vehicle {:?} heading {:?} on {:?}", id, direction, route);
        Some(id)
    }

    /// Spawn at the configured edge point for `direction`.
    pub fn spawn_at(&mut self, direction: Direction) -> Option<VehicleId> {
        let point = *self.config.geometry.spawn_points.get(direction);
        self.spawn_vehicle(direction, Point2::new(point.x, point.y))
    }

    fn can_spawn(&self, direction: Direction, position: Point) -> bool {
        let spacing = self.config.rules.spacing.spawn_spacing;

        !self.vehicles.iter().any(|vehicle| {
            if vehicle.direction != direction {
                return false;
            }

            let gap = if direction.is_vertical() {
                (vehicle.position.y - position.y).abs()
            } else {
                (vehicle.position.x - position.x).abs()
            };

            gap < spacing
        })
    }

    pub fn vehicles(&self) -> &[Vehicle] {
        &self.vehicles
    }

    pub fn light_colors(&self) -> [LightColor; 4] {
        self.controller.light_colors()
    }

    pub fn current_phase(&self) -> Direction {
        self.controller.current_phase()
    }

    pub fn in_clearance(&self) -> bool {
        self.controller.in_clearance()
    }

    pub fn queue_counts(&self) -> [usize; 4] {
        zones::queue_counts(&self.config.geometry, &self.vehicles)
    }

    pub fn time(&self) -> f32 {
        self.time
    }

    pub fn total_spawned(&self) -> u32 {
        self.total_spawned
    }

    pub fn config(&self) -> &SimulationConfig {
        &self.config
    }
}
