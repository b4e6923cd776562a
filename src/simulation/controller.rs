use crate::config::{GeometryConfig, SignalTiming};
use super::{zones, Direction, LightColor, Vehicle};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;

/// Traffic-phase state machine: one green direction at a time, separated by
/// an all-red clearance interval during which the junction must fully empty.
pub struct PhaseController {
    current_phase: Direction,
    phase_timer: f32,
    clearance_timer: f32,
    in_clearance: bool,
    timing: SignalTiming,
    rng: StdRng,
}

impl PhaseController {
    pub fn new(timing: SignalTiming, seed: Option<u64>) -> Self {
        let rng = if let Some(seed) = seed {
            StdRng::seed_from_u64(seed)
        } else {
            StdRng::from_entropy()
        };

        Self {
            current_phase: Direction::Up,
            phase_timer: 0.0,
            clearance_timer: 0.0,
            in_clearance: false,
            timing,
            rng,
        }
    }

    pub fn current_phase(&self) -> Direction {
        self.current_phase
    }

    pub fn in_clearance(&self) -> bool {
        self.in_clearance
    }

    /// Advance the state machine by `dt` against the current vehicle set.
    /// Evaluated once per tick, before any vehicle moves.
    pub fn update(&mut self, vehicles: &[Vehicle], geometry: &GeometryConfig, dt: f32) {
        if self.in_clearance {
            self.clearance_timer += dt;

            // Both conditions must hold, whichever resolves last: the timer
            // alone never reopens the junction while cross-traffic occupies it.
            let drained = !vehicles
                .iter()
                .any(|v| zones::in_intersection(geometry, v.position));

            if self.clearance_timer >= self.timing.clearance_duration && drained {
                self.in_clearance = false;
                self.clearance_timer = 0.0;
                self.phase_timer = 0.0;
                log::info!("Phase {:?} now active", self.current_phase);
            }

            return;
        }

        self.phase_timer += dt;

        if self.phase_timer < self.timing.min_phase_duration {
            return;
        }

        let counts = zones::queue_counts(geometry, vehicles);
        let best = self.find_best_phase(&counts);

        if best != self.current_phase && self.should_switch(best, &counts) {
            log::info!(
                "Initiating phase switch from {:?} to {:?}",
                self.current_phase,
                best
            );
            self.current_phase = best;
            self.in_clearance = true;
            self.clearance_timer = 0.0;
        }
    }

    /// Direction with the longest queue. Ties among equal maxima are broken
    /// uniformly at random so no approach is perpetually favored. With every
    /// queue empty there is nothing to serve, so the current phase holds.
    fn find_best_phase(&mut self, counts: &[usize; 4]) -> Direction {
        let max = *counts.iter().max().unwrap_or(&0);
        if max == 0 {
            return self.current_phase;
        }

        let tied: Vec<Direction> = Direction::ALL
            .into_iter()
            .filter(|d| counts[d.index()] == max)
            .collect();

        *tied.choose(&mut self.rng).unwrap_or(&self.current_phase)
    }

    fn should_switch(&self, best: Direction, counts: &[usize; 4]) -> bool {
        let current_count = counts[self.current_phase.index()];
        let best_count = counts[best.index()];

        current_count == 0 || best_count >= current_count
    }

    /// Whether a vehicle may move this tick. During clearance every vehicle
    /// that is approaching but not yet inside must stop, whatever its
    /// direction; the junction drains before the next phase activates. A
    /// vehicle already inside is never stopped mid-crossing.
    pub fn can_proceed(&self, vehicle: &Vehicle, geometry: &GeometryConfig) -> bool {
        let approaching = vehicle.is_approaching(geometry);
        let inside = vehicle.in_intersection(geometry);

        if self.in_clearance && approaching && !inside {
            return false;
        }

        inside || !approaching || vehicle.direction == self.current_phase
    }

    /// Light color per direction, indexed by `Direction::index`. All red
    /// during clearance.
    pub fn light_colors(&self) -> [LightColor; 4] {
        let mut colors = [LightColor::Red; 4];

        if !self.in_clearance {
            colors[self.current_phase.index()] = LightColor::Green;
        }

        colors
    }
}
