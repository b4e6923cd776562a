use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;

/// Movement, spacing and signal-timing parameters shared by every vehicle
/// (the fleet is uniform).
#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RulesConfig {
    pub vehicle: VehicleRules,
    pub spacing: SpacingRules,
    pub signal: SignalTiming,
    pub step: StepRules,
    pub random: RandomConfig,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct VehicleRules {
    pub size: f32,
    /// Units per second, identical for all vehicles.
    pub speed: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SpacingRules {
    /// Forward gap below which a trailing vehicle is held back.
    pub safe_distance: f32,
    /// Lateral offset below which two same-direction vehicles share a lane.
    pub lane_tolerance: f32,
    /// Minimum gap to any same-direction vehicle for a spawn to be accepted.
    pub spawn_spacing: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct SignalTiming {
    pub min_phase_duration: f32,
    pub clearance_duration: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct StepRules {
    /// Upper bound on a single tick's delta time. A stalled host must not
    /// produce one oversized step that skips a vehicle past a collision check.
    pub max_dt: f32,
}

#[derive(Debug, Clone, Default, Deserialize, Serialize)]
#[serde(default)]
pub struct RandomConfig {
    pub seed: Option<u64>,
}

impl Default for VehicleRules {
    fn default() -> Self {
        Self {
            size: 35.0,
            speed: 120.0,
        }
    }
}

impl Default for SpacingRules {
    fn default() -> Self {
        Self {
            safe_distance: 50.0,
            lane_tolerance: 25.0,
            spawn_spacing: 40.0,
        }
    }
}

impl Default for SignalTiming {
    fn default() -> Self {
        Self {
            min_phase_duration: 2.0,
            clearance_duration: 1.0,
        }
    }
}

impl Default for StepRules {
    fn default() -> Self {
        Self {
            max_dt: 1.0 / 30.0,
        }
    }
}

impl Validate for RulesConfig {
    fn validate(&self) -> Result<()> {
        if self.vehicle.size <= 0.0 {
            return Err(anyhow!("Vehicle size must be positive"));
        }

        if self.vehicle.speed <= 0.0 {
            return Err(anyhow!("Vehicle speed must be positive"));
        }

        let spacing = &self.spacing;
        if spacing.safe_distance <= 0.0 {
            return Err(anyhow!("Safe distance must be positive"));
        }

        if spacing.lane_tolerance <= 0.0 {
            return Err(anyhow!("Lane tolerance must be positive"));
        }

        if spacing.spawn_spacing <= 0.0 {
            return Err(anyhow!("Spawn spacing must be positive"));
        }

        let signal = &self.signal;
        if signal.min_phase_duration <= 0.0 {
            return Err(anyhow!("Minimum phase duration must be positive"));
        }

        if signal.clearance_duration <= 0.0 {
            return Err(anyhow!("Clearance duration must be positive"));
        }

        if self.step.max_dt <= 0.0 {
            return Err(anyhow!("Maximum tick delta must be positive"));
        }

        Ok(())
    }
}
