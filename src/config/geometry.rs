use serde::{Deserialize, Serialize};
use anyhow::{Result, anyhow};
use super::Validate;
use crate::simulation::Direction;

/// Static intersection geometry. All values are screen-space units with the
/// y axis pointing down; the defaults describe a 1000x800 scene with the
/// junction rectangle slightly right of center.
#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct GeometryConfig {
    pub window: WindowBounds,
    pub intersection: IntersectionRect,
    pub approach: PerDirection<Band>,
    pub queue: PerDirection<Band>,
    pub right_turn_pivots: PerDirection<f32>,
    pub left_turn_pivots: PerDirection<f32>,
    pub spawn_points: PerDirection<SpawnPoint>,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct WindowBounds {
    pub width: f32,
    pub height: f32,
    /// How far past the window edge a vehicle may travel before it is culled.
    pub offscreen_margin: f32,
}

#[derive(Debug, Clone, Deserialize, Serialize)]
#[serde(default)]
pub struct IntersectionRect {
    pub left: f32,
    pub right: f32,
    pub top: f32,
    pub bottom: f32,
    /// Extra border around the rectangle that still counts as "inside", so
    /// vehicles are judged clear only once fully past the box.
    pub occupancy_margin: f32,
}

/// Closed interval on a vehicle's travel axis (y for vertical approaches,
/// x for horizontal ones).
#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct Band {
    pub min: f32,
    pub max: f32,
}

impl Band {
    pub fn contains(&self, value: f32) -> bool {
        value >= self.min && value <= self.max
    }
}

/// One value per cardinal direction.
#[derive(Debug, Clone, Deserialize, Serialize)]
pub struct PerDirection<T> {
    pub up: T,
    pub down: T,
    pub left: T,
    pub right: T,
}

impl<T> PerDirection<T> {
    pub fn get(&self, direction: Direction) -> &T {
        match direction {
            Direction::Up => &self.up,
            Direction::Down => &self.down,
            Direction::Left => &self.left,
            Direction::Right => &self.right,
        }
    }
}

#[derive(Debug, Clone, Copy, Deserialize, Serialize)]
pub struct SpawnPoint {
    pub x: f32,
    pub y: f32,
}

impl Default for WindowBounds {
    fn default() -> Self {
        Self {
            width: 1000.0,
            height: 800.0,
            offscreen_margin: 75.0,
        }
    }
}

impl Default for IntersectionRect {
    fn default() -> Self {
        Self {
            left: 425.0,
            right: 575.0,
            top: 325.0,
            bottom: 475.0,
            occupancy_margin: 10.0,
        }
    }
}

impl Default for GeometryConfig {
    fn default() -> Self {
        Self {
            window: WindowBounds::default(),
            intersection: IntersectionRect::default(),
            // Stop/proceed verdicts are enforced in these bands, directly
            // before each stop line.
            approach: PerDirection {
                up: Band { min: 450.0, max: 500.0 },
                down: Band { min: 250.0, max: 300.0 },
                left: Band { min: 550.0, max: 600.0 },
                right: Band { min: 350.0, max: 400.0 },
            },
            // Queue bands extend 150 units further out so the controller can
            // count waiting vehicles before they reach the stop line.
            queue: PerDirection {
                up: Band { min: 450.0, max: 620.0 },
                down: Band { min: 130.0, max: 300.0 },
                left: Band { min: 550.0, max: 720.0 },
                right: Band { min: 230.0, max: 400.0 },
            },
            // Hand-tuned so that turns track within lane boundaries. These
            // are configuration, not derived geometry.
            right_turn_pivots: PerDirection {
                up: 415.0,
                down: 340.0,
                left: 515.0,
                right: 435.0,
            },
            left_turn_pivots: PerDirection {
                up: 340.0,
                down: 410.0,
                left: 440.0,
                right: 510.0,
            },
            spawn_points: PerDirection {
                up: SpawnPoint { x: 515.0, y: 700.0 },
                down: SpawnPoint { x: 440.0, y: 0.0 },
                left: SpawnPoint { x: 950.0, y: 335.0 },
                right: SpawnPoint { x: 10.0, y: 415.0 },
            },
        }
    }
}

impl Validate for GeometryConfig {
    fn validate(&self) -> Result<()> {
        if self.window.width <= 0.0 || self.window.height <= 0.0 {
            return Err(anyhow!("Window dimensions must be positive"));
        }

        if self.window.offscreen_margin < 0.0 {
            return Err(anyhow!("Off-screen margin must be non-negative"));
        }

        let rect = &self.intersection;
        if rect.left >= rect.right || rect.top >= rect.bottom {
            return Err(anyhow!(
                "Intersection rectangle is degenerate: left={}, right={}, top={}, bottom={}",
                rect.left, rect.right, rect.top, rect.bottom
            ));
        }

        if rect.occupancy_margin < 0.0 {
            return Err(anyhow!("Occupancy margin must be non-negative"));
        }

        for direction in Direction::ALL {
            let approach = self.approach.get(direction);
            let queue = self.queue.get(direction);

            if approach.min >= approach.max {
                return Err(anyhow!("Approach band for {:?} is empty", direction));
            }

            if queue.min >= queue.max {
                return Err(anyhow!("Queue band for {:?} is empty", direction));
            }

            // The queue band must enclose the approach band so every vehicle
            // held at the stop line is also counted as waiting.
            if queue.min > approach.min || queue.max < approach.max {
                return Err(anyhow!(
                    "Queue band for {:?} must contain its approach band", direction
                ));
            }
        }

        Ok(())
    }
}
