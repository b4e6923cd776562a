use anyhow::Result;
use log::{info, warn};
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};
use std::path::Path;

use intersection_sim::{
    config::SimulationConfig,
    simulation::{Direction, Simulation},
};

const CONFIG_PATH: &str = "intersection.toml";

fn main() -> Result<()> {
    env_logger::init();
    info!("Starting Intersection Simulator (Console Mode)");

    let config = if Path::new(CONFIG_PATH).exists() {
        SimulationConfig::load_from_file(CONFIG_PATH)?
    } else {
        warn!("{} not found, using built-in defaults", CONFIG_PATH);
        SimulationConfig::default()
    };

    let seed = config.rules.random.seed;
    let mut spawn_rng = if let Some(seed) = seed {
        StdRng::seed_from_u64(seed)
    } else {
        StdRng::from_entropy()
    };

    let mut sim = Simulation::new(config);

    // Fixed-step headless run: 120 simulated seconds at 60 Hz, with vehicles
    // arriving at random edges in place of the interactive spawn keys.
    let dt = 1.0 / 60.0;
    let duration = 120.0;
    let spawn_probability = 0.05; // per tick

    let steps = (duration / dt) as usize;
    let steps_per_second = (1.0 / dt) as usize;

    info!("Running simulation for {:.0} simulated seconds...", duration);

    for step in 0..steps {
        if spawn_rng.gen::<f32>() < spawn_probability {
            let direction = Direction::ALL[spawn_rng.gen_range(0..4)];
            // Rejected spawns are expected when a lane is busy.
            let _ = sim.spawn_at(direction);
        }

        sim.tick(dt)?;

        if step % steps_per_second == 0 {
            let counts = sim.queue_counts();
            info!(
                "t={:.0}s: {} vehicles active, phase {:?}{}, queues up/down/left/right = {}/{}/{}/{}",
                sim.time(),
                sim.vehicles().len(),
                sim.current_phase(),
                if sim.in_clearance() { " (clearance)" } else { "" },
                counts[0],
                counts[1],
                counts[2],
                counts[3],
            );
        }
    }

    info!("Simulation completed!");
    info!(
        "Final count: {} active, {} total spawned",
        sim.vehicles().len(),
        sim.total_spawned()
    );

    Ok(())
}
