//! Headless collision scene
//!
//! Spawns a scene of random polyhedra, drives the selected object with a
//! scripted motion for a fixed number of frames and logs the collision count
//! of every frame.
//!
//! Usage: `collision_scene [config.toml|config.ron]`

use collision_engine::foundation::logging;
use collision_engine::prelude::*;
use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

/// Totals gathered over a run
#[derive(Debug, Default)]
struct RunSummary {
    frames: u32,
    total_collisions: usize,
    peak_collisions: usize,
    frames_with_collisions: u32,
}

struct SceneApp {
    config: SceneConfig,
    scene: Scene,
    summary: RunSummary,
}

impl SceneApp {
    fn new(config: SceneConfig) -> Result<Self, Box<dyn std::error::Error>> {
        let seed = config.seed.unwrap_or_else(|| rand::thread_rng().gen());
        log::info!("Seeding scene RNG with {}", seed);
        let mut rng = StdRng::seed_from_u64(seed);

        let pool = MeshPool::builtin();
        let scene = Scene::populate(&pool, &config, &mut rng)?;

        Ok(Self {
            config,
            scene,
            summary: RunSummary::default(),
        })
    }

    /// Motion input for `frame`: sweep along X, reversing every half selection
    /// interval, while spinning the whole time
    fn scripted_motion(&self, frame: u32) -> Motion {
        let half_period = (self.config.selection_interval / 2).max(1);
        let sign = if (frame / half_period) % 2 == 0 { 1.0 } else { -1.0 };
        Motion {
            direction: Vec3::new(sign, 0.0, 0.0),
            spin: 1.0,
        }
    }

    fn run(&mut self) -> Result<(), SceneError> {
        if self.scene.is_empty() {
            log::warn!("Scene has no objects, nothing to simulate");
            return Ok(());
        }

        for frame in 0..self.config.frames {
            let interval = self.config.selection_interval;
            if interval > 0 && frame > 0 && frame % interval == 0 {
                let selected = self.scene.select_next();
                log::info!("Frame {}: selected object {}", frame, selected);
            }

            let motion = self.scripted_motion(frame);
            self.scene.apply_motion(motion, self.config.frame_time)?;

            let result = self.scene.step();
            let count = result.collision_count;
            let colliding = result.colliding_objects();
            log::info!(
                "Frame {}: {} collisions, {} colliding objects, {} sample points",
                frame,
                count,
                colliding,
                result.sampled_points.len()
            );

            self.summary.frames += 1;
            self.summary.total_collisions += count;
            self.summary.peak_collisions = self.summary.peak_collisions.max(count);
            if count > 0 {
                self.summary.frames_with_collisions += 1;
            }
        }
        Ok(())
    }

    fn print_summary(&self) {
        let summary = &self.summary;
        println!("Simulated {} frames with {} objects", summary.frames, self.scene.len());
        println!("  frames with collisions: {}", summary.frames_with_collisions);
        println!("  total collision points: {}", summary.total_collisions);
        println!("  peak collision points:  {}", summary.peak_collisions);
        if let Some(selected) = self.scene.selected() {
            let p = selected.position();
            println!(
                "  selected object {} ({}) at ({:.2}, {:.2}, {:.2}), angle {:.1} deg",
                self.scene.selected_index(),
                selected.mesh().name(),
                p.x,
                p.y,
                p.z,
                selected.rotation_angle()
            );
        }
    }
}

fn load_config() -> Result<SceneConfig, ConfigError> {
    let config = match std::env::args().nth(1) {
        Some(path) => {
            log::info!("Loading scene config from {}", path);
            SceneConfig::load_from_file(&path)?
        }
        None => {
            log::warn!("No config file given, using defaults");
            SceneConfig::default()
        }
    };
    config.validate()?;
    Ok(config)
}

fn main() -> Result<(), Box<dyn std::error::Error>> {
    logging::init();
    log::info!("Starting collision scene");

    let config = load_config()?;
    log::debug!("Scene config: {:?}", config);

    let mut app = SceneApp::new(config)?;
    app.run()?;
    app.print_summary();

    log::info!("Collision scene finished");
    Ok(())
}
