//! Concrete settings for the collision core and the scene around it.

use serde::{Deserialize, Serialize};

use super::{Config, ConfigError};
use crate::foundation::math::Vec3;

/// Half-extent of the sampling lattice on each axis.
///
/// A half-extent of `h` samples the integer offsets `-h..=h`, so the default
/// of 2 yields a 5x5x5 cube of candidate points around the sampled object.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct LatticeExtent {
    /// Half-extent along X
    pub x: u32,
    /// Half-extent along Y
    pub y: u32,
    /// Half-extent along Z
    pub z: u32,
}

impl Default for LatticeExtent {
    fn default() -> Self {
        Self::uniform(2)
    }
}

impl LatticeExtent {
    /// Largest half-extent accepted from configuration (33 points per axis)
    pub const MAX_HALF_EXTENT: u32 = 16;

    /// Same half-extent on every axis
    pub const fn uniform(half_extent: u32) -> Self {
        Self {
            x: half_extent,
            y: half_extent,
            z: half_extent,
        }
    }

    /// Number of lattice points per sampled pair
    pub fn point_count(&self) -> usize {
        let span = |h: u32| 2 * h as usize + 1;
        span(self.x) * span(self.y) * span(self.z)
    }

    /// Integer offsets of the lattice, X outermost and Z innermost.
    pub fn offsets(&self) -> impl Iterator<Item = Vec3> {
        let (hx, hy, hz) = (i64::from(self.x), i64::from(self.y), i64::from(self.z));
        (-hx..=hx).flat_map(move |x| {
            (-hy..=hy).flat_map(move |y| {
                (-hz..=hz).map(move |z| Vec3::new(x as f32, y as f32, z as f32))
            })
        })
    }
}

/// Narrow-phase settings
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct CollisionConfig {
    /// Tolerance of the vertex/normal half-space test
    pub containment_epsilon: f32,
    /// Sampling window around the first object of each overlapping pair
    pub lattice: LatticeExtent,
}

impl Default for CollisionConfig {
    fn default() -> Self {
        Self {
            containment_epsilon: 1e-6,
            lattice: LatticeExtent::default(),
        }
    }
}

/// Speeds applied to the selected object's motion input
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct MotionConfig {
    /// Translation speed in units per second
    pub move_speed: f32,
    /// Rotation speed in degrees per second
    pub rotate_speed: f32,
}

impl Default for MotionConfig {
    fn default() -> Self {
        Self {
            move_speed: 10.0,
            rotate_speed: 50.0,
        }
    }
}

/// Top-level scene settings
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct SceneConfig {
    /// Number of objects spawned at startup
    pub object_count: usize,
    /// Spawn positions are integers in `[-spawn_extent, spawn_extent]` on X and Z
    pub spawn_extent: i32,
    /// RNG seed; a random seed is drawn when absent
    #[serde(skip_serializing_if = "Option::is_none")]
    pub seed: Option<u64>,
    /// Frames simulated by the headless driver
    pub frames: u32,
    /// Fixed frame duration in seconds
    pub frame_time: f32,
    /// The driver moves the selection to the next object every this many frames (0 = never)
    pub selection_interval: u32,
    /// Selected-object motion
    pub motion: MotionConfig,
    /// Collision pass
    pub collision: CollisionConfig,
}

impl Default for SceneConfig {
    fn default() -> Self {
        Self {
            object_count: 50,
            spawn_extent: 50,
            seed: None,
            frames: 600,
            frame_time: 1.0 / 60.0,
            selection_interval: 120,
            motion: MotionConfig::default(),
            collision: CollisionConfig::default(),
        }
    }
}

impl Config for SceneConfig {}

impl SceneConfig {
    /// Reject values the scene cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        let eps = self.collision.containment_epsilon;
        if !eps.is_finite() || eps < 0.0 {
            return Err(ConfigError::Invalid {
                field: "collision.containment_epsilon",
                reason: format!("expected a finite non-negative number, got {eps}"),
            });
        }
        let lattice = self.collision.lattice;
        for (field, half_extent) in [
            ("collision.lattice.x", lattice.x),
            ("collision.lattice.y", lattice.y),
            ("collision.lattice.z", lattice.z),
        ] {
            if half_extent > LatticeExtent::MAX_HALF_EXTENT {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!(
                        "expected at most {}, got {half_extent}",
                        LatticeExtent::MAX_HALF_EXTENT
                    ),
                });
            }
        }
        if self.spawn_extent < 0 {
            return Err(ConfigError::Invalid {
                field: "spawn_extent",
                reason: format!("expected a non-negative extent, got {}", self.spawn_extent),
            });
        }
        if !self.frame_time.is_finite() || self.frame_time <= 0.0 {
            return Err(ConfigError::Invalid {
                field: "frame_time",
                reason: format!("expected a positive duration, got {}", self.frame_time),
            });
        }
        for (field, speed) in [
            ("motion.move_speed", self.motion.move_speed),
            ("motion.rotate_speed", self.motion.rotate_speed),
        ] {
            if !speed.is_finite() {
                return Err(ConfigError::Invalid {
                    field,
                    reason: format!("expected a finite speed, got {speed}"),
                });
            }
        }
        Ok(())
    }
}
