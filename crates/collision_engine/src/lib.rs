//! # Collision Engine
//!
//! Collision detection between rotated convex polyhedra placed in a scene.
//!
//! ## Features
//!
//! - **Broad Phase**: Rotated, position-translated axis-aligned bounding boxes
//! - **Narrow Phase**: Integer lattice sampling with a per-vertex-normal containment test
//! - **Built-in Solids**: Cube, tetrahedron, octahedron, decahedron, dodecahedron, icosahedron
//! - **Scene Management**: Selection, scripted motion and per-frame collision stepping
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use collision_engine::prelude::*;
//! use rand::SeedableRng;
//!
//! fn main() -> Result<(), Box<dyn std::error::Error>> {
//!     let config = SceneConfig::default();
//!     let mut rng = rand::rngs::StdRng::seed_from_u64(42);
//!     let mut scene = Scene::populate(&MeshPool::builtin(), &config, &mut rng)?;
//!
//!     scene.apply_motion(Motion::spin(1.0), config.frame_time)?;
//!     let frame = scene.step();
//!     println!("{} collisions", frame.collision_count);
//!     Ok(())
//! }
//! ```

#![warn(missing_docs)]
#![allow(clippy::module_name_repetitions)]

pub mod foundation;
pub mod config;
pub mod assets;
pub mod physics;
pub mod scene;

/// Common imports for engine users
pub mod prelude {
    pub use crate::{
        assets::{Mesh, MeshPool, SubMesh},
        config::{CollisionConfig, Config, ConfigError, LatticeExtent, MotionConfig, SceneConfig},
        foundation::math::{Quat, Vec3},
        physics::{
            boxes_overlap, compute_bounding_box, point_inside, run_collision_pass, BoundingBox,
            CollisionFrame, CollisionPair, CollisionPass, ContainmentQuery, VertexNormalContainment,
        },
        scene::{Motion, ObjectColor, Scene, SceneError, SceneObject},
    };
}
