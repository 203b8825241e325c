//! Physics module for collision detection
//!
//! Provides bounding-box broad-phase and lattice-sampled narrow-phase
//! collision detection for rotated polyhedra.

pub mod collision;
pub mod collision_system;

#[cfg(test)]
mod tests;

pub use collision::{
    boxes_overlap, compute_bounding_box, point_inside, BoundingBox, ContainmentQuery,
    VertexNormalContainment,
};
pub use collision_system::{run_collision_pass, CollisionFrame, CollisionPair, CollisionPass};
