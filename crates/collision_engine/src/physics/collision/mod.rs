//! Collision primitives
//!
//! Bounding boxes and containment tests for scene objects. Geometry stays in
//! model space inside the shared mesh; rotation and translation are applied on
//! the fly during each test.
//!
//! # Module Organization
//!
//! - [`bounds`] - Rotated bounding boxes and the broad-phase overlap test
//! - [`containment`] - Vertex/normal half-space point containment

pub mod bounds;
pub mod containment;

pub use bounds::{boxes_overlap, compute_bounding_box, BoundingBox};
pub use containment::{
    point_inside, point_inside_with_epsilon, ContainmentQuery, VertexNormalContainment,
    DEFAULT_CONTAINMENT_EPSILON,
};
