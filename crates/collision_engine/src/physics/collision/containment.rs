//! Point containment against rotated, positioned meshes
//!
//! The test is an approximation: instead of per-face plane equations it uses
//! every vertex with its own normal as a half-space. For flat-shaded convex
//! solids this matches the face planes; near edges of smooth-shaded or
//! non-convex meshes it can misclassify points. The behaviour, including the
//! strict `< -epsilon` rejection, is kept as is.

use crate::foundation::math::Vec3;
use crate::scene::SceneObject;

/// Default tolerance of the half-space test
pub const DEFAULT_CONTAINMENT_EPSILON: f32 = 1e-6;

/// Containment test used by the narrow phase
pub trait ContainmentQuery {
    /// Is the world-space `point` inside `object`?
    fn contains(&self, point: Vec3, object: &SceneObject) -> bool;
}

/// Per-vertex-normal half-space containment
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct VertexNormalContainment {
    /// Tolerance; a point is rejected only when it is more than this far
    /// (scaled by the normal length) on the negative side of a half-space
    pub epsilon: f32,
}

impl Default for VertexNormalContainment {
    fn default() -> Self {
        Self {
            epsilon: DEFAULT_CONTAINMENT_EPSILON,
        }
    }
}

impl VertexNormalContainment {
    /// Create a tester with the given tolerance
    pub fn new(epsilon: f32) -> Self {
        Self { epsilon }
    }
}

impl ContainmentQuery for VertexNormalContainment {
    fn contains(&self, point: Vec3, object: &SceneObject) -> bool {
        point_inside_with_epsilon(point, object, self.epsilon)
    }
}

/// Is `point` inside `object`, using [`DEFAULT_CONTAINMENT_EPSILON`]?
pub fn point_inside(point: Vec3, object: &SceneObject) -> bool {
    point_inside_with_epsilon(point, object, DEFAULT_CONTAINMENT_EPSILON)
}

/// Is `point` inside `object`?
///
/// The point is moved into the object's frame by subtracting its position
/// only; the mesh vertices and normals are rotated instead. The point is
/// outside as soon as `normal . (point - vertex) < -epsilon` for any rotated
/// vertex/normal pair, or that product is NaN. Meshes without usable
/// vertex/normal data never contain anything.
pub fn point_inside_with_epsilon(point: Vec3, object: &SceneObject, epsilon: f32) -> bool {
    let mesh = object.mesh();
    if !mesh.has_containment_data() {
        return false;
    }

    let local = point - object.position();
    let rotation = object.rotation();

    mesh.parts().iter().all(|part| {
        part.vertex_normal_pairs().all(|(vertex, normal)| {
            let vertex = rotation * vertex;
            let normal = rotation * normal;
            !rejects(normal.dot(&(local - vertex)), epsilon)
        })
    })
}

/// NaN always rejects, so non-finite input never reads as contained
fn rejects(signed_distance: f32, epsilon: f32) -> bool {
    signed_distance.is_nan() || signed_distance < -epsilon
}
