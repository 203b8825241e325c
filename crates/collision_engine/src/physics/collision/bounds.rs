//! Axis-aligned bounding boxes and the broad-phase overlap test

use crate::foundation::logging::trace;
use crate::foundation::math::Vec3;
use crate::scene::SceneObject;

/// Axis-aligned bounding box in an object's local rotated frame
///
/// The box is never translated; the owner's world position is added wherever
/// the box is consumed. An empty box has `min = +inf` and `max = -inf`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BoundingBox {
    /// Minimum corner
    pub min: Vec3,
    /// Maximum corner
    pub max: Vec3,
}

impl Default for BoundingBox {
    fn default() -> Self {
        Self::empty()
    }
}

impl BoundingBox {
    /// Create a box from its corners
    pub fn new(min: Vec3, max: Vec3) -> Self {
        Self { min, max }
    }

    /// Box containing nothing; never overlaps any other box
    pub fn empty() -> Self {
        Self {
            min: Vec3::repeat(f32::INFINITY),
            max: Vec3::repeat(f32::NEG_INFINITY),
        }
    }

    /// True when `min <= max` on every axis
    pub fn is_valid(&self) -> bool {
        self.min.x <= self.max.x && self.min.y <= self.max.y && self.min.z <= self.max.z
    }

    /// Grow the box to include `point`
    pub fn extend(&mut self, point: Vec3) {
        self.min = self.min.inf(&point);
        self.max = self.max.sup(&point);
    }

    /// Check if this box contains a point (boundary included)
    pub fn contains_point(&self, point: Vec3) -> bool {
        point.x >= self.min.x
            && point.x <= self.max.x
            && point.y >= self.min.y
            && point.y <= self.max.y
            && point.z >= self.min.z
            && point.z <= self.max.z
    }
}

impl FromIterator<Vec3> for BoundingBox {
    fn from_iter<I: IntoIterator<Item = Vec3>>(points: I) -> Self {
        let mut bounds = Self::empty();
        for point in points {
            bounds.extend(point);
        }
        bounds
    }
}

/// Bounding box of `object`'s mesh under its current rotation
///
/// Every vertex of every sub-mesh is rotated about the origin and folded into
/// the box. The result is in the local frame; the position is not applied.
/// Pure: callers own caching (see [`SceneObject::refresh_bounds`]).
pub fn compute_bounding_box(object: &SceneObject) -> BoundingBox {
    let rotation = object.rotation();
    let bounds: BoundingBox = object.mesh().vertices().map(|v| rotation * v).collect();
    trace!(
        "Built bounds for '{}' at {} deg: {:?} .. {:?}",
        object.mesh().name(),
        object.rotation_angle(),
        bounds.min,
        bounds.max
    );
    bounds
}

/// Broad-phase test: do the two boxes overlap once moved to their positions?
///
/// Separating-axis test on the three coordinate axes. Boxes that only touch
/// count as overlapping. An empty box compares as `-inf` max / `+inf` min and
/// therefore never overlaps anything. Non-finite positions and NaN bounds
/// never overlap either.
pub fn boxes_overlap(box_a: &BoundingBox, pos_a: Vec3, box_b: &BoundingBox, pos_b: Vec3) -> bool {
    if !is_finite(pos_a) || !is_finite(pos_b) {
        return false;
    }
    (0..3).all(|axis| {
        let (a_min, a_max) = (box_a.min[axis] + pos_a[axis], box_a.max[axis] + pos_a[axis]);
        let (b_min, b_max) = (box_b.min[axis] + pos_b[axis], box_b.max[axis] + pos_b[axis]);
        // Written as positive comparisons so that NaN separates
        a_max >= b_min && a_min <= b_max
    })
}

fn is_finite(v: Vec3) -> bool {
    v.iter().all(|c| c.is_finite())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::assets::{primitives, Mesh};
    use crate::foundation::math::utils;
    use std::sync::Arc;

    fn unit_box() -> BoundingBox {
        BoundingBox::new(Vec3::repeat(-0.5), Vec3::repeat(0.5))
    }

    #[test]
    fn test_touching_boxes_overlap() {
        let b = unit_box();
        assert!(boxes_overlap(&b, Vec3::zeros(), &b, Vec3::new(1.0, 0.0, 0.0)));
        assert!(!boxes_overlap(&b, Vec3::zeros(), &b, Vec3::new(1.01, 0.0, 0.0)));
    }

    #[test]
    fn test_separation_on_any_axis() {
        let b = unit_box();
        for axis in 0..3 {
            let mut offset = Vec3::zeros();
            offset[axis] = 2.0;
            assert!(!boxes_overlap(&b, Vec3::zeros(), &b, offset));
            assert!(!boxes_overlap(&b, Vec3::zeros(), &b, -offset));
        }
    }

    #[test]
    fn test_overlap_is_symmetric() {
        let a = unit_box();
        let b = BoundingBox::new(Vec3::new(-0.2, -1.0, -0.1), Vec3::new(0.3, 2.0, 0.1));
        let positions = [
            Vec3::zeros(),
            Vec3::new(0.6, 0.0, 0.0),
            Vec3::new(0.0, 2.4, 0.0),
            Vec3::new(-0.7, 0.5, 0.55),
            Vec3::new(5.0, 5.0, 5.0),
        ];
        for &pa in &positions {
            for &pb in &positions {
                assert_eq!(boxes_overlap(&a, pa, &b, pb), boxes_overlap(&b, pb, &a, pa));
            }
        }
    }

    #[test]
    fn test_empty_box_never_overlaps() {
        let empty = BoundingBox::empty();
        let huge = BoundingBox::new(Vec3::repeat(-1e30), Vec3::repeat(1e30));
        assert!(!empty.is_valid());
        assert!(!boxes_overlap(&empty, Vec3::zeros(), &huge, Vec3::zeros()));
        assert!(!boxes_overlap(&huge, Vec3::zeros(), &empty, Vec3::zeros()));
        assert!(!boxes_overlap(&empty, Vec3::zeros(), &empty, Vec3::zeros()));
    }

    #[test]
    fn test_non_finite_inputs_never_overlap() {
        let b = unit_box();
        let nan = Vec3::new(f32::NAN, 0.0, 0.0);
        assert!(!boxes_overlap(&b, nan, &b, Vec3::zeros()));
        assert!(!boxes_overlap(&b, Vec3::zeros(), &b, nan));

        let inf = Vec3::repeat(f32::INFINITY);
        assert!(!boxes_overlap(&b, inf, &b, inf));

        let nan_box = BoundingBox::new(Vec3::repeat(f32::NAN), Vec3::repeat(f32::NAN));
        assert!(!boxes_overlap(&nan_box, Vec3::zeros(), &b, Vec3::zeros()));
        assert!(!boxes_overlap(&b, Vec3::zeros(), &nan_box, Vec3::zeros()));
    }

    #[test]
    fn test_empty_mesh_builds_empty_box() {
        let object = SceneObject::new(Arc::new(Mesh::new("void", Vec::new())), Vec3::zeros());
        assert_eq!(compute_bounding_box(&object), BoundingBox::empty());
    }

    #[test]
    fn test_box_does_not_include_position() {
        let object = SceneObject::new(Arc::new(primitives::cube()), Vec3::new(40.0, 3.0, -7.0));
        let bounds = compute_bounding_box(&object);
        assert!(bounds.contains_point(Vec3::zeros()));
        assert!(!bounds.contains_point(object.position()));
    }

    #[test]
    fn test_rotated_vertices_lie_inside_box() {
        let eps = 1e-5;
        for mesh in primitives::all() {
            let mesh = Arc::new(mesh);
            for axis in [Vec3::y(), Vec3::x(), Vec3::new(1.0, 1.0, 0.3)] {
                for step in 0..24 {
                    let angle = step as f32 * 15.0;
                    let object =
                        SceneObject::with_rotation(Arc::clone(&mesh), Vec3::zeros(), axis, angle);
                    let bounds = compute_bounding_box(&object);
                    assert!(bounds.is_valid(), "{} at {angle}", mesh.name());

                    let pad = Vec3::repeat(eps);
                    let grown = BoundingBox::new(bounds.min - pad, bounds.max + pad);
                    for v in mesh.vertices() {
                        let rotated =
                            utils::rotate_by_axis_angle(v, axis, utils::deg_to_rad(angle));
                        assert!(
                            grown.contains_point(rotated),
                            "{} vertex escaped at {angle}",
                            mesh.name()
                        );
                    }
                }
            }
        }
    }

    #[test]
    fn test_angle_wraps_modulo_360() {
        let mesh = Arc::new(primitives::tetrahedron());
        let a = SceneObject::with_rotation(Arc::clone(&mesh), Vec3::zeros(), Vec3::y(), 30.0);
        let b = SceneObject::with_rotation(mesh, Vec3::zeros(), Vec3::y(), 30.0 - 720.0);
        let (ba, bb) = (compute_bounding_box(&a), compute_bounding_box(&b));
        approx::assert_relative_eq!(ba.min, bb.min, epsilon = 1e-4);
        approx::assert_relative_eq!(ba.max, bb.max, epsilon = 1e-4);
    }
}
