//! Per-frame collision pass
//!
//! The pass is split into the usual two phases. For every unordered pair of
//! objects the broad phase compares the cached, position-translated bounding
//! boxes. Pairs that survive go to the narrow phase, which samples an integer
//! lattice around the first object and counts the points contained in both
//! objects.
//!
//! The pass does not keep state between frames: every call starts from "no
//! object colliding, zero collisions" and returns a [`CollisionFrame`] that
//! the caller merges into the objects.

use crate::config::{CollisionConfig, LatticeExtent};
use crate::foundation::logging::{debug, trace};
use crate::foundation::math::Vec3;
use crate::physics::collision::{
    boxes_overlap, BoundingBox, ContainmentQuery, VertexNormalContainment,
};
use crate::scene::SceneObject;

/// Unordered object pair, stored with the smaller index first
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct CollisionPair {
    /// Index of the first object (the lattice centre)
    pub first: usize,
    /// Index of the second object
    pub second: usize,
}

impl CollisionPair {
    /// Create a pair (always stores the smaller index first for consistency)
    pub fn new(a: usize, b: usize) -> Self {
        if a < b {
            Self { first: a, second: b }
        } else {
            Self { first: b, second: a }
        }
    }
}

/// Result of one collision pass
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CollisionFrame {
    /// Colliding flag per object, in scene order
    pub colliding: Vec<bool>,
    /// Number of lattice points contained in both objects of a pair, over all pairs
    pub collision_count: usize,
    /// Every lattice point tested this frame, colliding or not
    pub sampled_points: Vec<Vec3>,
    /// Lattice points contained in both objects of their pair
    pub collision_points: Vec<Vec3>,
    /// Pairs whose bounding boxes overlapped
    pub overlapping_pairs: Vec<CollisionPair>,
}

impl CollisionFrame {
    /// Frame with no collisions for `object_count` objects
    pub fn empty(object_count: usize) -> Self {
        Self {
            colliding: vec![false; object_count],
            ..Self::default()
        }
    }

    /// Was object `index` colliding this frame?
    pub fn is_colliding(&self, index: usize) -> bool {
        self.colliding.get(index).copied().unwrap_or(false)
    }

    /// Number of objects flagged as colliding
    pub fn colliding_objects(&self) -> usize {
        self.colliding.iter().filter(|&&c| c).count()
    }

    /// Sample points the presentation layer draws: every other point
    pub fn visible_samples(&self) -> impl Iterator<Item = &Vec3> {
        self.sampled_points.iter().step_by(2).take(self.sampled_points.len() / 2)
    }

    /// Write the colliding flags into `objects`
    pub fn apply_to(&self, objects: &mut [SceneObject]) {
        for (index, object) in objects.iter_mut().enumerate() {
            object.set_colliding(self.is_colliding(index));
        }
    }
}

/// Broad-phase plus lattice-sampled narrow-phase collision detection
pub struct CollisionPass {
    lattice: LatticeExtent,
    containment: Box<dyn ContainmentQuery>,
}

impl CollisionPass {
    /// Create a pass using vertex/normal containment with the default tolerance
    pub fn new(lattice: LatticeExtent) -> Self {
        Self::with_containment(lattice, Box::new(VertexNormalContainment::default()))
    }

    /// Create a pass from collision settings
    pub fn from_config(config: &CollisionConfig) -> Self {
        Self::with_containment(
            config.lattice,
            Box::new(VertexNormalContainment::new(config.containment_epsilon)),
        )
    }

    /// Create a pass with a custom containment test
    pub fn with_containment(
        lattice: LatticeExtent,
        containment: Box<dyn ContainmentQuery>,
    ) -> Self {
        Self { lattice, containment }
    }

    /// Run one pass over `objects`
    ///
    /// Stale bounding boxes are rebuilt first; this is the only mutation.
    /// Colliding flags are returned in the frame, not written to the objects.
    pub fn run(&self, objects: &mut [SceneObject]) -> CollisionFrame {
        let boxes: Vec<BoundingBox> =
            objects.iter_mut().map(SceneObject::refresh_bounds).collect();
        let objects: &[SceneObject] = objects;

        let mut frame = CollisionFrame::empty(objects.len());
        for i in 0..objects.len() {
            for j in i + 1..objects.len() {
                // Phase 1: broad phase
                let (pos_i, pos_j) = (objects[i].position(), objects[j].position());
                if !boxes_overlap(&boxes[i], pos_i, &boxes[j], pos_j) {
                    continue;
                }
                trace!("Bounding boxes of objects {i} and {j} overlap");
                frame.overlapping_pairs.push(CollisionPair::new(i, j));

                // Phase 2: narrow phase
                self.sample_pair(objects, i, j, &mut frame);
            }
        }

        debug!(
            "Collision pass: {} objects, {} overlapping pairs, {} collision points",
            objects.len(),
            frame.overlapping_pairs.len(),
            frame.collision_count
        );
        frame
    }

    /// Sample the lattice around object `i` and count points inside both objects
    fn sample_pair(&self, objects: &[SceneObject], i: usize, j: usize, frame: &mut CollisionFrame) {
        let (a, b) = (&objects[i], &objects[j]);
        let center = a.position();

        for offset in self.lattice.offsets() {
            let point = (center + offset).map(f32::trunc);
            frame.sampled_points.push(point);

            if self.containment.contains(point, a) && self.containment.contains(point, b) {
                frame.colliding[i] = true;
                frame.colliding[j] = true;
                frame.collision_count += 1;
                frame.collision_points.push(point);
            }
        }
    }
}

/// Run a pass with the default containment test and write the flags back
///
/// Every object's colliding flag is overwritten, so flags from a previous
/// frame never survive.
pub fn run_collision_pass(objects: &mut [SceneObject], lattice: LatticeExtent) -> CollisionFrame {
    let frame = CollisionPass::new(lattice).run(objects);
    frame.apply_to(objects);
    frame
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_pair_orders_indices() {
        assert_eq!(CollisionPair::new(4, 1), CollisionPair { first: 1, second: 4 });
        assert_eq!(CollisionPair::new(1, 4), CollisionPair::new(4, 1));
    }

    #[test]
    fn test_visible_samples_skip_every_other_point() {
        let mut frame = CollisionFrame::empty(0);
        frame.sampled_points = (0..5).map(|i| Vec3::new(i as f32, 0.0, 0.0)).collect();
        let visible: Vec<f32> = frame.visible_samples().map(|p| p.x).collect();
        assert_eq!(visible, vec![0.0, 2.0]);

        frame.sampled_points.truncate(4);
        assert_eq!(frame.visible_samples().count(), 2);

        frame.sampled_points.clear();
        assert_eq!(frame.visible_samples().count(), 0);
    }

    #[test]
    fn test_empty_frame() {
        let frame = CollisionFrame::empty(3);
        assert_eq!(frame.colliding, vec![false; 3]);
        assert_eq!(frame.colliding_objects(), 0);
        assert!(!frame.is_colliding(7));
    }
}
