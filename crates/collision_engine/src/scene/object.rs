//! Scene objects
//!
//! A [`SceneObject`] places a shared mesh in the world with a position and an
//! axis/angle rotation, and caches the mesh's rotated bounding box.

use std::sync::Arc;

use crate::assets::Mesh;
use crate::foundation::math::{utils, Quat, Vec3};
use crate::physics::collision::{compute_bounding_box, BoundingBox};

/// Cached bounding box state
///
/// `Fresh` carries the box built for the current rotation. Any rotation change
/// moves the cache to `Stale`, and only a completed rebuild moves it back, so a
/// stale box can never be read.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum BoundsState {
    /// Box matches the current rotation
    Fresh(BoundingBox),
    /// Rotation changed since the last rebuild
    Stale,
}

/// Display colour derived from selection and collision state
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ObjectColor {
    /// Not colliding (blue)
    Idle,
    /// Colliding with at least one other object (red)
    Colliding,
    /// Currently selected (green), regardless of collisions
    Selected,
}

impl ObjectColor {
    /// Linear RGB for presentation layers
    pub const fn rgb(self) -> [f32; 3] {
        match self {
            Self::Idle => [0.0, 0.47, 0.95],
            Self::Colliding => [0.9, 0.16, 0.22],
            Self::Selected => [0.0, 0.89, 0.19],
        }
    }
}

/// Rigid object referencing a shared mesh
#[derive(Debug, Clone)]
pub struct SceneObject {
    mesh: Arc<Mesh>,
    position: Vec3,
    rotation_axis: Vec3,
    rotation_angle: f32,
    bounds: BoundsState,
    colliding: bool,
}

impl SceneObject {
    /// Default rotation axis (+Y)
    pub fn default_axis() -> Vec3 {
        Vec3::y()
    }

    /// Place `mesh` at `position` with no rotation; the bounding box is built immediately
    pub fn new(mesh: Arc<Mesh>, position: Vec3) -> Self {
        Self::with_rotation(mesh, position, Self::default_axis(), 0.0)
    }

    /// Place `mesh` with an explicit rotation (angle in degrees)
    pub fn with_rotation(mesh: Arc<Mesh>, position: Vec3, axis: Vec3, angle_degrees: f32) -> Self {
        let mut object = Self {
            mesh,
            position,
            rotation_axis: axis,
            rotation_angle: angle_degrees,
            bounds: BoundsState::Stale,
            colliding: false,
        };
        object.refresh_bounds();
        object
    }

    /// Shared mesh
    pub fn mesh(&self) -> &Arc<Mesh> {
        &self.mesh
    }

    /// World position
    pub fn position(&self) -> Vec3 {
        self.position
    }

    /// Move to `position`; the cached box stays valid
    pub fn set_position(&mut self, position: Vec3) {
        self.position = position;
    }

    /// Move by `delta`; the cached box stays valid
    pub fn translate(&mut self, delta: Vec3) {
        self.position += delta;
    }

    /// Rotation axis
    pub fn rotation_axis(&self) -> Vec3 {
        self.rotation_axis
    }

    /// Rotation angle in degrees
    pub fn rotation_angle(&self) -> f32 {
        self.rotation_angle
    }

    /// Replace the rotation axis, invalidating the cached box
    pub fn set_rotation_axis(&mut self, axis: Vec3) {
        self.rotation_axis = axis;
        self.bounds = BoundsState::Stale;
    }

    /// Replace the rotation angle (degrees), invalidating the cached box
    pub fn set_rotation_angle(&mut self, angle_degrees: f32) {
        self.rotation_angle = angle_degrees;
        self.bounds = BoundsState::Stale;
    }

    /// Add `delta_degrees` to the rotation angle, invalidating the cached box
    pub fn rotate_by(&mut self, delta_degrees: f32) {
        self.set_rotation_angle(self.rotation_angle + delta_degrees);
    }

    /// Current rotation as a quaternion
    pub fn rotation(&self) -> Quat {
        utils::axis_angle_rotation(self.rotation_axis, utils::deg_to_rad(self.rotation_angle))
    }

    /// Cache state of the bounding box
    pub fn bounds_state(&self) -> BoundsState {
        self.bounds
    }

    /// True when the rotation changed since the last rebuild
    pub fn is_stale(&self) -> bool {
        matches!(self.bounds, BoundsState::Stale)
    }

    /// Cached box in the local rotated frame, `None` while stale
    pub fn bounds(&self) -> Option<BoundingBox> {
        match self.bounds {
            BoundsState::Fresh(bounds) => Some(bounds),
            BoundsState::Stale => None,
        }
    }

    /// Return the cached box, rebuilding it first if the rotation changed
    pub fn refresh_bounds(&mut self) -> BoundingBox {
        if let BoundsState::Fresh(bounds) = self.bounds {
            return bounds;
        }
        let bounds = compute_bounding_box(self);
        self.bounds = BoundsState::Fresh(bounds);
        bounds
    }

    /// Result of the latest collision pass
    pub fn is_colliding(&self) -> bool {
        self.colliding
    }

    pub(crate) fn set_colliding(&mut self, colliding: bool) {
        self.colliding = colliding;
    }

    /// Display colour for this object
    pub fn color(&self, selected: bool) -> ObjectColor {
        if selected {
            ObjectColor::Selected
        } else if self.colliding {
            ObjectColor::Colliding
        } else {
            ObjectColor::Idle
        }
    }
}
