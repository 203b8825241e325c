//! Math utilities and types
//!
//! Provides the vector and rotation types used by the collision core.

pub use nalgebra::{Quaternion, Unit, Vector3};

/// 3D vector type
pub type Vec3 = Vector3<f32>;

/// Quaternion type for rotations
pub type Quat = Unit<Quaternion<f32>>;

/// Math constants
pub mod constants {
    /// Pi constant
    pub const PI: f32 = std::f32::consts::PI;

    /// Degrees to radians conversion factor
    pub const DEG_TO_RAD: f32 = PI / 180.0;
}

/// Math utility functions
pub mod utils {
    use super::{constants, Quat, Unit, Vec3};

    /// Convert degrees to radians
    pub fn deg_to_rad(degrees: f32) -> f32 {
        degrees * constants::DEG_TO_RAD
    }

    /// Build the rotation for an axis/angle pair.
    ///
    /// The axis does not need to be normalized. A zero-length axis yields the
    /// identity rotation instead of NaNs.
    pub fn axis_angle_rotation(axis: Vec3, radians: f32) -> Quat {
        Unit::try_new(axis, f32::EPSILON)
            .map_or_else(Quat::identity, |axis| Quat::from_axis_angle(&axis, radians))
    }

    /// Rotate `v` about `axis` (through the origin) by `radians`, right-handed.
    pub fn rotate_by_axis_angle(v: Vec3, axis: Vec3, radians: f32) -> Vec3 {
        axis_angle_rotation(axis, radians) * v
    }
}
