//! Scene objects and the scene that owns them
//!
//! # Module Organization
//!
//! - [`object`] - Objects placing a pooled mesh with a position and rotation
//! - [`scene_manager`] - Object list, selection, motion and the collision step

pub mod object;
pub mod scene_manager;

pub use object::{BoundsState, ObjectColor, SceneObject};
pub use scene_manager::{Motion, Scene, SceneError};
