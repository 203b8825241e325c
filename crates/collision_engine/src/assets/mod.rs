//! Collision geometry assets
//!
//! - [`mesh`] - Read-only vertex/normal buffers
//! - [`primitives`] - Built-in convex solids
//! - [`mesh_pool`] - Shared load-once mesh pool

pub mod mesh;
pub mod mesh_pool;
pub mod primitives;

pub use mesh::{Mesh, SubMesh};
pub use mesh_pool::MeshPool;
