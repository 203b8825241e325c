//! Load-once pool of shared meshes

use std::sync::Arc;

use rand::seq::SliceRandom;
use rand::Rng;

use super::mesh::Mesh;
use super::primitives;
use crate::foundation::logging::debug;

/// Shared, read-only meshes handed out to scene objects
///
/// Meshes are never mutated after insertion, so objects hold plain `Arc`
/// clones of them.
#[derive(Debug, Clone, Default)]
pub struct MeshPool {
    meshes: Vec<Arc<Mesh>>,
}

impl MeshPool {
    /// Create an empty pool
    pub fn new() -> Self {
        Self::default()
    }

    /// Pool holding every built-in solid
    pub fn builtin() -> Self {
        let mut pool = Self::new();
        for mesh in primitives::all() {
            pool.insert(mesh);
        }
        pool
    }

    /// Add a mesh, returning the shared handle
    ///
    /// A mesh with the same name replaces the earlier entry.
    pub fn insert(&mut self, mesh: Mesh) -> Arc<Mesh> {
        debug!("Adding mesh '{}' ({} vertices) to pool", mesh.name(), mesh.vertex_count());
        let mesh = Arc::new(mesh);
        match self.meshes.iter_mut().find(|m| m.name() == mesh.name()) {
            Some(slot) => *slot = Arc::clone(&mesh),
            None => self.meshes.push(Arc::clone(&mesh)),
        }
        mesh
    }

    /// Look up a mesh by name
    pub fn get(&self, name: &str) -> Option<Arc<Mesh>> {
        self.meshes.iter().find(|m| m.name() == name).cloned()
    }

    /// Pick a mesh uniformly at random
    pub fn choose<R: Rng + ?Sized>(&self, rng: &mut R) -> Option<Arc<Mesh>> {
        self.meshes.choose(rng).cloned()
    }

    /// Iterate over the pooled meshes
    pub fn iter(&self) -> impl Iterator<Item = &Arc<Mesh>> {
        self.meshes.iter()
    }

    /// Number of meshes
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// True when the pool holds no meshes
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::rngs::StdRng;
    use rand::SeedableRng;

    #[test]
    fn test_builtin_pool() {
        let pool = MeshPool::builtin();
        assert_eq!(pool.len(), 6);
        assert!(pool.get("cube").is_some());
        assert!(pool.get("teapot").is_none());
    }

    #[test]
    fn test_insert_replaces_same_name() {
        let mut pool = MeshPool::builtin();
        let replacement = pool.insert(Mesh::new("cube", Vec::new()));
        assert_eq!(pool.len(), 6);
        assert!(Arc::ptr_eq(&pool.get("cube").unwrap(), &replacement));
    }

    #[test]
    fn test_choose_shares_meshes() {
        let pool = MeshPool::builtin();
        let mut rng = StdRng::seed_from_u64(7);
        let picked = pool.choose(&mut rng).unwrap();
        assert!(pool.iter().any(|m| Arc::ptr_eq(m, &picked)));
        assert!(MeshPool::new().choose(&mut rng).is_none());
    }
}
