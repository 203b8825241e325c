//! Read-only collision geometry
//!
//! A [`Mesh`] is a list of sub-meshes, each a flat list of triangle corners
//! (every three consecutive vertices form one triangle) with one normal per
//! vertex. Geometry is stored in MODEL SPACE and never modified after
//! construction; objects rotate and translate it on the fly during tests.
//!
//! # Normal convention
//!
//! Collision normals face the interior: a point is inside a convex mesh when
//! it lies on the non-negative side of every vertex/normal half-space.
//! Geometry authored with conventional outward normals goes through
//! [`Mesh::from_outward_normals`].

use crate::foundation::math::Vec3;

/// One vertex/normal buffer pair of a mesh
#[derive(Debug, Clone, Default, PartialEq)]
pub struct SubMesh {
    vertices: Vec<Vec3>,
    normals: Vec<Vec3>,
}

impl SubMesh {
    /// Create a sub-mesh from parallel vertex and normal buffers
    ///
    /// Mismatched buffer lengths are accepted; such a sub-mesh simply has no
    /// usable containment data.
    pub fn new(vertices: Vec<Vec3>, normals: Vec<Vec3>) -> Self {
        Self { vertices, normals }
    }

    /// Build a flat-shaded sub-mesh from counter-clockwise (outward-wound)
    /// triangles, giving every corner the triangle's interior-facing normal.
    pub fn from_triangles(triangles: &[[Vec3; 3]]) -> Self {
        let mut vertices = Vec::with_capacity(triangles.len() * 3);
        let mut normals = Vec::with_capacity(triangles.len() * 3);

        for &[a, b, c] in triangles {
            let inward = (c - a)
                .cross(&(b - a))
                .try_normalize(f32::EPSILON)
                .unwrap_or_else(Vec3::zeros);
            vertices.extend_from_slice(&[a, b, c]);
            normals.extend_from_slice(&[inward; 3]);
        }

        Self { vertices, normals }
    }

    /// Vertex positions in model space
    pub fn vertices(&self) -> &[Vec3] {
        &self.vertices
    }

    /// Per-vertex normals in model space
    pub fn normals(&self) -> &[Vec3] {
        &self.normals
    }

    /// Number of vertices
    pub fn vertex_count(&self) -> usize {
        self.vertices.len()
    }

    /// True when vertices and normals are both present with matching counts
    pub fn has_containment_data(&self) -> bool {
        !self.vertices.is_empty() && self.vertices.len() == self.normals.len()
    }

    /// Vertex/normal pairs in buffer order
    pub fn vertex_normal_pairs(&self) -> impl Iterator<Item = (Vec3, Vec3)> + '_ {
        self.vertices.iter().copied().zip(self.normals.iter().copied())
    }

    fn flipped(mut self) -> Self {
        for normal in &mut self.normals {
            *normal = -*normal;
        }
        self
    }
}

/// Immutable collision mesh shared between objects
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Mesh {
    name: String,
    parts: Vec<SubMesh>,
}

impl Mesh {
    /// Create a mesh whose normals already follow the interior-facing convention
    pub fn new(name: impl Into<String>, parts: Vec<SubMesh>) -> Self {
        Self {
            name: name.into(),
            parts,
        }
    }

    /// Create a mesh from geometry with conventional outward-facing normals
    pub fn from_outward_normals(name: impl Into<String>, parts: Vec<SubMesh>) -> Self {
        Self::new(name, parts.into_iter().map(SubMesh::flipped).collect())
    }

    /// Single-part mesh from outward-wound triangles
    pub fn from_triangles(name: impl Into<String>, triangles: &[[Vec3; 3]]) -> Self {
        Self::new(name, vec![SubMesh::from_triangles(triangles)])
    }

    /// Mesh name, used as the pool key
    pub fn name(&self) -> &str {
        &self.name
    }

    /// Sub-meshes
    pub fn parts(&self) -> &[SubMesh] {
        &self.parts
    }

    /// All vertices of all sub-meshes
    pub fn vertices(&self) -> impl Iterator<Item = Vec3> + '_ {
        self.parts.iter().flat_map(|part| part.vertices().iter().copied())
    }

    /// Total vertex count across sub-meshes
    pub fn vertex_count(&self) -> usize {
        self.parts.iter().map(SubMesh::vertex_count).sum()
    }

    /// True when the mesh has no vertices at all
    pub fn is_empty(&self) -> bool {
        self.vertex_count() == 0
    }

    /// True when every sub-mesh can take part in containment tests
    ///
    /// A mesh without sub-meshes has nothing to contain a point with.
    pub fn has_containment_data(&self) -> bool {
        !self.parts.is_empty() && self.parts.iter().all(SubMesh::has_containment_data)
    }
}
