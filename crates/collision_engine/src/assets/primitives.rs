//! Built-in convex solids
//!
//! Generated in code so a scene can run without any asset files. Every solid
//! is centred on the origin and flat shaded.

use super::mesh::Mesh;
use crate::foundation::math::Vec3;

/// Golden ratio
const PHI: f32 = 1.618_034;

/// Collects polygon faces of a convex solid centred on the origin
#[derive(Default)]
struct SolidBuilder {
    triangles: Vec<[Vec3; 3]>,
}

impl SolidBuilder {
    /// Fan-triangulate a convex planar polygon, winding it outward
    fn face(&mut self, polygon: &[Vec3]) {
        if polygon.len() < 3 {
            return;
        }

        let centroid = polygon.iter().sum::<Vec3>() / polygon.len() as f32;
        let normal = (polygon[1] - polygon[0]).cross(&(polygon[2] - polygon[0]));
        let outward = normal.dot(&centroid) >= 0.0;

        for i in 1..polygon.len() - 1 {
            let (b, c) = (polygon[i], polygon[i + 1]);
            if outward {
                self.triangles.push([polygon[0], b, c]);
            } else {
                self.triangles.push([polygon[0], c, b]);
            }
        }
    }

    fn build(self, name: &str) -> Mesh {
        Mesh::from_triangles(name, &self.triangles)
    }
}

/// Sort points angularly around `axis` so they form a convex polygon
fn order_around(mut points: Vec<Vec3>, axis: Vec3) -> Vec<Vec3> {
    let axis = axis.normalize();
    let helper = if axis.x.abs() < 0.9 { Vec3::x() } else { Vec3::y() };
    let u = axis.cross(&helper).normalize();
    let v = axis.cross(&u);
    points.sort_by(|a, b| {
        let angle_a = a.dot(&v).atan2(a.dot(&u));
        let angle_b = b.dot(&v).atan2(b.dot(&u));
        angle_a.total_cmp(&angle_b)
    });
    points
}

/// Triangles whose corners are pairwise `edge` apart
fn equilateral_faces(vertices: &[Vec3], edge: f32) -> Vec<[usize; 3]> {
    let is_edge = |a: usize, b: usize| ((vertices[a] - vertices[b]).norm() - edge).abs() < 1e-3;
    let n = vertices.len();
    let mut faces = Vec::new();
    for i in 0..n {
        for j in i + 1..n {
            if !is_edge(i, j) {
                continue;
            }
            for k in j + 1..n {
                if is_edge(i, k) && is_edge(j, k) {
                    faces.push([i, j, k]);
                }
            }
        }
    }
    faces
}

fn icosahedron_vertices() -> Vec<Vec3> {
    let mut vertices = Vec::with_capacity(12);
    for a in [-1.0, 1.0] {
        for b in [-PHI, PHI] {
            vertices.push(Vec3::new(0.0, a, b));
            vertices.push(Vec3::new(a, b, 0.0));
            vertices.push(Vec3::new(b, 0.0, a));
        }
    }
    vertices
}

/// Axis-aligned cube with edge length 1
pub fn cube() -> Mesh {
    let h = 0.5;
    let mut builder = SolidBuilder::default();
    for axis in 0..3 {
        for sign in [-h, h] {
            let corner = |s: f32, t: f32| {
                let mut p = Vec3::zeros();
                p[axis] = sign;
                p[(axis + 1) % 3] = s;
                p[(axis + 2) % 3] = t;
                p
            };
            builder.face(&[corner(-h, -h), corner(h, -h), corner(h, h), corner(-h, h)]);
        }
    }
    builder.build("cube")
}

/// Regular tetrahedron inscribed in the cube `[-0.5, 0.5]^3`
pub fn tetrahedron() -> Mesh {
    let vertices = [
        Vec3::new(0.5, 0.5, 0.5),
        Vec3::new(0.5, -0.5, -0.5),
        Vec3::new(-0.5, 0.5, -0.5),
        Vec3::new(-0.5, -0.5, 0.5),
    ];
    let mut builder = SolidBuilder::default();
    for skip in 0..vertices.len() {
        let face: Vec<Vec3> = (0..vertices.len())
            .filter(|&i| i != skip)
            .map(|i| vertices[i])
            .collect();
        builder.face(&face);
    }
    builder.build("tetrahedron")
}

/// Regular octahedron with vertices on the unit axes
pub fn octahedron() -> Mesh {
    let mut builder = SolidBuilder::default();
    for sx in [-1.0, 1.0] {
        for sy in [-1.0, 1.0] {
            for sz in [-1.0, 1.0] {
                builder.face(&[
                    Vec3::new(sx, 0.0, 0.0),
                    Vec3::new(0.0, sy, 0.0),
                    Vec3::new(0.0, 0.0, sz),
                ]);
            }
        }
    }
    builder.build("octahedron")
}

/// Pentagonal bipyramid (ten triangular faces) with apexes at `y = ±1`
pub fn decahedron() -> Mesh {
    let ring: Vec<Vec3> = (0..5)
        .map(|i| {
            let angle = i as f32 * std::f32::consts::TAU / 5.0;
            Vec3::new(angle.cos(), 0.0, angle.sin())
        })
        .collect();
    let mut builder = SolidBuilder::default();
    for apex in [Vec3::y(), -Vec3::y()] {
        for i in 0..ring.len() {
            builder.face(&[apex, ring[i], ring[(i + 1) % ring.len()]]);
        }
    }
    builder.build("decahedron")
}

/// Regular icosahedron with circumradius 1
pub fn icosahedron() -> Mesh {
    let vertices = icosahedron_vertices();
    let scale = 1.0 / vertices[0].norm();
    let mut builder = SolidBuilder::default();
    for [a, b, c] in equilateral_faces(&vertices, 2.0) {
        builder.face(&[vertices[a] * scale, vertices[b] * scale, vertices[c] * scale]);
    }
    builder.build("icosahedron")
}

/// Regular dodecahedron, built as the dual of the icosahedron
pub fn dodecahedron() -> Mesh {
    let vertices = icosahedron_vertices();
    let faces = equilateral_faces(&vertices, 2.0);
    let centers: Vec<Vec3> = faces
        .iter()
        .map(|&[a, b, c]| (vertices[a] + vertices[b] + vertices[c]) / 3.0)
        .collect();
    let scale = 1.0 / centers[0].norm();

    let mut builder = SolidBuilder::default();
    for (index, &vertex) in vertices.iter().enumerate() {
        let ring: Vec<Vec3> = faces
            .iter()
            .zip(&centers)
            .filter(|(face, _)| face.contains(&index))
            .map(|(_, &center)| center * scale)
            .collect();
        builder.face(&order_around(ring, vertex));
    }
    builder.build("dodecahedron")
}

/// Every built-in solid
pub fn all() -> Vec<Mesh> {
    vec![cube(), decahedron(), dodecahedron(), icosahedron(), octahedron(), tetrahedron()]
}
