//! End-to-end collision pass scenarios on small hand-built scenes

use std::cell::Cell;
use std::rc::Rc;
use std::sync::Arc;

use rand::rngs::StdRng;
use rand::{Rng, SeedableRng};

use crate::assets::{primitives, Mesh, MeshPool};
use crate::config::LatticeExtent;
use crate::foundation::math::Vec3;
use crate::physics::collision::{boxes_overlap, ContainmentQuery, VertexNormalContainment};
use crate::physics::collision_system::{run_collision_pass, CollisionPair, CollisionPass};
use crate::scene::SceneObject;

/// Counts every containment query it answers
struct CountingContainment {
    inner: VertexNormalContainment,
    calls: Rc<Cell<usize>>,
}

impl ContainmentQuery for CountingContainment {
    fn contains(&self, point: Vec3, object: &crate::scene::SceneObject) -> bool {
        self.calls.set(self.calls.get() + 1);
        self.inner.contains(point, object)
    }
}

fn counting_pass(lattice: LatticeExtent) -> (CollisionPass, Rc<Cell<usize>>) {
    let calls = Rc::new(Cell::new(0));
    let containment = CountingContainment {
        inner: VertexNormalContainment::default(),
        calls: Rc::clone(&calls),
    };
    (CollisionPass::with_containment(lattice, Box::new(containment)), calls)
}

fn two_cubes(offset: Vec3) -> Vec<SceneObject> {
    let cube = Arc::new(primitives::cube());
    vec![
        SceneObject::new(Arc::clone(&cube), Vec3::zeros()),
        SceneObject::new(cube, offset),
    ]
}

fn random_scene(seed: u64, count: usize, extent: f32) -> Vec<SceneObject> {
    let pool = MeshPool::builtin();
    let mut rng = StdRng::seed_from_u64(seed);
    (0..count)
        .map(|_| {
            let mesh = pool.choose(&mut rng).unwrap();
            let position = Vec3::new(
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
                rng.gen_range(-extent..=extent),
            );
            let axis = Vec3::new(rng.gen(), rng.gen(), rng.gen());
            SceneObject::with_rotation(mesh, position, axis, rng.gen_range(0.0..360.0))
        })
        .collect()
}

#[test]
fn test_overlapping_cubes_collide() {
    let mut objects = two_cubes(Vec3::new(0.5, 0.0, 0.0));
    let (a, b) = (objects[0].bounds().unwrap(), objects[1].bounds().unwrap());
    assert!(boxes_overlap(&a, objects[0].position(), &b, objects[1].position()));

    let frame = run_collision_pass(&mut objects, LatticeExtent::uniform(2));

    // Only the origin is inside both cubes; it sits on B's -X face
    assert_eq!(frame.collision_count, 1);
    assert_eq!(frame.collision_points, vec![Vec3::zeros()]);
    assert_eq!(frame.colliding, vec![true, true]);
    assert!(objects.iter().all(SceneObject::is_colliding));
    assert_eq!(frame.overlapping_pairs, vec![CollisionPair::new(0, 1)]);
    assert_eq!(frame.sampled_points.len(), 125);
}

#[test]
fn test_distant_cubes_skip_narrow_phase() {
    let mut objects = two_cubes(Vec3::new(100.0, 0.0, 0.0));
    let (a, b) = (objects[0].bounds().unwrap(), objects[1].bounds().unwrap());
    assert!(!boxes_overlap(&a, objects[0].position(), &b, objects[1].position()));

    let (pass, calls) = counting_pass(LatticeExtent::uniform(2));
    let frame = pass.run(&mut objects);

    assert_eq!(frame.collision_count, 0);
    assert_eq!(calls.get(), 0);
    assert!(frame.sampled_points.is_empty());
    assert!(frame.overlapping_pairs.is_empty());
    assert_eq!(frame.colliding, vec![false, false]);
}

#[test]
fn test_containment_runs_per_sample_with_short_circuit() {
    let mut objects = two_cubes(Vec3::new(0.5, 0.0, 0.0));
    let (pass, calls) = counting_pass(LatticeExtent::uniform(2));
    pass.run(&mut objects);

    // 125 samples against object A; only the single point inside A is also tested against B
    assert_eq!(calls.get(), 126);
}

#[test]
fn test_flags_reset_every_frame() {
    let mut objects = two_cubes(Vec3::new(0.5, 0.0, 0.0));
    let first = run_collision_pass(&mut objects, LatticeExtent::default());
    assert_eq!(first.colliding_objects(), 2);

    objects[1].set_position(Vec3::new(100.0, 0.0, 0.0));
    let second = run_collision_pass(&mut objects, LatticeExtent::default());
    assert_eq!(second.collision_count, 0);
    assert!(objects.iter().all(|o| !o.is_colliding()));
}

#[test]
fn test_stale_bounds_are_rebuilt_before_broad_phase() {
    // Boxes are 0.2 apart until B turns 45 degrees and its X extent grows to ~0.707
    let mut objects = two_cubes(Vec3::new(1.2, 0.0, 0.0));
    let frame = run_collision_pass(&mut objects, LatticeExtent::default());
    assert!(frame.overlapping_pairs.is_empty());

    objects[1].rotate_by(45.0);
    assert!(objects[1].is_stale());

    let frame = run_collision_pass(&mut objects, LatticeExtent::default());
    assert!(!objects[1].is_stale());
    assert_eq!(frame.overlapping_pairs, vec![CollisionPair::new(0, 1)]);

    objects[1].rotate_by(-45.0);
    let frame = run_collision_pass(&mut objects, LatticeExtent::default());
    assert!(frame.overlapping_pairs.is_empty());
}

#[test]
fn test_pass_is_idempotent() {
    let mut objects = random_scene(11, 30, 2.0);
    let first = run_collision_pass(&mut objects, LatticeExtent::default());
    let second = run_collision_pass(&mut objects, LatticeExtent::default());

    assert!(first.collision_count > 0, "fixture should produce collisions");
    assert_eq!(first, second);
}

#[test]
fn test_far_apart_objects_never_collide() {
    let mut objects = random_scene(3, 8, 1.0);
    // Spread along X well beyond every solid's extent
    for (index, object) in objects.iter_mut().enumerate() {
        object.set_position(Vec3::new(index as f32 * 10.0, 0.0, 0.0));
    }

    let frame = run_collision_pass(&mut objects, LatticeExtent::uniform(3));
    assert_eq!(frame.collision_count, 0);
    assert!(frame.collision_points.is_empty());
    assert!(frame.overlapping_pairs.is_empty());
}

#[test]
fn test_samples_are_truncated_lattice_points() {
    let cube = Arc::new(primitives::cube());
    let mut objects = vec![
        SceneObject::new(Arc::clone(&cube), Vec3::new(0.7, 0.2, -0.7)),
        SceneObject::new(cube, Vec3::new(0.9, 0.0, -0.4)),
    ];
    let frame = run_collision_pass(&mut objects, LatticeExtent::uniform(1));

    assert_eq!(frame.sampled_points.len(), 27);
    assert!(frame.sampled_points.iter().all(|p| p.iter().all(|c| c.fract() == 0.0)));
    // 0.7 - 1 = -0.3 truncates toward zero
    assert_eq!(frame.sampled_points[0], Vec3::new(0.0, 0.0, -1.0));
    assert_eq!(frame.sampled_points[26], Vec3::new(1.0, 1.0, 0.0));
}

#[test]
fn test_lattice_extent_controls_sample_count() {
    let mut objects = two_cubes(Vec3::new(0.5, 0.0, 0.0));
    let lattice = LatticeExtent { x: 0, y: 1, z: 3 };
    let frame = run_collision_pass(&mut objects, lattice);
    assert_eq!(frame.sampled_points.len(), lattice.point_count());
    assert_eq!(frame.collision_count, 1);
}

#[test]
fn test_sample_count_matches_overlapping_pairs() {
    let mut objects = random_scene(5, 15, 2.5);
    let lattice = LatticeExtent::default();
    let frame = run_collision_pass(&mut objects, lattice);
    assert_eq!(
        frame.sampled_points.len(),
        frame.overlapping_pairs.len() * lattice.point_count()
    );
    assert!(frame.collision_count <= frame.sampled_points.len());
    assert_eq!(frame.collision_points.len(), frame.collision_count);
}

#[test]
fn test_nan_position_never_collides() {
    let cube = Arc::new(primitives::cube());
    let mut objects = vec![
        SceneObject::new(Arc::clone(&cube), Vec3::new(f32::NAN, 0.0, 0.0)),
        SceneObject::new(Arc::clone(&cube), Vec3::new(40.0, 0.0, 0.0)),
        SceneObject::new(cube, Vec3::new(-40.0, 0.0, 40.0)),
    ];
    let (pass, calls) = counting_pass(LatticeExtent::default());
    let frame = pass.run(&mut objects);

    assert_eq!(frame.collision_count, 0);
    assert_eq!(frame.colliding, vec![false; 3]);
    assert!(frame.overlapping_pairs.is_empty());
    assert_eq!(calls.get(), 0);
}

#[test]
fn test_empty_mesh_never_overlaps() {
    let mut objects = vec![
        SceneObject::new(Arc::new(primitives::cube()), Vec3::zeros()),
        SceneObject::new(Arc::new(Mesh::new("void", Vec::new())), Vec3::zeros()),
    ];
    let (pass, calls) = counting_pass(LatticeExtent::default());
    let frame = pass.run(&mut objects);

    assert!(frame.overlapping_pairs.is_empty());
    assert_eq!(calls.get(), 0);
    assert_eq!(frame.colliding_objects(), 0);
}

#[test]
fn test_single_object_scene_has_no_pairs() {
    let mut objects = vec![SceneObject::new(Arc::new(primitives::icosahedron()), Vec3::zeros())];
    let frame = run_collision_pass(&mut objects, LatticeExtent::default());
    assert_eq!(frame, crate::physics::CollisionFrame::empty(1));
}
