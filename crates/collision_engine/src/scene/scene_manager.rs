//! Scene Manager - owns the objects and drives the per-frame collision pass
//!
//! The scene keeps:
//! 1. The spawned objects, each referencing a pooled mesh
//! 2. The current selection (the object that receives motion input)
//! 3. The collision pass and the frame it produced last
//!
//! Presentation reads colours and sample points back from the scene after
//! [`Scene::step`].

use rand::Rng;
use thiserror::Error;

use crate::assets::MeshPool;
use crate::config::{MotionConfig, SceneConfig};
use crate::foundation::logging::{debug, info};
use crate::foundation::math::Vec3;
use crate::physics::{CollisionFrame, CollisionPass};
use crate::scene::object::{ObjectColor, SceneObject};

/// Scene errors
#[derive(Debug, Error, PartialEq, Eq)]
pub enum SceneError {
    /// Objects were requested from a pool with no meshes
    #[error("Mesh pool is empty")]
    EmptyMeshPool,

    /// Index past the end of the object list
    #[error("Object index {index} out of range for {len} objects")]
    ObjectIndexOutOfRange {
        /// Requested index
        index: usize,
        /// Number of objects in the scene
        len: usize,
    },

    /// Mesh name not present in the pool
    #[error("Unknown mesh: {0}")]
    UnknownMesh(String),

    /// Operation needs a selected object but the scene is empty
    #[error("Scene has no objects to select")]
    EmptyScene,
}

/// Motion input for the selected object
///
/// Components are unit-less inputs, typically in `[-1, 1]`; the scene scales
/// them by the configured speeds and the frame time.
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Motion {
    /// Translation input per axis
    pub direction: Vec3,
    /// Rotation input about the object's axis (positive increases the angle)
    pub spin: f32,
}

impl Motion {
    /// Pure translation input
    pub fn translate(direction: Vec3) -> Self {
        Self { direction, spin: 0.0 }
    }

    /// Pure rotation input
    pub fn spin(spin: f32) -> Self {
        Self {
            direction: Vec3::zeros(),
            spin,
        }
    }

    /// No input this frame
    pub fn is_idle(&self) -> bool {
        self.direction == Vec3::zeros() && self.spin == 0.0
    }
}

/// Objects, selection and collision state of one scene
pub struct Scene {
    objects: Vec<SceneObject>,
    selected: usize,
    motion: MotionConfig,
    pass: CollisionPass,
    last_frame: CollisionFrame,
}

impl Scene {
    /// Create an empty scene using the motion and collision settings of `config`
    pub fn new(config: &SceneConfig) -> Self {
        Self {
            objects: Vec::new(),
            selected: 0,
            motion: config.motion,
            pass: CollisionPass::from_config(&config.collision),
            last_frame: CollisionFrame::default(),
        }
    }

    /// Create a scene and spawn `config.object_count` random objects
    ///
    /// Each object gets a mesh picked uniformly from `pool` and an integer
    /// position on the XZ plane within `spawn_extent`. Bounding boxes are
    /// built as the objects are created.
    pub fn populate<R: Rng + ?Sized>(
        pool: &MeshPool,
        config: &SceneConfig,
        rng: &mut R,
    ) -> Result<Self, SceneError> {
        let mut scene = Self::new(config);
        if config.object_count == 0 {
            return Ok(scene);
        }

        let extent = config.spawn_extent.max(0);
        scene.objects.reserve(config.object_count);
        for _ in 0..config.object_count {
            let mesh = pool.choose(rng).ok_or(SceneError::EmptyMeshPool)?;
            let position = Vec3::new(
                rng.gen_range(-extent..=extent) as f32,
                0.0,
                rng.gen_range(-extent..=extent) as f32,
            );
            scene.objects.push(SceneObject::new(mesh, position));
        }

        info!(
            "Populated scene with {} objects from {} meshes",
            scene.objects.len(),
            pool.len()
        );
        Ok(scene)
    }

    /// Spawn the pooled mesh called `name` at `position`, returning its index
    pub fn spawn(
        &mut self,
        pool: &MeshPool,
        name: &str,
        position: Vec3,
    ) -> Result<usize, SceneError> {
        let mesh = pool
            .get(name)
            .ok_or_else(|| SceneError::UnknownMesh(name.to_string()))?;
        Ok(self.add_object(SceneObject::new(mesh, position)))
    }

    /// Append an object, returning its index
    pub fn add_object(&mut self, object: SceneObject) -> usize {
        self.objects.push(object);
        self.objects.len() - 1
    }

    /// All objects in spawn order
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Number of objects
    pub fn len(&self) -> usize {
        self.objects.len()
    }

    /// True when the scene holds no objects
    pub fn is_empty(&self) -> bool {
        self.objects.is_empty()
    }

    /// Index of the selected object
    pub fn selected_index(&self) -> usize {
        self.selected
    }

    /// Selected object, `None` for an empty scene
    pub fn selected(&self) -> Option<&SceneObject> {
        self.objects.get(self.selected)
    }

    /// Mutable selected object, `None` for an empty scene
    pub fn selected_mut(&mut self) -> Option<&mut SceneObject> {
        self.objects.get_mut(self.selected)
    }

    /// Select object `index`
    pub fn set_selected(&mut self, index: usize) -> Result<(), SceneError> {
        if index >= self.objects.len() {
            return Err(SceneError::ObjectIndexOutOfRange {
                index,
                len: self.objects.len(),
            });
        }
        self.selected = index;
        Ok(())
    }

    /// Move the selection forward, wrapping to the first object
    pub fn select_next(&mut self) -> usize {
        if !self.objects.is_empty() {
            self.selected = (self.selected + 1) % self.objects.len();
            debug!("Selected object {}", self.selected);
        }
        self.selected
    }

    /// Move the selection back, wrapping to the last object
    pub fn select_previous(&mut self) -> usize {
        if !self.objects.is_empty() {
            self.selected = self
                .selected
                .checked_sub(1)
                .unwrap_or(self.objects.len() - 1);
            debug!("Selected object {}", self.selected);
        }
        self.selected
    }

    /// Move the selected object by `delta`
    pub fn translate_selected(&mut self, delta: Vec3) -> Result<(), SceneError> {
        let object = self.selected_mut().ok_or(SceneError::EmptyScene)?;
        object.translate(delta);
        Ok(())
    }

    /// Rotate the selected object by `delta_degrees` about its axis
    ///
    /// The object's bounding box is rebuilt on the next [`Scene::step`].
    pub fn rotate_selected(&mut self, delta_degrees: f32) -> Result<(), SceneError> {
        let object = self.selected_mut().ok_or(SceneError::EmptyScene)?;
        object.rotate_by(delta_degrees);
        Ok(())
    }

    /// Apply one frame of motion input to the selected object
    ///
    /// Translation is scaled by `move_speed`, rotation by `rotate_speed`,
    /// both by `delta_time`. Without spin input the rotation is untouched.
    pub fn apply_motion(&mut self, motion: Motion, delta_time: f32) -> Result<(), SceneError> {
        if self.objects.is_empty() {
            return Err(SceneError::EmptyScene);
        }
        if motion.direction != Vec3::zeros() {
            self.translate_selected(motion.direction * self.motion.move_speed * delta_time)?;
        }
        if motion.spin != 0.0 {
            self.rotate_selected(motion.spin * self.motion.rotate_speed * delta_time)?;
        }
        Ok(())
    }

    /// Run the collision pass and merge its results into the objects
    pub fn step(&mut self) -> &CollisionFrame {
        let frame = self.pass.run(&mut self.objects);
        frame.apply_to(&mut self.objects);
        self.last_frame = frame;
        &self.last_frame
    }

    /// Frame produced by the latest [`Scene::step`]
    pub fn last_frame(&self) -> &CollisionFrame {
        &self.last_frame
    }

    /// Collision counter of the latest frame
    pub fn collision_count(&self) -> usize {
        self.last_frame.collision_count
    }

    /// Sample points of the latest frame that presentation draws
    pub fn visible_samples(&self) -> impl Iterator<Item = &Vec3> {
        self.last_frame.visible_samples()
    }

    /// Display colour of object `index`
    pub fn object_color(&self, index: usize) -> Option<ObjectColor> {
        self.objects
            .get(index)
            .map(|object| object.color(index == self.selected))
    }
}
