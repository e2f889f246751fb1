//! In-memory scene handed to the [`SceneWriter`](crate::export::SceneWriter).
//!
//! A scene keeps materials and objects in the order the source enumerated
//! them. Each entry carries a user count; entries nobody uses any more are
//! orphans and are left out of the export.

use crate::data_structures::{
    light::LightEntity,
    model::{MaterialEntity, MeshEntity},
};

/// A scene entry together with the number of users referencing it.
#[derive(Clone, Debug)]
pub struct Tracked<T> {
    pub item: T,
    pub users: u32,
}

impl<T> Tracked<T> {
    pub fn is_live(&self) -> bool {
        self.users > 0
    }
}

/// Anything besides a material that can live in a scene.
#[derive(Clone, Debug)]
pub enum SceneObject {
    Mesh(MeshEntity),
    Light(LightEntity),
    /// Cameras are carried so sources can report them faithfully, but the
    /// format reserves their record type and nothing is written for them.
    Camera { name: String },
}

impl SceneObject {
    pub fn name(&self) -> &str {
        match self {
            SceneObject::Mesh(mesh) => mesh.name(),
            SceneObject::Light(light) => &light.name,
            SceneObject::Camera { name } => name,
        }
    }
}

impl From<MeshEntity> for SceneObject {
    fn from(mesh: MeshEntity) -> Self {
        SceneObject::Mesh(mesh)
    }
}

impl From<LightEntity> for SceneObject {
    fn from(light: LightEntity) -> Self {
        SceneObject::Light(light)
    }
}

#[derive(Clone, Debug, Default)]
pub struct Scene {
    materials: Vec<Tracked<MaterialEntity>>,
    objects: Vec<Tracked<SceneObject>>,
}

impl Scene {
    pub fn new() -> Self {
        Self::default()
    }

    /// Adds a material with a single user.
    pub fn add_material(&mut self, material: MaterialEntity) {
        self.add_material_with_users(material, 1);
    }

    pub fn add_material_with_users(&mut self, material: MaterialEntity, users: u32) {
        self.materials.push(Tracked {
            item: material,
            users,
        });
    }

    /// Adds an object with a single user.
    pub fn add_object(&mut self, object: impl Into<SceneObject>) {
        self.add_object_with_users(object, 1);
    }

    pub fn add_object_with_users(&mut self, object: impl Into<SceneObject>, users: u32) {
        self.objects.push(Tracked {
            item: object.into(),
            users,
        });
    }

    pub fn materials(&self) -> &[Tracked<MaterialEntity>] {
        &self.materials
    }

    pub fn objects(&self) -> &[Tracked<SceneObject>] {
        &self.objects
    }

    pub fn live_materials(&self) -> impl Iterator<Item = &MaterialEntity> {
        self.materials
            .iter()
            .filter(|entry| entry.is_live())
            .map(|entry| &entry.item)
    }

    pub fn live_objects(&self) -> impl Iterator<Item = &SceneObject> {
        self.objects
            .iter()
            .filter(|entry| entry.is_live())
            .map(|entry| &entry.item)
    }

    pub fn is_empty(&self) -> bool {
        self.materials.is_empty() && self.objects.is_empty()
    }
}
