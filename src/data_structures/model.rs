//! Mesh and material entities as handed to the encoders.
//!
//! Both are plain data: a scene source builds them once per export and the
//! encoders only read them.

use crate::{
    error::{Error, Result},
    format::MeshKind,
};

/// A triangulated mesh in world space.
///
/// Geometry is stored as a flat triangle soup: vertex `i` of the mesh is
/// `positions[i]`, `uvs[i]` and `normals[i]`, and every three consecutive
/// vertices form one triangle. There is no index buffer; shared vertices are
/// repeated.
#[derive(Clone, Debug)]
pub struct MeshEntity {
    name: String,
    kind: MeshKind,
    material: String,
    positions: Vec<[f32; 3]>,
    uvs: Vec<[f32; 2]>,
    normals: Vec<[f32; 3]>,
}

impl MeshEntity {
    /// Builds a static mesh, checking that the three vertex streams line up
    /// and describe whole triangles.
    pub fn new(
        name: impl Into<String>,
        material: impl Into<String>,
        positions: Vec<[f32; 3]>,
        uvs: Vec<[f32; 2]>,
        normals: Vec<[f32; 3]>,
    ) -> Result<Self> {
        let name = name.into();
        let invalid = |reason: String| Error::InvalidMesh {
            mesh: name.clone(),
            reason,
        };

        if positions.is_empty() {
            return Err(invalid("mesh has no triangles".to_string()));
        }
        if positions.len() % 3 != 0 {
            return Err(invalid(format!(
                "{} vertices do not form whole triangles",
                positions.len()
            )));
        }
        if uvs.len() != positions.len() {
            return Err(invalid(format!(
                "{} uvs for {} vertices",
                uvs.len(),
                positions.len()
            )));
        }
        if normals.len() != positions.len() {
            return Err(invalid(format!(
                "{} normals for {} vertices",
                normals.len(),
                positions.len()
            )));
        }

        Ok(Self {
            name,
            kind: MeshKind::default(),
            material: material.into(),
            positions,
            uvs,
            normals,
        })
    }

    pub fn with_kind(mut self, kind: MeshKind) -> Self {
        self.kind = kind;
        self
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub fn kind(&self) -> MeshKind {
        self.kind
    }

    /// Name of the material the engine binds to this mesh.
    pub fn material(&self) -> &str {
        &self.material
    }

    pub fn positions(&self) -> &[[f32; 3]] {
        &self.positions
    }

    pub fn uvs(&self) -> &[[f32; 2]] {
        &self.uvs
    }

    pub fn normals(&self) -> &[[f32; 3]] {
        &self.normals
    }

    pub fn triangle_count(&self) -> usize {
        self.positions.len() / 3
    }
}

/// Surface parameters of a material.
///
/// Colors are linear RGB and are not clamped. `roughness` is expected in
/// `[0, 1]`.
#[derive(Clone, Debug, PartialEq)]
pub struct MaterialEntity {
    pub name: String,
    pub ambient: [f32; 3],
    pub diffuse: [f32; 3],
    pub specular_intensity: f32,
    pub specular: [f32; 3],
    pub emissive: [f32; 3],
    pub roughness: f32,
    /// Path of the color texture. Only the path is exported, never pixels.
    pub texture: Option<String>,
}

impl MaterialEntity {
    /// Creates a grey, untextured material.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ambient: [1.0, 1.0, 1.0],
            diffuse: [0.8, 0.8, 0.8],
            specular_intensity: 0.5,
            specular: [1.0, 1.0, 1.0],
            emissive: [0.0, 0.0, 0.0],
            roughness: 0.5,
            texture: None,
        }
    }

    pub fn with_diffuse(mut self, diffuse: [f32; 3]) -> Self {
        self.diffuse = diffuse;
        self
    }

    pub fn with_texture(mut self, path: impl Into<String>) -> Self {
        self.texture = Some(path.into());
        self
    }
}
