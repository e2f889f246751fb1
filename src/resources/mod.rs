use std::path::Path;

use anyhow::{Context, bail};

use crate::{data_structures::scene::Scene, format::MeshKind};

/**
 * This module contains all logic for building a [`Scene`] from files written by
 * authoring tools. Sources hand the encoders triangulated, world-space geometry;
 * they never write anything themselves.
 */
#[cfg(feature = "gltf")]
pub mod gltf;
#[cfg(feature = "obj")]
pub mod obj;

/// Settings the scene sources apply while building entities.
#[derive(Clone, Copy, Debug, Default)]
pub struct ExportOptions {
    /// Kind assigned to every mesh the source produces.
    pub mesh_kind: MeshKind,
}

/// Loads a scene, picking the source from the file extension.
pub fn load_scene(path: impl AsRef<Path>, options: &ExportOptions) -> anyhow::Result<Scene> {
    let path = path.as_ref();
    let extension = path
        .extension()
        .and_then(|ext| ext.to_str())
        .map(str::to_ascii_lowercase)
        .with_context(|| format!("{} has no file extension", path.display()))?;

    match extension.as_str() {
        #[cfg(feature = "obj")]
        "obj" => obj::load_scene_obj(path, options),
        #[cfg(feature = "gltf")]
        "gltf" | "glb" => gltf::load_scene_gltf(path, options),
        other => bail!(
            "unsupported scene format '.{other}' for {}",
            path.display()
        ),
    }
}
