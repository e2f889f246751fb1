//! Scene export: ordering, dispatch and byte accounting.
//!
//! The engine reads a `.scene` file front to back and resolves a mesh's
//! material by name against the materials it has already loaded. Materials
//! therefore have to precede every mesh and light. [`SceneWriter`] enforces
//! this with a two-phase state: once the first mesh or light is written,
//! further materials are rejected with [`Error::OutOfOrder`].
//!
//! Export is all-or-nothing. The first failing entity aborts the export and
//! the error is returned; whatever was already written to the sink is a
//! corrupt file that the caller has to discard.

use std::{
    collections::HashSet,
    fs::File,
    io::{BufWriter, Seek, Write},
    path::Path,
};

use crate::{
    data_structures::{
        model::MaterialEntity,
        scene::{Scene, SceneObject},
    },
    encoders::{encode_light, encode_material, encode_mesh},
    error::{Error, Result},
    format::chunk::ChunkWriter,
};

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
enum Phase {
    Materials,
    Objects,
}

/// Writes entities to a sink in engine load order.
#[derive(Debug)]
pub struct SceneWriter<W> {
    out: ChunkWriter<W>,
    phase: Phase,
    materials: HashSet<String>,
    bytes_written: u64,
}

impl<W: Write + Seek> SceneWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            out: ChunkWriter::new(sink),
            phase: Phase::Materials,
            materials: HashSet::new(),
            bytes_written: 0,
        }
    }

    /// Writes every live material and then every live object of `scene`.
    ///
    /// Returns the number of bytes this call added to the sink.
    pub fn write_scene(&mut self, scene: &Scene) -> Result<u64> {
        let start = self.bytes_written;

        for material in scene.live_materials() {
            self.write_material(material).inspect_err(|e| {
                log::error!("Export aborted at material '{}': {e}", material.name);
            })?;
        }
        for entry in scene.materials().iter().filter(|entry| !entry.is_live()) {
            log::debug!("Skipping orphan material '{}'", entry.item.name);
        }

        for object in scene.live_objects() {
            self.write_object(object).inspect_err(|e| {
                log::error!("Export aborted at object '{}': {e}", object.name());
            })?;
        }

        Ok(self.bytes_written - start)
    }

    /// Writes one material record.
    ///
    /// Fails with [`Error::OutOfOrder`] once a mesh or light has been written.
    pub fn write_material(&mut self, material: &MaterialEntity) -> Result<u64> {
        if self.phase == Phase::Objects {
            return Err(Error::OutOfOrder {
                material: material.name.clone(),
            });
        }

        let size = encode_material(material, &mut self.out)?;
        self.materials.insert(material.name.clone());
        self.bytes_written += size;
        log::info!("Material '{}': {} bytes", material.name, size);
        Ok(size)
    }

    /// Writes the record for a mesh or light. Cameras produce no record and
    /// report a size of zero.
    pub fn write_object(&mut self, object: &SceneObject) -> Result<u64> {
        let size = match object {
            SceneObject::Mesh(mesh) => {
                self.phase = Phase::Objects;
                if !self.materials.contains(mesh.material()) {
                    log::warn!(
                        "Mesh '{}' references material '{}' which was not exported before it",
                        mesh.name(),
                        mesh.material()
                    );
                }
                let size = encode_mesh(mesh, &mut self.out)?;
                log::info!(
                    "Mesh '{}' ({} triangles): {} bytes",
                    mesh.name(),
                    mesh.triangle_count(),
                    size
                );
                size
            }
            SceneObject::Light(light) => {
                self.phase = Phase::Objects;
                let size = encode_light(light, &mut self.out)?;
                log::info!("Light '{}' ({:?}): {} bytes", light.name, light.kind, size);
                size
            }
            SceneObject::Camera { name } => {
                log::debug!("Skipping camera '{name}', camera records are not exported");
                0
            }
        };

        self.bytes_written += size;
        Ok(size)
    }

    /// Total bytes written through this writer so far.
    pub fn bytes_written(&self) -> u64 {
        self.bytes_written
    }

    pub fn get_ref(&self) -> &W {
        self.out.get_ref()
    }

    /// Flushes the sink and hands it back.
    pub fn finish(mut self) -> Result<W> {
        self.out.flush()?;
        Ok(self.out.into_inner())
    }
}

/// Writes `scene` to `sink` and returns the total byte count.
pub fn write_scene<W: Write + Seek>(scene: &Scene, sink: W) -> Result<u64> {
    let mut writer = SceneWriter::new(sink);
    let total = writer.write_scene(scene)?;
    writer.finish()?;
    Ok(total)
}

/// Creates (or truncates) the file at `path` and exports `scene` into it.
///
/// On error the file is left behind with whatever was written before the
/// failure. It is not a valid scene file and must be deleted by the caller.
pub fn export_to_path(scene: &Scene, path: impl AsRef<Path>) -> Result<u64> {
    let file = File::create(path.as_ref())?;
    write_scene(scene, BufWriter::new(file))
}
