use std::io::{Seek, Write};

use crate::{
    data_structures::model::MeshEntity,
    error::Result,
    format::{RecordTag, chunk::ChunkWriter},
};

/// Writes a mesh record.
///
/// Body layout: mesh kind byte, name, positions (n x 3), material name,
/// uvs (n x 2), normals (n x 3). Vertices are written as the flat triangle
/// soup the entity holds; nothing is deduplicated.
pub fn encode_mesh<W: Write + Seek>(mesh: &MeshEntity, out: &mut ChunkWriter<W>) -> Result<u64> {
    out.record(RecordTag::Mesh, |w| {
        w.write_byte(mesh.kind().code())?;
        w.write_text(mesh.name())?;
        w.write_vector_array(mesh.positions())?;
        w.write_text(mesh.material())?;
        w.write_vector_array(mesh.uvs())?;
        w.write_vector_array(mesh.normals())?;
        Ok(())
    })
}
