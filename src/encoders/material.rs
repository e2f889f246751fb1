use std::io::{Seek, Write};

use crate::{
    data_structures::model::MaterialEntity,
    error::{Error, Result},
    format::{RecordTag, chunk::ChunkWriter},
};

/// Writes a material record.
///
/// Body layout: name, ambient, diffuse, specular intensity, specular color,
/// emissive, roughness code (u32), texture path.
///
/// A material without a texture is rejected before its header is written.
pub fn encode_material<W: Write + Seek>(
    material: &MaterialEntity,
    out: &mut ChunkWriter<W>,
) -> Result<u64> {
    let Some(texture) = material.texture.as_deref() else {
        return Err(Error::MissingTexture {
            material: material.name.clone(),
        });
    };

    out.record(RecordTag::Material, |w| {
        w.write_text(&material.name)?;
        w.write_vector(&material.ambient)?;
        w.write_vector(&material.diffuse)?;
        w.write_f32(material.specular_intensity)?;
        w.write_vector(&material.specular)?;
        w.write_vector(&material.emissive)?;
        w.write_u32(roughness_code(material.roughness))?;
        w.write_text(texture)?;
        Ok(())
    })
}

/// Maps roughness in `[0, 1]` to the engine's integer specular exponent
/// `round(2^(8 * roughness))`, so 0 gives 1 and 1 gives 256.
///
/// Out of range input is clamped and NaN is treated as 0.
pub fn roughness_code(roughness: f32) -> u32 {
    let roughness = if roughness.is_nan() {
        0.0
    } else {
        roughness.clamp(0.0, 1.0)
    };
    2f32.powf(8.0 * roughness).round() as u32
}
