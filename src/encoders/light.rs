use std::io::{Seek, Write};

use crate::{
    data_structures::light::LightEntity,
    error::Result,
    format::{RecordTag, chunk::ChunkWriter},
};

/// Writes a light record.
///
/// Body layout: kind byte, location, color, direction, intensity, cast-shadow
/// flag. Shadows are not supported by the engine yet, so the flag is always
/// written as false.
pub fn encode_light<W: Write + Seek>(light: &LightEntity, out: &mut ChunkWriter<W>) -> Result<u64> {
    if light.cast_shadow {
        log::warn!(
            "Light '{}' requests shadows; exporting it without",
            light.name
        );
    }

    let position: [f32; 3] = light.position.into();
    let direction: [f32; 3] = light.direction.into();

    out.record(RecordTag::Light, |w| {
        w.write_byte(light.kind.code())?;
        w.write_vector(&position)?;
        w.write_vector(&light.color)?;
        w.write_vector(&direction)?;
        w.write_f32(light.intensity)?;
        w.write_bool(false)?;
        Ok(())
    })
}
