use std::io::{Seek, Write};

use super::{RECORD_HEADER_SIZE, RecordTag, primitive::PrimitiveWriter};
use crate::error::{Error, Result};

/// Frames record bodies as `[tag][size][body]`.
///
/// The size field is reserved with a zero placeholder, the body is written,
/// and the field is patched afterwards from the absolute stream positions
/// around the body. Bodies never report their own size, so a miscounting
/// encoder cannot desynchronize the stream.
#[derive(Debug)]
pub struct ChunkWriter<W> {
    out: PrimitiveWriter<W>,
}

impl<W: Write + Seek> ChunkWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            out: PrimitiveWriter::new(sink),
        }
    }

    /// Writes one record and returns its framed size (header plus body).
    ///
    /// When `body` fails the error is returned as is and the placeholder is
    /// left unpatched: the sink then holds a partial record and must be
    /// discarded.
    pub fn record<F>(&mut self, tag: RecordTag, body: F) -> Result<u64>
    where
        F: FnOnce(&mut PrimitiveWriter<W>) -> Result<()>,
    {
        self.out.write_byte(tag.code())?;
        let size_field = self.out.position()?;
        self.out.write_u32(0)?;

        let body_start = self.out.position()?;
        body(&mut self.out)?;
        let body_end = self.out.position()?;

        let body_size = body_end - body_start;
        let size = u32::try_from(body_size).map_err(|_| Error::TooLarge {
            what: "record body",
            len: body_size,
        })?;

        self.out.seek_to(size_field)?;
        self.out.write_u32(size)?;
        self.out.seek_to(body_end)?;

        Ok(RECORD_HEADER_SIZE + body_size)
    }

    pub fn flush(&mut self) -> Result<()> {
        self.out.flush()
    }

    pub fn get_ref(&self) -> &W {
        self.out.get_ref()
    }

    pub fn into_inner(self) -> W {
        self.out.into_inner()
    }
}
