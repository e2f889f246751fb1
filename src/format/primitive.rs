use std::io::{self, Seek, SeekFrom, Write};

use byteorder::{LittleEndian, WriteBytesExt};

use crate::error::{Error, Result};

/// Appends primitive values to a scene sink.
///
/// Every `write_*` call appends to the end of the sink and returns the number
/// of bytes it produced. The writer only seeks on behalf of
/// [`ChunkWriter`](super::chunk::ChunkWriter) when a record size is patched.
///
/// The cursor is queried from the sink once and then advanced by the byte
/// counts of the writes, so buffered sinks are not flushed on every lookup.
#[derive(Debug)]
pub struct PrimitiveWriter<W> {
    sink: W,
    position: Option<u64>,
}

impl<W: Write + Seek> PrimitiveWriter<W> {
    pub fn new(sink: W) -> Self {
        Self {
            sink,
            position: None,
        }
    }

    /// Absolute position of the write cursor.
    pub fn position(&mut self) -> Result<u64> {
        match self.position {
            Some(position) => Ok(position),
            None => {
                let position = self.sink.stream_position()?;
                self.position = Some(position);
                Ok(position)
            }
        }
    }

    pub(crate) fn seek_to(&mut self, position: u64) -> Result<()> {
        self.position = None;
        self.sink.seek(SeekFrom::Start(position))?;
        self.position = Some(position);
        Ok(())
    }

    pub fn write_bool(&mut self, value: bool) -> Result<usize> {
        let result = self.sink.write_u8(u8::from(value));
        self.advance(result, 1)
    }

    pub fn write_byte(&mut self, value: u8) -> Result<usize> {
        let result = self.sink.write_u8(value);
        self.advance(result, 1)
    }

    pub fn write_u32(&mut self, value: u32) -> Result<usize> {
        let result = self.sink.write_u32::<LittleEndian>(value);
        self.advance(result, 4)
    }

    pub fn write_f32(&mut self, value: f32) -> Result<usize> {
        let result = self.sink.write_f32::<LittleEndian>(value);
        self.advance(result, 4)
    }

    /// Writes `text` as UTF-8 followed by a NUL terminator.
    ///
    /// Text containing a NUL byte is rejected before anything is written, it
    /// would be cut short by any decoder.
    pub fn write_text(&mut self, text: &str) -> Result<usize> {
        if text.as_bytes().contains(&0) {
            return Err(Error::Encoding {
                text: text.to_string(),
            });
        }
        let result = self.sink.write_all(text.as_bytes());
        self.advance(result, text.len())?;
        self.write_byte(0)?;
        Ok(text.len() + 1)
    }

    /// Writes a component count followed by the components.
    ///
    /// An empty vector writes nothing at all, not even the count. Callers
    /// that need the prefix must not pass empty vectors.
    pub fn write_vector(&mut self, vector: &[f32]) -> Result<usize> {
        if vector.is_empty() {
            return Ok(0);
        }
        let dimension = checked_u32("vector", vector.len())?;
        self.write_u32(dimension)?;
        for component in vector {
            self.write_f32(*component)?;
        }
        Ok(4 + 4 * vector.len())
    }

    /// Writes a vector count, the shared dimension and then every component
    /// in row order.
    ///
    /// All rows must have the dimension of the first one; otherwise
    /// [`Error::Shape`] is returned and the sink is left untouched. An empty
    /// array writes nothing.
    pub fn write_vector_array<V: AsRef<[f32]>>(&mut self, vectors: &[V]) -> Result<usize> {
        let Some(first) = vectors.first() else {
            return Ok(0);
        };
        let dimension = first.as_ref().len();
        if let Some((index, row)) = vectors
            .iter()
            .enumerate()
            .find(|(_, row)| row.as_ref().len() != dimension)
        {
            return Err(Error::Shape {
                index,
                expected: dimension,
                found: row.as_ref().len(),
            });
        }

        let count = checked_u32("vector array", vectors.len())?;
        let dimension_field = checked_u32("vector", dimension)?;
        self.write_u32(count)?;
        self.write_u32(dimension_field)?;
        for row in vectors {
            for component in row.as_ref() {
                self.write_f32(*component)?;
            }
        }
        Ok(8 + 4 * vectors.len() * dimension)
    }

    // A failed write leaves the cursor unknown, the next lookup asks the sink.
    fn advance(&mut self, result: io::Result<()>, len: usize) -> Result<usize> {
        match result {
            Ok(()) => {
                if let Some(position) = &mut self.position {
                    *position += len as u64;
                }
                Ok(len)
            }
            Err(e) => {
                self.position = None;
                Err(e.into())
            }
        }
    }

    pub fn flush(&mut self) -> Result<()> {
        self.sink.flush()?;
        Ok(())
    }

    pub fn get_ref(&self) -> &W {
        &self.sink
    }

    pub fn into_inner(self) -> W {
        self.sink
    }
}

pub(crate) fn checked_u32(what: &'static str, len: usize) -> Result<u32> {
    u32::try_from(len).map_err(|_| Error::TooLarge {
        what,
        len: len as u64,
    })
}
