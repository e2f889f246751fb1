//! Wire format of `.scene` files.
//!
//! A file is a flat sequence of records, each shaped
//! `[u8 tag][u32 body size][body]`. There is no file header, magic number or
//! version field and no end-of-file record: the end of the stream terminates
//! it. Decoders use the size field to skip records they do not understand.
//!
//! All multi-byte values are little-endian.
//!
//! - `primitive` appends scalars, text and vectors to a sink
//! - `chunk` frames a body as one size-prefixed record

pub mod chunk;
pub mod primitive;

/// Bytes taken by a record header: one tag byte and the u32 size field.
pub const RECORD_HEADER_SIZE: u64 = 5;

/// Type tag leading every record.
#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum RecordTag {
    Mesh = 0,
    Material = 1,
    Light = 2,
    /// Reserved for the engine; the exporter never writes camera records.
    Camera = 3,
}

impl RecordTag {
    pub fn code(self) -> u8 {
        self as u8
    }
}

/// How the engine should treat a mesh once loaded.
#[repr(u8)]
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum MeshKind {
    #[default]
    Static = 0,
    Dynamic = 1,
    Streamed = 2,
}

impl MeshKind {
    pub fn code(self) -> u8 {
        self as u8
    }
}

#[repr(u8)]
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum LightKind {
    Point = 0,
    Sun = 1,
    Spot = 2,
}

impl LightKind {
    pub fn code(self) -> u8 {
        self as u8
    }
}
