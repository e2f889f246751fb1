//! Error type shared by the primitive writer, the chunk framer, the entity
//! encoders and the scene writer.
//!
//! Every variant is fatal for the export it occurs in. Once an encoder returns
//! an error the sink holds a partial record and has to be discarded.

/// Failure while encoding a scene.
#[derive(Debug, thiserror::Error)]
pub enum Error {
    /// The material has no texture path. The format has no representation for
    /// untextured materials.
    #[error("material '{material}' references no texture")]
    MissingTexture { material: String },

    /// Text that cannot be stored as a NUL-terminated string.
    #[error("text {text:?} contains an embedded NUL byte")]
    Encoding { text: String },

    /// A vector array whose rows do not share one dimension.
    #[error("vector {index} has {found} components, expected {expected}")]
    Shape {
        index: usize,
        expected: usize,
        found: usize,
    },

    /// A mesh entity whose geometry violates the triangle-soup invariant.
    #[error("mesh '{mesh}' is invalid: {reason}")]
    InvalidMesh { mesh: String, reason: String },

    /// A material was submitted after meshes or lights were already written.
    #[error("material '{material}' written after scene objects; materials must come first")]
    OutOfOrder { material: String },

    /// A count or record body that does not fit the 32-bit size fields.
    #[error("{what} of length {len} does not fit in 32 bits")]
    TooLarge { what: &'static str, len: u64 },

    #[error("i/o error on scene sink: {0}")]
    Io(#[from] std::io::Error),
}

pub type Result<T> = std::result::Result<T, Error>;
