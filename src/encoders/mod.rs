//! Per-entity record encoders.
//!
//! Each encoder turns one entity into exactly one framed record through a
//! [`ChunkWriter`](crate::format::chunk::ChunkWriter) and returns the framed
//! size. Encoders are independent of each other and of any scene source, so
//! they can be driven with hand-built entities.
//!
//! - `material` writes material records (tag 1)
//! - `mesh` writes triangle-soup mesh records (tag 0)
//! - `light` writes light records (tag 2)

pub mod light;
pub mod material;
pub mod mesh;

pub use light::encode_light;
pub use material::{encode_material, roughness_code};
pub use mesh::encode_mesh;
