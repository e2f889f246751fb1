//! conrad-scene
//!
//! Exporter for the Conrad engine's binary `.scene` files. A scene file is a
//! flat stream of size-prefixed records: materials first, then meshes and
//! lights in the order the authoring tool enumerated them. The engine reads it
//! front to back at load time.
//!
//! High-level modules
//! - `format`: record tags, the primitive writer and the chunk framer
//! - `data_structures`: mesh, material and light entities and the scene holding them
//! - `encoders`: one record encoder per entity type
//! - `export`: ordering, dispatch and byte accounting for a whole scene
//! - `resources`: helpers to build scenes from OBJ/MTL and glTF files
//! - `error`: the error type every encoding step reports
//!

pub mod data_structures;
pub mod encoders;
pub mod error;
pub mod export;
pub mod format;
pub mod resources;

// Re-exports commonly used types for convenience in downstream code.
pub use data_structures::{
    light::LightEntity,
    model::{MaterialEntity, MeshEntity},
    scene::{Scene, SceneObject},
};
pub use error::{Error, Result};
pub use export::{SceneWriter, export_to_path, write_scene};
pub use format::{LightKind, MeshKind, RecordTag};
pub use resources::{ExportOptions, load_scene};
