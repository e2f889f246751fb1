//! Scene data structures: the entities the encoders consume.
//!
//! - `model` contains mesh and material entities
//! - `light` contains light entities
//! - `scene` holds the ordered, user-counted collection handed to the writer

pub mod light;
pub mod model;
pub mod scene;
