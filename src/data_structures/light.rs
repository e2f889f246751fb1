use cgmath::Vector3;

use crate::format::LightKind;

/// A light placed in the world.
///
/// The kind is decided by the scene source. Direction is a unit vector in
/// world space and only matters for sun and spot lights.
#[derive(Clone, Debug, PartialEq)]
pub struct LightEntity {
    pub name: String,
    pub kind: LightKind,
    pub position: Vector3<f32>,
    pub color: [f32; 3],
    pub direction: Vector3<f32>,
    pub intensity: f32,
    // Kept for the engine's upcoming shadow pass; always exported as false.
    pub cast_shadow: bool,
}

impl LightEntity {
    /// White light of unit intensity pointing down the world -Z axis.
    pub fn new(name: impl Into<String>, kind: LightKind, position: Vector3<f32>) -> Self {
        Self {
            name: name.into(),
            kind,
            position,
            color: [1.0, 1.0, 1.0],
            direction: Vector3::new(0.0, 0.0, -1.0),
            intensity: 1.0,
            cast_shadow: false,
        }
    }
}
