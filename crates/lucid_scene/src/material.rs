//! Surface materials.

use lucid_math::Vec3;

/// A diffuse material with optional emission.
///
/// Primitives whose material emits are treated as area lights.
#[derive(Clone, Debug, PartialEq)]
pub struct Material {
    /// Material name, unique within a scene
    pub name: String,

    /// Diffuse reflectance (RGB, 0-1)
    pub albedo: Vec3,

    /// Emitted radiance (RGB, unbounded)
    pub emission: Vec3,
}

impl Default for Material {
    fn default() -> Self {
        Self {
            name: String::new(),
            albedo: Vec3::splat(0.5), // Grey default
            emission: Vec3::ZERO,
        }
    }
}

impl Material {
    /// Create a non-emissive material.
    pub fn new(name: impl Into<String>, albedo: Vec3) -> Self {
        Self {
            name: name.into(),
            albedo,
            ..Default::default()
        }
    }

    /// Create a black light source.
    pub fn light(name: impl Into<String>, emission: Vec3) -> Self {
        Self {
            name: name.into(),
            albedo: Vec3::ZERO,
            emission,
        }
    }

    pub fn with_emission(mut self, emission: Vec3) -> Self {
        self.emission = emission;
        self
    }

    /// Check if this material is emissive.
    pub fn is_emissive(&self) -> bool {
        self.emission.max_element() > 0.0
    }

    /// Check if this material reflects no light at all.
    pub fn is_black(&self) -> bool {
        self.albedo.max_element() <= 0.0
    }
}
