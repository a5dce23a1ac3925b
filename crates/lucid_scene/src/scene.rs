//! Scene types for Lucid.
//!
//! A scene is a flat list of primitives, each tagged with a material, plus
//! the camera it is viewed from. There is no acceleration structure:
//! traversal scans the list.

use lucid_geometry::{Aabb, Boundable, GenericPrimitive, Intersection, PrimitiveSet, Sampleable};
use lucid_math::{Interval, Mat4, Normal3, Point3, Quat, Ray, Real, Vec3};

use crate::{Material, SceneError, SceneResult};

/// Transform components that can be composed into a matrix.
#[derive(Clone, Debug, PartialEq)]
pub struct Transform {
    /// Translation
    pub translation: Vec3,

    /// Rotation (as quaternion)
    pub rotation: Quat,

    /// Scale
    pub scale: Vec3,
}

impl Default for Transform {
    fn default() -> Self {
        Self {
            translation: Vec3::ZERO,
            rotation: Quat::IDENTITY,
            scale: Vec3::ONE,
        }
    }
}

impl Transform {
    /// Create a new transform with only translation.
    pub fn from_translation(translation: Vec3) -> Self {
        Self {
            translation,
            ..Default::default()
        }
    }

    /// Rotation of `degrees` around `axis`.
    pub fn from_axis_angle(axis: Vec3, degrees: Real) -> Self {
        Self {
            rotation: Quat::from_axis_angle(axis.normalize(), degrees.to_radians()),
            ..Default::default()
        }
    }

    /// Convert to a 4x4 transformation matrix.
    ///
    /// Order: Scale -> Rotate -> Translate (SRT)
    pub fn to_matrix(&self) -> Mat4 {
        Mat4::from_scale_rotation_translation(self.scale, self.rotation, self.translation)
    }
}

/// Where the scene is viewed from.
#[derive(Clone, Debug, PartialEq)]
pub struct CameraDescription {
    pub look_from: Point3,
    pub look_at: Point3,
    pub up: Vec3,
    /// Vertical field of view in degrees
    pub vfov: Real,
}

impl Default for CameraDescription {
    fn default() -> Self {
        Self {
            look_from: Point3::new(0.0, 0.0, 4.0),
            look_at: Point3::ORIGIN,
            up: Vec3::Y,
            vfov: 60.0,
        }
    }
}

impl CameraDescription {
    /// Check that the placement defines a view basis: distinct eye and
    /// target, an up vector not parallel to the view, and a field of view
    /// inside (0, 180) degrees.
    pub fn validate(&self) -> SceneResult<()> {
        let view = self.look_at - self.look_from;
        if !view.is_finite() || view.length_squared() <= Real::EPSILON {
            return Err(SceneError::InvalidCamera("look_from and look_at coincide".into()));
        }
        let side = self.up.cross(view.normalize());
        if !side.is_finite() || side.length_squared() <= Real::EPSILON {
            return Err(SceneError::InvalidCamera("up is zero or parallel to the view direction".into()));
        }
        if !(self.vfov > 0.0 && self.vfov < 180.0) {
            return Err(SceneError::InvalidCamera(format!("vfov {} outside (0, 180)", self.vfov)));
        }
        Ok(())
    }
}

/// A complete scene: primitives, their materials, and a camera.
#[derive(Clone, Debug, Default)]
pub struct Scene {
    /// Scene name (usually from filename)
    pub name: String,

    /// Camera placement
    pub camera: CameraDescription,

    primitives: Vec<GenericPrimitive>,
    material_ids: Vec<usize>,
    materials: Vec<Material>,
}

impl Scene {
    /// Create an empty scene.
    pub fn new(name: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            ..Default::default()
        }
    }

    /// Add a material to the scene and return its ID.
    pub fn add_material(&mut self, material: Material) -> SceneResult<usize> {
        if self.material_id(&material.name).is_some() {
            return Err(SceneError::DuplicateMaterial(material.name));
        }
        let id = self.materials.len();
        self.materials.push(material);
        Ok(id)
    }

    /// Look up a material ID by name.
    pub fn material_id(&self, name: &str) -> Option<usize> {
        self.materials.iter().position(|m| m.name == name)
    }

    /// Add a primitive with an existing material and return its index.
    pub fn add_primitive(
        &mut self,
        primitive: impl Into<GenericPrimitive>,
        material_id: usize,
    ) -> SceneResult<usize> {
        if material_id >= self.materials.len() {
            return Err(SceneError::MaterialIndex(material_id));
        }
        let index = self.primitives.len();
        self.primitives.push(primitive.into());
        self.material_ids.push(material_id);
        Ok(index)
    }

    /// Get a primitive by index.
    pub fn primitive(&self, index: usize) -> Option<&GenericPrimitive> {
        self.primitives.get(index)
    }

    pub fn primitives(&self) -> &[GenericPrimitive] {
        &self.primitives
    }

    pub fn materials(&self) -> &[Material] {
        &self.materials
    }

    /// Material of the primitive at `index`.
    pub fn material(&self, index: usize) -> Option<&Material> {
        self.material_ids
            .get(index)
            .and_then(|&id| self.materials.get(id))
    }

    /// Indices of emissive primitives that can be area sampled.
    pub fn lights(&self) -> Vec<usize> {
        self.primitives
            .iter()
            .enumerate()
            .filter(|&(index, prim)| {
                prim.area().is_finite() && self.material(index).is_some_and(Material::is_emissive)
            })
            .map(|(index, _)| index)
            .collect()
    }

    /// Get primitive count.
    pub fn primitive_count(&self) -> usize {
        self.primitives.len()
    }

    /// Get material count.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Bounding box of every primitive, `None` for an empty scene.
    pub fn bound(&self) -> Option<Aabb> {
        self.primitives
            .iter()
            .map(Boundable::bound)
            .reduce(|acc, b| acc.union(&b))
    }
}

impl PrimitiveSet for Scene {
    #[inline]
    fn len(&self) -> usize {
        self.primitives.len()
    }

    #[inline]
    fn intersect_at(&self, index: usize, ray: &Ray, range: Interval) -> Intersection {
        self.primitives.intersect_at(index, ray, range)
    }

    #[inline]
    fn normal_at(&self, index: usize, ray: &Ray, isect: &Intersection) -> Option<Normal3> {
        self.primitives.normal_at(index, ray, isect)
    }
}
