//! JSON scene files.
//!
//! A scene file lists named materials, objects that reference them by name,
//! and an optional camera:
//!
//! ```json
//! {
//!   "materials": [
//!     { "name": "white", "albedo": [0.8, 0.8, 0.8] },
//!     { "name": "lamp", "albedo": [0, 0, 0], "emission": [10, 10, 10] }
//!   ],
//!   "objects": [
//!     { "shape": "sphere", "center": [0, 0, 0], "radius": 1, "material": "white" },
//!     { "shape": "disk", "position": [0, 3, 0], "normal": [0, -1, 0], "radius": 0.5,
//!       "material": "lamp", "transform": { "translate": [0, 1, 0] } }
//!   ],
//!   "camera": { "look_from": [0, 0, 5], "look_at": [0, 0, 0], "vfov": 45 }
//! }
//! ```

use std::path::Path;

use lucid_geometry::{Aabb, Disk, GenericPrimitive, Plane, Quad, Sampleable, Sphere, Triangle};
use lucid_math::{is_near_zero, Mat3, Normal3, Point3, Real, Transformable, Vec3};
use serde::{Deserialize, Serialize};

use crate::{CameraDescription, Material, Scene, SceneError, SceneResult, Transform};

/// Top level of a scene file.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct SceneDescription {
    #[serde(default)]
    pub name: Option<String>,

    #[serde(default)]
    pub materials: Vec<MaterialDescription>,

    pub objects: Vec<ObjectDescription>,

    #[serde(default)]
    pub camera: CameraSettings,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct MaterialDescription {
    pub name: String,

    #[serde(default = "default_albedo")]
    pub albedo: [Real; 3],

    #[serde(default)]
    pub emission: [Real; 3],
}

fn default_albedo() -> [Real; 3] {
    [0.5; 3]
}

/// One primitive with its material and placement.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ObjectDescription {
    #[serde(flatten)]
    pub shape: ShapeDescription,

    pub material: String,

    #[serde(default)]
    pub transform: Option<TransformDescription>,
}

/// Shape parameters, tagged by the `shape` field.
#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(tag = "shape", rename_all = "lowercase")]
pub enum ShapeDescription {
    Sphere {
        center: [Real; 3],
        radius: Real,
    },
    Plane {
        position: [Real; 3],
        normal: [Real; 3],
    },
    Disk {
        position: [Real; 3],
        normal: [Real; 3],
        radius: Real,
    },
    Triangle {
        vertices: [[Real; 3]; 3],
    },
    /// Corners in patch order: v00, v01, v11, v10.
    Quad {
        vertices: [[Real; 3]; 4],
    },
    Box {
        min: [Real; 3],
        max: [Real; 3],
    },
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct TransformDescription {
    #[serde(default)]
    pub translate: [Real; 3],

    #[serde(default = "default_scale")]
    pub scale: [Real; 3],

    #[serde(default)]
    pub rotate: Option<RotationDescription>,
}

fn default_scale() -> [Real; 3] {
    [1.0; 3]
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct RotationDescription {
    pub axis: [Real; 3],
    pub degrees: Real,
}

#[derive(Clone, Debug, Serialize, Deserialize)]
#[serde(deny_unknown_fields)]
pub struct CameraSettings {
    pub look_from: [Real; 3],
    pub look_at: [Real; 3],
    #[serde(default = "default_up")]
    pub up: [Real; 3],
    #[serde(default = "default_vfov")]
    pub vfov: Real,
}

fn default_up() -> [Real; 3] {
    [0.0, 1.0, 0.0]
}

fn default_vfov() -> Real {
    60.0
}

impl Default for CameraSettings {
    fn default() -> Self {
        let camera = CameraDescription::default();
        Self {
            look_from: camera.look_from.to_vec3().to_array(),
            look_at: camera.look_at.to_vec3().to_array(),
            up: camera.up.to_array(),
            vfov: camera.vfov,
        }
    }
}

impl ShapeDescription {
    fn kind(&self) -> &'static str {
        match self {
            ShapeDescription::Sphere { .. } => "sphere",
            ShapeDescription::Plane { .. } => "plane",
            ShapeDescription::Disk { .. } => "disk",
            ShapeDescription::Triangle { .. } => "triangle",
            ShapeDescription::Quad { .. } => "quad",
            ShapeDescription::Box { .. } => "box",
        }
    }

    /// Build the primitive, rejecting parameters that cannot describe a
    /// surface.
    fn build(&self, object: usize) -> SceneResult<GenericPrimitive> {
        let invalid = |reason: &str| SceneError::InvalidShape {
            shape: self.kind(),
            object,
            reason: reason.to_string(),
        };
        let normal = |n: &[Real; 3]| {
            let v = Vec3::from_array(*n);
            if !v.is_finite() || is_near_zero(v.length_squared()) {
                Err(invalid("normal must be a finite non-zero vector"))
            } else {
                Ok(Normal3::from_vec3(v))
            }
        };
        let radius = |r: Real| {
            if r.is_finite() && r > 0.0 {
                Ok(r)
            } else {
                Err(invalid("radius must be positive"))
            }
        };

        let prim: GenericPrimitive = match self {
            ShapeDescription::Sphere { center, radius: r } => {
                Sphere::new(Point3::from(*center), radius(*r)?).into()
            }
            ShapeDescription::Plane { position, normal: n } => {
                Plane::new(Point3::from(*position), normal(n)?).into()
            }
            ShapeDescription::Disk {
                position,
                normal: n,
                radius: r,
            } => Disk::new(Point3::from(*position), normal(n)?, radius(*r)?).into(),
            ShapeDescription::Triangle { vertices } => {
                let [a, b, c] = vertices.map(Point3::from);
                Triangle::new(a, b, c).into()
            }
            ShapeDescription::Quad { vertices } => {
                let [v00, v01, v11, v10] = vertices.map(Point3::from);
                Quad::new(v00, v01, v11, v10).into()
            }
            ShapeDescription::Box { min, max } => Aabb::new(Point3::from(*min), Point3::from(*max)).into(),
        };

        match prim {
            GenericPrimitive::Triangle(_) | GenericPrimitive::Quad(_) if !(prim.area() > 0.0) => {
                Err(invalid("vertices are collinear"))
            }
            _ => Ok(prim),
        }
    }
}

impl TransformDescription {
    fn to_transform(&self) -> Transform {
        let mut transform = match &self.rotate {
            Some(rotation) => Transform::from_axis_angle(Vec3::from_array(rotation.axis), rotation.degrees),
            None => Transform::default(),
        };
        transform.translation = Vec3::from_array(self.translate);
        transform.scale = Vec3::from_array(self.scale);
        transform
    }
}

impl From<&CameraSettings> for CameraDescription {
    fn from(settings: &CameraSettings) -> Self {
        Self {
            look_from: Point3::from(settings.look_from),
            look_at: Point3::from(settings.look_at),
            up: Vec3::from_array(settings.up),
            vfov: settings.vfov,
        }
    }
}

impl SceneDescription {
    /// Parse a description from JSON text.
    pub fn from_json(json: &str) -> SceneResult<Self> {
        Ok(serde_json::from_str(json)?)
    }

    /// Validate the description and build a scene.
    pub fn build(&self, default_name: &str) -> SceneResult<Scene> {
        let name = self.name.as_deref().unwrap_or(default_name);
        let mut scene = Scene::new(name);
        scene.camera = CameraDescription::from(&self.camera);
        scene.camera.validate()?;

        for desc in &self.materials {
            let material = Material {
                name: desc.name.clone(),
                albedo: Vec3::from_array(desc.albedo),
                emission: Vec3::from_array(desc.emission),
            };
            log::debug!("Material '{}': albedo {:?}", material.name, material.albedo);
            scene.add_material(material)?;
        }

        for (index, object) in self.objects.iter().enumerate() {
            let material_id = scene.material_id(&object.material).ok_or_else(|| SceneError::UnknownMaterial {
                name: object.material.clone(),
                object: index,
            })?;

            let mut prim = object.shape.build(index)?;
            if let Some(transform) = &object.transform {
                let matrix = transform.to_transform().to_matrix();
                let det = Mat3::from_mat4(matrix).determinant();
                if !det.is_finite() || is_near_zero(det) {
                    return Err(SceneError::DegenerateTransform(index));
                }
                prim = prim.apply_transform(&matrix);
            }

            log::debug!("Object {}: {} with material '{}'", index, prim.kind(), object.material);
            scene.add_primitive(prim, material_id)?;
        }

        if scene.lights().is_empty() {
            log::warn!("Scene '{}' has no area lights", scene.name);
        }

        Ok(scene)
    }
}

/// Load a scene from a JSON file.
///
/// The scene name defaults to the file stem.
pub fn load_scene<P: AsRef<Path>>(path: P) -> SceneResult<Scene> {
    let path = path.as_ref();
    let name = path
        .file_stem()
        .and_then(|s| s.to_str())
        .unwrap_or("unnamed");

    log::info!("Loading scene from {}", path.display());
    let json = std::fs::read_to_string(path)?;
    let scene = SceneDescription::from_json(&json)?.build(name)?;
    log::info!(
        "Loaded scene '{}': {} primitives, {} materials, {} lights",
        scene.name,
        scene.primitive_count(),
        scene.material_count(),
        scene.lights().len()
    );
    Ok(scene)
}

/// Load a scene from JSON text.
pub fn load_scene_from_str(json: &str) -> SceneResult<Scene> {
    SceneDescription::from_json(json)?.build("unnamed")
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucid_geometry::{Boundable, PrimitiveSet};
    use lucid_math::{Interval, Ray};

    const SPHERES: &str = include_str!("../../../scenes/spheres.json");

    fn init_logging() {
        let _ = env_logger::builder().is_test(true).try_init();
    }

    #[test]
    fn test_load_bundled_scene() {
        init_logging();
        let scene = load_scene_from_str(SPHERES).unwrap();
        assert_eq!(scene.name, "spheres");
        assert!(scene.primitive_count() >= 4);
        assert!(!scene.lights().is_empty());
        assert!((scene.camera.vfov - 40.0).abs() < 1e-6);
    }

    #[test]
    fn test_every_shape_parses() {
        let json = r#"{
            "materials": [{ "name": "m" }],
            "objects": [
                { "shape": "sphere", "center": [0, 0, 0], "radius": 1, "material": "m" },
                { "shape": "plane", "position": [0, -1, 0], "normal": [0, 1, 0], "material": "m" },
                { "shape": "disk", "position": [0, 2, 0], "normal": [0, -1, 0], "radius": 0.5, "material": "m" },
                { "shape": "triangle", "vertices": [[-1, -1, 0], [0, 1, 0], [1, -1, 0]], "material": "m" },
                { "shape": "quad", "vertices": [[-1, -1, 0], [-1, 1, 0], [1, 1, 0], [1, -1, 0]], "material": "m" },
                { "shape": "box", "min": [1, 1, 1], "max": [-1, -1, -1], "material": "m" }
            ]
        }"#;
        let scene = load_scene_from_str(json).unwrap();
        let kinds: Vec<_> = scene.primitives().iter().map(GenericPrimitive::kind).collect();
        assert_eq!(kinds, ["sphere", "plane", "disk", "triangle", "quad", "box"]);
        assert_eq!(scene.material(0).unwrap().albedo, Vec3::splat(0.5));
        assert_eq!(scene.camera, CameraDescription::default());

        // Box corners are sorted on construction
        let bound = scene.primitive(5).unwrap().bound();
        assert_eq!(bound.vmin(), Point3::splat(-1.0));
    }

    #[test]
    fn test_transform_applied() {
        let json = r#"{
            "materials": [{ "name": "m" }],
            "objects": [{
                "shape": "sphere", "center": [0, 0, 0], "radius": 1, "material": "m",
                "transform": { "translate": [0, 0, -5], "scale": [2, 2, 2] }
            }]
        }"#;
        let scene = load_scene_from_str(json).unwrap();
        let ray = Ray::new(Point3::ORIGIN, Normal3::NEG_Z);
        let (_, isect) = scene.traverse(&ray, Interval::FORWARD).unwrap();
        assert!((isect.t - 3.0).abs() < 1e-4);
    }

    #[test]
    fn test_unknown_material() {
        let json = r#"{
            "materials": [{ "name": "m" }],
            "objects": [{ "shape": "sphere", "center": [0, 0, 0], "radius": 1, "material": "missing" }]
        }"#;
        let err = load_scene_from_str(json).unwrap_err();
        assert!(matches!(err, SceneError::UnknownMaterial { object: 0, .. }));
        assert!(err.to_string().contains("missing"));
    }

    #[test]
    fn test_invalid_shapes() {
        let cases = [
            r#"{ "shape": "sphere", "center": [0, 0, 0], "radius": -1, "material": "m" }"#,
            r#"{ "shape": "disk", "position": [0, 0, 0], "normal": [0, 0, 0], "radius": 1, "material": "m" }"#,
            r#"{ "shape": "triangle", "vertices": [[0, 0, 0], [1, 1, 1], [2, 2, 2]], "material": "m" }"#,
        ];
        for object in cases {
            let json = format!(r#"{{ "materials": [{{ "name": "m" }}], "objects": [{object}] }}"#);
            let err = load_scene_from_str(&json).unwrap_err();
            assert!(matches!(err, SceneError::InvalidShape { object: 0, .. }), "{err}");
        }
    }

    #[test]
    fn test_invalid_camera() {
        let cameras = [
            r#"{ "look_from": [0, 5, 0], "look_at": [0, 0, 0] }"#,
            r#"{ "look_from": [1, 2, 3], "look_at": [1, 2, 3] }"#,
            r#"{ "look_from": [0, 0, 5], "look_at": [0, 0, 0], "up": [0, 0, 0] }"#,
            r#"{ "look_from": [0, 0, 5], "look_at": [0, 0, 0], "vfov": 180 }"#,
        ];
        for camera in cameras {
            let json = format!(r#"{{ "materials": [], "objects": [], "camera": {camera} }}"#);
            let err = load_scene_from_str(&json).unwrap_err();
            assert!(matches!(err, SceneError::InvalidCamera(_)), "{err}");
        }

        // Top-down view with a suitable up vector is fine
        let json = r#"{ "materials": [], "objects": [],
            "camera": { "look_from": [0, 5, 0], "look_at": [0, 0, 0], "up": [0, 0, -1] } }"#;
        assert!(load_scene_from_str(json).is_ok());
    }

    #[test]
    fn test_degenerate_transform() {
        let json = r#"{
            "materials": [{ "name": "m" }],
            "objects": [{
                "shape": "sphere", "center": [0, 0, 0], "radius": 1, "material": "m",
                "transform": { "scale": [1, 0, 1] }
            }]
        }"#;
        assert!(matches!(
            load_scene_from_str(json),
            Err(SceneError::DegenerateTransform(0))
        ));
    }

    #[test]
    fn test_parse_errors() {
        assert!(matches!(load_scene_from_str("{ not json"), Err(SceneError::Parse(_))));

        let unknown_shape = r#"{ "objects": [{ "shape": "torus", "material": "m" }] }"#;
        assert!(matches!(load_scene_from_str(unknown_shape), Err(SceneError::Parse(_))));

        assert!(matches!(load_scene("does/not/exist.json"), Err(SceneError::Io(_))));
    }
}
