//! The Cornell box test scene.
//!
//! Five quad walls over the cube `[-1, 1]^3` (open towards +z), a sphere on
//! the floor and a disk light just below the ceiling.

use lucid_geometry::{Disk, Quad, Sphere};
use lucid_math::{Normal3, Point3, Real, Vec3};

use crate::{CameraDescription, Material, Scene, SceneResult};

/// Fixed tuple form: floor, left, right, ceiling, back, sphere, light.
pub type CornellGeometry = (Quad, Quad, Quad, Quad, Quad, Sphere, Disk);

const BOX_POINTS: [[Real; 3]; 8] = [
    [-1.0, -1.0, 1.0],
    [-1.0, -1.0, -1.0],
    [1.0, -1.0, -1.0],
    [1.0, -1.0, 1.0],
    [-1.0, 1.0, 1.0],
    [-1.0, 1.0, -1.0],
    [1.0, 1.0, -1.0],
    [1.0, 1.0, 1.0],
];

/// Corner indices of each wall in patch order (v00, v01, v11, v10).
const WALLS: [[usize; 4]; 5] = [
    [0, 3, 2, 1], // floor
    [0, 1, 5, 4], // left
    [2, 3, 7, 6], // right
    [4, 5, 6, 7], // ceiling
    [1, 2, 6, 5], // back
];

/// Material of each primitive, in tuple order.
const MATERIAL_IDS: [usize; 7] = [0, 1, 2, 0, 0, 2, 3];

fn wall(corners: [usize; 4]) -> Quad {
    let [v00, v01, v11, v10] = corners.map(|i| Point3::from(BOX_POINTS[i]));
    Quad::new(v00, v01, v11, v10)
}

/// Cornell box geometry as a fixed tuple of concrete shapes.
pub fn cornell_box_geometry() -> CornellGeometry {
    (
        wall(WALLS[0]),
        wall(WALLS[1]),
        wall(WALLS[2]),
        wall(WALLS[3]),
        wall(WALLS[4]),
        Sphere::new(Point3::new(0.5, -0.6, 0.2), 0.4),
        Disk::new(Point3::new(0.0, 0.99, 0.0), Normal3::NEG_Y, 0.3),
    )
}

fn materials() -> [Material; 4] {
    [
        Material::new("white", Vec3::ONE),
        Material::new("red", Vec3::new(1.0, 0.1, 0.1)),
        Material::new("green", Vec3::new(0.1, 1.0, 0.1)),
        Material::light("light", Vec3::splat(10.0)),
    ]
}

/// Cornell box as a runtime scene.
pub fn cornell_box() -> SceneResult<Scene> {
    let mut scene = Scene::new("cornell");
    scene.camera = CameraDescription {
        look_from: Point3::new(0.0, 0.0, 4.0),
        look_at: Point3::ORIGIN,
        up: Vec3::Y,
        vfov: 60.0,
    };

    for material in materials() {
        scene.add_material(material)?;
    }

    let (floor, left, right, ceiling, back, sphere, light) = cornell_box_geometry();
    let walls = [floor, left, right, ceiling, back];
    for (quad, &material_id) in walls.into_iter().zip(&MATERIAL_IDS[..5]) {
        scene.add_primitive(quad, material_id)?;
    }
    scene.add_primitive(sphere, MATERIAL_IDS[5])?;
    scene.add_primitive(light, MATERIAL_IDS[6])?;

    Ok(scene)
}
