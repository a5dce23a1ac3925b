//! Light transport.
//!
//! Two integrators share the [`Integrator`] trait:
//!
//! - [`Constant`]: albedo plus emission of the closest hit, for previews
//! - [`PathTracer`]: diffuse path tracing with next-event estimation

use std::fmt;
use std::str::FromStr;

use lucid_geometry::{Intersection, PrimitiveSet, Sampleable};
use lucid_math::consts::FRAC_1_PI;
use lucid_math::sampling::square_to_cosine_hemisphere;
use lucid_math::{Interval, Normal3, Point3, Ray, Real, Vec2};
use lucid_scene::Scene;
use rand::{Rng, RngCore};
use serde::{Deserialize, Serialize};

use crate::Color;

/// Bounce count after which Russian roulette may end a path.
const ROULETTE_DEPTH: u32 = 3;

/// Estimates the radiance arriving along a camera ray.
pub trait Integrator: Send + Sync {
    fn radiance(&self, scene: &Scene, ray: &Ray, rng: &mut dyn RngCore) -> Color;
}

/// Which integrator a render uses.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum IntegratorKind {
    Constant,
    #[default]
    PathTracer,
}

impl fmt::Display for IntegratorKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            IntegratorKind::Constant => write!(f, "constant"),
            IntegratorKind::PathTracer => write!(f, "path_tracer"),
        }
    }
}

impl FromStr for IntegratorKind {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s {
            "constant" => Ok(IntegratorKind::Constant),
            "path_tracer" | "path" => Ok(IntegratorKind::PathTracer),
            other => Err(format!("unknown integrator '{other}' (expected constant or path_tracer)")),
        }
    }
}

/// Closest hit shading: albedo plus emission, black on a miss.
#[derive(Debug, Clone, Copy, Default)]
pub struct Constant;

impl Integrator for Constant {
    fn radiance(&self, scene: &Scene, ray: &Ray, _rng: &mut dyn RngCore) -> Color {
        scene
            .traverse(ray, Interval::FORWARD)
            .and_then(|(index, _)| scene.material(index))
            .map_or(Color::ZERO, |m| m.albedo + m.emission)
    }
}

/// Diffuse path tracer.
///
/// At every vertex one light is picked uniformly and area sampled; the shadow
/// ray is tested with an occlusion query bounded to the light distance.
/// Bounces are cosine weighted. Emission found by a bounce is only counted
/// for emitters that cannot be sampled, so direct light is never counted
/// twice.
#[derive(Debug, Clone)]
pub struct PathTracer {
    pub max_depth: u32,
    /// Offset along the normal for secondary ray origins
    pub bias: Real,
    lights: Vec<usize>,
}

impl PathTracer {
    pub fn new(scene: &Scene, max_depth: u32, bias: Real) -> Self {
        Self {
            max_depth,
            bias,
            lights: scene.lights(),
        }
    }

    /// Radiance from one uniformly chosen light arriving at `p` with shading
    /// normal `n`, before the surface albedo is applied.
    fn direct(&self, scene: &Scene, p: Point3, n: Normal3, rng: &mut dyn RngCore) -> Color {
        if self.lights.is_empty() {
            return Color::ZERO;
        }

        let light = self.lights[rng.gen_range(0..self.lights.len())];
        let (Some(prim), Some(material)) = (scene.primitive(light), scene.material(light)) else {
            return Color::ZERO;
        };

        let origin = p + n * self.bias;
        let target = prim.sample_with(rng);
        let (shadow, distance) = Ray::between(origin, target);
        if distance <= 2.0 * self.bias {
            return Color::ZERO;
        }

        let cos_surface = n.dot(shadow.direction.to_vec3());
        if cos_surface <= 0.0 {
            return Color::ZERO;
        }

        let hit = Intersection::at(distance, Vec2::ZERO);
        let Some(light_normal) = scene.normal_at(light, &shadow, &hit) else {
            return Color::ZERO;
        };
        let cos_light = light_normal.dot(shadow.direction.to_vec3()).abs();

        if scene.occlusion(&shadow, Interval::new(0.0, distance - self.bias)) {
            return Color::ZERO;
        }

        // Area pdf 1 / area, converted to solid angle; one of n lights chosen
        let geometry = cos_surface * cos_light / (distance * distance);
        material.emission * (geometry * prim.area() * self.lights.len() as Real)
    }
}

impl Integrator for PathTracer {
    fn radiance(&self, scene: &Scene, ray: &Ray, rng: &mut dyn RngCore) -> Color {
        let mut ray = *ray;
        let mut throughput = Color::ONE;
        let mut radiance = Color::ZERO;

        for depth in 0..self.max_depth {
            let Some((index, isect)) = scene.traverse(&ray, Interval::FORWARD) else {
                break;
            };
            let (Some(material), Some(n)) = (scene.material(index), scene.normal_at(index, &ray, &isect)) else {
                break;
            };

            if material.is_emissive() && (depth == 0 || !self.lights.contains(&index)) {
                radiance += throughput * material.emission;
            }
            if material.is_black() {
                break;
            }

            let p = isect.point(&ray);
            let n = n.face_forward(ray.direction.to_vec3());
            let brdf = material.albedo * FRAC_1_PI;
            radiance += throughput * brdf * self.direct(scene, p, n, rng);

            // Cosine sampling cancels cos / pdf against the 1/pi of the BRDF
            let local = square_to_cosine_hemisphere(Vec2::new(rng.gen(), rng.gen()));
            let direction = n.basis_matrix() * local;
            throughput *= material.albedo;

            if depth + 1 >= ROULETTE_DEPTH {
                let survive = throughput.max_element().min(0.95);
                if survive <= 0.0 || rng.gen::<Real>() >= survive {
                    break;
                }
                throughput /= survive;
            }

            ray = Ray::new(p + n * self.bias, direction);
        }

        radiance
    }
}

/// Build the integrator a render asks for.
pub fn make_integrator(kind: IntegratorKind, scene: &Scene, max_depth: u32, bias: Real) -> Box<dyn Integrator> {
    match kind {
        IntegratorKind::Constant => Box::new(Constant),
        IntegratorKind::PathTracer => Box::new(PathTracer::new(scene, max_depth, bias)),
    }
}
