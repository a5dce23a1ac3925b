//! Pinhole camera for primary ray generation.

use lucid_math::{Normal3, Point3, Ray, Real, Vec3};
use lucid_scene::CameraDescription;
use rand::{Rng, RngCore};

/// Camera for generating rays into the scene.
#[derive(Clone, Debug)]
pub struct Camera {
    pub image_width: u32,
    pub image_height: u32,

    center: Point3,
    pixel00_loc: Point3,
    pixel_delta_u: Vec3,
    pixel_delta_v: Vec3,
    w: Vec3,
}

impl Camera {
    /// Build a camera for a scene's placement and an image resolution.
    pub fn new(description: &CameraDescription, image_width: u32, image_height: u32) -> Self {
        let center = description.look_from;

        // Viewport on the plane one unit in front of the camera
        let h = (description.vfov.to_radians() / 2.0).tan();
        let viewport_height = 2.0 * h;
        let viewport_width = viewport_height * (image_width as Real / image_height as Real);

        // Camera basis vectors. An unusable up vector falls back to an
        // arbitrary perpendicular so rays stay finite.
        let w = (description.look_from - description.look_at)
            .try_normalize()
            .unwrap_or(Vec3::Z);
        let u = description
            .up
            .cross(w)
            .try_normalize()
            .unwrap_or_else(|| Normal3::from_vec3(w).basis().0.to_vec3());
        let v = w.cross(u);

        let viewport_u = viewport_width * u;
        let viewport_v = -viewport_height * v;

        let pixel_delta_u = viewport_u / image_width as Real;
        let pixel_delta_v = viewport_v / image_height as Real;

        let viewport_upper_left = center - w - viewport_u / 2.0 - viewport_v / 2.0;
        let pixel00_loc = viewport_upper_left + 0.5 * (pixel_delta_u + pixel_delta_v);

        Self {
            image_width,
            image_height,
            center,
            pixel00_loc,
            pixel_delta_u,
            pixel_delta_v,
            w,
        }
    }

    /// Camera position.
    pub fn center(&self) -> Point3 {
        self.center
    }

    /// Viewing direction.
    pub fn forward(&self) -> Vec3 {
        -self.w
    }

    /// Ray through a continuous position in pixel units. Integer
    /// coordinates are pixel centres.
    pub fn ray_through(&self, x: Real, y: Real) -> Ray {
        let target = self.pixel00_loc + x * self.pixel_delta_u + y * self.pixel_delta_v;
        Ray::new(self.center, target - self.center)
    }

    /// Ray for pixel (i, j) with a random offset inside the pixel.
    pub fn get_ray(&self, i: u32, j: u32, rng: &mut dyn RngCore) -> Ray {
        let dx = rng.gen::<Real>() - 0.5;
        let dy = rng.gen::<Real>() - 0.5;
        self.ray_through(i as Real + dx, j as Real + dy)
    }
}
