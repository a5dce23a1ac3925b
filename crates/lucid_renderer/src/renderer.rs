//! Render driver, configuration and output image.
//!
//! Implements:
//! - Bucketed rendering in parallel with rayon
//! - Anti-aliasing via jittered multi-sampling
//! - Gamma correction and PNG output

use std::path::Path;
use std::time::Instant;

use lucid_math::Real;
use lucid_scene::Scene;
use rand::RngCore;
use rayon::prelude::*;
use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::bucket::{generate_buckets, render_bucket, BucketResult, DEFAULT_BUCKET_SIZE};
use crate::integrator::{make_integrator, Integrator, IntegratorKind};
use crate::{Camera, Color};

/// Errors that can occur while rendering or writing an image.
#[derive(Error, Debug)]
pub enum RenderError {
    #[error("Invalid render configuration: {0}")]
    InvalidConfig(String),

    #[error("Image error: {0}")]
    Image(#[from] image::ImageError),

    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),
}

/// Render configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RenderConfig {
    /// Image width in pixels
    pub width: u32,
    /// Image height in pixels
    pub height: u32,
    /// Samples per pixel for anti-aliasing
    pub samples_per_pixel: u32,
    /// Maximum path length
    pub max_depth: u32,
    /// Offset for secondary ray origins
    pub bias: Real,
    /// Bucket edge length in pixels
    pub bucket_size: u32,
    /// Seed for the per-bucket generators
    pub seed: u64,
    pub integrator: IntegratorKind,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            width: 512,
            height: 512,
            samples_per_pixel: 64,
            max_depth: 8,
            bias: 1e-3,
            bucket_size: DEFAULT_BUCKET_SIZE,
            seed: 0,
            integrator: IntegratorKind::PathTracer,
        }
    }
}

impl RenderConfig {
    /// Check that the configuration can produce an image.
    pub fn validate(&self) -> Result<(), RenderError> {
        let positive = [
            ("width", self.width),
            ("height", self.height),
            ("samples_per_pixel", self.samples_per_pixel),
            ("bucket_size", self.bucket_size),
        ];
        if let Some((name, _)) = positive.iter().find(|(_, value)| *value == 0) {
            return Err(RenderError::InvalidConfig(format!("{name} must be positive")));
        }
        if !(self.bias.is_finite() && self.bias >= 0.0) {
            return Err(RenderError::InvalidConfig("bias must be finite and non-negative".into()));
        }
        Ok(())
    }
}

/// Apply gamma correction (gamma = 2.0).
#[inline]
pub fn linear_to_gamma(linear: Real) -> Real {
    if linear > 0.0 {
        linear.sqrt()
    } else {
        0.0
    }
}

/// Convert a color to 8-bit RGBA.
pub fn color_to_rgba(color: Color) -> [u8; 4] {
    let channel = |c: Real| (255.0 * linear_to_gamma(c).clamp(0.0, 1.0)) as u8;
    [channel(color.x), channel(color.y), channel(color.z), 255]
}

/// Render a single pixel with multi-sampling.
///
/// Non-finite samples are dropped rather than poisoning the average.
pub fn render_pixel(
    camera: &Camera,
    scene: &Scene,
    integrator: &dyn Integrator,
    x: u32,
    y: u32,
    config: &RenderConfig,
    rng: &mut dyn RngCore,
) -> Color {
    let mut pixel_color = Color::ZERO;

    for _ in 0..config.samples_per_pixel {
        let ray = camera.get_ray(x, y, rng);
        let sample = integrator.radiance(scene, &ray, rng);
        if sample.is_finite() {
            pixel_color += sample;
        }
    }

    pixel_color / config.samples_per_pixel as Real
}

/// Simple image buffer for storing render output.
#[derive(Debug, Clone, PartialEq)]
pub struct ImageBuffer {
    pub width: u32,
    pub height: u32,
    pub pixels: Vec<Color>,
}

impl ImageBuffer {
    /// Create a new image buffer filled with black.
    pub fn new(width: u32, height: u32) -> Self {
        Self {
            width,
            height,
            pixels: vec![Color::ZERO; (width * height) as usize],
        }
    }

    /// Get the pixel at (x, y).
    pub fn get(&self, x: u32, y: u32) -> Color {
        self.pixels[(y * self.width + x) as usize]
    }

    /// Set the pixel at (x, y).
    pub fn set(&mut self, x: u32, y: u32, color: Color) {
        self.pixels[(y * self.width + x) as usize] = color;
    }

    /// Copy a rendered bucket into place.
    pub fn write_bucket(&mut self, result: &BucketResult) {
        let bucket = &result.bucket;
        for (i, color) in result.pixels.iter().enumerate() {
            let local_x = i as u32 % bucket.width;
            let local_y = i as u32 / bucket.width;
            self.set(bucket.x + local_x, bucket.y + local_y, *color);
        }
    }

    /// Convert to RGBA bytes (for display or saving).
    pub fn to_rgba(&self) -> Vec<u8> {
        let mut bytes = Vec::with_capacity((self.width * self.height * 4) as usize);
        for color in &self.pixels {
            bytes.extend_from_slice(&color_to_rgba(*color));
        }
        bytes
    }

    /// Write the gamma corrected image as a PNG.
    pub fn save_png<P: AsRef<Path>>(&self, path: P) -> Result<(), RenderError> {
        let path = path.as_ref();
        image::save_buffer(path, &self.to_rgba(), self.width, self.height, image::ColorType::Rgba8)?;
        log::info!("Wrote {}x{} image to {}", self.width, self.height, path.display());
        Ok(())
    }
}

/// Render the scene to an image buffer.
///
/// Buckets render in parallel, centre first. Each bucket seeds its own
/// generator from the configured seed and its index, so the result does not
/// depend on thread scheduling.
pub fn render(scene: &Scene, config: &RenderConfig) -> Result<ImageBuffer, RenderError> {
    config.validate()?;

    let camera = Camera::new(&scene.camera, config.width, config.height);
    let integrator = make_integrator(config.integrator, scene, config.max_depth, config.bias);
    let buckets = generate_buckets(config.width, config.height, config.bucket_size);

    log::info!(
        "Rendering '{}' at {}x{}, {} spp, {} integrator, {} buckets",
        scene.name,
        config.width,
        config.height,
        config.samples_per_pixel,
        config.integrator,
        buckets.len()
    );
    let start = Instant::now();

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let pixels = render_bucket(bucket, &camera, scene, integrator.as_ref(), config);
            log::debug!("Bucket {} done ({}x{} at {},{})", bucket.index, bucket.width, bucket.height, bucket.x, bucket.y);
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = ImageBuffer::new(config.width, config.height);
    for result in &results {
        image.write_bucket(result);
    }

    log::info!("Render finished in {:.2}s", start.elapsed().as_secs_f64());
    Ok(image)
}

#[cfg(test)]
mod tests {
    use super::*;
    use lucid_math::Vec3;
    use lucid_scene::cornell_box;

    fn small_config(integrator: IntegratorKind) -> RenderConfig {
        RenderConfig {
            width: 24,
            height: 16,
            samples_per_pixel: 4,
            max_depth: 4,
            bucket_size: 8,
            seed: 7,
            integrator,
            ..Default::default()
        }
    }

    #[test]
    fn test_linear_to_gamma() {
        assert_eq!(linear_to_gamma(0.0), 0.0);
        assert!((linear_to_gamma(1.0) - 1.0).abs() < 0.0001);
        assert!((linear_to_gamma(0.25) - 0.5).abs() < 0.0001);
    }

    #[test]
    fn test_color_to_rgba() {
        assert_eq!(color_to_rgba(Vec3::ZERO), [0, 0, 0, 255]);
        assert_eq!(color_to_rgba(Vec3::splat(4.0)), [255, 255, 255, 255]);
        assert_eq!(color_to_rgba(Vec3::new(0.25, -1.0, 1.0)), [127, 0, 255, 255]);
    }

    #[test]
    fn test_config_validation() {
        assert!(RenderConfig::default().validate().is_ok());

        let config = RenderConfig { width: 0, ..Default::default() };
        assert!(matches!(config.validate(), Err(RenderError::InvalidConfig(_))));

        let config = RenderConfig { bias: -1.0, ..Default::default() };
        assert!(config.validate().is_err());

        let scene = cornell_box().unwrap();
        let config = RenderConfig { samples_per_pixel: 0, ..Default::default() };
        assert!(render(&scene, &config).is_err());
    }

    #[test]
    fn test_config_from_json() {
        let config: RenderConfig = serde_json::from_str(r#"{ "width": 64, "integrator": "constant" }"#).unwrap();
        assert_eq!(config.width, 64);
        assert_eq!(config.height, RenderConfig::default().height);
        assert_eq!(config.integrator, IntegratorKind::Constant);
    }

    #[test]
    fn test_render_constant_cornell() {
        let scene = cornell_box().unwrap();
        let image = render(&scene, &small_config(IntegratorKind::Constant)).unwrap();
        assert_eq!(image.pixels.len(), 24 * 16);

        // Just above and left of centre looks at the white back wall
        let centre = image.get(11, 7);
        assert!((centre - Vec3::ONE).length() < 1e-5);

        // Further left the red wall fills the pixel
        let left = image.get(8, 7);
        assert!((left - Vec3::new(1.0, 0.1, 0.1)).length() < 1e-5);
    }

    #[test]
    fn test_render_is_deterministic() {
        let scene = cornell_box().unwrap();
        let config = small_config(IntegratorKind::PathTracer);

        let a = render(&scene, &config).unwrap();
        let b = render(&scene, &config).unwrap();
        assert_eq!(a, b);
        assert!(a.pixels.iter().all(|c| c.is_finite() && c.min_element() >= 0.0));
        assert!(a.pixels.iter().any(|c| c.max_element() > 0.0));

        let other = render(&scene, &RenderConfig { seed: 8, ..config }).unwrap();
        assert_ne!(a, other);
    }

    #[test]
    fn test_image_buffer_roundtrip_png() {
        let mut image = ImageBuffer::new(4, 3);
        image.set(1, 2, Vec3::new(1.0, 0.0, 0.25));
        assert_eq!(image.get(1, 2), Vec3::new(1.0, 0.0, 0.25));

        let rgba = image.to_rgba();
        assert_eq!(rgba.len(), 4 * 3 * 4);
        assert_eq!(&rgba[(2 * 4 + 1) * 4..][..4], &[255, 0, 127, 255]);

        let path = std::env::temp_dir().join(format!("lucid_test_{}.png", std::process::id()));
        image.save_png(&path).unwrap();
        let loaded = image::open(&path).unwrap().to_rgba8();
        std::fs::remove_file(&path).unwrap();
        assert_eq!(loaded.dimensions(), (4, 3));
        assert_eq!(loaded.into_raw(), rgba);
    }
}
