//! Lucid Renderer - CPU Path Tracing
//!
//! A Monte Carlo path tracer over `lucid_scene` scenes. Rays are traced
//! against the scene's primitive set, shaded by an [`Integrator`], and
//! rendered in parallel buckets into an [`ImageBuffer`].

mod bucket;
mod camera;
mod integrator;
mod renderer;

pub use bucket::{generate_buckets, render_bucket, Bucket, BucketResult, DEFAULT_BUCKET_SIZE};
pub use camera::Camera;
pub use integrator::{make_integrator, Constant, Integrator, IntegratorKind, PathTracer};
pub use renderer::{
    color_to_rgba, linear_to_gamma, render, render_pixel, ImageBuffer, RenderConfig, RenderError,
};

pub use lucid_math::{Real, Vec3};

/// Linear RGB radiance.
pub type Color = Vec3;
