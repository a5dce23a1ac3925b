//! Lucid Scene - scene description for the path tracer.
//!
//! This crate provides:
//!
//! - **Scene types**: [`Scene`], [`Material`], [`CameraDescription`], [`Transform`]
//! - **Scene files**: JSON descriptions loaded with serde ([`load_scene`])
//! - **Built-in scenes**: the Cornell box, as a runtime list or a fixed tuple
//!
//! # Example
//!
//! ```ignore
//! use lucid_scene::load_scene;
//!
//! let scene = load_scene("scenes/spheres.json")?;
//! println!("Loaded {} primitives, {} lights",
//!     scene.primitive_count(),
//!     scene.lights().len());
//! ```

pub mod cornell;
pub mod description;
mod error;
pub mod material;
pub mod scene;

pub use cornell::{cornell_box, cornell_box_geometry, CornellGeometry};
pub use description::{load_scene, load_scene_from_str, SceneDescription};
pub use error::{SceneError, SceneResult};
pub use material::Material;
pub use scene::{CameraDescription, Scene, Transform};
