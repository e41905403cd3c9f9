//! Lumen Core - Scene description and image output.
//!
//! This crate provides:
//!
//! - **Scene description**: serde types describing shapes, materials,
//!   lights, the camera and the sampler, plus the built-in demo scene
//! - **Image output**: quantizing a rendered color buffer and writing it
//!   as a bitmap
//!
//! # Example
//!
//! ```ignore
//! use lumen_core::scene::SceneDescription;
//!
//! let scene = SceneDescription::from_path("scene.json")?;
//! println!("{} shapes, {} lights", scene.shapes.len(), scene.lights.len());
//! ```

pub mod image_io;
pub mod scene;

// Re-export commonly used types
pub use image_io::{color_to_rgb8, save_bmp, ImageIoError};
pub use scene::{
    AmbientDesc, CameraDesc, LightDesc, MaterialDesc, RenderSettings, SamplerDesc, SamplerKind,
    SceneDescription, SceneError, ShapeDesc,
};
