//! Lumen Renderer - Whitted-style CPU ray tracing
//!
//! Casts one primary ray per sampler sample through a pinhole camera, finds
//! the closest shape, and shades it with ambient plus direct point-light
//! illumination. No shadows, reflection, or refraction are traced.
//!
//! Buckets are rendered in parallel on rayon; a sequential path renders the
//! same pixels row by row.

pub mod tolerance;

mod hittable;
mod sphere;
mod plane;
mod triangle;
mod sampler;
mod brdf;
mod light;
mod material;
mod camera;
mod world;
mod renderer;
mod bucket;

pub use hittable::{Hittable, ShadeRec, Shape, Surface};
pub use sphere::Sphere;
pub use plane::Plane;
pub use triangle::Triangle;
pub use sampler::Sampler;
pub use brdf::{Bxdf, Lambertian};
pub use light::{Ambient, Light, LightSource, PointLight};
pub use material::{Material, Matte, Shader};
pub use camera::{Camera, CameraFrame, CameraModel, Pinhole};
pub use world::{BuildError, World};
pub use renderer::{
    render_pixel, render_scene, render_sequential, tone_map, trace_sample, view_plane_point,
    RenderConfig,
};
pub use bucket::{
    generate_buckets, render_bucket, render_scene_parallel, Bucket, BucketResult,
    DEFAULT_BUCKET_SIZE,
};

/// Re-export the scene types and color helpers the renderer is driven by
pub use lumen_core::{color_to_rgb8, SamplerKind};

/// Re-export Vec3 and common math types from lumen_math
pub use lumen_math::{Color, Interval, Point2, Ray, Vec3};
