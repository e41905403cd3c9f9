//! Scene description types for Lumen.
//!
//! This module defines a renderer-agnostic description of everything the
//! ray tracer needs: image size, sampler, camera, lights, materials and
//! shapes. Descriptions are plain data and round-trip through JSON.
//!
//! Materials are declared once in a named table and referenced by name from
//! shapes, so several shapes can share one material instance once the
//! renderer builds its world.

use std::collections::HashSet;
use std::path::Path;

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Errors that can occur while loading or validating a scene description.
#[derive(Error, Debug)]
pub enum SceneError {
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    #[error("Invalid image size {width}x{height}")]
    InvalidImageSize { width: u32, height: u32 },

    #[error("Material '{0}' is declared more than once")]
    DuplicateMaterial(String),

    #[error("Shape {shape} references unknown material '{name}'")]
    UnknownMaterial { shape: usize, name: String },

    #[error("Sphere {shape} has non-positive radius {radius}")]
    InvalidRadius { shape: usize, radius: f32 },

    #[error("Shape {shape} has a zero-length normal")]
    DegenerateNormal { shape: usize },
}

/// Result type for scene operations.
pub type SceneResult<T> = Result<T, SceneError>;

/// Sample pattern used for anti-aliasing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SamplerKind {
    /// Uniform grid, one sample at the centre of each cell.
    Regular,
    /// Independent uniform random samples.
    Random,
    /// Grid cells each offset by a uniform random jitter.
    #[default]
    Jitter,
}

/// Sampler configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct SamplerDesc {
    #[serde(default)]
    pub kind: SamplerKind,
    /// Requested samples per pixel
    pub samples: u32,
    /// Number of independent sample sets in the pool
    pub sets: u32,
}

impl Default for SamplerDesc {
    fn default() -> Self {
        Self {
            kind: SamplerKind::Jitter,
            samples: 4,
            sets: 83,
        }
    }
}

/// Camera configuration.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CameraDesc {
    Pinhole {
        eye: [f32; 3],
        look_at: [f32; 3],
        #[serde(default = "default_up")]
        up: [f32; 3],
        /// Distance from the eye to the view plane
        #[serde(default = "default_view_distance")]
        distance: f32,
        #[serde(default = "default_zoom")]
        zoom: f32,
    },
}

fn default_up() -> [f32; 3] {
    [0.0, 1.0, 0.0]
}

fn default_view_distance() -> f32 {
    750.0
}

fn default_zoom() -> f32 {
    1.0
}

impl Default for CameraDesc {
    fn default() -> Self {
        CameraDesc::Pinhole {
            eye: [0.0, 0.0, 500.0],
            look_at: [0.0, 0.0, 0.0],
            up: default_up(),
            distance: default_view_distance(),
            zoom: default_zoom(),
        }
    }
}

/// The ambient term applied to every shaded point.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct AmbientDesc {
    pub radiance: f32,
    #[serde(default = "white")]
    pub color: [f32; 3],
}

fn white() -> [f32; 3] {
    [1.0, 1.0, 1.0]
}

impl Default for AmbientDesc {
    fn default() -> Self {
        Self {
            radiance: 1.0,
            color: white(),
        }
    }
}

/// A light source other than the ambient term.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum LightDesc {
    Point {
        position: [f32; 3],
        radiance: f32,
        #[serde(default = "white")]
        color: [f32; 3],
    },
}

/// A named material.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MaterialDesc {
    /// Ambient plus Lambertian diffuse.
    Matte {
        name: String,
        /// Ambient reflection coefficient
        ka: f32,
        /// Diffuse reflection coefficient
        kd: f32,
        /// Diffuse color
        cd: [f32; 3],
    },
}

impl MaterialDesc {
    /// Get the material's name.
    pub fn name(&self) -> &str {
        match self {
            MaterialDesc::Matte { name, .. } => name,
        }
    }
}

/// A shape in the scene.
///
/// `color` is the shape's base color, recorded on hits. `material` names an
/// entry of [`SceneDescription::materials`]; a shape without one still
/// occludes but shades to black.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum ShapeDesc {
    Sphere {
        center: [f32; 3],
        radius: f32,
        #[serde(default)]
        color: [f32; 3],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        material: Option<String>,
    },
    Plane {
        point: [f32; 3],
        normal: [f32; 3],
        #[serde(default)]
        color: [f32; 3],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        material: Option<String>,
    },
    Triangle {
        a: [f32; 3],
        b: [f32; 3],
        c: [f32; 3],
        #[serde(default)]
        color: [f32; 3],
        #[serde(default, skip_serializing_if = "Option::is_none")]
        material: Option<String>,
    },
}

impl ShapeDesc {
    /// Name of the material this shape references, if any.
    pub fn material(&self) -> Option<&str> {
        match self {
            ShapeDesc::Sphere { material, .. }
            | ShapeDesc::Plane { material, .. }
            | ShapeDesc::Triangle { material, .. } => material.as_deref(),
        }
    }
}

/// How the renderer should schedule work.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RenderSettings {
    /// Render buckets in parallel
    #[serde(default = "default_parallel")]
    pub parallel: bool,
    /// Bucket edge length in pixels
    #[serde(default = "default_bucket_size")]
    pub bucket_size: u32,
    /// Seed for every sampler RNG; `None` seeds from entropy
    #[serde(default)]
    pub seed: Option<u64>,
}

fn default_parallel() -> bool {
    true
}

fn default_bucket_size() -> u32 {
    64
}

impl Default for RenderSettings {
    fn default() -> Self {
        Self {
            parallel: default_parallel(),
            bucket_size: default_bucket_size(),
            seed: None,
        }
    }
}

/// A complete scene description.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SceneDescription {
    #[serde(default)]
    pub name: String,
    pub width: u32,
    pub height: u32,
    /// Color contributed by samples that miss every shape
    #[serde(default)]
    pub background: [f32; 3],
    #[serde(default)]
    pub sampler: SamplerDesc,
    #[serde(default)]
    pub camera: CameraDesc,
    #[serde(default)]
    pub ambient: AmbientDesc,
    #[serde(default)]
    pub lights: Vec<LightDesc>,
    #[serde(default)]
    pub materials: Vec<MaterialDesc>,
    #[serde(default)]
    pub shapes: Vec<ShapeDesc>,
    #[serde(default)]
    pub render: RenderSettings,
}

impl SceneDescription {
    /// Create an empty scene of the given size.
    pub fn new(name: impl Into<String>, width: u32, height: u32) -> Self {
        Self {
            name: name.into(),
            width,
            height,
            background: [0.0; 3],
            sampler: SamplerDesc::default(),
            camera: CameraDesc::default(),
            ambient: AmbientDesc::default(),
            lights: Vec::new(),
            materials: Vec::new(),
            shapes: Vec::new(),
            render: RenderSettings::default(),
        }
    }

    /// Parse a scene from JSON text and validate it.
    pub fn from_json_str(json: &str) -> SceneResult<Self> {
        let scene: SceneDescription = serde_json::from_str(json)?;
        scene.validate()?;
        Ok(scene)
    }

    /// Load a scene from a JSON file and validate it.
    pub fn from_path<P: AsRef<Path>>(path: P) -> SceneResult<Self> {
        let path = path.as_ref();
        let json = std::fs::read_to_string(path)?;
        let mut scene = Self::from_json_str(&json)?;
        if scene.name.is_empty() {
            scene.name = path
                .file_stem()
                .and_then(|s| s.to_str())
                .unwrap_or("unnamed")
                .to_string();
        }
        log::info!(
            "Loaded scene '{}' from {}: {} shapes, {} lights",
            scene.name,
            path.display(),
            scene.shapes.len(),
            scene.lights.len()
        );
        Ok(scene)
    }

    /// Serialize to pretty-printed JSON.
    pub fn to_json_pretty(&self) -> SceneResult<String> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Find a material by name.
    pub fn material(&self, name: &str) -> Option<&MaterialDesc> {
        self.materials.iter().find(|m| m.name() == name)
    }

    /// Check the description for errors the renderer cannot recover from.
    pub fn validate(&self) -> SceneResult<()> {
        if self.width == 0 || self.height == 0 {
            return Err(SceneError::InvalidImageSize {
                width: self.width,
                height: self.height,
            });
        }

        let mut names = HashSet::new();
        for material in &self.materials {
            if !names.insert(material.name()) {
                return Err(SceneError::DuplicateMaterial(material.name().to_string()));
            }
        }

        for (index, shape) in self.shapes.iter().enumerate() {
            if let Some(name) = shape.material() {
                if !names.contains(name) {
                    return Err(SceneError::UnknownMaterial {
                        shape: index,
                        name: name.to_string(),
                    });
                }
            }

            match shape {
                ShapeDesc::Sphere { radius, .. } if *radius <= 0.0 => {
                    return Err(SceneError::InvalidRadius {
                        shape: index,
                        radius: *radius,
                    });
                }
                ShapeDesc::Plane { normal, .. } if *normal == [0.0; 3] => {
                    return Err(SceneError::DegenerateNormal { shape: index });
                }
                _ => {}
            }
        }

        Ok(())
    }

    /// The built-in demo scene: three spheres in front of two tilted
    /// planes, a small black triangle near the camera, one ambient and one
    /// point light.
    pub fn demo() -> Self {
        let mut scene = Self::new("demo", 600, 600);
        scene.sampler = SamplerDesc {
            kind: SamplerKind::Jitter,
            samples: 4,
            sets: 83,
        };
        scene.camera = CameraDesc::Pinhole {
            eye: [0.0, 0.0, 1.0],
            look_at: [0.0, 0.0, 0.0],
            up: default_up(),
            distance: default_view_distance(),
            zoom: default_zoom(),
        };
        scene.ambient = AmbientDesc {
            radiance: 1.5,
            color: white(),
        };
        scene.lights.push(LightDesc::Point {
            position: [-300.0, 150.0, 150.0],
            radiance: 1.5,
            color: white(),
        });

        let matte = |name: &str, cd: [f32; 3]| MaterialDesc::Matte {
            name: name.to_string(),
            ka: 25.0,
            kd: 65.0,
            cd,
        };
        scene.materials = vec![
            matte("red", [1.0, 0.0, 0.0]),
            matte("blue", [0.0, 0.0, 1.0]),
            matte("green", [0.0, 1.0, 0.0]),
            matte("white", [1.0, 1.0, 1.0]),
            matte("black", [0.0, 0.0, 0.0]),
        ];

        scene.shapes = vec![
            ShapeDesc::Sphere {
                center: [0.0, 0.0, -600.0],
                radius: 128.0,
                color: [1.0, 0.0, 0.0],
                material: Some("red".into()),
            },
            ShapeDesc::Sphere {
                center: [128.0, 32.0, -700.0],
                radius: 64.0,
                color: [0.0, 0.0, 1.0],
                material: Some("blue".into()),
            },
            ShapeDesc::Sphere {
                center: [-128.0, 32.0, -700.0],
                radius: 64.0,
                color: [0.0, 1.0, 0.0],
                material: Some("green".into()),
            },
            ShapeDesc::Plane {
                point: [0.0, 0.0, -800.0],
                normal: [0.0, 2.0, 1.0],
                color: [0.2, 0.2, 0.2],
                material: Some("white".into()),
            },
            ShapeDesc::Plane {
                point: [0.0, 0.0, -800.0],
                normal: [0.0, -2.0, 1.0],
                color: [0.1, 0.1, 0.1],
                material: Some("white".into()),
            },
            ShapeDesc::Triangle {
                a: [-50.0, 0.0, -200.0],
                b: [50.0, 0.0, -200.0],
                c: [0.0, 50.0, -200.0],
                color: [0.0, 0.0, 0.0],
                material: Some("black".into()),
            },
        ];

        scene
    }
}
