//! The world owns everything a render needs, and receives the image.

use std::collections::HashMap;
use std::sync::Arc;

use crate::{
    Ambient, Color, Hittable, Light, Material, Matte, Plane, PointLight, Ray, Sampler, ShadeRec,
    Shape, Sphere, Triangle,
};
use lumen_core::{LightDesc, MaterialDesc, SceneDescription, SceneError, ShapeDesc};
use lumen_math::Vec3;
use thiserror::Error;

/// Errors that can occur while building a world from a description.
#[derive(Error, Debug)]
pub enum BuildError {
    #[error("Invalid scene: {0}")]
    InvalidScene(#[from] SceneError),
}

/// A complete scene plus its output buffer.
///
/// `image` is empty until a camera renders into it; afterwards it holds
/// `width * height` tone-mapped colors in render order (row 0 is the bottom
/// of the view).
pub struct World {
    pub width: u32,
    pub height: u32,
    /// Color of samples that miss every shape
    pub background: Color,
    pub sampler: Sampler,
    /// Shapes, scanned in order for every ray
    pub scene: Vec<Shape>,
    pub lights: Vec<Light>,
    pub ambient: Light,
    pub image: Vec<Color>,
}

impl World {
    /// Create an empty world with a white ambient light of radiance 1.
    pub fn new(width: u32, height: u32, sampler: Sampler) -> Self {
        Self {
            width,
            height,
            background: Color::ZERO,
            sampler,
            scene: Vec::new(),
            lights: Vec::new(),
            ambient: Light::Ambient(Ambient::default()),
            image: Vec::new(),
        }
    }

    /// Add a shape to the end of the scan list.
    pub fn add_shape(&mut self, shape: impl Into<Shape>) {
        self.scene.push(shape.into());
    }

    pub fn add_light(&mut self, light: impl Into<Light>) {
        self.lights.push(light.into());
    }

    pub fn set_ambient(&mut self, ambient: impl Into<Light>) {
        self.ambient = ambient.into();
    }

    /// Scan every shape for `ray`, leaving the closest hit in `rec`.
    ///
    /// Returns true if any shape was intersected.
    pub fn hit_objects<'a>(&'a self, ray: &Ray, rec: &mut ShadeRec<'a>) -> bool {
        let mut hit_anything = false;

        for shape in &self.scene {
            hit_anything |= shape.hit(ray, rec);
        }

        hit_anything
    }

    /// Build a world from a validated scene description.
    ///
    /// Shapes naming the same material share one `Arc<Material>`. When the
    /// description's render settings carry a seed, the sampler is seeded
    /// from it.
    pub fn from_description(desc: &SceneDescription) -> Result<Self, BuildError> {
        desc.validate()?;

        let sampler = match desc.render.seed {
            Some(seed) => Sampler::with_seed(desc.sampler.kind, desc.sampler.samples, desc.sampler.sets, seed),
            None => Sampler::new(desc.sampler.kind, desc.sampler.samples, desc.sampler.sets),
        };

        let mut world = World::new(desc.width, desc.height, sampler);
        world.background = Color::from(desc.background);
        world.set_ambient(Ambient::new(desc.ambient.radiance, Color::from(desc.ambient.color)));

        for light in &desc.lights {
            match *light {
                LightDesc::Point {
                    position,
                    radiance,
                    color,
                } => world.add_light(PointLight::new(Vec3::from(position), radiance, Color::from(color))),
            }
        }

        let materials: HashMap<&str, Arc<Material>> = desc
            .materials
            .iter()
            .map(|material| {
                let built = match *material {
                    MaterialDesc::Matte { ka, kd, cd, .. } => Matte::new(ka, kd, Color::from(cd)),
                };
                (material.name(), Arc::new(Material::from(built)))
            })
            .collect();

        for shape_desc in &desc.shapes {
            let mut shape: Shape = match *shape_desc {
                ShapeDesc::Sphere { center, radius, color, .. } => {
                    Sphere::new(Vec3::from(center), radius).with_color(Color::from(color)).into()
                }
                ShapeDesc::Plane { point, normal, color, .. } => {
                    Plane::new(Vec3::from(point), Vec3::from(normal)).with_color(Color::from(color)).into()
                }
                ShapeDesc::Triangle { a, b, c, color, .. } => {
                    Triangle::new(Vec3::from(a), Vec3::from(b), Vec3::from(c))
                        .with_color(Color::from(color))
                        .into()
                }
            };

            // Names were checked by validate()
            if let Some(material) = shape_desc.material().and_then(|name| materials.get(name)) {
                shape.set_material(Arc::clone(material));
            }

            world.add_shape(shape);
        }

        log::info!(
            "Built world '{}': {}x{}, {} shapes, {} lights, {} materials, {:?} sampler ({} spp, {} sets)",
            desc.name,
            world.width,
            world.height,
            world.scene.len(),
            world.lights.len(),
            materials.len(),
            world.sampler.kind(),
            world.sampler.num_samples(),
            world.sampler.num_sets()
        );

        Ok(world)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use lumen_core::SamplerKind;

    #[test]
    fn test_hit_objects_keeps_closest() {
        let mut world = World::new(1, 1, Sampler::with_seed(SamplerKind::Regular, 1, 1, 0));
        world.add_shape(Sphere::new(Vec3::new(0.0, 0.0, -20.0), 1.0).with_color(Color::Y));
        world.add_shape(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0).with_color(Color::X));
        world.add_shape(Plane::new(Vec3::new(0.0, 0.0, -30.0), Vec3::Z).with_color(Color::Z));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        let mut rec = ShadeRec::new(&world);

        assert!(world.hit_objects(&ray, &mut rec));
        assert_eq!(rec.color, Color::X);
        assert!((rec.t - 9.0).abs() < 1e-4);
    }

    #[test]
    fn test_hit_objects_reports_miss() {
        let mut world = World::new(1, 1, Sampler::with_seed(SamplerKind::Regular, 1, 1, 0));
        world.add_shape(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0));

        let ray = Ray::new(Vec3::ZERO, Vec3::Y);
        let mut rec = ShadeRec::new(&world);

        assert!(!world.hit_objects(&ray, &mut rec));
        assert!(!rec.has_hit());
    }

    #[test]
    fn test_from_description_shares_materials() {
        let desc = SceneDescription::demo();
        let world = World::from_description(&desc).unwrap();

        assert_eq!(world.scene.len(), 6);
        assert_eq!(world.lights.len(), 1);
        assert_eq!(world.sampler.num_samples(), 4);
        assert_eq!(world.sampler.num_sets(), 83);
        assert!(world.image.is_empty());

        // Both planes use the "white" material
        let first = world.scene[3].material().unwrap();
        let second = world.scene[4].material().unwrap();
        assert!(Arc::ptr_eq(first, second));
        assert_eq!(world.scene[3].color(), Color::splat(0.2));
    }

    #[test]
    fn test_from_description_without_material() {
        let mut desc = SceneDescription::new("bare", 8, 8);
        desc.shapes.push(ShapeDesc::Sphere {
            center: [0.0, 0.0, -10.0],
            radius: 1.0,
            color: [1.0, 1.0, 1.0],
            material: None,
        });

        let world = World::from_description(&desc).unwrap();
        assert!(world.scene[0].material().is_none());
    }

    #[test]
    fn test_from_description_rejects_invalid_scene() {
        let desc = SceneDescription::new("empty", 0, 0);
        assert!(matches!(
            World::from_description(&desc),
            Err(BuildError::InvalidScene(SceneError::InvalidImageSize { .. }))
        ));
    }
}
