//! Core Whitted-style render loop.
//!
//! For every pixel the camera casts one ray per sampler sample, every shape
//! is tested, the closest hit is shaded by its material, and the samples are
//! averaged. A final pass divides each channel by the largest value seen in
//! that channel (never by less than 1.0) so the image fits in `[0, 1]`.

use std::time::Instant;

use crate::bucket::render_scene_parallel;
use crate::{Camera, CameraModel, Color, Sampler, ShadeRec, Shader, World};
use lumen_core::RenderSettings;
use lumen_math::{Point2, Ray};

/// Render configuration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RenderConfig {
    /// Render buckets on the rayon thread pool
    pub parallel: bool,
    /// Bucket edge length in pixels (parallel rendering only)
    pub bucket_size: u32,
    /// Reseed the sampler cursor before rendering; `None` keeps it as is
    pub seed: Option<u64>,
}

impl Default for RenderConfig {
    fn default() -> Self {
        Self {
            parallel: true,
            bucket_size: crate::DEFAULT_BUCKET_SIZE,
            seed: None,
        }
    }
}

impl From<&RenderSettings> for RenderConfig {
    fn from(settings: &RenderSettings) -> Self {
        Self {
            parallel: settings.parallel,
            bucket_size: settings.bucket_size,
            seed: settings.seed,
        }
    }
}

/// Color seen along a single ray.
///
/// Misses return the world's background. A hit on a shape without a
/// material is black.
pub fn trace_sample(world: &World, ray: &Ray) -> Color {
    let mut rec = ShadeRec::new(world);

    if !world.hit_objects(ray, &mut rec) {
        return world.background;
    }

    match rec.material {
        Some(material) => material.shade(&rec),
        None => Color::ZERO,
    }
}

/// View-plane position of a sample inside pixel (`column`, `row`).
///
/// Coordinates are in pixel units centred on the image; row 0 is at the
/// bottom.
#[inline]
pub fn view_plane_point(column: u32, row: u32, width: u32, height: u32, sample: Point2) -> Point2 {
    Point2::new(
        column as f32 - 0.5 * width as f32 + sample.x,
        row as f32 - 0.5 * height as f32 + sample.y,
    )
}

/// Render a single pixel, averaging one ray per sampler sample.
pub fn render_pixel(
    camera: &Camera,
    world: &World,
    sampler: &mut Sampler,
    column: u32,
    row: u32,
) -> Color {
    let num_samples = sampler.num_samples();
    let mut pixel_color = Color::ZERO;

    for _ in 0..num_samples {
        let sample = sampler.sample_unit_square();
        let point = view_plane_point(column, row, world.width, world.height, sample);
        let ray = camera.primary_ray(point);
        pixel_color += trace_sample(world, &ray);
    }

    pixel_color / num_samples as f32
}

/// Render every pixel in row-major order on the current thread.
pub fn render_sequential(camera: &Camera, world: &World, sampler: &mut Sampler) -> Vec<Color> {
    let mut image = Vec::with_capacity(world.width as usize * world.height as usize);

    for row in 0..world.height {
        for column in 0..world.width {
            image.push(render_pixel(camera, world, sampler, column, row));
        }
    }

    image
}

/// Divide every pixel by the per-channel maximum of the image.
///
/// Each divisor starts at 1.0, so an image already within `[0, 1]` is left
/// untouched. Returns the divisors used.
pub fn tone_map(pixels: &mut [Color]) -> Color {
    let max = pixels.iter().fold(Color::ONE, |max, pixel| max.max(*pixel));

    for pixel in pixels.iter_mut() {
        *pixel /= max;
    }

    max
}

/// Render `world` through `camera` and store the tone-mapped result in
/// `world.image`.
pub fn render_scene(camera: &Camera, world: &mut World, config: &RenderConfig) {
    let start = Instant::now();
    log::info!(
        "Rendering {}x{} @ {} spp, {} shapes, {} lights ({})",
        world.width,
        world.height,
        world.sampler.num_samples(),
        world.scene.len(),
        world.lights.len(),
        if config.parallel { "parallel" } else { "sequential" }
    );

    let mut image = if config.parallel {
        render_scene_parallel(camera, world, config)
    } else {
        let mut sampler = match config.seed {
            Some(seed) => world.sampler.reseeded(seed),
            None => world.sampler.clone(),
        };
        let image = render_sequential(camera, world, &mut sampler);
        world.sampler = sampler;
        image
    };

    let divisors = tone_map(&mut image);
    log::debug!("Tone-mapping divisors: {:?}", divisors);

    world.image = image;
    log::info!("Rendered in {:?}", start.elapsed());
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Ambient, Material, Matte, Pinhole, PointLight, SamplerKind, Sphere, Triangle};
    use lumen_core::SceneDescription;
    use lumen_math::Vec3;
    use std::sync::Arc;

    fn camera_looking_down_z() -> Camera {
        let mut pinhole = Pinhole::new();
        pinhole.set_eye(Vec3::ZERO);
        pinhole.set_look_at(Vec3::new(0.0, 0.0, -600.0));
        pinhole.compute_uvw();
        Camera::from(pinhole)
    }

    fn red_sphere_world(size: u32) -> World {
        let mut world = World::new(size, size, Sampler::with_seed(SamplerKind::Regular, 4, 1, 7));
        world.set_ambient(Ambient::new(1.5, Color::ONE));

        let red = Arc::new(Material::from(Matte::new(1.0, 1.0, Color::X)));
        world.add_shape(
            Sphere::new(Vec3::new(0.0, 0.0, -600.0), 128.0)
                .with_color(Color::X)
                .with_material(red),
        );
        world
    }

    #[test]
    fn test_miss_returns_background() {
        let mut world = red_sphere_world(10);
        let away = Ray::new(Vec3::ZERO, Vec3::Z);
        assert_eq!(trace_sample(&world, &away), Color::ZERO);

        world.background = Color::new(0.1, 0.2, 0.3);
        assert_eq!(trace_sample(&world, &away), Color::new(0.1, 0.2, 0.3));
    }

    #[test]
    fn test_hit_without_material_is_black() {
        let mut world = World::new(1, 1, Sampler::with_seed(SamplerKind::Regular, 1, 1, 0));
        world.background = Color::ONE;
        world.add_shape(Sphere::new(Vec3::new(0.0, 0.0, -10.0), 1.0).with_color(Color::ONE));

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(trace_sample(&world, &ray), Color::ZERO);
    }

    #[test]
    fn test_closest_shape_is_shaded() {
        let mut world = red_sphere_world(10);
        let blue = Arc::new(Material::from(Matte::new(1.0, 1.0, Color::Z)));
        // Blue triangle in front of the red sphere
        world.add_shape(
            Triangle::new(
                Vec3::new(-50.0, -50.0, -200.0),
                Vec3::new(50.0, -50.0, -200.0),
                Vec3::new(0.0, 50.0, -200.0),
            )
            .with_material(blue),
        );

        let ray = Ray::new(Vec3::ZERO, Vec3::new(0.0, 0.0, -1.0));
        assert_eq!(trace_sample(&world, &ray), Color::new(0.0, 0.0, 1.5));
    }

    #[test]
    fn test_view_plane_point() {
        let p = view_plane_point(0, 0, 600, 600, Point2::new(0.5, 0.5));
        assert_eq!(p, Point2::new(-299.5, -299.5));

        let p = view_plane_point(300, 300, 600, 600, Point2::ZERO);
        assert_eq!(p, Point2::ZERO);
    }

    #[test]
    fn test_render_pixel_averages_samples() {
        let world = red_sphere_world(600);
        let camera = camera_looking_down_z();
        let mut sampler = world.sampler.clone();

        let center = render_pixel(&camera, &world, &mut sampler, 300, 300);
        assert_eq!(center, Color::new(1.5, 0.0, 0.0));

        let corner = render_pixel(&camera, &world, &mut sampler, 0, 0);
        assert_eq!(corner, Color::ZERO);
    }

    #[test]
    fn test_tone_map_in_range_is_noop() {
        let mut pixels = vec![Color::new(0.2, 1.0, 0.0), Color::new(0.9, 0.5, 0.3)];
        let original = pixels.clone();

        let divisors = tone_map(&mut pixels);
        assert_eq!(divisors, Color::ONE);
        assert_eq!(pixels, original);
    }

    #[test]
    fn test_tone_map_scales_each_channel() {
        let mut pixels = vec![
            Color::new(3.0, 0.5, 2.0),
            Color::new(1.5, 0.25, 8.0),
            Color::new(0.0, 0.0, 4.0),
        ];

        let divisors = tone_map(&mut pixels);
        assert_eq!(divisors, Color::new(3.0, 1.0, 8.0));

        let max = pixels.iter().fold(Color::ZERO, |m, p| m.max(*p));
        assert_eq!(max.x, 1.0);
        assert_eq!(max.z, 1.0);
        assert_eq!(max.y, 0.5);
        assert_eq!(pixels[1], Color::new(0.5, 0.25, 1.0));
    }

    #[test]
    fn test_tone_map_empty_image() {
        let mut pixels: Vec<Color> = Vec::new();
        assert_eq!(tone_map(&mut pixels), Color::ONE);
    }

    #[test]
    fn test_sphere_silhouette_end_to_end() {
        let mut world = red_sphere_world(600);
        let camera = camera_looking_down_z();
        let config = RenderConfig {
            parallel: false,
            ..RenderConfig::default()
        };

        camera.render_scene(&mut world, &config);
        assert_eq!(world.image.len(), 600 * 600);

        // Projected radius is 750 * 128 / sqrt(600² - 128²) ≈ 163.8 pixels.
        for row in 0..600u32 {
            for column in 0..600u32 {
                let dx = column as f32 + 0.5 - 300.0;
                let dy = row as f32 + 0.5 - 300.0;
                let r = (dx * dx + dy * dy).sqrt();
                let pixel = world.image[(row * 600 + column) as usize];

                assert_eq!(pixel.y, 0.0);
                assert_eq!(pixel.z, 0.0);
                if r < 160.0 {
                    assert_eq!(pixel, Color::X, "pixel ({column}, {row}) inside the disc");
                } else if r > 168.0 {
                    assert_eq!(pixel, Color::ZERO, "pixel ({column}, {row}) outside the disc");
                }
            }
        }

        let max_red = world.image.iter().fold(0.0f32, |m, p| m.max(p.x));
        assert_eq!(max_red, 1.0);
    }

    #[test]
    fn test_point_light_shades_lit_side_brighter() {
        let mut world = red_sphere_world(64);
        world.set_ambient(Ambient::new(0.0, Color::ONE));
        world.add_light(PointLight::new(Vec3::new(-1000.0, 0.0, -600.0), 1.0, Color::ONE));

        let lit = trace_sample(&world, &Ray::new(Vec3::ZERO, Vec3::new(-100.0, 0.0, -600.0).normalize()));
        let dark = trace_sample(&world, &Ray::new(Vec3::ZERO, Vec3::new(100.0, 0.0, -600.0).normalize()));

        assert!(lit.x > 0.0);
        assert_eq!(dark, Color::ZERO);
    }

    #[test]
    fn test_sequential_render_is_reproducible_with_seed() {
        let desc = SceneDescription::demo();
        let camera = Camera::from_description(&desc.camera);
        let config = RenderConfig {
            parallel: false,
            bucket_size: 16,
            seed: Some(99),
        };

        let mut small = desc.clone();
        small.width = 48;
        small.height = 48;
        small.render.seed = Some(1);

        let mut first = World::from_description(&small).unwrap();
        let mut second = World::from_description(&small).unwrap();
        camera.render_scene(&mut first, &config);
        camera.render_scene(&mut second, &config);

        assert_eq!(first.image, second.image);
        assert!(first.image.iter().all(|p| p.max_element() <= 1.0 && p.min_element() >= 0.0));
    }
}
