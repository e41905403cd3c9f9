//! Bucket-based tile rendering.
//!
//! Divides the image into tiles (buckets) that are rendered independently
//! on the rayon thread pool. Each bucket draws from its own copy of the
//! world's sampler, reseeded from the bucket's position, so a seeded render
//! is reproducible whatever order the threads run in.

use rayon::prelude::*;

use crate::renderer::render_pixel;
use crate::{Camera, Color, RenderConfig, Sampler, World};

/// A rectangular region of the image to render.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Bucket {
    /// Column of the bucket's first pixel
    pub x: u32,
    /// Row of the bucket's first pixel
    pub y: u32,
    /// Width of the bucket in pixels
    pub width: u32,
    /// Height of the bucket in pixels
    pub height: u32,
    /// Index of this bucket in the render order
    pub index: usize,
}

impl Bucket {
    /// Create a new bucket.
    pub fn new(x: u32, y: u32, width: u32, height: u32, index: usize) -> Self {
        Self {
            x,
            y,
            width,
            height,
            index,
        }
    }

    /// Get the total number of pixels in this bucket.
    pub fn pixel_count(&self) -> u32 {
        self.width * self.height
    }

    /// Seed for this bucket's sampler, derived from its position only.
    fn sampler_seed(&self, base: u64) -> u64 {
        base ^ (((self.y as u64) << 32) | self.x as u64).wrapping_mul(0x9E37_79B9_7F4A_7C15)
    }
}

/// Default bucket size in pixels.
pub const DEFAULT_BUCKET_SIZE: u32 = 64;

/// Generate buckets covering the image, sorted centre-outward.
pub fn generate_buckets(width: u32, height: u32, bucket_size: u32) -> Vec<Bucket> {
    let bucket_size = bucket_size.max(1);
    let mut buckets = Vec::new();

    for y in (0..height).step_by(bucket_size as usize) {
        for x in (0..width).step_by(bucket_size as usize) {
            let bw = bucket_size.min(width - x);
            let bh = bucket_size.min(height - y);
            buckets.push(Bucket::new(x, y, bw, bh, buckets.len()));
        }
    }

    sort_spiral(&mut buckets, width, height);

    // Update indices after sorting
    for (i, bucket) in buckets.iter_mut().enumerate() {
        bucket.index = i;
    }

    buckets
}

/// Sort buckets by distance from the image centre.
fn sort_spiral(buckets: &mut [Bucket], width: u32, height: u32) {
    let center_x = width as f32 / 2.0;
    let center_y = height as f32 / 2.0;

    let distance_sq = |b: &Bucket| {
        let bx = b.x as f32 + b.width as f32 / 2.0;
        let by = b.y as f32 + b.height as f32 / 2.0;
        (bx - center_x).powi(2) + (by - center_y).powi(2)
    };

    buckets.sort_by(|a, b| distance_sq(a).total_cmp(&distance_sq(b)));
}

/// Render a single bucket to a vector of colors.
///
/// Returns pixels in row-major order within the bucket.
pub fn render_bucket(
    bucket: &Bucket,
    camera: &Camera,
    world: &World,
    sampler: &mut Sampler,
) -> Vec<Color> {
    let mut pixels = Vec::with_capacity(bucket.pixel_count() as usize);

    for local_y in 0..bucket.height {
        for local_x in 0..bucket.width {
            let column = bucket.x + local_x;
            let row = bucket.y + local_y;
            pixels.push(render_pixel(camera, world, sampler, column, row));
        }
    }

    pixels
}

/// Result of rendering a bucket.
#[derive(Debug, Clone)]
pub struct BucketResult {
    /// The bucket that was rendered
    pub bucket: Bucket,
    /// Pixel colors in row-major order
    pub pixels: Vec<Color>,
}

impl BucketResult {
    /// Create a new bucket result.
    pub fn new(bucket: Bucket, pixels: Vec<Color>) -> Self {
        Self { bucket, pixels }
    }

    /// Copy this bucket's pixels into a full-image buffer of width `image_width`.
    pub fn write_into(&self, image: &mut [Color], image_width: u32) {
        let bucket = &self.bucket;
        for (local_y, row) in self.pixels.chunks(bucket.width as usize).enumerate() {
            let start = (bucket.y as usize + local_y) * image_width as usize + bucket.x as usize;
            image[start..start + row.len()].copy_from_slice(row);
        }
    }
}

/// Render every bucket in parallel and assemble the (not yet tone-mapped)
/// image in render order.
pub fn render_scene_parallel(camera: &Camera, world: &World, config: &RenderConfig) -> Vec<Color> {
    let buckets = generate_buckets(world.width, world.height, config.bucket_size);
    let base_seed = config.seed.unwrap_or_else(rand::random);

    log::debug!(
        "Rendering {} buckets of up to {}px on {} threads",
        buckets.len(),
        config.bucket_size,
        rayon::current_num_threads()
    );

    let results: Vec<BucketResult> = buckets
        .par_iter()
        .map(|bucket| {
            let mut sampler = world.sampler.reseeded(bucket.sampler_seed(base_seed));
            let pixels = render_bucket(bucket, camera, world, &mut sampler);
            log::trace!("Bucket {} at ({}, {}) done", bucket.index, bucket.x, bucket.y);
            BucketResult::new(*bucket, pixels)
        })
        .collect();

    let mut image = vec![Color::ZERO; world.width as usize * world.height as usize];
    for result in &results {
        result.write_into(&mut image, world.width);
    }

    image
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::renderer::render_sequential;
    use crate::{Ambient, Material, Matte, Pinhole, SamplerKind, Sphere};
    use lumen_core::SceneDescription;
    use lumen_math::Vec3;
    use std::sync::Arc;

    #[test]
    fn test_generate_buckets_exact_fit() {
        let buckets = generate_buckets(128, 128, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid

        // Total pixels should equal image size
        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 128 * 128);
    }

    #[test]
    fn test_generate_buckets_partial_fit() {
        let buckets = generate_buckets(100, 70, 64);
        assert_eq!(buckets.len(), 4); // 2x2 grid with partial buckets

        let total_pixels: u32 = buckets.iter().map(|b| b.pixel_count()).sum();
        assert_eq!(total_pixels, 100 * 70);
    }

    #[test]
    fn test_spiral_order() {
        let buckets = generate_buckets(192, 192, 64);
        assert_eq!(buckets.len(), 9); // 3x3 grid

        // First bucket should be the center one
        let first = &buckets[0];
        assert_eq!((first.x, first.y), (64, 64));
        assert!(buckets.iter().enumerate().all(|(i, b)| b.index == i));
    }

    #[test]
    fn test_zero_bucket_size_is_clamped() {
        let buckets = generate_buckets(3, 2, 0);
        assert_eq!(buckets.len(), 6);
    }

    #[test]
    fn test_write_into_places_rows() {
        let bucket = Bucket::new(1, 1, 2, 2, 0);
        let result = BucketResult::new(
            bucket,
            vec![Color::X, Color::Y, Color::Z, Color::ONE],
        );
        let mut image = vec![Color::ZERO; 4 * 3];

        result.write_into(&mut image, 4);

        assert_eq!(image[5], Color::X);
        assert_eq!(image[6], Color::Y);
        assert_eq!(image[9], Color::Z);
        assert_eq!(image[10], Color::ONE);
        assert_eq!(image[0], Color::ZERO);
    }

    #[test]
    fn test_parallel_matches_sequential_for_regular_sampler() {
        let mut world = World::new(40, 30, Sampler::with_seed(SamplerKind::Regular, 4, 3, 1));
        world.set_ambient(Ambient::new(1.0, Color::ONE));
        world.add_shape(
            Sphere::new(Vec3::new(0.0, 0.0, -600.0), 128.0)
                .with_material(Arc::new(Material::from(Matte::new(0.5, 0.5, Color::ONE)))),
        );

        let mut pinhole = Pinhole::new();
        pinhole.set_eye(Vec3::ZERO);
        pinhole.set_look_at(Vec3::new(0.0, 0.0, -1.0));
        pinhole.set_distance(50.0);
        pinhole.compute_uvw();
        let camera = Camera::from(pinhole);

        let config = RenderConfig {
            parallel: true,
            bucket_size: 16,
            seed: Some(3),
        };
        let parallel = render_scene_parallel(&camera, &world, &config);
        let mut sampler = world.sampler.clone();
        let sequential = render_sequential(&camera, &world, &mut sampler);

        assert_eq!(parallel.len(), sequential.len());
        for (a, b) in parallel.iter().zip(&sequential) {
            assert!((*a - *b).length() < 1e-5);
        }
    }

    #[test]
    fn test_seeded_parallel_render_is_deterministic() {
        let mut desc = SceneDescription::demo();
        desc.width = 64;
        desc.height = 48;
        desc.render.seed = Some(5);

        let camera = Camera::from_description(&desc.camera);
        let config = RenderConfig {
            parallel: true,
            bucket_size: 16,
            seed: Some(5),
        };

        let mut first = World::from_description(&desc).unwrap();
        let mut second = World::from_description(&desc).unwrap();
        camera.render_scene(&mut first, &config);
        camera.render_scene(&mut second, &config);

        assert_eq!(first.image.len(), 64 * 48);
        assert_eq!(first.image, second.image);
    }
}
