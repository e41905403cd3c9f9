//! Simple ray tracer example.
//!
//! Builds a small scene in code, renders it, and saves it as a BMP.

use std::sync::Arc;

use lumen_renderer::{
    Ambient, Camera, Color, Material, Matte, Pinhole, Plane, PointLight, RenderConfig, Sampler,
    SamplerKind, Sphere, Vec3, World,
};

fn main() {
    println!("Lumen Ray Tracer - Simple Example");
    println!("=================================");

    let start = std::time::Instant::now();
    let mut world = build_scene();
    println!("Scene built in {:?}", start.elapsed());

    let mut pinhole = Pinhole::new();
    pinhole.set_eye(Vec3::new(0.0, 50.0, 200.0));
    pinhole.set_look_at(Vec3::new(0.0, 0.0, -600.0));
    pinhole.compute_uvw();
    let camera = Camera::from(pinhole);

    println!(
        "Rendering {}x{} @ {} spp...",
        world.width,
        world.height,
        world.sampler.num_samples()
    );

    let start = std::time::Instant::now();
    camera.render_scene(&mut world, &RenderConfig::default());
    println!("Rendered in {:?}", start.elapsed());

    let filename = "output.bmp";
    lumen_core::save_bmp(filename, world.width, world.height, &world.image)
        .expect("Failed to save image");
    println!("Saved to {}", filename);
}

fn build_scene() -> World {
    let mut world = World::new(400, 300, Sampler::new(SamplerKind::Jitter, 16, 83));
    world.set_ambient(Ambient::new(1.0, Color::ONE));
    world.add_light(PointLight::new(Vec3::new(-300.0, 300.0, 0.0), 2.0, Color::ONE));

    let matte = |cd: Color| Arc::new(Material::from(Matte::new(0.2, 0.8, cd)));

    // Ground
    world.add_shape(
        Plane::new(Vec3::new(0.0, -100.0, 0.0), Vec3::Y).with_material(matte(Color::splat(0.5))),
    );

    world.add_shape(
        Sphere::new(Vec3::new(0.0, 0.0, -600.0), 100.0)
            .with_material(matte(Color::new(0.8, 0.2, 0.2))),
    );
    world.add_shape(
        Sphere::new(Vec3::new(-220.0, -40.0, -650.0), 60.0)
            .with_material(matte(Color::new(0.2, 0.7, 0.3))),
    );
    world.add_shape(
        Sphere::new(Vec3::new(220.0, -40.0, -650.0), 60.0)
            .with_material(matte(Color::new(0.2, 0.3, 0.8))),
    );

    println!("Created {} shapes", world.scene.len());
    world
}
