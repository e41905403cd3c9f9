//! Hittable trait, the per-ray trace record, and the closed set of shapes.

use std::sync::Arc;

use crate::{Color, Material, Plane, Ray, Sphere, Triangle, World};
use lumen_math::Vec3;

/// Record of the closest intersection found so far for one ray.
///
/// A fresh record is created for every sample. While the world's shapes are
/// scanned, `t` always holds the smallest hit distance seen; a shape only
/// overwrites the record when its own distance is strictly smaller.
#[derive(Clone)]
pub struct ShadeRec<'a> {
    /// Ray parameter of the closest hit (`f32::MAX` until something is hit)
    pub t: f32,
    /// Point of intersection
    pub hit_point: Vec3,
    /// Shading normal at the intersection
    pub normal: Vec3,
    /// Base color of the hit shape
    pub color: Color,
    /// The ray that produced the hit
    pub ray: Ray,
    /// Material at the intersection point, if the shape has one
    pub material: Option<&'a Material>,
    /// World the ray was cast into, for light queries during shading
    pub world: &'a World,
}

impl<'a> ShadeRec<'a> {
    /// Create an empty record for a ray cast into `world`.
    pub fn new(world: &'a World) -> Self {
        Self {
            t: f32::MAX,
            hit_point: Vec3::ZERO,
            normal: Vec3::ZERO,
            color: Color::ZERO,
            ray: Ray::default(),
            material: None,
            world,
        }
    }

    /// Whether any shape has committed a hit to this record.
    pub fn has_hit(&self) -> bool {
        self.t < f32::MAX
    }

    /// Overwrite the record with a closer hit.
    pub fn commit(
        &mut self,
        ray: &Ray,
        t: f32,
        normal: Vec3,
        color: Color,
        material: Option<&'a Material>,
    ) {
        self.t = t;
        self.hit_point = ray.at(t);
        self.normal = normal;
        self.color = color;
        self.ray = *ray;
        self.material = material;
    }
}

/// Appearance shared by every shape: a base color and an optional material.
///
/// Several shapes may hold the same material.
#[derive(Clone, Default)]
pub struct Surface {
    pub color: Color,
    pub material: Option<Arc<Material>>,
}

impl Surface {
    pub fn new(color: Color, material: Option<Arc<Material>>) -> Self {
        Self { color, material }
    }
}

/// Trait for objects that can be hit by rays.
pub trait Hittable {
    /// Ray parameter of this object's intersection with `ray`, if any.
    fn intersect_ray(&self, ray: &Ray) -> Option<f32>;

    /// Shading normal for the intersection at parameter `t`.
    fn normal_at(&self, ray: &Ray, t: f32) -> Vec3;

    /// Color and material of this object.
    fn surface(&self) -> &Surface;

    /// Test `ray` against this object and update `rec` if the hit is closer.
    ///
    /// Returns true whenever the ray intersects the object, even if the
    /// record already holds a closer hit.
    fn hit<'a>(&'a self, ray: &Ray, rec: &mut ShadeRec<'a>) -> bool {
        let Some(t) = self.intersect_ray(ray) else {
            return false;
        };

        if t < rec.t {
            let surface = self.surface();
            rec.commit(
                ray,
                t,
                self.normal_at(ray, t),
                surface.color,
                surface.material.as_deref(),
            );
        }

        true
    }
}

/// Every kind of shape the renderer supports.
#[derive(Clone)]
pub enum Shape {
    Plane(Plane),
    Triangle(Triangle),
    Sphere(Sphere),
}

impl Shape {
    fn surface_mut(&mut self) -> &mut Surface {
        match self {
            Shape::Plane(plane) => &mut plane.surface,
            Shape::Triangle(triangle) => &mut triangle.surface,
            Shape::Sphere(sphere) => &mut sphere.surface,
        }
    }

    /// Set the base color.
    pub fn set_color(&mut self, color: Color) {
        self.surface_mut().color = color;
    }

    /// Get the base color.
    pub fn color(&self) -> Color {
        self.surface().color
    }

    /// Assign a (possibly shared) material.
    pub fn set_material(&mut self, material: Arc<Material>) {
        self.surface_mut().material = Some(material);
    }

    /// Get the material, if any.
    pub fn material(&self) -> Option<&Arc<Material>> {
        self.surface().material.as_ref()
    }
}

impl Hittable for Shape {
    fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        match self {
            Shape::Plane(plane) => plane.intersect_ray(ray),
            Shape::Triangle(triangle) => triangle.intersect_ray(ray),
            Shape::Sphere(sphere) => sphere.intersect_ray(ray),
        }
    }

    fn normal_at(&self, ray: &Ray, t: f32) -> Vec3 {
        match self {
            Shape::Plane(plane) => plane.normal_at(ray, t),
            Shape::Triangle(triangle) => triangle.normal_at(ray, t),
            Shape::Sphere(sphere) => sphere.normal_at(ray, t),
        }
    }

    fn surface(&self) -> &Surface {
        match self {
            Shape::Plane(plane) => plane.surface(),
            Shape::Triangle(triangle) => triangle.surface(),
            Shape::Sphere(sphere) => sphere.surface(),
        }
    }
}

impl From<Plane> for Shape {
    fn from(plane: Plane) -> Self {
        Shape::Plane(plane)
    }
}

impl From<Triangle> for Shape {
    fn from(triangle: Triangle) -> Self {
        Shape::Triangle(triangle)
    }
}

impl From<Sphere> for Shape {
    fn from(sphere: Sphere) -> Self {
        Shape::Sphere(sphere)
    }
}
