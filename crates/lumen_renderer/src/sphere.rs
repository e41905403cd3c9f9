//! Sphere primitive for ray tracing.

use std::sync::Arc;

use crate::{
    hittable::{Hittable, Surface},
    tolerance::SPHERE_T_RANGE,
    Color, Material, Ray,
};
use lumen_math::Vec3;

/// A sphere primitive.
#[derive(Clone)]
pub struct Sphere {
    center: Vec3,
    radius: f32,
    radius_sq: f32,
    pub(crate) surface: Surface,
}

impl Sphere {
    /// Create a new black sphere with no material.
    pub fn new(center: Vec3, radius: f32) -> Self {
        Self {
            center,
            radius,
            radius_sq: radius * radius,
            surface: Surface::default(),
        }
    }

    /// Set the base color.
    pub fn with_color(mut self, color: Color) -> Self {
        self.surface.color = color;
        self
    }

    /// Set the material.
    pub fn with_material(mut self, material: Arc<Material>) -> Self {
        self.surface.material = Some(material);
        self
    }

    pub fn center(&self) -> Vec3 {
        self.center
    }

    pub fn radius(&self) -> f32 {
        self.radius
    }
}

impl Hittable for Sphere {
    /// Solves `a t² + b t + c = 0` and returns the nearest root at or beyond
    /// the sphere epsilon, trying the far root when the near one is behind.
    fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let oc = ray.origin() - self.center;
        let a = ray.direction().dot(ray.direction());
        let b = 2.0 * ray.direction().dot(oc);
        let c = oc.dot(oc) - self.radius_sq;

        let discriminant = b * b - 4.0 * a * c;
        if discriminant < 0.0 {
            return None;
        }

        let e = discriminant.sqrt();
        let denom = 2.0 * a;

        let near = (-b - e) / denom;
        if SPHERE_T_RANGE.contains(near) {
            return Some(near);
        }

        let far = (-b + e) / denom;
        if SPHERE_T_RANGE.contains(far) {
            return Some(far);
        }

        None
    }

    fn normal_at(&self, ray: &Ray, t: f32) -> Vec3 {
        (ray.at(t) - self.center) / self.radius
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
