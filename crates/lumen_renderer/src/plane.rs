//! Infinite plane primitive.

use std::sync::Arc;

use crate::{
    hittable::{Hittable, Surface},
    tolerance::{PARALLEL_EPSILON, PLANAR_T_RANGE},
    Color, Material, Ray,
};
use lumen_math::Vec3;

/// An infinite plane through `point` with unit normal `normal`.
#[derive(Clone)]
pub struct Plane {
    point: Vec3,
    normal: Vec3,
    pub(crate) surface: Surface,
}

impl Plane {
    /// Create a plane. The normal is normalized; a zero normal yields a
    /// plane no ray can hit.
    pub fn new(point: Vec3, normal: Vec3) -> Self {
        let unit = normal.normalize_or_zero();
        if unit == Vec3::ZERO {
            log::warn!("Plane through {:?} has a zero normal and will never be hit", point);
        }

        Self {
            point,
            normal: unit,
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

    pub fn normal(&self) -> Vec3 {
        self.normal
    }
}

impl Hittable for Plane {
    fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let denom = self.normal.dot(ray.direction());

        // Ray is parallel to the plane
        if denom.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let t = (self.point - ray.origin()).dot(self.normal) / denom;
        PLANAR_T_RANGE.contains(t).then_some(t)
    }

    fn normal_at(&self, _ray: &Ray, _t: f32) -> Vec3 {
        self.normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
