//! Triangle primitive for ray tracing.
//!
//! Intersects the triangle's supporting plane first, then keeps the hit only
//! if the point lies strictly inside all three edges.

use std::sync::Arc;

use crate::{
    hittable::{Hittable, Surface},
    tolerance::{PARALLEL_EPSILON, PLANAR_T_RANGE},
    Color, Material, Ray,
};
use lumen_math::Vec3;

/// A triangle primitive.
#[derive(Clone)]
pub struct Triangle {
    /// Vertices
    a: Vec3,
    b: Vec3,
    c: Vec3,
    /// `(a - b) x (a - c)`, unnormalized; only its direction matters for
    /// the plane and edge tests
    plane_normal: Vec3,
    /// Unit normal used for shading
    shading_normal: Vec3,
    pub(crate) surface: Surface,
}

impl Triangle {
    /// Create a new triangle from three vertices.
    ///
    /// The front face is the one from which `a`, `b`, `c` appear
    /// counter-clockwise.
    pub fn new(a: Vec3, b: Vec3, c: Vec3) -> Self {
        let plane_normal = (a - b).cross(a - c);
        let shading_normal = plane_normal.normalize_or_zero();
        if shading_normal == Vec3::ZERO {
            log::warn!("Degenerate triangle {:?} {:?} {:?} will never be hit", a, b, c);
        }

        Self {
            a,
            b,
            c,
            plane_normal,
            shading_normal,
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

    /// Unit face normal.
    pub fn normal(&self) -> Vec3 {
        self.shading_normal
    }

    /// Edge-sign containment test for a point already on the triangle's
    /// plane. Points on an edge or its extension are outside.
    pub fn contains_point(&self, p: Vec3) -> bool {
        let edges = [
            (self.b - self.a, p - self.a),
            (self.c - self.b, p - self.b),
            (self.a - self.c, p - self.c),
        ];

        edges
            .iter()
            .all(|(edge, to_point)| self.plane_normal.dot(edge.cross(*to_point)) > 0.0)
    }
}

impl Hittable for Triangle {
    fn intersect_ray(&self, ray: &Ray) -> Option<f32> {
        let denom = self.plane_normal.dot(ray.direction());

        // Ray is parallel to the triangle
        if denom.abs() <= PARALLEL_EPSILON {
            return None;
        }

        let t = (self.a - ray.origin()).dot(self.plane_normal) / denom;
        if !PLANAR_T_RANGE.contains(t) {
            return None;
        }

        self.contains_point(ray.at(t)).then_some(t)
    }

    fn normal_at(&self, _ray: &Ray, _t: f32) -> Vec3 {
        self.shading_normal
    }

    fn surface(&self) -> &Surface {
        &self.surface
    }
}
