//! Bidirectional reflectance distribution functions.

use std::f32::consts::PI;

use crate::{Color, ShadeRec};
use lumen_math::Vec3;

/// Local reflectance model evaluated at a shaded point.
pub trait Bxdf {
    /// Reflected radiance fraction for light arriving along `wi` and leaving
    /// along `wo`.
    fn f(&self, rec: &ShadeRec, wo: Vec3, wi: Vec3) -> Color;

    /// Bihemispherical reflectance.
    fn rho(&self, rec: &ShadeRec, wo: Vec3) -> Color;
}

/// Ideal diffuse reflection.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Lambertian {
    /// Reflection coefficient
    kd: f32,
    /// Diffuse color
    cd: Color,
}

impl Lambertian {
    pub fn new(kd: f32, cd: Color) -> Self {
        Self { kd, cd }
    }

    pub fn set_kd(&mut self, kd: f32) {
        self.kd = kd;
    }

    pub fn set_cd(&mut self, cd: Color) {
        self.cd = cd;
    }

    pub fn kd(&self) -> f32 {
        self.kd
    }

    pub fn cd(&self) -> Color {
        self.cd
    }
}

impl Default for Lambertian {
    fn default() -> Self {
        Self::new(1.0, Color::ONE)
    }
}

impl Bxdf for Lambertian {
    /// Constant in both directions: `kd * cd / π`.
    fn f(&self, _rec: &ShadeRec, _wo: Vec3, _wi: Vec3) -> Color {
        self.kd * self.cd / PI
    }

    fn rho(&self, _rec: &ShadeRec, _wo: Vec3) -> Color {
        self.kd * self.cd
    }
}
