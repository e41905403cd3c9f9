//! Materials turn a trace record into a shaded color.

use crate::{Bxdf, Color, Lambertian, LightSource, ShadeRec};

/// Capability shared by all materials.
pub trait Shader {
    /// Radiance leaving the hit point in `rec` towards the ray origin.
    fn shade(&self, rec: &ShadeRec) -> Color;
}

/// Ambient plus Lambertian diffuse shading.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Matte {
    ambient_brdf: Lambertian,
    diffuse_brdf: Lambertian,
}

impl Matte {
    /// Create a matte material with ambient coefficient `ka`, diffuse
    /// coefficient `kd`, and color `cd`.
    pub fn new(ka: f32, kd: f32, cd: Color) -> Self {
        Self {
            ambient_brdf: Lambertian::new(ka, cd),
            diffuse_brdf: Lambertian::new(kd, cd),
        }
    }

    pub fn set_ka(&mut self, ka: f32) {
        self.ambient_brdf.set_kd(ka);
    }

    pub fn set_kd(&mut self, kd: f32) {
        self.diffuse_brdf.set_kd(kd);
    }

    pub fn set_cd(&mut self, cd: Color) {
        self.ambient_brdf.set_cd(cd);
        self.diffuse_brdf.set_cd(cd);
    }
}

impl Default for Matte {
    fn default() -> Self {
        Self {
            ambient_brdf: Lambertian::default(),
            diffuse_brdf: Lambertian::default(),
        }
    }
}

impl Shader for Matte {
    fn shade(&self, rec: &ShadeRec) -> Color {
        let world = rec.world;
        let wo = -rec.ray.direction();
        let mut radiance = self.ambient_brdf.rho(rec, wo) * world.ambient.radiance(rec);

        for light in &world.lights {
            let wi = light.direction(rec);
            let n_dot_wi = rec.normal.dot(wi);

            // Lights behind the surface contribute nothing
            if n_dot_wi > 0.0 {
                radiance += self.diffuse_brdf.f(rec, wo, wi) * light.radiance(rec) * n_dot_wi;
            }
        }

        radiance
    }
}

/// Every kind of material the renderer supports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Material {
    Matte(Matte),
}

impl Shader for Material {
    fn shade(&self, rec: &ShadeRec) -> Color {
        match self {
            Material::Matte(matte) => matte.shade(rec),
        }
    }
}

impl From<Matte> for Material {
    fn from(matte: Matte) -> Self {
        Material::Matte(matte)
    }
}
