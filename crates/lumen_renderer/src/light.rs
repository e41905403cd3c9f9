//! Light sources.
//!
//! Lights supply the direction towards them and the radiance they deliver
//! at a shaded point. No shadow rays are cast, so every light reaches every
//! point.

use crate::{Color, ShadeRec};
use lumen_math::Vec3;

/// Capabilities shared by all lights.
pub trait LightSource {
    /// Unit direction from the hit point towards the light.
    fn direction(&self, rec: &ShadeRec) -> Vec3;

    /// Incident radiance at the hit point.
    fn radiance(&self, rec: &ShadeRec) -> Color;
}

/// Constant light arriving from everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Ambient {
    color: Color,
    radiance: f32,
}

impl Ambient {
    pub fn new(radiance: f32, color: Color) -> Self {
        Self { color, radiance }
    }

    pub fn scale_radiance(&mut self, radiance: f32) {
        self.radiance = radiance;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }
}

impl Default for Ambient {
    fn default() -> Self {
        Self::new(1.0, Color::ONE)
    }
}

impl LightSource for Ambient {
    /// Ambient light has no direction.
    fn direction(&self, _rec: &ShadeRec) -> Vec3 {
        Vec3::ZERO
    }

    fn radiance(&self, _rec: &ShadeRec) -> Color {
        self.radiance * self.color
    }
}

/// A point light at a fixed position. Radiance does not fall off with
/// distance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    color: Color,
    radiance: f32,
    location: Vec3,
}

impl PointLight {
    pub fn new(location: Vec3, radiance: f32, color: Color) -> Self {
        Self {
            color,
            radiance,
            location,
        }
    }

    pub fn scale_radiance(&mut self, radiance: f32) {
        self.radiance = radiance;
    }

    pub fn set_color(&mut self, color: Color) {
        self.color = color;
    }

    pub fn set_location(&mut self, location: Vec3) {
        self.location = location;
    }

    pub fn location(&self) -> Vec3 {
        self.location
    }
}

impl Default for PointLight {
    fn default() -> Self {
        Self::new(Vec3::ZERO, 1.0, Color::ONE)
    }
}

impl LightSource for PointLight {
    fn direction(&self, rec: &ShadeRec) -> Vec3 {
        (self.location - rec.hit_point).normalize_or_zero()
    }

    fn radiance(&self, _rec: &ShadeRec) -> Color {
        self.radiance * self.color
    }
}

/// Every kind of light the renderer supports.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Light {
    Ambient(Ambient),
    Point(PointLight),
}

impl LightSource for Light {
    fn direction(&self, rec: &ShadeRec) -> Vec3 {
        match self {
            Light::Ambient(light) => light.direction(rec),
            Light::Point(light) => light.direction(rec),
        }
    }

    fn radiance(&self, rec: &ShadeRec) -> Color {
        match self {
            Light::Ambient(light) => light.radiance(rec),
            Light::Point(light) => light.radiance(rec),
        }
    }
}

impl From<Ambient> for Light {
    fn from(light: Ambient) -> Self {
        Light::Ambient(light)
    }
}

impl From<PointLight> for Light {
    fn from(light: PointLight) -> Self {
        Light::Point(light)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::{Sampler, SamplerKind, World};

    fn world() -> World {
        World::new(1, 1, Sampler::with_seed(SamplerKind::Regular, 1, 1, 0))
    }

    #[test]
    fn test_ambient_is_constant() {
        let world = world();
        let mut rec = ShadeRec::new(&world);
        let mut ambient = Ambient::default();
        ambient.scale_radiance(1.5);
        ambient.set_color(Color::new(1.0, 0.5, 0.0));

        assert_eq!(ambient.direction(&rec), Vec3::ZERO);
        assert_eq!(ambient.radiance(&rec), Color::new(1.5, 0.75, 0.0));

        rec.hit_point = Vec3::new(100.0, -3.0, 7.0);
        assert_eq!(ambient.radiance(&rec), Color::new(1.5, 0.75, 0.0));
    }

    #[test]
    fn test_point_light_direction_from_hit_point() {
        let world = world();
        let mut rec = ShadeRec::new(&world);
        rec.hit_point = Vec3::new(0.0, 0.0, -10.0);
        let light = Light::from(PointLight::new(Vec3::new(0.0, 10.0, -10.0), 2.0, Color::ONE));

        assert!((light.direction(&rec) - Vec3::Y).length() < 1e-6);
    }

    #[test]
    fn test_point_light_has_no_falloff() {
        let world = world();
        let mut rec = ShadeRec::new(&world);
        let light = PointLight::new(Vec3::ZERO, 3.0, Color::new(1.0, 1.0, 0.5));

        rec.hit_point = Vec3::new(1.0, 0.0, 0.0);
        let near = light.radiance(&rec);
        rec.hit_point = Vec3::new(1000.0, 0.0, 0.0);
        let far = light.radiance(&rec);

        assert_eq!(near, far);
        assert_eq!(near, Color::new(3.0, 3.0, 1.5));
    }
}
