// Re-export glam for convenience
pub use glam::*;

// Lumen math types
mod interval;
mod ray;

pub use interval::Interval;
pub use ray::Ray;

/// RGB color, one linear float per channel.
pub type Color = Vec3;

/// A point in the unit square, as produced by the samplers.
pub type Point2 = Vec2;

/// Tolerance used by [`approx_eq`].
pub const EPSILON: f32 = 1e-6;

/// Returns true if `a` and `b` differ by no more than [`EPSILON`].
#[inline]
pub fn approx_eq(a: f32, b: f32) -> bool {
    (a - b).abs() <= EPSILON
}
