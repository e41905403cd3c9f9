//! Numeric tolerances used by the intersection tests and samplers.

use lumen_math::Interval;

/// Rays whose direction has `|dot(normal, dir)|` at or below this value are
/// treated as parallel to a plane or triangle and never hit it.
pub const PARALLEL_EPSILON: f32 = 1e-4;

/// Smallest sphere root accepted as a hit.
pub const SPHERE_EPSILON: f32 = 0.01;

/// Accepted ray parameters for planes and triangles.
pub const PLANAR_T_RANGE: Interval = Interval::from_min(0.0);

/// Accepted ray parameters for spheres.
pub const SPHERE_T_RANGE: Interval = Interval::from_min(SPHERE_EPSILON);

/// Largest `f32` strictly below 1.0. Sample coordinates are clamped to it so
/// they stay inside `[0, 1)`.
pub const ONE_MINUS_EPSILON: f32 = 1.0 - f32::EPSILON / 2.0;
