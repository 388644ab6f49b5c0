#![warn(missing_docs)]

//! Math types for the copperray 2D intersection kernel.
//!
//! Thin wrappers around nalgebra providing domain-specific types for the
//! board renderer's 2D geometry: points, vectors, unit directions, and
//! tolerance constants. Everything is single precision; this kernel sits
//! on the per-ray hot path of the raytracer and matches the precision of
//! the rest of the render pipeline.

use nalgebra::{Unit, Vector2};

/// A point in 2D board space.
pub type Point2 = nalgebra::Point2<f32>;

/// A vector in 2D board space.
pub type Vec2 = Vector2<f32>;

/// A unit (normalized) direction vector in 2D board space.
pub type Dir2 = Unit<Vector2<f32>>;

/// Counter-clockwise perpendicular of a vector (rotation by +90 degrees).
///
/// Preserves length, so the perpendicular of a unit direction is itself a
/// unit vector.
#[inline]
pub fn perp_ccw(v: &Vec2) -> Vec2 {
    Vec2::new(-v.y, v.x)
}

/// Tolerance constants for geometric comparisons.
#[derive(Debug, Clone, Copy)]
pub struct Tolerance {
    /// Linear tolerance in scene units.
    pub linear: f32,
}

impl Tolerance {
    /// Default tolerance for the renderer's scene units.
    pub const DEFAULT: Self = Self { linear: 1e-7 };

    /// Check if a scalar is effectively zero.
    #[inline]
    pub fn is_zero(&self, d: f32) -> bool {
        d.abs() < self.linear
    }
}

impl Default for Tolerance {
    fn default() -> Self {
        Self::DEFAULT
    }
}
