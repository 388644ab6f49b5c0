//! Leaf shapes of the 2D board scene.
//!
//! Each copper feature becomes one immutable leaf shape, built once during
//! scene assembly and queried read-only for the rest of the render pass.
//! The shape set is closed: the acceleration structure stores [`Shape2d`]
//! values and dispatches every query with a `match`.

mod filled_circle;
mod round_segment;

pub use filled_circle::FilledCircle;
pub use round_segment::RoundSegment;

use copperray_math::Point2;

use crate::bbox::Aabb2;
use crate::ray::{Hit2, RaySegment2};

/// Three-valued classification of a query box against a shape.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum IntersectionResult {
    /// The box does not touch the shape.
    Misses,
    /// The box overlaps the shape boundary.
    Intersects,
    /// The box lies entirely inside the shape.
    FullInside,
}

/// A leaf shape of the 2D board scene.
#[derive(Debug, Clone, Copy)]
pub enum Shape2d {
    /// A copper track segment with semicircular end caps.
    RoundSegment(RoundSegment),
    /// A filled disc (pad or via land).
    FilledCircle(FilledCircle),
}

impl Shape2d {
    /// Culling bounding box of the shape.
    pub fn bounding_box(&self) -> &Aabb2 {
        match self {
            Shape2d::RoundSegment(s) => s.bounding_box(),
            Shape2d::FilledCircle(c) => c.bounding_box(),
        }
    }

    /// Center of the shape's bounding box.
    pub fn centroid(&self) -> Point2 {
        match self {
            Shape2d::RoundSegment(s) => s.centroid(),
            Shape2d::FilledCircle(c) => c.centroid(),
        }
    }

    /// Exact point membership.
    pub fn is_point_inside(&self, p: &Point2) -> bool {
        match self {
            Shape2d::RoundSegment(s) => s.is_point_inside(p),
            Shape2d::FilledCircle(c) => c.is_point_inside(p),
        }
    }

    /// Coarse boolean box overlap, used as a pre-filter.
    pub fn intersects(&self, query: &Aabb2) -> bool {
        match self {
            Shape2d::RoundSegment(s) => s.intersects(query),
            Shape2d::FilledCircle(c) => c.intersects(query),
        }
    }

    /// Classify a query box against the shape.
    pub fn classify_box(&self, query: &Aabb2) -> IntersectionResult {
        match self {
            Shape2d::RoundSegment(s) => s.classify_box(query),
            Shape2d::FilledCircle(c) => c.classify_box(query),
        }
    }

    /// Exact ray intersection with outward normal.
    pub fn intersect(&self, ray: &RaySegment2) -> Option<Hit2> {
        match self {
            Shape2d::RoundSegment(s) => s.intersect(ray),
            Shape2d::FilledCircle(c) => c.intersect(ray),
        }
    }
}

impl From<RoundSegment> for Shape2d {
    fn from(s: RoundSegment) -> Self {
        Shape2d::RoundSegment(s)
    }
}

impl From<FilledCircle> for Shape2d {
    fn from(c: FilledCircle) -> Self {
        Shape2d::FilledCircle(c)
    }
}
