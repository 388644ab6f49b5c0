//! Filled circle: a pad or via land on the board.

use copperray_math::{Point2, Vec2};

use crate::bbox::Aabb2;
use crate::ray::{Hit2, RaySegment2};
use crate::shapes::IntersectionResult;

/// A filled disc of copper.
///
/// Same query surface as [`RoundSegment`](crate::shapes::RoundSegment),
/// with the single end-cap circle doing all the work.
#[derive(Debug, Clone, Copy)]
pub struct FilledCircle {
    center: Point2,
    radius: f32,
    radius_squared: f32,
    bbox: Aabb2,
    centroid: Point2,
}

impl FilledCircle {
    /// Build a disc from its center and radius.
    ///
    /// `radius` must be non-negative (asserted in debug builds).
    pub fn new(center: Point2, radius: f32) -> Self {
        debug_assert!(radius >= 0.0);

        let inflate = Vec2::new(radius, radius);
        let mut bbox = Aabb2::new(center - inflate, center + inflate);
        bbox.scale_next_up();
        let centroid = bbox.center();

        Self {
            center,
            radius,
            radius_squared: radius * radius,
            bbox,
            centroid,
        }
    }

    /// Center of the disc.
    pub fn center(&self) -> Point2 {
        self.center
    }

    /// Radius of the disc.
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Culling bounding box (inflated and ULP-nudged at construction).
    pub fn bounding_box(&self) -> &Aabb2 {
        &self.bbox
    }

    /// Center of the bounding box.
    pub fn centroid(&self) -> Point2 {
        self.centroid
    }

    /// Exact disc membership.
    pub fn is_point_inside(&self, p: &Point2) -> bool {
        (p - self.center).norm_squared() <= self.radius_squared
    }

    /// Classify a query box against the disc by its corners.
    ///
    /// Best-effort in the same sense as the capsule version: a straddling
    /// box with no corner inside reports `Misses`.
    pub fn classify_box(&self, query: &Aabb2) -> IntersectionResult {
        if !self.bbox.intersects(query) {
            return IntersectionResult::Misses;
        }

        let inside = query.corners().map(|c| self.is_point_inside(&c));

        if inside.iter().all(|&b| b) {
            return IntersectionResult::FullInside;
        }
        if inside.iter().any(|&b| b) {
            return IntersectionResult::Intersects;
        }

        IntersectionResult::Misses
    }

    /// Coarse boolean box overlap via the box/circle predicate.
    pub fn intersects(&self, query: &Aabb2) -> bool {
        query.intersects_circle(&self.center, self.radius_squared)
    }

    /// Exact ray/disc intersection with outward normal.
    ///
    /// Entry root when the ray starts outside, far (exit) root when it
    /// starts inside; a fully interior ray segment reports no hit.
    pub fn intersect(&self, ray: &RaySegment2) -> Option<Hit2> {
        let start_inside = self.is_point_inside(&ray.start);
        let end_inside = self.is_point_inside(&ray.end);

        if start_inside && end_inside {
            return None;
        }

        let roots = ray.intersect_circle(self.center, self.radius)?;

        if start_inside {
            Some(Hit2 {
                t: roots.t1,
                normal: roots.n1,
            })
        } else if roots.t0 > 0.0 {
            Some(Hit2 {
                t: roots.t0,
                normal: roots.n0,
            })
        } else {
            None
        }
    }
}
