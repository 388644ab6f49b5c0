//! 2D axis-aligned bounding box with ray-slab tests.
//!
//! Boxes here serve culling: the acceleration structure tests every ray
//! against a shape's box before paying for the exact shape test. Because a
//! box built with rounded arithmetic can land a hair inside the true shape,
//! [`Aabb2::scale_next_up`] widens each bound by one ULP so culling never
//! produces a false miss.

use copperray_math::{Point2, Vec2};

use crate::ray::{Ray2, RaySegment2};

/// Axis-aligned bounding box in 2D.
///
/// The constructors keep `min <= max` componentwise. A freshly
/// [`reset`](Aabb2::reset) box holds the inverted sentinel
/// (`min = +MAX`, `max = -MAX`); geometry queries on such a box are a
/// contract violation, asserted in debug builds.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Aabb2 {
    /// Minimum corner.
    pub min: Point2,
    /// Maximum corner.
    pub max: Point2,
}

impl Aabb2 {
    /// Create a box from two corners, in either order.
    pub fn new(a: Point2, b: Point2) -> Self {
        Self {
            min: Point2::new(a.x.min(b.x), a.y.min(b.y)),
            max: Point2::new(a.x.max(b.x), a.y.max(b.y)),
        }
    }

    /// Create a degenerate box containing a single point.
    pub fn from_point(p: Point2) -> Self {
        Self { min: p, max: p }
    }

    /// Create an empty (inverted) box suitable for expansion by union.
    pub fn empty() -> Self {
        Self {
            min: Point2::new(f32::MAX, f32::MAX),
            max: Point2::new(-f32::MAX, -f32::MAX),
        }
    }

    /// Return this box to the empty (inverted) state.
    pub fn reset(&mut self) {
        *self = Self::empty();
    }

    /// True unless any coordinate still holds the empty sentinel.
    pub fn is_initialized(&self) -> bool {
        !(self.min.x == f32::MAX
            || self.min.y == f32::MAX
            || self.max.x == -f32::MAX
            || self.max.y == -f32::MAX)
    }

    /// Expand this box to include a point.
    ///
    /// Callable on an empty box; the first union establishes the box.
    pub fn union_point(&mut self, p: &Point2) {
        self.min.x = self.min.x.min(p.x);
        self.min.y = self.min.y.min(p.y);
        self.max.x = self.max.x.max(p.x);
        self.max.y = self.max.y.max(p.y);
    }

    /// Expand this box to include another box.
    pub fn union_box(&mut self, other: &Aabb2) {
        self.min.x = self.min.x.min(other.min.x);
        self.min.y = self.min.y.min(other.min.y);
        self.max.x = self.max.x.max(other.max.x);
        self.max.y = self.max.y.max(other.max.y);
    }

    /// Center point of the box.
    pub fn center(&self) -> Point2 {
        Point2::from((self.min.coords + self.max.coords) * 0.5)
    }

    /// Extent of the box (`max - min`).
    pub fn extent(&self) -> Vec2 {
        self.max - self.min
    }

    /// Index of the axis with the larger extent (0 = x, 1 = y).
    pub fn max_dimension(&self) -> usize {
        let extent = self.extent();
        usize::from(extent.y > extent.x)
    }

    /// Perimeter of the box.
    pub fn perimeter(&self) -> f32 {
        let extent = self.extent();
        2.0 * (extent.x + extent.y)
    }

    /// Area of the box.
    pub fn area(&self) -> f32 {
        let extent = self.extent();
        extent.x * extent.y
    }

    /// The four corners, in counter-clockwise order starting at `min`.
    pub fn corners(&self) -> [Point2; 4] {
        [
            self.min,
            Point2::new(self.max.x, self.min.y),
            self.max,
            Point2::new(self.min.x, self.max.y),
        ]
    }

    /// Uniformly scale the box about its center.
    pub fn scale(&mut self, factor: f32) {
        debug_assert!(self.is_initialized());

        let center = self.center();
        self.min = center + (self.min - center) * factor;
        self.max = center + (self.max - center) * factor;
    }

    /// Nudge every bound one representable float outward.
    ///
    /// This keeps a box built with rounded arithmetic conservative: a ray
    /// that grazes the true shape can never miss the widened box. The nudge
    /// must stay a ULP step; an arbitrary epsilon would either over-inflate
    /// or fail to cover the rounding error.
    pub fn scale_next_up(&mut self) {
        self.min.x = self.min.x.next_down();
        self.min.y = self.min.y.next_down();
        self.max.x = self.max.x.next_up();
        self.max.y = self.max.y.next_up();
    }

    /// Nudge every bound one representable float inward.
    ///
    /// Inverse of [`scale_next_up`](Aabb2::scale_next_up), for boxes that
    /// must lie strictly inside another region.
    pub fn scale_next_down(&mut self) {
        self.min.x = self.min.x.next_up();
        self.min.y = self.min.y.next_up();
        self.max.x = self.max.x.next_down();
        self.max.y = self.max.y.next_down();
    }

    /// Box/circle overlap test.
    ///
    /// Accumulates, per axis, the squared distance from the circle center to
    /// the nearest point of the box on that axis; overlap iff the sum is at
    /// most `radius_squared`.
    pub fn intersects_circle(&self, center: &Point2, radius_squared: f32) -> bool {
        let mut dist_sq = 0.0;

        for i in 0..2 {
            if center[i] < self.min[i] {
                let d = center[i] - self.min[i];
                dist_sq += d * d;
            } else if center[i] > self.max[i] {
                let d = center[i] - self.max[i];
                dist_sq += d * d;
            }
        }

        dist_sq <= radius_squared
    }

    /// Box/box overlap test (touching counts as overlap).
    pub fn intersects(&self, other: &Aabb2) -> bool {
        debug_assert!(self.is_initialized());
        debug_assert!(other.is_initialized());

        let x = self.max.x >= other.min.x && self.min.x <= other.max.x;
        let y = self.max.y >= other.min.y && self.min.y <= other.max.y;

        x && y
    }

    /// Inclusive point containment.
    pub fn contains(&self, p: &Point2) -> bool {
        debug_assert!(self.is_initialized());

        p.x >= self.min.x && p.x <= self.max.x && p.y >= self.min.y && p.y <= self.max.y
    }

    /// Ray/box test using the slab method.
    ///
    /// On hit returns the entry distance, or the exit distance when the ray
    /// origin is inside the box.
    pub fn intersect_ray(&self, ray: &Ray2) -> Option<f32> {
        let tx1 = (self.min.x - ray.origin.x) * ray.inv_dir.x;
        let tx2 = (self.max.x - ray.origin.x) * ray.inv_dir.x;

        let mut tmin = tx1.min(tx2);
        let mut tmax = tx1.max(tx2);

        let ty1 = (self.min.y - ray.origin.y) * ray.inv_dir.y;
        let ty2 = (self.max.y - ray.origin.y) * ray.inv_dir.y;

        tmin = tmin.max(ty1.min(ty2));
        tmax = tmax.min(ty1.max(ty2));

        if tmax >= 0.0 && tmax >= tmin {
            Some(if tmin > 0.0 { tmin } else { tmax })
        } else {
            None
        }
    }

    /// Bounded-ray/box test: the slab method plus a length bound.
    pub fn intersect_ray_segment(&self, seg: &RaySegment2) -> bool {
        let tx1 = (self.min.x - seg.start.x) * seg.inv_dir.x;
        let tx2 = (self.max.x - seg.start.x) * seg.inv_dir.x;

        let mut tmin = tx1.min(tx2);
        let mut tmax = tx1.max(tx2);

        let ty1 = (self.min.y - seg.start.y) * seg.inv_dir.y;
        let ty2 = (self.max.y - seg.start.y) * seg.inv_dir.y;

        tmin = tmin.max(ty1.min(ty2));
        tmax = tmax.min(ty1.max(ty2));

        if tmax >= 0.0 && tmax >= tmin {
            let t = if tmin > 0.0 { tmin } else { tmax };
            t < seg.length
        } else {
            false
        }
    }

    /// Ray/box test returning the full entry/exit interval.
    ///
    /// The entry distance is clamped to 0 when the entry point lies behind
    /// the ray origin.
    pub fn ray_interval(&self, ray: &Ray2) -> Option<(f32, f32)> {
        let tx1 = (self.min.x - ray.origin.x) * ray.inv_dir.x;
        let tx2 = (self.max.x - ray.origin.x) * ray.inv_dir.x;

        let mut tmin = tx1.min(tx2);
        let mut tmax = tx1.max(tx2);

        let ty1 = (self.min.y - ray.origin.y) * ray.inv_dir.y;
        let ty2 = (self.max.y - ray.origin.y) * ray.inv_dir.y;

        tmin = tmin.max(ty1.min(ty2));
        tmax = tmax.min(ty1.max(ty2));

        if tmax >= 0.0 && tmax >= tmin {
            Some((tmin.max(0.0), tmax))
        } else {
            None
        }
    }
}
