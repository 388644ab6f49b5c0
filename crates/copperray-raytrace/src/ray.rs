//! Ray value types and the low-level segment/circle intersectors.
//!
//! Both ray types precompute the reciprocal of their direction so the
//! bounding-box slab test is multiply-only. The bounded [`RaySegment2`] is
//! what shapes are queried with; the unbounded [`Ray2`] serves the interval
//! form of the box test.

use copperray_math::{Dir2, Point2, Tolerance, Vec2};

/// A ray in 2D space defined by origin and direction.
#[derive(Debug, Clone, Copy)]
pub struct Ray2 {
    /// Origin point of the ray.
    pub origin: Point2,
    /// Unit direction of the ray.
    pub dir: Dir2,
    /// Precomputed reciprocal of direction components for fast AABB tests.
    pub inv_dir: Vec2,
}

impl Ray2 {
    /// Create a new ray from origin and direction.
    ///
    /// The direction will be normalized. Axis-aligned directions produce
    /// infinite reciprocal components, which the slab test handles.
    pub fn new(origin: Point2, direction: Vec2) -> Self {
        let dir = Dir2::new_normalize(direction);
        let inv_dir = Vec2::new(1.0 / dir.x, 1.0 / dir.y);
        Self { origin, dir, inv_dir }
    }

    /// Evaluate the ray at distance `t`: `origin + t * dir`.
    #[inline]
    pub fn at(&self, t: f32) -> Point2 {
        self.origin + self.dir.scale(t)
    }
}

/// A bounded ray between two points.
///
/// `t` parameters reported by the intersectors are distances along the unit
/// direction, in `[0, length]`.
#[derive(Debug, Clone, Copy)]
pub struct RaySegment2 {
    /// Start point (ray origin).
    pub start: Point2,
    /// End point.
    pub end: Point2,
    /// `end - start`, unnormalized.
    pub end_minus_start: Vec2,
    /// Unit direction from start to end.
    pub dir: Dir2,
    /// Precomputed reciprocal of direction components for fast AABB tests.
    pub inv_dir: Vec2,
    /// Distance between start and end.
    pub length: f32,
}

impl RaySegment2 {
    /// Create a bounded ray from its two endpoints.
    ///
    /// A zero-length segment is a contract violation (asserted in debug
    /// builds): there is no direction to normalize.
    pub fn new(start: Point2, end: Point2) -> Self {
        let end_minus_start = end - start;
        let length = end_minus_start.norm();
        debug_assert!(length > 0.0);

        let dir = Dir2::new_unchecked(end_minus_start / length);
        let inv_dir = Vec2::new(1.0 / dir.x, 1.0 / dir.y);
        Self {
            start,
            end,
            end_minus_start,
            dir,
            inv_dir,
            length,
        }
    }

    /// Evaluate the ray at distance `t` from the start.
    #[inline]
    pub fn at(&self, t: f32) -> Point2 {
        self.start + self.dir.scale(t)
    }

    /// Intersect this bounded ray with a finite segment.
    ///
    /// The segment is given as `seg_start` plus its delta vector. Returns
    /// the hit distance along the ray, or `None` when the segments are
    /// parallel or do not cross within both extents.
    pub fn intersect_segment(&self, seg_start: Point2, seg_delta: Vec2) -> Option<f32> {
        let rxs = self.end_minus_start.perp(&seg_delta);

        // Parallel (or degenerate) segments never cross.
        if Tolerance::DEFAULT.is_zero(rxs) {
            return None;
        }

        let inv_rxs = 1.0 / rxs;
        let pq = seg_start - self.start;

        let t = pq.perp(&seg_delta) * inv_rxs;
        if !(0.0..=1.0).contains(&t) {
            return None;
        }

        let u = pq.perp(&self.end_minus_start) * inv_rxs;
        if !(0.0..=1.0).contains(&u) {
            return None;
        }

        Some(t * self.length)
    }

    /// Intersect this bounded ray with a circle.
    ///
    /// Returns both roots of the quadratic, `t0 <= t1`, with the outward
    /// unit normal at each. A negative `t0` means the ray starts inside the
    /// circle (or past its near boundary); callers decide which root is a
    /// real boundary crossing. Returns `None` when the root interval lies
    /// entirely outside `[0, length]`.
    pub fn intersect_circle(&self, center: Point2, radius: f32) -> Option<CircleHits> {
        // Unit direction, so the quadratic's leading coefficient is 1.
        let oc = self.start - center;
        let b = 2.0 * self.dir.dot(&oc);
        let c = oc.dot(&oc) - radius * radius;

        let discriminant = b * b - 4.0 * c;
        if discriminant < 0.0 {
            return None;
        }

        let sqrt_disc = discriminant.sqrt();
        let t0 = (-b - sqrt_disc) * 0.5;
        let t1 = (-b + sqrt_disc) * 0.5;

        if t0 > self.length || t1 < 0.0 {
            return None;
        }

        let n0 = Dir2::new_normalize(self.at(t0) - center);
        let n1 = Dir2::new_normalize(self.at(t1) - center);

        Some(CircleHits { t0, t1, n0, n1 })
    }
}

/// The two roots of a ray/circle intersection with their outward normals.
#[derive(Debug, Clone, Copy)]
pub struct CircleHits {
    /// Near root (entry distance), may be negative.
    pub t0: f32,
    /// Far root (exit distance), `t1 >= t0`.
    pub t1: f32,
    /// Outward unit normal at the near root.
    pub n0: Dir2,
    /// Outward unit normal at the far root.
    pub n1: Dir2,
}

/// Result of a ray/shape intersection.
#[derive(Debug, Clone, Copy)]
pub struct Hit2 {
    /// Hit distance along the ray direction.
    pub t: f32,
    /// Outward unit surface normal at the hit point.
    pub normal: Dir2,
}

/// Boolean segment/segment crossing test.
///
/// Both segments are given as start point plus delta vector. Collinear
/// overlap counts as no crossing, matching the coarse overlap filter this
/// predicate serves.
pub fn segments_intersect(a_start: Point2, a_delta: Vec2, b_start: Point2, b_delta: Vec2) -> bool {
    let rxs = a_delta.perp(&b_delta);

    if Tolerance::DEFAULT.is_zero(rxs) {
        return false;
    }

    let inv_rxs = 1.0 / rxs;
    let pq = b_start - a_start;

    let t = pq.perp(&b_delta) * inv_rxs;
    if !(0.0..=1.0).contains(&t) {
        return false;
    }

    let u = pq.perp(&a_delta) * inv_rxs;
    (0.0..=1.0).contains(&u)
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_ray_at() {
        let ray = Ray2::new(Point2::new(1.0, 2.0), Vec2::new(3.0, 0.0));
        let p = ray.at(5.0);
        assert_relative_eq!(p.x, 6.0, epsilon = 1e-6);
        assert_relative_eq!(p.y, 2.0, epsilon = 1e-6);
    }

    #[test]
    fn test_ray_segment_precomputed_fields() {
        let seg = RaySegment2::new(Point2::new(0.0, 0.0), Point2::new(3.0, 4.0));
        assert_relative_eq!(seg.length, 5.0, epsilon = 1e-6);
        assert_relative_eq!(seg.dir.x, 0.6, epsilon = 1e-6);
        assert_relative_eq!(seg.dir.y, 0.8, epsilon = 1e-6);
        let p = seg.at(5.0);
        assert_relative_eq!(p.x, 3.0, epsilon = 1e-5);
        assert_relative_eq!(p.y, 4.0, epsilon = 1e-5);
    }

    #[test]
    fn test_intersect_segment_crossing() {
        // Ray going up through a horizontal segment at y = 2.
        let ray = RaySegment2::new(Point2::new(1.0, 0.0), Point2::new(1.0, 10.0));
        let t = ray
            .intersect_segment(Point2::new(-5.0, 2.0), Vec2::new(10.0, 0.0))
            .unwrap();
        assert_relative_eq!(t, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_intersect_segment_miss_beyond_extent() {
        let ray = RaySegment2::new(Point2::new(1.0, 0.0), Point2::new(1.0, 10.0));
        // Segment too short to reach x = 1.
        assert!(ray
            .intersect_segment(Point2::new(-5.0, 2.0), Vec2::new(3.0, 0.0))
            .is_none());
        // Segment above the ray's reach.
        assert!(ray
            .intersect_segment(Point2::new(-5.0, 20.0), Vec2::new(10.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_intersect_segment_parallel() {
        let ray = RaySegment2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        assert!(ray
            .intersect_segment(Point2::new(0.0, 1.0), Vec2::new(10.0, 0.0))
            .is_none());
        // Degenerate (zero-delta) segment behaves as parallel.
        assert!(ray
            .intersect_segment(Point2::new(5.0, 0.0), Vec2::new(0.0, 0.0))
            .is_none());
    }

    #[test]
    fn test_intersect_circle_entry_exit() {
        let ray = RaySegment2::new(Point2::new(-10.0, 0.0), Point2::new(10.0, 0.0));
        let hits = ray.intersect_circle(Point2::new(0.0, 0.0), 2.0).unwrap();
        assert_relative_eq!(hits.t0, 8.0, epsilon = 1e-5);
        assert_relative_eq!(hits.t1, 12.0, epsilon = 1e-5);
        // Entry normal faces the ray, exit normal faces away.
        assert_relative_eq!(hits.n0.x, -1.0, epsilon = 1e-5);
        assert_relative_eq!(hits.n1.x, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_intersect_circle_from_inside() {
        let ray = RaySegment2::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0));
        let hits = ray.intersect_circle(Point2::new(0.0, 0.0), 2.0).unwrap();
        assert!(hits.t0 < 0.0);
        assert_relative_eq!(hits.t1, 2.0, epsilon = 1e-5);
    }

    #[test]
    fn test_intersect_circle_miss() {
        let ray = RaySegment2::new(Point2::new(-10.0, 5.0), Point2::new(10.0, 5.0));
        assert!(ray.intersect_circle(Point2::new(0.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn test_intersect_circle_behind_or_past() {
        // Circle entirely behind the start point.
        let ray = RaySegment2::new(Point2::new(5.0, 0.0), Point2::new(10.0, 0.0));
        assert!(ray.intersect_circle(Point2::new(0.0, 0.0), 2.0).is_none());

        // Circle entirely past the end point.
        let short = RaySegment2::new(Point2::new(-10.0, 0.0), Point2::new(-9.0, 0.0));
        assert!(short.intersect_circle(Point2::new(0.0, 0.0), 2.0).is_none());
    }

    #[test]
    fn test_segments_intersect() {
        // Crossing diagonals of a unit square.
        assert!(segments_intersect(
            Point2::new(0.0, 0.0),
            Vec2::new(1.0, 1.0),
            Point2::new(1.0, 0.0),
            Vec2::new(-1.0, 1.0),
        ));
        // Parallel edges.
        assert!(!segments_intersect(
            Point2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Point2::new(0.0, 1.0),
            Vec2::new(1.0, 0.0),
        ));
        // Non-parallel but out of extent.
        assert!(!segments_intersect(
            Point2::new(0.0, 0.0),
            Vec2::new(1.0, 0.0),
            Point2::new(5.0, -1.0),
            Vec2::new(0.0, 2.0),
        ));
    }
}
