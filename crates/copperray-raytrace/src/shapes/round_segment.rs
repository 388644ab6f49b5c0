//! Rounded segment (capsule): a copper track of finite width.

use copperray_math::{perp_ccw, Dir2, Point2, Vec2};

use crate::bbox::Aabb2;
use crate::ray::{segments_intersect, Hit2, RaySegment2};
use crate::shapes::IntersectionResult;

/// A straight track segment of finite width with semicircular end caps.
///
/// Construction precomputes the two straight boundary edges (the segment
/// offset by `radius` to each side), the culling bounding box (inflated by
/// `radius` and nudged one ULP outward), and its centroid. The value is
/// immutable afterwards; all queries are read-only.
///
/// A zero-length segment degrades to a disc of the same radius: the side
/// edges collapse to zero-length chords that no ray or box edge can cross,
/// leaving the coincident end caps to answer every query.
#[derive(Debug, Clone, Copy)]
pub struct RoundSegment {
    start: Point2,
    end: Point2,
    radius: f32,
    radius_squared: f32,
    width: f32,
    left_start: Point2,
    left_delta: Vec2,
    left_dir: Dir2,
    right_start: Point2,
    right_delta: Vec2,
    right_dir: Dir2,
    bbox: Aabb2,
    centroid: Point2,
}

impl RoundSegment {
    /// Build a track segment from its endpoints and full copper width.
    ///
    /// `width` must be non-negative (asserted in debug builds); the radius
    /// is half of it.
    pub fn new(start: Point2, end: Point2, width: f32) -> Self {
        debug_assert!(width >= 0.0);

        let radius = width * 0.5;
        let radius_squared = radius * radius;

        let spine = end - start;
        let len = spine.norm();
        // Degenerate spine: any direction serves, the edges are unhittable.
        let dir = if len > 0.0 { spine / len } else { Vec2::x() };

        // Left edge runs start->end offset to the left of the direction of
        // travel; right edge runs end->start on the other side. Each edge's
        // outward normal is then the counter-clockwise perpendicular of its
        // own direction.
        let left_offset = perp_ccw(&dir) * radius;
        let left_start = start + left_offset;
        let left_delta = spine;
        let left_dir = Dir2::new_unchecked(dir);

        let right_start = end - left_offset;
        let right_delta = -spine;
        let right_dir = Dir2::new_unchecked(-dir);

        let mut bbox = Aabb2::from_point(start);
        bbox.union_point(&end);
        let inflate = Vec2::new(radius, radius);
        let mut bbox = Aabb2::new(bbox.min - inflate, bbox.max + inflate);
        bbox.scale_next_up();
        let centroid = bbox.center();

        Self {
            start,
            end,
            radius,
            radius_squared,
            width,
            left_start,
            left_delta,
            left_dir,
            right_start,
            right_delta,
            right_dir,
            bbox,
            centroid,
        }
    }

    /// Start point of the track spine.
    pub fn start(&self) -> Point2 {
        self.start
    }

    /// End point of the track spine.
    pub fn end(&self) -> Point2 {
        self.end
    }

    /// Cap radius (half the track width).
    pub fn radius(&self) -> f32 {
        self.radius
    }

    /// Full track width.
    pub fn width(&self) -> f32 {
        self.width
    }

    /// Culling bounding box (inflated and ULP-nudged at construction).
    pub fn bounding_box(&self) -> &Aabb2 {
        &self.bbox
    }

    /// Center of the bounding box.
    pub fn centroid(&self) -> Point2 {
        self.centroid
    }

    /// Squared distance from a point to the spine segment.
    fn distance_to_spine_squared(&self, p: &Point2) -> f32 {
        let ab = self.end - self.start;
        let ap = p - self.start;

        let len_sq = ab.norm_squared();
        if len_sq <= 0.0 {
            return ap.norm_squared();
        }

        let t = (ap.dot(&ab) / len_sq).clamp(0.0, 1.0);
        let closest = self.start + ab * t;
        (p - closest).norm_squared()
    }

    /// Exact capsule membership: squared distance to the spine at most
    /// `radius^2`.
    pub fn is_point_inside(&self, p: &Point2) -> bool {
        self.distance_to_spine_squared(p) <= self.radius_squared
    }

    /// Classify a query box against the capsule by its corners.
    ///
    /// Best-effort: a box that straddles the capsule without placing any
    /// corner inside it reports `Misses`. Callers treating `Misses` as a
    /// hard negative must pre-filter with [`intersects`](Self::intersects).
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

    /// Coarse boolean box overlap, used as a pre-filter.
    ///
    /// Fast-accepts a query box that strictly envelops the whole shape,
    /// then tests the query box's four edges against both side edges and
    /// both end caps against the box.
    pub fn intersects(&self, query: &Aabb2) -> bool {
        if !self.bbox.intersects(query) {
            return false;
        }

        if query.max.x > self.bbox.max.x
            && query.max.y > self.bbox.max.y
            && query.min.x < self.bbox.min.x
            && query.min.y < self.bbox.min.y
        {
            return true;
        }

        let v = query.corners();
        for i in 0..4 {
            let edge_start = v[i];
            let edge_delta = v[(i + 1) % 4] - v[i];

            if segments_intersect(self.left_start, self.left_delta, edge_start, edge_delta) {
                return true;
            }
            if segments_intersect(self.right_start, self.right_delta, edge_start, edge_delta) {
                return true;
            }
        }

        query.intersects_circle(&self.start, self.radius_squared)
            || query.intersects_circle(&self.end, self.radius_squared)
    }

    /// Exact ray/capsule intersection with outward normal.
    ///
    /// Candidates come from the two side edges and the two end caps. When
    /// the ray starts outside the capsule the reported hit is the smallest
    /// positive candidate (the entry); when it starts inside, the largest
    /// far candidate (the exit). A cap whose near root lies at or behind
    /// the origin only contributes its far root, and only to the exit path.
    pub fn intersect(&self, ray: &RaySegment2) -> Option<Hit2> {
        let start_inside = self.is_point_inside(&ray.start);
        let end_inside = self.is_point_inside(&ray.end);

        // A fully interior ray segment never crosses the boundary.
        if start_inside && end_inside {
            return None;
        }

        let mut near: Option<Hit2> = None;
        let mut far: Option<Hit2> = None;

        if let Some(t) = ray.intersect_segment(self.left_start, self.left_delta) {
            let normal = Dir2::new_unchecked(perp_ccw(&self.left_dir));
            near = Some(Hit2 { t, normal });
            far = Some(Hit2 { t, normal });
        }

        if let Some(t) = ray.intersect_segment(self.right_start, self.right_delta) {
            let normal = Dir2::new_unchecked(perp_ccw(&self.right_dir));
            if !start_inside && near.is_none_or(|h| t < h.t) {
                near = Some(Hit2 { t, normal });
            }
            if start_inside && far.is_none_or(|h| t > h.t) {
                far = Some(Hit2 { t, normal });
            }
        }

        for center in [self.start, self.end] {
            let Some(roots) = ray.intersect_circle(center, self.radius) else {
                continue;
            };

            if roots.t0 > 0.0 {
                if !start_inside && near.is_none_or(|h| roots.t0 < h.t) {
                    near = Some(Hit2 {
                        t: roots.t0,
                        normal: roots.n0,
                    });
                }
                if start_inside && far.is_none_or(|h| roots.t1 > h.t) {
                    far = Some(Hit2 {
                        t: roots.t1,
                        normal: roots.n1,
                    });
                }
            } else if far.is_none_or(|h| roots.t1 > h.t) {
                // Near root behind the origin: the ray starts inside this
                // cap, so only the far root is a boundary crossing.
                far = Some(Hit2 {
                    t: roots.t1,
                    normal: roots.n1,
                });
            }
        }

        if start_inside {
            far
        } else {
            near
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    /// The track used throughout: spine (0,0)-(10,0), width 2 (radius 1).
    fn track() -> RoundSegment {
        RoundSegment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), 2.0)
    }

    #[test]
    fn test_construction_precomputes_bbox() {
        let t = track();
        let bb = t.bounding_box();
        assert!(bb.is_initialized());
        // Inflated by the radius on every side, then nudged outward.
        assert!(bb.min.x <= -1.0 && bb.min.y <= -1.0);
        assert!(bb.max.x >= 11.0 && bb.max.y >= 1.0);
        assert_relative_eq!(t.centroid().x, 5.0, epsilon = 1e-5);
        assert_relative_eq!(t.centroid().y, 0.0, epsilon = 1e-5);
        assert_relative_eq!(t.radius(), 1.0);
        assert_relative_eq!(t.width(), 2.0);
    }

    #[test]
    fn test_endpoints_are_inside() {
        let t = track();
        assert!(t.is_point_inside(&t.start()));
        assert!(t.is_point_inside(&t.end()));
    }

    #[test]
    fn test_point_membership() {
        let t = track();
        // On the spine, on the side boundary, inside a cap, and outside.
        assert!(t.is_point_inside(&Point2::new(5.0, 0.0)));
        assert!(t.is_point_inside(&Point2::new(5.0, 1.0)));
        assert!(t.is_point_inside(&Point2::new(10.5, 0.0)));
        assert!(!t.is_point_inside(&Point2::new(5.0, 1.1)));
        assert!(!t.is_point_inside(&Point2::new(11.5, 0.0)));
        // Corner region outside the cap but inside the bounding box.
        assert!(!t.is_point_inside(&Point2::new(10.9, 0.9)));
    }

    #[test]
    fn test_ray_enters_from_below() {
        let t = track();
        let ray = RaySegment2::new(Point2::new(5.0, -5.0), Point2::new(5.0, 5.0));
        let hit = t.intersect(&ray).unwrap();
        assert_relative_eq!(hit.t, 4.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.y, -1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_starting_inside_reports_exit() {
        let t = track();
        let ray = RaySegment2::new(Point2::new(5.0, 0.0), Point2::new(5.0, 5.0));
        let hit = t.intersect(&ray).unwrap();
        assert_relative_eq!(hit.t, 1.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.x, 0.0, epsilon = 1e-5);
        assert_relative_eq!(hit.normal.y, 1.0, epsilon = 1e-5);
    }

    #[test]
    fn test_ray_exits_through_cap() {
        let t = track();
        // Starts inside, leaves through the end cap along the spine.
        let ray = RaySegment2::new(Point2::new(9.0, 0.0), Point2::new(15.0, 0.0));
        let hit = t.intersect(&ray).unwrap();
        assert_relative_eq!(hit.t, 2.0, epsilon = 1e-4);
        assert_relative_eq!(hit.normal.x, 1.0, epsilon = 1e-4);
        assert_relative_eq!(hit.normal.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_ray_enters_through_cap() {
        let t = track();
        let ray = RaySegment2::new(Point2::new(-5.0, 0.0), Point2::new(5.0, 0.0));
        let hit = t.intersect(&ray).unwrap();
        assert_relative_eq!(hit.t, 4.0, epsilon = 1e-4);
        assert_relative_eq!(hit.normal.x, -1.0, epsilon = 1e-4);
        assert_relative_eq!(hit.normal.y, 0.0, epsilon = 1e-4);
    }

    #[test]
    fn test_fully_interior_ray_has_no_hit() {
        let t = track();
        let ray = RaySegment2::new(Point2::new(2.0, 0.0), Point2::new(8.0, 0.0));
        assert!(t.intersect(&ray).is_none());
    }

    #[test]
    fn test_ray_missing_entirely() {
        let t = track();
        let ray = RaySegment2::new(Point2::new(-5.0, 5.0), Point2::new(15.0, 5.0));
        assert!(t.intersect(&ray).is_none());
    }

    #[test]
    fn test_classify_box() {
        let t = track();
        let nested = Aabb2::new(Point2::new(4.0, -1.0), Point2::new(6.0, 1.0));
        assert_eq!(t.classify_box(&nested), IntersectionResult::FullInside);

        let far = Aabb2::new(Point2::new(20.0, 20.0), Point2::new(21.0, 21.0));
        assert_eq!(t.classify_box(&far), IntersectionResult::Misses);

        let straddling = Aabb2::new(Point2::new(4.0, 0.5), Point2::new(6.0, 5.0));
        assert_eq!(t.classify_box(&straddling), IntersectionResult::Intersects);
    }

    #[test]
    fn test_coarse_intersects() {
        let t = track();

        // Strictly enveloping box: fast accept.
        let envelope = Aabb2::new(Point2::new(-5.0, -5.0), Point2::new(15.0, 5.0));
        assert!(t.intersects(&envelope));

        // Box edge crossing a side edge.
        let crossing = Aabb2::new(Point2::new(4.0, 0.5), Point2::new(6.0, 5.0));
        assert!(t.intersects(&crossing));

        // Box overlapping only an end cap.
        let cap_box = Aabb2::new(Point2::new(10.5, -0.25), Point2::new(12.0, 0.25));
        assert!(t.intersects(&cap_box));

        // Inside the (inflated) bounding box but clear of the shape.
        let near_miss = Aabb2::new(Point2::new(10.8, 0.8), Point2::new(10.9, 0.9));
        assert!(!t.intersects(&near_miss));

        // Far away.
        let far = Aabb2::new(Point2::new(30.0, 30.0), Point2::new(31.0, 31.0));
        assert!(!t.intersects(&far));
    }

    #[test]
    fn test_zero_length_segment_behaves_as_disc() {
        let disc = RoundSegment::new(Point2::new(3.0, 3.0), Point2::new(3.0, 3.0), 4.0);

        assert!(disc.is_point_inside(&Point2::new(3.0, 3.0)));
        assert!(disc.is_point_inside(&Point2::new(4.9, 3.0)));
        assert!(!disc.is_point_inside(&Point2::new(5.1, 3.0)));

        let ray = RaySegment2::new(Point2::new(-5.0, 3.0), Point2::new(10.0, 3.0));
        let hit = disc.intersect(&ray).unwrap();
        assert_relative_eq!(hit.t, 6.0, epsilon = 1e-4);
        assert_relative_eq!(hit.normal.x, -1.0, epsilon = 1e-4);

        // Starting at the disc center, the exit is reported.
        let from_center = RaySegment2::new(Point2::new(3.0, 3.0), Point2::new(10.0, 3.0));
        let exit = disc.intersect(&from_center).unwrap();
        assert_relative_eq!(exit.t, 2.0, epsilon = 1e-4);
        assert_relative_eq!(exit.normal.x, 1.0, epsilon = 1e-4);
    }

    #[test]
    fn test_diagonal_track_normals_are_unit() {
        let t = RoundSegment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 10.0), 2.0);
        let ray = RaySegment2::new(Point2::new(5.0, -5.0), Point2::new(5.0, 15.0));
        let hit = t.intersect(&ray).unwrap();
        assert_relative_eq!(hit.normal.norm(), 1.0, epsilon = 1e-5);
        // Entering from below the spine: the normal points away from it.
        assert!(hit.normal.y < 0.0);
    }
}
