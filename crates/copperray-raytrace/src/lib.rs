#![warn(missing_docs)]

//! 2D shape primitives and exact ray intersection for the copperray renderer.
//!
//! The board renderer models copper features (tracks, pads) as flat 2D
//! shapes, each wrapped in an axis-aligned bounding box. For every traced
//! ray, the acceleration structure that owns these shapes first culls
//! against the box (cheap reject), then asks the exact shape for a hit
//! distance and outward normal for shading. All queries here are pure
//! functions over immutable values and safe to call from any number of
//! render worker threads.
//!
//! # Architecture
//!
//! - [`Ray2`] / [`RaySegment2`] - ray value types with precomputed inverse
//!   direction, plus the low-level segment and circle intersectors
//! - [`Aabb2`] - bounding box with slab-method ray tests and ULP-nudge
//!   inflation for conservative culling
//! - [`shapes`] - board leaf shapes ([`RoundSegment`], [`FilledCircle`])
//!   and the [`Shape2d`] dispatch enum
//! - [`Hit2`] - hit distance plus outward unit normal
//!
//! # Example
//!
//! ```
//! use copperray_math::Point2;
//! use copperray_raytrace::{RaySegment2, RoundSegment};
//!
//! // A track from (0,0) to (10,0), 2.0 wide.
//! let track = RoundSegment::new(Point2::new(0.0, 0.0), Point2::new(10.0, 0.0), 2.0);
//!
//! let ray = RaySegment2::new(Point2::new(5.0, -5.0), Point2::new(5.0, 5.0));
//! let hit = track.intersect(&ray).unwrap();
//! assert!((hit.t - 4.0).abs() < 1e-5);
//! ```

pub mod bbox;
mod ray;
pub mod shapes;

pub use bbox::Aabb2;
pub use ray::{segments_intersect, CircleHits, Hit2, Ray2, RaySegment2};
pub use shapes::{FilledCircle, IntersectionResult, RoundSegment, Shape2d};
