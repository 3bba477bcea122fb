//! Geometric primitives for any-angle path validation.
//!
//! Everything here operates on the pair-of-points algebra: a point doubles as
//! a direction vector, orientation is decided by the sign of a cross product,
//! and angular sectors are expressed as ordered pairs of direction vectors.
//!
//! Two coordinate incarnations coexist behind the [`Coord`] trait:
//!
//! - [`GridPoint`] (`i32`): exact predicates, products widened to `i64`
//! - [`WorldPoint`] (`f64`): predicates tolerate [`EPS`] of orientation noise
//!
//! The epsilon policy lives in the three constants below and nowhere else.

mod bounds;
mod frac;
mod intersect;
mod point;
mod wedge;

pub use bounds::Bounds;
pub use frac::Frac;
pub use intersect::{
    point_to_line_factor, point_to_line_factor_f, segment_intersect, Intersection,
};
pub use point::{is_point_on_segment, Coord, GridPoint, Orient, Point, WorldPoint};
pub use wedge::corner_wedge;

/// Baseline orientation epsilon for floating-point predicates.
pub const EPS: f64 = 1e-8;

/// A floating-point coordinate within this distance of an integer is treated
/// as lying exactly on the grid line.
pub const EPS_INT: f64 = 1e-6;

/// Minimum Euclidean length of a path segment; anything shorter is rejected
/// as degenerate before its direction is normalized.
pub const MIN_SEGMENT_LEN: f64 = 1e-2;
