//! Segment-on-segment intersection posed without division.

use super::point::{Coord, GridPoint, Point};
use super::{Frac, EPS};

/// Outcome of intersecting the lines `a + t*av` and `b + s*bv`.
///
/// `t = t_num / scale` and `s = s_num / scale`; the segments intersect iff
/// both ratios lie in `[0, 1]`. The integer form keeps the numerators and a
/// normalized positive denominator so callers can pose range tests exactly.
#[derive(Clone, Copy, Debug)]
pub struct Intersection<T: Coord> {
    /// Denominator `av x bv`; zero (within epsilon) means parallel lines.
    pub scale: T::Acc,
    /// Numerator of the parameter along `av`.
    pub t_num: T::Acc,
    /// Numerator of the parameter along `bv`.
    pub s_num: T::Acc,
}

impl<T: Coord> Intersection<T> {
    /// Whether the two supporting lines are parallel (or collinear).
    #[inline]
    pub fn is_parallel(self) -> bool {
        let eps = T::orient_eps();
        !(self.scale < -eps) && !(self.scale > eps)
    }

    /// Whether the two segments share a point (endpoints included).
    pub fn hits(self) -> bool {
        !self.is_parallel()
            && T::in_unit_range(self.t_num, self.scale)
            && T::in_unit_range(self.s_num, self.scale)
    }
}

impl Intersection<i32> {
    /// Parameter along the first segment as an exact fraction.
    #[inline]
    pub fn t(self) -> Frac {
        Frac::new(self.t_num, self.scale)
    }

    /// Parameter along the second segment as an exact fraction.
    #[inline]
    pub fn s(self) -> Frac {
        Frac::new(self.s_num, self.scale)
    }
}

/// Intersect segments `a + t*av` and `b + s*bv`.
///
/// The integer result is normalized so `scale > 0` unless the lines are
/// parallel, in which case `t_num` carries the side of `b` relative to the
/// first line (zero when collinear).
pub fn segment_intersect<T: Coord>(
    a: Point<T>,
    av: Point<T>,
    b: Point<T>,
    bv: Point<T>,
) -> Intersection<T> {
    let scale = av.cross(bv);
    let ab = b - a;
    let mut out = Intersection {
        scale,
        t_num: ab.cross(bv),
        s_num: ab.cross(av),
    };
    if out.is_parallel() {
        out.t_num = av.cross(ab);
        out.s_num = T::acc_zero();
        return out;
    }
    if out.scale < T::acc_zero() {
        out.scale = -out.scale;
        out.t_num = -out.t_num;
        out.s_num = -out.s_num;
    }
    out
}

/// Squared distance ratio of `p` to the line through `a` and `b`, relative
/// to the squared length of `ab`.
///
/// The integer form squares already-widened cross products, so it
/// accumulates in `i64` throughout; coordinates must stay below 15 bits.
pub fn point_to_line_factor(p: GridPoint, a: GridPoint, b: GridPoint) -> Frac {
    debug_assert!(p.x.abs() < 1 << 14 && p.y.abs() < 1 << 14);
    debug_assert!(a.x.abs() < 1 << 14 && a.y.abs() < 1 << 14);
    debug_assert!(b.x.abs() < 1 << 14 && b.y.abs() < 1 << 14);
    let x = a - p;
    let y = b - p;
    let n = x.cross(y);
    let d = x - y;
    Frac::new(n * n, d.square())
}

/// Floating-point counterpart of [`point_to_line_factor`].
pub fn point_to_line_factor_f(
    p: Point<f64>,
    a: Point<f64>,
    b: Point<f64>,
) -> f64 {
    let x = a - p;
    let y = b - p;
    let n = x.cross(y);
    let d = x - y;
    debug_assert!(d.square() > EPS);
    (n * n) / d.square()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::geom::WorldPoint;

    #[test]
    fn test_crossing_segments_integer() {
        // Diagonals of the unit square cross in the middle.
        let hit = segment_intersect(
            GridPoint::new(0, 0),
            GridPoint::new(2, 2),
            GridPoint::new(0, 2),
            GridPoint::new(2, -2),
        );
        assert!(hit.hits());
        assert_eq!(hit.t(), Frac::new(1, 2));
        assert_eq!(hit.s(), Frac::new(1, 2));
    }

    #[test]
    fn test_normalized_denominator_is_positive() {
        let hit = segment_intersect(
            GridPoint::new(0, 2),
            GridPoint::new(2, -2),
            GridPoint::new(0, 0),
            GridPoint::new(2, 2),
        );
        assert!(hit.scale > 0);
        assert!(hit.hits());
    }

    #[test]
    fn test_disjoint_segments() {
        let miss = segment_intersect(
            GridPoint::new(0, 0),
            GridPoint::new(1, 1),
            GridPoint::new(5, 0),
            GridPoint::new(0, 1),
        );
        assert!(!miss.hits());
    }

    #[test]
    fn test_parallel_and_collinear() {
        let par = segment_intersect(
            GridPoint::new(0, 0),
            GridPoint::new(2, 0),
            GridPoint::new(0, 1),
            GridPoint::new(2, 0),
        );
        assert!(par.is_parallel());
        assert!(!par.hits());
        // Side marker: b lies CCW of the first line.
        assert!(par.t_num > 0);

        let colin = segment_intersect(
            GridPoint::new(0, 0),
            GridPoint::new(2, 0),
            GridPoint::new(5, 0),
            GridPoint::new(2, 0),
        );
        assert!(colin.is_parallel());
        assert_eq!(colin.t_num, 0);
    }

    #[test]
    fn test_endpoint_touch_counts() {
        let touch = segment_intersect(
            GridPoint::new(0, 0),
            GridPoint::new(2, 2),
            GridPoint::new(2, 2),
            GridPoint::new(1, -3),
        );
        assert!(touch.hits());
        assert_eq!(touch.t(), Frac::new(1, 1));
    }

    #[test]
    fn test_float_form_matches() {
        let hit = segment_intersect(
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(2.0, 2.0),
            WorldPoint::new(0.0, 2.0),
            WorldPoint::new(2.0, -2.0),
        );
        assert!(hit.hits());
        assert!((hit.t_num / hit.scale - 0.5).abs() < 1e-12);
    }

    #[test]
    fn test_point_to_line_factor() {
        // Distance of (0, 1) to the x axis is 1, |ab| = 2: ratio 1/4.
        let f = point_to_line_factor(
            GridPoint::new(0, 1),
            GridPoint::new(-1, 0),
            GridPoint::new(1, 0),
        );
        assert_eq!(f, Frac::new(1, 4));
        let ff = point_to_line_factor_f(
            WorldPoint::new(0.0, 1.0),
            WorldPoint::new(-1.0, 0.0),
            WorldPoint::new(1.0, 0.0),
        );
        assert!((ff - 0.25).abs() < 1e-12);
    }
}
