//! Axis-aligned boxes with epsilon-aware containment.

use serde::{Deserialize, Serialize};

use super::point::WorldPoint;
use super::EPS;

/// Axis-aligned bounding box over floating-point coordinates.
///
/// Containment tests follow the shared epsilon policy: [`Bounds::contains`]
/// is inclusive within [`EPS`] of the boundary, [`Bounds::contains_strict`]
/// requires the point to clear the boundary by more than [`EPS`].
#[derive(Clone, Copy, Debug, PartialEq, Serialize, Deserialize)]
pub struct Bounds {
    /// Minimum corner.
    pub min: WorldPoint,
    /// Maximum corner.
    pub max: WorldPoint,
}

impl Bounds {
    /// Create a box from its corners; `min` must not exceed `max`.
    #[inline]
    pub fn new(min: WorldPoint, max: WorldPoint) -> Self {
        debug_assert!(min.x <= max.x && min.y <= max.y);
        Self { min, max }
    }

    /// The unit cell whose lower-left corner is `(x, y)`.
    #[inline]
    pub fn unit_cell(x: i32, y: i32) -> Self {
        let min = WorldPoint::new(x as f64, y as f64);
        Self::new(min, WorldPoint::new(min.x + 1.0, min.y + 1.0))
    }

    /// Box width.
    #[inline]
    pub fn width(&self) -> f64 {
        self.max.x - self.min.x
    }

    /// Box height.
    #[inline]
    pub fn height(&self) -> f64 {
        self.max.y - self.min.y
    }

    /// Whether `p` lies inside or on the boundary (within [`EPS`]).
    pub fn contains(&self, p: WorldPoint) -> bool {
        self.min.x - EPS <= p.x
            && p.x <= self.max.x + EPS
            && self.min.y - EPS <= p.y
            && p.y <= self.max.y + EPS
    }

    /// Whether `p` lies strictly inside, clearing the boundary by [`EPS`].
    pub fn contains_strict(&self, p: WorldPoint) -> bool {
        self.min.x + EPS < p.x
            && p.x < self.max.x - EPS
            && self.min.y + EPS < p.y
            && p.y < self.max.y - EPS
    }

    /// Corner by index: 0 = SW, 1 = SE, 2 = NW, 3 = NE.
    pub fn corner(&self, id: usize) -> WorldPoint {
        debug_assert!(id < 4);
        WorldPoint::new(
            if id & 1 == 0 { self.min.x } else { self.max.x },
            if id & 2 == 0 { self.min.y } else { self.max.y },
        )
    }

    /// Side by index, endpoints ordered so the four sides chain clockwise
    /// around the box: 0 = left (SW to NW), 1 = top (NW to NE),
    /// 2 = right (NE to SE), 3 = bottom (SE to SW).
    pub fn side(&self, id: usize) -> (WorldPoint, WorldPoint) {
        debug_assert!(id < 4);
        match id {
            0 => (self.corner(0), self.corner(2)),
            1 => (self.corner(2), self.corner(3)),
            2 => (self.corner(3), self.corner(1)),
            _ => (self.corner(1), self.corner(0)),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_contains_is_edge_inclusive() {
        let b = Bounds::new(WorldPoint::new(0.0, 0.0), WorldPoint::new(5.0, 3.0));
        assert!(b.contains(WorldPoint::new(0.0, 0.0)));
        assert!(b.contains(WorldPoint::new(5.0, 3.0)));
        assert!(b.contains(WorldPoint::new(2.5, 1.5)));
        assert!(!b.contains(WorldPoint::new(5.1, 1.0)));
        assert!(!b.contains(WorldPoint::new(2.0, -0.1)));
        // NaN is never contained.
        assert!(!b.contains(WorldPoint::new(f64::NAN, 1.0)));
    }

    #[test]
    fn test_contains_strict_excludes_edges() {
        let b = Bounds::unit_cell(2, 3);
        assert!(b.contains_strict(WorldPoint::new(2.5, 3.5)));
        assert!(!b.contains_strict(WorldPoint::new(2.0, 3.5)));
        assert!(!b.contains_strict(WorldPoint::new(2.5, 4.0)));
    }

    #[test]
    fn test_corners() {
        let b = Bounds::unit_cell(1, 1);
        assert_eq!(b.corner(0), WorldPoint::new(1.0, 1.0));
        assert_eq!(b.corner(1), WorldPoint::new(2.0, 1.0));
        assert_eq!(b.corner(2), WorldPoint::new(1.0, 2.0));
        assert_eq!(b.corner(3), WorldPoint::new(2.0, 2.0));
    }

    #[test]
    fn test_sides_chain_clockwise() {
        let b = Bounds::unit_cell(0, 0);
        for id in 0..4 {
            let (_, end) = b.side(id);
            let (next_start, _) = b.side((id + 1) % 4);
            assert_eq!(end, next_start, "side {id} must chain into side {}", (id + 1) % 4);
        }
    }
}
