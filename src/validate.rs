//! Any-angle path validation against a traversability grid.
//!
//! [`PathValidator`] owns a one-shot [`BitGrid`] built from the caller's
//! boolean map and answers whether a polyline stays in traversable space.
//! Validation runs in three passes over the path:
//!
//! 1. coordinate transform, bounds screen, minimum-segment-length screen;
//! 2. corner legality for every waypoint that touches a grid line;
//! 3. a visibility sweep of every segment over the cells it crosses.
//!
//! The first waypoint or segment to break a rule decides the verdict.
//! Validation takes `&self` and allocates its scratch per call, so one
//! validator may serve several threads.

use crate::geom::{
    corner_wedge, is_point_on_segment, Bounds, WorldPoint, EPS, MIN_SEGMENT_LEN,
};
use crate::grid::BitGrid;
use crate::trace::LineWalker;
use crate::{GridError, Result};

/// Outcome of validating one path.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Verdict {
    /// Every segment lies in traversable space.
    Valid,
    /// Index of the first waypoint or segment that broke a rule.
    InvalidAt(usize),
}

impl Verdict {
    /// Whether the path passed.
    #[inline]
    pub fn is_valid(self) -> bool {
        matches!(self, Verdict::Valid)
    }

    /// First failing index, if any.
    #[inline]
    pub fn failed_at(self) -> Option<usize> {
        match self {
            Verdict::Valid => None,
            Verdict::InvalidAt(i) => Some(i),
        }
    }

    /// The `-1` / index integer convention used by host bindings.
    #[inline]
    pub fn as_int(self) -> i64 {
        match self {
            Verdict::Valid => -1,
            Verdict::InvalidAt(i) => i as i64,
        }
    }
}

/// Unit-cell sides a segment with direction `dir` can cross first, by the
/// clockwise side numbering of [`Bounds::side`]. The second side applies to
/// diagonal motion only.
fn cell_sides(dir: WorldPoint) -> (usize, Option<usize>) {
    if dir.x > EPS {
        if dir.y > EPS {
            (3, Some(0))
        } else if dir.y < -EPS {
            (0, Some(1))
        } else {
            (0, None)
        }
    } else if dir.x < -EPS {
        if dir.y > EPS {
            (2, Some(3))
        } else if dir.y < -EPS {
            (1, Some(2))
        } else {
            (2, None)
        }
    } else if dir.y > EPS {
        (3, None)
    } else {
        (1, None)
    }
}

/// Validator for any-angle paths over a fixed boolean grid.
///
/// The grid is built once from a row-major, top-row-first buffer and is
/// immutable afterwards. Input coordinates are top-down; the validator flips
/// y internally so all geometry runs in the mathematical convention.
#[derive(Clone, Debug)]
pub struct PathValidator {
    grid: BitGrid,
    width: f64,
    height: f64,
}

impl PathValidator {
    /// Build a validator from a flat cell buffer (`true` = traversable).
    ///
    /// The buffer is row-major with the top row first and must hold exactly
    /// `width * height` cells.
    pub fn new(cells: &[bool], width: usize, height: usize) -> Result<Self> {
        if width == 0 || height == 0 {
            return Err(GridError::ZeroSized { width, height });
        }
        let expected = width * height;
        if cells.len() != expected {
            return Err(GridError::CellCountMismatch {
                expected,
                actual: cells.len(),
            });
        }
        let mut grid = BitGrid::new(width as i32, height as i32);
        for (row, chunk) in cells.chunks_exact(width).enumerate() {
            let y = (height - 1 - row) as i32;
            for (x, &traversable) in chunk.iter().enumerate() {
                if traversable {
                    grid.or(x as i32, y, true);
                }
            }
        }
        Ok(Self {
            grid,
            width: width as f64,
            height: height as f64,
        })
    }

    /// Grid width in cells.
    #[inline]
    pub fn width(&self) -> usize {
        self.width as usize
    }

    /// Grid height in cells.
    #[inline]
    pub fn height(&self) -> usize {
        self.height as usize
    }

    /// Flip an input waypoint into the internal bottom-up frame.
    #[inline]
    fn transform(&self, p: WorldPoint) -> WorldPoint {
        WorldPoint::new(p.x, self.height - p.y)
    }

    /// Validate a path of input-frame waypoints.
    ///
    /// Returns [`Verdict::Valid`] for paths of at most one waypoint. On
    /// failure the index refers to the offending waypoint, the segment
    /// starting there, or the waypoint before a degenerate segment.
    pub fn validate(&self, path: &[WorldPoint]) -> Verdict {
        let s = path.len();
        if s <= 1 {
            return Verdict::Valid;
        }

        let bounds = Bounds::new(
            WorldPoint::new(0.0, 0.0),
            WorldPoint::new(self.width, self.height),
        );

        // Pass 1: transform, bounds screen, degenerate-segment screen.
        let mut pts: Vec<WorldPoint> = Vec::with_capacity(s);
        for (i, &p) in path.iter().enumerate() {
            let tp = self.transform(p);
            if !bounds.contains(tp) {
                log::debug!("waypoint {i} out of bounds at ({}, {})", tp.x, tp.y);
                return Verdict::InvalidAt(i);
            }
            if i > 0 && (tp - pts[i - 1]).square() < MIN_SEGMENT_LEN * MIN_SEGMENT_LEN {
                log::debug!("segment {} shorter than the minimum length", i - 1);
                return Verdict::InvalidAt(i - 1);
            }
            pts.push(tp);
        }
        let dirs: Vec<WorldPoint> = pts
            .windows(2)
            .map(|w| (w[1] - w[0]).normalized())
            .collect();

        // Pass 2: corner legality of each waypoint.
        for i in 0..s {
            if !self.waypoint_ok(&pts, i) {
                log::debug!("waypoint {i} touches an illegal corner or wall");
                return Verdict::InvalidAt(i);
            }
        }

        // Pass 3: per-segment visibility.
        for i in 0..s - 1 {
            if self.segment_blocked(pts[i], pts[i + 1], dirs[i]) {
                log::debug!("segment {i} crosses blocked space");
                return Verdict::InvalidAt(i);
            }
        }
        Verdict::Valid
    }

    /// Corner/wall legality of waypoint `i` (internal frame).
    fn waypoint_ok(&self, pts: &[WorldPoint], i: usize) -> bool {
        let p = pts[i];
        let x_int = p.is_integer_x();
        let y_int = p.is_integer_y();
        if x_int && y_int {
            self.corner_waypoint_ok(pts, i)
        } else if x_int || y_int {
            self.edge_waypoint_ok(pts, i, x_int)
        } else {
            // Strictly inside a cell: the segment sweeps decide.
            true
        }
    }

    /// Waypoint on a grid corner: judge against the 2x2 blocked pattern.
    fn corner_waypoint_ok(&self, pts: &[WorldPoint], i: usize) -> bool {
        let s = pts.len();
        let p = pts[i];
        let x = p.x.round() as i32;
        let y = p.y.round() as i32;
        let pattern = !self.grid.region::<1, 1, 2, 2>(x, y) & 0b1111;

        let east = WorldPoint::new(1.0, 0.0);
        let north = WorldPoint::new(0.0, 1.0);
        let west = WorldPoint::new(-1.0, 0.0);
        let south = WorldPoint::new(0.0, -1.0);

        match pattern {
            0b0000 => true,
            0b1111 => false,
            0b0110 => {
                // NW and SE blocked; the free cells meet only at this
                // corner. A path may bounce off the corner inside one free
                // quadrant but never pass between the blocked cells.
                if i == 0 || i == s - 1 {
                    let adj = if i == 0 {
                        pts[1] - pts[0]
                    } else {
                        pts[i - 1] - pts[i]
                    };
                    !adj.is_between_ccw(east, north)
                } else {
                    let to_prev = pts[i - 1] - pts[i];
                    let to_next = pts[i + 1] - pts[i];
                    if !to_prev.is_between_ccw(north, east) {
                        // Both incident rays must stay in the closed NE
                        // sector.
                        !to_next.is_between_ccw(north, east)
                    } else if !to_prev.is_between_ccw(south, west) {
                        !to_next.is_between_ccw(south, west)
                    } else {
                        false
                    }
                }
            }
            0b1001 => {
                // NE and SW blocked: endpoints may not sit on this corner
                // at all.
                if i == 0 || i == s - 1 {
                    false
                } else {
                    let to_prev = pts[i - 1] - pts[i];
                    let to_next = pts[i + 1] - pts[i];
                    if !to_prev.is_between_ccw(east, south) {
                        !to_next.is_between_ccw(east, south)
                    } else if !to_prev.is_between_ccw(west, north) {
                        !to_next.is_between_ccw(west, north)
                    } else {
                        false
                    }
                }
            }
            _ => {
                let Some((p0, p1)) = corner_wedge(pattern) else {
                    return false;
                };
                if i != s - 1 && (pts[i + 1] - pts[i]).is_between_cw(p0, p1) {
                    return false;
                }
                if i != 0 && (pts[i - 1] - pts[i]).is_between_cw(p0, p1) {
                    return false;
                }
                true
            }
        }
    }

    /// Waypoint on a grid edge: judge against the two flanking cells.
    fn edge_waypoint_ok(&self, pts: &[WorldPoint], i: usize, x_int: bool) -> bool {
        let p = pts[i];
        let pattern = if x_int {
            let x = p.x.round() as i32;
            let y = p.y.floor() as i32;
            // bit 0 = cell left of the line, bit 1 = right.
            !self.grid.region::<1, 0, 2, 1>(x, y) & 0b11
        } else {
            let x = p.x.floor() as i32;
            let y = p.y.round() as i32;
            // bit 0 = cell below the line, bit 1 = above.
            !self.grid.region::<0, 1, 1, 2>(x, y) & 0b11
        };
        match pattern {
            0b11 => false,
            0b01 | 0b10 => {
                // One flanking cell is a wall; any incident ray strictly on
                // the wall side is illegal. `wall` is chosen so that "CW of
                // wall" means "into the blocked cell".
                let wall = if x_int {
                    if pattern & 1 != 0 {
                        WorldPoint::new(0.0, -1.0)
                    } else {
                        WorldPoint::new(0.0, 1.0)
                    }
                } else if pattern & 1 != 0 {
                    WorldPoint::new(1.0, 0.0)
                } else {
                    WorldPoint::new(-1.0, 0.0)
                };
                for j in [i.checked_sub(1), i.checked_add(1)] {
                    let Some(j) = j else { continue };
                    if j >= pts.len() {
                        continue;
                    }
                    if wall.is_cw(pts[j] - pts[i]) {
                        return false;
                    }
                }
                true
            }
            _ => true,
        }
    }

    /// Whether the open segment from `u` to `v` intersects blocked space.
    ///
    /// Walks every cell the segment can touch (extended one major-axis cell
    /// past each end) and applies three rules to each blocked cell: an
    /// endpoint strictly inside it, a corner of it lying on the segment with
    /// a forbidding wedge, or the segment crossing one of its facing sides.
    fn segment_blocked(&self, u: WorldPoint, v: WorldPoint, dir: WorldPoint) -> bool {
        let uv = v - u;
        let (primary, secondary) = cell_sides(dir);

        let mut walker = LineWalker::new(u, uv, -1);
        walker.extend(1);

        for (x, y) in walker {
            if self.grid.test(x, y) {
                continue;
            }
            let cell = Bounds::unit_cell(x, y);
            if cell.contains_strict(u) || cell.contains_strict(v) {
                return true;
            }
            let corner = WorldPoint::new(x as f64, y as f64);
            if is_point_on_segment(corner, u, uv) {
                if corner.coincides(u) || corner.coincides(v) {
                    // Endpoints on corners are judged by the waypoint pass.
                    continue;
                }
                let pattern = !self.grid.region::<1, 1, 2, 2>(x, y) & 0b1111;
                match corner_wedge(pattern) {
                    None => return true,
                    Some((p0, p1)) => {
                        if dir.is_between_cw(p0, p1) {
                            return true;
                        }
                    }
                }
                continue;
            }
            let (p0, p1) = cell.side(primary);
            let p01 = p1 - p0;
            if p01.is_ccw(u - p0) && p01.is_cw(v - p0) && dir.is_between_ccw_about(u, p0, p1) {
                return true;
            }
            if let Some(secondary) = secondary {
                let p2 = cell.side(secondary).1;
                let p12 = p2 - p1;
                if p12.is_ccw(u - p1) && p12.is_cw(v - p1) && dir.is_between_ccw_about(u, p1, p2)
                {
                    return true;
                }
            }
        }
        false
    }
}
