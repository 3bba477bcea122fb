//! Theta* planner for any-angle paths over grid corners.
//!
//! Theta* extends A* with line-of-sight checks against each node's parent,
//! so paths cut across open space instead of hugging grid directions. The
//! planner is a sibling of the validator, not part of it: it searches the
//! raw top-down cell map and emits waypoint paths the validator accepts.

use std::cmp::Ordering;
use std::collections::BinaryHeap;
use std::f64::consts::SQRT_2;

use serde::{Deserialize, Serialize};

use crate::geom::{GridPoint, WorldPoint};
use crate::io::GridMap;

/// Configuration for the Theta* planner.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct ThetaStarConfig {
    /// Maximum node expansions before giving up.
    pub max_expansions: usize,
}

impl Default for ThetaStarConfig {
    fn default() -> Self {
        Self {
            max_expansions: 1_000_000,
        }
    }
}

/// A planned path in input (top-down) corner coordinates.
#[derive(Clone, Debug, Serialize, Deserialize)]
pub struct PlannedPath {
    /// Corner waypoints from start to goal.
    pub waypoints: Vec<WorldPoint>,
    /// Total Euclidean length.
    pub length: f64,
}

#[derive(Clone, Copy, Debug)]
struct SearchNode {
    node: usize,
    g: f64,
    f: f64,
}

impl PartialEq for SearchNode {
    fn eq(&self, other: &Self) -> bool {
        self.f == other.f && self.g == other.g
    }
}

impl Eq for SearchNode {}

impl Ord for SearchNode {
    fn cmp(&self, other: &Self) -> Ordering {
        // Min-heap on f, larger g first on ties.
        other
            .f
            .partial_cmp(&self.f)
            .unwrap_or(Ordering::Equal)
            .then_with(|| self.g.partial_cmp(&other.g).unwrap_or(Ordering::Equal))
    }
}

impl PartialOrd for SearchNode {
    fn partial_cmp(&self, other: &Self) -> Option<Ordering> {
        Some(self.cmp(other))
    }
}

/// The eight octile moves.
const MOVES: [(i32, i32); 8] = [
    (0, -1),
    (0, 1),
    (1, 0),
    (-1, 0),
    (1, -1),
    (-1, -1),
    (1, 1),
    (-1, 1),
];

/// Theta* search over the corners of a cell map.
pub struct ThetaStarPlanner {
    config: ThetaStarConfig,
}

impl ThetaStarPlanner {
    /// Create a planner with the given configuration.
    pub fn new(config: ThetaStarConfig) -> Self {
        Self { config }
    }

    /// Create a planner with default configuration.
    pub fn with_defaults() -> Self {
        Self::new(ThetaStarConfig::default())
    }

    /// Plan from `start` to `goal`, both grid corners in top-down
    /// coordinates. Returns `None` when no path exists.
    pub fn plan(&self, map: &GridMap, start: GridPoint, goal: GridPoint) -> Option<PlannedPath> {
        let search = Search {
            map,
            stride: map.width as i32 + 1,
        };
        if !search.in_corners(start) || !search.in_corners(goal) {
            log::warn!("planner endpoints outside the corner lattice");
            return None;
        }

        let nodes = (map.width + 1) * (map.height + 1);
        let mut dist = vec![f64::INFINITY; nodes];
        let mut parent: Vec<i64> = vec![-2; nodes];

        let sid = search.id(start);
        let gid = search.id(goal);
        dist[sid] = 0.0;
        parent[sid] = -1;

        let mut open = BinaryHeap::new();
        open.push(SearchNode {
            node: sid,
            g: 0.0,
            f: octile(start, goal),
        });

        let mut expansions = 0;
        while let Some(cur) = open.pop() {
            if cur.g != dist[cur.node] {
                continue;
            }
            if cur.node == gid {
                return Some(search.reconstruct(&parent, gid));
            }
            expansions += 1;
            if expansions > self.config.max_expansions {
                log::warn!("theta* exceeded {} expansions", self.config.max_expansions);
                return None;
            }

            let at = search.corner(cur.node);
            for (i, &(dx, dy)) in MOVES.iter().enumerate() {
                if !search.valid_move(at, i) {
                    continue;
                }
                let next = GridPoint::new(at.x + dx, at.y + dy);
                if !search.in_corners(next) {
                    continue;
                }
                let step = if dx == 0 || dy == 0 { 1.0 } else { SQRT_2 };
                let mut g = cur.g + step;
                let mut pid = cur.node as i64;

                // Pull the parent pointer as far up the ancestor chain as
                // line of sight allows.
                while parent[pid as usize] >= 0 {
                    let anc = parent[pid as usize] as usize;
                    let ap = search.corner(anc);
                    if search.visible(ap, next) {
                        g = dist[anc] + euclidean(ap, next);
                        pid = anc as i64;
                    } else {
                        break;
                    }
                }

                let nid = search.id(next);
                if g < dist[nid] {
                    dist[nid] = g;
                    parent[nid] = pid;
                    open.push(SearchNode {
                        node: nid,
                        g,
                        f: g + octile(next, goal),
                    });
                }
            }
        }
        None
    }
}

/// Octile-distance heuristic between corners.
fn octile(a: GridPoint, b: GridPoint) -> f64 {
    let dx = (a.x - b.x).abs();
    let dy = (a.y - b.y).abs();
    let diag = dx.min(dy);
    let card = dx + dy - 2 * diag;
    card as f64 + diag as f64 * SQRT_2
}

fn euclidean(a: GridPoint, b: GridPoint) -> f64 {
    let d = a - b;
    (d.square() as f64).sqrt()
}

struct Search<'a> {
    map: &'a GridMap,
    stride: i32,
}

impl Search<'_> {
    #[inline]
    fn in_corners(&self, p: GridPoint) -> bool {
        0 <= p.x
            && p.x <= self.map.width as i32
            && 0 <= p.y
            && p.y <= self.map.height as i32
    }

    #[inline]
    fn id(&self, p: GridPoint) -> usize {
        (p.y * self.stride + p.x) as usize
    }

    #[inline]
    fn corner(&self, id: usize) -> GridPoint {
        GridPoint::new(id as i32 % self.stride, id as i32 / self.stride)
    }

    /// Cell traversability, blocked outside the map.
    #[inline]
    fn open_cell(&self, x: i32, y: i32) -> bool {
        self.map.is_traversable(x, y)
    }

    /// A corner both of whose diagonal cell pairs are blocked cannot be
    /// passed diagonally.
    fn open_corner(&self, x: i32, y: i32) -> bool {
        if !self.open_cell(x - 1, y - 1) && !self.open_cell(x, y) {
            return false;
        }
        if !self.open_cell(x - 1, y) && !self.open_cell(x, y - 1) {
            return false;
        }
        true
    }

    /// Whether the octile move `m` (index into [`MOVES`]) is allowed from
    /// corner `(x, y)`.
    ///
    /// A cardinal move needs one open cell beside the traversed edge; a
    /// diagonal move needs its quadrant cell open and the corner passable.
    fn valid_move(&self, at: GridPoint, m: usize) -> bool {
        let (x, y) = (at.x, at.y);
        match m {
            // North (top-down: y decreases).
            0 => self.open_cell(x - 1, y - 1) || self.open_cell(x, y - 1),
            // South.
            1 => self.open_cell(x - 1, y) || self.open_cell(x, y),
            // East.
            2 => self.open_cell(x, y - 1) || self.open_cell(x, y),
            // West.
            3 => self.open_cell(x - 1, y - 1) || self.open_cell(x - 1, y),
            // Northeast.
            4 => self.open_cell(x, y - 1) && self.open_corner(x, y),
            // Northwest.
            5 => self.open_cell(x - 1, y - 1) && self.open_corner(x, y),
            // Southeast.
            6 => self.open_cell(x, y) && self.open_corner(x, y),
            // Southwest.
            7 => self.open_cell(x - 1, y) && self.open_corner(x, y),
            _ => false,
        }
    }

    /// Integer line of sight between two corners over open cells.
    fn visible(&self, p: GridPoint, c: GridPoint) -> bool {
        let dx = c.x - p.x;
        let dy = c.y - p.y;
        if dx == 0 && dy == 0 {
            return false;
        }
        if dx == 0 {
            let sy = dy.signum();
            let (from, to) = if sy > 0 { (p.y, c.y - 1) } else { (p.y - 1, c.y) };
            let mut y = from;
            loop {
                if !self.open_cell(p.x - 1, y) && !self.open_cell(p.x, y) {
                    return false;
                }
                if y == to {
                    break;
                }
                y += sy;
            }
            true
        } else if dy == 0 {
            let sx = dx.signum();
            let (from, to) = if sx > 0 { (p.x, c.x - 1) } else { (p.x - 1, c.x) };
            let mut x = from;
            loop {
                if !self.open_cell(x, p.y - 1) && !self.open_cell(x, p.y) {
                    return false;
                }
                if x == to {
                    break;
                }
                x += sx;
            }
            true
        } else {
            const EPS_LOS: f64 = 1e-6;
            let (x0, y0, x1, y1) = if p.x < c.x {
                (p.x, p.y, c.x, c.y)
            } else {
                (c.x, c.y, p.x, p.y)
            };
            let r = (y1 - y0) as f64 / (x1 - x0) as f64;
            let sy = (y1 - y0).signum();
            let line = |x: f64| r * x - r * x0 as f64 + y0 as f64;
            for x in x0..x1 {
                let from = line(x as f64 + EPS_LOS).floor() as i32;
                let to = line(x as f64 + 1.0 - EPS_LOS).floor() as i32;
                let mut y = from;
                loop {
                    if !self.open_cell(x, y) {
                        return false;
                    }
                    if y == to {
                        break;
                    }
                    y += sy;
                }
            }
            true
        }
    }

    fn reconstruct(&self, parent: &[i64], goal: usize) -> PlannedPath {
        let mut ids = Vec::new();
        let mut at = goal as i64;
        while at >= 0 {
            ids.push(at as usize);
            at = parent[at as usize];
        }
        ids.reverse();
        let waypoints: Vec<WorldPoint> = ids
            .iter()
            .map(|&id| self.corner(id).to_world())
            .collect();
        let length = waypoints
            .windows(2)
            .map(|w| (w[1] - w[0]).length())
            .sum();
        PlannedPath { waypoints, length }
    }
}
