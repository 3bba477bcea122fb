//! Shared helpers for the integration suite.

#![allow(dead_code)]

use marga_check::{PathValidator, WorldPoint};

/// Build a validator from ASCII art rows, `#` blocked, anything else open.
/// Rows are in input order: first row is the top of the map.
pub fn validator(rows: &[&str]) -> PathValidator {
    let height = rows.len();
    let width = rows[0].len();
    let cells: Vec<bool> = rows
        .iter()
        .flat_map(|row| row.chars().map(|c| c != '#'))
        .collect();
    PathValidator::new(&cells, width, height).expect("well-formed test grid")
}

/// Waypoints from coordinate pairs.
pub fn path(points: &[(f64, f64)]) -> Vec<WorldPoint> {
    points.iter().map(|&(x, y)| WorldPoint::new(x, y)).collect()
}

/// The same path walked backwards.
pub fn reversed(points: &[WorldPoint]) -> Vec<WorldPoint> {
    let mut out = points.to_vec();
    out.reverse();
    out
}
