//! Planner/validator agreement: paths produced by the Theta* planner pass
//! the validator on maps whose obstacles are solid rectangles (no diagonal
//! blocked pairs, where the planner's line-of-sight is more permissive than
//! the corner-touching policy).

mod common;

use approx::assert_relative_eq;
use marga_check::plan::ThetaStarPlanner;
use marga_check::{GridMap, GridPoint, PathValidator, Verdict};

fn setup(rows: &[&str]) -> (GridMap, PathValidator) {
    let map = GridMap::from_ascii(rows).expect("well-formed test map");
    let validator = PathValidator::new(&map.cells, map.width, map.height).unwrap();
    (map, validator)
}

fn assert_planned_path_validates(rows: &[&str], start: (i32, i32), goal: (i32, i32)) {
    let (map, validator) = setup(rows);
    let planner = ThetaStarPlanner::with_defaults();
    let start = GridPoint::new(start.0, start.1);
    let goal = GridPoint::new(goal.0, goal.1);
    let planned = planner
        .plan(&map, start, goal)
        .expect("a path exists in this map");

    assert_eq!(planned.waypoints.first(), Some(&start.to_world()));
    assert_eq!(planned.waypoints.last(), Some(&goal.to_world()));

    let straight = (goal.to_world() - start.to_world()).length();
    assert!(
        planned.length >= straight - 1e-9,
        "planned length {} beats the straight line {straight}",
        planned.length
    );

    assert_eq!(
        validator.validate(&planned.waypoints),
        Verdict::Valid,
        "planner output must satisfy the validator on {rows:?}"
    );
}

#[test]
fn test_open_room_path_validates() {
    let rows = ["..........", "..........", "..........", "..........", ".........."];
    assert_planned_path_validates(&rows, (0, 0), (10, 5));

    // In the open the plan is the straight line.
    let (map, _) = setup(&rows);
    let planned = ThetaStarPlanner::with_defaults()
        .plan(&map, GridPoint::new(0, 0), GridPoint::new(10, 5))
        .unwrap();
    assert_relative_eq!(planned.length, 125.0_f64.sqrt(), max_relative = 1e-9);
}

#[test]
fn test_path_around_rectangle_validates() {
    let rows = [
        "............",
        "............",
        "............",
        "....####....",
        "....####....",
        "............",
        "............",
        "............",
    ];
    assert_planned_path_validates(&rows, (0, 4), (12, 4));
}

#[test]
fn test_path_through_doorway_validates() {
    let rows = [
        "..........",
        "..........",
        "#####.####",
        "..........",
        "..........",
    ];
    assert_planned_path_validates(&rows, (1, 1), (9, 4));
}

#[test]
fn test_l_shaped_detour_validates() {
    let rows = [
        "........",
        ".######.",
        ".#......",
        ".#......",
        "........",
    ];
    assert_planned_path_validates(&rows, (4, 3), (0, 0));
}

#[test]
fn test_sealed_goal_is_unreachable() {
    let rows = [
        ".....",
        ".###.",
        ".#.#.",
        ".###.",
        ".....",
    ];
    let (map, _) = setup(&rows);
    let planner = ThetaStarPlanner::with_defaults();
    // The goal corner lies strictly inside the sealed chamber.
    assert!(planner
        .plan(&map, GridPoint::new(0, 0), GridPoint::new(2, 2))
        .is_none());
}

#[test]
fn test_identical_start_and_goal() {
    let rows = ["...", "...", "..."];
    let (map, validator) = setup(&rows);
    let planner = ThetaStarPlanner::with_defaults();
    let planned = planner
        .plan(&map, GridPoint::new(1, 1), GridPoint::new(1, 1))
        .expect("trivial path");
    assert_eq!(planned.waypoints.len(), 1);
    assert_eq!(planned.length, 0.0);
    assert_eq!(validator.validate(&planned.waypoints), Verdict::Valid);
}
