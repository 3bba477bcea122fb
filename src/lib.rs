//! # marga-check
//!
//! Validation of **any-angle paths** on 2D traversability grids.
//!
//! Given a boolean cell map and a polyline of real-valued waypoints, the
//! validator decides whether every straight segment between consecutive
//! waypoints stays in traversable space, under a well-defined corner
//! touching policy: a segment may graze a wall face or slide along a
//! boundary ray, but may not cut through a corner whose neighborhood
//! forbids its direction, and may never cross a blocked cell's interior.
//!
//! ## Quick start
//!
//! ```rust
//! use marga_check::{PathValidator, Verdict, WorldPoint};
//!
//! // 3x1 corridor with a wall in the middle, top row first.
//! let cells = [true, false, true];
//! let validator = PathValidator::new(&cells, 3, 1).unwrap();
//!
//! let path = [WorldPoint::new(0.0, 0.5), WorldPoint::new(3.0, 0.5)];
//! assert_eq!(validator.validate(&path), Verdict::InvalidAt(0));
//! ```
//!
//! ## Architecture
//!
//! - [`geom`]: points, orientation predicates, angular sectors, the corner
//!   wedge table, and the shared epsilon policy
//! - [`grid`]: bit-packed occupancy storage with a padded border for
//!   branch-free neighborhood reads
//! - [`trace`]: enumeration of the cells a continuous segment crosses
//! - [`validate`]: the path validator itself
//! - [`plan`]: a sibling Theta* planner whose output the validator checks
//! - [`io`]: MovingAI `.map` file loading
//! - [`handle`]: an explicit initialize/validate/reset triple for host
//!   bindings that need one validator per process
//!
//! ## Coordinate convention
//!
//! Input maps and waypoints are top-down (row 0 is the top row). The
//! validator flips y once on entry so the geometry runs with y increasing
//! upward; callers never see the flipped frame.

pub mod error;
pub mod geom;
pub mod grid;
pub mod handle;
pub mod io;
pub mod plan;
pub mod trace;
pub mod validate;

pub use error::{GridError, Result};
pub use geom::{GridPoint, WorldPoint};
pub use io::{load_map, GridMap, MapFormatError};
pub use plan::{PlannedPath, ThetaStarConfig, ThetaStarPlanner};
pub use validate::{PathValidator, Verdict};
