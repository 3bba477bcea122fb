//! Any-angle path planning.

mod theta_star;

pub use theta_star::{PlannedPath, ThetaStarConfig, ThetaStarPlanner};
