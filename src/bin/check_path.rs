//! Validate any-angle paths against a MovingAI map from the command line.
//!
//! ```text
//! check_path --map arena.map --path "1.5,2 4,2 4.5,7.25"
//! ```
//!
//! Prints `-1` for a valid path, otherwise the zero-based index of the
//! first offending waypoint or segment. With `--plan`, runs the Theta*
//! planner between two corners and validates its own output.

use std::process::ExitCode;

use clap::Parser;

use marga_check::plan::ThetaStarPlanner;
use marga_check::{load_map, GridPoint, PathValidator, WorldPoint};

#[derive(Parser, Debug)]
#[command(version, about = "Validate any-angle grid paths")]
struct Args {
    /// MovingAI .map file.
    #[arg(long)]
    map: std::path::PathBuf,

    /// Whitespace-separated waypoints, each `x,y` in map coordinates.
    #[arg(long, conflicts_with = "plan")]
    path: Option<String>,

    /// Plan with Theta* instead: `x0,y0 x1,y1` corner endpoints.
    #[arg(long)]
    plan: Option<String>,
}

fn parse_waypoints(text: &str) -> Result<Vec<WorldPoint>, String> {
    text.split_whitespace()
        .map(|pair| {
            let (x, y) = pair
                .split_once(',')
                .ok_or_else(|| format!("waypoint `{pair}` is not x,y"))?;
            let x: f64 = x.parse().map_err(|e| format!("bad x in `{pair}`: {e}"))?;
            let y: f64 = y.parse().map_err(|e| format!("bad y in `{pair}`: {e}"))?;
            if !x.is_finite() || !y.is_finite() {
                return Err(format!("waypoint `{pair}` is not finite"));
            }
            Ok(WorldPoint::new(x, y))
        })
        .collect()
}

fn run(args: Args) -> Result<i64, String> {
    let map = load_map(&args.map).map_err(|e| format!("{}: {e}", args.map.display()))?;
    let validator = PathValidator::new(&map.cells, map.width, map.height)
        .map_err(|e| e.to_string())?;

    let path = if let Some(text) = &args.plan {
        let ends = parse_waypoints(text)?;
        let [start, goal] = ends.as_slice() else {
            return Err("--plan takes exactly two corners".into());
        };
        let to_corner = |p: &WorldPoint| GridPoint::new(p.x.round() as i32, p.y.round() as i32);
        let planned = ThetaStarPlanner::with_defaults()
            .plan(&map, to_corner(start), to_corner(goal))
            .ok_or("no path found")?;
        log::info!(
            "planned {} waypoints, length {:.3}",
            planned.waypoints.len(),
            planned.length
        );
        planned.waypoints
    } else {
        let text = args.path.as_deref().ok_or("one of --path / --plan is required")?;
        parse_waypoints(text)?
    };

    Ok(validator.validate(&path).as_int())
}

fn main() -> ExitCode {
    env_logger::init();
    let args = Args::parse();
    match run(args) {
        Ok(verdict) => {
            println!("{verdict}");
            ExitCode::SUCCESS
        }
        Err(message) => {
            eprintln!("error: {message}");
            ExitCode::FAILURE
        }
    }
}
