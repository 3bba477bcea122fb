//! Map loading.

mod map_file;

pub use map_file::{load_map, parse_map, GridMap, MapFormatError};
