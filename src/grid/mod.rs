//! Packed occupancy storage.

mod bit_grid;

pub use bit_grid::{BitGrid, BitIndex, PADDING};
