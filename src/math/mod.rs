//! Mathematical utilities: polynomial evaluation and uniform time grids.

pub mod grid;
pub mod polynomial;

pub use grid::*;
pub use polynomial::*;
