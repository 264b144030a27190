//! Toroidal Life - bit-packed Game-of-Life grid engine
//!
//! Maintains a 2D boolean grid with wraparound edges, advances it one
//! generation at a time under the standard B3/S23 rules, and exposes
//! the packed cell buffer for an external renderer to decode directly.
//! Rendering and frame scheduling belong to the caller; the engine is
//! a pure in-process computational unit.
//!
//! # Example
//!
//! ```
//! use toroidal_life::{Grid, SeedPolicy};
//!
//! // Blinker: a vertical line of three cells.
//! let seed = SeedPolicy::Pattern(vec![(1, 2), (2, 2), (3, 2)]);
//! let mut grid = Grid::new(5, 5, &seed).unwrap();
//!
//! grid.tick();
//!
//! // One generation later the line lies horizontally.
//! assert!(grid.cell(2, 1).unwrap());
//! assert!(grid.cell(2, 2).unwrap());
//! assert!(grid.cell(2, 3).unwrap());
//! assert_eq!(grid.generation(), 1);
//! ```

mod automaton;
mod error;
mod grid;
mod seed;

pub use error::GridError;
pub use grid::Grid;
pub use seed::SeedPolicy;
