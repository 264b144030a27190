//! The grid engine: packed cell storage and the public mutation and
//! query surface.

use std::fmt;

use log::{debug, trace};

use crate::automaton;
use crate::error::GridError;
use crate::seed::SeedPolicy;

/// A toroidal Game-of-Life grid with bit-packed cell storage.
///
/// Cells occupy one bit each, row-major, LSB-first within every byte;
/// [`snapshot`](Grid::snapshot) exposes that buffer directly, so an
/// external renderer decodes it with the same `row * width + column`
/// formula the engine uses internally. Dimensions are fixed for the
/// grid's lifetime.
pub struct Grid {
    pub(crate) width: u32,
    pub(crate) height: u32,
    /// Current generation. Always exactly `ceil(width * height / 8)`
    /// bytes; bits past the last cell are always zero.
    pub(crate) cells: Vec<u8>,
    /// Inactive buffer the next generation is computed into.
    pub(crate) scratch: Vec<u8>,
    pub(crate) generation: u64,
}

impl Grid {
    /// Create a grid with fixed dimensions and an initial cell state.
    ///
    /// Fails with [`GridError::InvalidDimension`] if either dimension is
    /// zero, and with [`GridError::OutOfBounds`] if a
    /// [`SeedPolicy::Pattern`] names a cell outside the grid. Both cell
    /// buffers are allocated here once; no later operation allocates.
    pub fn new(width: u32, height: u32, policy: &SeedPolicy) -> Result<Self, GridError> {
        if width == 0 || height == 0 {
            return Err(GridError::InvalidDimension { width, height });
        }

        let bytes = (width as usize * height as usize + 7) / 8;
        let mut grid = Grid {
            width,
            height,
            cells: vec![0; bytes],
            scratch: vec![0; bytes],
            generation: 0,
        };
        automaton::apply_seed(&mut grid, policy)?;

        debug!("created {}x{} grid, {} packed bytes", width, height, bytes);
        Ok(grid)
    }

    /// Linear bit index of `(row, col)`: `row * width + column`.
    ///
    /// The same formula serves every read and write path, including
    /// external decoding of [`snapshot`](Grid::snapshot). Does not
    /// validate bounds.
    #[inline]
    pub fn index(&self, row: u32, col: u32) -> usize {
        automaton::bit_index(self.width, row, col)
    }

    /// Advance the grid one generation.
    ///
    /// The next state is computed into the inactive buffer from an
    /// immutable read of the current one, then swapped in, so a
    /// partially updated generation is never observable. Increments
    /// [`generation`](Grid::generation) by exactly one; never fails.
    pub fn tick(&mut self) {
        automaton::step_grid(self);
        trace!("advanced to generation {}", self.generation);
    }

    /// Flip one cell between live and dead.
    ///
    /// Out-of-range coordinates are rejected, never wrapped. Does not
    /// touch the generation counter; toggling the same cell twice
    /// restores the prior state.
    pub fn toggle_cell(&mut self, row: u32, col: u32) -> Result<(), GridError> {
        if row >= self.height || col >= self.width {
            return Err(GridError::OutOfBounds { row, col });
        }

        let idx = self.index(row, col);
        let alive = automaton::read_bit(&self.cells, idx);
        automaton::write_bit(&mut self.cells, idx, !alive);
        Ok(())
    }

    /// Set every listed `(row, col)` cell live, leaving other cells
    /// untouched.
    ///
    /// All coordinates are validated before any bit is written; on
    /// error the grid is unchanged. Does not touch the generation
    /// counter.
    pub fn set_cells(&mut self, cells: &[(u32, u32)]) -> Result<(), GridError> {
        for &(row, col) in cells {
            if row >= self.height || col >= self.width {
                return Err(GridError::OutOfBounds { row, col });
            }
        }

        for &(row, col) in cells {
            let idx = self.index(row, col);
            automaton::write_bit(&mut self.cells, idx, true);
        }
        Ok(())
    }

    /// Re-seed every cell in place and reset the generation counter to
    /// zero.
    ///
    /// Dimensions and buffer capacity are unchanged; nothing is
    /// reallocated. Fails only on an out-of-range
    /// [`SeedPolicy::Pattern`] coordinate, in which case the grid is
    /// left untouched.
    pub fn reset(&mut self, policy: &SeedPolicy) -> Result<(), GridError> {
        automaton::apply_seed(self, policy)?;
        self.generation = 0;

        debug!("reset {}x{} grid", self.width, self.height);
        Ok(())
    }

    /// Borrow the packed cell buffer: exactly `ceil(width * height / 8)`
    /// bytes, one bit per cell, row-major, LSB-first within each byte.
    ///
    /// The view reflects the current generation and is only valid until
    /// the next mutating call (`tick`, `toggle_cell`, `set_cells`,
    /// `reset`); the borrow checker rejects reads across a mutation.
    pub fn snapshot(&self) -> &[u8] {
        &self.cells
    }

    /// State of a single cell; out-of-range coordinates are rejected.
    pub fn cell(&self, row: u32, col: u32) -> Result<bool, GridError> {
        if row >= self.height || col >= self.width {
            return Err(GridError::OutOfBounds { row, col });
        }
        Ok(automaton::read_bit(&self.cells, self.index(row, col)))
    }

    /// Number of live cells.
    pub fn population(&self) -> usize {
        // Padding bits are invariantly zero, so a plain popcount works.
        self.cells
            .iter()
            .map(|byte| byte.count_ones() as usize)
            .sum()
    }

    /// Fixed grid width in cells.
    pub fn width(&self) -> u32 {
        self.width
    }

    /// Fixed grid height in cells.
    pub fn height(&self) -> u32 {
        self.height
    }

    /// Generations advanced since construction or the last reset.
    pub fn generation(&self) -> u64 {
        self.generation
    }
}

impl fmt::Display for Grid {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..self.height {
            for col in 0..self.width {
                let idx = self.index(row, col);
                let glyph = if automaton::read_bit(&self.cells, idx) {
                    '█'
                } else {
                    '·'
                };
                write!(f, "{}", glyph)?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}
