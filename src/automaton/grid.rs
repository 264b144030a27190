//! Packed-bit primitives, seeding, and wraparound neighbor counting.

use rand::rngs::SmallRng;
use rand::{Rng, SeedableRng};

use crate::error::GridError;
use crate::grid::Grid;
use crate::seed::SeedPolicy;

/// Linear bit index of a cell: `row * width + column`.
///
/// Every read and write path goes through this function, and it is the
/// layout an external snapshot decoder must use. Does not validate
/// bounds; callers pass coordinates already inside the grid.
#[inline]
pub(crate) fn bit_index(width: u32, row: u32, col: u32) -> usize {
    row as usize * width as usize + col as usize
}

/// Read the bit at `idx` from a packed buffer (LSB-first within bytes).
#[inline]
pub(crate) fn read_bit(cells: &[u8], idx: usize) -> bool {
    cells[idx / 8] & (1 << (idx % 8)) != 0
}

/// Write the bit at `idx` in a packed buffer (LSB-first within bytes).
#[inline]
pub(crate) fn write_bit(cells: &mut [u8], idx: usize, alive: bool) {
    let mask = 1 << (idx % 8);
    if alive {
        cells[idx / 8] |= mask;
    } else {
        cells[idx / 8] &= !mask;
    }
}

/// Count live neighbors of `(row, col)` with toroidal wraparound.
///
/// Each of the eight raw offsets is reduced modulo the grid dimensions
/// independently, so edges see the opposite side of the grid. On a
/// 1-wide or 1-tall grid an offset can land back on the cell itself;
/// such self-hits count like any other neighbor. The center skip tests
/// the raw offset pair, not the reduced coordinate.
pub(crate) fn live_neighbor_count(
    cells: &[u8],
    width: u32,
    height: u32,
    row: u32,
    col: u32,
) -> u8 {
    let mut count = 0;

    for delta_row in -1i64..=1 {
        for delta_col in -1i64..=1 {
            if delta_row == 0 && delta_col == 0 {
                continue;
            }

            let neighbor_row = (row as i64 + delta_row).rem_euclid(height as i64) as u32;
            let neighbor_col = (col as i64 + delta_col).rem_euclid(width as i64) as u32;
            let idx = bit_index(width, neighbor_row, neighbor_col);
            count += read_bit(cells, idx) as u8;
        }
    }

    count
}

/// Re-initialize every cell of `grid` according to `policy`.
///
/// Pattern coordinates are validated before anything is written, so a
/// failed seed leaves the grid untouched. Padding bits in the final
/// byte are always left zero.
pub(crate) fn apply_seed(grid: &mut Grid, policy: &SeedPolicy) -> Result<(), GridError> {
    match policy {
        SeedPolicy::AllDead => {
            grid.cells.fill(0);
        }
        SeedPolicy::Pattern(live) => {
            for &(row, col) in live {
                if row >= grid.height || col >= grid.width {
                    return Err(GridError::OutOfBounds { row, col });
                }
            }

            grid.cells.fill(0);
            for &(row, col) in live {
                write_bit(&mut grid.cells, bit_index(grid.width, row, col), true);
            }
        }
        SeedPolicy::PseudoRandom { density, seed } => {
            let mut rng = SmallRng::seed_from_u64(*seed);
            let cell_count = grid.width as usize * grid.height as usize;

            grid.cells.fill(0);
            for idx in 0..cell_count {
                if rng.gen::<f32>() < *density {
                    write_bit(&mut grid.cells, idx, true);
                }
            }
        }
    }

    Ok(())
}
