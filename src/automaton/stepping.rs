//! Double-buffered generation stepping with B3/S23 rules.
//!
//! The next generation is written into the inactive buffer while the
//! current one is read immutably, then the buffers are swapped. No cell
//! of the new generation is ever read while it is being computed, and
//! no allocation happens per tick. Large buffers are filled in parallel
//! over disjoint byte ranges of the output; every worker reads only the
//! generation-N buffer and writes only its own slice of generation N+1.

use rayon::prelude::*;

use super::grid::{live_neighbor_count, read_bit};
use crate::grid::Grid;

/// Buffers at least this many bytes are filled through the thread pool.
const PARALLEL_MIN_BYTES: usize = 4096;

/// Output bytes handed to each parallel worker (8 cells per byte).
const CHUNK_BYTES: usize = 512;

/// Advance `grid` by one generation.
///
/// Rules, applied simultaneously to every cell of generation N:
/// - Live with fewer than 2 live neighbors dies (underpopulation)
/// - Live with 2 or 3 live neighbors survives
/// - Live with more than 3 live neighbors dies (overpopulation)
/// - Dead with exactly 3 live neighbors becomes live (reproduction)
pub(crate) fn step_grid(grid: &mut Grid) {
    let width = grid.width;
    let height = grid.height;

    let front = &grid.cells;
    let back = &mut grid.scratch;

    if front.len() >= PARALLEL_MIN_BYTES {
        back.par_chunks_mut(CHUNK_BYTES)
            .enumerate()
            .for_each(|(chunk, out)| {
                fill_bytes(front, width, height, chunk * CHUNK_BYTES, out);
            });
    } else {
        fill_bytes(front, width, height, 0, back);
    }

    std::mem::swap(&mut grid.cells, &mut grid.scratch);
    grid.generation += 1;
}

/// Fill `out` with next-generation bytes starting at byte offset
/// `first_byte`, reading only the current-generation buffer `front`.
///
/// Both the serial and the parallel path run this same kernel, so they
/// produce identical bytes. Padding bits past the last cell are always
/// written dead.
fn fill_bytes(front: &[u8], width: u32, height: u32, first_byte: usize, out: &mut [u8]) {
    let cell_count = width as usize * height as usize;

    for (offset, byte) in out.iter_mut().enumerate() {
        let base = (first_byte + offset) * 8;
        let mut packed = 0u8;

        for bit in 0..8 {
            let idx = base + bit;
            if idx >= cell_count {
                break;
            }

            let row = (idx / width as usize) as u32;
            let col = (idx % width as usize) as u32;
            let alive = read_bit(front, idx);
            let neighbors = live_neighbor_count(front, width, height, row, col);

            let next = match (alive, neighbors) {
                (true, n) if n < 2 => false,
                (true, 2) | (true, 3) => true,
                (true, _) => false,
                (false, 3) => true,
                (false, _) => false,
            };
            if next {
                packed |= 1 << bit;
            }
        }

        *byte = packed;
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::grid::Grid;
    use crate::seed::SeedPolicy;

    #[test]
    fn test_lone_cell_dies() {
        let seed = SeedPolicy::Pattern(vec![(1, 1)]);
        let mut grid = Grid::new(3, 3, &seed).unwrap();

        step_grid(&mut grid);

        assert_eq!(grid.population(), 0);
        assert_eq!(grid.generation, 1);
    }

    #[test]
    fn test_block_is_a_still_life() {
        let seed = SeedPolicy::Pattern(vec![(1, 1), (1, 2), (2, 1), (2, 2)]);
        let mut grid = Grid::new(5, 5, &seed).unwrap();
        let before = grid.cells.clone();

        step_grid(&mut grid);

        assert_eq!(grid.cells, before);
        assert_eq!(grid.generation, 1);
    }

    #[test]
    fn test_blinker_oscillates() {
        // Vertical line at column 2, rows 1-3.
        let seed = SeedPolicy::Pattern(vec![(1, 2), (2, 2), (3, 2)]);
        let mut grid = Grid::new(5, 5, &seed).unwrap();
        let vertical = grid.cells.clone();

        step_grid(&mut grid);

        // Horizontal line at row 2, columns 1-3, nothing else.
        for row in 0..5 {
            for col in 0..5 {
                let expected = row == 2 && (1..=3).contains(&col);
                assert_eq!(
                    grid.cell(row, col).unwrap(),
                    expected,
                    "cell ({}, {}) after one step",
                    row,
                    col
                );
            }
        }

        step_grid(&mut grid);

        // Period 2: back to the vertical line.
        assert_eq!(grid.cells, vertical);
    }

    #[test]
    fn test_generation_increments_by_one() {
        let mut grid = Grid::new(4, 4, &SeedPolicy::AllDead).unwrap();

        assert_eq!(grid.generation, 0);
        step_grid(&mut grid);
        assert_eq!(grid.generation, 1);
        step_grid(&mut grid);
        assert_eq!(grid.generation, 2);
    }

    #[test]
    fn test_empty_grid_stays_empty() {
        let mut grid = Grid::new(8, 8, &SeedPolicy::AllDead).unwrap();

        step_grid(&mut grid);

        assert_eq!(grid.population(), 0);
    }

    #[test]
    fn test_parallel_path_steps_blinker() {
        // 256x256 = 8192 packed bytes, well past the parallel
        // threshold. The blinker must behave exactly as on a small
        // grid.
        let seed = SeedPolicy::Pattern(vec![(99, 100), (100, 100), (101, 100)]);
        let mut grid = Grid::new(256, 256, &seed).unwrap();

        step_grid(&mut grid);

        assert_eq!(grid.population(), 3);
        assert!(grid.cell(100, 99).unwrap());
        assert!(grid.cell(100, 100).unwrap());
        assert!(grid.cell(100, 101).unwrap());
    }

    #[test]
    fn test_parallel_path_is_deterministic() {
        let policy = SeedPolicy::PseudoRandom {
            density: 0.3,
            seed: 42,
        };
        let mut a = Grid::new(256, 128, &policy).unwrap();
        let mut b = Grid::new(256, 128, &policy).unwrap();

        for _ in 0..3 {
            step_grid(&mut a);
            step_grid(&mut b);
        }

        assert_eq!(a.cells, b.cells);
    }
}
