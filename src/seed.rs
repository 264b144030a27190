//! Caller-supplied cell initialization policies.

/// How to initialize (or re-initialize) every cell of a grid.
///
/// The same policy type is accepted at construction and by
/// [`Grid::reset`](crate::Grid::reset), so a caller decides per call
/// whether a reset means "clear", "stamp a pattern", or "re-randomize".
#[derive(Debug, Clone, PartialEq, Default)]
pub enum SeedPolicy {
    /// Every cell dead.
    #[default]
    AllDead,

    /// The listed `(row, column)` cells live, all others dead.
    ///
    /// Every coordinate must lie inside the grid; seeding fails with
    /// `OutOfBounds` before any cell is written otherwise.
    Pattern(Vec<(u32, u32)>),

    /// Each cell independently live with probability `density`, drawn
    /// from a deterministic generator seeded with `seed`.
    ///
    /// The same dimensions, density, and seed always produce the same
    /// grid. Densities at or below 0.0 leave every cell dead; 1.0 and
    /// above make every cell live.
    PseudoRandom { density: f32, seed: u64 },
}
