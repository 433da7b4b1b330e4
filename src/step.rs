//! Steps between neighboring cells of a square lattice.

use strum::VariantArray;

use crate::location::Location;

/// A single step between neighboring lattice cells.
///
/// Lyne boards connect each cell to all eight of its neighbors, so both
/// diagonals are first-class directions alongside the orthogonals.
#[derive(Copy, Clone, VariantArray, Eq, PartialEq, Hash, Debug, Ord, PartialOrd)]
pub enum LatticeStep {
    /// Toward the previous row.
    Up,
    /// Diagonally toward the previous row, next column.
    UpRight,
    /// Toward the next column.
    Right,
    /// Diagonally toward the next row, next column.
    DownRight,
    /// Toward the next row.
    Down,
    /// Diagonally toward the next row, previous column.
    DownLeft,
    /// Toward the previous column.
    Left,
    /// Diagonally toward the previous row, previous column.
    UpLeft,
}

impl LatticeStep {
    /// The "forward" directions: those whose destination cell is indexed
    /// higher than the origin in row-major order. Stepping forward from
    /// every cell visits each lattice edge exactly once.
    pub(crate) const FORWARD_VARIANTS: &'static [Self] =
        &[Self::Right, Self::DownRight, Self::Down, Self::DownLeft];

    /// Attempt the step from `location` in the direction specified by `self`
    /// and return the resultant [`Location`].
    pub fn attempt_from(&self, location: Location) -> Location {
        match self {
            Self::Up => location.offset_by((0, -1)),
            Self::UpRight => location.offset_by((1, -1)),
            Self::Right => location.offset_by((1, 0)),
            Self::DownRight => location.offset_by((1, 1)),
            Self::Down => location.offset_by((0, 1)),
            Self::DownLeft => location.offset_by((-1, 1)),
            Self::Left => location.offset_by((-1, 0)),
            Self::UpLeft => location.offset_by((-1, -1)),
        }
    }

    /// Determine the direction from `a` to `b` by calling
    /// [`attempt_from`](Self::attempt_from) until one works.
    ///
    /// Works only on two [`Location`]s which are lattice neighbors and
    /// returns [`None`] otherwise.
    pub fn direction_to(a: Location, b: Location) -> Option<Self> {
        Self::VARIANTS.iter().find(|dir| dir.attempt_from(a) == b).copied()
    }

    /// The arrow glyph for this direction, as used by the relative-movement
    /// notation of [`SolvedLattice`](crate::SolvedLattice).
    pub fn glyph(&self) -> char {
        match self {
            Self::Up => '\u{2191}',
            Self::UpRight => '\u{2197}',
            Self::Right => '\u{2192}',
            Self::DownRight => '\u{2198}',
            Self::Down => '\u{2193}',
            Self::DownLeft => '\u{2199}',
            Self::Left => '\u{2190}',
            Self::UpLeft => '\u{2196}',
        }
    }
}
