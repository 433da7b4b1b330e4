use std::fmt::{Display, Formatter};

use itertools::Itertools;
use ndarray::Array2;

use crate::cell::LatticeCell;
use crate::color::ColorId;
use crate::location::{Dimension, Location};
use crate::node::NodeId;
use crate::puzzle::Puzzle;
use crate::solver::{Solution, SolveError};
use crate::step::LatticeStep;

/// A puzzle embedded in a rectangular grid, as produced by a
/// [`SquareLatticeBuilder`](crate::builder::SquareLatticeBuilder).
///
/// The lattice keeps the grid geometry next to the graph-model
/// [`Puzzle`], so a solution's node ids can be rendered back as grid
/// coordinates. Its [`Display`] implementation prints the grid in the same
/// characters the `width:height:cells` encoding uses.
pub struct Lattice {
    puzzle: Puzzle,
    dims: (Dimension, Dimension),
    cells: Array2<LatticeCell>,
    node_ids: Array2<Option<NodeId>>,
    // indexed by node id
    locations: Vec<Location>,
}

impl Lattice {
    pub(crate) fn new(
        puzzle: Puzzle,
        dims: (Dimension, Dimension),
        cells: Array2<LatticeCell>,
        node_ids: Array2<Option<NodeId>>,
    ) -> Self {
        let mut locations = vec![Location(0, 0); puzzle.node_count()];
        for (ind, id) in node_ids.indexed_iter() {
            if let Some(id) = id {
                locations[*id] = Location::from(ind);
            }
        }

        Self { puzzle, dims, cells, node_ids, locations }
    }

    /// The underlying graph-model puzzle.
    pub fn puzzle(&self) -> &Puzzle {
        &self.puzzle
    }

    /// The lattice dimensions, in `(x, y)` order.
    pub fn dims(&self) -> (Dimension, Dimension) {
        self.dims
    }

    /// The node occupying `location`, if the cell holds one.
    pub fn node_at(&self, location: Location) -> Option<NodeId> {
        self.node_ids.get(location.as_index()).copied().flatten()
    }

    /// The grid location of `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` does not belong to this lattice's puzzle.
    pub fn location_of(&self, id: NodeId) -> Location {
        self.locations[id]
    }

    /// Solve the embedded puzzle and wrap the result back into grid terms.
    ///
    /// Returns according to the result of [`Puzzle::solve`]: `Ok(None)` once
    /// the search space is exhausted, `Err(_)` for a malformed puzzle.
    pub fn solve(&self) -> Result<Option<SolvedLattice<'_>>, SolveError> {
        Ok(self
            .puzzle
            .solve()?
            .map(|solution| SolvedLattice { lattice: self, solution }))
    }
}

impl Display for Lattice {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        for row in self.cells.rows() {
            for cell in row {
                write!(f, "{}", cell.display_char())?;
            }
            writeln!(f)?;
        }

        Ok(())
    }
}

/// A solved lattice: the original grid plus one realized path per color.
pub struct SolvedLattice<'a> {
    lattice: &'a Lattice,
    solution: Solution,
}

impl SolvedLattice<'_> {
    /// The raw id-level paths, keyed by color.
    pub fn paths(&self) -> &Solution {
        &self.solution
    }

    /// The colors present in the solution, ascending.
    pub fn colors(&self) -> impl Iterator<Item = ColorId> + '_ {
        self.solution.keys().copied()
    }

    /// A color's path as space-separated grid labels, e.g. `"A0 B1 B0"`.
    /// [`None`] if the solution has no path for `color`.
    pub fn coordinate_notation(&self, color: ColorId) -> Option<String> {
        self.solution
            .get(&color)
            .map(|path| path.iter().map(|&id| self.lattice.location_of(id).label()).join(" "))
    }

    /// A color's path as its starting label followed by one direction glyph
    /// per step, e.g. `"A0↘→↑"`. [`None`] if the solution has no path for
    /// `color`.
    pub fn arrow_notation(&self, color: ColorId) -> Option<String> {
        let path = self.solution.get(&color)?;

        let mut out = String::new();
        let mut previous: Option<Location> = None;
        for &id in path {
            let here = self.lattice.location_of(id);
            match previous {
                None => out.push_str(&here.label()),
                Some(prev) => {
                    let step = LatticeStep::direction_to(prev, here)
                        .expect("consecutive path nodes are lattice neighbors");
                    out.push(step.glyph());
                }
            }
            previous = Some(here);
        }

        Some(out)
    }
}
