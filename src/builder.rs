//! Construction of puzzles laid out on a rectangular lattice of square
//! cells, one cell per grid position, plus the `width:height:cells` textual
//! encoding.

use std::num::NonZero;
use std::ops::IndexMut;

use itertools::Itertools;
use ndarray::{Array2, AssignElem};
use thiserror::Error;

use crate::cell::LatticeCell;
use crate::color::ColorId;
use crate::edge::Edge;
use crate::lattice::Lattice;
use crate::location::{Dimension, Location};
use crate::node::{Node, NodeId};
use crate::puzzle::Puzzle;
use crate::step::LatticeStep;

/// Reasons a builder may become invalid while building.
#[derive(Copy, Clone, Debug)]
pub enum BuilderInvalidReason {
    /// A cell was placed outside the bounds specified by `dims` on the
    /// builder.
    FeatureOutOfBounds,
}

/// Errors raised while parsing the `width:height:cells` textual encoding.
#[derive(Clone, Debug, Error, Eq, PartialEq)]
pub enum SpecParseError {
    /// The string does not split into exactly three `:`-separated fields.
    #[error("expected width:height:cells")]
    MalformedSpec,
    /// A dimension field failed to parse as a positive integer.
    #[error("dimension {0:?} is not a positive integer")]
    BadDimension(String),
    /// The cell field does not hold exactly width times height characters.
    #[error("expected {expected} cells, got {got}")]
    WrongCellCount {
        /// Width times height.
        expected: usize,
        /// The number of characters actually present.
        got: usize,
    },
    /// A cell character outside `a`-`z`, `A`-`Z`, `1`-`9`, and `_`.
    #[error("invalid cell character {0:?}")]
    BadCell(char),
}

/// A builder for puzzles laid out on a rectangular lattice of square cells.
///
/// Within every 2x2 square of cells, all present cells are linked pairwise,
/// diagonals included, and the two crossing diagonals of a fully populated
/// square are registered as mutually exclusive.
///
/// Cells are placed one at a time, or in bulk with
/// [`from_spec`](Self::from_spec); [`build`](Self::build) then wires the
/// lattice into a [`Lattice`]. Builders mutate themselves while building but
/// can be [`Clone`]d to save their state at some point.
#[derive(Clone)]
pub struct SquareLatticeBuilder {
    // width, height
    dims: (Dimension, Dimension),
    cells: Array2<LatticeCell>,
    invalid_reasons: Vec<BuilderInvalidReason>,
}

impl Default for SquareLatticeBuilder {
    fn default() -> Self {
        Self::with_dims((NonZero::new(5).unwrap(), NonZero::new(5).unwrap()))
    }
}

impl SquareLatticeBuilder {
    /// Construct a new builder with the specified dimensions, specified in
    /// `(x, y)` order. All cells start absent.
    pub fn with_dims(dims: (Dimension, Dimension)) -> Self {
        Self {
            dims,
            cells: Array2::from_shape_simple_fn((dims.1.get(), dims.0.get()), LatticeCell::default),
            invalid_reasons: Default::default(),
        }
    }

    /// Parse the `width:height:cells` encoding: `a`-`z` place a shape of
    /// that color, `A`-`Z` a terminating shape, `1`-`9` a multipass junction
    /// with that required count, and `_` leaves the cell absent. Cells are
    /// given row by row, top to bottom.
    pub fn from_spec(spec: &str) -> Result<Self, SpecParseError> {
        let (width, height, cells) = spec
            .split(':')
            .collect_tuple()
            .ok_or(SpecParseError::MalformedSpec)?;

        let dims = (Self::parse_dimension(width)?, Self::parse_dimension(height)?);

        let expected = dims.0.get() * dims.1.get();
        let got = cells.chars().count();
        if got != expected {
            return Err(SpecParseError::WrongCellCount { expected, got });
        }

        let mut builder = Self::with_dims(dims);
        for (i, c) in cells.chars().enumerate() {
            let location = Location(i % dims.0.get(), i / dims.0.get());
            match c {
                'a'..='z' => builder.add_shape(location, (c as u8 - b'a') as ColorId),
                'A'..='Z' => builder.add_terminus(location, (c as u8 - b'A') as ColorId),
                '1'..='9' => builder.add_multipass(
                    location,
                    NonZero::new(c.to_digit(10).unwrap() as usize).unwrap(),
                ),
                '_' => builder.clear_cell(location),
                other => return Err(SpecParseError::BadCell(other)),
            };
        }

        Ok(builder)
    }

    fn parse_dimension(field: &str) -> Result<Dimension, SpecParseError> {
        field
            .parse::<usize>()
            .ok()
            .and_then(NonZero::new)
            .ok_or_else(|| SpecParseError::BadDimension(field.to_owned()))
    }

    /// Place a non-terminating shape of `color` at `location`.
    ///
    /// May cause the builder to enter a
    /// [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds)
    /// invalid state if `location` is out of bounds. If the builder is
    /// already in an invalid state, this function does nothing.
    ///
    /// # Panics
    ///
    /// Panics if `color` is not one of the 26 encodable colors.
    pub fn add_shape(&mut self, location: Location, color: ColorId) -> &mut Self {
        assert!(color < 26, "colors are limited to the letters a-z");
        self.place(location, LatticeCell::Shape { color, terminates: false })
    }

    /// Place a terminating shape of `color` at `location`. Same conditions
    /// as [`add_shape`](Self::add_shape).
    pub fn add_terminus(&mut self, location: Location, color: ColorId) -> &mut Self {
        assert!(color < 26, "colors are limited to the letters A-Z");
        self.place(location, LatticeCell::Shape { color, terminates: true })
    }

    /// Place a multipass junction at `location` requiring exactly
    /// `required_passes` traversals.
    ///
    /// May cause the builder to enter a
    /// [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds)
    /// invalid state if `location` is out of bounds. If the builder is
    /// already in an invalid state, this function does nothing.
    ///
    /// # Panics
    ///
    /// Panics if `required_passes` is not one of the encodable counts 1-9.
    pub fn add_multipass(&mut self, location: Location, required_passes: NonZero<usize>) -> &mut Self {
        assert!(required_passes.get() <= 9, "pass counts are limited to the digits 1-9");
        self.place(location, LatticeCell::Multipass { required_passes })
    }

    /// Reset the cell at `location` to absent.
    ///
    /// May cause the builder to enter a
    /// [`FeatureOutOfBounds`](BuilderInvalidReason::FeatureOutOfBounds)
    /// invalid state if `location` is out of bounds. If the builder is
    /// already in an invalid state, this function does nothing.
    pub fn clear_cell(&mut self, location: Location) -> &mut Self {
        self.place(location, LatticeCell::Absent)
    }

    fn place(&mut self, location: Location, cell: LatticeCell) -> &mut Self {
        if !self.invalid_reasons.is_empty() {
            return self;
        }

        if location.0 >= self.dims.0.get() || location.1 >= self.dims.1.get() {
            self.invalid_reasons.push(BuilderInvalidReason::FeatureOutOfBounds);
            return self;
        }

        self.cells.index_mut(location.as_index()).assign_elem(cell);
        self
    }

    /// Check the validity of this builder, ensuring no
    /// [`BuilderInvalidReason`] condition has arisen.
    ///
    /// Returns `None` if the builder is valid, `Some(&Vec<BuilderInvalidReason>)`
    /// otherwise.
    pub fn is_valid(&self) -> Option<&Vec<BuilderInvalidReason>> {
        if self.invalid_reasons.is_empty() {
            None
        } else {
            Some(&self.invalid_reasons)
        }
    }

    /// Convert the state of this builder into a [`Lattice`].
    /// If the builder is invalid for any reason, a reference to a [`Vec`] of
    /// [`BuilderInvalidReason`] will indicate why.
    pub fn build(&self) -> Result<Lattice, &Vec<BuilderInvalidReason>> {
        if !self.invalid_reasons.is_empty() {
            return Err(&self.invalid_reasons);
        }

        let mut puzzle = Puzzle::new();

        // ids count row-major: left to right, top to bottom
        let mut node_ids: Array2<Option<NodeId>> =
            Array2::from_shape_simple_fn(self.cells.raw_dim(), || None);
        for y in 0..self.dims.1.get() {
            for x in 0..self.dims.0.get() {
                let location = Location(x, y);
                let id = match *self.cells.get(location.as_index()).unwrap() {
                    LatticeCell::Shape { color, terminates } => {
                        Some(puzzle.add_node(Node::Shape { color, terminates }))
                    }
                    LatticeCell::Multipass { required_passes } => {
                        Some(puzzle.add_node(Node::Multipass { required_passes }))
                    }
                    LatticeCell::Absent => None,
                };
                node_ids.index_mut(location.as_index()).assign_elem(id);
            }
        }

        for x in 0..self.dims.0.get() {
            for y in 0..self.dims.1.get() {
                let location = Location(x, y);
                let Some(id) = node_ids.get(location.as_index()).copied().flatten() else {
                    continue;
                };

                for step in LatticeStep::FORWARD_VARIANTS {
                    let neighbor = step.attempt_from(location);
                    if let Some(other) = node_ids.get(neighbor.as_index()).copied().flatten() {
                        puzzle.link_nodes(id, other);
                    }
                }
            }
        }

        // the two diagonals of a fully populated square cross mid-cell, so a
        // solution may draw at most one of them
        for x in 0..self.dims.0.get() - 1 {
            for y in 0..self.dims.1.get() - 1 {
                let corners = [
                    Location(x, y),
                    Location(x + 1, y),
                    Location(x, y + 1),
                    Location(x + 1, y + 1),
                ]
                .map(|l| node_ids.get(l.as_index()).copied().flatten());

                if let [Some(tl), Some(tr), Some(bl), Some(br)] = corners {
                    puzzle.add_edge_conflict(Edge::new(tl, br), Edge::new(tr, bl));
                }
            }
        }

        Ok(Lattice::new(puzzle, self.dims, self.cells.clone(), node_ids))
    }
}
