#![warn(missing_docs)]

//! # `leyline`
//!
//! A solver for path-connection puzzles in the style of the puzzle game
//! [Lyne](https://www.thomasbowker.com/lyne): a board of colored shapes must
//! be covered by one path per color, each running between its color's two
//! terminating shapes and visiting every other shape of that color exactly
//! once. Junction cells ("multipasses") may be crossed by any color but
//! must be crossed an exact total number of times, and the two crossing
//! diagonals of a board square exclude one another.
//!
//! Begin by building a [`Puzzle`] directly against the graph API, or — for
//! boards laid out on a grid — through a
//! [`SquareLatticeBuilder`](builder::SquareLatticeBuilder), which also
//! understands the `width:height:cells` textual encoding. Then call
//! [`solve()`](Puzzle::solve) (or [`Lattice::solve`] for grid-coordinate
//! output), yielding either one realized path per color or nothing once the
//! search space is exhausted.
//!
//! # Internals
//!
//! The board is an undirected graph: a vertex per cell as seen in-game,
//! edges encoding which cells a line segment may connect. Unlike
//! SAT-reduction approaches to kindred puzzles such as Numberlink, the
//! structure here — paths that revisit junctions a fixed number of times,
//! plus pairwise edge exclusions — maps directly onto a recursive
//! backtracking search:
//!
//! 1. Colors are processed in ascending order; each color's path grows from
//!    one of its two terminators, one edge at a time.
//! 2. Departing a shape retires all of its remaining edges (a shape is
//!    visited once, ever); choosing an edge retires the edge itself and
//!    everything registered as conflicting with it.
//! 3. A path may only close on a terminator once its color is fully
//!    covered; when the last color closes, the accumulated multipass counts
//!    must match their declared totals exactly.
//!
//! Every branch of the recursion operates on its own copies of the path
//! table, the remaining-edge set, and the multipass counters, so
//! backtracking is simply returning [`None`] — no undo, and no state shared
//! between sibling branches.

pub use builder::SquareLatticeBuilder;
pub use color::ColorId;
pub use edge::Edge;
pub use lattice::{Lattice, SolvedLattice};
pub use location::{Dimension, Location};
pub use node::{Node, NodeId};
pub use puzzle::Puzzle;
pub use solver::{Solution, SolveError};

pub mod builder;
pub(crate) mod cell;
pub(crate) mod color;
pub(crate) mod edge;
pub(crate) mod lattice;
pub(crate) mod location;
pub(crate) mod node;
pub(crate) mod puzzle;
pub(crate) mod solver;
pub mod step;
