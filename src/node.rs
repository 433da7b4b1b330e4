use std::num::NonZero;

use crate::color::ColorId;

/// Identifier of a node within a [`Puzzle`](crate::Puzzle).
///
/// Ids are dense, 0-based, assigned in insertion order, and stay stable for
/// the life of the puzzle.
pub type NodeId = usize;

/// A puzzle node.
///
/// Grid positions without a node are simply never allocated; there is no
/// "absent" variant.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Node {
    /// A colored shape. Its color's path must visit every shape of that
    /// color, starting and ending at the two with `terminates` set.
    Shape {
        /// The path group this shape belongs to.
        color: ColorId,
        /// Marks this shape as one of its color's two path endpoints.
        terminates: bool,
    },
    /// A junction any color's path may cross, and which must be crossed
    /// exactly `required_passes` times in total across all colors.
    Multipass {
        /// The exact total number of traversals required.
        required_passes: NonZero<usize>,
    },
}
