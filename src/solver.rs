use std::collections::{BTreeMap, BTreeSet};

use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, trace};

use crate::color::ColorId;
use crate::edge::Edge;
use crate::node::{Node, NodeId};
use crate::puzzle::Puzzle;

/// A complete assignment: each color mapped to its realized path, in order,
/// from one terminator to the other.
pub type Solution = BTreeMap<ColorId, Vec<NodeId>>;

/// Reasons a [`Puzzle`] is rejected before any search begins.
///
/// A rejected puzzle is malformed. This is distinct from an exhaustively
/// searched puzzle with no valid assignment, which
/// [`solve()`](Puzzle::solve) reports as `Ok(None)`.
#[derive(Debug, Error, Eq, PartialEq)]
pub enum SolveError {
    /// A color appears among the shape nodes but does not have exactly two
    /// terminators.
    #[error("color {color} has {count} terminators, expected exactly 2")]
    TerminatorCount {
        /// The offending color.
        color: ColorId,
        /// How many of that color's shapes actually terminate.
        count: usize,
    },
}

/// The backtracking engine behind [`Puzzle::solve`].
///
/// Construction partitions the puzzle's nodes into the per-color lookup
/// tables the search needs; [`solve()`](Self::solve) validates the puzzle
/// and runs the recursion. The engine never mutates the puzzle: all mutable
/// search state is cloned per branch, so a failed branch cannot leak into
/// its siblings and the search needs no undo step.
pub(crate) struct PathSolver<'a> {
    puzzle: &'a Puzzle,
    /// Every color with at least one shape node, ascending.
    colors: Vec<ColorId>,
    /// Each color's terminating shapes.
    terminators: BTreeMap<ColorId, BTreeSet<NodeId>>,
    /// Required total traversal count per multipass node.
    required_passes: BTreeMap<NodeId, usize>,
}

impl<'a> From<&'a Puzzle> for PathSolver<'a> {
    fn from(puzzle: &'a Puzzle) -> Self {
        let mut colors = BTreeSet::new();
        let mut terminators: BTreeMap<ColorId, BTreeSet<NodeId>> = BTreeMap::new();
        let mut required_passes = BTreeMap::new();

        for (id, node) in puzzle.nodes() {
            match *node {
                Node::Shape { color, terminates } => {
                    colors.insert(color);
                    if terminates {
                        terminators.entry(color).or_default().insert(id);
                    }
                }
                Node::Multipass { required_passes: count } => {
                    required_passes.insert(id, count.get());
                }
            }
        }

        Self {
            puzzle,
            colors: colors.into_iter().collect_vec(),
            terminators,
            required_passes,
        }
    }
}

impl PathSolver<'_> {
    /// Run the search to the first satisfying assignment.
    pub(crate) fn solve(&self) -> Result<Option<Solution>, SolveError> {
        self.validate()?;

        let available = self.puzzle.edges().collect::<BTreeSet<_>>();
        let paths: Solution = self.colors.iter().map(|&color| (color, Vec::new())).collect();
        let passes: BTreeMap<NodeId, usize> =
            self.required_passes.keys().map(|&id| (id, 0)).collect();

        debug!(
            colors = self.colors.len(),
            edges = available.len(),
            multipasses = passes.len(),
            "searching"
        );

        Ok(self.extend(&self.colors, paths, available, passes))
    }

    /// Every color present among the shapes must have exactly two
    /// terminators; anything else is a malformed puzzle, not a search
    /// failure.
    fn validate(&self) -> Result<(), SolveError> {
        for &color in &self.colors {
            let count = self.terminators.get(&color).map_or(0, BTreeSet::len);
            if count != 2 {
                return Err(SolveError::TerminatorCount { color, count });
            }
        }

        Ok(())
    }

    /// One level of the depth-first search: extend the first color in
    /// `colors_to_do` by a single edge, trying every candidate continuation
    /// in turn and recursing on freshly cloned state for each. Backtracking
    /// is the plain [`None`] return; there is nothing to undo.
    fn extend(
        &self,
        colors_to_do: &[ColorId],
        mut paths: Solution,
        available: BTreeSet<Edge>,
        passes: BTreeMap<NodeId, usize>,
    ) -> Option<Solution> {
        let Some((&color, remaining_colors)) = colors_to_do.split_first() else {
            // every path is closed; only the multipass totals can still object
            if passes.iter().all(|(id, &count)| self.required_passes[id] == count) {
                return Some(paths);
            }

            trace!("multipass totals do not match");
            return None;
        };

        let path = paths.get_mut(&color).unwrap();
        if path.is_empty() {
            // seed with one terminator; starting from the other end walks the
            // same paths reversed, so trying both would only repeat work
            path.push(*self.terminators[&color].iter().next().unwrap());
        }

        let tail = *path.last().unwrap();

        // a shape node is visited exactly once by the whole solution, so on
        // departure every edge still touching it goes away for good; a
        // multipass node stays open for revisits
        let filtered: BTreeSet<Edge> = match self.puzzle.node(tail) {
            Node::Shape { .. } => available.iter().filter(|e| !e.touches(tail)).copied().collect(),
            Node::Multipass { .. } => available.clone(),
        };

        for edge in available.iter().filter(|e| e.touches(tail)) {
            let other_id = edge.other_node(tail).unwrap();

            match *self.puzzle.node(other_id) {
                // a shape of another color can never continue this path
                Node::Shape { color: other_color, .. } if other_color != color => continue,
                Node::Shape { terminates: true, .. } => {
                    if !self.color_covered(color, other_id, &paths[&color]) {
                        // closing the path now would strand a shape of this
                        // color; terminating early leads nowhere
                        continue;
                    }

                    let mut sub_paths = paths.clone();
                    sub_paths.get_mut(&color).unwrap().push(other_id);

                    let sub_ret = self.extend(
                        remaining_colors,
                        sub_paths,
                        self.without_edge_and_conflicts(&filtered, *edge),
                        passes.clone(),
                    );
                    if sub_ret.is_some() {
                        return sub_ret;
                    }
                }
                Node::Shape { .. } => {
                    let mut sub_paths = paths.clone();
                    sub_paths.get_mut(&color).unwrap().push(other_id);

                    let sub_ret = self.extend(
                        colors_to_do,
                        sub_paths,
                        self.without_edge_and_conflicts(&filtered, *edge),
                        passes.clone(),
                    );
                    if sub_ret.is_some() {
                        return sub_ret;
                    }
                }
                Node::Multipass { .. } => {
                    let mut sub_passes = passes.clone();
                    *sub_passes.get_mut(&other_id).unwrap() += 1;

                    let mut sub_paths = paths.clone();
                    sub_paths.get_mut(&color).unwrap().push(other_id);

                    let sub_ret = self.extend(
                        colors_to_do,
                        sub_paths,
                        self.without_edge_and_conflicts(&filtered, *edge),
                        sub_passes,
                    );
                    if sub_ret.is_some() {
                        return sub_ret;
                    }
                }
            }
        }

        None
    }

    /// Whether appending `closing` to `path` would leave no shape node of
    /// `color` unvisited.
    fn color_covered(&self, color: ColorId, closing: NodeId, path: &[NodeId]) -> bool {
        self.puzzle.nodes().all(|(id, node)| match *node {
            Node::Shape { color: c, .. } if c == color => id == closing || path.contains(&id),
            _ => true,
        })
    }

    /// `edges` minus `chosen` and minus every edge registered as conflicting
    /// with `chosen`.
    fn without_edge_and_conflicts(&self, edges: &BTreeSet<Edge>, chosen: Edge) -> BTreeSet<Edge> {
        edges
            .iter()
            .filter(|&&e| e != chosen && !self.puzzle.is_edge_conflict(chosen, e))
            .copied()
            .collect()
    }
}
