use std::collections::HashSet;

use petgraph::graphmap::UnGraphMap;
use unordered_pair::UnorderedPair;

use crate::edge::Edge;
use crate::node::{Node, NodeId};
use crate::solver::{PathSolver, Solution, SolveError};

/// The puzzle aggregate: nodes, undirected adjacency, and the edge-conflict
/// registry.
///
/// A `Puzzle` is built once, typically by a
/// [`SquareLatticeBuilder`](crate::builder::SquareLatticeBuilder), and then
/// consumed read-only by [`solve()`](Puzzle::solve). Cloning produces a fully
/// independent copy; mutating either side never shows through to the other.
#[derive(Clone)]
pub struct Puzzle {
    nodes: Vec<Node>,
    links: UnGraphMap<NodeId, ()>,
    conflicts: HashSet<UnorderedPair<Edge>>,
}

impl Default for Puzzle {
    fn default() -> Self {
        Self::new()
    }
}

impl Puzzle {
    /// An empty puzzle. Empty puzzles are valid and trivially solvable.
    pub fn new() -> Self {
        Self {
            nodes: Vec::new(),
            links: UnGraphMap::new(),
            conflicts: HashSet::new(),
        }
    }

    /// Register `node` and return its id. Ids are assigned sequentially in
    /// insertion order.
    pub fn add_node(&mut self, node: Node) -> NodeId {
        let id = self.nodes.len();
        self.nodes.push(node);
        self.links.add_node(id);
        id
    }

    /// The node registered under `id`.
    ///
    /// # Panics
    ///
    /// Panics if `id` was never returned by [`add_node`](Self::add_node).
    pub fn node(&self, id: NodeId) -> &Node {
        &self.nodes[id]
    }

    /// All nodes paired with their ids, in insertion order.
    pub fn nodes(&self) -> impl Iterator<Item = (NodeId, &Node)> {
        self.nodes.iter().enumerate()
    }

    /// The number of registered nodes.
    pub fn node_count(&self) -> usize {
        self.nodes.len()
    }

    /// Whether the puzzle has no nodes at all.
    pub fn is_empty(&self) -> bool {
        self.nodes.is_empty()
    }

    /// Connect `one` and `two` with an undirected edge. Linking an already
    /// linked pair has no further effect.
    ///
    /// # Panics
    ///
    /// Panics if either id is unregistered, or if the two ids are equal.
    pub fn link_nodes(&mut self, one: NodeId, two: NodeId) {
        assert!(one != two, "cannot link node {one} to itself");
        assert!(
            one < self.nodes.len() && two < self.nodes.len(),
            "cannot link unregistered nodes {one} and {two}"
        );
        self.links.add_edge(one, two, ());
    }

    /// Remove the edge between `one` and `two`.
    ///
    /// # Panics
    ///
    /// Panics if the two nodes are not linked.
    pub fn unlink_nodes(&mut self, one: NodeId, two: NodeId) {
        assert!(
            self.links.remove_edge(one, two).is_some(),
            "nodes {one} and {two} are not linked"
        );
    }

    /// Whether an edge connects `one` and `two`, in either order.
    pub fn are_linked(&self, one: NodeId, two: NodeId) -> bool {
        self.links.contains_edge(one, two)
    }

    /// Every edge in the puzzle, materialized from the adjacency relation.
    pub fn edges(&self) -> impl Iterator<Item = Edge> + '_ {
        self.links.all_edges().map(|(one, two, _)| Edge::new(one, two))
    }

    /// Register `first` and `second` as mutually exclusive: a solution may
    /// use at most one of the two. Registration order never matters.
    ///
    /// # Panics
    ///
    /// Panics if the two edges are equal.
    pub fn add_edge_conflict(&mut self, first: Edge, second: Edge) {
        assert!(first != second, "an edge cannot conflict with itself");
        self.conflicts.insert(UnorderedPair::from((first, second)));
    }

    /// Whether `first` and `second` were registered as mutually exclusive,
    /// in either order.
    pub fn is_edge_conflict(&self, first: Edge, second: Edge) -> bool {
        self.conflicts.contains(&UnorderedPair::from((first, second)))
    }

    /// Solve this puzzle with the backtracking search engine, leaving
    /// `self` untouched.
    ///
    /// Returns `Ok(Some(_))` with one path per color on success, `Ok(None)`
    /// once the search space is exhausted with no valid assignment, and
    /// `Err(_)` without searching at all if the puzzle is malformed.
    pub fn solve(&self) -> Result<Option<Solution>, SolveError> {
        PathSolver::from(self).solve()
    }
}
