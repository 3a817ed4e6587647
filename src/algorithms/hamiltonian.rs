//! # Nearest-neighbour Hamiltonian cycles
//!
//! Greedy heuristic: from the start vertex, keep moving along the cheapest edge to a
//! vertex not visited yet, then close the cycle with the edge back to the start. The
//! result is a Hamiltonian cycle when the heuristic does not run into a dead end, but
//! not necessarily the cheapest one.

use std::fmt::{self, Display};

use bitvec::vec::BitVec;
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, trace};

use crate::graph::{AdjacencyMatrix, Graph, GraphError, Label, VertexIndex, Weight};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum HamiltonError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error("a Hamiltonian cycle needs at least 3 vertices, the graph has {0}")]
    TooFewVertices(usize),
    #[error("dead end at vertex {at} after visiting {visited} of {order} vertices")]
    DeadEnd {
        at: Label,
        visited: usize,
        order: usize,
    },
    #[error("no edge leads from {last} back to {start} to close the cycle")]
    NoClosingEdge { start: Label, last: Label },
    #[error("the heuristic found no Hamiltonian cycle from any start vertex")]
    NoCycle,
}

impl HamiltonError {
    /// True when the heuristic found no cycle, as opposed to the call violating a
    /// contract.
    pub fn is_infeasible(&self) -> bool {
        !matches!(self, HamiltonError::Graph(_))
    }
}

/// A closed walk visiting every vertex once; the start is repeated at the end.
#[derive(Clone, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct HamiltonianCycle {
    vertices: Vec<Label>,
    cost: Weight,
}

impl HamiltonianCycle {
    pub fn vertices(&self) -> &[Label] {
        &self.vertices
    }

    pub fn cost(&self) -> Weight {
        self.cost
    }

    pub fn start(&self) -> Option<&Label> {
        self.vertices.first()
    }

    /// Number of edges, which equals the number of distinct vertices.
    pub fn len(&self) -> usize {
        self.vertices.len().saturating_sub(1)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }

    /// Checks that this is a Hamiltonian cycle of `graph` with the recorded cost.
    pub fn verify(&self, graph: &Graph) -> bool {
        let (Some(first), Some(last)) = (self.vertices.first(), self.vertices.last()) else {
            return false;
        };
        let body = &self.vertices[..self.vertices.len() - 1];
        first == last
            && body.len() == graph.order()
            && body.iter().all_unique()
            && cycle_cost(graph, &self.vertices)
                .is_some_and(|cost| (cost - self.cost).abs() <= 1e-9 * cost.abs().max(1.0))
    }
}

impl Display for HamiltonianCycle {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vertices.iter().join(" -> "))
    }
}

/// Sum of the edge weights along `walk`, or `None` if a step has no edge or a
/// vertex is unknown.
pub fn cycle_cost(graph: &Graph, walk: &[Label]) -> Option<Weight> {
    let weights = graph.weight_matrix();
    walk.iter()
        .map(|v| graph.index_of(v).ok())
        .collect::<Option<Vec<_>>>()?
        .into_iter()
        .tuple_windows()
        .map(|(i, j)| weights[(i, j)])
        .sum()
}

/// Configurable nearest-neighbour run.
///
/// ```
/// use graphwalk::{algorithms::NearestNeighbor, graph::Graph};
///
/// let g = Graph::new_weighted(
///     ["a", "b", "c"],
///     [(("a", "b"), 1.0), (("b", "c"), 2.0), (("c", "a"), 3.0)],
///     false,
/// )
/// .unwrap();
/// let cycle = NearestNeighbor::new(&g).run().unwrap();
/// assert_eq!(cycle.to_string(), "a -> b -> c -> a");
/// assert_eq!(cycle.cost(), 6.0);
/// ```
#[derive(Clone, Debug)]
pub struct NearestNeighbor<'a> {
    graph: &'a Graph,
    start: Option<Label>,
    every_vertex: bool,
}

impl<'a> NearestNeighbor<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        NearestNeighbor {
            graph,
            start: None,
            every_vertex: false,
        }
    }

    /// Starts at `start` instead of the first vertex.
    pub fn with_start(mut self, start: impl Into<Label>) -> Self {
        self.start = Some(start.into());
        self
    }

    /// Runs the heuristic from every vertex and keeps the cheapest cycle. Overrides
    /// [`NearestNeighbor::with_start`].
    pub fn from_every_vertex(mut self) -> Self {
        self.every_vertex = true;
        self
    }

    pub fn run(&self) -> Result<HamiltonianCycle, HamiltonError> {
        let graph = self.graph;
        if !graph.is_weighted() {
            return Err(GraphError::UnweightedGraph.into());
        }
        if graph.order() < 3 {
            return Err(HamiltonError::TooFewVertices(graph.order()));
        }
        let weights = graph.weight_matrix();

        if self.every_vertex {
            let best = weights
                .indices()
                .filter_map(|start| match greedy_cycle(graph, weights, start) {
                    Ok(cycle) => Some(cycle),
                    Err(err) => {
                        trace!(start = %graph.label(start), %err, "no cycle");
                        None
                    }
                })
                .min_by(|a, b| a.cost.total_cmp(&b.cost))
                .ok_or(HamiltonError::NoCycle)?;
            debug!(cost = best.cost, start = ?best.start(), "best nearest-neighbour cycle");
            return Ok(best);
        }

        let start = match &self.start {
            Some(start) => graph.index_of(start)?,
            None => VertexIndex(0),
        };
        let cycle = greedy_cycle(graph, weights, start)?;
        debug!(cost = cycle.cost, "nearest-neighbour cycle");
        Ok(cycle)
    }
}

fn greedy_cycle(
    graph: &Graph,
    weights: &AdjacencyMatrix<Option<Weight>>,
    start: VertexIndex,
) -> Result<HamiltonianCycle, HamiltonError> {
    let order = weights.order();
    let mut visited: BitVec = BitVec::repeat(false, order);
    visited.set(start.0, true);

    let mut tour = Vec::with_capacity(order + 1);
    tour.push(start);
    let mut cost = 0.0;
    let mut current = start;

    while tour.len() < order {
        let (next, weight) = weights
            .row(current)
            .iter()
            .enumerate()
            .filter(|&(j, _)| !visited[j])
            .filter_map(|(j, w)| w.map(|w| (VertexIndex(j), w)))
            .min_by(|a, b| a.1.total_cmp(&b.1))
            .ok_or_else(|| HamiltonError::DeadEnd {
                at: graph.label(current).clone(),
                visited: tour.len(),
                order,
            })?;

        visited.set(next.0, true);
        tour.push(next);
        cost += weight;
        current = next;
    }

    let closing = weights[(current, start)].ok_or_else(|| HamiltonError::NoClosingEdge {
        start: graph.label(start).clone(),
        last: graph.label(current).clone(),
    })?;
    tour.push(start);

    Ok(HamiltonianCycle {
        vertices: tour.into_iter().map(|i| graph.label(i).clone()).collect(),
        cost: cost + closing,
    })
}

/// Nearest-neighbour cycle from `start`, or from the first vertex.
pub fn nearest_neighbor_cycle(
    graph: &Graph,
    start: Option<&Label>,
) -> Result<HamiltonianCycle, HamiltonError> {
    let mut run = NearestNeighbor::new(graph);
    if let Some(start) = start {
        run = run.with_start(start);
    }
    run.run()
}

/// Cheapest nearest-neighbour cycle over all start vertices; the first start wins ties.
pub fn best_nearest_neighbor_cycle(graph: &Graph) -> Result<HamiltonianCycle, HamiltonError> {
    NearestNeighbor::new(graph).from_every_vertex().run()
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    fn k4() -> Graph {
        Graph::new_weighted(
            ["a", "b", "c", "d"],
            [
                (("a", "b"), 3.0),
                (("a", "c"), 2.0),
                (("a", "d"), 7.0),
                (("b", "c"), 5.0),
                (("b", "d"), 9.0),
                (("c", "d"), 6.0),
            ],
            false,
        )
        .unwrap()
    }

    fn labels(names: &[&str]) -> Vec<Label> {
        names.iter().map(|&n| Label::from(n)).collect()
    }

    #[test]
    fn greedy_from_first_vertex() {
        let graph = k4();
        let cycle = nearest_neighbor_cycle(&graph, None).unwrap();
        assert_eq!(cycle.vertices(), labels(&["a", "c", "b", "d", "a"]).as_slice());
        assert_eq!(cycle.cost(), 23.0);
        assert_eq!(cycle.len(), 4);
        assert!(cycle.verify(&graph));
        insta::assert_snapshot!(cycle.to_string(), @"a -> c -> b -> d -> a");
    }

    #[test]
    fn every_start_keeps_the_cheapest() {
        let graph = k4();
        let best = best_nearest_neighbor_cycle(&graph).unwrap();
        assert_eq!(best.vertices(), labels(&["b", "a", "c", "d", "b"]).as_slice());
        assert_eq!(best.cost(), 20.0);
        assert!(best.verify(&graph));

        let from_d = nearest_neighbor_cycle(&graph, Some(&"d".into())).unwrap();
        assert_eq!(from_d.cost(), 20.0);
    }

    #[test]
    fn ties_follow_vertex_order() {
        let graph = Graph::new_weighted(
            [1, 2, 3],
            [((1, 2), 1.0), ((1, 3), 1.0), ((2, 3), 1.0)],
            false,
        )
        .unwrap();
        let cycle = nearest_neighbor_cycle(&graph, None).unwrap();
        assert_eq!(cycle.to_string(), "1 -> 2 -> 3 -> 1");
    }

    #[test]
    fn directed_cycles_need_the_closing_direction() {
        let graph = Graph::new_weighted(
            ["x", "y", "z"],
            [(("x", "y"), 1.0), (("y", "z"), 1.0), (("x", "z"), 5.0)],
            true,
        )
        .unwrap();
        assert_eq!(
            nearest_neighbor_cycle(&graph, None).unwrap_err(),
            HamiltonError::NoClosingEdge {
                start: "x".into(),
                last: "z".into(),
            }
        );
    }

    #[test]
    fn dead_ends_are_reported() {
        let star = Graph::new_weighted(
            ["c", "x", "y", "z"],
            [(("c", "x"), 1.0), (("c", "y"), 2.0), (("c", "z"), 3.0)],
            false,
        )
        .unwrap();
        let err = nearest_neighbor_cycle(&star, None).unwrap_err();
        assert_eq!(
            err,
            HamiltonError::DeadEnd {
                at: "x".into(),
                visited: 2,
                order: 4,
            }
        );
        assert!(err.is_infeasible());
        assert_eq!(best_nearest_neighbor_cycle(&star).unwrap_err(), HamiltonError::NoCycle);
    }

    #[test]
    fn contract_violations() {
        let unweighted = Graph::new([1, 2, 3], [(1, 2), (2, 3), (3, 1)], false).unwrap();
        let err = nearest_neighbor_cycle(&unweighted, None).unwrap_err();
        assert_eq!(err, HamiltonError::Graph(GraphError::UnweightedGraph));
        assert!(!err.is_infeasible());

        let pair = Graph::new_weighted([1, 2], [((1, 2), 1.0)], false).unwrap();
        assert_eq!(
            nearest_neighbor_cycle(&pair, None).unwrap_err(),
            HamiltonError::TooFewVertices(2)
        );

        assert_eq!(
            nearest_neighbor_cycle(&k4(), Some(&"q".into())).unwrap_err(),
            HamiltonError::Graph(GraphError::UnknownVertex("q".into()))
        );
    }

    #[test]
    fn cost_and_verification() {
        let graph = k4();
        assert_eq!(cycle_cost(&graph, &labels(&["a", "b", "c"])), Some(8.0));
        assert_eq!(cycle_cost(&graph, &labels(&["a", "q"])), None);
        assert_eq!(cycle_cost(&graph, &labels(&["a"])), Some(0.0));

        let wrong_cost = HamiltonianCycle {
            vertices: labels(&["a", "b", "c", "d", "a"]),
            cost: 1.0,
        };
        assert!(!wrong_cost.verify(&graph));

        let short = HamiltonianCycle {
            vertices: labels(&["a", "b", "c", "a"]),
            cost: 10.0,
        };
        assert!(!short.verify(&graph));
    }
}
