//! # Fleury's algorithm
//!
//! Walks an Eulerian circuit or path one edge at a time on a private copy of the
//! multiplicity matrix. Whenever the head of the trail has a choice, it takes the
//! first edge whose removal keeps the unfinished part of the graph connected, so a
//! bridge is only crossed when nothing else is left.
//!
//! Vertices whose edges are all used are *closed*: the connectivity test forgives
//! them, together with the current head, so that finished regions of the graph do not
//! make every remaining edge look like a bridge.

use std::fmt::{self, Display};

use bitvec::vec::BitVec;
use itertools::Itertools;
use thiserror::Error;
use tracing::{debug, trace, warn};

use super::{
    connectivity::ConnectivityOracle,
    eulerian::{classify_eulerian, EulerianKind},
};
use crate::graph::{AdjacencyMatrix, Graph, GraphError, Label, VertexIndex};

#[derive(Error, Debug, Clone, PartialEq)]
pub enum EulerError {
    #[error(transparent)]
    Graph(#[from] GraphError),
    #[error(
        "graph has neither an Eulerian circuit nor an Eulerian path (connected: {connected}, odd vertices: [{}])",
        .odd_vertices.iter().join(", ")
    )]
    Infeasible {
        connected: bool,
        odd_vertices: Vec<Label>,
    },
    #[error("trail got stuck at vertex {at} with {remaining} edge(s) left")]
    Stuck { at: Label, remaining: usize },
    #[error(
        "an Eulerian path must start at an odd vertex ([{}]), not {start}",
        .odd_vertices.iter().join(", ")
    )]
    InvalidStart {
        start: Label,
        odd_vertices: Vec<Label>,
    },
}

impl EulerError {
    /// True when the graph simply has no Eulerian trail, as opposed to the call
    /// violating a contract.
    pub fn is_infeasible(&self) -> bool {
        matches!(self, EulerError::Infeasible { .. } | EulerError::Stuck { .. })
    }
}

/// Ordered edges of an Eulerian trail; consecutive edges share an endpoint.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EulerianPath {
    edges: Vec<(Label, Label)>,
}

impl EulerianPath {
    pub fn edges(&self) -> &[(Label, Label)] {
        &self.edges
    }

    pub fn len(&self) -> usize {
        self.edges.len()
    }

    pub fn is_empty(&self) -> bool {
        self.edges.is_empty()
    }

    pub fn start(&self) -> Option<&Label> {
        self.edges.first().map(|(u, _)| u)
    }

    pub fn end(&self) -> Option<&Label> {
        self.edges.last().map(|(_, v)| v)
    }

    /// Whether the trail ends where it started. An empty trail is not closed.
    pub fn is_closed(&self) -> bool {
        matches!((self.start(), self.end()), (Some(s), Some(e)) if s == e)
    }

    /// Visited vertices in order, the start followed by the head of every edge.
    pub fn vertices(&self) -> impl Iterator<Item = &Label> + '_ {
        self.start()
            .into_iter()
            .chain(self.edges.iter().map(|(_, v)| v))
    }

    pub fn into_edges(self) -> Vec<(Label, Label)> {
        self.edges
    }
}

impl Display for EulerianPath {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.vertices().join(" -> "))
    }
}

impl IntoIterator for EulerianPath {
    type Item = (Label, Label);
    type IntoIter = std::vec::IntoIter<(Label, Label)>;

    fn into_iter(self) -> Self::IntoIter {
        self.edges.into_iter()
    }
}

/// Configurable Fleury run over an undirected graph.
///
/// ```
/// use graphwalk::{algorithms::Fleury, graph::Graph};
///
/// let g = Graph::new([1, 2, 3, 4], [(1, 2), (2, 3), (3, 4)], false).unwrap();
/// let trail = Fleury::new(&g).with_start(4).run().unwrap();
/// assert_eq!(trail.to_string(), "4 -> 3 -> 2 -> 1");
/// ```
#[derive(Clone, Debug)]
pub struct Fleury<'a> {
    graph: &'a Graph,
    start: Option<Label>,
}

impl<'a> Fleury<'a> {
    pub fn new(graph: &'a Graph) -> Self {
        Fleury { graph, start: None }
    }

    /// Starts the trail at `start` instead of the default: the first odd vertex for a
    /// path, the first vertex for a circuit.
    pub fn with_start(mut self, start: impl Into<Label>) -> Self {
        self.start = Some(start.into());
        self
    }

    pub fn run(&self) -> Result<EulerianPath, EulerError> {
        let graph = self.graph;
        let class = classify_eulerian(graph)?;

        if class.kind == EulerianKind::None {
            return Err(EulerError::Infeasible {
                connected: class.connected,
                odd_vertices: class.odd_vertices,
            });
        }

        let start = match &self.start {
            Some(start) => {
                let i = graph.index_of(start)?;
                if class.kind == EulerianKind::Path && !class.odd_vertices.contains(start) {
                    return Err(EulerError::InvalidStart {
                        start: start.clone(),
                        odd_vertices: class.odd_vertices,
                    });
                }
                i
            }
            None => match class.odd_vertices.first() {
                Some(odd) => graph.index_of(odd)?,
                None if graph.is_empty() => return Ok(EulerianPath::default()),
                None => VertexIndex(0),
            },
        };

        let trail = Trail::new(graph.adjacency_matrix(), start).walk(graph)?;
        debug!(
            kind = %class.kind,
            start = %graph.label(start),
            edges = trail.len(),
            "fleury finished"
        );
        Ok(trail)
    }
}

/// Eulerian trail of `graph`, starting at `start` if given.
pub fn fleury(graph: &Graph, start: Option<&Label>) -> Result<EulerianPath, EulerError> {
    let mut run = Fleury::new(graph);
    if let Some(start) = start {
        run = run.with_start(start);
    }
    run.run()
}

/// Traversal state of a single run. Never touches the graph's own matrix.
struct Trail {
    working: AdjacencyMatrix<u32>,
    scratch: AdjacencyMatrix<u32>,
    oracle: ConnectivityOracle,
    closed: BitVec,
    ignore: BitVec,
    candidates: Vec<VertexIndex>,
    current: VertexIndex,
    remaining: usize,
}

impl Trail {
    fn new(matrix: &AdjacencyMatrix<u32>, start: VertexIndex) -> Self {
        let order = matrix.order();
        Trail {
            working: matrix.clone(),
            scratch: matrix.clone(),
            oracle: ConnectivityOracle::with_order(order),
            closed: BitVec::repeat(false, order),
            ignore: BitVec::repeat(false, order),
            candidates: Vec::new(),
            current: start,
            remaining: matrix.undirected_edge_count(),
        }
    }

    fn walk(mut self, graph: &Graph) -> Result<EulerianPath, EulerError> {
        let mut edges = Vec::with_capacity(self.remaining);

        while self.remaining > 0 {
            let from = self.current;
            let to = self.next_vertex().ok_or_else(|| EulerError::Stuck {
                at: graph.label(from).clone(),
                remaining: self.remaining,
            })?;

            self.working.remove_undirected(from, to);
            self.remaining -= 1;
            if self.working.row_sum(from) == 0 {
                self.closed.set(from.0, true);
            }
            self.current = to;

            trace!(from = %graph.label(from), to = %graph.label(to), remaining = self.remaining, "edge");
            edges.push((graph.label(from).clone(), graph.label(to).clone()));
        }

        Ok(EulerianPath { edges })
    }

    fn next_vertex(&mut self) -> Option<VertexIndex> {
        let current = self.current;
        self.candidates.clear();
        self.candidates.extend(self.working.successors(current));

        match self.candidates.len() {
            0 => None,
            1 => Some(self.candidates[0]),
            // a loop never disconnects anything
            _ if self.candidates.contains(&current) => Some(current),
            _ => {
                let first = self.candidates[0];
                Some(self.first_non_bridge().unwrap_or_else(|| {
                    warn!(
                        at = current.0,
                        "every candidate edge is a bridge, taking the first one"
                    );
                    first
                }))
            }
        }
    }

    fn first_non_bridge(&mut self) -> Option<VertexIndex> {
        let current = self.current;
        self.ignore.copy_from_bitslice(&self.closed);
        self.ignore.set(current.0, true);

        for &candidate in &self.candidates {
            self.scratch.copy_from(&self.working);
            self.scratch.remove_undirected(current, candidate);
            if self.oracle.is_connected(&self.scratch, &self.ignore) {
                return Some(candidate);
            }
            trace!(from = current.0, to = candidate.0, "skipping bridge");
        }
        None
    }
}
