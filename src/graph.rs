//! # Graph model
//!
//! [`Graph`] holds an ordered set of labelled vertices and a map of directed edge
//! entries. Undirected graphs store every logical edge as the two entries `u -> v`
//! and `v -> u` (a loop `u -> u` is stored once), so all derived views can treat
//! both kinds of graph uniformly.
//!
//! Unweighted graphs are multigraphs: adding an edge twice bumps its multiplicity.
//! Weighted graphs behave like a map from vertex pair to weight: adding an edge
//! again replaces its weight.
//!
//! The adjacency list and the two adjacency matrices are computed lazily and cached
//! until the next mutation. Every mutation also bumps [`Graph::version`].

use std::{cell::OnceCell, collections::VecDeque};

use ahash::{AHashSet, RandomState};
use indexmap::{IndexMap, IndexSet};
use thiserror::Error;

pub mod builder;
pub mod label;
pub mod matrix;

pub use builder::GraphBuilder;
pub use label::Label;
pub use matrix::{AdjacencyMatrix, MatrixShapeError};

crate::define_indexed_vec!(
    /// Position of a vertex in [`Graph::vertices`].
    pub struct VertexIndex;

    /// A vector with one entry per vertex, indexed by [`VertexIndex`].
    pub struct VertexVec;
);

pub type Weight = f64;

/// Ordered successor lists, one per vertex, in vertex order.
pub type AdjacencyList = IndexMap<Label, Vec<Label>, RandomState>;

#[derive(Error, Debug, Clone, PartialEq)]
pub enum GraphError {
    #[error("invalid vertex label {0:?}: labels must be integers or non-empty strings")]
    InvalidVertexLabel(String),
    #[error("vertex {0} already exists")]
    DuplicateVertex(Label),
    #[error("vertex {0} does not exist")]
    UnknownVertex(Label),
    #[error("edge ({0}, {1}) does not exist")]
    UnknownEdge(Label, Label),
    #[error("an edge is two endpoints and an optional weight, got {0} field(s)")]
    InvalidEdgeShape(usize),
    #[error("edge weight {0:?} is not a finite number")]
    NonNumericWeight(String),
    #[error("algorithm is only defined for undirected graphs")]
    DirectedGraph,
    #[error("algorithm requires a weighted graph")]
    UnweightedGraph,
}

#[derive(Clone, Copy, Debug, PartialEq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EdgeSlot {
    pub multiplicity: u32,
    pub weight: Weight,
}

#[derive(Clone, Debug, Default)]
struct AdjacencyCache {
    list: OnceCell<AdjacencyList>,
    counts: OnceCell<AdjacencyMatrix<u32>>,
    weights: OnceCell<AdjacencyMatrix<Option<Weight>>>,
}

#[derive(Clone, Debug)]
pub struct Graph {
    vertices: IndexSet<Label, RandomState>,
    edges: IndexMap<(Label, Label), EdgeSlot, RandomState>,
    directed: bool,
    weighted: bool,
    version: u64,
    cache: AdjacencyCache,
}

fn check_weight(weight: Weight) -> Result<Weight, GraphError> {
    if weight.is_finite() {
        Ok(weight)
    } else {
        Err(GraphError::NonNumericWeight(weight.to_string()))
    }
}

impl Graph {
    fn empty(directed: bool, weighted: bool) -> Self {
        Graph {
            vertices: IndexSet::default(),
            edges: IndexMap::default(),
            directed,
            weighted,
            version: 0,
            cache: AdjacencyCache::default(),
        }
    }

    /// Builds an unweighted graph. Every label must be valid and unique and every edge
    /// endpoint must be one of `vertices`.
    pub fn new<V, E, A, B>(vertices: V, edges: E, directed: bool) -> Result<Self, GraphError>
    where
        V: IntoIterator,
        V::Item: Into<Label>,
        E: IntoIterator<Item = (A, B)>,
        A: Into<Label>,
        B: Into<Label>,
    {
        let mut graph = Graph::empty(directed, false);
        for v in vertices {
            graph.add_vertex(v)?;
        }
        for (u, v) in edges {
            graph.add_edge(u, v)?;
        }
        graph.version = 0;
        Ok(graph)
    }

    /// Builds a weighted graph from `((u, v), weight)` entries.
    pub fn new_weighted<V, E, A, B>(
        vertices: V,
        edges: E,
        directed: bool,
    ) -> Result<Self, GraphError>
    where
        V: IntoIterator,
        V::Item: Into<Label>,
        E: IntoIterator<Item = ((A, B), Weight)>,
        A: Into<Label>,
        B: Into<Label>,
    {
        let mut graph = Graph::empty(directed, true);
        for v in vertices {
            graph.add_vertex(v)?;
        }
        for ((u, v), w) in edges {
            graph.add_weighted_edge(u, v, w)?;
        }
        graph.version = 0;
        Ok(graph)
    }

    pub fn is_directed(&self) -> bool {
        self.directed
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }

    /// Incremented by every successful mutation.
    pub fn version(&self) -> u64 {
        self.version
    }

    pub fn vertices(&self) -> impl ExactSizeIterator<Item = &Label> + '_ {
        self.vertices.iter()
    }

    /// Number of vertices.
    pub fn order(&self) -> usize {
        self.vertices.len()
    }

    pub fn is_empty(&self) -> bool {
        self.vertices.is_empty()
    }

    pub fn contains_vertex(&self, v: &Label) -> bool {
        self.vertices.contains(v)
    }

    pub fn index_of(&self, v: &Label) -> Result<VertexIndex, GraphError> {
        self.vertices
            .get_index_of(v)
            .map(VertexIndex)
            .ok_or_else(|| GraphError::UnknownVertex(v.clone()))
    }

    pub fn label(&self, i: VertexIndex) -> &Label {
        &self.vertices[i.0]
    }

    /// Directed edge entries `((u, v), slot)` in insertion order. Undirected graphs
    /// yield both directions of each edge.
    pub fn edge_entries(&self) -> impl Iterator<Item = (&(Label, Label), &EdgeSlot)> + '_ {
        self.edges.iter()
    }

    /// One entry per logical edge: every entry of a directed graph, and for undirected
    /// graphs only the direction that goes forward in vertex order.
    pub fn logical_edges(&self) -> impl Iterator<Item = (&(Label, Label), &EdgeSlot)> + '_ {
        self.edges.iter().filter(|((u, v), _)| {
            self.directed
                || self.vertices.get_index_of(u) <= self.vertices.get_index_of(v)
        })
    }

    /// Logical edges counted with multiplicity; an undirected edge counts once.
    pub fn number_of_edges(&self) -> usize {
        self.logical_edges()
            .map(|(_, slot)| slot.multiplicity as usize)
            .sum()
    }

    pub fn has_edge(&self, u: &Label, v: &Label) -> bool {
        self.edges.contains_key(&(u.clone(), v.clone()))
    }

    pub fn edge(&self, u: &Label, v: &Label) -> Option<&EdgeSlot> {
        self.edges.get(&(u.clone(), v.clone()))
    }

    pub fn weight(&self, u: &Label, v: &Label) -> Option<Weight> {
        self.edge(u, v).map(|slot| slot.weight)
    }

    fn invalidate(&mut self) {
        self.version += 1;
        self.cache = AdjacencyCache::default();
    }

    pub fn add_vertex(&mut self, v: impl Into<Label>) -> Result<(), GraphError> {
        let v = v.into();
        v.validate()?;
        if self.vertices.contains(&v) {
            return Err(GraphError::DuplicateVertex(v));
        }
        self.vertices.insert(v);
        self.invalidate();
        Ok(())
    }

    fn check_endpoints(&self, u: &Label, v: &Label) -> Result<(), GraphError> {
        for x in [u, v] {
            if !self.vertices.contains(x) {
                return Err(GraphError::UnknownVertex(x.clone()));
            }
        }
        Ok(())
    }

    fn insert_entry(&mut self, u: Label, v: Label, weight: Weight) {
        let weighted = self.weighted;
        self.edges
            .entry((u, v))
            .and_modify(|slot| {
                if weighted {
                    slot.weight = weight;
                } else {
                    slot.multiplicity += 1;
                }
            })
            .or_insert(EdgeSlot {
                multiplicity: 1,
                weight,
            });
    }

    /// Adds the edge `u -> v` with weight 1 (both directions for undirected graphs).
    pub fn add_edge(&mut self, u: impl Into<Label>, v: impl Into<Label>) -> Result<(), GraphError> {
        self.add_weighted_edge(u, v, 1.0)
    }

    /// Adds the edge `u -> v` carrying `weight`. On an unweighted graph the weight is kept
    /// but only the multiplicity is observable through the adjacency matrix.
    pub fn add_weighted_edge(
        &mut self,
        u: impl Into<Label>,
        v: impl Into<Label>,
        weight: Weight,
    ) -> Result<(), GraphError> {
        let (u, v) = (u.into(), v.into());
        self.check_endpoints(&u, &v)?;
        let weight = check_weight(weight)?;

        if !self.directed && u != v {
            self.insert_entry(v.clone(), u.clone(), weight);
        }
        self.insert_entry(u, v, weight);
        self.invalidate();
        Ok(())
    }

    /// Removes `v` and every edge incident to it.
    pub fn remove_vertex(&mut self, v: &Label) -> Result<(), GraphError> {
        if !self.vertices.contains(v) {
            return Err(GraphError::UnknownVertex(v.clone()));
        }
        self.vertices.shift_remove(v);
        self.edges.retain(|(a, b), _| a != v && b != v);
        self.invalidate();
        Ok(())
    }

    fn take_entry(&mut self, u: &Label, v: &Label) {
        let key = (u.clone(), v.clone());
        if let Some(slot) = self.edges.get_mut(&key) {
            if slot.multiplicity > 1 {
                slot.multiplicity -= 1;
            } else {
                self.edges.shift_remove(&key);
            }
        }
    }

    /// Removes one copy of the edge `u -> v` (and `v -> u` for undirected graphs).
    pub fn remove_edge(&mut self, u: &Label, v: &Label) -> Result<(), GraphError> {
        self.check_endpoints(u, v)?;
        if !self.has_edge(u, v) {
            return Err(GraphError::UnknownEdge(u.clone(), v.clone()));
        }
        self.take_entry(u, v);
        if !self.directed && u != v {
            self.take_entry(v, u);
        }
        self.invalidate();
        Ok(())
    }

    fn degree_at(&self, i: VertexIndex) -> (usize, usize) {
        let m = self.adjacency_matrix();
        let loop_bonus = if self.directed {
            0
        } else {
            m[(i, i)] as usize
        };
        let out_degree = m.row_sum(i) as usize + loop_bonus;
        let in_degree = m.indices().map(|j| m[(j, i)] as usize).sum::<usize>() + loop_bonus;
        (in_degree, out_degree)
    }

    /// `(in_degree, out_degree)` of `v`, counted with multiplicity. In an undirected
    /// graph both are the usual degree and a loop counts twice.
    pub fn degree(&self, v: &Label) -> Result<(usize, usize), GraphError> {
        Ok(self.degree_at(self.index_of(v)?))
    }

    /// Degrees of all vertices, in vertex order.
    pub fn degrees(&self) -> VertexVec<(usize, usize)> {
        (0..self.order())
            .map(|i| self.degree_at(VertexIndex(i)))
            .collect()
    }

    /// Distinct successors of `v`, in vertex order.
    pub fn neighbors(&self, v: &Label) -> Result<&[Label], GraphError> {
        self.adjacency_list()
            .get(v)
            .map(Vec::as_slice)
            .ok_or_else(|| GraphError::UnknownVertex(v.clone()))
    }

    pub fn is_isolated(&self, v: &Label) -> Result<bool, GraphError> {
        let i = self.index_of(v)?;
        let m = self.adjacency_matrix();
        Ok(m.row_sum(i) == 0 && m.indices().all(|j| m[(j, i)] == 0))
    }

    pub fn adjacency_list(&self) -> &AdjacencyList {
        self.cache.list.get_or_init(|| {
            let counts = self.adjacency_matrix();
            self.vertices
                .iter()
                .enumerate()
                .map(|(i, v)| {
                    let successors = counts
                        .successors(VertexIndex(i))
                        .map(|j| self.label(j).clone())
                        .collect();
                    (v.clone(), successors)
                })
                .collect()
        })
    }

    /// Edge multiplicities: `entry[(i, j)]` is the number of edges `i -> j`.
    pub fn adjacency_matrix(&self) -> &AdjacencyMatrix<u32> {
        self.cache.counts.get_or_init(|| {
            let mut m = AdjacencyMatrix::new(self.order());
            for ((u, v), slot) in &self.edges {
                if let (Some(i), Some(j)) = (
                    self.vertices.get_index_of(u),
                    self.vertices.get_index_of(v),
                ) {
                    m[(VertexIndex(i), VertexIndex(j))] = slot.multiplicity;
                }
            }
            m
        })
    }

    /// Edge weights: `entry[(i, j)]` is the weight of `i -> j`, `None` without an edge.
    /// Edges of an unweighted graph weigh 1 each.
    pub fn weight_matrix(&self) -> &AdjacencyMatrix<Option<Weight>> {
        self.cache.weights.get_or_init(|| {
            let mut m = AdjacencyMatrix::new(self.order());
            for ((u, v), slot) in &self.edges {
                if let (Some(i), Some(j)) = (
                    self.vertices.get_index_of(u),
                    self.vertices.get_index_of(v),
                ) {
                    m[(VertexIndex(i), VertexIndex(j))] = Some(if self.weighted {
                        slot.weight
                    } else {
                        1.0
                    });
                }
            }
            m
        })
    }

    /// Ratio of present vertex pairs to possible ones (loops and multiplicity ignored).
    pub fn density(&self) -> f64 {
        let n = self.order();
        if n <= 1 {
            return 0.0;
        }
        let pairs = self.edges.keys().filter(|(u, v)| u != v).count();
        pairs as f64 / (n * (n - 1)) as f64
    }

    pub fn is_complete(&self) -> bool {
        (self.density() - 1.0).abs() < 1e-9
    }

    /// Whether `to` can be reached from `from` following edge directions.
    pub fn path_exists(&self, from: &Label, to: &Label) -> Result<bool, GraphError> {
        self.check_endpoints(from, to)?;
        let adjacency = self.adjacency_list();
        let mut seen = AHashSet::new();
        let mut queue = VecDeque::from([from]);
        while let Some(current) = queue.pop_front() {
            if current == to {
                return Ok(true);
            }
            if !seen.insert(current) {
                continue;
            }
            queue.extend(adjacency[current].iter().filter(|n| !seen.contains(n)));
        }
        Ok(false)
    }
}
