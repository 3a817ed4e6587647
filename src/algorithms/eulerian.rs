//! Eulerian classification by vertex parity and connectivity.
//!
//! A connected undirected graph has an Eulerian circuit when every degree is even,
//! and an Eulerian path when exactly two degrees are odd.

use derive_more::Display;
use tracing::debug;

use crate::graph::{Graph, GraphError, Label};

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum EulerianKind {
    #[display(fmt = "NONE")]
    None,
    /// Closed trail through every edge; may start anywhere.
    #[display(fmt = "CIRCUIT")]
    Circuit,
    /// Open trail through every edge; must start at one of the two odd vertices.
    #[display(fmt = "PATH")]
    Path,
}

#[derive(Clone, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct EulerianClassification {
    pub kind: EulerianKind,
    pub connected: bool,
    /// Vertices of odd degree, in vertex order. Reported even for disconnected graphs.
    pub odd_vertices: Vec<Label>,
}

impl EulerianClassification {
    pub fn has_circuit(&self) -> bool {
        self.kind == EulerianKind::Circuit
    }

    pub fn has_path(&self) -> bool {
        self.kind == EulerianKind::Path
    }

    pub fn is_feasible(&self) -> bool {
        self.kind != EulerianKind::None
    }
}

/// Decides whether an undirected graph has an Eulerian circuit, an Eulerian path or
/// neither, from its connectivity and the parity of its vertex degrees.
pub fn classify_eulerian(graph: &Graph) -> Result<EulerianClassification, GraphError> {
    if graph.is_directed() {
        return Err(GraphError::DirectedGraph);
    }

    let connected = graph.is_connected();
    let odd_vertices: Vec<Label> = graph
        .degrees()
        .into_iter()
        .filter(|(_, (_, out))| out % 2 == 1)
        .map(|(i, _)| graph.label(i).clone())
        .collect();

    let kind = match (connected, odd_vertices.len()) {
        (false, _) => EulerianKind::None,
        (true, 0) => EulerianKind::Circuit,
        (true, 2) => EulerianKind::Path,
        (true, _) => EulerianKind::None,
    };
    debug!(%kind, connected, odd = odd_vertices.len(), "classified graph");

    Ok(EulerianClassification {
        kind,
        connected,
        odd_vertices,
    })
}

impl Graph {
    pub fn classify_eulerian(&self) -> Result<EulerianClassification, GraphError> {
        classify_eulerian(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn cubic_six() -> Graph {
        Graph::new(
            [1, 2, 3, 4, 5, 6],
            [
                (1, 2),
                (1, 3),
                (1, 5),
                (2, 4),
                (2, 6),
                (3, 6),
                (3, 4),
                (4, 5),
                (5, 6),
            ],
            false,
        )
        .unwrap()
    }

    #[test]
    fn cubic_graph_has_no_trail() {
        let class = classify_eulerian(&cubic_six()).unwrap();
        assert_eq!(class.kind, EulerianKind::None);
        assert!(class.connected);
        assert!(!class.is_feasible());
        assert_eq!(class.odd_vertices, (1..=6).map(Label::Int).collect::<Vec<_>>());
    }

    #[test]
    fn even_connected_graph_has_circuit() {
        // three triangles 1-2-3, 3-4-5, 5-6-1
        let graph = Graph::new(
            [1, 2, 3, 4, 5, 6],
            [
                (1, 2),
                (2, 3),
                (3, 1),
                (3, 4),
                (4, 5),
                (5, 3),
                (5, 6),
                (6, 1),
                (1, 5),
            ],
            false,
        )
        .unwrap();
        let class = classify_eulerian(&graph).unwrap();
        assert_eq!(class.kind, EulerianKind::Circuit);
        assert!(class.has_circuit());
        assert!(!class.has_path());
        assert!(class.odd_vertices.is_empty());
    }

    #[test]
    fn two_odd_vertices_give_path() {
        let graph = Graph::new([1, 2, 3, 4], [(1, 2), (2, 3), (3, 4)], false).unwrap();
        let class = graph.classify_eulerian().unwrap();
        assert_eq!(class.kind, EulerianKind::Path);
        assert_eq!(class.odd_vertices, vec![Label::Int(1), Label::Int(4)]);
    }

    #[test]
    fn multi_edges_count_towards_parity() {
        let graph = Graph::new([1, 2, 3], [(1, 2), (1, 2), (2, 3), (2, 3), (1, 3)], false).unwrap();
        let class = classify_eulerian(&graph).unwrap();
        assert!(class.has_path());
        assert_eq!(class.odd_vertices, vec![Label::Int(1), Label::Int(3)]);
    }

    #[test]
    fn star_has_too_many_odd_vertices() {
        let graph = Graph::new(["c", "x", "y", "z"], [("c", "x"), ("c", "y"), ("c", "z")], false)
            .unwrap();
        let class = classify_eulerian(&graph).unwrap();
        assert_eq!(class.kind, EulerianKind::None);
        assert!(class.connected);
        assert_eq!(class.odd_vertices.len(), 4);
    }

    #[test]
    fn disconnected_graph_still_reports_odd_vertices() {
        let graph = Graph::new([1, 2, 3, 4], [(1, 2), (3, 4)], false).unwrap();
        let class = classify_eulerian(&graph).unwrap();
        assert_eq!(class.kind, EulerianKind::None);
        assert!(!class.connected);
        assert_eq!(class.odd_vertices.len(), 4);
    }

    #[test]
    fn loops_keep_parity_even() {
        let graph = Graph::new([1, 2], [(1, 2), (2, 1), (1, 1)], false).unwrap();
        assert!(classify_eulerian(&graph).unwrap().has_circuit());
    }

    #[test]
    fn directed_graphs_are_rejected() {
        let graph = Graph::new([1, 2], [(1, 2)], true).unwrap();
        assert_eq!(classify_eulerian(&graph), Err(GraphError::DirectedGraph));
    }

    #[test]
    fn kind_renders_upper_case() {
        assert_eq!(EulerianKind::Circuit.to_string(), "CIRCUIT");
        assert_eq!(EulerianKind::None.to_string(), "NONE");
    }
}
