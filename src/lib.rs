//! # Graphwalk
//!
//! Graphwalk walks small labelled graphs. It builds Eulerian circuits and paths
//! with Fleury's algorithm, which never crosses a bridge while another edge is
//! available, and approximates Hamiltonian cycles with the greedy nearest-neighbour
//! heuristic.
//!
//! ```
//! use graphwalk::prelude::*;
//!
//! let g = Graph::new([1, 2, 3, 4], [(1, 2), (2, 3), (3, 4)], false).unwrap();
//! let class = classify_eulerian(&g).unwrap();
//! assert!(class.has_path());
//!
//! let trail = fleury(&g, None).unwrap();
//! assert_eq!(trail.to_string(), "1 -> 2 -> 3 -> 4");
//! ```
//!
//! Graphs come from the [`graph::Graph`] constructors, the [`graph::GraphBuilder`],
//! or one of the text formats in [`parser`].

pub mod algorithms;
pub mod graph;
pub mod parser;
pub mod typed_vec;

pub mod prelude {
    pub use crate::algorithms::{
        best_nearest_neighbor_cycle, classify_eulerian, fleury, nearest_neighbor_cycle,
        EulerError, EulerianClassification, EulerianKind, EulerianPath, Fleury, HamiltonError,
        HamiltonianCycle, NearestNeighbor,
    };
    pub use crate::graph::{Graph, GraphBuilder, GraphError, Label, Weight};
    pub use crate::parser::{GraphFormat, ParseError};
}
