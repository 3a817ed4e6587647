//! # Graph algorithms
//!
//! ### Connectivity
//! - [`connectivity`]: reachability through accumulated matrix powers, with a set of
//!   vertices that may be left out of the verdict
//!
//! ### Eulerian trails
//! - [`eulerian`]: circuit / path / neither, from degree parity and connectivity
//! - [`fleury`]: builds the trail edge by edge, crossing bridges only when forced
//!
//! ### Hamiltonian cycles
//! - [`hamiltonian`]: greedy nearest-neighbour heuristic on weighted graphs
//!
//! Eulerian algorithms reject directed graphs with [`GraphError::DirectedGraph`];
//! the Hamiltonian heuristic rejects unweighted ones with
//! [`GraphError::UnweightedGraph`].
//!
//! [`GraphError::DirectedGraph`]: crate::graph::GraphError::DirectedGraph
//! [`GraphError::UnweightedGraph`]: crate::graph::GraphError::UnweightedGraph

pub mod connectivity;
pub mod eulerian;
pub mod fleury;
pub mod hamiltonian;

pub use connectivity::{is_connected, ConnectivityOracle};
pub use eulerian::{classify_eulerian, EulerianClassification, EulerianKind};
pub use fleury::{fleury, EulerError, EulerianPath, Fleury};
pub use hamiltonian::{
    best_nearest_neighbor_cycle, cycle_cost, nearest_neighbor_cycle, HamiltonError,
    HamiltonianCycle, NearestNeighbor,
};
