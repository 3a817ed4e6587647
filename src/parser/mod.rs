//! # Text formats
//!
//! Graphs can be read from and written to two formats:
//!
//! - **DOT** ([`Graph::from_dot_str`], [`Graph::to_dot`], the [`dot!`](crate::dot)
//!   macro), parsed with the `dot-parser` crate.
//! - **Edge lists** ([`Graph::from_edge_list_str`], [`Graph::to_edge_list`]): one edge
//!   per line, `u v` or `u v weight`.
//!
//! [`GraphFormat`] picks between them by name or by file extension.

use std::{path::Path, str::FromStr};

use derive_more::Display;

use crate::graph::Graph;

pub mod dot;
pub mod edge_list;
pub mod error;

pub use error::ParseError;

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, Display)]
pub enum GraphFormat {
    #[display(fmt = "dot")]
    Dot,
    #[display(fmt = "edges")]
    EdgeList,
}

impl GraphFormat {
    /// `.dot` and `.gv` files are DOT, everything else is read as an edge list.
    pub fn from_path(path: impl AsRef<Path>) -> Self {
        match path
            .as_ref()
            .extension()
            .and_then(|ext| ext.to_str())
            .map(str::to_ascii_lowercase)
            .as_deref()
        {
            Some("dot" | "gv") => GraphFormat::Dot,
            _ => GraphFormat::EdgeList,
        }
    }

    /// Parses `s`. `directed` only applies to edge lists; DOT says it itself.
    pub fn parse(self, s: &str, directed: bool) -> Result<Graph, ParseError> {
        match self {
            GraphFormat::Dot => Graph::from_dot_str(s),
            GraphFormat::EdgeList => Graph::from_edge_list_str(s, directed),
        }
    }

    pub fn write(self, graph: &Graph) -> String {
        match self {
            GraphFormat::Dot => graph.to_dot(),
            GraphFormat::EdgeList => graph.to_edge_list(),
        }
    }
}

impl FromStr for GraphFormat {
    type Err = ParseError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "dot" | "gv" | "graphviz" => Ok(GraphFormat::Dot),
            "edges" | "edge-list" | "edgelist" | "txt" => Ok(GraphFormat::EdgeList),
            _ => Err(ParseError::UnknownFormat(s.to_owned())),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn format_from_name_and_extension() {
        assert_eq!("DOT".parse::<GraphFormat>().unwrap(), GraphFormat::Dot);
        assert_eq!("edges".parse::<GraphFormat>().unwrap(), GraphFormat::EdgeList);
        assert_eq!(
            "json".parse::<GraphFormat>().unwrap_err(),
            ParseError::UnknownFormat("json".into())
        );

        assert_eq!(GraphFormat::from_path("graphs/k4.gv"), GraphFormat::Dot);
        assert_eq!(GraphFormat::from_path("k4.Dot"), GraphFormat::Dot);
        assert_eq!(GraphFormat::from_path("k4.txt"), GraphFormat::EdgeList);
        assert_eq!(GraphFormat::from_path("k4"), GraphFormat::EdgeList);
        assert_eq!(GraphFormat::Dot.to_string(), "dot");
    }

    #[test]
    fn formats_agree() {
        let from_edges = GraphFormat::EdgeList
            .parse("a b 3\nb c 4\nc a 5\n", false)
            .unwrap();
        let dot = GraphFormat::Dot.write(&from_edges);
        let from_dot = GraphFormat::Dot.parse(&dot, true).unwrap();

        assert!(!from_dot.is_directed());
        assert_eq!(from_dot.number_of_edges(), 3);
        for ((u, v), slot) in from_edges.logical_edges() {
            assert_eq!(from_dot.weight(u, v), Some(slot.weight));
        }
    }
}
