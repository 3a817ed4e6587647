//! Plain-text edge lists.
//!
//! ```text
//! # comments run to the end of the line
//! a b 2.5     # edge a-b with weight 2.5
//! b c 1
//! d           # isolated vertex
//! ```
//!
//! Either every edge carries a weight or none does; the first edge line decides.

use std::fmt::Write;

use super::error::{LineContext, ParseError};
use crate::graph::{Graph, GraphBuilder, GraphError, Label, Weight};

fn parse_weight(token: &str) -> Result<Weight, GraphError> {
    token
        .parse::<Weight>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| GraphError::NonNumericWeight(token.to_owned()))
}

impl Graph {
    /// Reads an edge list. Vertices are numbered in order of first appearance.
    pub fn from_edge_list_str(s: &str, directed: bool) -> Result<Graph, ParseError> {
        let mut builder = GraphBuilder::new().directed(directed);
        let mut weighted = None;

        for (n, line) in s.lines().enumerate() {
            let line_no = n + 1;
            let content = line.split('#').next().unwrap_or_default();
            let tokens: Vec<&str> = content.split_whitespace().collect();

            match tokens.as_slice() {
                [] => {}
                [v] => {
                    builder.ensure_vertex(Label::parse(v).at_line(line_no)?);
                }
                [u, v, rest @ ..] if rest.len() <= 1 => {
                    let has_weight = !rest.is_empty();
                    if *weighted.get_or_insert(has_weight) != has_weight {
                        return Err(GraphError::InvalidEdgeShape(tokens.len())).at_line(line_no);
                    }
                    let u = Label::parse(u).at_line(line_no)?;
                    let v = Label::parse(v).at_line(line_no)?;
                    builder.ensure_vertex(u.clone()).ensure_vertex(v.clone());
                    match rest.first() {
                        Some(w) => {
                            builder.add_weighted_edge(u, v, parse_weight(w).at_line(line_no)?)
                        }
                        None => builder.add_edge(u, v),
                    };
                }
                _ => {
                    return Err(GraphError::InvalidEdgeShape(tokens.len())).at_line(line_no);
                }
            }
        }

        Ok(builder.build()?)
    }

    /// Writes the graph as an edge list that [`Graph::from_edge_list_str`] reads back.
    ///
    /// Isolated vertices are listed on their own line; every copy of a parallel edge
    /// gets its own line.
    pub fn to_edge_list(&self) -> String {
        let mut out = String::new();
        for v in self.vertices() {
            if self.is_isolated(v).unwrap_or(false) {
                let _ = writeln!(out, "{v}");
            }
        }
        for ((u, v), slot) in self.logical_edges() {
            for _ in 0..slot.multiplicity {
                let _ = if self.is_weighted() {
                    writeln!(out, "{u} {v} {}", slot.weight)
                } else {
                    writeln!(out, "{u} {v}")
                };
            }
        }
        out
    }
}
