//! Graphviz DOT input and output.
//!
//! `graph { .. }` reads as an undirected graph and `digraph { .. }` as a directed one.
//! An edge attribute `weight` makes the whole graph weighted; edges without it weigh 1.
//! All other attributes are ignored.

use std::fmt::Write;

use itertools::Itertools;

use super::error::ParseError;
use crate::graph::{Graph, GraphBuilder, GraphError, Label, Weight};

fn dot_label(id: &str) -> Result<Label, GraphError> {
    Label::parse(id.trim_matches('"'))
}

fn dot_weight(value: &str) -> Result<Weight, GraphError> {
    let value = value.trim_matches('"');
    value
        .parse::<Weight>()
        .ok()
        .filter(|w| w.is_finite())
        .ok_or_else(|| GraphError::NonNumericWeight(value.to_owned()))
}

fn dot_id(label: &Label) -> String {
    match label {
        Label::Int(i) => i.to_string(),
        Label::Str(s) => format!("\"{}\"", s.replace('"', "\\\"")),
    }
}

impl Graph {
    /// Parses a single DOT graph.
    ///
    /// Vertices are ordered by their first appearance in an edge statement, followed
    /// by the vertices that only appear in node statements, sorted by label.
    pub fn from_dot_str(s: impl AsRef<str>) -> Result<Graph, ParseError> {
        let ast = dot_parser::ast::Graph::try_from(s.as_ref())
            .map_err(|e| ParseError::Dot(e.to_string()))?;
        let dot = dot_parser::canonical::Graph::from(
            ast.filter_map(&|a| Some((a.0.to_string(), a.1.to_string()))),
        );

        let mut builder = GraphBuilder::new().directed(dot.is_digraph);
        for edge in dot.edges.set {
            let u = dot_label(&edge.from)?;
            let v = dot_label(&edge.to)?;
            builder.ensure_vertex(u.clone()).ensure_vertex(v.clone());

            let weight = edge
                .attr
                .into_iter()
                .find(|(key, _)| key == "weight")
                .map(|(_, value)| dot_weight(&value))
                .transpose()?;
            match weight {
                Some(w) => builder.add_weighted_edge(u, v, w),
                None => builder.add_edge(u, v),
            };
        }

        let isolated: Vec<Label> = dot
            .nodes
            .set
            .into_iter()
            .map(|(id, _)| dot_label(&id))
            .try_collect()?;
        for v in isolated.into_iter().sorted() {
            builder.ensure_vertex(v);
        }

        Ok(builder.build()?)
    }

    /// Serializes the graph as DOT. Every vertex gets a node statement so that isolated
    /// vertices survive, and parallel edges are written once per copy.
    pub fn to_dot(&self) -> String {
        let (kind, arrow) = if self.is_directed() {
            ("digraph", "->")
        } else {
            ("graph", "--")
        };

        let mut out = String::new();
        let _ = writeln!(out, "{kind} {{");
        for v in self.vertices() {
            let _ = writeln!(out, "  {};", dot_id(v));
        }
        for ((u, v), slot) in self.logical_edges() {
            for _ in 0..slot.multiplicity {
                let _ = write!(out, "  {} {arrow} {}", dot_id(u), dot_id(v));
                let _ = if self.is_weighted() {
                    writeln!(out, " [weight={}];", slot.weight)
                } else {
                    writeln!(out, ";")
                };
            }
        }
        out.push('}');
        out
    }
}

/// Parses inline DOT into a [`Graph`](crate::graph::Graph).
///
/// ```
/// let g = graphwalk::dot!(digraph { a -> b [weight = 2]; b -> c }).unwrap();
/// assert!(g.is_directed());
/// assert_eq!(g.order(), 3);
/// ```
#[macro_export]
macro_rules! dot {
    ($($t:tt)*) => {
        $crate::graph::Graph::from_dot_str(stringify!($($t)*))
    };
}

#[cfg(test)]
mod tests {
    use similar_asserts::assert_eq;

    use super::*;

    fn sorted_vertices(graph: &Graph) -> Vec<Label> {
        graph.vertices().cloned().sorted().collect()
    }

    #[test]
    fn undirected_multigraph() {
        let graph = Graph::from_dot_str(
            "graph G {
                1 -- 2;
                1 -- 2;
                2 -- 3;
                4;
            }",
        )
        .unwrap();

        assert!(!graph.is_directed());
        assert!(!graph.is_weighted());
        assert_eq!(
            sorted_vertices(&graph),
            vec![Label::Int(1), Label::Int(2), Label::Int(3), Label::Int(4)]
        );
        assert_eq!(graph.number_of_edges(), 3);
        assert_eq!(graph.edge(&2.into(), &1.into()).unwrap().multiplicity, 2);
        assert!(graph.is_isolated(&4.into()).unwrap());
    }

    #[test]
    fn weight_attribute_makes_graph_weighted() {
        let graph = crate::dot!(digraph {
            a -> b [weight = 2.5];
            b -> c;
        })
        .unwrap();

        assert!(graph.is_directed());
        assert!(graph.is_weighted());
        assert_eq!(graph.weight(&"a".into(), &"b".into()), Some(2.5));
        assert_eq!(graph.weight(&"b".into(), &"c".into()), Some(1.0));
        assert_eq!(graph.weight(&"b".into(), &"a".into()), None);
    }

    #[test]
    fn quoted_identifiers() {
        let graph = Graph::from_dot_str(r#"graph { "left" -- "right" [weight="4"] }"#).unwrap();
        assert_eq!(
            sorted_vertices(&graph),
            vec![Label::from("left"), Label::from("right")]
        );
        assert_eq!(graph.weight(&"right".into(), &"left".into()), Some(4.0));
    }

    #[test]
    fn bad_input() {
        assert!(matches!(
            Graph::from_dot_str("graph { a -- "),
            Err(ParseError::Dot(_))
        ));
        assert_eq!(
            Graph::from_dot_str("graph { a -- b [weight=heavy] }").unwrap_err(),
            ParseError::Graph(GraphError::NonNumericWeight("heavy".into()))
        );
    }

    #[test]
    fn writes_dot() {
        let mut graph =
            Graph::new_weighted(["a", "b"], [(("a", "b"), 1.5)], false).unwrap();
        graph.add_vertex(7).unwrap();
        insta::assert_snapshot!(graph.to_dot(), @r#"
        graph {
          "a";
          "b";
          7;
          "a" -- "b" [weight=1.5];
        }
        "#);
    }

    #[test]
    fn dot_output_reads_back() {
        let graph = Graph::new(["x", "y", "z"], [("x", "y"), ("y", "z"), ("y", "z")], true)
            .unwrap();
        let again = Graph::from_dot_str(graph.to_dot()).unwrap();
        assert!(again.is_directed());
        assert_eq!(again.number_of_edges(), 3);
        assert_eq!(again.edge(&"y".into(), &"z".into()).unwrap().multiplicity, 2);
        assert_eq!(sorted_vertices(&again), sorted_vertices(&graph));
    }
}
