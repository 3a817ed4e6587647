use thiserror::Error;

use crate::graph::GraphError;

#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    /// The DOT source is not valid DOT.
    #[error("invalid DOT: {0}")]
    Dot(String),

    /// A line of an edge list could not be read; `line` is 1-based.
    #[error("line {line}: {source}")]
    Line { line: usize, source: GraphError },

    /// The text parsed, but does not describe a valid graph.
    #[error(transparent)]
    Graph(#[from] GraphError),

    #[error("unknown graph format {0:?} (expected `dot` or `edges`)")]
    UnknownFormat(String),
}

pub trait LineContext<T> {
    /// Attaches the 1-based line number to a graph error.
    fn at_line(self, line: usize) -> Result<T, ParseError>;
}

impl<T> LineContext<T> for Result<T, GraphError> {
    fn at_line(self, line: usize) -> Result<T, ParseError> {
        self.map_err(|source| ParseError::Line { line, source })
    }
}
