use super::{Graph, GraphError, Label, Weight};

/// Collects vertices and edges without validating them; [`GraphBuilder::build`]
/// checks everything at once and either returns the finished graph or the first
/// violation.
#[derive(Clone, Debug)]
pub struct GraphBuilder {
    vertices: Vec<Label>,
    edges: Vec<(Label, Label, Weight)>,
    directed: bool,
    weighted: bool,
}

impl GraphBuilder {
    pub fn new() -> Self {
        GraphBuilder {
            vertices: Vec::new(),
            edges: Vec::new(),
            directed: false,
            weighted: false,
        }
    }

    pub fn directed(mut self, directed: bool) -> Self {
        self.directed = directed;
        self
    }

    pub fn weighted(mut self, weighted: bool) -> Self {
        self.weighted = weighted;
        self
    }

    pub fn build(self) -> Result<Graph, GraphError> {
        if self.weighted {
            Graph::new_weighted(
                self.vertices,
                self.edges.into_iter().map(|(u, v, w)| ((u, v), w)),
                self.directed,
            )
        } else {
            Graph::new(
                self.vertices,
                self.edges.into_iter().map(|(u, v, _)| (u, v)),
                self.directed,
            )
        }
    }

    pub fn add_vertex(&mut self, v: impl Into<Label>) -> &mut Self {
        self.vertices.push(v.into());
        self
    }

    /// Adds every label that is not present yet, keeping first-seen order.
    pub fn ensure_vertex(&mut self, v: impl Into<Label>) -> &mut Self {
        let v = v.into();
        if !self.vertices.contains(&v) {
            self.vertices.push(v);
        }
        self
    }

    pub fn add_edge(&mut self, u: impl Into<Label>, v: impl Into<Label>) -> &mut Self {
        self.edges.push((u.into(), v.into(), 1.0));
        self
    }

    pub fn add_weighted_edge(
        &mut self,
        u: impl Into<Label>,
        v: impl Into<Label>,
        weight: Weight,
    ) -> &mut Self {
        self.weighted = true;
        self.edges.push((u.into(), v.into(), weight));
        self
    }

    pub fn vertices(&self) -> &[Label] {
        &self.vertices
    }

    pub fn is_weighted(&self) -> bool {
        self.weighted
    }
}

impl Default for GraphBuilder {
    fn default() -> Self {
        Self::new()
    }
}

impl TryFrom<GraphBuilder> for Graph {
    type Error = GraphError;

    fn try_from(builder: GraphBuilder) -> Result<Self, Self::Error> {
        builder.build()
    }
}
