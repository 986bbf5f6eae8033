/// GraphConfig holds the sizing hints used when a graph is constructed.
///
/// Capacities are hints only; the graph grows past them as needed.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct GraphConfig {
    /// Number of publications to reserve room for, root included.
    pub publications: usize,
    /// Number of citation edges to reserve room for.
    pub citations: usize,
}

impl GraphConfig {
    /// Reserve room for `publications` nodes.
    #[must_use]
    pub fn with_publications(mut self, publications: usize) -> Self {
        self.publications = publications;
        self
    }

    /// Reserve room for `citations` edges.
    #[must_use]
    pub fn with_citations(mut self, citations: usize) -> Self {
        self.citations = citations;
        self
    }
}
