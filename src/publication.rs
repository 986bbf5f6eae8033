use std::fmt::Debug;
use std::hash::Hash;

/// Publication is the payload carried by every node of a [`CitationGraph`](crate::CitationGraph).
///
/// The graph never looks inside a publication. It only builds one from an id when a node is created,
/// and tells it when it starts citing another publication.
pub trait Publication: Sized {
    /// Id uniquely identifies a publication inside one graph.
    ///
    /// The identity index is a concurrent hash map, which is why ids must be `Send + Sync + 'static`.
    type Id: Copy + Ord + Hash + Debug + Send + Sync + 'static;

    /// Error returned when building or updating the publication fails.
    type Error: std::error::Error + Send + Sync + 'static;

    /// Build the publication for a freshly created node.
    fn create(id: Self::Id) -> Result<Self, Self::Error>;

    /// Returns the id this publication was created with.
    fn id(&self) -> Self::Id;

    /// Called right after an edge making this publication cite `cited` has been inserted.
    ///
    /// Returning an error removes the edge again and fails the whole operation, so an implementation that fails
    /// must leave itself unchanged.
    fn record_citation(&mut self, cited: Self::Id) -> Result<(), Self::Error> {
        let _ = cited;
        Ok(())
    }
}
