use petgraph::stable_graph::NodeIndex;

use crate::publication::Publication;

/// Stable, non-owning handle of a node inside the ownership graph.
///
/// Holding a key never keeps a node alive; a key of a released node simply stops resolving.
pub(crate) type NodeKey = NodeIndex;

#[derive(Debug)]
pub(crate) struct Node<P: Publication> {
    id: P::Id,
    publication: P,
}

impl<P: Publication> Node<P> {
    pub fn new(id: P::Id, publication: P) -> Self {
        debug_assert_eq!(publication.id(), id, "publication must report the id it was created with");
        Node { id, publication }
    }

    /// The id this node is registered under in the identity index.
    pub fn id(&self) -> P::Id {
        self.id
    }

    pub fn publication(&self) -> &P {
        &self.publication
    }

    pub fn publication_mut(&mut self) -> &mut P {
        &mut self.publication
    }
}
