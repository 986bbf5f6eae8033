use std::fmt;

use petgraph::stable_graph::{EdgeIndex, StableDiGraph};
use petgraph::Direction;
use tracing::{debug, trace};

use crate::config::GraphConfig;
use crate::cycles::would_create_cycle;
use crate::error::{GraphError, Result};
use crate::index::IdentityIndex;
use crate::node::{Node, NodeKey};
use crate::publication::Publication;
use crate::revision::Revision;

/// CitationGraph is a DAG of publications anchored at a permanent root.
///
/// An edge goes from a cited publication (parent) to a publication citing it (child), and every parent keeps its
/// children alive. A publication therefore lives exactly as long as it is reachable from the root: removing one
/// releases it together with everything that was only reachable through it.
///
/// Every mutation is all-or-nothing: when it fails, ids, edges and [`revision`](Self::revision) are exactly as
/// they were before the call.
pub struct CitationGraph<P: Publication> {
    graph: StableDiGraph<Node<P>, ()>,
    index: IdentityIndex<P::Id>,
    root: NodeKey,
    revision: Revision,
}

/// A forward step of a mutation that has to be reverted if a later step fails.
enum Undo<I> {
    Node(NodeKey),
    Register(I),
    Edge(EdgeIndex),
}

impl<P: Publication> CitationGraph<P> {
    /// Create a graph whose root publication has `root_id`.
    ///
    /// Fails only if the root publication cannot be built.
    pub fn new(root_id: P::Id) -> Result<Self, P> {
        Self::with_config(root_id, GraphConfig::default())
    }

    /// Create a graph pre-sized according to `config`.
    pub fn with_config(root_id: P::Id, config: GraphConfig) -> Result<Self, P> {
        let publication = P::create(root_id).map_err(GraphError::Publication)?;
        let mut graph = StableDiGraph::with_capacity(config.publications, config.citations);
        let root = graph.add_node(Node::new(root_id, publication));
        let mut index = IdentityIndex::with_capacity(config.publications);
        index.register(root_id, root);
        debug!(root = ?root_id, "created citation graph");
        Ok(CitationGraph {
            graph,
            index,
            root,
            revision: Revision::default(),
        })
    }

    /// Returns the id of the root publication.
    pub fn get_root_id(&self) -> P::Id {
        self.graph[self.root].id()
    }

    /// Returns true if a live publication has `id`.
    pub fn exists(&self, id: P::Id) -> bool {
        self.index.contains(&id)
    }

    /// Ids of the publications citing `id`, oldest citation first.
    pub fn get_children(&self, id: P::Id) -> Result<Vec<P::Id>, P> {
        self.neighbor_ids(id, Direction::Outgoing)
    }

    /// Ids of the publications cited by `id`, oldest citation first.
    pub fn get_parents(&self, id: P::Id) -> Result<Vec<P::Id>, P> {
        self.neighbor_ids(id, Direction::Incoming)
    }

    /// Borrow the publication with `id`.
    pub fn get(&self, id: P::Id) -> Result<&P, P> {
        let key = self.lookup(id)?;
        Ok(self.graph[key].publication())
    }

    /// Mutably borrow the publication with `id`.
    ///
    /// The publication must keep reporting the same [`Publication::id`]; the graph keeps using the id the node
    /// was created with regardless.
    pub fn get_mut(&mut self, id: P::Id) -> Result<&mut P, P> {
        let key = self.lookup(id)?;
        Ok(self.graph[key].publication_mut())
    }

    /// Number of live publications, root included.
    pub fn len(&self) -> usize {
        self.index.len()
    }

    /// Ids of every live publication, in ascending order.
    pub fn ids(&self) -> Vec<P::Id> {
        self.index.ids()
    }

    /// Current revision. See [`Revision`].
    pub fn revision(&self) -> Revision {
        self.revision
    }

    /// Create publication `id` citing every publication in `parent_ids`, in order.
    ///
    /// # Errors
    ///
    /// - [`GraphError::AlreadyExists`] if `id` is taken.
    /// - [`GraphError::NoParents`] if `parent_ids` is empty.
    /// - [`GraphError::NotFound`] for the first parent id that does not exist.
    /// - [`GraphError::Publication`] if the publication cannot be built or rejects one of its citations.
    ///
    /// On error nothing is changed: the half-linked node is detached from every parent and deregistered.
    pub fn create(&mut self, id: P::Id, parent_ids: &[P::Id]) -> Result<(), P> {
        if self.index.contains(&id) {
            return Err(GraphError::AlreadyExists(id));
        }
        if parent_ids.is_empty() {
            return Err(GraphError::NoParents);
        }
        let parents = parent_ids
            .iter()
            .map(|&parent_id| self.lookup(parent_id))
            .collect::<Result<Vec<_>, P>>()?;
        let publication = P::create(id).map_err(GraphError::Publication)?;

        let mut journal = Vec::with_capacity(parents.len() + 2);
        let key = self.graph.add_node(Node::new(id, publication));
        journal.push(Undo::Node(key));
        self.index.register(id, key);
        journal.push(Undo::Register(id));

        for parent in parents {
            if let Err(err) = self.link(parent, key, &mut journal) {
                debug!(?id, error = %err, "rolling back publication creation");
                self.rollback(journal);
                return Err(err);
            }
        }

        let revision = self.revision.increment();
        debug!(?id, parents = ?parent_ids, revision = revision.get(), "created publication");
        Ok(())
    }

    /// Create publication `id` citing a single publication.
    pub fn create_with_parent(&mut self, id: P::Id, parent_id: P::Id) -> Result<(), P> {
        self.create(id, &[parent_id])
    }

    /// Make `child_id` cite `parent_id`.
    ///
    /// Citing a publication that is already cited is a no-op.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NotFound`] if either publication does not exist.
    /// - [`GraphError::CycleDetected`] if `parent_id` already (transitively) cites `child_id`, or both are the same.
    /// - [`GraphError::Publication`] if the child rejects the citation; the edge is removed again.
    pub fn add_citation(&mut self, child_id: P::Id, parent_id: P::Id) -> Result<(), P> {
        let child = self.lookup(child_id)?;
        let parent = self.lookup(parent_id)?;
        if self.graph.contains_edge(parent, child) {
            return Ok(());
        }
        if would_create_cycle(&self.graph, parent, child) {
            return Err(GraphError::CycleDetected {
                citing: child_id,
                cited: parent_id,
            });
        }

        let mut journal = Vec::with_capacity(1);
        if let Err(err) = self.link(parent, child, &mut journal) {
            debug!(child = ?child_id, parent = ?parent_id, error = %err, "rolling back citation");
            self.rollback(journal);
            return Err(err);
        }

        let revision = self.revision.increment();
        debug!(child = ?child_id, parent = ?parent_id, revision = revision.get(), "added citation");
        Ok(())
    }

    /// Remove publication `id`.
    ///
    /// The publication is detached from everything it cites and released. Publications that were reachable only
    /// through it are released as well; publications with another path to the root stay.
    ///
    /// Returns the ids of every released publication, `id` first.
    ///
    /// # Errors
    ///
    /// - [`GraphError::NotFound`] if `id` does not exist.
    /// - [`GraphError::CannotRemoveRoot`] if `id` is the root.
    pub fn remove(&mut self, id: P::Id) -> Result<Vec<P::Id>, P> {
        let key = self.lookup(id)?;
        if key == self.root {
            return Err(GraphError::CannotRemoveRoot(id));
        }

        let released = self.release(key);
        let revision = self.revision.increment();
        debug!(?id, released = released.len(), revision = revision.get(), "removed publication");
        Ok(released)
    }

    fn lookup(&self, id: P::Id) -> Result<NodeKey, P> {
        self.index.lookup(&id).ok_or(GraphError::NotFound(id))
    }

    fn neighbor_ids(&self, id: P::Id, direction: Direction) -> Result<Vec<P::Id>, P> {
        let key = self.lookup(id)?;
        let mut ids: Vec<P::Id> = self
            .graph
            .neighbors_directed(key, direction)
            .map(|neighbor| self.graph[neighbor].id())
            .collect();
        // petgraph yields the most recently added edge first.
        ids.reverse();
        Ok(ids)
    }

    /// Number of owners keeping `key` alive.
    fn strong_count(&self, key: NodeKey) -> usize {
        let owners = self.graph.neighbors_directed(key, Direction::Incoming).count();
        owners + usize::from(key == self.root)
    }

    /// Insert the edge `parent -> child`, then let the child record the citation.
    ///
    /// Returns false if the edge already existed. The inserted edge is journaled before the fallible step so the
    /// caller can revert it.
    fn link(
        &mut self,
        parent: NodeKey,
        child: NodeKey,
        journal: &mut Vec<Undo<P::Id>>,
    ) -> Result<bool, P> {
        if self.graph.contains_edge(parent, child) {
            return Ok(false);
        }
        let edge = self.graph.add_edge(parent, child, ());
        journal.push(Undo::Edge(edge));

        let cited = self.graph[parent].id();
        self.graph[child]
            .publication_mut()
            .record_citation(cited)
            .map_err(GraphError::Publication)?;
        Ok(true)
    }

    fn rollback(&mut self, journal: Vec<Undo<P::Id>>) {
        for step in journal.into_iter().rev() {
            match step {
                Undo::Edge(edge) => {
                    self.graph.remove_edge(edge);
                }
                Undo::Register(id) => {
                    self.index.deregister(&id);
                }
                Undo::Node(key) => {
                    self.graph.remove_node(key);
                }
            }
        }
    }

    /// Release `key` and cascade to every child left without an owner.
    fn release(&mut self, key: NodeKey) -> Vec<P::Id> {
        let mut pending = vec![key];
        let mut released = Vec::new();

        while let Some(key) = pending.pop() {
            let children: Vec<NodeKey> = self.graph.neighbors_directed(key, Direction::Outgoing).collect();
            // Removing the node drops every edge into and out of it.
            let Some(node) = self.graph.remove_node(key) else {
                continue;
            };
            let id = node.id();
            self.index.deregister(&id);
            trace!(?id, "released publication");
            released.push(id);

            pending.extend(children.into_iter().filter(|&child| self.strong_count(child) == 0));
        }

        released
    }
}

impl<P: Publication> std::ops::Index<P::Id> for CitationGraph<P> {
    type Output = P;

    /// # Panics
    ///
    /// Panics if no live publication has `id`.
    fn index(&self, id: P::Id) -> &P {
        match self.get(id) {
            Ok(publication) => publication,
            Err(_) => panic!("publication {id:?} not found"),
        }
    }
}

impl<P: Publication> fmt::Debug for CitationGraph<P> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("CitationGraph")
            .field("root", &self.get_root_id())
            .field("publications", &self.len())
            .field("citations", &self.graph.edge_count())
            .field("revision", &self.revision)
            .finish()
    }
}
