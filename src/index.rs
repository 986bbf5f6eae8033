use std::hash::Hash;

use papaya::HashMap;

use crate::node::NodeKey;

/// IdentityIndex maps publication ids to the handles of their live nodes.
///
/// It is the single source of truth for whether an id exists. Entries are inserted when a node is created and
/// removed exactly once, when that node is released.
pub(crate) struct IdentityIndex<I> {
    entries: HashMap<I, NodeKey, ahash::RandomState>,
}

impl<I> IdentityIndex<I>
where
    I: Copy + Ord + Hash + Send + Sync + 'static,
{
    pub fn with_capacity(capacity: usize) -> Self {
        IdentityIndex {
            entries: HashMap::with_capacity_and_hasher(capacity, ahash::RandomState::new()),
        }
    }

    pub fn contains(&self, id: &I) -> bool {
        self.entries.pin().contains_key(id)
    }

    pub fn lookup(&self, id: &I) -> Option<NodeKey> {
        self.entries.pin().get(id).copied()
    }

    /// Register a new id. Returns false and leaves the index untouched if the id is already taken.
    pub fn register(&mut self, id: I, key: NodeKey) -> bool {
        let entries = self.entries.pin();
        if entries.contains_key(&id) {
            return false;
        }
        entries.insert(id, key);
        true
    }

    pub fn deregister(&mut self, id: &I) -> Option<NodeKey> {
        self.entries.pin().remove(id).copied()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Every registered id, in ascending order.
    pub fn ids(&self) -> Vec<I> {
        let mut ids: Vec<I> = self.entries.pin().keys().copied().collect();
        ids.sort_unstable();
        ids
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_rejects_duplicates() {
        let mut index = IdentityIndex::with_capacity(4);
        assert!(index.register(1u32, NodeKey::new(0)));
        assert!(!index.register(1u32, NodeKey::new(7)));
        assert_eq!(index.lookup(&1), Some(NodeKey::new(0)));
        assert_eq!(index.len(), 1);
    }

    #[test]
    fn deregister_happens_once() {
        let mut index = IdentityIndex::with_capacity(0);
        index.register(3u32, NodeKey::new(2));
        assert_eq!(index.deregister(&3), Some(NodeKey::new(2)));
        assert_eq!(index.deregister(&3), None);
        assert!(!index.contains(&3));
    }

    #[test]
    fn ids_are_sorted() {
        let mut index = IdentityIndex::with_capacity(0);
        for (slot, id) in [5u32, 1, 3].into_iter().enumerate() {
            index.register(id, NodeKey::new(slot));
        }
        assert_eq!(index.ids(), vec![1, 3, 5]);
    }
}
