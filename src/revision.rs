/// Revision counts the mutations a graph has gone through.
///
/// Every successful `create`, `add_citation` that inserts a new edge, and `remove` bumps it by one.
/// Failed and no-op calls leave it untouched, so comparing two revisions tells whether anything changed in between.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Default)]
pub struct Revision(u64);

impl Revision {
    pub(crate) fn increment(&mut self) -> Revision {
        self.0 += 1;
        *self
    }

    /// Raw counter value.
    pub fn get(self) -> u64 {
        self.0
    }
}
