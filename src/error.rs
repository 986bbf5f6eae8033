use crate::publication::Publication;

/// Error returned by fallible [`CitationGraph`](crate::CitationGraph) operations.
///
/// `I` is the publication id type and `E` the publication's own error type.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum GraphError<I, E> {
    /// No live publication has this id.
    #[error("publication {0:?} not found")]
    NotFound(I),
    /// `create` was given an empty list of cited publications.
    #[error("a new publication must cite at least one existing publication")]
    NoParents,
    /// A publication with this id already exists.
    #[error("publication {0:?} already exists")]
    AlreadyExists(I),
    /// The root publication can never be removed.
    #[error("cannot remove root publication {0:?}")]
    CannotRemoveRoot(I),
    /// Linking `citing` to `cited` would make a publication its own ancestor.
    #[error("citation of {cited:?} by {citing:?} would form a cycle")]
    CycleDetected {
        /// The publication that would gain the citation.
        citing: I,
        /// The publication that would be cited.
        cited: I,
    },
    /// The publication itself failed to build or to record a citation.
    #[error("publication rejected the operation")]
    Publication(#[source] E),
}

/// ErrorKind is a coarse classification of [`GraphError`], stable across id and payload types.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ErrorKind {
    /// Some referenced id has no live node, or no parent was given.
    NotFound,
    /// The id is already taken.
    AlreadyExists,
    /// The root was targeted by `remove`.
    CannotRemoveRoot,
    /// The edge would close a cycle.
    CycleDetected,
    /// The payload failed.
    Publication,
}

impl<I, E> GraphError<I, E> {
    /// Classify this error.
    pub fn kind(&self) -> ErrorKind {
        match self {
            GraphError::NotFound(_) | GraphError::NoParents => ErrorKind::NotFound,
            GraphError::AlreadyExists(_) => ErrorKind::AlreadyExists,
            GraphError::CannotRemoveRoot(_) => ErrorKind::CannotRemoveRoot,
            GraphError::CycleDetected { .. } => ErrorKind::CycleDetected,
            GraphError::Publication(_) => ErrorKind::Publication,
        }
    }

    /// Returns true if this error is of kind [`ErrorKind::NotFound`].
    pub fn is_not_found(&self) -> bool {
        self.kind() == ErrorKind::NotFound
    }
}

/// Result of a graph operation on publications of type `P`.
pub type Result<T, P> =
    std::result::Result<T, GraphError<<P as Publication>::Id, <P as Publication>::Error>>;
