use crate::path::FieldPath;
use thiserror::Error;

/// Errors returned by the fallible update operations.
#[derive(Clone, Debug, Eq, PartialEq, Error)]
pub enum UpdateError {
    /// The lens addresses nothing in the value (e.g. an index past the end of a vector).
    #[error("no value at `{path}`")]
    Unreachable { path: FieldPath },
    /// Insertion or removal index outside the collection.
    #[error("index {index} out of bounds for `{path}` (length {len})")]
    IndexOutOfBounds { path: FieldPath, index: usize, len: usize },
    /// The state was updated from within one of its watchers.
    #[error("state updated while its watchers were being notified")]
    Reentrant,
}

impl UpdateError {
    pub(crate) fn unreachable(path: FieldPath) -> UpdateError {
        UpdateError::Unreachable { path }
    }
}
