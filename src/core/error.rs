use thiserror::Error;

use crate::core::entry::ParseError;
use crate::core::storage::StorageError;

/// Everything a core operation can refuse. None of these are fatal; the
/// caller reports them and carries on.
#[derive(Debug, Error)]
pub enum VocabError {
    #[error(transparent)]
    Parse(#[from] ParseError),

    #[error("no words to test (add some, or pick another tag)")]
    EmptyList,

    #[error("no entry at position {index} (list has {len})")]
    IndexOutOfRange { index: usize, len: usize },

    /// The in-memory change was applied but could not be written.
    #[error("could not save: {0}")]
    StorageUnavailable(#[from] StorageError),

    #[error("no test is running")]
    NotTesting,

    #[error("a test is running; stop it first")]
    QuizInProgress,
}
