//! Errors returned by [`Tree`][crate::Tree] operations.

use thiserror::Error;

/// The ways a tree operation can fail. Lookups that find nothing return
/// `None` instead; only removal treats a missing item as an error.
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum Error {
    /// The item passed to [`Tree::remove`][crate::Tree::remove] is not in the tree.
    #[error("item not in tree")]
    NotFound,
}

/// `Result` specialized to this crate's [`Error`].
pub type Result<T, E = Error> = std::result::Result<T, E>;
