//! Error type for catalog operations.

use reelshelf_protocol::{ApiError, MovieId, ValidationError};
use thiserror::Error;

/// Errors returned by catalog operations.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum OpError {
    /// Draft was rejected locally; nothing was sent.
    #[error("invalid input: {0}")]
    Validation(#[from] ValidationError),
    /// The collection service call failed.
    #[error(transparent)]
    Api(#[from] ApiError),
    /// Id is not in the cache.
    #[error("movie not found: {0}")]
    NotFound(MovieId),
    /// Update requested without an open edit form.
    #[error("no edit in progress")]
    NoEdit,
    /// Delete requested without a confirmed target.
    #[error("delete was not confirmed")]
    NotConfirmed,
}
