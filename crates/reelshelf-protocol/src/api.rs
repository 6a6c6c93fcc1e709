//! Client interface for the remote movie collection.

use crate::movie::{Movie, MovieId, NewMovie};
use async_trait::async_trait;

/// Errors returned by movie collection calls.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ApiError {
    /// Transport failed before a response was received.
    #[error("network error: {0}")]
    Network(String),
    /// Service answered with a non-success status.
    #[error("HTTP {status}: {body}")]
    Status { status: u16, body: String },
    /// Response body could not be decoded.
    #[error("decode error: {0}")]
    Decode(String),
    /// Endpoint URL could not be built.
    #[error("invalid url: {0}")]
    InvalidUrl(String),
}

impl ApiError {
    /// Whether the service reported the record as missing.
    pub fn is_not_found(&self) -> bool {
        matches!(self, ApiError::Status { status: 404, .. })
    }
}

/// REST collection operations against `/movies`.
#[async_trait]
pub trait MovieApi: Send + Sync {
    /// `GET /movies`: the full collection.
    async fn list(&self) -> Result<Vec<Movie>, ApiError>;

    /// `POST /movies`: create a record and return what the service stored.
    async fn create(&self, movie: &NewMovie) -> Result<Movie, ApiError>;

    /// `PUT /movies/:id`: replace every field of an existing record.
    async fn update(&self, movie: &Movie) -> Result<Movie, ApiError>;

    /// `DELETE /movies/:id`.
    async fn delete(&self, id: &MovieId) -> Result<(), ApiError>;
}
