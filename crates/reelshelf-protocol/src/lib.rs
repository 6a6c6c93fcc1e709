//! Wire types for the movie collection, local validation, and the REST API seam.

mod api;
mod draft;
mod movie;

pub use api::{ApiError, MovieApi};
pub use draft::{MovieDraft, ValidationError};
pub use movie::{Movie, MovieId, NewMovie};
