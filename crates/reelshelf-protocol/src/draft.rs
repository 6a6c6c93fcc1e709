//! Local validation of user-entered movie fields.

use crate::movie::{Movie, MovieId, NewMovie};

/// Reasons a draft is rejected before any network call.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum ValidationError {
    #[error("title cannot be empty")]
    EmptyTitle,
    #[error("year must be a whole number (got {0:?})")]
    InvalidYear(String),
}

/// Validated movie fields, not yet bound to an id.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct MovieDraft {
    pub title: String,
    pub year: i32,
    pub genre: String,
}

impl MovieDraft {
    /// Validate raw field text.
    ///
    /// Title and genre are trimmed. The year must parse as an integer; its
    /// range is not checked.
    pub fn parse(title: &str, year: &str, genre: &str) -> Result<Self, ValidationError> {
        let title = title.trim();
        if title.is_empty() {
            return Err(ValidationError::EmptyTitle);
        }
        let year_text = year.trim();
        let year = year_text
            .parse::<i32>()
            .map_err(|_| ValidationError::InvalidYear(year_text.to_string()))?;
        Ok(Self {
            title: title.to_string(),
            year,
            genre: genre.trim().to_string(),
        })
    }

    /// Build a create request body.
    pub fn into_new(self, id: Option<MovieId>) -> NewMovie {
        NewMovie {
            id,
            title: self.title,
            genre: self.genre,
            year: self.year,
        }
    }

    /// Build a full replacement record for an existing id.
    pub fn into_movie(self, id: MovieId) -> Movie {
        Movie {
            id,
            title: self.title,
            genre: self.genre,
            year: self.year,
        }
    }
}
