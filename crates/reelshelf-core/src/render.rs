//! Row model for the list and its HTML fragment form.

use crate::catalog::RowState;
use reelshelf_protocol::{Movie, MovieId};
use std::fmt::Write as _;

/// Shown in place of an empty list, for an empty cache and for a search with
/// no matches alike.
pub const NO_RESULTS_MESSAGE: &str = "No movies found matching your criteria.";

/// Inline message shown when the collection could not be fetched.
pub const LOAD_FAILED_MESSAGE: &str = "Failed to load movies. Is the movie service running?";

/// One displayed record.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RowView {
    pub id: MovieId,
    pub title: String,
    pub year: i32,
    pub genre: String,
    pub state: RowState,
}

impl RowView {
    pub fn from_movie(movie: &Movie, state: RowState) -> Self {
        Self {
            id: movie.id.clone(),
            title: movie.title.clone(),
            year: movie.year,
            genre: movie.genre.clone(),
            state,
        }
    }
}

/// What the list area shows.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListView {
    /// Fetch failed; the message replaces the list.
    Failed(String),
    /// Nothing to show; rendered as [`NO_RESULTS_MESSAGE`].
    Empty,
    /// At least one row.
    Rows(Vec<RowView>),
}

impl ListView {
    pub fn rows(&self) -> &[RowView] {
        match self {
            ListView::Rows(rows) => rows,
            ListView::Failed(_) | ListView::Empty => &[],
        }
    }

    pub fn is_empty(&self) -> bool {
        self.rows().is_empty()
    }
}

/// Row model for `movies`, every row in the displayed state.
pub fn rows(movies: &[&Movie]) -> ListView {
    if movies.is_empty() {
        return ListView::Empty;
    }
    ListView::Rows(
        movies
            .iter()
            .map(|movie| RowView::from_movie(movie, RowState::Displayed))
            .collect(),
    )
}

/// HTML fragment for the list container.
pub fn html(view: &ListView) -> String {
    match view {
        ListView::Failed(message) => {
            format!("<p style=\"color:darkred\">{}</p>", escape_html(message))
        }
        ListView::Empty => format!("<p>{NO_RESULTS_MESSAGE}</p>"),
        ListView::Rows(rows) => {
            let mut out = String::new();
            for row in rows {
                let id = escape_html(&row.id.as_key());
                let _ = write!(
                    out,
                    "<div class=\"movie-item\">\
                     <span><strong>{title}</strong> ({year}) - {genre}</span>\
                     <div>\
                     <button data-action=\"edit\" data-id=\"{id}\">Edit</button>\
                     <button data-action=\"delete\" data-id=\"{id}\">Delete</button>\
                     </div>\
                     </div>",
                    title = escape_html(&row.title),
                    year = row.year,
                    genre = escape_html(&row.genre),
                );
            }
            out
        }
    }
}

/// Escape text for embedding in element content or a quoted attribute.
pub fn escape_html(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for ch in text.chars() {
        match ch {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(ch),
        }
    }
    out
}
