//! TUI event types for input and request completions.

use crossterm::event::KeyEvent;
use reelshelf_protocol::{ApiError, Movie, MovieId, NewMovie};

/// Application event emitted by the input poller, the ticker or a request task.
#[derive(Debug)]
pub enum AppEvent {
    /// Keyboard input event.
    Input(KeyEvent),
    /// Periodic tick event.
    Tick,
    /// A list request finished.
    Fetched(Result<Vec<Movie>, ApiError>),
    /// A create request finished.
    Created(Result<Movie, ApiError>),
    /// An update request for the id finished.
    Updated(MovieId, Result<Movie, ApiError>),
    /// A delete request for the id finished.
    Deleted(MovieId, Result<(), ApiError>),
}

/// Work the event loop must start on behalf of the app.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    Quit,
    Reload,
    Create(NewMovie),
    Update(Movie),
    Delete(MovieId),
}
