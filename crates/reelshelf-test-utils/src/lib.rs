//! Test helpers shared across reelshelf crates.

pub mod api;
pub mod server;
pub mod store;

pub use api::{ApiCall, ApiOp, InMemoryMovieApi};
pub use server::{MovieServer, spawn_movie_server, spawn_raw_list_server};
pub use store::MovieStore;

use reelshelf_protocol::{Movie, MovieId};

pub fn movie(id: u64, title: &str, year: i32, genre: &str) -> Movie {
    Movie {
        id: MovieId::Number(id),
        title: title.to_string(),
        genre: genre.to_string(),
        year,
    }
}

/// The two-record cache used by the filtering scenarios.
pub fn dune_pair() -> Vec<Movie> {
    vec![
        movie(1, "Dune", 1984, "Sci-Fi"),
        movie(2, "Duna", 2021, "Sci-Fi"),
    ]
}
