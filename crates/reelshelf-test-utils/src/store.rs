use reelshelf_protocol::{ApiError, Movie, MovieId, NewMovie};

/// Collection semantics of the backing service, without any transport.
#[derive(Debug, Clone, Default)]
pub struct MovieStore {
    movies: Vec<Movie>,
    next_id: u64,
}

impl MovieStore {
    pub fn new(movies: Vec<Movie>) -> Self {
        Self { movies, next_id: 1 }
    }

    pub fn list(&self) -> Vec<Movie> {
        self.movies.clone()
    }

    pub fn create(&mut self, movie: NewMovie) -> Result<Movie, ApiError> {
        let id = match movie.id {
            Some(id) => id,
            None => self.assign_id(),
        };
        if self.movies.iter().any(|existing| existing.id == id) {
            return Err(ApiError::Status {
                status: 500,
                body: format!("Insert failed, duplicate id {id}"),
            });
        }
        let stored = Movie {
            id,
            title: movie.title,
            genre: movie.genre,
            year: movie.year,
        };
        self.movies.push(stored.clone());
        Ok(stored)
    }

    pub fn update(&mut self, movie: Movie) -> Result<Movie, ApiError> {
        let Some(slot) = self.movies.iter_mut().find(|existing| existing.id == movie.id) else {
            return Err(not_found(&movie.id));
        };
        *slot = movie.clone();
        Ok(movie)
    }

    pub fn delete(&mut self, id: &MovieId) -> Result<(), ApiError> {
        let before = self.movies.len();
        self.movies.retain(|existing| &existing.id != id);
        if self.movies.len() == before {
            return Err(not_found(id));
        }
        Ok(())
    }

    fn assign_id(&mut self) -> MovieId {
        loop {
            let id = MovieId::Text(format!("srv-{}", self.next_id.max(1)));
            self.next_id = self.next_id.max(1) + 1;
            if !self.movies.iter().any(|existing| existing.id == id) {
                return id;
            }
        }
    }
}

fn not_found(id: &MovieId) -> ApiError {
    ApiError::Status {
        status: 404,
        body: format!("movie {id} not found"),
    }
}
