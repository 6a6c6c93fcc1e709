use crate::store::MovieStore;
use async_trait::async_trait;
use parking_lot::Mutex;
use reelshelf_protocol::{ApiError, Movie, MovieApi, MovieId, NewMovie};
use std::collections::VecDeque;

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ApiOp {
    List,
    Create,
    Update,
    Delete,
}

/// One recorded call against [`InMemoryMovieApi`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ApiCall {
    List,
    Create(NewMovie),
    Update(Movie),
    Delete(MovieId),
}

impl ApiCall {
    pub fn op(&self) -> ApiOp {
        match self {
            ApiCall::List => ApiOp::List,
            ApiCall::Create(_) => ApiOp::Create,
            ApiCall::Update(_) => ApiOp::Update,
            ApiCall::Delete(_) => ApiOp::Delete,
        }
    }
}

/// Recording fake of the collection service with scripted failures.
#[derive(Debug, Default)]
pub struct InMemoryMovieApi {
    store: Mutex<MovieStore>,
    calls: Mutex<Vec<ApiCall>>,
    failures: Mutex<VecDeque<(ApiOp, ApiError)>>,
    offline: Mutex<bool>,
}

impl InMemoryMovieApi {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_movies(movies: Vec<Movie>) -> Self {
        Self {
            store: Mutex::new(MovieStore::new(movies)),
            ..Self::default()
        }
    }

    /// Fail the next call of `op` with `err`; queued per call.
    pub fn fail_next(&self, op: ApiOp, err: ApiError) {
        self.failures.lock().push_back((op, err));
    }

    /// Every call fails with a network error while offline.
    pub fn set_offline(&self, offline: bool) {
        *self.offline.lock() = offline;
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.store.lock().list()
    }

    pub fn calls(&self) -> Vec<ApiCall> {
        self.calls.lock().clone()
    }

    pub fn call_count(&self, op: ApiOp) -> usize {
        self.calls.lock().iter().filter(|call| call.op() == op).count()
    }

    pub fn clear_calls(&self) {
        self.calls.lock().clear();
    }

    fn record(&self, call: ApiCall) -> Result<(), ApiError> {
        let op = call.op();
        self.calls.lock().push(call);
        if *self.offline.lock() {
            return Err(ApiError::Network("connection refused".to_string()));
        }
        let mut failures = self.failures.lock();
        if let Some(idx) = failures.iter().position(|(failing, _)| *failing == op) {
            if let Some((_, err)) = failures.remove(idx) {
                return Err(err);
            }
        }
        Ok(())
    }
}

#[async_trait]
impl MovieApi for InMemoryMovieApi {
    async fn list(&self) -> Result<Vec<Movie>, ApiError> {
        self.record(ApiCall::List)?;
        Ok(self.store.lock().list())
    }

    async fn create(&self, movie: &NewMovie) -> Result<Movie, ApiError> {
        self.record(ApiCall::Create(movie.clone()))?;
        self.store.lock().create(movie.clone())
    }

    async fn update(&self, movie: &Movie) -> Result<Movie, ApiError> {
        self.record(ApiCall::Update(movie.clone()))?;
        self.store.lock().update(movie.clone())
    }

    async fn delete(&self, id: &MovieId) -> Result<(), ApiError> {
        self.record(ApiCall::Delete(id.clone()))?;
        self.store.lock().delete(id)
    }
}
