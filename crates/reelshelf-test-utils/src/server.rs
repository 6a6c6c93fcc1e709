//! Minimal REST server standing in for the collection service.

use crate::store::MovieStore;
use axum::extract::{Path, State};
use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::routing::get;
use axum::{Json, Router};
use parking_lot::Mutex;
use reelshelf_protocol::{ApiError, Movie, MovieId, NewMovie};
use serde_json::json;
use std::sync::Arc;
use tokio::net::TcpListener;
use tokio::task::JoinHandle;

type SharedStore = Arc<Mutex<MovieStore>>;

/// Running server; aborted on drop.
pub struct MovieServer {
    pub base_url: String,
    store: SharedStore,
    handle: JoinHandle<()>,
}

impl MovieServer {
    pub fn collection_url(&self) -> String {
        format!("{}/movies", self.base_url)
    }

    pub fn movies(&self) -> Vec<Movie> {
        self.store.lock().list()
    }
}

impl Drop for MovieServer {
    fn drop(&mut self) {
        self.handle.abort();
    }
}

/// Serve `/movies` on an ephemeral localhost port.
pub async fn spawn_movie_server(movies: Vec<Movie>) -> MovieServer {
    let store: SharedStore = Arc::new(Mutex::new(MovieStore::new(movies)));
    let app = Router::new()
        .route("/movies", get(list_movies).post(create_movie))
        .route("/movies/{id}", axum::routing::put(update_movie).delete(delete_movie))
        .with_state(store.clone());

    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    MovieServer {
        base_url: format!("http://{addr}"),
        store,
        handle,
    }
}

/// Serve a fixed `GET /movies` body, for payloads the typed server cannot produce.
pub async fn spawn_raw_list_server(body: serde_json::Value) -> MovieServer {
    let app = Router::new().route("/movies", get(move || async move { Json(body) }));
    let listener = TcpListener::bind("127.0.0.1:0").await.expect("bind");
    let addr = listener.local_addr().expect("local addr");
    let handle = tokio::spawn(async move {
        axum::serve(listener, app).await.expect("serve");
    });
    MovieServer {
        base_url: format!("http://{addr}"),
        store: Arc::new(Mutex::new(MovieStore::new(Vec::new()))),
        handle,
    }
}

async fn list_movies(State(store): State<SharedStore>) -> Json<Vec<Movie>> {
    Json(store.lock().list())
}

async fn create_movie(
    State(store): State<SharedStore>,
    Json(movie): Json<NewMovie>,
) -> Result<(StatusCode, Json<Movie>), ApiFailure> {
    let created = store.lock().create(movie)?;
    Ok((StatusCode::CREATED, Json(created)))
}

async fn update_movie(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
    Json(mut movie): Json<Movie>,
) -> Result<Json<Movie>, ApiFailure> {
    movie.id = id.parse::<MovieId>().unwrap_or(MovieId::Text(id));
    Ok(Json(store.lock().update(movie)?))
}

async fn delete_movie(
    State(store): State<SharedStore>,
    Path(id): Path<String>,
) -> Result<Json<serde_json::Value>, ApiFailure> {
    let id = id.parse::<MovieId>().unwrap_or(MovieId::Text(id));
    store.lock().delete(&id)?;
    Ok(Json(json!({})))
}

struct ApiFailure(ApiError);

impl From<ApiError> for ApiFailure {
    fn from(err: ApiError) -> Self {
        Self(err)
    }
}

impl IntoResponse for ApiFailure {
    fn into_response(self) -> Response {
        match self.0 {
            ApiError::Status { status, body } => (
                StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR),
                body,
            )
                .into_response(),
            other => (StatusCode::INTERNAL_SERVER_ERROR, other.to_string()).into_response(),
        }
    }
}
