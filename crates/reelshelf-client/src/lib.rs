//! HTTP client for the movie collection service.
//!
//! Implements [`MovieApi`] over plain REST calls against a single collection
//! endpoint (`{base_url}/{collection}`), JSON bodies in both directions.
//!
//! ```ignore
//! let config = ReelshelfConfig::default();
//! let api = HttpMovieApi::from_config(&config)?;
//! let movies = api.list().await?;
//! ```

use async_trait::async_trait;
use log::{debug, info, warn};
use reelshelf_config::ReelshelfConfig;
use reelshelf_protocol::{ApiError, Movie, MovieApi, MovieId, NewMovie};
use reqwest::{Client, RequestBuilder, Response, Url};
use serde::de::DeserializeOwned;
use serde_json::Value;
use std::time::Duration;

/// reqwest-backed [`MovieApi`].
#[derive(Debug, Clone)]
pub struct HttpMovieApi {
    http: Client,
    collection_url: Url,
}

impl HttpMovieApi {
    /// Create a client for an explicit collection URL, e.g.
    /// `http://localhost:3000/movies`.
    pub fn new(collection_url: &str, timeout: Option<Duration>) -> Result<Self, ApiError> {
        let collection_url = Url::parse(collection_url.trim_end_matches('/'))
            .map_err(|err| ApiError::InvalidUrl(format!("{collection_url}: {err}")))?;
        if collection_url.cannot_be_a_base() {
            return Err(ApiError::InvalidUrl(collection_url.to_string()));
        }
        let mut builder = Client::builder();
        if let Some(timeout) = timeout {
            builder = builder.timeout(timeout);
        }
        let http = builder
            .build()
            .map_err(|err| ApiError::Network(format!("failed to create HTTP client: {err}")))?;
        debug!("movie client created (url={})", collection_url);
        Ok(Self {
            http,
            collection_url,
        })
    }

    /// Create a client from the `api` config block.
    pub fn from_config(config: &ReelshelfConfig) -> Result<Self, ApiError> {
        Self::new(
            &config.collection_url(),
            config.api.timeout_secs.map(Duration::from_secs),
        )
    }

    /// Collection endpoint this client talks to.
    pub fn collection_url(&self) -> &str {
        self.collection_url.as_str()
    }

    /// URL for a single record: `{collection}/{id}`, id percent-encoded.
    fn item_url(&self, id: &MovieId) -> Result<Url, ApiError> {
        let mut url = self.collection_url.clone();
        url.path_segments_mut()
            .map_err(|_| ApiError::InvalidUrl(self.collection_url.to_string()))?
            .pop_if_empty()
            .push(&id.as_key());
        Ok(url)
    }

    async fn send(request: RequestBuilder) -> Result<Response, ApiError> {
        let response = request
            .send()
            .await
            .map_err(|err| ApiError::Network(err.to_string()))?;
        let status = response.status();
        if status.is_success() {
            return Ok(response);
        }
        let body = response.text().await.unwrap_or_default();
        warn!("movie service returned error status (status={})", status);
        Err(ApiError::Status {
            status: status.as_u16(),
            body,
        })
    }

    /// Decode a JSON success body.
    async fn parse<R: DeserializeOwned>(response: Response) -> Result<R, ApiError> {
        response
            .json::<R>()
            .await
            .map_err(|err| ApiError::Decode(err.to_string()))
    }
}

#[async_trait]
impl MovieApi for HttpMovieApi {
    async fn list(&self) -> Result<Vec<Movie>, ApiError> {
        info!("GET {}", self.collection_url);
        let response = Self::send(self.http.get(self.collection_url.clone())).await?;
        let records: Vec<Value> = Self::parse(response).await?;
        let total = records.len();
        let movies: Vec<Movie> = records
            .into_iter()
            .enumerate()
            .filter_map(|(index, record)| match serde_json::from_value(record) {
                Ok(movie) => Some(movie),
                Err(err) => {
                    warn!("skipping malformed movie record (index={index}, error={err})");
                    None
                }
            })
            .collect();
        debug!("fetched movies (count={}, skipped={})", movies.len(), total - movies.len());
        Ok(movies)
    }

    async fn create(&self, movie: &NewMovie) -> Result<Movie, ApiError> {
        info!("POST {}", self.collection_url);
        let request = self.http.post(self.collection_url.clone()).json(movie);
        Self::parse(Self::send(request).await?).await
    }

    async fn update(&self, movie: &Movie) -> Result<Movie, ApiError> {
        let url = self.item_url(&movie.id)?;
        info!("PUT {}", url);
        Self::parse(Self::send(self.http.put(url).json(movie)).await?).await
    }

    async fn delete(&self, id: &MovieId) -> Result<(), ApiError> {
        let url = self.item_url(id)?;
        info!("DELETE {}", url);
        Self::send(self.http.delete(url)).await?;
        Ok(())
    }
}
