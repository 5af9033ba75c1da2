//! Thin wrapper around the Giphy search API.

use std::{ops::Deref, sync::Arc};

use async_trait::async_trait;
use rand::seq::IndexedRandom;
use serde::Deserialize;
use tracing::{debug, instrument, warn};

use crate::base::{config::Config, types::Res};

/// Message used when the search comes back empty.
pub const NO_RESULTS_MESSAGE: &str = "no results found";

/// Degraded message used when the search API cannot be reached or parsed.
pub const SEARCH_FAILED_MESSAGE: &str = "gif search failed, try again later";

// Traits.

/// Generic GIF search trait that clients must implement.
#[async_trait]
pub trait GenericGifClient {
    /// Search for GIFs matching the query, returning the result image URLs.
    async fn search(&self, query: &str) -> Res<Vec<String>>;
}

// Structs.

/// GIF search client for the application.
///
/// It is designed to be trivially cloneable, allowing it to be passed around
/// without the need for `Arc` or `Mutex`.
#[derive(Clone)]
pub struct GifClient {
    inner: Arc<dyn GenericGifClient + Send + Sync + 'static>,
}

impl Deref for GifClient {
    type Target = dyn GenericGifClient + Send + Sync + 'static;

    fn deref(&self) -> &Self::Target {
        &*self.inner
    }
}

impl GifClient {
    /// Creates a new Giphy search client.
    pub fn giphy(config: &Config, http: reqwest::Client) -> Self {
        Self {
            inner: Arc::new(GiphyGifClient::new(config, http)),
        }
    }

    /// Creates a GIF search client from any implementation.
    pub fn new(inner: Arc<dyn GenericGifClient + Send + Sync + 'static>) -> Self {
        Self { inner }
    }

    /// Search and format a reply line for the given query.
    ///
    /// One result is chosen uniformly at random. An upstream failure
    /// degrades to a fixed placeholder so the caller can still answer the
    /// end user.
    #[instrument(skip(self))]
    pub async fn search_message(&self, query: &str) -> String {
        let urls = match self.search(query).await {
            Ok(urls) => urls,
            Err(err) => {
                warn!("GIF search failed: {}", err);
                return SEARCH_FAILED_MESSAGE.to_string();
            }
        };

        match urls.choose(&mut rand::rng()) {
            Some(url) => format!("{}: {}", query, url),
            None => NO_RESULTS_MESSAGE.to_string(),
        }
    }
}

// Specific implementations.

/// Giphy search client implementation.
#[derive(Clone)]
struct GiphyGifClient {
    http: reqwest::Client,
    base_url: String,
    api_key: String,
}

/// Response envelope from the Giphy search endpoint.
#[derive(Debug, Deserialize)]
struct GiphyResponse {
    #[serde(default)]
    data: Vec<GiphyGif>,
}

#[derive(Debug, Deserialize)]
struct GiphyGif {
    images: GiphyImages,
}

#[derive(Debug, Deserialize)]
struct GiphyImages {
    original: GiphyImage,
}

#[derive(Debug, Deserialize)]
struct GiphyImage {
    url: String,
}

impl GiphyGifClient {
    fn new(config: &Config, http: reqwest::Client) -> Self {
        Self {
            http,
            base_url: config.giphy_base_url.clone(),
            api_key: config.giphy_api_key.clone(),
        }
    }
}

#[async_trait]
impl GenericGifClient for GiphyGifClient {
    #[instrument(skip(self))]
    async fn search(&self, query: &str) -> Res<Vec<String>> {
        let response = self
            .http
            .get(&self.base_url)
            .query(&[("q", query), ("api_key", self.api_key.as_str())])
            .send()
            .await?;

        let results: GiphyResponse = response.json().await?;

        debug!("Giphy returned {} results for `{}`", results.data.len(), query);

        Ok(results.data.into_iter().map(|gif| gif.images.original.url).collect())
    }
}
