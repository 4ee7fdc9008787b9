//! TMDB v3 API client
//!
//! Thin wrapper over reqwest that knows the base URL and API key. The key travels as the
//! `api_key` query parameter on every request.
//!
//! Endpoints used:
//! - GET /search/movie
//! - GET /discover/movie
//! - GET /trending/movie/week
//! - GET /movie/{id}/watch/providers

use std::time::Duration;

use reqwest::Client as HttpClient;
use serde::de::DeserializeOwned;

use crate::{
    error::{AppError, AppResult},
    models::{MovieId, MovieListResponse, WatchProvidersResponse},
    services::fetcher::DiscoverParams,
};

#[derive(Clone)]
pub struct TmdbClient {
    http_client: HttpClient,
    api_key: String,
    api_url: String,
}

impl std::fmt::Debug for TmdbClient {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("TmdbClient")
            .field("api_url", &self.api_url)
            .finish_non_exhaustive()
    }
}

impl TmdbClient {
    pub fn new(api_key: String, api_url: String, timeout: Duration) -> AppResult<Self> {
        let http_client = HttpClient::builder()
            .timeout(timeout)
            .build()
            .map_err(|e| AppError::Internal(format!("Failed to build HTTP client: {}", e)))?;

        Ok(Self::with_http_client(http_client, api_key, api_url))
    }

    pub fn with_http_client(http_client: HttpClient, api_key: String, api_url: String) -> Self {
        Self {
            http_client,
            api_key,
            api_url: api_url.trim_end_matches('/').to_string(),
        }
    }

    /// GET /search/movie?query=
    pub async fn search_movies(&self, query: &str) -> AppResult<MovieListResponse> {
        self.get_json("/search/movie", &[("query", query.to_string())])
            .await
    }

    /// GET /discover/movie with sort and filter parameters
    pub async fn discover_movies(&self, params: &DiscoverParams) -> AppResult<MovieListResponse> {
        self.get_json("/discover/movie", &params.to_query()).await
    }

    /// GET /trending/movie/week
    pub async fn trending_movies(&self) -> AppResult<MovieListResponse> {
        self.get_json("/trending/movie/week", &[]).await
    }

    /// GET /movie/{id}/watch/providers
    pub async fn watch_providers(&self, movie_id: MovieId) -> AppResult<WatchProvidersResponse> {
        self.get_json(&format!("/movie/{}/watch/providers", movie_id), &[])
            .await
    }

    async fn get_json<T: DeserializeOwned>(
        &self,
        path: &str,
        params: &[(&str, String)],
    ) -> AppResult<T> {
        let url = format!("{}{}", self.api_url, path);

        let response = self
            .http_client
            .get(&url)
            .query(&[("api_key", self.api_key.as_str())])
            .query(params)
            .send()
            .await?;

        if !response.status().is_success() {
            let status = response.status();
            let body = response.text().await.unwrap_or_default();
            tracing::error!(
                path = %path,
                status = %status,
                body = %body,
                "TMDB request failed"
            );
            return Err(AppError::Api {
                status: status.as_u16(),
                message: body,
            });
        }

        let body = response.bytes().await?;
        serde_json::from_slice(&body).map_err(|e| AppError::MalformedPayload(e.to_string()))
    }
}
