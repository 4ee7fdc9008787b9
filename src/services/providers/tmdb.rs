//! TMDB watch-providers lookup
//!
//! Reads `results.<region>.flatrate` from GET /movie/{id}/watch/providers. Rent and buy offers
//! are ignored.

use crate::{
    models::{MovieId, Provider, ProviderOutcome, WatchProvidersResponse},
    services::{providers::ProviderLookup, tmdb::TmdbClient},
};

#[derive(Debug, Clone)]
pub struct TmdbProviderLookup {
    client: TmdbClient,
    region: String,
    logo_base_url: String,
}

impl TmdbProviderLookup {
    pub fn new(client: TmdbClient, region: String, logo_base_url: String) -> Self {
        Self {
            client,
            region,
            logo_base_url,
        }
    }

    /// Looks up providers without collapsing failures
    pub async fn outcome(&self, movie_id: MovieId) -> ProviderOutcome {
        match self.client.watch_providers(movie_id).await {
            Ok(response) => self.convert_api_response(response),
            Err(e) => ProviderOutcome::Failed(e.to_string()),
        }
    }

    fn convert_api_response(&self, response: WatchProvidersResponse) -> ProviderOutcome {
        let Some(region) = response.results.get(&self.region) else {
            return ProviderOutcome::Missing;
        };

        match region.flatrate.as_deref() {
            None | Some([]) => ProviderOutcome::Missing,
            Some(entries) => ProviderOutcome::Listed(
                entries
                    .iter()
                    .map(|entry| Provider {
                        name: entry.provider_name.clone(),
                        logo_url: entry
                            .logo_path
                            .as_deref()
                            .filter(|path| !path.is_empty())
                            .map(|path| format!("{}{}", self.logo_base_url, path)),
                    })
                    .collect(),
            ),
        }
    }
}

#[async_trait::async_trait]
impl ProviderLookup for TmdbProviderLookup {
    async fn lookup(&self, movie_id: MovieId) -> Vec<Provider> {
        let outcome = self.outcome(movie_id).await;

        match &outcome {
            ProviderOutcome::Listed(providers) => tracing::debug!(
                movie_id = %movie_id,
                region = %self.region,
                providers = providers.len(),
                "Providers fetched"
            ),
            ProviderOutcome::Missing => tracing::debug!(
                movie_id = %movie_id,
                region = %self.region,
                "No flat-rate providers in region"
            ),
            ProviderOutcome::Failed(error) => tracing::warn!(
                movie_id = %movie_id,
                error = %error,
                "Provider lookup failed, treating as unavailable"
            ),
        }

        outcome.into_providers()
    }

    fn name(&self) -> &'static str {
        "tmdb"
    }
}
