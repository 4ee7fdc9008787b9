use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    models::{DisplayCard, MovieRecord},
    services::{
        aggregator::ResultAggregator,
        discovery::{self, SampleSize},
        fetcher::{MovieFetcher, SearchCriteria, SearchQuery},
        presenter::Presenter,
        providers::{ProviderLookup, TmdbProviderLookup},
        tmdb::TmdbClient,
    },
};

/// fetch → (sample) → enrich with providers → present
#[derive(Clone)]
pub struct MovieSearch {
    fetcher: Arc<dyn MovieFetcher>,
    aggregator: ResultAggregator,
    presenter: Presenter,
}

impl MovieSearch {
    pub fn new(
        fetcher: Arc<dyn MovieFetcher>,
        aggregator: ResultAggregator,
        presenter: Presenter,
    ) -> Self {
        Self {
            fetcher,
            aggregator,
            presenter,
        }
    }

    /// Wires the TMDB-backed fetcher and provider lookup from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        let client = TmdbClient::new(
            config.tmdb_api_key.clone(),
            config.tmdb_api_url.clone(),
            config.request_timeout(),
        )?;

        let lookup: Arc<dyn ProviderLookup> = Arc::new(TmdbProviderLookup::new(
            client.clone(),
            config.watch_region.clone(),
            config.logo_base_url.clone(),
        ));

        Ok(Self::new(
            Arc::new(client),
            ResultAggregator::new(lookup, config.lookup_concurrency),
            Presenter::new(
                config.poster_base_url.clone(),
                config.poster_placeholder_url.clone(),
                config.overview_limit,
            ),
        ))
    }

    /// Runs the full pipeline. Only the fetch can fail; provider gaps never do.
    pub async fn run(
        &self,
        criteria: &SearchCriteria,
        sample: Option<SampleSize>,
    ) -> AppResult<Vec<DisplayCard>> {
        let movies = self.fetcher.fetch(criteria).await?;
        let movies = match sample {
            Some(size) => select(movies, size),
            None => movies,
        };

        let enriched = self.aggregator.aggregate(movies).await;
        Ok(self.presenter.present_all(&enriched))
    }

    /// Free-text search; a blank query is a validation error and never reaches the fetcher
    pub async fn search_text(&self, raw: &str) -> AppResult<Vec<DisplayCard>> {
        let query = SearchQuery::parse(raw)?;
        self.run(&SearchCriteria::Search(query), None).await
    }
}

fn select(movies: Vec<MovieRecord>, size: SampleSize) -> Vec<MovieRecord> {
    let mut rng = rand::rng();
    discovery::sample(movies, size, &mut rng)
}
