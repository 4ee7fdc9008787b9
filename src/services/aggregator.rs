use std::sync::Arc;

use tokio::sync::Semaphore;

use crate::{
    models::{EnrichedMovie, MovieRecord},
    services::providers::ProviderLookup,
};

/// Fans provider lookups out over a result set and fans them back in by index.
///
/// At most `max_concurrency` lookups are in flight at once. Every lookup is awaited before
/// returning; output order and length always match the input.
#[derive(Clone)]
pub struct ResultAggregator {
    lookup: Arc<dyn ProviderLookup>,
    max_concurrency: usize,
}

impl ResultAggregator {
    pub fn new(lookup: Arc<dyn ProviderLookup>, max_concurrency: usize) -> Self {
        Self {
            lookup,
            max_concurrency: max_concurrency.max(1),
        }
    }

    pub fn max_concurrency(&self) -> usize {
        self.max_concurrency
    }

    pub async fn aggregate(&self, movies: Vec<MovieRecord>) -> Vec<EnrichedMovie> {
        tracing::debug!(
            movie_count = movies.len(),
            max_concurrency = self.max_concurrency,
            provider = self.lookup.name(),
            "Fetching providers batch"
        );

        let permits = Arc::new(Semaphore::new(self.max_concurrency));
        let mut tasks = Vec::with_capacity(movies.len());

        for movie in &movies {
            let lookup = Arc::clone(&self.lookup);
            let permits = Arc::clone(&permits);
            let movie_id = movie.id;
            let task = tokio::spawn(async move {
                // Semaphore is never closed, so the permit is always granted
                let _permit = permits.acquire_owned().await.ok();
                lookup.lookup(movie_id).await
            });
            tasks.push(task);
        }

        let mut enriched = Vec::with_capacity(movies.len());
        let mut failures = 0usize;

        for (movie, task) in movies.into_iter().zip(tasks) {
            let providers = match task.await {
                Ok(providers) => providers,
                Err(e) => {
                    tracing::error!(movie_id = %movie.id, error = %e, "Provider task join error");
                    failures += 1;
                    Vec::new()
                }
            };
            enriched.push(EnrichedMovie { movie, providers });
        }

        if failures > 0 {
            tracing::warn!(
                success_count = enriched.len() - failures,
                error_count = failures,
                "Partial provider fetch failure"
            );
        }

        enriched
    }
}
