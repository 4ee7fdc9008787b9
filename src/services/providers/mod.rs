//! Streaming provider lookup
//!
//! Resolves which subscription services carry a movie in one fixed region. The lookup is a
//! total function: every failure collapses to an empty list so one movie's missing data can
//! never abort enrichment of the rest of a batch.

use crate::models::{MovieId, Provider};

pub mod tmdb;

pub use tmdb::TmdbProviderLookup;

#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait ProviderLookup: Send + Sync {
    /// Flat-rate providers for `movie_id`; empty when none are known or the lookup failed
    async fn lookup(&self, movie_id: MovieId) -> Vec<Provider>;

    /// Provider name for logging and debugging
    fn name(&self) -> &'static str;
}
