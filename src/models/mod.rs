use serde::{Deserialize, Serialize};
use std::{collections::HashMap, fmt::Display};

pub mod card;

pub use card::{DisplayCard, ProviderBadge, ProviderBadges};

/// TMDB numeric movie identifier
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct MovieId(pub u64);

impl Display for MovieId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// A movie as returned by the search, discover and trending endpoints
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct MovieRecord {
    pub id: MovieId,
    pub title: String,
    #[serde(default)]
    pub overview: Option<String>,
    #[serde(default)]
    pub poster_path: Option<String>,
    /// "YYYY-MM-DD"; TMDB sends an empty string for unknown dates
    #[serde(default)]
    pub release_date: Option<String>,
    #[serde(default)]
    pub vote_average: Option<f64>,
}

/// A flat-rate streaming service carrying a title in the configured region
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Provider {
    pub name: String,
    /// Absolute logo URL (CDN prefix already applied); `None` when TMDB has no logo
    pub logo_url: Option<String>,
}

/// Result of looking up a single movie's providers.
///
/// Only ever observed inside the lookup; callers receive the collapsed list.
#[derive(Debug, Clone, PartialEq)]
pub enum ProviderOutcome {
    Listed(Vec<Provider>),
    /// Region or flat-rate offers absent from the response
    Missing,
    Failed(String),
}

impl ProviderOutcome {
    pub fn into_providers(self) -> Vec<Provider> {
        match self {
            ProviderOutcome::Listed(providers) => providers,
            ProviderOutcome::Missing | ProviderOutcome::Failed(_) => Vec::new(),
        }
    }
}

/// A movie paired with its provider list. One per input record, in input order.
#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct EnrichedMovie {
    pub movie: MovieRecord,
    pub providers: Vec<Provider>,
}

// ============================================================================
// TMDB API Types
// ============================================================================

/// Envelope shared by /search/movie, /discover/movie and /trending/movie/week
#[derive(Debug, Clone, Deserialize)]
pub struct MovieListResponse {
    #[serde(default)]
    pub results: Vec<MovieRecord>,
}

/// GET /movie/{id}/watch/providers
#[derive(Debug, Clone, Deserialize)]
pub struct WatchProvidersResponse {
    #[serde(default)]
    pub results: HashMap<String, RegionProviders>,
}

/// Offers for one country. Only `flatrate` is read; rent and buy are ignored.
#[derive(Debug, Clone, Deserialize)]
pub struct RegionProviders {
    #[serde(default)]
    pub flatrate: Option<Vec<ProviderEntry>>,
}

#[derive(Debug, Clone, Deserialize)]
pub struct ProviderEntry {
    pub provider_name: String,
    #[serde(default)]
    pub logo_path: Option<String>,
}
