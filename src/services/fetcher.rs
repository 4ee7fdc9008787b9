use crate::{
    error::{AppError, AppResult},
    models::MovieRecord,
    services::tmdb::TmdbClient,
};

/// A non-blank, trimmed free-text title query
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchQuery(String);

impl SearchQuery {
    pub fn parse(raw: &str) -> AppResult<Self> {
        let trimmed = raw.trim();
        if trimmed.is_empty() {
            return Err(AppError::Validation(
                "Search query cannot be empty".to_string(),
            ));
        }
        Ok(Self(trimmed.to_string()))
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

/// Sort and filter parameters for /discover/movie
#[derive(Debug, Clone, PartialEq)]
pub struct DiscoverParams {
    pub page: u32,
    pub sort_by: String,
    pub min_vote_count: u32,
    pub min_vote_average: Option<f64>,
    pub genre: Option<u32>,
    pub year: Option<i32>,
}

impl DiscoverParams {
    pub(crate) fn to_query(&self) -> Vec<(&'static str, String)> {
        let mut query = vec![
            ("page", self.page.to_string()),
            ("sort_by", self.sort_by.clone()),
            ("vote_count.gte", self.min_vote_count.to_string()),
        ];
        if let Some(average) = self.min_vote_average {
            query.push(("vote_average.gte", average.to_string()));
        }
        if let Some(genre) = self.genre {
            query.push(("with_genres", genre.to_string()));
        }
        if let Some(year) = self.year {
            query.push(("primary_release_year", year.to_string()));
        }
        query
    }
}

/// What to ask the catalogue for
#[derive(Debug, Clone, PartialEq)]
pub enum SearchCriteria {
    Search(SearchQuery),
    Discover(DiscoverParams),
    Trending,
}

impl SearchCriteria {
    pub fn mode(&self) -> &'static str {
        match self {
            SearchCriteria::Search(_) => "search",
            SearchCriteria::Discover(_) => "discover",
            SearchCriteria::Trending => "trending",
        }
    }
}

/// Source of raw movie lists
///
/// Returns records exactly as the remote API supplied them (no filtering, possibly empty).
/// Transport and upstream failures propagate to the caller.
#[cfg_attr(test, mockall::automock)]
#[async_trait::async_trait]
pub trait MovieFetcher: Send + Sync {
    async fn fetch(&self, criteria: &SearchCriteria) -> AppResult<Vec<MovieRecord>>;
}

#[async_trait::async_trait]
impl MovieFetcher for TmdbClient {
    async fn fetch(&self, criteria: &SearchCriteria) -> AppResult<Vec<MovieRecord>> {
        let response = match criteria {
            SearchCriteria::Search(query) => self.search_movies(query.as_str()).await?,
            SearchCriteria::Discover(params) => self.discover_movies(params).await?,
            SearchCriteria::Trending => self.trending_movies().await?,
        };

        tracing::info!(
            mode = criteria.mode(),
            results = response.results.len(),
            "Movie fetch completed"
        );

        Ok(response.results)
    }
}
