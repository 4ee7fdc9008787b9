use std::sync::Arc;

use crate::{
    config::Config,
    error::AppResult,
    services::{search::MovieSearch, session::SearchSession},
};

/// Shared application state
#[derive(Clone)]
pub struct AppState {
    /// Stateless pipeline for one-off card requests
    pub search: Arc<MovieSearch>,
    /// The widget's result view
    pub session: Arc<SearchSession>,
}

impl AppState {
    pub fn new(search: MovieSearch) -> Self {
        Self {
            search: Arc::new(search.clone()),
            session: Arc::new(SearchSession::new(search)),
        }
    }

    /// Builds the TMDB-backed state from configuration
    pub fn from_config(config: &Config) -> AppResult<Self> {
        Ok(Self::new(MovieSearch::from_config(config)?))
    }
}
