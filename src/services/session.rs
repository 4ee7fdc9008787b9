//! Search lifecycle for the widget
//!
//! Tracks the single result view: idle → loading → (results | no_results | error). Each run
//! takes a generation number; only the newest generation may settle the view, so a slow,
//! superseded search can never overwrite a newer one. A run that is dropped before it settles
//! puts the view back to idle instead of leaving it loading.
//!
//! Callers supply the `search_id`; the HTTP layer passes the request's `x-request-id`, so a view
//! can be traced back to the request that produced it.

use std::sync::{Arc, PoisonError, RwLock};

use chrono::{Datelike, Utc};
use serde::Serialize;
use uuid::Uuid;

use crate::{
    error::AppError,
    models::DisplayCard,
    services::{
        discovery::{self, DiscoveryStrategy, SampleSize},
        fetcher::{SearchCriteria, SearchQuery},
        search::MovieSearch,
    },
};

pub const NO_RESULTS_MESSAGE: &str = "No movies found. Try a different search term.";
pub const SEARCH_FAILED_MESSAGE: &str =
    "Failed to fetch movies. Please check your internet connection and try again.";
pub const DISCOVER_FAILED_MESSAGE: &str = "Failed to fetch random movies. Please try again.";
pub const TRENDING_FAILED_MESSAGE: &str = "Failed to fetch trending movies. Please try again.";

/// What the widget currently shows. Exactly one variant at a time.
#[derive(Debug, Clone, Serialize, PartialEq)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum View {
    Idle,
    Loading,
    Results { cards: Vec<DisplayCard> },
    NoResults { message: String },
    Error { message: String },
}

impl View {
    pub fn is_loading(&self) -> bool {
        matches!(self, View::Loading)
    }
}

#[derive(Debug, Clone, Serialize, PartialEq)]
pub struct ViewState {
    /// Incremented by every search start
    pub generation: u64,
    /// Correlation id of the search that produced `view`
    pub search_id: Option<Uuid>,
    #[serde(flatten)]
    pub view: View,
}

impl Default for ViewState {
    fn default() -> Self {
        Self {
            generation: 0,
            search_id: None,
            view: View::Idle,
        }
    }
}

pub struct SearchSession {
    search: MovieSearch,
    state: Arc<RwLock<ViewState>>,
}

impl SearchSession {
    pub fn new(search: MovieSearch) -> Self {
        Self {
            search,
            state: Arc::new(RwLock::new(ViewState::default())),
        }
    }

    pub fn snapshot(&self) -> ViewState {
        self.state
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .clone()
    }

    /// Back to idle. Also supersedes any search still in flight.
    pub fn clear(&self) -> ViewState {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        state.search_id = None;
        state.view = View::Idle;
        state.clone()
    }

    /// Free-text search. Returns `None` without touching the view when the query is blank.
    pub async fn search(&self, raw: &str, search_id: Uuid) -> Option<ViewState> {
        let query = match SearchQuery::parse(raw) {
            Ok(query) => query,
            Err(_) => {
                tracing::debug!("Blank search query ignored");
                return None;
            }
        };

        Some(
            self.run(
                SearchCriteria::Search(query),
                None,
                SEARCH_FAILED_MESSAGE,
                search_id,
            )
            .await,
        )
    }

    pub async fn discover(&self, strategy: DiscoveryStrategy, search_id: Uuid) -> ViewState {
        let plan = {
            let mut rng = rand::rng();
            strategy.plan(&mut rng, Utc::now().year())
        };

        tracing::info!(
            requested = strategy.as_str(),
            strategy = plan.strategy.as_str(),
            "Discovering random movies"
        );

        self.run(
            plan.criteria,
            Some(plan.sample),
            DISCOVER_FAILED_MESSAGE,
            search_id,
        )
        .await
    }

    pub async fn trending(&self, search_id: Uuid) -> ViewState {
        let (criteria, sample) = discovery::trending_plan();
        self.run(criteria, Some(sample), TRENDING_FAILED_MESSAGE, search_id)
            .await
    }

    async fn run(
        &self,
        criteria: SearchCriteria,
        sample: Option<SampleSize>,
        failure_message: &str,
        search_id: Uuid,
    ) -> ViewState {
        let ticket = self.begin(search_id);

        tracing::info!(
            generation = ticket.generation,
            search_id = %ticket.search_id,
            mode = criteria.mode(),
            "Search started"
        );

        let view = match self.search.run(&criteria, sample).await {
            Ok(cards) if cards.is_empty() => View::NoResults {
                message: NO_RESULTS_MESSAGE.to_string(),
            },
            Ok(cards) => View::Results { cards },
            Err(e) => {
                log_failure(&e, ticket.search_id);
                View::Error {
                    message: failure_message.to_string(),
                }
            }
        };

        ticket.settle(view)
    }

    fn begin(&self, search_id: Uuid) -> LoadingTicket {
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        state.generation += 1;
        state.search_id = Some(search_id);
        state.view = View::Loading;

        LoadingTicket {
            state: Arc::clone(&self.state),
            generation: state.generation,
            search_id,
            settled: false,
        }
    }
}

fn log_failure(error: &AppError, search_id: Uuid) {
    tracing::error!(
        search_id = %search_id,
        error = %error,
        upstream = error.is_upstream(),
        "Search failed"
    );
}

/// Claim on the view held by one in-flight search
struct LoadingTicket {
    state: Arc<RwLock<ViewState>>,
    generation: u64,
    search_id: Uuid,
    settled: bool,
}

impl LoadingTicket {
    /// Writes `view` if this search is still the newest.
    ///
    /// A superseded search leaves the shared view alone and gets its own outcome back, tagged
    /// with its own generation and id. Callers tell the two apart by comparing `generation`
    /// against the current snapshot.
    fn settle(mut self, view: View) -> ViewState {
        self.settled = true;
        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);

        if state.generation == self.generation {
            state.view = view;
            return state.clone();
        }

        tracing::debug!(
            generation = self.generation,
            current = state.generation,
            search_id = %self.search_id,
            "Discarding stale search results"
        );

        ViewState {
            generation: self.generation,
            search_id: Some(self.search_id),
            view,
        }
    }
}

impl Drop for LoadingTicket {
    fn drop(&mut self) {
        if self.settled {
            return;
        }

        let mut state = self.state.write().unwrap_or_else(PoisonError::into_inner);
        if state.generation == self.generation && state.view.is_loading() {
            tracing::warn!(search_id = %self.search_id, "Search abandoned before settling");
            state.view = View::Idle;
        }
    }
}
