use axum::{
    extract::{Query, State},
    http::StatusCode,
    response::{IntoResponse, Response},
    Extension, Json,
};
use serde::Deserialize;
use serde_json::{json, Value};

use crate::{
    error::AppResult,
    middleware::request_id::RequestId,
    models::DisplayCard,
    services::{discovery::DiscoveryStrategy, session::ViewState},
};

use super::AppState;

// Request types

#[derive(Debug, Deserialize)]
pub struct SearchRequest {
    pub query: String,
}

#[derive(Debug, Deserialize)]
pub struct DiscoverRequest {
    #[serde(default = "default_strategy")]
    pub strategy: DiscoveryStrategy,
}

fn default_strategy() -> DiscoveryStrategy {
    DiscoveryStrategy::Popular
}

#[derive(Debug, Deserialize)]
pub struct CardsQuery {
    #[serde(default)]
    pub q: String,
}

// Handlers

/// Health check endpoint
pub async fn health_check() -> (StatusCode, Json<Value>) {
    (StatusCode::OK, Json(json!({ "status": "healthy" })))
}

/// Current widget view
pub async fn get_view(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.session.snapshot())
}

/// Reset the widget view to idle
pub async fn clear_view(State(state): State<AppState>) -> Json<ViewState> {
    Json(state.session.clear())
}

/// Free-text search; a blank query leaves the view untouched and returns 204
pub async fn search(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<SearchRequest>,
) -> Response {
    match state.session.search(&request.query, request_id.0).await {
        Some(view) => {
            tracing::info!(
                request_id = %request_id,
                generation = view.generation,
                "Search settled"
            );
            Json(view).into_response()
        }
        None => StatusCode::NO_CONTENT.into_response(),
    }
}

/// Random discovery by popularity, genre, year, or a random pick of those
pub async fn discover(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
    Json(request): Json<DiscoverRequest>,
) -> Json<ViewState> {
    tracing::info!(
        request_id = %request_id,
        strategy = request.strategy.as_str(),
        "Processing discover request"
    );
    Json(state.session.discover(request.strategy, request_id.0).await)
}

/// Shuffled sample of this week's trending movies
pub async fn trending(
    State(state): State<AppState>,
    Extension(request_id): Extension<RequestId>,
) -> Json<ViewState> {
    Json(state.session.trending(request_id.0).await)
}

/// Ordered card list for a query, without touching the widget view
pub async fn cards(
    State(state): State<AppState>,
    Query(params): Query<CardsQuery>,
) -> AppResult<Json<Vec<DisplayCard>>> {
    let cards = state.search.search_text(&params.q).await?;
    Ok(Json(cards))
}
