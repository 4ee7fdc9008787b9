use axum::{
    body::Body,
    http::{Request, StatusCode},
    Router,
};
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;
use wiremock::matchers::{method, path, path_regex, query_param};
use wiremock::{Mock, MockServer, ResponseTemplate};

use reelscout::{
    api::{create_router, AppState},
    config::Config,
};

fn test_config(tmdb_url: &str) -> Config {
    Config::from_vars(vec![
        ("TMDB_API_KEY".to_string(), "test_key".to_string()),
        ("TMDB_API_URL".to_string(), tmdb_url.to_string()),
        ("REQUEST_TIMEOUT_SECS".to_string(), "2".to_string()),
        ("LOOKUP_CONCURRENCY".to_string(), "3".to_string()),
    ])
    .unwrap()
}

fn create_test_app(tmdb_url: &str) -> Router {
    let state = AppState::from_config(&test_config(tmdb_url)).unwrap();
    create_router(state)
}

async fn body_json(response: axum::response::Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}

fn post_json(uri: &str, body: Value) -> Request<Body> {
    Request::post(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn mount_inception_search(server: &MockServer) {
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .and(query_param("api_key", "test_key"))
        .and(query_param("query", "Inception"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "page": 1,
            "results": [
                {
                    "id": 27205,
                    "title": "Inception",
                    "overview": "Cobb, a skilled thief who commits corporate espionage by infiltrating the subconscious of his targets is offered a chance to regain his old life.",
                    "poster_path": "/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg",
                    "release_date": "2010-07-15",
                    "vote_average": 8.369
                },
                {
                    "id": 64956,
                    "title": "Inception: The Cobol Job",
                    "overview": "",
                    "poster_path": null,
                    "release_date": "",
                    "vote_average": 0
                },
                {
                    "id": 613092,
                    "title": "Inception: Jump Right Into the Action",
                    "poster_path": "/jump.jpg",
                    "release_date": "2010-12-07",
                    "vote_average": 6.1
                }
            ]
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/27205/watch/providers"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({
            "id": 27205,
            "results": {
                "IN": {
                    "flatrate": [
                        {"provider_name": "Netflix", "logo_path": "/netflix.jpg"},
                        {"provider_name": "JioHotstar", "logo_path": null}
                    ]
                }
            }
        })))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/64956/watch/providers"))
        .respond_with(ResponseTemplate::new(500).set_body_string("upstream exploded"))
        .mount(server)
        .await;

    Mock::given(method("GET"))
        .and(path("/movie/613092/watch/providers"))
        .respond_with(
            ResponseTemplate::new(200)
                .set_delay(std::time::Duration::from_millis(50))
                .set_body_json(json!({"results": {"US": {"flatrate": []}}})),
        )
        .mount(server)
        .await;
}

#[tokio::test]
async fn test_health_check() {
    let server = MockServer::start().await;
    let app = create_test_app(&server.uri());

    let response = app
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(body_json(response).await["status"], "healthy");
}

#[tokio::test]
async fn test_request_id_echoed() {
    let server = MockServer::start().await;
    let app = create_test_app(&server.uri());
    let request_id = "8f6f2f4e-3c3a-4a4b-9b43-2b1f0f6c2a11";

    let response = app
        .oneshot(
            Request::get("/health")
                .header("x-request-id", request_id)
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.headers()["x-request-id"], request_id);
}

#[tokio::test]
async fn test_initial_view_is_idle() {
    let server = MockServer::start().await;
    let app = create_test_app(&server.uri());

    let response = app
        .oneshot(Request::get("/api/v1/view").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["status"], "idle");
    assert_eq!(view["generation"], 0);
}

#[tokio::test]
async fn test_search_end_to_end() {
    let server = MockServer::start().await;
    mount_inception_search(&server).await;
    let app = create_test_app(&server.uri());

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/search", json!({"query": "  Inception "})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["status"], "results");
    assert_eq!(view["generation"], 1);

    let cards = view["cards"].as_array().unwrap();
    assert_eq!(cards.len(), 3);

    // Order follows the search results, not provider completion
    assert_eq!(cards[0]["title"], "Inception");
    assert_eq!(cards[1]["title"], "Inception: The Cobol Job");
    assert_eq!(cards[2]["title"], "Inception: Jump Right Into the Action");

    assert_eq!(
        cards[0]["poster_url"],
        "https://image.tmdb.org/t/p/w500/oYuLEt3zVCKq57qu2F8dT7NIa6f.jpg"
    );
    assert_eq!(cards[0]["year"], "2010");
    assert_eq!(cards[0]["rating_text"], "8.4");
    assert_eq!(
        cards[0]["overview_text"].as_str().unwrap().chars().count(),
        63
    );
    assert_eq!(cards[0]["provider_badges"]["kind"], "logos");
    assert_eq!(
        cards[0]["provider_badges"]["badges"][0]["logo_url"],
        "https://image.tmdb.org/t/p/w45/netflix.jpg"
    );
    // A provider without a logo keeps its name and gets no broken image URL
    let hotstar = &cards[0]["provider_badges"]["badges"][1];
    assert_eq!(hotstar["name"], "JioHotstar");
    assert!(hotstar.get("logo_url").is_none());

    // Failed provider lookup degrades to the placeholder, not an error
    assert_eq!(
        cards[1]["poster_url"],
        "https://via.placeholder.com/300x450?text=No+Image"
    );
    assert_eq!(cards[1]["year"], "N/A");
    assert_eq!(cards[1]["rating_text"], "N/A");
    assert_eq!(cards[1]["overview_text"], "No description available");
    assert_eq!(cards[1]["provider_badges"]["kind"], "unavailable");

    // Providers only in another region count as unavailable
    assert_eq!(cards[2]["provider_badges"]["kind"], "unavailable");

    let response = app
        .oneshot(Request::get("/api/v1/view").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let snapshot = body_json(response).await;
    assert_eq!(snapshot["status"], "results");
    assert_eq!(snapshot["search_id"], view["search_id"]);
}

#[tokio::test]
async fn test_search_view_carries_request_id() {
    let server = MockServer::start().await;
    mount_inception_search(&server).await;
    let app = create_test_app(&server.uri());
    let request_id = "1b4e28ba-2fa1-4d3b-a3f5-ef19b5a7633b";

    let mut request = post_json("/api/v1/search", json!({"query": "Inception"}));
    request
        .headers_mut()
        .insert("x-request-id", request_id.parse().unwrap());
    let response = app.oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    assert_eq!(response.headers()["x-request-id"], request_id);
    let view = body_json(response).await;
    assert_eq!(view["search_id"], request_id);
    assert_eq!(view["status"], "results");
}

#[tokio::test]
async fn test_blank_search_is_no_op() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": []})))
        .expect(0)
        .mount(&server)
        .await;
    let app = create_test_app(&server.uri());

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/search", json!({"query": "   "})))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    let response = app
        .oneshot(Request::get("/api/v1/view").body(Body::empty()).unwrap())
        .await
        .unwrap();
    let view = body_json(response).await;
    assert_eq!(view["status"], "idle");
    assert_eq!(view["generation"], 0);
}

#[tokio::test]
async fn test_search_without_matches_shows_notice() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"page": 1, "results": []})))
        .mount(&server)
        .await;
    let app = create_test_app(&server.uri());

    let response = app
        .oneshot(post_json("/api/v1/search", json!({"query": "zzzqqqxxx"})))
        .await
        .unwrap();

    let view = body_json(response).await;
    assert_eq!(view["status"], "no_results");
    assert_eq!(
        view["message"],
        "No movies found. Try a different search term."
    );
    assert!(view.get("cards").is_none());
}

#[tokio::test]
async fn test_unreachable_tmdb_shows_error_and_clears_loading() {
    let app = create_test_app("http://127.0.0.1:1");

    let response = app
        .clone()
        .oneshot(post_json("/api/v1/search", json!({"query": "Inception"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let view = body_json(response).await;
    assert_eq!(view["status"], "error");
    assert_eq!(
        view["message"],
        "Failed to fetch movies. Please check your internet connection and try again."
    );

    let response = app
        .oneshot(Request::get("/api/v1/view").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await["status"], "error");
}

#[tokio::test]
async fn test_trending_samples_eight() {
    let server = MockServer::start().await;
    let results: Vec<Value> = (1..=20)
        .map(|id| json!({"id": id, "title": format!("Trending {}", id)}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/trending/movie/week"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": results})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/movie/\d+/watch/providers$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": {}})))
        .expect(8)
        .mount(&server)
        .await;
    let app = create_test_app(&server.uri());

    let response = app
        .oneshot(
            Request::post("/api/v1/trending")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    let view = body_json(response).await;
    assert_eq!(view["status"], "results");
    assert_eq!(view["cards"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_discover_by_genre() {
    let server = MockServer::start().await;
    let results: Vec<Value> = (1..=20)
        .map(|id| json!({"id": id, "title": format!("Genre pick {}", id)}))
        .collect();
    Mock::given(method("GET"))
        .and(path("/discover/movie"))
        .and(query_param("sort_by", "popularity.desc"))
        .and(query_param("vote_count.gte", "50"))
        .and(query_param("vote_average.gte", "5.5"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": results})))
        .expect(1)
        .mount(&server)
        .await;
    Mock::given(method("GET"))
        .and(path_regex(r"^/movie/\d+/watch/providers$"))
        .respond_with(ResponseTemplate::new(200).set_body_json(json!({"results": {}})))
        .mount(&server)
        .await;
    let app = create_test_app(&server.uri());

    let response = app
        .oneshot(post_json("/api/v1/discover", json!({"strategy": "genre"})))
        .await
        .unwrap();

    let view = body_json(response).await;
    assert_eq!(view["status"], "results");
    assert_eq!(view["cards"].as_array().unwrap().len(), 8);
}

#[tokio::test]
async fn test_discover_rejects_unknown_strategy() {
    let server = MockServer::start().await;
    let app = create_test_app(&server.uri());

    let response = app
        .oneshot(post_json("/api/v1/discover", json!({"strategy": "vibes"})))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::UNPROCESSABLE_ENTITY);
}

#[tokio::test]
async fn test_clear_view() {
    let server = MockServer::start().await;
    mount_inception_search(&server).await;
    let app = create_test_app(&server.uri());

    app.clone()
        .oneshot(post_json("/api/v1/search", json!({"query": "Inception"})))
        .await
        .unwrap();

    let response = app
        .oneshot(Request::delete("/api/v1/view").body(Body::empty()).unwrap())
        .await
        .unwrap();

    let view = body_json(response).await;
    assert_eq!(view["status"], "idle");
    assert_eq!(view["generation"], 2);
}

#[tokio::test]
async fn test_cards_endpoint_is_stateless() {
    let server = MockServer::start().await;
    mount_inception_search(&server).await;
    let app = create_test_app(&server.uri());

    let response = app
        .clone()
        .oneshot(
            Request::get("/api/v1/cards?q=Inception")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let cards = body_json(response).await;
    assert_eq!(cards.as_array().unwrap().len(), 3);

    let response = app
        .oneshot(Request::get("/api/v1/view").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(body_json(response).await["status"], "idle");
}

#[tokio::test]
async fn test_cards_blank_query_is_bad_request() {
    let server = MockServer::start().await;
    let app = create_test_app(&server.uri());

    let response = app
        .oneshot(Request::get("/api/v1/cards?q=%20%20").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    let body = body_json(response).await;
    assert_eq!(body["error"], "Invalid input: Search query cannot be empty");
}

#[tokio::test]
async fn test_cards_upstream_failure_is_bad_gateway() {
    let server = MockServer::start().await;
    Mock::given(method("GET"))
        .and(path("/search/movie"))
        .respond_with(ResponseTemplate::new(401).set_body_json(json!({
            "status_code": 7,
            "status_message": "Invalid API key: You must be granted a valid key."
        })))
        .mount(&server)
        .await;
    let app = create_test_app(&server.uri());

    let response = app
        .oneshot(
            Request::get("/api/v1/cards?q=Inception")
                .body(Body::empty())
                .unwrap(),
        )
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);
}
