//! HTTP routes

pub mod health;
pub mod preferences;
pub mod quotes;
pub mod sync;

use axum::{routing::get, Router};
use tower_http::cors::{Any, CorsLayer};
use tower_http::trace::TraceLayer;

use crate::state::AppState;

/// Build the application router
pub fn app(state: AppState) -> Router {
    let cors = CorsLayer::new()
        .allow_origin(Any)
        .allow_methods(Any)
        .allow_headers(Any);

    Router::new()
        .route("/health", get(health::health_check))
        .nest("/api/v1/health", health::router())
        .nest("/api/v1/quotes", quotes::router())
        .nest("/api/v1/preferences", preferences::router())
        .nest("/api/v1/sync", sync::router())
        .layer(TraceLayer::new_for_http())
        .layer(cors)
        .with_state(state)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Arc;

    use axum::{
        body::{to_bytes, Body},
        http::{header, Request, StatusCode},
    };
    use serde_json::{json, Value};
    use tower::ServiceExt;

    use crate::config::Config;
    use crate::quotes::Collection;
    use crate::storage::MemoryKv;
    use crate::sync::testing::FakeRemote;

    async fn test_app(remote: FakeRemote) -> (Router, AppState, Arc<FakeRemote>) {
        let remote = Arc::new(remote);
        let state = AppState::new(Config::default(), Arc::new(MemoryKv::new()), remote.clone()).await;
        (app(state.clone()), state, remote)
    }

    async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
        let response = app.clone().oneshot(request).await.unwrap();
        let status = response.status();
        let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };
        (status, body)
    }

    fn get(uri: &str) -> Request<Body> {
        Request::builder().uri(uri).body(Body::empty()).unwrap()
    }

    fn json_request(method: &str, uri: &str, body: Value) -> Request<Body> {
        Request::builder()
            .method(method)
            .uri(uri)
            .header(header::CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap()
    }

    #[tokio::test]
    async fn test_health() {
        let (app, _, _) = test_app(FakeRemote::with_quotes(Vec::new())).await;

        let (status, body) = send(&app, get("/health")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["status"], "healthy");
        assert_eq!(body["syncState"], "idle");
    }

    #[tokio::test]
    async fn test_list_starts_with_seed() {
        let (app, _, _) = test_app(FakeRemote::with_quotes(Vec::new())).await;

        let (status, body) = send(&app, get("/api/v1/quotes")).await;

        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["category"], "all");
        assert_eq!(body["count"], 2);
    }

    #[tokio::test]
    async fn test_add_quote_and_filter() {
        let (app, state, _) = test_app(FakeRemote::with_quotes(Vec::new())).await;

        let (status, _) = send(
            &app,
            json_request("POST", "/api/v1/quotes", json!({"text": "new", "category": "Wisdom"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        assert!(state.store().current().await.contains_text("new"));

        let (_, body) = send(&app, get("/api/v1/quotes?category=Wisdom")).await;
        assert_eq!(body["count"], 1);
        assert_eq!(body["quotes"][0]["text"], "new");

        let (_, categories) = send(&app, get("/api/v1/quotes/categories")).await;
        assert_eq!(categories, json!(["Motivation", "Life", "Wisdom"]));
    }

    #[tokio::test]
    async fn test_add_quote_validation_error() {
        let (app, state, _) = test_app(FakeRemote::with_quotes(Vec::new())).await;

        let (status, body) = send(
            &app,
            json_request("POST", "/api/v1/quotes", json!({"text": "", "category": "X"})),
        )
        .await;

        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["error"], "validation_error");
        assert_eq!(state.store().current().await, Collection::seed());

        let (status, _) = send(&app, json_request("POST", "/api/v1/quotes", json!({"text": "x"}))).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_add_duplicate_is_conflict() {
        let (app, _, _) = test_app(FakeRemote::with_quotes(Vec::new())).await;
        let seed_text = Collection::seed().as_slice()[0].text.clone();

        let (status, _) = send(
            &app,
            json_request("POST", "/api/v1/quotes", json!({"text": seed_text, "category": "X"})),
        )
        .await;

        assert_eq!(status, StatusCode::CONFLICT);
    }

    #[tokio::test]
    async fn test_add_survives_post_failure() {
        let remote = FakeRemote::with_quotes(Vec::new());
        remote.set_fail_post(true);
        let (app, state, _) = test_app(remote).await;

        let (status, _) = send(
            &app,
            json_request("POST", "/api/v1/quotes", json!({"text": "kept", "category": "Life"})),
        )
        .await;

        assert_eq!(status, StatusCode::CREATED);
        tokio::task::yield_now().await;
        assert!(state.store().current().await.contains_text("kept"));
    }

    #[tokio::test]
    async fn test_random_records_last_viewed() {
        let (app, _, _) = test_app(FakeRemote::with_quotes(Vec::new())).await;

        let (status, _) = send(&app, get("/api/v1/quotes/last-viewed")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);

        let (status, picked) = send(&app, get("/api/v1/quotes/random?category=Life")).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(picked["category"], "Life");

        let (_, last) = send(&app, get("/api/v1/quotes/last-viewed")).await;
        assert_eq!(last, picked);

        let (status, _) = send(&app, get("/api/v1/quotes/random?category=Nothing")).await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }

    #[tokio::test]
    async fn test_selected_category_drives_default_filter() {
        let (app, _, _) = test_app(FakeRemote::with_quotes(Vec::new())).await;

        let (status, _) = send(
            &app,
            json_request("PUT", "/api/v1/preferences/category", json!({"category": "Life"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let (_, pref) = send(&app, get("/api/v1/preferences/category")).await;
        assert_eq!(pref["category"], "Life");

        let (_, body) = send(&app, get("/api/v1/quotes")).await;
        assert_eq!(body["category"], "Life");
        assert_eq!(body["count"], 1);

        let (_, body) = send(&app, get("/api/v1/quotes?category=all")).await;
        assert_eq!(body["count"], 2);
    }

    #[tokio::test]
    async fn test_export_and_import() {
        let (app, _, _) = test_app(FakeRemote::with_quotes(Vec::new())).await;

        let response = app.clone().oneshot(get("/api/v1/quotes/export")).await.unwrap();
        assert_eq!(response.status(), StatusCode::OK);
        assert_eq!(
            response.headers()[header::CONTENT_DISPOSITION],
            "attachment; filename=\"quotes.json\""
        );

        let (status, body) = send(
            &app,
            json_request(
                "POST",
                "/api/v1/quotes/import",
                json!([{"text": "imported", "category": "Fresh"}]),
            ),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["added"], 1);

        let request = Request::builder()
            .method("POST")
            .uri("/api/v1/quotes/import")
            .body(Body::from("not json"))
            .unwrap();
        let (status, _) = send(&app, request).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }

    #[tokio::test]
    async fn test_manual_sync() {
        let remote = FakeRemote::with_quotes(vec![crate::quotes::Quote::new("remote", "Wisdom").unwrap()]);
        let (app, _, _) = test_app(remote).await;

        let (status, report) = send(&app, json_request("POST", "/api/v1/sync", json!({}))).await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(report["added"][0]["text"], "remote");

        let (_, status_body) = send(&app, get("/api/v1/sync/status")).await;
        assert_eq!(status_body["state"], "idle");
        assert_eq!(status_body["addedTotal"], 1);

        let (_, notifications) = send(&app, get("/api/v1/sync/notifications")).await;
        assert_eq!(notifications[0]["kind"], "synced");
    }

    #[tokio::test]
    async fn test_manual_sync_failure_is_bad_gateway() {
        let remote = FakeRemote::with_quotes(Vec::new());
        remote.set_fail_fetch(true);
        let (app, state, _) = test_app(remote).await;

        let (status, body) = send(&app, json_request("POST", "/api/v1/sync", json!({}))).await;

        assert_eq!(status, StatusCode::BAD_GATEWAY);
        assert_eq!(body["error"], "remote_error");
        assert_eq!(state.store().current().await, Collection::seed());
    }
}
