//! HttpClient against an in-process fake backend
#![cfg(feature = "native")]

use axum::extract::Query;
use axum::http::StatusCode;
use axum::routing::{get, post};
use axum::{Json, Router};
use serde_json::{json, Value};
use std::collections::HashMap;

use cradle::api::{CareApi, ClientError, DateRange, EventFilter, FileRequest, HttpClient};
use cradle::pages;
use cradle::view::Loaded;

async fn events(Query(params): Query<HashMap<String, String>>) -> Json<Value> {
    Json(json!({
        "status": "success",
        "count": 1,
        "data": [{
            "category": params.get("category"),
            "detail": params.get("start_date"),
            "value": 2
        }]
    }))
}

async fn parse(Json(body): Json<Value>) -> Json<Value> {
    let path = body
        .get("file_path")
        .and_then(Value::as_str)
        .unwrap_or("default")
        .to_string();
    Json(json!({
        "status": "success",
        "message": path,
        "data": {"events_count": 42, "days_count": 3, "growth_records": null}
    }))
}

fn backend() -> Router {
    Router::new()
        .route(
            "/api/health",
            get(|| async { Json(json!({"status": "ok", "timestamp": "2024-02-01T09:00:00"})) }),
        )
        .route("/api/events", get(events))
        .route("/api/parse", post(parse))
        .route(
            "/api/analyze",
            get(|| async { Json(json!({"status": "error", "message": "分析エラー: データがありません"})) }),
        )
        .route(
            "/api/growth",
            get(|| async {
                (
                    StatusCode::INTERNAL_SERVER_ERROR,
                    Json(json!({"status": "error", "message": "成長データ取得エラー"})),
                )
            }),
        )
        .route(
            "/api/summary/daily",
            get(|| async { (StatusCode::INTERNAL_SERVER_ERROR, "boom") }),
        )
        .route(
            "/api/analysis/sleep-patterns",
            get(|| async { "<html>not json</html>" }),
        )
        .route(
            "/api/analysis/vomit-correlation",
            get(|| async {
                Json(json!({
                    "status": "success",
                    "data": {
                        "milk_amount_vomit_count": {"correlation": 0.41, "p_value": 0.03},
                        "vomit_hour_distribution": {"6": 4, "18": 1}
                    }
                }))
            }),
        )
}

/// Serve the fake backend on an ephemeral port and return its API base
async fn spawn_backend() -> String {
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, backend()).await.unwrap();
    });
    format!("http://{}/api/", addr)
}

#[tokio::test]
async fn test_health() {
    let client = HttpClient::new(&spawn_backend().await);
    assert!(!client.base_url().ends_with('/'));

    let health = client.health().await.unwrap();
    assert!(health.is_healthy());
    assert_eq!(health.timestamp.as_deref(), Some("2024-02-01T09:00:00"));
}

#[tokio::test]
async fn test_query_is_encoded() {
    let client = HttpClient::new(&spawn_backend().await);
    let filter = EventFilter {
        start_date: Some("2024/02/01 08:00".into()),
        ..EventFilter::category("vomit")
    };

    let env = client.events(&filter).await.unwrap();
    assert_eq!(env.count, Some(1));
    let rows = env.into_result().unwrap().unwrap();
    assert_eq!(rows[0].category, "vomit");
    assert_eq!(rows[0].detail.as_deref(), Some("2024/02/01 08:00"));
}

#[tokio::test]
async fn test_post_body() {
    let client = HttpClient::new(&spawn_backend().await);

    let env = client
        .parse(&FileRequest {
            file_path: Some("/data/log.txt".into()),
        })
        .await
        .unwrap();
    assert_eq!(env.message.as_deref(), Some("/data/log.txt"));
    let counts = env.into_result().unwrap().unwrap();
    assert_eq!(counts.events_count, 42);
    assert_eq!(counts.growth_records, 0);

    let env = client.parse(&FileRequest::default()).await.unwrap();
    assert_eq!(env.message.as_deref(), Some("default"));
}

#[tokio::test]
async fn test_application_error_envelope() {
    let client = HttpClient::new(&spawn_backend().await);

    let err = client.analyze().await.unwrap().into_result().unwrap_err();
    assert_eq!(err.user_message(), "分析エラー: データがありません");
}

#[tokio::test]
async fn test_error_status_mapping() {
    let client = HttpClient::new(&spawn_backend().await);

    match client.growth(&Default::default()).await {
        Err(ClientError::Http { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "成長データ取得エラー");
        }
        other => panic!("unexpected {:?}", other),
    }

    match client.daily_summary(&DateRange::default()).await {
        Err(ClientError::Http { status, message }) => {
            assert_eq!(status, 500);
            assert_eq!(message, "Internal Server Error");
        }
        other => panic!("unexpected {:?}", other),
    }
}

#[tokio::test]
async fn test_undecodable_body() {
    let client = HttpClient::new(&spawn_backend().await);
    let err = client.sleep_patterns().await.unwrap_err();
    assert!(matches!(err, ClientError::Decode(_)));
    assert!(err.is_retryable());
}

#[tokio::test]
async fn test_unreachable_backend() {
    let client = HttpClient::new("http://127.0.0.1:1/api");
    let err = client.health().await.unwrap_err();
    assert!(matches!(err, ClientError::Transport(_)));
    assert_eq!(err.user_message(), cradle::api::error::GENERIC_FETCH_ERROR);
}

#[tokio::test]
async fn test_vomit_page_over_http() {
    let client = HttpClient::new(&spawn_backend().await);

    let view = match pages::vomit::load(&client).await.unwrap() {
        Loaded::Ready(v) => v,
        Loaded::Empty => panic!("expected ready"),
    };
    // daily summary 500s; the page still renders
    assert!(view.secondary_unavailable);
    assert_eq!(view.correlations.len(), 1);
    assert!(view.correlations[0].significant);
    assert_eq!(view.hourly[6].count, 4);
    assert_eq!(view.severity[1].count, 1);
}
