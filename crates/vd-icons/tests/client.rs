//! Client tests against a local stub of the icon API.

use axum::extract::{Path, Query};
use axum::http::StatusCode;
use axum::response::IntoResponse;
use axum::routing::get;
use axum::{Json, Router};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::collections::HashMap;
use vd_icons::{IconClient, IconError, SearchOptions};

type Params = Query<HashMap<String, String>>;

async fn search(Query(q): Params) -> Json<serde_json::Value> {
    let prefix = q.get("prefix").cloned().unwrap_or_else(|| "mdi".into());
    let limit: usize = q.get("limit").and_then(|l| l.parse().ok()).unwrap_or(0);
    let icons: Vec<String> = ["home", "home-outline", "home-plus"]
        .iter()
        .take(limit)
        .map(|n| format!("{prefix}:{n}"))
        .collect();
    Json(json!({ "icons": icons, "total": icons.len(), "limit": limit, "start": 0 }))
}

async fn icon_set(Path(file): Path<String>, Query(q): Params) -> impl IntoResponse {
    let Some(prefix) = file.strip_suffix(".json") else {
        return StatusCode::NOT_FOUND.into_response();
    };
    if prefix == "broken" {
        return (StatusCode::INTERNAL_SERVER_ERROR, "boom").into_response();
    }
    if q.get("icons").map(String::as_str) != Some("home,gone,hollow,tall") {
        return StatusCode::BAD_REQUEST.into_response();
    }
    Json(json!({
        "prefix": prefix,
        "height": 32,
        "icons": {
            "home": { "body": "<path fill=\"currentColor\"/>" },
            "hollow": { "width": 16 },
            "tall": { "body": "<path/>", "width": 10, "height": 40 }
        },
        "not_found": ["gone"]
    }))
    .into_response()
}

async fn single_icon(Path((prefix, file)): Path<(String, String)>) -> impl IntoResponse {
    match (prefix.as_str(), file.as_str()) {
        ("lucide", "house.json") => {
            Json(json!({ "body": "<path d=\"M3 10\"/>", "width": 24, "height": 24 }))
                .into_response()
        }
        ("lucide", "nobody.json") => Json(json!({ "width": 24 })).into_response(),
        _ => StatusCode::NOT_FOUND.into_response(),
    }
}

async fn collection(Query(q): Params) -> Json<serde_json::Value> {
    match q.get("prefix").map(String::as_str) {
        Some("flat") => Json(json!({ "uncategorized": ["a", "b", "c", "d"] })),
        _ => Json(json!({
            "categories": {
                "Zoo": ["zebra", "yak"],
                "Arrows": ["up", "down"]
            }
        })),
    }
}

async fn stub() -> IconClient {
    let app = Router::new()
        .route("/search", get(search))
        .route("/collection", get(collection))
        .route("/{file}", get(icon_set))
        .route("/{prefix}/{file}", get(single_icon));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    IconClient::new(format!("http://{addr}"))
}

#[tokio::test]
async fn search_passes_limit_and_prefix() {
    let client = stub().await;
    let res = client
        .search(
            "home",
            &SearchOptions {
                prefix: Some("lucide".into()),
                limit: 2,
            },
        )
        .await
        .unwrap();
    assert_eq!(res.icons, vec!["lucide:home", "lucide:home-outline"]);
    assert_eq!(res.total, 2);

    let res = client.search("home", &SearchOptions::default()).await.unwrap();
    assert_eq!(res.icons.len(), 3);
    assert!(res.icons[0].starts_with("mdi:"));
}

#[tokio::test]
async fn batch_drops_missing_and_falls_back_on_dimensions() {
    let client = stub().await;
    let names: Vec<String> = ["home", "gone", "hollow", "tall"]
        .iter()
        .map(|s| s.to_string())
        .collect();
    let icons = client.fetch_batch("mdi", &names).await.unwrap();

    assert_eq!(icons.len(), 2);
    let home = &icons["home"];
    assert_eq!((home.width, home.height), (24.0, 32.0));
    assert_eq!(home.prefix, "mdi");
    assert_eq!(home.body, r#"<path fill="currentColor"/>"#);
    let tall = &icons["tall"];
    assert_eq!((tall.width, tall.height), (10.0, 40.0));
}

#[tokio::test]
async fn non_success_status_is_an_error() {
    let client = stub().await;
    let err = client
        .fetch_batch("broken", &["x".to_string()])
        .await
        .unwrap_err();
    assert!(matches!(err, IconError::Status { status: 500, .. }));
}

#[tokio::test]
async fn single_icon_fetch() {
    let client = stub().await;
    let house = client.fetch_icon("lucide", "house").await.unwrap();
    assert_eq!(house.full_name(), "lucide:house");
    assert!(matches!(
        client.fetch_icon("lucide", "nobody").await,
        Err(IconError::NotFound(_))
    ));
    assert!(matches!(
        client.fetch_icon("lucide", "missing").await,
        Err(IconError::Status { status: 404, .. })
    ));
}

#[tokio::test]
async fn collection_listing() {
    let client = stub().await;
    assert_eq!(
        client.list_collection_icons("flat", 3).await.unwrap(),
        vec!["a", "b", "c"]
    );
    assert_eq!(
        client.list_collection_icons("grouped", 100).await.unwrap(),
        vec!["zebra", "yak", "up", "down"]
    );
}

#[tokio::test]
async fn unreachable_host_is_http_error() {
    let client = IconClient::new("http://127.0.0.1:9");
    assert!(matches!(
        client.search("x", &SearchOptions::default()).await,
        Err(IconError::Http(_))
    ));
}
