//! HTTP front end for Shelf.
//!
//! Mounts the [`shelf_api`] router under `/api` and wraps it in request
//! tracing. The binary in `main.rs` owns configuration and the store handle.

use std::path::PathBuf;
use std::sync::Arc;

use axum::Router;
use serde::Deserialize;
use shelf_core::store::CatalogStore;
use tower_http::trace::TraceLayer;

// ─── Configuration ────────────────────────────────────────────────────────────

/// Runtime server configuration, deserialised from `config.toml` and
/// `SHELF_*` environment variables. Every field has a default.
#[derive(Debug, Deserialize, Clone)]
#[serde(default)]
pub struct ServerConfig {
  pub host:       String,
  pub port:       u16,
  pub store_path: PathBuf,
}

impl Default for ServerConfig {
  fn default() -> Self {
    Self {
      host:       "127.0.0.1".to_string(),
      port:       4000,
      store_path: PathBuf::from("shelf.db"),
    }
  }
}

impl ServerConfig {
  pub fn address(&self) -> String { format!("{}:{}", self.host, self.port) }
}

// ─── Router ───────────────────────────────────────────────────────────────────

/// Build the application [`Router`] over an already-open store.
pub fn router<S>(store: Arc<S>) -> Router
where
  S: CatalogStore + 'static,
{
  Router::new()
    .nest("/api", shelf_api::api_router(store))
    .layer(TraceLayer::new_for_http())
}

// ─── Integration tests ────────────────────────────────────────────────────────

#[cfg(test)]
mod tests {
  use super::*;

  use axum::{
    body::Body,
    http::{Request, StatusCode, header},
    response::Response,
  };
  use serde_json::{Value, json};
  use shelf_store_sqlite::SqliteStore;
  use tower::ServiceExt as _;

  async fn app() -> Router {
    let store = SqliteStore::open_in_memory().await.unwrap();
    router(Arc::new(store))
  }

  async fn oneshot_raw(
    app:    Router,
    method: &str,
    uri:    &str,
    body:   Option<Value>,
  ) -> Response {
    let mut builder = Request::builder().method(method).uri(uri);
    let body = match body {
      Some(json) => {
        builder = builder.header(header::CONTENT_TYPE, "application/json");
        Body::from(json.to_string())
      }
      None => Body::empty(),
    };
    app.oneshot(builder.body(body).unwrap()).await.unwrap()
  }

  async fn body_json(resp: Response) -> Value {
    let bytes = axum::body::to_bytes(resp.into_body(), usize::MAX)
      .await
      .unwrap();
    serde_json::from_slice(&bytes).unwrap()
  }

  // ── Configuration ───────────────────────────────────────────────────────────

  #[test]
  fn config_fills_missing_fields_with_defaults() {
    let cfg: ServerConfig = config::Config::builder()
      .add_source(config::File::from_str("port = 5000", config::FileFormat::Toml))
      .build()
      .unwrap()
      .try_deserialize()
      .unwrap();

    assert_eq!(cfg.host, "127.0.0.1");
    assert_eq!(cfg.port, 5000);
    assert_eq!(cfg.store_path, PathBuf::from("shelf.db"));
    assert_eq!(cfg.address(), "127.0.0.1:5000");
  }

  // ── GraphQL ─────────────────────────────────────────────────────────────────

  #[tokio::test]
  async fn graphql_post_executes_query() {
    let resp = oneshot_raw(
      app().await,
      "POST",
      "/api/graphql",
      Some(json!({ "query": "{ getAllGenres }" })),
    )
    .await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert_eq!(body_json(resp).await, json!({ "data": { "getAllGenres": [] } }));
  }

  #[tokio::test]
  async fn graphql_get_serves_explorer() {
    let resp = oneshot_raw(app().await, "GET", "/api/graphql", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let content_type = resp.headers()[header::CONTENT_TYPE].to_str().unwrap();
    assert!(content_type.starts_with("text/html"), "got {content_type}");
  }

  #[tokio::test]
  async fn graphql_error_carries_code() {
    let resp = oneshot_raw(
      app().await,
      "POST",
      "/api/graphql",
      Some(json!({ "query": r#"{ getBookDetails(id: "not-a-valid-id") { id } }"# })),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["errors"][0]["extensions"]["code"], "INVALID_IDENTIFIER");
  }

  // ── Administration ──────────────────────────────────────────────────────────

  #[tokio::test]
  async fn health_lists_collections() {
    let resp = oneshot_raw(app().await, "GET", "/api/health", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let body = body_json(resp).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["collections"], json!(["authors", "books"]));
    assert!(body["checkedAt"].is_string());
  }

  #[tokio::test]
  async fn seed_populates_catalog() {
    let app = app().await;

    let resp = oneshot_raw(app.clone(), "POST", "/api/admin/seed", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    let report = body_json(resp).await;
    assert_eq!(report["authorsCreated"], 5);
    assert_eq!(report["booksCreated"], 11);

    let resp = oneshot_raw(
      app,
      "POST",
      "/api/graphql",
      Some(json!({ "query": "{ getAllBooks { id } }" })),
    )
    .await;
    let body = body_json(resp).await;
    assert_eq!(body["data"]["getAllBooks"].as_array().unwrap().len(), 11);
  }

  #[tokio::test]
  async fn seed_get_returns_usage() {
    let resp = oneshot_raw(app().await, "GET", "/api/admin/seed", None).await;
    assert_eq!(resp.status(), StatusCode::OK);
    assert!(body_json(resp).await["message"].is_string());
  }

  #[tokio::test]
  async fn unknown_route_is_404() {
    let resp = oneshot_raw(app().await, "GET", "/api/nope", None).await;
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
  }
}
