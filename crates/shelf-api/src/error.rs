//! API error type and [`axum::response::IntoResponse`] implementation.
//!
//! Catalog validation errors never reach the plain handlers; they surface
//! through GraphQL `extensions.code` instead.

use axum::{
  Json,
  http::StatusCode,
  response::{IntoResponse, Response},
};
use serde_json::json;
use thiserror::Error;

/// An error returned by a plain (non-GraphQL) API handler.
#[derive(Debug, Error)]
pub enum ApiError {
  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl From<shelf_core::Error> for ApiError {
  fn from(e: shelf_core::Error) -> Self {
    match e {
      shelf_core::Error::Store(inner) => ApiError::Store(inner),
      other => ApiError::Store(Box::new(other)),
    }
  }
}

impl IntoResponse for ApiError {
  fn into_response(self) -> Response {
    tracing::error!(error = %self, "request failed");
    let body = json!({ "error": self.to_string(), "code": "STORE_UNAVAILABLE" });
    (StatusCode::INTERNAL_SERVER_ERROR, Json(body)).into_response()
  }
}
