//! Handlers for the administrative endpoints.
//!
//! | Method | Path | Notes |
//! |--------|------|-------|
//! | `GET`  | `/health` | Store connectivity; lists collections |
//! | `POST` | `/admin/seed` | Wipe and repopulate with the fixture |
//! | `GET`  | `/admin/seed` | Usage message |

use axum::{Json, extract::State};
use chrono::{DateTime, Utc};
use serde::Serialize;
use serde_json::{Value, json};
use shelf_core::{
  seed::{self, SeedReport},
  store::CatalogStore,
};

use crate::{ApiState, error::ApiError};

// ─── Health ───────────────────────────────────────────────────────────────────

#[derive(Debug, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HealthReport {
  pub status:      &'static str,
  pub collections: Vec<String>,
  pub checked_at:  DateTime<Utc>,
}

/// `GET /health`
pub async fn health<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<HealthReport>, ApiError>
where
  S: CatalogStore + 'static,
{
  let collections = state
    .store
    .collections()
    .await
    .map_err(|e| ApiError::Store(Box::new(e)))?;
  Ok(Json(HealthReport { status: "ok", collections, checked_at: Utc::now() }))
}

// ─── Seed ─────────────────────────────────────────────────────────────────────

/// `POST /admin/seed`. Destroys all existing catalog data.
pub async fn seed<S>(
  State(state): State<ApiState<S>>,
) -> Result<Json<SeedReport>, ApiError>
where
  S: CatalogStore + 'static,
{
  tracing::info!("seeding catalog via admin endpoint");
  let report = seed::seed(state.store.as_ref()).await?;
  Ok(Json(report))
}

/// `GET /admin/seed`
pub async fn seed_usage() -> Json<Value> {
  Json(json!({
    "message": "Catalog seeder endpoint. Use POST to replace all data with the fixture.",
  }))
}
