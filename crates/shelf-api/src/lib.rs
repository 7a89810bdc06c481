//! GraphQL and administrative HTTP API for Shelf.
//!
//! Exposes an axum [`Router`] backed by any
//! [`shelf_core::store::CatalogStore`]. TLS and transport concerns are the
//! caller's responsibility.
//!
//! # Mounting
//!
//! ```rust,ignore
//! .nest("/api", shelf_api::api_router(store.clone()))
//! ```

pub mod admin;
pub mod catalog;
pub mod error;
pub mod schema;
pub mod types;

#[cfg(test)]
mod tests;

use std::sync::Arc;

use async_graphql::http::GraphiQLSource;
use axum::{
  Json, Router,
  extract::State,
  response::Html,
  routing::get,
};
use shelf_core::{CatalogService, store::CatalogStore};

pub use catalog::{Catalog, CatalogHandle};
pub use error::ApiError;
pub use schema::{ShelfSchema, build_schema};

/// Shared state threaded through all API handlers.
pub struct ApiState<S> {
  pub schema: ShelfSchema,
  pub store:  Arc<S>,
}

impl<S> Clone for ApiState<S> {
  fn clone(&self) -> Self {
    Self { schema: self.schema.clone(), store: Arc::clone(&self.store) }
  }
}

/// Build a fully-materialised API router for `store`.
///
/// The returned `Router<()>` can be nested into any parent router regardless
/// of its own state type.
pub fn api_router<S>(store: Arc<S>) -> Router<()>
where
  S: CatalogStore + 'static,
{
  let catalog: CatalogHandle = Arc::new(CatalogService::new(Arc::clone(&store)));
  let state = ApiState { schema: build_schema(catalog), store };

  Router::new()
    .route("/graphql", get(graphiql).post(graphql::<S>))
    .route("/health", get(admin::health::<S>))
    .route("/admin/seed", get(admin::seed_usage).post(admin::seed::<S>))
    .with_state(state)
}

/// `POST /graphql`
async fn graphql<S>(
  State(state): State<ApiState<S>>,
  Json(request): Json<async_graphql::Request>,
) -> Json<async_graphql::Response>
where
  S: CatalogStore + 'static,
{
  Json(state.schema.execute(request).await)
}

/// `GET /graphql` serves the interactive explorer. The endpoint is relative so the
/// page works wherever the router is nested.
async fn graphiql() -> Html<String> {
  Html(GraphiQLSource::build().endpoint("graphql").finish())
}
