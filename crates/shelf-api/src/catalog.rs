//! The object-safe seam between the GraphQL resolvers and the catalog
//! service.
//!
//! [`CatalogService`] is generic over its store, and the store trait's
//! native `async fn`s make it impossible to put behind `dyn`. Resolvers need a
//! single concrete type in the schema's data map, so they talk to
//! `Arc<dyn Catalog>` instead.

use std::sync::Arc;

use async_trait::async_trait;
use shelf_core::{
  CatalogService, Result,
  author::Author,
  book::{Book, BookUpdate, NewBookInput},
  store::CatalogStore,
};

/// The seven catalog operations.
#[async_trait]
pub trait Catalog: Send + Sync {
  async fn list_books(&self) -> Result<Vec<Book>>;
  async fn get_book_details(&self, id: &str) -> Result<Option<Book>>;
  async fn books_by_genre(&self, genre: &str) -> Result<Vec<Book>>;
  async fn list_authors(&self) -> Result<Vec<Author>>;
  async fn list_genres(&self) -> Result<Vec<String>>;
  async fn add_book(&self, input: NewBookInput) -> Result<Book>;
  async fn update_book(&self, id: &str, update: BookUpdate) -> Result<Book>;
}

/// Shared handle stored in the GraphQL schema.
pub type CatalogHandle = Arc<dyn Catalog>;

#[async_trait]
impl<S> Catalog for CatalogService<S>
where
  S: CatalogStore + 'static,
{
  async fn list_books(&self) -> Result<Vec<Book>> {
    CatalogService::list_books(self).await
  }

  async fn get_book_details(&self, id: &str) -> Result<Option<Book>> {
    CatalogService::get_book_details(self, id).await
  }

  async fn books_by_genre(&self, genre: &str) -> Result<Vec<Book>> {
    CatalogService::books_by_genre(self, genre).await
  }

  async fn list_authors(&self) -> Result<Vec<Author>> {
    CatalogService::list_authors(self).await
  }

  async fn list_genres(&self) -> Result<Vec<String>> {
    CatalogService::list_genres(self).await
  }

  async fn add_book(&self, input: NewBookInput) -> Result<Book> {
    CatalogService::add_book(self, input).await
  }

  async fn update_book(&self, id: &str, update: BookUpdate) -> Result<Book> {
    CatalogService::update_book(self, id, update).await
  }
}
