//! The `CatalogStore` trait and supporting query types.
//!
//! The trait is implemented by storage backends (e.g. `shelf-store-sqlite`).
//! The catalog service and the API layer depend on this abstraction, not on
//! any concrete backend.

use std::future::Future;

use uuid::Uuid;

use crate::{
  author::{Author, NewAuthor},
  book::{BookPatch, BookRecord, NewBook},
};

// ─── Query type ──────────────────────────────────────────────────────────────

/// Parameters for [`CatalogStore::find_books`]. All set fields must match.
#[derive(Debug, Clone, Default)]
pub struct BookFilter {
  /// Exact, case-sensitive genre match.
  pub genre:      Option<String>,
  /// Exact ISBN match.
  pub isbn:       Option<String>,
  /// Skip the book with this id (used when re-checking uniqueness on update).
  pub exclude_id: Option<Uuid>,
}

impl BookFilter {
  pub fn genre(genre: impl Into<String>) -> Self {
    Self { genre: Some(genre.into()), ..Default::default() }
  }

  pub fn isbn(isbn: impl Into<String>) -> Self {
    Self { isbn: Some(isbn.into()), ..Default::default() }
  }

  pub fn excluding(mut self, id: Uuid) -> Self {
    self.exclude_id = Some(id);
    self
  }
}

// ─── Error hook ──────────────────────────────────────────────────────────────

/// Backend errors must be able to say whether a write was rejected by the
/// ISBN unique index, so the service can report it as a duplicate rather
/// than as an opaque storage failure.
pub trait StoreError: std::error::Error + Send + Sync + 'static {
  fn is_duplicate_isbn(&self) -> bool;
}

// ─── Trait ───────────────────────────────────────────────────────────────────

/// Abstraction over a document store with two collections, `authors` and
/// `books`, and a unique index on `books.isbn`.
///
/// The store owns all persistent state and enforces nothing beyond the unique
/// index; referential checks live in [`crate::CatalogService`].
///
/// All methods return `Send` futures so the trait can be used in multi-threaded
/// async runtimes (e.g. tokio with `axum`).
pub trait CatalogStore: Send + Sync {
  type Error: StoreError;

  // ── Authors ───────────────────────────────────────────────────────────

  /// List every author in store order.
  fn list_authors(
    &self,
  ) -> impl Future<Output = Result<Vec<Author>, Self::Error>> + Send + '_;

  /// Retrieve an author by id. Returns `None` if not found.
  fn get_author(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<Author>, Self::Error>> + Send + '_;

  /// Persist a new author under a fresh id.
  fn insert_author(
    &self,
    input: NewAuthor,
  ) -> impl Future<Output = Result<Author, Self::Error>> + Send + '_;

  // ── Books ─────────────────────────────────────────────────────────────

  /// Scan the `books` collection, keeping records that match `filter`.
  fn find_books<'a>(
    &'a self,
    filter: &'a BookFilter,
  ) -> impl Future<Output = Result<Vec<BookRecord>, Self::Error>> + Send + 'a;

  /// Retrieve a book by id. Returns `None` if not found.
  fn get_book(
    &self,
    id: Uuid,
  ) -> impl Future<Output = Result<Option<BookRecord>, Self::Error>> + Send + '_;

  /// Persist a new book under a fresh id.
  ///
  /// Fails with an error whose [`StoreError::is_duplicate_isbn`] is `true`
  /// if the unique index already holds `input.isbn`.
  fn insert_book(
    &self,
    input: NewBook,
  ) -> impl Future<Output = Result<BookRecord, Self::Error>> + Send + '_;

  /// Set only the fields present in `patch`; returns the record as it is
  /// after the write, or `None` if no book has that id.
  ///
  /// Subject to the same unique-index rejection as
  /// [`CatalogStore::insert_book`].
  fn update_book(
    &self,
    id: Uuid,
    patch: BookPatch,
  ) -> impl Future<Output = Result<Option<BookRecord>, Self::Error>> + Send + '_;

  /// Every distinct genre across all books. Computed on each call.
  fn distinct_genres(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;

  // ── Administration ────────────────────────────────────────────────────

  /// Delete every book and every author.
  fn clear(&self) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Create the ISBN unique index. Succeeds if it already exists.
  fn ensure_isbn_index(
    &self,
  ) -> impl Future<Output = Result<(), Self::Error>> + Send + '_;

  /// Names of the collections present in the store. Doubles as a
  /// connectivity probe.
  fn collections(
    &self,
  ) -> impl Future<Output = Result<Vec<String>, Self::Error>> + Send + '_;
}
