//! Error type for `shelf-store-sqlite`.

use shelf_core::store::StoreError;
use thiserror::Error;

#[derive(Debug, Error)]
pub enum Error {
  #[error("database error: {0}")]
  Database(#[from] tokio_rusqlite::Error),

  #[error("uuid parse error: {0}")]
  Uuid(#[from] uuid::Error),

  /// The `books_isbn_unique` index rejected a write.
  #[error("unique index violation: ISBN {0:?} is already stored")]
  DuplicateIsbn(String),

  #[error("corrupt row: {0}")]
  Decode(String),
}

impl StoreError for Error {
  fn is_duplicate_isbn(&self) -> bool { matches!(self, Self::DuplicateIsbn(_)) }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;
