//! Error types for `shelf-core`.

use thiserror::Error;
use uuid::Uuid;

#[derive(Debug, Error)]
pub enum Error {
  #[error("invalid {field}: {value:?} is not a valid identifier")]
  InvalidIdentifier { field: &'static str, value: String },

  #[error("book not found: {0}")]
  BookNotFound(Uuid),

  #[error("author not found: {0}")]
  AuthorNotFound(Uuid),

  #[error("a book with ISBN {0:?} already exists")]
  DuplicateIsbn(String),

  #[error("{0} must not be empty")]
  EmptyField(&'static str),

  #[error("store error: {0}")]
  Store(#[source] Box<dyn std::error::Error + Send + Sync>),
}

impl Error {
  /// Stable machine-readable code, surfaced to API clients alongside the
  /// human-readable message.
  pub fn code(&self) -> &'static str {
    match self {
      Self::InvalidIdentifier { .. } => "INVALID_IDENTIFIER",
      Self::BookNotFound(_) => "BOOK_NOT_FOUND",
      Self::AuthorNotFound(_) => "AUTHOR_NOT_FOUND",
      Self::DuplicateIsbn(_) => "DUPLICATE_ISBN",
      Self::EmptyField(_) => "EMPTY_FIELD",
      Self::Store(_) => "STORE_UNAVAILABLE",
    }
  }
}

pub type Result<T, E = Error> = std::result::Result<T, E>;

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn codes_are_distinct() {
    let errors = [
      Error::InvalidIdentifier { field: "id", value: "x".into() },
      Error::BookNotFound(Uuid::nil()),
      Error::AuthorNotFound(Uuid::nil()),
      Error::DuplicateIsbn("9780451524935".into()),
      Error::EmptyField("title"),
      Error::Store("connection refused".into()),
    ];
    let mut codes: Vec<_> = errors.iter().map(Error::code).collect();
    codes.sort_unstable();
    codes.dedup();
    assert_eq!(codes.len(), errors.len());
  }

  #[test]
  fn duplicate_isbn_message_names_the_isbn() {
    let err = Error::DuplicateIsbn("9780451524935".into());
    assert_eq!(
      err.to_string(),
      "a book with ISBN \"9780451524935\" already exists"
    );
  }
}
