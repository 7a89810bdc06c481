//! Book types.
//!
//! A book is stored with a reference to its author ([`BookRecord`]) and
//! presented with that reference resolved ([`Book`]). The join happens at
//! read time; nothing about the author is copied into the stored record.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

use crate::author::Author;

// ─── Stored shape ────────────────────────────────────────────────────────────

/// A book exactly as the document store holds it.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct BookRecord {
  pub id:               Uuid,
  pub title:            String,
  pub author_id:        Uuid,
  pub genre:            String,
  pub publication_year: i32,
  pub isbn:             String,
}

impl BookRecord {
  /// Attach the resolved author. The caller guarantees
  /// `author.id == self.author_id`.
  pub fn resolve(self, author: Author) -> Book {
    debug_assert_eq!(author.id, self.author_id);
    Book {
      id:               self.id,
      title:            self.title,
      author,
      genre:            self.genre,
      publication_year: self.publication_year,
      isbn:             self.isbn,
    }
  }
}

// ─── API shape ───────────────────────────────────────────────────────────────

/// A book with its author reference followed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Book {
  pub id:               Uuid,
  pub title:            String,
  pub author:           Author,
  pub genre:            String,
  pub publication_year: i32,
  pub isbn:             String,
}

// ─── Store inputs ────────────────────────────────────────────────────────────

/// Input to [`crate::store::CatalogStore::insert_book`]. The identifier is
/// assigned by the store.
#[derive(Debug, Clone)]
pub struct NewBook {
  pub title:            String,
  pub author_id:        Uuid,
  pub genre:            String,
  pub publication_year: i32,
  pub isbn:             String,
}

/// A partial update: `None` leaves the stored field untouched.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BookPatch {
  pub title:            Option<String>,
  pub author_id:        Option<Uuid>,
  pub genre:            Option<String>,
  pub publication_year: Option<i32>,
  pub isbn:             Option<String>,
}

impl BookPatch {
  pub fn is_empty(&self) -> bool { *self == Self::default() }
}

// ─── Service inputs ──────────────────────────────────────────────────────────

/// Arguments of the `addBook` operation, identifiers still in wire form.
#[derive(Debug, Clone)]
pub struct NewBookInput {
  pub title:            String,
  pub author_id:        String,
  pub genre:            String,
  pub publication_year: i32,
  pub isbn:             String,
}

/// Arguments of the `updateBook` operation (minus the book id). Every field
/// is optional; omitted fields are left as they are.
#[derive(Debug, Clone, Default)]
pub struct BookUpdate {
  pub title:            Option<String>,
  pub author_id:        Option<String>,
  pub genre:            Option<String>,
  pub publication_year: Option<i32>,
  pub isbn:             Option<String>,
}
