//! Encoding and decoding helpers between Rust domain types and the plain
//! column values stored in SQLite.
//!
//! UUIDs are stored as hyphenated lowercase strings. Years are stored as
//! `INTEGER` and narrowed back to `i32` on read.

use shelf_core::{author::Author, book::BookRecord};
use uuid::Uuid;

use crate::{Error, Result};

// ─── Uuid ─────────────────────────────────────────────────────────────────────

pub fn encode_uuid(id: Uuid) -> String { id.hyphenated().to_string() }

pub fn decode_uuid(s: &str) -> Result<Uuid> { Ok(Uuid::parse_str(s)?) }

// ─── Years ───────────────────────────────────────────────────────────────────

fn decode_year(column: &str, value: i64) -> Result<i32> {
  i32::try_from(value)
    .map_err(|_| Error::Decode(format!("{column} out of range: {value}")))
}

// ─── Column lists ────────────────────────────────────────────────────────────

pub const AUTHOR_COLUMNS: &str = "author_id, name, nationality, birth_year";

pub const BOOK_COLUMNS: &str =
  "book_id, title, author_id, genre, publication_year, isbn";

// ─── Row types ───────────────────────────────────────────────────────────────

/// Raw values read directly from an `authors` row.
pub struct RawAuthor {
  pub author_id:   String,
  pub name:        String,
  pub nationality: Option<String>,
  pub birth_year:  Option<i64>,
}

impl RawAuthor {
  /// Read a row selected with [`AUTHOR_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      author_id:   row.get(0)?,
      name:        row.get(1)?,
      nationality: row.get(2)?,
      birth_year:  row.get(3)?,
    })
  }

  pub fn into_author(self) -> Result<Author> {
    Ok(Author {
      id:          decode_uuid(&self.author_id)?,
      name:        self.name,
      nationality: self.nationality,
      birth_year:  self
        .birth_year
        .map(|y| decode_year("birth_year", y))
        .transpose()?,
    })
  }
}

/// Raw values read directly from a `books` row.
pub struct RawBook {
  pub book_id:          String,
  pub title:            String,
  pub author_id:        String,
  pub genre:            String,
  pub publication_year: i64,
  pub isbn:             String,
}

impl RawBook {
  /// Read a row selected with [`BOOK_COLUMNS`].
  pub fn from_row(row: &rusqlite::Row<'_>) -> rusqlite::Result<Self> {
    Ok(Self {
      book_id:          row.get(0)?,
      title:            row.get(1)?,
      author_id:        row.get(2)?,
      genre:            row.get(3)?,
      publication_year: row.get(4)?,
      isbn:             row.get(5)?,
    })
  }

  pub fn into_record(self) -> Result<BookRecord> {
    Ok(BookRecord {
      id:               decode_uuid(&self.book_id)?,
      title:            self.title,
      author_id:        decode_uuid(&self.author_id)?,
      genre:            self.genre,
      publication_year: decode_year("publication_year", self.publication_year)?,
      isbn:             self.isbn,
    })
  }
}
