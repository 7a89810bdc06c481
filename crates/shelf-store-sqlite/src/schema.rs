//! SQL schema for the Shelf SQLite store.
//!
//! Executed once at connection startup. Every statement is idempotent.

/// Full schema DDL; idempotent thanks to `IF NOT EXISTS`.
pub const SCHEMA: &str = "
PRAGMA journal_mode = WAL;
PRAGMA foreign_keys = ON;

CREATE TABLE IF NOT EXISTS authors (
    author_id   TEXT PRIMARY KEY,
    name        TEXT NOT NULL,
    nationality TEXT,
    birth_year  INTEGER
);

CREATE TABLE IF NOT EXISTS books (
    book_id          TEXT PRIMARY KEY,
    title            TEXT NOT NULL,
    author_id        TEXT NOT NULL REFERENCES authors(author_id),
    genre            TEXT NOT NULL,
    publication_year INTEGER NOT NULL,
    isbn             TEXT NOT NULL
);

CREATE INDEX IF NOT EXISTS books_genre_idx  ON books(genre);
CREATE INDEX IF NOT EXISTS books_author_idx ON books(author_id);

PRAGMA user_version = 1;
";

/// The uniqueness backstop for ISBNs. Also run by the seed fixture, so it must
/// stay safe to execute repeatedly.
pub const ISBN_INDEX: &str =
  "CREATE UNIQUE INDEX IF NOT EXISTS books_isbn_unique ON books(isbn);";

/// Tables exposed as collections.
pub const COLLECTIONS: [&str; 2] = ["authors", "books"];
