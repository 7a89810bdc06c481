//! [`SqliteStore`]: the SQLite implementation of [`CatalogStore`].

use std::path::Path;

use rusqlite::{OptionalExtension as _, types::Value};
use uuid::Uuid;

use shelf_core::{
  author::{Author, NewAuthor},
  book::{BookPatch, BookRecord, NewBook},
  store::{BookFilter, CatalogStore},
};

use crate::{
  Error, Result,
  encode::{AUTHOR_COLUMNS, BOOK_COLUMNS, RawAuthor, RawBook, encode_uuid},
  schema::{COLLECTIONS, ISBN_INDEX, SCHEMA},
};

// ─── Store ───────────────────────────────────────────────────────────────────

/// A Shelf catalog backed by a single SQLite file.
///
/// Cloning is cheap; the inner connection is reference-counted.
#[derive(Clone)]
pub struct SqliteStore {
  conn: tokio_rusqlite::Connection,
}

impl SqliteStore {
  /// Open (or create) a store at `path` and run schema initialisation.
  pub async fn open(path: impl AsRef<Path>) -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open(path).await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  /// Open an in-memory store, mostly for tests.
  pub async fn open_in_memory() -> Result<Self> {
    let conn = tokio_rusqlite::Connection::open_in_memory().await?;
    let store = Self { conn };
    store.init_schema().await?;
    Ok(store)
  }

  async fn init_schema(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(SCHEMA)?;
        conn.execute_batch(ISBN_INDEX)?;
        Ok(())
      })
      .await?;
    Ok(())
  }
}

/// Translate a failed book write, singling out the ISBN unique index.
fn write_error(e: tokio_rusqlite::Error, isbn: Option<&str>) -> Error {
  let unique_violation = matches!(
    &e,
    tokio_rusqlite::Error::Rusqlite(rusqlite::Error::SqliteFailure(f, _))
      if f.extended_code == rusqlite::ffi::SQLITE_CONSTRAINT_UNIQUE
  );
  match isbn {
    Some(isbn) if unique_violation => Error::DuplicateIsbn(isbn.to_owned()),
    _ => Error::Database(e),
  }
}

// ─── CatalogStore impl ───────────────────────────────────────────────────────

impl CatalogStore for SqliteStore {
  type Error = Error;

  // ── Authors ───────────────────────────────────────────────────────────────

  async fn list_authors(&self) -> Result<Vec<Author>> {
    let raws: Vec<RawAuthor> = self
      .conn
      .call(|conn| {
        let mut stmt =
          conn.prepare(&format!("SELECT {AUTHOR_COLUMNS} FROM authors"))?;
        let rows = stmt
          .query_map([], RawAuthor::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawAuthor::into_author).collect()
  }

  async fn get_author(&self, id: Uuid) -> Result<Option<Author>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawAuthor> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {AUTHOR_COLUMNS} FROM authors WHERE author_id = ?1"),
              rusqlite::params![id_str],
              RawAuthor::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawAuthor::into_author).transpose()
  }

  async fn insert_author(&self, input: NewAuthor) -> Result<Author> {
    let author = Author {
      id:          Uuid::new_v4(),
      name:        input.name,
      nationality: input.nationality,
      birth_year:  input.birth_year,
    };

    let id_str      = encode_uuid(author.id);
    let name        = author.name.clone();
    let nationality = author.nationality.clone();
    let birth_year  = author.birth_year;

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO authors (author_id, name, nationality, birth_year)
           VALUES (?1, ?2, ?3, ?4)",
          rusqlite::params![id_str, name, nationality, birth_year],
        )?;
        Ok(())
      })
      .await?;

    Ok(author)
  }

  // ── Books ─────────────────────────────────────────────────────────────────

  async fn find_books(&self, filter: &BookFilter) -> Result<Vec<BookRecord>> {
    // Build WHERE clause dynamically.
    let mut conds: Vec<&'static str> = vec![];
    let mut params: Vec<Value> = vec![];
    if let Some(genre) = &filter.genre {
      conds.push("genre = ?");
      params.push(Value::Text(genre.clone()));
    }
    if let Some(isbn) = &filter.isbn {
      conds.push("isbn = ?");
      params.push(Value::Text(isbn.clone()));
    }
    if let Some(id) = filter.exclude_id {
      conds.push("book_id != ?");
      params.push(Value::Text(encode_uuid(id)));
    }

    let where_clause = if conds.is_empty() {
      String::new()
    } else {
      format!("WHERE {}", conds.join(" AND "))
    };
    let sql = format!("SELECT {BOOK_COLUMNS} FROM books {where_clause}");

    let raws: Vec<RawBook> = self
      .conn
      .call(move |conn| {
        let mut stmt = conn.prepare(&sql)?;
        let rows = stmt
          .query_map(rusqlite::params_from_iter(params), RawBook::from_row)?
          .collect::<rusqlite::Result<Vec<_>>>()?;
        Ok(rows)
      })
      .await?;

    raws.into_iter().map(RawBook::into_record).collect()
  }

  async fn get_book(&self, id: Uuid) -> Result<Option<BookRecord>> {
    let id_str = encode_uuid(id);

    let raw: Option<RawBook> = self
      .conn
      .call(move |conn| {
        Ok(
          conn
            .query_row(
              &format!("SELECT {BOOK_COLUMNS} FROM books WHERE book_id = ?1"),
              rusqlite::params![id_str],
              RawBook::from_row,
            )
            .optional()?,
        )
      })
      .await?;

    raw.map(RawBook::into_record).transpose()
  }

  async fn insert_book(&self, input: NewBook) -> Result<BookRecord> {
    let record = BookRecord {
      id:               Uuid::new_v4(),
      title:            input.title,
      author_id:        input.author_id,
      genre:            input.genre,
      publication_year: input.publication_year,
      isbn:             input.isbn,
    };

    let id_str        = encode_uuid(record.id);
    let author_id_str = encode_uuid(record.author_id);
    let title         = record.title.clone();
    let genre         = record.genre.clone();
    let year          = record.publication_year;
    let isbn          = record.isbn.clone();

    self
      .conn
      .call(move |conn| {
        conn.execute(
          "INSERT INTO books (
             book_id, title, author_id, genre, publication_year, isbn
           ) VALUES (?1, ?2, ?3, ?4, ?5, ?6)",
          rusqlite::params![id_str, title, author_id_str, genre, year, isbn],
        )?;
        Ok(())
      })
      .await
      .map_err(|e| write_error(e, Some(&record.isbn)))?;

    Ok(record)
  }

  async fn update_book(
    &self,
    id:    Uuid,
    patch: BookPatch,
  ) -> Result<Option<BookRecord>> {
    if patch.is_empty() {
      return self.get_book(id).await;
    }

    // Only supplied fields appear in the SET list.
    let mut sets: Vec<&'static str> = vec![];
    let mut params: Vec<Value> = vec![];
    if let Some(title) = &patch.title {
      sets.push("title = ?");
      params.push(Value::Text(title.clone()));
    }
    if let Some(author_id) = patch.author_id {
      sets.push("author_id = ?");
      params.push(Value::Text(encode_uuid(author_id)));
    }
    if let Some(genre) = &patch.genre {
      sets.push("genre = ?");
      params.push(Value::Text(genre.clone()));
    }
    if let Some(year) = patch.publication_year {
      sets.push("publication_year = ?");
      params.push(Value::Integer(i64::from(year)));
    }
    if let Some(isbn) = &patch.isbn {
      sets.push("isbn = ?");
      params.push(Value::Text(isbn.clone()));
    }

    let id_str = encode_uuid(id);
    params.push(Value::Text(id_str.clone()));
    let sql = format!("UPDATE books SET {} WHERE book_id = ?", sets.join(", "));

    let raw: Option<RawBook> = self
      .conn
      .call(move |conn| {
        let changed = conn.execute(&sql, rusqlite::params_from_iter(params))?;
        if changed == 0 {
          return Ok(None);
        }
        Ok(
          conn
            .query_row(
              &format!("SELECT {BOOK_COLUMNS} FROM books WHERE book_id = ?1"),
              rusqlite::params![id_str],
              RawBook::from_row,
            )
            .optional()?,
        )
      })
      .await
      .map_err(|e| write_error(e, patch.isbn.as_deref()))?;

    raw.map(RawBook::into_record).transpose()
  }

  async fn distinct_genres(&self) -> Result<Vec<String>> {
    let genres = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare("SELECT DISTINCT genre FROM books")?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    Ok(genres)
  }

  // ── Administration ────────────────────────────────────────────────────────

  async fn clear(&self) -> Result<()> {
    // Books first: they reference authors.
    self
      .conn
      .call(|conn| {
        let tx = conn.transaction()?;
        tx.execute("DELETE FROM books", [])?;
        tx.execute("DELETE FROM authors", [])?;
        tx.commit()?;
        Ok(())
      })
      .await?;
    Ok(())
  }

  async fn ensure_isbn_index(&self) -> Result<()> {
    self
      .conn
      .call(|conn| {
        conn.execute_batch(ISBN_INDEX)?;
        Ok(())
      })
      .await?;
    tracing::debug!("isbn unique index ensured");
    Ok(())
  }

  async fn collections(&self) -> Result<Vec<String>> {
    let mut tables = self
      .conn
      .call(|conn| {
        let mut stmt = conn.prepare(
          "SELECT name FROM sqlite_master WHERE type = 'table' ORDER BY name",
        )?;
        let rows = stmt
          .query_map([], |row| row.get(0))?
          .collect::<rusqlite::Result<Vec<String>>>()?;
        Ok(rows)
      })
      .await?;
    tables.retain(|t| COLLECTIONS.contains(&t.as_str()));
    Ok(tables)
  }
}
