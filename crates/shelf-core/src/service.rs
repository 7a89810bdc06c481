//! [`CatalogService`]: the query/mutation layer over a [`CatalogStore`].
//!
//! The service owns no state of its own. It validates identifiers before any
//! store access, gates writes on the ISBN-uniqueness and author-reference
//! invariants, and resolves the author of every book it returns.
//!
//! The uniqueness check and the insert are two separate store calls, so two
//! concurrent writers can both pass the check. The store's unique index
//! rejects the loser, and that rejection is reported as
//! [`Error::DuplicateIsbn`] like any other collision.

use std::{collections::HashMap, sync::Arc};

use uuid::Uuid;

use crate::{
  Error, Result,
  author::Author,
  book::{Book, BookPatch, BookRecord, BookUpdate, NewBook, NewBookInput},
  id::parse_id,
  store::{BookFilter, CatalogStore, StoreError},
};

// ─── Service ─────────────────────────────────────────────────────────────────

/// Catalog operations over a shared store handle.
///
/// Cloning is cheap; the store is reference-counted.
pub struct CatalogService<S> {
  store: Arc<S>,
}

impl<S> Clone for CatalogService<S> {
  fn clone(&self) -> Self { Self { store: Arc::clone(&self.store) } }
}

impl<S: CatalogStore> CatalogService<S> {
  pub fn new(store: Arc<S>) -> Self { Self { store } }

  /// The underlying store, for administrative callers (seeding, health).
  pub fn store(&self) -> &Arc<S> { &self.store }

  // ── Queries ───────────────────────────────────────────────────────────

  /// `getAllBooks`: every book, in store order.
  pub async fn list_books(&self) -> Result<Vec<Book>> {
    let records = self
      .store
      .find_books(&BookFilter::default())
      .await
      .map_err(store_error)?;
    self.resolve_all(records).await
  }

  /// `getBookDetails`: `Ok(None)` when no book has this id.
  pub async fn get_book_details(&self, id: &str) -> Result<Option<Book>> {
    let id = parse_id("id", id)?;
    match self.store.get_book(id).await.map_err(store_error)? {
      Some(record) => self.resolve(record).await.map(Some),
      None => Ok(None),
    }
  }

  /// `getBooksByGenre`: exact, case-sensitive match on the genre.
  pub async fn books_by_genre(&self, genre: &str) -> Result<Vec<Book>> {
    let filter = BookFilter::genre(genre);
    let records = self.store.find_books(&filter).await.map_err(store_error)?;
    self.resolve_all(records).await
  }

  /// `getAllAuthors`
  pub async fn list_authors(&self) -> Result<Vec<Author>> {
    self.store.list_authors().await.map_err(store_error)
  }

  /// `getAllGenres`: distinct genres, recomputed from the books on every
  /// call.
  pub async fn list_genres(&self) -> Result<Vec<String>> {
    self.store.distinct_genres().await.map_err(store_error)
  }

  // ── Mutations ─────────────────────────────────────────────────────────

  /// `addBook`
  pub async fn add_book(&self, input: NewBookInput) -> Result<Book> {
    require_text("title", &input.title)?;
    require_text("genre", &input.genre)?;
    require_text("isbn", &input.isbn)?;
    let author_id = parse_id("authorId", &input.author_id)?;

    self.ensure_isbn_free(&input.isbn, None).await?;
    let author = self.author(author_id).await?;

    let isbn = input.isbn.clone();
    let record = self
      .store
      .insert_book(NewBook {
        title: input.title,
        author_id,
        genre: input.genre,
        publication_year: input.publication_year,
        isbn: input.isbn,
      })
      .await
      .map_err(|e| write_error(e, &isbn))?;

    tracing::debug!(book_id = %record.id, isbn = %record.isbn, "book added");
    Ok(record.resolve(author))
  }

  /// `updateBook`: merges the supplied fields into the stored book.
  pub async fn update_book(&self, id: &str, update: BookUpdate) -> Result<Book> {
    let id = parse_id("id", id)?;
    let current = self
      .store
      .get_book(id)
      .await
      .map_err(store_error)?
      .ok_or(Error::BookNotFound(id))?;

    if let Some(title) = &update.title {
      require_text("title", title)?;
    }
    if let Some(genre) = &update.genre {
      require_text("genre", genre)?;
    }
    if let Some(isbn) = &update.isbn {
      require_text("isbn", isbn)?;
      if *isbn != current.isbn {
        self.ensure_isbn_free(isbn, Some(id)).await?;
      }
    }

    let author_id = update
      .author_id
      .as_deref()
      .map(|raw| parse_id("authorId", raw))
      .transpose()?;
    let new_author = match author_id {
      Some(author_id) if author_id != current.author_id => {
        Some(self.author(author_id).await?)
      }
      _ => None,
    };

    let patch = BookPatch {
      title: update.title,
      author_id,
      genre: update.genre,
      publication_year: update.publication_year,
      isbn: update.isbn,
    };
    if patch.is_empty() {
      return self.resolve(current).await;
    }

    let isbn = patch.isbn.clone().unwrap_or_default();
    let record = self
      .store
      .update_book(id, patch)
      .await
      .map_err(|e| write_error(e, &isbn))?
      .ok_or(Error::BookNotFound(id))?;

    tracing::debug!(book_id = %record.id, "book updated");
    match new_author {
      Some(author) => Ok(record.resolve(author)),
      None => self.resolve(record).await,
    }
  }

  // ── Helpers ───────────────────────────────────────────────────────────

  async fn author(&self, id: Uuid) -> Result<Author> {
    self
      .store
      .get_author(id)
      .await
      .map_err(store_error)?
      .ok_or(Error::AuthorNotFound(id))
  }

  /// Fail with [`Error::DuplicateIsbn`] if any book other than `except`
  /// already carries `isbn`.
  async fn ensure_isbn_free(&self, isbn: &str, except: Option<Uuid>) -> Result<()> {
    let mut filter = BookFilter::isbn(isbn);
    if let Some(id) = except {
      filter = filter.excluding(id);
    }
    let clashes = self.store.find_books(&filter).await.map_err(store_error)?;
    if clashes.is_empty() {
      Ok(())
    } else {
      Err(Error::DuplicateIsbn(isbn.to_owned()))
    }
  }

  async fn resolve(&self, record: BookRecord) -> Result<Book> {
    let author = self.author(record.author_id).await?;
    Ok(record.resolve(author))
  }

  /// Resolve authors for a batch of books with a single author scan.
  async fn resolve_all(&self, records: Vec<BookRecord>) -> Result<Vec<Book>> {
    if records.is_empty() {
      return Ok(Vec::new());
    }

    let authors: HashMap<Uuid, Author> = self
      .store
      .list_authors()
      .await
      .map_err(store_error)?
      .into_iter()
      .map(|a| (a.id, a))
      .collect();

    records
      .into_iter()
      .map(|record| {
        let author = authors
          .get(&record.author_id)
          .cloned()
          .ok_or(Error::AuthorNotFound(record.author_id))?;
        Ok(record.resolve(author))
      })
      .collect()
  }
}

// ─── Error mapping ───────────────────────────────────────────────────────────

fn store_error<E: StoreError>(e: E) -> Error { Error::Store(Box::new(e)) }

/// Map a failed write, turning a unique-index rejection into a duplicate.
fn write_error<E: StoreError>(e: E, isbn: &str) -> Error {
  if e.is_duplicate_isbn() {
    tracing::warn!(isbn, "unique index rejected ISBN that passed the pre-check");
    Error::DuplicateIsbn(isbn.to_owned())
  } else {
    store_error(e)
  }
}

fn require_text(field: &'static str, value: &str) -> Result<()> {
  if value.trim().is_empty() {
    Err(Error::EmptyField(field))
  } else {
    Ok(())
  }
}

// ─── Tests ───────────────────────────────────────────────────────────────────
