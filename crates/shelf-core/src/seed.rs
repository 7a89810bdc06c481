//! The fixed catalog fixture.
//!
//! [`seed`] wipes both collections, repopulates them and then (re)creates the
//! ISBN unique index. It is an administrative tool for establishing a known
//! state, not part of the catalog's runtime contract.

use std::collections::BTreeSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

use crate::{
  Error, Result,
  author::NewAuthor,
  book::NewBook,
  store::CatalogStore,
};

// ─── Fixture ─────────────────────────────────────────────────────────────────

/// `(name, nationality, birth year)`
const AUTHORS: &[(&str, &str, i32)] = &[
  ("George Orwell", "British", 1903),
  ("Isaac Asimov", "American", 1920),
  ("Agatha Christie", "British", 1890),
  ("J.K. Rowling", "British", 1965),
  ("Stephen King", "American", 1947),
];

/// `(title, index into AUTHORS, genre, publication year, isbn)`
const BOOKS: &[(&str, usize, &str, i32, &str)] = &[
  ("1984", 0, "Sci-Fi", 1949, "9780451524935"),
  ("Animal Farm", 0, "Political Satire", 1945, "9780451526342"),
  ("Foundation", 1, "Sci-Fi", 1951, "9780553803716"),
  ("I, Robot", 1, "Sci-Fi", 1950, "9780553294385"),
  ("The Murder of Roger Ackroyd", 2, "Mystery", 1926, "9780007527526"),
  ("And Then There Were None", 2, "Mystery", 1939, "9780062073488"),
  ("Harry Potter and the Philosopher's Stone", 3, "Fantasy", 1997, "9780747532699"),
  ("Harry Potter and the Chamber of Secrets", 3, "Fantasy", 1998, "9780747538493"),
  ("The Shining", 4, "Horror", 1977, "9780307743657"),
  ("It", 4, "Horror", 1986, "9781501142970"),
  ("The Stand", 4, "Horror", 1978, "9780307743688"),
];

// ─── Report ──────────────────────────────────────────────────────────────────

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeededAuthor {
  pub name:        String,
  pub nationality: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeededBook {
  pub title: String,
  pub genre: String,
  pub year:  i32,
}

/// Summary of a completed seed run.
#[derive(Debug, Clone, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SeedReport {
  pub authors_created: usize,
  pub books_created:   usize,
  /// Distinct genres in the fixture, sorted.
  pub genres:          Vec<String>,
  pub authors:         Vec<SeededAuthor>,
  pub books:           Vec<SeededBook>,
  pub seeded_at:       DateTime<Utc>,
}

// ─── Seeding ─────────────────────────────────────────────────────────────────

/// Replace the store's contents with the fixture.
pub async fn seed<S: CatalogStore>(store: &S) -> Result<SeedReport> {
  let store_error = |e: S::Error| Error::Store(Box::new(e));

  tracing::info!("clearing existing catalog data");
  store.clear().await.map_err(store_error)?;

  let mut authors = Vec::with_capacity(AUTHORS.len());
  for &(name, nationality, birth_year) in AUTHORS {
    let author = store
      .insert_author(NewAuthor {
        name:        name.to_owned(),
        nationality: Some(nationality.to_owned()),
        birth_year:  Some(birth_year),
      })
      .await
      .map_err(store_error)?;
    authors.push(author);
  }
  tracing::info!(count = authors.len(), "seeded authors");

  let mut books = Vec::with_capacity(BOOKS.len());
  for &(title, author, genre, publication_year, isbn) in BOOKS {
    let book = store
      .insert_book(NewBook {
        title: title.to_owned(),
        author_id: authors[author].id,
        genre: genre.to_owned(),
        publication_year,
        isbn: isbn.to_owned(),
      })
      .await
      .map_err(store_error)?;
    books.push(book);
  }
  tracing::info!(count = books.len(), "seeded books");

  store.ensure_isbn_index().await.map_err(store_error)?;

  let genres: BTreeSet<&str> = books.iter().map(|b| b.genre.as_str()).collect();

  Ok(SeedReport {
    authors_created: authors.len(),
    books_created:   books.len(),
    genres:          genres.into_iter().map(str::to_owned).collect(),
    authors:         authors
      .into_iter()
      .map(|a| SeededAuthor { name: a.name, nationality: a.nationality })
      .collect(),
    books:           books
      .into_iter()
      .map(|b| SeededBook {
        title: b.title,
        genre: b.genre,
        year:  b.publication_year,
      })
      .collect(),
    seeded_at:       Utc::now(),
  })
}
