//! Authors, referenced by books, never owned by them.

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A persisted author. Created by the seed fixture; the catalog service never
/// updates or deletes authors.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Author {
  pub id:          Uuid,
  pub name:        String,
  pub nationality: Option<String>,
  pub birth_year:  Option<i32>,
}

/// Input to [`crate::store::CatalogStore::insert_author`].
/// The identifier is always assigned by the store.
#[derive(Debug, Clone)]
pub struct NewAuthor {
  pub name:        String,
  pub nationality: Option<String>,
  pub birth_year:  Option<i32>,
}

impl NewAuthor {
  pub fn new(name: impl Into<String>) -> Self {
    Self { name: name.into(), nationality: None, birth_year: None }
  }
}
