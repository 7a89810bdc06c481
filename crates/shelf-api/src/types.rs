//! GraphQL output types and the mapping from core entities.
//!
//! Every read path goes through these `From` impls, so identifier
//! stringification and optional fields are handled in one place.

use async_graphql::{ID, SimpleObject};
use shelf_core::{author::Author, book::Book};

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Author")]
pub struct AuthorObject {
  pub id:          ID,
  pub name:        String,
  pub nationality: Option<String>,
  pub birth_year:  Option<i32>,
}

impl From<Author> for AuthorObject {
  fn from(a: Author) -> Self {
    Self {
      id:          ID(a.id.to_string()),
      name:        a.name,
      nationality: a.nationality,
      birth_year:  a.birth_year,
    }
  }
}

#[derive(Debug, Clone, SimpleObject)]
#[graphql(name = "Book")]
pub struct BookObject {
  pub id:               ID,
  pub title:            String,
  pub author:           AuthorObject,
  pub genre:            String,
  pub publication_year: i32,
  pub isbn:             String,
}

impl From<Book> for BookObject {
  fn from(b: Book) -> Self {
    Self {
      id:               ID(b.id.to_string()),
      title:            b.title,
      author:           b.author.into(),
      genre:            b.genre,
      publication_year: b.publication_year,
      isbn:             b.isbn,
    }
  }
}
