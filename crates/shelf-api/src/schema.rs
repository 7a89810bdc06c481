//! GraphQL query and mutation roots.
//!
//! ```graphql
//! query {
//!   getBooksByGenre(genre: "Sci-Fi") { id title author { name } isbn }
//! }
//!
//! mutation {
//!   updateBook(id: "…", title: "Nineteen Eighty-Four") { id title }
//! }
//! ```

use async_graphql::{
  Context, EmptySubscription, ErrorExtensions as _, ID, Object, Schema,
};
use shelf_core::book::{BookUpdate, NewBookInput};

use crate::{
  catalog::CatalogHandle,
  types::{AuthorObject, BookObject},
};

/// The full GraphQL schema type for Shelf.
pub type ShelfSchema = Schema<QueryRoot, MutationRoot, EmptySubscription>;

/// Build the schema with the catalog injected as context data.
pub fn build_schema(catalog: CatalogHandle) -> ShelfSchema {
  Schema::build(QueryRoot, MutationRoot, EmptySubscription)
    .data(catalog)
    .finish()
}

/// Convert a catalog error, carrying its code in `extensions.code`.
fn graphql_error(err: shelf_core::Error) -> async_graphql::Error {
  if matches!(err, shelf_core::Error::Store(_)) {
    tracing::error!(error = %err, "catalog store failure");
  }
  let code = err.code();
  async_graphql::Error::new(err.to_string())
    .extend_with(|_, ext| ext.set("code", code.to_owned()))
}

fn catalog<'a>(ctx: &Context<'a>) -> async_graphql::Result<&'a CatalogHandle> {
  ctx.data::<CatalogHandle>()
}

// ─── Query ───────────────────────────────────────────────────────────────────

pub struct QueryRoot;

#[Object]
impl QueryRoot {
  /// Every book in the catalog.
  async fn get_all_books(
    &self,
    ctx: &Context<'_>,
  ) -> async_graphql::Result<Vec<BookObject>> {
    let books = catalog(ctx)?.list_books().await.map_err(graphql_error)?;
    Ok(books.into_iter().map(Into::into).collect())
  }

  /// A single book, or `null` if no book has this id.
  async fn get_book_details(
    &self,
    ctx: &Context<'_>,
    id: ID,
  ) -> async_graphql::Result<Option<BookObject>> {
    let book = catalog(ctx)?
      .get_book_details(&id)
      .await
      .map_err(graphql_error)?;
    Ok(book.map(Into::into))
  }

  /// Books whose genre equals `genre` exactly.
  async fn get_books_by_genre(
    &self,
    ctx: &Context<'_>,
    genre: String,
  ) -> async_graphql::Result<Vec<BookObject>> {
    let books = catalog(ctx)?
      .books_by_genre(&genre)
      .await
      .map_err(graphql_error)?;
    Ok(books.into_iter().map(Into::into).collect())
  }

  async fn get_all_authors(
    &self,
    ctx: &Context<'_>,
  ) -> async_graphql::Result<Vec<AuthorObject>> {
    let authors = catalog(ctx)?.list_authors().await.map_err(graphql_error)?;
    Ok(authors.into_iter().map(Into::into).collect())
  }

  /// Distinct genres across all books, in no particular order.
  async fn get_all_genres(
    &self,
    ctx: &Context<'_>,
  ) -> async_graphql::Result<Vec<String>> {
    catalog(ctx)?.list_genres().await.map_err(graphql_error)
  }
}

// ─── Mutation ────────────────────────────────────────────────────────────────

pub struct MutationRoot;

#[Object]
impl MutationRoot {
  /// Add a book. The ISBN must be unused and the author must exist.
  async fn add_book(
    &self,
    ctx: &Context<'_>,
    title: String,
    author_id: ID,
    genre: String,
    publication_year: i32,
    isbn: String,
  ) -> async_graphql::Result<BookObject> {
    let input = NewBookInput {
      title,
      author_id: author_id.0,
      genre,
      publication_year,
      isbn,
    };
    let book = catalog(ctx)?.add_book(input).await.map_err(graphql_error)?;
    Ok(book.into())
  }

  /// Change only the supplied fields of a book.
  async fn update_book(
    &self,
    ctx: &Context<'_>,
    id: ID,
    title: Option<String>,
    author_id: Option<ID>,
    genre: Option<String>,
    publication_year: Option<i32>,
    isbn: Option<String>,
  ) -> async_graphql::Result<BookObject> {
    let update = BookUpdate {
      title,
      author_id: author_id.map(|id| id.0),
      genre,
      publication_year,
      isbn,
    };
    let book = catalog(ctx)?
      .update_book(&id, update)
      .await
      .map_err(graphql_error)?;
    Ok(book.into())
  }
}
