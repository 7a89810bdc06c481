//! GraphQL documents executed against a schema over an in-memory store.

use std::sync::Arc;

use async_graphql::{Request, Variables};
use serde_json::{Value, json};
use shelf_core::{
  CatalogService,
  author::{Author, NewAuthor},
  seed,
  store::CatalogStore,
};
use shelf_store_sqlite::SqliteStore;

use crate::{CatalogHandle, ShelfSchema, build_schema};

async fn setup() -> (ShelfSchema, Arc<SqliteStore>) {
  let store = Arc::new(SqliteStore::open_in_memory().await.unwrap());
  let catalog: CatalogHandle =
    Arc::new(CatalogService::new(Arc::clone(&store)));
  (build_schema(catalog), store)
}

async fn run(schema: &ShelfSchema, query: &str, vars: Value) -> Value {
  let req = Request::new(query).variables(Variables::from_json(vars));
  serde_json::to_value(schema.execute(req).await).unwrap()
}

fn error_code(resp: &Value) -> &str {
  resp["errors"][0]["extensions"]["code"].as_str().unwrap_or_default()
}

async fn orwell(store: &SqliteStore) -> Author {
  store
    .insert_author(NewAuthor {
      name:        "George Orwell".into(),
      nationality: Some("British".into()),
      birth_year:  Some(1903),
    })
    .await
    .unwrap()
}

const ADD_BOOK: &str = r#"
  mutation Add($authorId: ID!, $isbn: String!, $title: String!) {
    addBook(
      title: $title, authorId: $authorId, genre: "Sci-Fi",
      publicationYear: 1949, isbn: $isbn
    ) {
      id title genre publicationYear isbn
      author { id name }
    }
  }
"#;

// ─── Queries ─────────────────────────────────────────────────────────────────

#[tokio::test]
async fn all_books_carry_resolved_authors_in_camel_case() {
  let (schema, store) = setup().await;
  seed::seed(store.as_ref()).await.unwrap();

  let resp = run(
    &schema,
    "{ getAllBooks { title publicationYear author { name birthYear } } }",
    json!({}),
  )
  .await;

  let books = resp["data"]["getAllBooks"].as_array().unwrap();
  assert_eq!(books.len(), 11);
  let nineteen = books.iter().find(|b| b["title"] == "1984").unwrap();
  assert_eq!(nineteen["publicationYear"], 1949);
  assert_eq!(nineteen["author"]["name"], "George Orwell");
  assert_eq!(nineteen["author"]["birthYear"], 1903);
}

#[tokio::test]
async fn book_details_malformed_id_is_invalid_identifier() {
  let (schema, _) = setup().await;
  let resp = run(
    &schema,
    r#"{ getBookDetails(id: "not-a-valid-id") { title } }"#,
    json!({}),
  )
  .await;
  assert_eq!(error_code(&resp), "INVALID_IDENTIFIER");
}

#[tokio::test]
async fn book_details_unknown_id_is_null() {
  let (schema, _) = setup().await;
  let resp = run(
    &schema,
    r#"{ getBookDetails(id: "6f1c1c1e-8a4f-4c1e-9d7a-3c0b2b8f1a00") { title } }"#,
    json!({}),
  )
  .await;
  assert!(resp.get("errors").is_none(), "unexpected errors: {resp}");
  assert_eq!(resp["data"]["getBookDetails"], Value::Null);
}

#[tokio::test]
async fn books_by_genre_is_exact() {
  let (schema, store) = setup().await;
  seed::seed(store.as_ref()).await.unwrap();

  let resp = run(
    &schema,
    r#"{ getBooksByGenre(genre: "Horror") { title genre } }"#,
    json!({}),
  )
  .await;
  let books = resp["data"]["getBooksByGenre"].as_array().unwrap();
  assert_eq!(books.len(), 3);
  assert!(books.iter().all(|b| b["genre"] == "Horror"));

  let resp = run(
    &schema,
    r#"{ getBooksByGenre(genre: "horror") { title } }"#,
    json!({}),
  )
  .await;
  assert_eq!(resp["data"]["getBooksByGenre"], json!([]));
}

#[tokio::test]
async fn all_authors_expose_optional_fields() {
  let (schema, store) = setup().await;
  orwell(&store).await;
  store.insert_author(NewAuthor::new("Anonymous")).await.unwrap();

  let resp = run(
    &schema,
    "{ getAllAuthors { name nationality birthYear } }",
    json!({}),
  )
  .await;
  let authors = resp["data"]["getAllAuthors"].as_array().unwrap();
  assert_eq!(authors.len(), 2);
  let anon = authors.iter().find(|a| a["name"] == "Anonymous").unwrap();
  assert_eq!(anon["nationality"], Value::Null);
  assert_eq!(anon["birthYear"], Value::Null);
}

// ─── Mutations ───────────────────────────────────────────────────────────────

#[tokio::test]
async fn add_book_then_duplicate_isbn_is_rejected() {
  let (schema, store) = setup().await;
  let author = orwell(&store).await;
  let vars = json!({
    "authorId": author.id.to_string(),
    "isbn": "9780451524935",
    "title": "1984",
  });

  let first = run(&schema, ADD_BOOK, vars.clone()).await;
  assert!(first.get("errors").is_none(), "unexpected errors: {first}");
  assert_eq!(first["data"]["addBook"]["author"]["name"], "George Orwell");
  assert_eq!(first["data"]["addBook"]["publicationYear"], 1949);

  let second = run(&schema, ADD_BOOK, vars).await;
  assert_eq!(error_code(&second), "DUPLICATE_ISBN");

  let genres = run(&schema, "{ getAllGenres }", json!({})).await;
  assert_eq!(genres["data"]["getAllGenres"], json!(["Sci-Fi"]));
}

#[tokio::test]
async fn add_book_unknown_author_is_rejected() {
  let (schema, _) = setup().await;
  let vars = json!({
    "authorId": "6f1c1c1e-8a4f-4c1e-9d7a-3c0b2b8f1a00",
    "isbn": "9780451524935",
    "title": "1984",
  });

  let resp = run(&schema, ADD_BOOK, vars).await;
  assert_eq!(error_code(&resp), "AUTHOR_NOT_FOUND");

  let all = run(&schema, "{ getAllBooks { id } }", json!({})).await;
  assert_eq!(all["data"]["getAllBooks"], json!([]));
}

#[tokio::test]
async fn add_book_blank_title_is_empty_field() {
  let (schema, store) = setup().await;
  let author = orwell(&store).await;
  let vars = json!({
    "authorId": author.id.to_string(),
    "isbn": "9780451524935",
    "title": "   ",
  });

  let resp = run(&schema, ADD_BOOK, vars).await;
  assert_eq!(error_code(&resp), "EMPTY_FIELD");
}

#[tokio::test]
async fn update_book_changes_only_supplied_fields() {
  let (schema, store) = setup().await;
  let author = orwell(&store).await;
  let added = run(
    &schema,
    ADD_BOOK,
    json!({
      "authorId": author.id.to_string(),
      "isbn": "9780451524935",
      "title": "1984",
    }),
  )
  .await;
  let id = added["data"]["addBook"]["id"].as_str().unwrap().to_owned();

  let resp = run(
    &schema,
    r#"
      mutation Rename($id: ID!) {
        updateBook(id: $id, title: "Nineteen Eighty-Four") {
          id title genre publicationYear isbn author { name }
        }
      }
    "#,
    json!({ "id": id }),
  )
  .await;

  let book = &resp["data"]["updateBook"];
  assert_eq!(book["id"], id.as_str());
  assert_eq!(book["title"], "Nineteen Eighty-Four");
  assert_eq!(book["genre"], "Sci-Fi");
  assert_eq!(book["publicationYear"], 1949);
  assert_eq!(book["isbn"], "9780451524935");
  assert_eq!(book["author"]["name"], "George Orwell");
}

#[tokio::test]
async fn update_unknown_book_is_book_not_found() {
  let (schema, _) = setup().await;
  let resp = run(
    &schema,
    r#"
      mutation {
        updateBook(id: "6f1c1c1e-8a4f-4c1e-9d7a-3c0b2b8f1a00", genre: "Horror") {
          id
        }
      }
    "#,
    json!({}),
  )
  .await;
  assert_eq!(error_code(&resp), "BOOK_NOT_FOUND");
}
