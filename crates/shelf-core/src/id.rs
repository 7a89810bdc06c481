//! Conversion between wire identifiers and store identifiers.
//!
//! Identifiers travel as opaque strings. Internally every entity is keyed by
//! a [`Uuid`]; malformed text is rejected here, before any store access.

use uuid::Uuid;

use crate::{Error, Result};

/// Parse a wire identifier supplied for `field` (e.g. `"id"`, `"authorId"`).
pub fn parse_id(field: &'static str, raw: &str) -> Result<Uuid> {
  Uuid::parse_str(raw).map_err(|_| Error::InvalidIdentifier {
    field,
    value: raw.to_owned(),
  })
}

#[cfg(test)]
mod tests {
  use super::*;

  #[test]
  fn accepts_hyphenated_and_simple_forms() {
    let id = Uuid::new_v4();
    assert_eq!(parse_id("id", &id.hyphenated().to_string()).unwrap(), id);
    assert_eq!(parse_id("id", &id.simple().to_string()).unwrap(), id);
  }

  #[test]
  fn rejects_garbage() {
    let err = parse_id("id", "not-a-valid-id").unwrap_err();
    assert!(matches!(
      err,
      Error::InvalidIdentifier { field: "id", ref value } if value == "not-a-valid-id"
    ));
  }

  #[test]
  fn rejects_empty() {
    assert!(parse_id("authorId", "").is_err());
  }
}
