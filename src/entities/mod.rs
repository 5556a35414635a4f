//! Entity definition helpers

pub mod macros;

use anyhow::{Result, anyhow};
use serde::de::DeserializeOwned;
use serde_json::Value;

/// Extract and deserialize a required field from a flat field mapping.
///
/// Used by the `api_entity!` generated `Storable::from_fields`.
pub fn required_field<F: DeserializeOwned>(fields: &Value, name: &str) -> Result<F> {
    let value = fields
        .get(name)
        .ok_or_else(|| anyhow!("missing field '{}'", name))?;
    typed_field(value, name)
}

/// Deserialize a single field value, reporting the field name on failure
pub fn typed_field<F: DeserializeOwned>(value: &Value, name: &str) -> Result<F> {
    serde_json::from_value(value.clone())
        .map_err(|e| anyhow!("invalid value for field '{}': {}", name, e))
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_entity;
    use crate::core::entity::{Entity, Storable};
    use serde_json::json;

    api_entity!(Book, "book", "books", ["name", "author"], {
        author: String,
        pages: i64,
    });

    #[test]
    fn test_new_sets_base_fields() {
        let book = Book::new("Dune".to_string(), "Herbert".to_string(), 412);
        assert_eq!(book.name, "Dune");
        assert!(book.deleted_at.is_none());
        assert_eq!(book.created_at, book.updated_at);
    }

    #[test]
    fn test_resource_names_and_columns() {
        assert_eq!(Book::resource_name(), "books");
        assert_eq!(Book::resource_name_singular(), "book");
        assert_eq!(Book::columns(), &["id", "name", "author", "pages"]);
        assert_eq!(Book::searchable_fields(), &["name", "author"]);
    }

    #[test]
    fn test_field_value_covers_base_and_custom_fields() {
        let book = Book::new("Dune".to_string(), "Herbert".to_string(), 412);

        assert_eq!(
            book.field_value("author").unwrap().as_string(),
            Some("Herbert")
        );
        assert_eq!(book.field_value("pages").unwrap().as_integer(), Some(412));
        assert!(book.field_value("id").unwrap().as_uuid().is_some());
        assert!(book.field_value("deleted_at").unwrap().is_null());
        assert!(book.field_value("nonexistent").is_none());
    }

    #[test]
    fn test_from_fields() {
        let book =
            Book::from_fields(&json!({"name": "Dune", "author": "Herbert", "pages": 412})).unwrap();
        assert_eq!(book.author, "Herbert");
        assert_eq!(book.pages, 412);
    }

    #[test]
    fn test_from_fields_missing_field() {
        let err = Book::from_fields(&json!({"name": "Dune"})).unwrap_err();
        assert!(err.to_string().contains("author"));
    }

    #[test]
    fn test_from_fields_wrong_type() {
        let err = Book::from_fields(&json!({"name": "Dune", "author": "H", "pages": "lots"}))
            .unwrap_err();
        assert!(err.to_string().contains("pages"));
    }

    #[test]
    fn test_apply_fields_is_partial() {
        let mut book = Book::new("Dune".to_string(), "Herbert".to_string(), 412);
        book.apply_fields(&json!({"pages": 500})).unwrap();
        assert_eq!(book.pages, 500);
        assert_eq!(book.author, "Herbert");
    }

    #[test]
    fn test_soft_delete_and_restore() {
        let mut book = Book::new("Dune".to_string(), "Herbert".to_string(), 412);

        book.soft_delete();
        assert!(book.is_deleted());

        book.restore_deleted();
        assert!(!book.is_deleted());
        assert!(book.deleted_at.is_none());
    }
}
