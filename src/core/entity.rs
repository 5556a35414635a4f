//! Entity trait defining the core abstraction for all resource types

use crate::core::field::FieldValue;
use chrono::{DateTime, Utc};
use uuid::Uuid;

/// Base trait for all entities exposed through the REST layer.
///
/// An entity is an opaque record owned by the repository collaborator.
/// All entities have:
/// - id: Unique identifier
/// - created_at: Creation timestamp
/// - updated_at: Last modification timestamp
/// - deleted_at: Soft deletion timestamp (optional)
///
/// The dynamic accessors (`columns`, `field_value`) let generic code order,
/// filter and validate column selections without knowing the concrete type.
pub trait Entity: Clone + Send + Sync + 'static {
    /// The plural resource name used in URLs (e.g., "users", "companies")
    fn resource_name() -> &'static str;

    /// The singular resource name (e.g., "user", "company")
    fn resource_name_singular() -> &'static str;

    // === Core Entity Fields ===

    /// Get the unique identifier for this entity instance
    fn id(&self) -> Uuid;

    /// Get the creation timestamp
    fn created_at(&self) -> DateTime<Utc>;

    /// Get the last update timestamp
    fn updated_at(&self) -> DateTime<Utc>;

    /// Get the deletion timestamp (soft delete)
    fn deleted_at(&self) -> Option<DateTime<Utc>>;

    // === Dynamic Field Access ===

    /// Names of the fields a client may select via the `columns` parameter
    fn columns() -> &'static [&'static str];

    /// Fields searched by the free-text `search` parameter
    fn searchable_fields() -> &'static [&'static str] {
        &[]
    }

    /// Get the value of a specific field by name
    fn field_value(&self, field: &str) -> Option<FieldValue>;

    // === Utility Methods ===

    /// Check if the entity has been soft-deleted
    fn is_deleted(&self) -> bool {
        self.deleted_at().is_some()
    }
}

/// Mutation hooks for entity types that repositories can materialize from
/// flat field mappings.
///
/// The `api_entity!` macro generates an implementation; hand-rolled entity
/// types implement this to become usable with the in-memory repository.
pub trait Storable: Entity {
    /// Build a new entity from a flat field mapping; missing or ill-typed
    /// fields are domain errors
    fn from_fields(fields: &serde_json::Value) -> anyhow::Result<Self>;

    /// Apply the fields present in the mapping to an existing entity,
    /// refreshing its update timestamp
    fn apply_fields(&mut self, fields: &serde_json::Value) -> anyhow::Result<()>;

    /// Mark the entity soft-deleted
    fn soft_delete(&mut self);

    /// Clear the soft-delete marker
    fn restore_deleted(&mut self);
}

#[cfg(test)]
mod tests {
    use super::*;

    #[derive(Clone, Debug)]
    struct TestEntity {
        id: Uuid,
        name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    }

    impl Entity for TestEntity {
        fn resource_name() -> &'static str {
            "test_entities"
        }

        fn resource_name_singular() -> &'static str {
            "test_entity"
        }

        fn id(&self) -> Uuid {
            self.id
        }

        fn created_at(&self) -> DateTime<Utc> {
            self.created_at
        }

        fn updated_at(&self) -> DateTime<Utc> {
            self.updated_at
        }

        fn deleted_at(&self) -> Option<DateTime<Utc>> {
            self.deleted_at
        }

        fn columns() -> &'static [&'static str] {
            &["id", "name"]
        }

        fn field_value(&self, field: &str) -> Option<FieldValue> {
            match field {
                "id" => Some(FieldValue::Uuid(self.id)),
                "name" => Some(FieldValue::String(self.name.clone())),
                _ => None,
            }
        }
    }

    fn make_entity(name: &str) -> TestEntity {
        let now = Utc::now();
        TestEntity {
            id: Uuid::new_v4(),
            name: name.to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_entity_is_deleted() {
        let mut entity = make_entity("test");

        assert!(!entity.is_deleted());

        entity.deleted_at = Some(Utc::now());
        assert!(entity.is_deleted());
    }

    #[test]
    fn test_entity_metadata() {
        assert_eq!(TestEntity::resource_name(), "test_entities");
        assert_eq!(TestEntity::resource_name_singular(), "test_entity");
        assert!(TestEntity::columns().contains(&"name"));
    }

    #[test]
    fn test_field_value_dispatch() {
        let entity = make_entity("widget");

        assert_eq!(
            entity.field_value("name"),
            Some(FieldValue::String("widget".to_string()))
        );
        assert_eq!(entity.field_value("unknown"), None);
    }
}
