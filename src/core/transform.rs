//! Resource transformation: entity to flat field mapping, plus the
//! relation capability table used for eager-loaded includes
//!
//! Relation inclusion is deliberately lenient: an include name is honored
//! only when a loader was registered under that name; unknown names and
//! loader failures are silently skipped (logged at debug), never an error.

use crate::core::entity::Entity;
use crate::core::error::{ApiError, ApiResult};
use anyhow::Result;
use indexmap::IndexMap;
use serde::Serialize;
use serde_json::Value;
use std::collections::HashMap;
use std::sync::Arc;

/// Flat field mapping produced for one entity; insertion order is the
/// order fields serialize in.
pub type FieldMap = IndexMap<String, Value>;

/// Turns an entity into the flat field mapping placed under `data`.
///
/// Implementations must not depend on request state; one transformer
/// instance serves every request for its entity type.
pub trait Transformer<T: Entity>: Send + Sync {
    fn transform(&self, entity: &T) -> ApiResult<FieldMap>;
}

/// Transformer that serializes the entity as-is through serde.
///
/// The output carries every serialized field, including timestamps and the
/// soft-delete timestamp (`deleted_at` is `null` for live entities).
#[derive(Debug, Clone, Copy, Default)]
pub struct DefaultTransformer;

impl<T: Entity + Serialize> Transformer<T> for DefaultTransformer {
    fn transform(&self, entity: &T) -> ApiResult<FieldMap> {
        let value = serde_json::to_value(entity)
            .map_err(|e| ApiError::Internal(format!("entity serialization failed: {}", e)))?;

        match value {
            Value::Object(map) => Ok(map.into_iter().collect()),
            other => Err(ApiError::Internal(format!(
                "entity serialized to non-object value: {}",
                other
            ))),
        }
    }
}

/// Loader that resolves one named relation for an entity
pub type RelationLoader<T> = Arc<dyn Fn(&T) -> Result<Value> + Send + Sync>;

/// Capability table mapping include names to typed relation loaders.
///
/// Replaces reflective "includeX" dispatch: the set of loadable relations
/// for an entity type is fixed at registration time.
pub struct RelationRegistry<T: Entity> {
    loaders: HashMap<String, RelationLoader<T>>,
}

impl<T: Entity> RelationRegistry<T> {
    pub fn new() -> Self {
        Self {
            loaders: HashMap::new(),
        }
    }

    /// Register a loader under an include name
    pub fn register<F>(mut self, name: &str, loader: F) -> Self
    where
        F: Fn(&T) -> Result<Value> + Send + Sync + 'static,
    {
        self.loaders.insert(name.to_string(), Arc::new(loader));
        self
    }

    /// Whether a loadable relation exists under this name
    pub fn has(&self, name: &str) -> bool {
        self.loaders.contains_key(name)
    }

    /// Resolve a relation for an entity.
    ///
    /// Returns `None` for unknown names and for loader failures; the
    /// surrounding pipeline treats both as a no-op.
    pub fn load(&self, name: &str, entity: &T) -> Option<Value> {
        let loader = match self.loaders.get(name) {
            Some(loader) => loader,
            None => {
                tracing::debug!(
                    relation = name,
                    entity_type = T::resource_name_singular(),
                    "ignoring unknown include"
                );
                return None;
            }
        };

        match loader(entity) {
            Ok(value) => Some(value),
            Err(err) => {
                tracing::debug!(
                    relation = name,
                    entity_type = T::resource_name_singular(),
                    error = %err,
                    "relation load failed, skipping include"
                );
                None
            }
        }
    }
}

impl<T: Entity> Default for RelationRegistry<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::core::field::FieldValue;
    use chrono::{DateTime, Utc};
    use serde_json::json;
    use uuid::Uuid;

    #[derive(Clone, Serialize)]
    struct Gadget {
        id: Uuid,
        name: String,
        created_at: DateTime<Utc>,
        updated_at: DateTime<Utc>,
        deleted_at: Option<DateTime<Utc>>,
    }

    impl Entity for Gadget {
        fn resource_name() -> &'static str {
            "gadgets"
        }

        fn resource_name_singular() -> &'static str {
            "gadget"
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

    fn gadget() -> Gadget {
        let now = Utc::now();
        Gadget {
            id: Uuid::new_v4(),
            name: "sprocket".to_string(),
            created_at: now,
            updated_at: now,
            deleted_at: None,
        }
    }

    #[test]
    fn test_default_transformer_emits_all_fields() {
        let fields = DefaultTransformer.transform(&gadget()).unwrap();
        assert_eq!(fields["name"], json!("sprocket"));
        assert!(fields.contains_key("id"));
        assert!(fields.contains_key("created_at"));
        assert_eq!(fields["deleted_at"], Value::Null);
    }

    #[test]
    fn test_registry_loads_known_relation() {
        let registry =
            RelationRegistry::<Gadget>::new().register("maker", |g| Ok(json!({"name": g.name})));

        assert!(registry.has("maker"));
        let loaded = registry.load("maker", &gadget()).unwrap();
        assert_eq!(loaded["name"], "sprocket");
    }

    #[test]
    fn test_registry_ignores_unknown_relation() {
        let registry = RelationRegistry::<Gadget>::new();
        assert!(!registry.has("maker"));
        assert!(registry.load("maker", &gadget()).is_none());
    }

    #[test]
    fn test_registry_swallows_loader_failure() {
        let registry = RelationRegistry::<Gadget>::new()
            .register("flaky", |_| Err(anyhow::anyhow!("backend down")));

        assert!(registry.has("flaky"));
        assert!(registry.load("flaky", &gadget()).is_none());
    }
}
