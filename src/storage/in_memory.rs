//! In-memory implementation of Repository for testing and development

use crate::core::entity::Storable;
use crate::core::error::ApiError;
use crate::core::field::FieldValue;
use crate::core::page::PageResult;
use crate::core::query::{Direction, ListQuery};
use crate::core::repository::Repository;
use anyhow::{Result, anyhow};
use async_trait::async_trait;
use serde_json::Value;
use std::cmp::Ordering;
use std::collections::HashMap;
use std::sync::{Arc, RwLock};
use uuid::Uuid;

/// In-memory repository implementation
///
/// Useful for testing and development. Uses RwLock for thread-safe access.
/// Soft-deleted entities stay in the map (so they can be restored) but are
/// excluded from listings.
#[derive(Clone)]
pub struct InMemoryRepository<T: Storable> {
    items: Arc<RwLock<HashMap<Uuid, T>>>,
}

impl<T: Storable> InMemoryRepository<T> {
    /// Create a new, empty in-memory repository
    pub fn new() -> Self {
        Self {
            items: Arc::new(RwLock::new(HashMap::new())),
        }
    }

    /// Insert an entity directly, bypassing `add` (fixtures and demos)
    pub fn seed(&self, entity: T) -> Result<()> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.insert(entity.id(), entity);

        Ok(())
    }

    fn live_items(&self) -> Result<Vec<T>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items
            .values()
            .filter(|entity| !entity.is_deleted())
            .cloned()
            .collect())
    }

    fn put(&self, entity: T) -> Result<T> {
        let mut items = self
            .items
            .write()
            .map_err(|e| anyhow!("Failed to acquire write lock: {}", e))?;

        items.insert(entity.id(), entity.clone());

        Ok(entity)
    }

    /// Reject column selections the entity type does not expose.
    ///
    /// Timestamps are always selectable even though they are not part of
    /// `columns()`.
    fn validate_columns(&self, query: &ListQuery) -> Result<()> {
        for column in query.columns() {
            let known = T::columns().contains(&column.as_str())
                || matches!(column.as_str(), "created_at" | "updated_at" | "deleted_at");
            if !known {
                return Err(anyhow::Error::new(ApiError::UnknownColumn {
                    entity_type: T::resource_name().to_string(),
                    column,
                }));
            }
        }
        Ok(())
    }

    /// Order by the query's `order_by` field, creation time as tiebreak and
    /// default; id as the final tiebreak so pages are stable.
    fn sort(&self, mut items: Vec<T>, query: &ListQuery) -> Vec<T> {
        items.sort_by(|a, b| {
            let by_field = match &query.order_by {
                Some(field) => {
                    let left = a.field_value(field).unwrap_or(FieldValue::Null);
                    let right = b.field_value(field).unwrap_or(FieldValue::Null);
                    left.compare(&right)
                }
                None => Ordering::Equal,
            };

            by_field
                .then_with(|| a.created_at().cmp(&b.created_at()))
                .then_with(|| a.id().cmp(&b.id()))
        });

        if query.direction == Direction::Desc {
            items.reverse();
        }

        items
    }

    /// Keep entities matching every filter entry.
    ///
    /// Keys may carry a comparison suffix: `field>`, `field<`, `field>=`,
    /// `field<=`; a bare key is an exact match.
    fn apply_filters(&self, items: Vec<T>, filter: &Value) -> Vec<T> {
        let entries = match filter.as_object() {
            Some(map) => map,
            None => return items,
        };

        items
            .into_iter()
            .filter(|entity| {
                entries.iter().all(|(key, expected)| {
                    let expected = match FieldValue::from_json(expected) {
                        Some(value) => value,
                        None => return false,
                    };

                    let (field, test): (&str, fn(Ordering) -> bool) =
                        if let Some(field) = key.strip_suffix(">=") {
                            (field, Ordering::is_ge)
                        } else if let Some(field) = key.strip_suffix("<=") {
                            (field, Ordering::is_le)
                        } else if let Some(field) = key.strip_suffix('>') {
                            (field, Ordering::is_gt)
                        } else if let Some(field) = key.strip_suffix('<') {
                            (field, Ordering::is_lt)
                        } else {
                            let actual = entity.field_value(key);
                            return actual.is_some_and(|actual| actual.matches(&expected));
                        };

                    entity
                        .field_value(field)
                        .is_some_and(|actual| test(actual.compare(&expected)))
                })
            })
            .collect()
    }

    /// Case-insensitive substring search over the searchable fields
    fn apply_search(&self, items: Vec<T>, term: &str) -> Vec<T> {
        let needle = term.to_lowercase();

        items
            .into_iter()
            .filter(|entity| {
                T::searchable_fields().iter().any(|field| {
                    entity
                        .field_value(field)
                        .and_then(|value| value.as_string().map(str::to_lowercase))
                        .is_some_and(|haystack| haystack.contains(&needle))
                })
            })
            .collect()
    }
}

impl<T: Storable> Default for InMemoryRepository<T> {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait]
impl<T: Storable> Repository<T> for InMemoryRepository<T> {
    async fn get_all_paginate(&self, query: &ListQuery, per_page: usize) -> Result<PageResult<T>> {
        self.validate_columns(query)?;

        let items = self.sort(self.live_items()?, query);

        Ok(PageResult::slice(items, per_page, query.page()))
    }

    async fn filter_paginated(&self, query: &ListQuery, per_page: usize) -> Result<PageResult<T>> {
        self.validate_columns(query)?;

        let mut items = self.live_items()?;

        if let Some(filter) = query.filter_value() {
            items = self.apply_filters(items, &filter);
        }

        if let Some(term) = query.search.as_deref() {
            items = self.apply_search(items, term);
        }

        let items = self.sort(items, query);

        Ok(PageResult::slice(items, per_page, query.page()))
    }

    async fn find(&self, id: &Uuid) -> Result<Option<T>> {
        let items = self
            .items
            .read()
            .map_err(|e| anyhow!("Failed to acquire read lock: {}", e))?;

        Ok(items.get(id).cloned())
    }

    async fn add(&self, fields: Value) -> Result<T> {
        self.put(T::from_fields(&fields)?)
    }

    async fn update(&self, fields: Value, mut entity: T) -> Result<T> {
        entity.apply_fields(&fields)?;
        self.put(entity)
    }

    async fn destroy(&self, mut entity: T) -> Result<T> {
        entity.soft_delete();
        self.put(entity)
    }

    async fn restore(&self, mut entity: T) -> Result<T> {
        entity.restore_deleted();
        self.put(entity)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::api_entity;
    use crate::core::entity::Entity;
    use serde_json::json;

    api_entity!(Tool, "tool", "tools", ["name", "kind"], {
        kind: String,
        price: f64,
    });

    fn repo_with(n: usize) -> InMemoryRepository<Tool> {
        let repo = InMemoryRepository::new();
        for i in 0..n {
            let mut tool = Tool::new(format!("tool-{i:02}"), "hand".to_string(), i as f64);
            // Deterministic creation order for sort assertions
            tool.created_at = tool.created_at + chrono::Duration::seconds(i as i64);
            repo.seed(tool).unwrap();
        }
        repo
    }

    #[tokio::test]
    async fn test_paginate_twenty_rows() {
        let repo = repo_with(20);
        let query = ListQuery::default();

        let page1 = repo.get_all_paginate(&query, 15).await.unwrap();
        assert_eq!(page1.items.len(), 15);
        assert_eq!(page1.total, 20);
        assert_eq!(page1.total_pages(), 2);

        let query = ListQuery {
            page: 2,
            ..Default::default()
        };
        let page2 = repo.get_all_paginate(&query, 15).await.unwrap();
        assert_eq!(page2.items.len(), 5);
    }

    #[tokio::test]
    async fn test_order_by_descending() {
        let repo = repo_with(3);
        let query = ListQuery {
            order_by: Some("price".to_string()),
            direction: Direction::Desc,
            ..Default::default()
        };

        let page = repo.get_all_paginate(&query, 15).await.unwrap();
        assert_eq!(page.items[0].price, 2.0);
        assert_eq!(page.items[2].price, 0.0);
    }

    #[tokio::test]
    async fn test_unknown_column_is_rejected() {
        let repo = repo_with(2);
        let query = ListQuery {
            columns: Some("foo".to_string()),
            ..Default::default()
        };

        let err = repo.get_all_paginate(&query, 15).await.unwrap_err();
        let api_err: ApiError = err.into();
        assert!(matches!(api_err, ApiError::UnknownColumn { .. }));
    }

    #[tokio::test]
    async fn test_timestamp_columns_are_selectable() {
        let repo = repo_with(2);
        let query = ListQuery {
            columns: Some("name,created_at".to_string()),
            ..Default::default()
        };

        assert!(repo.get_all_paginate(&query, 15).await.is_ok());
    }

    #[tokio::test]
    async fn test_filter_exact_match() {
        let repo = repo_with(5);
        repo.seed(Tool::new("drill".to_string(), "power".to_string(), 99.0))
            .unwrap();

        let query = ListQuery {
            filter: Some(r#"{"kind": "power"}"#.to_string()),
            ..Default::default()
        };
        let page = repo.filter_paginated(&query, 15).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "drill");
    }

    #[tokio::test]
    async fn test_filter_comparison_operators() {
        let repo = repo_with(5);

        let query = ListQuery {
            filter: Some(r#"{"price>": 1, "price<=": 3}"#.to_string()),
            ..Default::default()
        };
        let page = repo.filter_paginated(&query, 15).await.unwrap();
        assert_eq!(page.total, 2); // prices 2.0 and 3.0
    }

    #[tokio::test]
    async fn test_search_is_case_insensitive() {
        let repo = repo_with(3);
        repo.seed(Tool::new("Hammer".to_string(), "hand".to_string(), 5.0))
            .unwrap();

        let query = ListQuery {
            search: Some("hamm".to_string()),
            ..Default::default()
        };
        let page = repo.filter_paginated(&query, 15).await.unwrap();
        assert_eq!(page.total, 1);
        assert_eq!(page.items[0].name, "Hammer");
    }

    #[tokio::test]
    async fn test_add_from_fields() {
        let repo: InMemoryRepository<Tool> = InMemoryRepository::new();

        let tool = repo
            .add(json!({"name": "saw", "kind": "hand", "price": 12.5}))
            .await
            .unwrap();
        assert_eq!(tool.name, "saw");

        let found = repo.find(&tool.id).await.unwrap();
        assert!(found.is_some());
    }

    #[tokio::test]
    async fn test_add_missing_field_is_an_error() {
        let repo: InMemoryRepository<Tool> = InMemoryRepository::new();

        let err = repo.add(json!({"name": "saw"})).await.unwrap_err();
        assert!(err.to_string().contains("kind"));
    }

    #[tokio::test]
    async fn test_update_applies_partial_fields() {
        let repo = repo_with(1);
        let entity = repo.live_items().unwrap().remove(0);

        let updated = repo
            .update(json!({"price": 42.0}), entity.clone())
            .await
            .unwrap();
        assert_eq!(updated.price, 42.0);
        assert_eq!(updated.name, entity.name);
        assert!(updated.updated_at >= entity.updated_at);
    }

    #[tokio::test]
    async fn test_destroy_hides_from_listings_but_keeps_record() {
        let repo = repo_with(2);
        let entity = repo.live_items().unwrap().remove(0);
        let id = entity.id;

        let destroyed = repo.destroy(entity).await.unwrap();
        assert!(destroyed.is_deleted());

        let page = repo
            .get_all_paginate(&ListQuery::default(), 15)
            .await
            .unwrap();
        assert_eq!(page.total, 1);

        // Still findable so it can be restored
        assert!(repo.find(&id).await.unwrap().is_some());
    }

    #[tokio::test]
    async fn test_restore_brings_entity_back() {
        let repo = repo_with(1);
        let entity = repo.live_items().unwrap().remove(0);

        let destroyed = repo.destroy(entity).await.unwrap();
        let restored = repo.restore(destroyed).await.unwrap();
        assert!(!restored.is_deleted());
        assert!(restored.deleted_at.is_none());

        let page = repo
            .get_all_paginate(&ListQuery::default(), 15)
            .await
            .unwrap();
        assert_eq!(page.total, 1);
    }
}
