//! Repository trait abstracting the data store behind the REST layer

use crate::core::entity::Entity;
use crate::core::page::PageResult;
use crate::core::query::ListQuery;
use anyhow::Result;
use async_trait::async_trait;
use serde_json::Value;
use uuid::Uuid;

/// Data-access seam consumed by the CRUD handlers.
///
/// Implementations own persistence entirely; the REST layer only ever sees
/// entities and page results. Failures are reported as `anyhow::Error` and
/// surface to clients as domain errors (HTTP 400).
#[async_trait]
pub trait Repository<T: Entity>: Send + Sync {
    /// List entities, ordered according to `query` and sliced into pages of
    /// `per_page` (resolved by the caller from query and configuration)
    async fn get_all_paginate(&self, query: &ListQuery, per_page: usize) -> Result<PageResult<T>>;

    /// Like [`get_all_paginate`](Self::get_all_paginate) with the query's
    /// filter object and free-text search applied first
    async fn filter_paginated(&self, query: &ListQuery, per_page: usize) -> Result<PageResult<T>>;

    /// Find an entity by id; `Ok(None)` when no such id exists
    async fn find(&self, id: &Uuid) -> Result<Option<T>>;

    /// Create an entity from a flat field mapping
    async fn add(&self, fields: Value) -> Result<T>;

    /// Apply a flat field mapping to an existing entity
    async fn update(&self, fields: Value, entity: T) -> Result<T>;

    /// Delete an entity (a soft delete when the type supports it)
    async fn destroy(&self, entity: T) -> Result<T>;

    /// Bring a soft-deleted entity back
    async fn restore(&self, entity: T) -> Result<T>;
}
