//! Generic REST CRUD handlers
//!
//! One [`ResourceState`] per entity type wires a repository, a transformer
//! and a relation registry into the seven standard operations. The handlers
//! are entity-agnostic; everything type-specific flows through the traits.
//!
//! Domain failures (repository errors, unknown ids, bad columns) surface as
//! HTTP 400 with the error message as payload; only unexpected faults are
//! 500. A response is always either a complete envelope or an error body.

use axum::Json;
use axum::extract::{Path, Query, State};
use axum::http::StatusCode;
use serde_json::Value;
use std::sync::Arc;
use uuid::Uuid;

use crate::config::ApiConfig;
use crate::core::entity::Entity;
use crate::core::error::{ApiError, ApiResult};
use crate::core::query::ListQuery;
use crate::core::repository::Repository;
use crate::core::transform::{RelationRegistry, Transformer};
use crate::envelope::{Document, Envelope};

/// Per-entity-type state shared across the CRUD handlers
pub struct ResourceState<T: Entity> {
    pub repository: Arc<dyn Repository<T>>,
    pub transformer: Arc<dyn Transformer<T>>,
    pub relations: Arc<RelationRegistry<T>>,
    pub config: Arc<ApiConfig>,
}

// Manual impl: deriving Clone would put a Clone bound on the trait objects
impl<T: Entity> Clone for ResourceState<T> {
    fn clone(&self) -> Self {
        Self {
            repository: self.repository.clone(),
            transformer: self.transformer.clone(),
            relations: self.relations.clone(),
            config: self.config.clone(),
        }
    }
}

impl<T: Entity> ResourceState<T> {
    pub fn new(
        repository: Arc<dyn Repository<T>>,
        transformer: Arc<dyn Transformer<T>>,
        relations: RelationRegistry<T>,
    ) -> Self {
        Self {
            repository,
            transformer,
            relations: Arc::new(relations),
            config: Arc::new(ApiConfig::default()),
        }
    }

    pub fn with_config(mut self, config: ApiConfig) -> Self {
        self.config = Arc::new(config);
        self
    }

    fn envelope(&self) -> Envelope<'_, T> {
        Envelope::new(self.transformer.as_ref(), self.relations.as_ref())
    }

    /// Resolve an entity for the item routes; unknown ids are domain errors
    async fn resolve(&self, id: &Uuid) -> ApiResult<T> {
        self.repository
            .find(id)
            .await
            .map_err(domain_error)?
            .ok_or_else(|| {
                ApiError::Repository(format!(
                    "{} with id '{}' not found",
                    T::resource_name_singular(),
                    id
                ))
            })
    }
}

/// Log and convert a repository failure into a client-visible domain error
fn domain_error(err: anyhow::Error) -> ApiError {
    tracing::info!(error = %err, "repository operation failed");
    err.into()
}

/// GET /{resource} — paginated listing
pub async fn index<T: Entity>(
    State(state): State<ResourceState<T>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Document>> {
    let per_page = query.rows(state.config.default_rows, state.config.max_rows);

    let page = state
        .repository
        .get_all_paginate(&query, per_page)
        .await
        .map_err(domain_error)?;

    let doc = state.envelope().collection(
        &page,
        &query.includes(),
        &query.excludes(),
        &format!("/{}", T::resource_name()),
        query.page_name(&state.config.page_name),
    )?;

    Ok(Json(doc))
}

/// GET /{resource}/filter — paginated listing with filter/search applied
pub async fn filter<T: Entity>(
    State(state): State<ResourceState<T>>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Document>> {
    let per_page = query.rows(state.config.default_rows, state.config.max_rows);

    let page = state
        .repository
        .filter_paginated(&query, per_page)
        .await
        .map_err(domain_error)?;

    let doc = state.envelope().collection(
        &page,
        &query.includes(),
        &query.excludes(),
        &format!("/{}/filter", T::resource_name()),
        query.page_name(&state.config.page_name),
    )?;

    Ok(Json(doc))
}

/// POST /{resource} — create an entity from the request body
pub async fn store<T: Entity>(
    State(state): State<ResourceState<T>>,
    Query(query): Query<ListQuery>,
    Json(fields): Json<Value>,
) -> ApiResult<(StatusCode, Json<Document>)> {
    let entity = state.repository.add(fields).await.map_err(domain_error)?;

    let doc = state.envelope().item(Some(&entity), &query.includes())?;

    Ok((StatusCode::CREATED, Json(doc)))
}

/// GET /{resource}/{id} — fetch one entity
pub async fn show<T: Entity>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Document>> {
    let entity = state.resolve(&id).await?;

    let doc = state.envelope().item(Some(&entity), &query.includes())?;

    Ok(Json(doc))
}

/// PUT /{resource}/{id} — apply the request body to an entity
pub async fn update<T: Entity>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListQuery>,
    Json(fields): Json<Value>,
) -> ApiResult<Json<Document>> {
    let entity = state.resolve(&id).await?;

    let entity = state
        .repository
        .update(fields, entity)
        .await
        .map_err(domain_error)?;

    let doc = state.envelope().item(Some(&entity), &query.includes())?;

    Ok(Json(doc))
}

/// DELETE /{resource}/{id} — delete an entity, answering with its last state
pub async fn destroy<T: Entity>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Document>> {
    let entity = state.resolve(&id).await?;

    let entity = state
        .repository
        .destroy(entity)
        .await
        .map_err(domain_error)?;

    let doc = state.envelope().item(Some(&entity), &query.includes())?;

    Ok(Json(doc))
}

/// PUT /{resource}/{id}/restore — bring a soft-deleted entity back
pub async fn restore<T: Entity>(
    State(state): State<ResourceState<T>>,
    Path(id): Path<Uuid>,
    Query(query): Query<ListQuery>,
) -> ApiResult<Json<Document>> {
    let entity = state.resolve(&id).await?;

    let entity = state
        .repository
        .restore(entity)
        .await
        .map_err(domain_error)?;

    let doc = state.envelope().item(Some(&entity), &query.includes())?;

    Ok(Json(doc))
}
