//! # api-foundation
//!
//! Generic REST CRUD endpoints over a repository abstraction, serialized as
//! JSON:API-shaped response envelopes with pagination links.
//!
//! ## Features
//!
//! - **Seven standard operations**: index, filter, store, show, update,
//!   destroy, restore for any entity type
//! - **Repository seam**: storage behind an async trait; an in-memory
//!   implementation ships for tests and development
//! - **Response envelopes**: `data` / `meta.pagination` / `links` documents
//!   with first/last/next/prev navigation
//! - **Relation includes**: explicit per-type capability table of relation
//!   loaders; unknown includes are silently ignored
//! - **Soft delete support**: destroy marks `deleted_at`, restore clears it
//!
//! ## Quick Start
//!
//! ```rust,ignore
//! use api_foundation::prelude::*;
//!
//! api_entity!(Product, "product", "products", ["name", "sku"], {
//!     sku: String,
//!     price: f64,
//! });
//!
//! let repository = Arc::new(InMemoryRepository::<Product>::new());
//! let state = ResourceState::new(
//!     repository,
//!     Arc::new(DefaultTransformer),
//!     RelationRegistry::new(),
//! );
//!
//! ServerBuilder::new()
//!     .register(resource_routes(state))
//!     .serve("127.0.0.1:3000")
//!     .await?;
//! ```

pub mod config;
pub mod core;
pub mod entities;
pub mod envelope;
pub mod server;
pub mod storage;

/// Re-exports of commonly used types and traits
pub mod prelude {
    // === Core Traits ===
    pub use crate::core::{
        entity::{Entity, Storable},
        error::{ApiError, ApiResult, ErrorResponse},
        field::FieldValue,
        page::PageResult,
        query::{Direction, IncludeSpec, ListQuery},
        repository::Repository,
        transform::{DefaultTransformer, FieldMap, RelationRegistry, Transformer},
    };

    // === Macros ===
    pub use crate::api_entity;

    // === Envelope ===
    pub use crate::envelope::{Document, Envelope, PageLinks, PaginationMeta};

    // === Storage ===
    pub use crate::storage::InMemoryRepository;

    // === Config ===
    pub use crate::config::ApiConfig;

    // === Server ===
    pub use crate::server::{ResourceState, ServerBuilder, init_tracing, resource_routes};

    // === External dependencies ===
    pub use anyhow::Result;
    pub use async_trait::async_trait;
    pub use chrono::{DateTime, Utc};
    pub use serde::{Deserialize, Serialize};
    pub use std::sync::Arc;
    pub use uuid::Uuid;

    // === Axum ===
    pub use axum::{
        Router,
        extract::{Path, Query, State},
        routing::{delete, get, post, put},
    };
}
