//! Response envelope construction
//!
//! Translates a paginated result set (or a single entity) plus the client's
//! include/exclude request into a JSON:API-shaped document:
//!
//! ```json
//! { "data": [...],
//!   "meta": {"pagination": {"total", "count", "per_page", "current_page", "total_pages"}},
//!   "links": {"self", "first", "last", "next"?, "prev"?} }
//! ```
//!
//! A document is built once per request, is immutable after construction,
//! and is handed to the transport layer for serialization. The builder holds
//! no state between calls and is safe to use concurrently.

use crate::core::entity::Entity;
use crate::core::error::{ApiError, ApiResult};
use crate::core::page::PageResult;
use crate::core::query::IncludeSpec;
use crate::core::transform::{RelationRegistry, Transformer};
use serde::Serialize;
use serde_json::Value;

/// Pagination block under `meta.pagination`
#[derive(Debug, Clone, Serialize, PartialEq, Eq)]
pub struct PaginationMeta {
    /// Total number of entities across all pages
    pub total: usize,

    /// Number of entities on this page
    pub count: usize,

    /// Page size
    pub per_page: usize,

    /// Current page number (starts at 1)
    pub current_page: usize,

    /// Total number of pages; 0 for an empty set
    pub total_pages: usize,
}

/// `meta` section of a collection document
#[derive(Debug, Clone, Serialize)]
pub struct Meta {
    pub pagination: PaginationMeta,
}

/// `links` section of a collection document
///
/// `self`, `first` and `last` are always present; `next` only when a later
/// page exists, `prev` only past page 1.
#[derive(Debug, Clone, Serialize)]
pub struct PageLinks {
    #[serde(rename = "self")]
    pub self_link: String,
    pub first: String,
    pub last: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub next: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub prev: Option<String>,
}

/// The output envelope: one entity or an array of transformed entities,
/// with pagination metadata and links for collections.
#[derive(Debug, Clone, Serialize)]
pub struct Document {
    pub data: Value,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub meta: Option<Meta>,

    #[serde(skip_serializing_if = "Option::is_none")]
    pub links: Option<PageLinks>,
}

/// Envelope builder for one entity type.
///
/// Borrows the transformer and relation registry; a fresh builder is cheap
/// enough to create per request.
pub struct Envelope<'a, T: Entity> {
    transformer: &'a dyn Transformer<T>,
    relations: &'a RelationRegistry<T>,
}

impl<'a, T: Entity> Envelope<'a, T> {
    pub fn new(transformer: &'a dyn Transformer<T>, relations: &'a RelationRegistry<T>) -> Self {
        Self {
            transformer,
            relations,
        }
    }

    /// Build a collection document from one page of entities.
    ///
    /// `base_url` is the request URL without the page parameter; `page_name`
    /// is the name of that parameter in the emitted links.
    pub fn collection(
        &self,
        page: &PageResult<T>,
        includes: &IncludeSpec,
        excludes: &IncludeSpec,
        base_url: &str,
        page_name: &str,
    ) -> ApiResult<Document> {
        if page.per_page == 0 {
            return Err(ApiError::InvalidArgument(
                "per_page must be at least 1".to_string(),
            ));
        }
        if page.current_page == 0 {
            return Err(ApiError::InvalidArgument(
                "current_page must be at least 1".to_string(),
            ));
        }

        let data: Vec<Value> = page
            .items
            .iter()
            .map(|entity| self.transform_one(entity, includes, excludes))
            .collect::<ApiResult<_>>()?;

        let total_pages = page.total_pages();
        let pagination = PaginationMeta {
            total: page.total,
            count: page.items.len(),
            per_page: page.per_page,
            current_page: page.current_page,
            total_pages,
        };

        Ok(Document {
            data: Value::Array(data),
            meta: Some(Meta { pagination }),
            links: Some(Self::links(
                base_url,
                page_name,
                page.current_page,
                total_pages,
            )),
        })
    }

    /// Build an item document for a single entity.
    ///
    /// `None` fails with `InvalidArgument`; the result never carries a
    /// pagination or links block.
    pub fn item(&self, entity: Option<&T>, includes: &IncludeSpec) -> ApiResult<Document> {
        let entity = entity.ok_or_else(|| {
            ApiError::InvalidArgument(format!("{} is required", T::resource_name_singular()))
        })?;

        Ok(Document {
            data: self.transform_one(entity, includes, &IncludeSpec::default())?,
            meta: None,
            links: None,
        })
    }

    /// Eager-load requested relations, transform, strip excluded names.
    ///
    /// Include names without a registered loader and loaders that fail are
    /// skipped silently (lenient-include policy).
    fn transform_one(
        &self,
        entity: &T,
        includes: &IncludeSpec,
        excludes: &IncludeSpec,
    ) -> ApiResult<Value> {
        let mut fields = self.transformer.transform(entity)?;

        for name in includes.iter() {
            if excludes.contains(name) {
                continue;
            }
            if let Some(value) = self.relations.load(name, entity) {
                fields.insert(name.to_string(), value);
            }
        }

        for name in excludes.iter() {
            fields.shift_remove(name);
        }

        Ok(serde_json::to_value(fields)?)
    }

    fn links(base_url: &str, page_name: &str, current_page: usize, total_pages: usize) -> PageLinks {
        let url = |page: usize| page_url(base_url, page_name, page);

        PageLinks {
            self_link: url(current_page),
            first: url(1),
            // An empty set still links to page 1 so first/last stay valid
            last: url(total_pages.max(1)),
            next: (current_page < total_pages).then(|| url(current_page + 1)),
            prev: (current_page > 1).then(|| url(current_page - 1)),
        }
    }
}

fn page_url(base_url: &str, page_name: &str, page: usize) -> String {
    let separator = if base_url.contains('?') { '&' } else { '?' };
    format!("{}{}{}={}", base_url, separator, page_name, page)
}
