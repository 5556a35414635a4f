//! Core module containing the fundamental traits and types

pub mod entity;
pub mod error;
pub mod field;
pub mod page;
pub mod query;
pub mod repository;
pub mod transform;

pub use entity::{Entity, Storable};
pub use error::{ApiError, ApiResult, ErrorResponse};
pub use field::FieldValue;
pub use page::PageResult;
pub use query::{Direction, IncludeSpec, ListQuery};
pub use repository::Repository;
pub use transform::{DefaultTransformer, FieldMap, RelationRegistry, Transformer};
