//! Router builder wiring the CRUD handlers for an entity type

use crate::core::entity::Entity;
use crate::server::handlers::{
    ResourceState, destroy, filter, index, restore, show, store, update,
};
use axum::{Router, routing::get, routing::put};

/// Build the REST routes for one entity type:
/// - GET    /{resource}              - paginated listing
/// - GET    /{resource}/filter       - paginated listing with filters
/// - POST   /{resource}              - create
/// - GET    /{resource}/{id}         - fetch
/// - PUT    /{resource}/{id}         - update
/// - DELETE /{resource}/{id}         - delete (soft)
/// - PUT    /{resource}/{id}/restore - restore a soft-deleted entity
pub fn resource_routes<T: Entity>(state: ResourceState<T>) -> Router {
    let resource = T::resource_name();

    Router::new()
        .route(
            &format!("/{resource}"),
            get(index::<T>).post(store::<T>),
        )
        .route(&format!("/{resource}/filter"), get(filter::<T>))
        .route(
            &format!("/{resource}/{{id}}"),
            get(show::<T>).put(update::<T>).delete(destroy::<T>),
        )
        .route(&format!("/{resource}/{{id}}/restore"), put(restore::<T>))
        .with_state(state)
}
