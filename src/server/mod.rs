//! HTTP layer: handlers, per-resource routing and server assembly

pub mod builder;
pub mod handlers;
pub mod router;

pub use builder::{ServerBuilder, init_tracing};
pub use handlers::ResourceState;
pub use router::resource_routes;
