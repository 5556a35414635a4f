//! Server assembly and lifecycle

use anyhow::Result;
use axum::{Json, Router, routing::get};
use serde_json::{Value, json};
use tokio::net::TcpListener;
use tower_http::trace::TraceLayer;

/// Accumulates resource routers and serves the assembled application.
///
/// # Example
///
/// ```ignore
/// ServerBuilder::new()
///     .register(resource_routes(products))
///     .register(resource_routes(categories))
///     .serve("127.0.0.1:3000").await?;
/// ```
#[derive(Default)]
pub struct ServerBuilder {
    routers: Vec<Router>,
}

impl ServerBuilder {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add a router (typically from [`resource_routes`](crate::server::router::resource_routes))
    pub fn register(mut self, router: Router) -> Self {
        self.routers.push(router);
        self
    }

    /// Build the final application router with health routes and request
    /// tracing attached
    pub fn build(self) -> Router {
        let mut app = Self::health_routes();

        for router in self.routers {
            app = app.merge(router);
        }

        app.layer(TraceLayer::new_for_http())
    }

    /// Serve the application with graceful shutdown
    ///
    /// Binds the address, serves requests, and handles SIGTERM and Ctrl+C.
    pub async fn serve(self, addr: &str) -> Result<()> {
        let app = self.build();
        let listener = TcpListener::bind(addr).await?;

        tracing::info!("Server listening on {}", addr);

        axum::serve(listener, app)
            .with_graceful_shutdown(shutdown_signal())
            .await?;

        tracing::info!("Server shutdown complete");
        Ok(())
    }

    fn health_routes() -> Router {
        Router::new()
            .route("/health", get(health_check))
            .route("/healthz", get(health_check))
    }
}

async fn health_check() -> Json<Value> {
    Json(json!({
        "status": "ok",
        "service": "api-foundation"
    }))
}

/// Install the global tracing subscriber, honoring `RUST_LOG`
pub fn init_tracing() {
    use tracing_subscriber::EnvFilter;

    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();
}

/// Wait for shutdown signal (SIGTERM or Ctrl+C)
async fn shutdown_signal() {
    use tokio::signal;

    let ctrl_c = async {
        signal::ctrl_c()
            .await
            .expect("failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        signal::unix::signal(signal::unix::SignalKind::terminate())
            .expect("failed to install SIGTERM handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        _ = ctrl_c => {
            tracing::info!("Received Ctrl+C signal, initiating graceful shutdown...");
        },
        _ = terminate => {
            tracing::info!("Received SIGTERM signal, initiating graceful shutdown...");
        },
    }
}
