//! # HTTP Server
//!
//! Main HTTP server combining all endpoint routers.

use std::net::SocketAddr;
use std::sync::Arc;

use axum::Router;
use tokio::net::TcpListener;
use tower_http::cors::{AllowOrigin, Any, CorsLayer};
use tower_http::trace::TraceLayer;

use super::config::HttpServerConfig;
use super::observability_routes::{health_routes, observability_routes};
use super::product_routes::product_routes;
use super::search_routes::search_routes;
use crate::app::Storefront;

/// HTTP server for the storefront API
pub struct HttpServer {
    config: HttpServerConfig,
    app: Arc<Storefront>,
    router: Router,
}

impl HttpServer {
    /// Create a new HTTP server serving `app`
    pub fn new(config: HttpServerConfig, app: Arc<Storefront>) -> Self {
        let router = Self::build_router(&config, app.clone());
        Self {
            config,
            app,
            router,
        }
    }

    /// Build the combined router with all endpoints
    pub fn build_router(config: &HttpServerConfig, app: Arc<Storefront>) -> Router {
        let cors = if config.cors_origins.is_empty() {
            CorsLayer::new()
                .allow_origin(Any)
                .allow_methods(Any)
                .allow_headers(Any)
        } else {
            let origins: Vec<_> = config
                .cors_origins
                .iter()
                .filter_map(|s| s.parse().ok())
                .collect();

            CorsLayer::new()
                .allow_origin(AllowOrigin::list(origins))
                .allow_methods(Any)
                .allow_headers(Any)
        };

        Router::new()
            .merge(health_routes())
            .merge(search_routes())
            .nest("/products", product_routes())
            .nest("/observability", observability_routes())
            .layer(TraceLayer::new_for_http())
            .layer(cors)
            .with_state(app)
    }

    /// Get the socket address
    pub fn socket_addr(&self) -> String {
        self.config.socket_addr()
    }

    /// Get the router (for testing)
    pub fn router(self) -> Router {
        self.router
    }

    /// Serve until the application's shutdown token is cancelled
    pub async fn start(self) -> Result<(), std::io::Error> {
        let addr: SocketAddr = self.config.socket_addr().parse().map_err(|e| {
            std::io::Error::new(
                std::io::ErrorKind::InvalidInput,
                format!("invalid socket address {}: {}", self.config.socket_addr(), e),
            )
        })?;

        let listener = TcpListener::bind(addr).await?;
        tracing::info!(%addr, "storefront HTTP server listening");

        let shutdown = self.app.shutdown_token();
        axum::serve(listener, self.router)
            .with_graceful_shutdown(async move { shutdown.cancelled().await })
            .await?;

        tracing::info!("HTTP server stopped");
        Ok(())
    }
}
