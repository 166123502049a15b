//! Observability HTTP Routes
//!
//! Health check and metrics snapshot.

use std::sync::Arc;

use axum::{extract::State, http::StatusCode, response::IntoResponse, routing::get, Json, Router};
use serde::Serialize;

use crate::app::Storefront;

/// Health check response
#[derive(Debug, Serialize)]
pub struct HealthResponse {
    pub status: String,
    pub version: String,
}

/// Create observability routes
pub fn observability_routes() -> Router<Arc<Storefront>> {
    Router::new().route("/metrics", get(metrics_handler))
}

/// Health check route at the root
pub fn health_routes() -> Router<Arc<Storefront>> {
    Router::new().route("/health", get(health_handler))
}

async fn health_handler() -> impl IntoResponse {
    let response = HealthResponse {
        status: "ok".to_string(),
        version: env!("CARGO_PKG_VERSION").to_string(),
    };

    (StatusCode::OK, Json(response))
}

async fn metrics_handler(State(app): State<Arc<Storefront>>) -> impl IntoResponse {
    (StatusCode::OK, Json(app.metrics.snapshot()))
}
