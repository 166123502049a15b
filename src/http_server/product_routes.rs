//! Product HTTP Routes
//!
//! Reads are public. Writes need `Authorization: Bearer <jwt>` and are
//! limited to the product's creator.

use std::sync::Arc;

use axum::{
    extract::{
        rejection::{JsonRejection, QueryRejection},
        Path, Query, State,
    },
    http::{header::AUTHORIZATION, HeaderMap, StatusCode},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::ApiError;
use crate::app::Storefront;
use crate::auth::Caller;
use crate::catalog::{Product, ProductInput};

const DEFAULT_PAGE_SIZE: usize = 20;
const MAX_PAGE_SIZE: usize = 100;

#[derive(Debug, Default, Deserialize)]
pub struct ListParams {
    #[serde(default)]
    pub limit: Option<usize>,
    #[serde(default)]
    pub offset: Option<usize>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct ProductListResponse {
    pub products: Vec<Product>,
    pub limit: usize,
    pub offset: usize,
}

pub fn product_routes() -> Router<Arc<Storefront>> {
    Router::new()
        .route("/", get(list_handler).post(create_handler))
        .route(
            "/:id",
            get(get_handler).put(update_handler).delete(delete_handler),
        )
}

/// Resolve the authenticated caller from request headers
fn authenticate(app: &Storefront, headers: &HeaderMap) -> Result<Caller, ApiError> {
    let header = headers.get(AUTHORIZATION).and_then(|v| v.to_str().ok());
    Ok(app.jwt.caller_from_header(header)?)
}

fn parse_id(raw: &str) -> Result<Uuid, ApiError> {
    Uuid::parse_str(raw).map_err(|_| ApiError::bad_request(format!("invalid product id: {}", raw)))
}

async fn list_handler(
    State(app): State<Arc<Storefront>>,
    params: Result<Query<ListParams>, QueryRejection>,
) -> Result<Json<ProductListResponse>, ApiError> {
    let Query(params) = params?;
    let limit = params.limit.unwrap_or(DEFAULT_PAGE_SIZE).clamp(1, MAX_PAGE_SIZE);
    let offset = params.offset.unwrap_or(0);
    let products = app.catalog.list(limit, offset)?;
    Ok(Json(ProductListResponse {
        products,
        limit,
        offset,
    }))
}

async fn get_handler(
    State(app): State<Arc<Storefront>>,
    Path(id): Path<String>,
) -> Result<Json<Product>, ApiError> {
    let id = parse_id(&id)?;
    Ok(Json(app.catalog.get(id)?))
}

async fn create_handler(
    State(app): State<Arc<Storefront>>,
    headers: HeaderMap,
    input: Result<Json<ProductInput>, JsonRejection>,
) -> Result<(StatusCode, Json<Product>), ApiError> {
    let caller = authenticate(&app, &headers)?;
    let Json(input) = input?;
    let product = app.catalog.create(&caller, input, &app.request_token()).await?;
    Ok((StatusCode::CREATED, Json(product)))
}

async fn update_handler(
    State(app): State<Arc<Storefront>>,
    headers: HeaderMap,
    Path(id): Path<String>,
    input: Result<Json<ProductInput>, JsonRejection>,
) -> Result<Json<Product>, ApiError> {
    let caller = authenticate(&app, &headers)?;
    let Json(input) = input?;
    let id = parse_id(&id)?;
    let product = app
        .catalog
        .update(&caller, id, input, &app.request_token())
        .await?;
    Ok(Json(product))
}

async fn delete_handler(
    State(app): State<Arc<Storefront>>,
    headers: HeaderMap,
    Path(id): Path<String>,
) -> Result<StatusCode, ApiError> {
    let caller = authenticate(&app, &headers)?;
    let id = parse_id(&id)?;
    app.catalog.delete(&caller, id, &app.request_token()).await?;
    Ok(StatusCode::NO_CONTENT)
}
