//! Autocomplete HTTP Routes

use std::sync::Arc;

use axum::{
    extract::{rejection::QueryRejection, Query, State},
    routing::get,
    Json, Router,
};
use serde::{Deserialize, Serialize};

use super::errors::ApiError;
use crate::app::Storefront;
use crate::search::{IndexConfig, Suggestion, SuggestionSource};

#[derive(Debug, Default, Deserialize)]
pub struct AutocompleteParams {
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub limit: Option<i64>,
    #[serde(default)]
    pub offset: Option<i64>,
}

#[derive(Debug, Serialize, Deserialize)]
pub struct AutocompleteResponse {
    pub query: String,
    pub items: Vec<Suggestion>,
    pub source: SuggestionSource,
}

pub fn search_routes() -> Router<Arc<Storefront>> {
    Router::new().route("/autocomplete", get(autocomplete_handler))
}

/// Resolve `(limit, offset)`: default limit when absent, clamp to the
/// configured maximum, reject non-positive limits and negative offsets.
pub fn page_params(params: &AutocompleteParams, config: &IndexConfig) -> Result<(usize, usize), ApiError> {
    let limit = match params.limit {
        None => config.default_limit,
        Some(l) if l <= 0 => return Err(ApiError::bad_request("limit must be greater than zero")),
        Some(l) => usize::try_from(l).unwrap_or(usize::MAX).min(config.max_limit),
    };
    let offset = match params.offset {
        None => 0,
        Some(o) if o < 0 => return Err(ApiError::bad_request("offset cannot be negative")),
        Some(o) => usize::try_from(o).unwrap_or(usize::MAX),
    };
    Ok((limit, offset))
}

async fn autocomplete_handler(
    State(app): State<Arc<Storefront>>,
    params: Result<Query<AutocompleteParams>, QueryRejection>,
) -> Result<Json<AutocompleteResponse>, ApiError> {
    let Query(params) = params?;
    let (limit, offset) = page_params(&params, &app.index_config)?;
    let cancel = app.request_token();

    let outcome = app
        .autocomplete
        .suggest(&params.prefix, limit, offset, &cancel)
        .await?;

    Ok(Json(AutocompleteResponse {
        query: params.prefix,
        items: outcome.suggestions,
        source: outcome.source,
    }))
}
