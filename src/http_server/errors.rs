//! HTTP error mapping
//!
//! Every subsystem error becomes a `{error, code}` JSON body with the
//! status its `status_code()` names.

use axum::{
    extract::rejection::{JsonRejection, QueryRejection},
    http::StatusCode,
    response::{IntoResponse, Response},
    Json,
};
use serde::{Deserialize, Serialize};

use crate::auth::AuthError;
use crate::catalog::CatalogError;
use crate::search::SearchError;

/// Error body returned by every endpoint
#[derive(Debug, Serialize, Deserialize)]
pub struct ErrorResponse {
    pub error: String,
    pub code: String,
}

/// Errors a handler can return
#[derive(Debug)]
pub enum ApiError {
    Search(SearchError),
    Catalog(CatalogError),
    Auth(AuthError),
    BadRequest(String),
}

impl ApiError {
    pub fn bad_request(msg: impl Into<String>) -> Self {
        Self::BadRequest(msg.into())
    }

    fn parts(&self) -> (u16, &'static str, String) {
        match self {
            ApiError::Search(e) => (e.status_code(), e.code(), e.to_string()),
            ApiError::Catalog(e) => (e.status_code(), e.code(), e.to_string()),
            ApiError::Auth(e) => (e.status_code(), e.code(), e.to_string()),
            ApiError::BadRequest(msg) => (400, "BAD_REQUEST", msg.clone()),
        }
    }
}

impl From<SearchError> for ApiError {
    fn from(e: SearchError) -> Self {
        Self::Search(e)
    }
}

impl From<CatalogError> for ApiError {
    fn from(e: CatalogError) -> Self {
        Self::Catalog(e)
    }
}

impl From<AuthError> for ApiError {
    fn from(e: AuthError) -> Self {
        Self::Auth(e)
    }
}

impl From<QueryRejection> for ApiError {
    fn from(e: QueryRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl From<JsonRejection> for ApiError {
    fn from(e: JsonRejection) -> Self {
        Self::BadRequest(e.body_text())
    }
}

impl IntoResponse for ApiError {
    fn into_response(self) -> Response {
        let (status, code, error) = self.parts();
        if status >= 500 {
            tracing::error!(code, error = %error, "request failed");
        }
        let status = StatusCode::from_u16(status).unwrap_or(StatusCode::INTERNAL_SERVER_ERROR);
        let body = Json(ErrorResponse {
            error,
            code: code.to_string(),
        });
        (status, body).into_response()
    }
}
