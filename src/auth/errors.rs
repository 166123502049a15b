//! # Auth Errors
//!
//! Error types for the authentication module.

use thiserror::Error;

/// Result type for auth operations
pub type AuthResult<T> = Result<T, AuthError>;

/// Authentication errors
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum AuthError {
    // ==================
    // JWT Errors
    // ==================

    /// JWT token is malformed
    #[error("Malformed token")]
    MalformedToken,

    /// JWT token has expired
    #[error("Token expired")]
    TokenExpired,

    /// JWT signature is invalid
    #[error("Invalid token signature")]
    InvalidSignature,

    // ==================
    // Request Errors
    // ==================

    /// No credentials were presented
    #[error("Authentication required")]
    AuthenticationRequired,

    // ==================
    // Internal Errors
    // ==================

    /// Token generation failed
    #[error("Internal error: token generation failed")]
    TokenGenerationFailed,
}

impl AuthError {
    /// Returns the HTTP status code for this error
    pub fn status_code(&self) -> u16 {
        match self {
            AuthError::MalformedToken
            | AuthError::TokenExpired
            | AuthError::InvalidSignature
            | AuthError::AuthenticationRequired => 401,
            AuthError::TokenGenerationFailed => 500,
        }
    }

    /// Returns a stable error code for API responses
    pub fn code(&self) -> &'static str {
        match self {
            AuthError::MalformedToken => "MALFORMED_TOKEN",
            AuthError::TokenExpired => "TOKEN_EXPIRED",
            AuthError::InvalidSignature => "INVALID_SIGNATURE",
            AuthError::AuthenticationRequired => "AUTHENTICATION_REQUIRED",
            AuthError::TokenGenerationFailed => "INTERNAL_ERROR",
        }
    }
}
