//! # JWT Token Management
//!
//! Stateless HS256 access tokens. The subject claim carries the user id;
//! nothing else is trusted from the token.

use chrono::{Duration, Utc};
use jsonwebtoken::{decode, encode, Algorithm, DecodingKey, EncodingKey, Header, Validation};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

use super::errors::{AuthError, AuthResult};

/// JWT claims for access tokens
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct JwtClaims {
    /// Subject (user ID)
    pub sub: String,

    /// Issued at timestamp (Unix epoch seconds)
    pub iat: i64,

    /// Expiration timestamp (Unix epoch seconds)
    pub exp: i64,

    pub aud: String,

    pub iss: String,
}

/// JWT configuration
#[derive(Debug, Clone)]
pub struct JwtConfig {
    /// Secret key for signing
    pub secret: String,

    /// Access token lifetime
    pub access_token_ttl: Duration,

    pub issuer: String,

    pub audience: String,
}

impl Default for JwtConfig {
    fn default() -> Self {
        Self {
            secret: "CHANGE_THIS_SECRET_IN_PRODUCTION".to_string(),
            access_token_ttl: Duration::minutes(60),
            issuer: "storefront".to_string(),
            audience: "storefront".to_string(),
        }
    }
}

/// Authenticated principal attached to write requests
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Caller {
    pub user_id: Uuid,
}

/// JWT manager for token generation and validation
#[derive(Clone)]
pub struct JwtManager {
    config: JwtConfig,
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
}

impl JwtManager {
    /// Create a new JWT manager with the given configuration
    pub fn new(config: JwtConfig) -> Self {
        let encoding_key = EncodingKey::from_secret(config.secret.as_bytes());
        let decoding_key = DecodingKey::from_secret(config.secret.as_bytes());

        Self {
            config,
            encoding_key,
            decoding_key,
        }
    }

    /// Issue an access token for `user_id`
    pub fn generate_access_token(&self, user_id: Uuid) -> AuthResult<String> {
        let now = Utc::now();
        let exp = now + self.config.access_token_ttl;

        let claims = JwtClaims {
            sub: user_id.to_string(),
            iat: now.timestamp(),
            exp: exp.timestamp(),
            aud: self.config.audience.clone(),
            iss: self.config.issuer.clone(),
        };

        encode(&Header::default(), &claims, &self.encoding_key)
            .map_err(|_| AuthError::TokenGenerationFailed)
    }

    /// Validate an access token and extract claims
    pub fn validate_token(&self, token: &str) -> AuthResult<JwtClaims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.set_audience(&[&self.config.audience]);
        validation.set_issuer(&[&self.config.issuer]);

        let token_data =
            decode::<JwtClaims>(token, &self.decoding_key, &validation).map_err(|e| {
                match e.kind() {
                    jsonwebtoken::errors::ErrorKind::ExpiredSignature => AuthError::TokenExpired,
                    jsonwebtoken::errors::ErrorKind::InvalidSignature => {
                        AuthError::InvalidSignature
                    }
                    _ => AuthError::MalformedToken,
                }
            })?;

        Ok(token_data.claims)
    }

    /// Validate `token` and resolve the caller it names
    pub fn caller_from_token(&self, token: &str) -> AuthResult<Caller> {
        let claims = self.validate_token(token)?;
        let user_id = Uuid::parse_str(&claims.sub).map_err(|_| AuthError::MalformedToken)?;
        Ok(Caller { user_id })
    }

    /// Resolve the caller from an `Authorization` header value
    pub fn caller_from_header(&self, header: Option<&str>) -> AuthResult<Caller> {
        let token = bearer_token(header)?;
        self.caller_from_token(token)
    }
}

/// Extract the token from a `Bearer <token>` header value
pub fn bearer_token(header: Option<&str>) -> AuthResult<&str> {
    let value = header.ok_or(AuthError::AuthenticationRequired)?;
    let token = value
        .strip_prefix("Bearer ")
        .or_else(|| value.strip_prefix("bearer "))
        .ok_or(AuthError::MalformedToken)?
        .trim();
    if token.is_empty() {
        return Err(AuthError::AuthenticationRequired);
    }
    Ok(token)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn create_test_manager() -> JwtManager {
        JwtManager::new(JwtConfig {
            secret: "test_secret_key_for_testing_only".to_string(),
            access_token_ttl: Duration::minutes(15),
            issuer: "test".to_string(),
            audience: "test".to_string(),
        })
    }

    #[test]
    fn test_token_generation() {
        let manager = create_test_manager();
        let token = manager.generate_access_token(Uuid::new_v4()).unwrap();

        // header.payload.signature
        assert_eq!(token.split('.').count(), 3);
    }

    #[test]
    fn test_caller_round_trip() {
        let manager = create_test_manager();
        let user_id = Uuid::new_v4();
        let token = manager.generate_access_token(user_id).unwrap();

        let caller = manager.caller_from_token(&token).unwrap();
        assert_eq!(caller.user_id, user_id);
    }

    #[test]
    fn test_wrong_secret_rejected() {
        let manager = create_test_manager();
        let other = JwtManager::new(JwtConfig {
            secret: "a_different_secret".to_string(),
            ..JwtConfig {
                issuer: "test".to_string(),
                audience: "test".to_string(),
                ..JwtConfig::default()
            }
        });

        let token = other.generate_access_token(Uuid::new_v4()).unwrap();
        assert_eq!(
            manager.validate_token(&token).unwrap_err(),
            AuthError::InvalidSignature
        );
    }

    #[test]
    fn test_expired_token() {
        let manager = JwtManager::new(JwtConfig {
            secret: "test_secret_key_for_testing_only".to_string(),
            access_token_ttl: Duration::minutes(-10),
            issuer: "test".to_string(),
            audience: "test".to_string(),
        });

        let token = manager.generate_access_token(Uuid::new_v4()).unwrap();
        assert_eq!(manager.validate_token(&token).unwrap_err(), AuthError::TokenExpired);
    }

    #[test]
    fn test_garbage_token() {
        let manager = create_test_manager();
        assert_eq!(
            manager.caller_from_token("not.a.token").unwrap_err(),
            AuthError::MalformedToken
        );
    }

    #[test]
    fn test_bearer_header_parsing() {
        assert_eq!(bearer_token(Some("Bearer abc")).unwrap(), "abc");
        assert_eq!(bearer_token(None).unwrap_err(), AuthError::AuthenticationRequired);
        assert_eq!(bearer_token(Some("Basic abc")).unwrap_err(), AuthError::MalformedToken);
        assert_eq!(bearer_token(Some("Bearer  ")).unwrap_err(), AuthError::AuthenticationRequired);
    }
}
