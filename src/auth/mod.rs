//! # Authentication
//!
//! Bearer-token verification for catalog writes. Reads are public.

mod errors;
mod jwt;

pub use errors::{AuthError, AuthResult};
pub use jwt::{bearer_token, Caller, JwtClaims, JwtConfig, JwtManager};
