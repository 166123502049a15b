//! # Configuration
//!
//! One JSON file describes the whole process. Every field has a default, so
//! `{}` is a valid config. A handful of environment variables override the
//! file for container deployments:
//!
//! | Variable | Field |
//! |---|---|
//! | `STOREFRONT_HOST` | `http.host` |
//! | `STOREFRONT_PORT` | `http.port` |
//! | `STOREFRONT_JWT_SECRET` | `auth.secret` |
//! | `STOREFRONT_SEED` | `seed_path` |

mod errors;

use std::fs;
use std::path::{Path, PathBuf};

use serde::{Deserialize, Serialize};

pub use errors::{ConfigError, ConfigResult};

use crate::auth::JwtConfig;
use crate::http_server::HttpServerConfig;
use crate::observability::LogConfig;
use crate::search::IndexConfig;

pub const ENV_HOST: &str = "STOREFRONT_HOST";
pub const ENV_PORT: &str = "STOREFRONT_PORT";
pub const ENV_JWT_SECRET: &str = "STOREFRONT_JWT_SECRET";
pub const ENV_SEED: &str = "STOREFRONT_SEED";

/// Token verification settings
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    #[serde(default = "default_secret")]
    pub secret: String,

    #[serde(default = "default_issuer")]
    pub issuer: String,

    #[serde(default = "default_issuer")]
    pub audience: String,

    /// Lifetime of tokens issued by local tooling (default: 3600)
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,
}

fn default_secret() -> String {
    JwtConfig::default().secret
}

fn default_issuer() -> String {
    "storefront".to_string()
}

fn default_token_ttl_secs() -> i64 {
    3600
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            secret: default_secret(),
            issuer: default_issuer(),
            audience: default_issuer(),
            token_ttl_secs: default_token_ttl_secs(),
        }
    }
}

impl AuthConfig {
    pub fn jwt_config(&self) -> JwtConfig {
        JwtConfig {
            secret: self.secret.clone(),
            access_token_ttl: chrono::Duration::seconds(self.token_ttl_secs),
            issuer: self.issuer.clone(),
            audience: self.audience.clone(),
        }
    }
}

/// Top-level process configuration
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct AppConfig {
    #[serde(default)]
    pub http: HttpServerConfig,

    #[serde(default)]
    pub index: IndexConfig,

    #[serde(default)]
    pub auth: AuthConfig,

    #[serde(default)]
    pub log: LogConfig,

    /// Seed catalog loaded and indexed at startup
    #[serde(default)]
    pub seed_path: Option<PathBuf>,
}

impl AppConfig {
    /// Load `path` and apply process environment overrides.
    pub fn load(path: &Path) -> ConfigResult<Self> {
        let mut config = Self::from_file(path)?;
        config.apply_overrides(|key| std::env::var(key).ok())?;
        Ok(config)
    }

    /// Parse `path` without looking at the environment.
    pub fn from_file(path: &Path) -> ConfigResult<Self> {
        let raw = fs::read_to_string(path).map_err(|e| ConfigError::Read {
            path: path.display().to_string(),
            reason: e.to_string(),
        })?;
        serde_json::from_str(&raw).map_err(|e| ConfigError::Parse {
            path: path.display().to_string(),
            reason: e.to_string(),
        })
    }

    /// Apply overrides from `lookup`, which maps variable names to values.
    pub fn apply_overrides<F>(&mut self, lookup: F) -> ConfigResult<()>
    where
        F: Fn(&str) -> Option<String>,
    {
        if let Some(host) = lookup(ENV_HOST) {
            self.http.host = host;
        }
        if let Some(port) = lookup(ENV_PORT) {
            self.http.port = port.parse().map_err(|_| ConfigError::InvalidOverride {
                key: ENV_PORT.to_string(),
                value: port.clone(),
            })?;
        }
        if let Some(secret) = lookup(ENV_JWT_SECRET) {
            self.auth.secret = secret;
        }
        if let Some(seed) = lookup(ENV_SEED) {
            self.seed_path = Some(PathBuf::from(seed));
        }
        Ok(())
    }
}
