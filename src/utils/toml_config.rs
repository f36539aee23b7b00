//! TOML-based configuration for Gatehouse
//!
//! This module provides declarative configuration for the server and the
//! authentication core via a TOML file (`gatehouse.toml`).
//!
//! Secrets never live in the file itself: the file names the environment
//! variable that holds the JWT signing secret, and that variable is read
//! once at startup.

use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};

use crate::auth::jwt::MIN_SECRET_LEN;

/// Root configuration structure loaded from gatehouse.toml
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct GatehouseConfig {
    #[serde(default)]
    pub server: ServerConfig,

    #[serde(default)]
    pub auth: AuthConfig,
}

// ============= Server Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ServerConfig {
    #[serde(default = "default_host")]
    pub host: String,

    #[serde(default = "default_port")]
    pub port: u16,

    #[serde(default = "default_log_level")]
    pub log_level: String,

    /// `pretty` for development, `json` for log aggregation
    #[serde(default = "default_log_format")]
    pub log_format: String,

    /// Upper bound on the time spent handling a single request
    #[serde(default = "default_request_timeout_secs")]
    pub request_timeout_secs: u64,

    /// Largest accepted request body
    #[serde(default = "default_max_body_bytes")]
    pub max_body_bytes: usize,
}

fn default_host() -> String {
    "127.0.0.1".to_string()
}

fn default_port() -> u16 {
    3000
}

fn default_log_level() -> String {
    "info".to_string()
}

fn default_log_format() -> String {
    "pretty".to_string()
}

fn default_request_timeout_secs() -> u64 {
    30
}

fn default_max_body_bytes() -> usize {
    64 * 1024
}

impl Default for ServerConfig {
    fn default() -> Self {
        Self {
            host: default_host(),
            port: default_port(),
            log_level: default_log_level(),
            log_format: default_log_format(),
            request_timeout_secs: default_request_timeout_secs(),
            max_body_bytes: default_max_body_bytes(),
        }
    }
}

// ============= Authentication Configuration =============

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AuthConfig {
    /// Environment variable name containing the JWT secret
    #[serde(default = "default_jwt_secret_env")]
    pub jwt_secret_env: String,

    /// Access token lifetime in seconds
    #[serde(default = "default_token_ttl_secs")]
    pub token_ttl_secs: i64,

    #[serde(default)]
    pub argon2: Argon2Config,
}

fn default_jwt_secret_env() -> String {
    "JWT_SECRET".to_string()
}

fn default_token_ttl_secs() -> i64 {
    120
}

impl Default for AuthConfig {
    fn default() -> Self {
        Self {
            jwt_secret_env: default_jwt_secret_env(),
            token_ttl_secs: default_token_ttl_secs(),
            argon2: Argon2Config::default(),
        }
    }
}

/// Argon2id cost parameters used for new password hashes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Argon2Config {
    #[serde(default = "default_argon2_memory_kib")]
    pub memory_kib: u32,

    #[serde(default = "default_argon2_iterations")]
    pub iterations: u32,

    #[serde(default = "default_argon2_parallelism")]
    pub parallelism: u32,
}

fn default_argon2_memory_kib() -> u32 {
    argon2::Params::DEFAULT_M_COST
}

fn default_argon2_iterations() -> u32 {
    argon2::Params::DEFAULT_T_COST
}

fn default_argon2_parallelism() -> u32 {
    argon2::Params::DEFAULT_P_COST
}

impl Default for Argon2Config {
    fn default() -> Self {
        Self {
            memory_kib: default_argon2_memory_kib(),
            iterations: default_argon2_iterations(),
            parallelism: default_argon2_parallelism(),
        }
    }
}

impl Argon2Config {
    /// Cheap parameters for tests and local experiments. Not for production.
    pub fn low_cost() -> Self {
        Self {
            memory_kib: 256,
            iterations: 1,
            parallelism: 1,
        }
    }
}

// ============= Configuration Loading & Validation =============

/// Errors that can occur during configuration loading
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    #[error("Configuration file not found: {0}")]
    FileNotFound(PathBuf),

    #[error("Failed to read configuration file: {0}")]
    ReadError(#[from] std::io::Error),

    #[error("Failed to parse TOML: {0}")]
    ParseError(#[from] toml::de::Error),

    #[error("Validation error: {0}")]
    ValidationError(String),

    #[error("Environment variable '{0}' referenced in config is not set")]
    MissingEnvVar(String),
}

impl GatehouseConfig {
    /// Load configuration from a TOML file and validate it
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let path = path.as_ref();

        if !path.exists() {
            return Err(ConfigError::FileNotFound(path.to_path_buf()));
        }

        let content = fs::read_to_string(path)?;
        let config: GatehouseConfig = toml::from_str(&content)?;

        config.validate()?;

        Ok(config)
    }

    /// Validate the configuration for internal consistency
    ///
    /// The secret env var itself is checked by [`jwt_secret`](Self::jwt_secret)
    /// so that a config file can be parsed on machines without the secret.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.auth.token_ttl_secs <= 0 {
            return Err(ConfigError::ValidationError(format!(
                "auth.token_ttl_secs must be positive, got {}",
                self.auth.token_ttl_secs
            )));
        }

        if self.auth.jwt_secret_env.trim().is_empty() {
            return Err(ConfigError::ValidationError(
                "auth.jwt_secret_env must name an environment variable".to_string(),
            ));
        }

        if self.server.request_timeout_secs == 0 {
            return Err(ConfigError::ValidationError(
                "server.request_timeout_secs must be positive".to_string(),
            ));
        }

        match self.server.log_format.as_str() {
            "pretty" | "json" => {}
            other => {
                return Err(ConfigError::ValidationError(format!(
                    "server.log_format must be 'pretty' or 'json', got '{}'",
                    other
                )))
            }
        }

        argon2::Params::new(
            self.auth.argon2.memory_kib,
            self.auth.argon2.iterations,
            self.auth.argon2.parallelism,
            None,
        )
        .map_err(|e| ConfigError::ValidationError(format!("auth.argon2: {}", e)))?;

        Ok(())
    }

    /// Get the JWT secret from the environment
    pub fn jwt_secret(&self) -> Result<String, ConfigError> {
        let secret = std::env::var(&self.auth.jwt_secret_env)
            .ok()
            .filter(|s| !s.is_empty())
            .ok_or_else(|| ConfigError::MissingEnvVar(self.auth.jwt_secret_env.clone()))?;

        if secret.len() < MIN_SECRET_LEN {
            return Err(ConfigError::ValidationError(format!(
                "{} must be at least {} bytes long",
                self.auth.jwt_secret_env, MIN_SECRET_LEN
            )));
        }

        Ok(secret)
    }

    /// Socket address string the server binds to
    pub fn bind_address(&self) -> String {
        format!("{}:{}", self.server.host, self.server.port)
    }
}
