//! # Gatehouse
//!
//! A minimal authentication service built in Rust: it registers users with
//! Argon2id-hashed credentials and issues short-lived HS256 bearer tokens
//! after verifying those credentials.
//!
//! ## Overview
//!
//! Gatehouse can be used in two ways:
//!
//! 1. **As a standalone server** - Run the `gatehouse-server` binary
//! 2. **As a library** - Embed the credential and token core in your own service
//!
//! ## Quick Start (Library Usage)
//!
//! ```rust,ignore
//! use gatehouse::{AppState, GatehouseConfig};
//! use gatehouse::types::SignupRequest;
//!
//! let state = AppState::new(GatehouseConfig::default(), &jwt_secret)?;
//!
//! let token = state
//!     .auth_service
//!     .signup(SignupRequest {
//!         username: "alice".into(),
//!         password: "pw123".into(),
//!         first_name: "Alice".into(),
//!         last_name: "A".into(),
//!     })
//!     .await?;
//!
//! let claims = state.auth_service.issuer().verify_token(&token.access_token)?;
//! assert_eq!(claims.sub, "alice");
//! ```
//!
//! ## Feature Flags
//!
//! | Feature | Description |
//! |---------|-------------|
//! | `swagger-ui` | Serve interactive API docs at `/swagger-ui` |
//!
//! ## Modules
//!
//! - [`api`] - REST API handlers and routes
//! - [`auth`] - password hashing, credential store, tokens and middleware
//! - [`db`] - user store abstraction and in-memory backend
//! - [`types`] - request/response types and error handling
//! - [`utils`] - configuration and logging

#![cfg_attr(docsrs, feature(doc_cfg))]
#![warn(missing_docs)]
#![warn(rustdoc::missing_crate_level_docs)]

/// HTTP API handlers and routes.
pub mod api;
/// Credentials, tokens and request authentication.
pub mod auth;
/// CLI argument parsing and commands.
pub mod cli;
/// User storage.
pub mod db;
/// Core types (requests, responses, errors).
#[allow(missing_docs)]
pub mod types;
/// Configuration and logging utilities.
#[allow(missing_docs)]
pub mod utils;

// Re-export commonly used types
pub use auth::jwt::TokenIssuer;
pub use auth::service::AuthService;
pub use db::{MemoryUserStore, UserStore};
pub use types::{AppError, Result};
pub use utils::toml_config::{ConfigError, GatehouseConfig};

use crate::auth::credentials::CredentialStore;
use crate::auth::password::Argon2Hasher;
use std::sync::Arc;

/// Application state shared across handlers
#[derive(Clone)]
pub struct AppState {
    /// Configuration loaded at startup
    pub config: Arc<GatehouseConfig>,
    /// Signup and login flows
    pub auth_service: Arc<AuthService>,
}

impl AppState {
    /// Wires the auth core from configuration with an in-memory user store.
    pub fn new(config: GatehouseConfig, jwt_secret: &str) -> Result<Self> {
        Self::with_store(config, jwt_secret, Arc::new(MemoryUserStore::new()))
    }

    /// Wires the auth core on top of a caller-provided user store.
    pub fn with_store(
        config: GatehouseConfig,
        jwt_secret: &str,
        store: Arc<dyn UserStore>,
    ) -> Result<Self> {
        let hasher = Argon2Hasher::new(&config.auth.argon2)?;
        let issuer = TokenIssuer::new(jwt_secret, config.auth.token_ttl_secs)?;
        let credentials = CredentialStore::new(store, hasher);

        Ok(Self {
            config: Arc::new(config),
            auth_service: Arc::new(AuthService::new(credentials, Arc::new(issuer))),
        })
    }
}
