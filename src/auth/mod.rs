//! Credentials, tokens and request authentication
//!
//! This module holds the security-sensitive core of Gatehouse: password
//! hashing, the credential store, access-token issuance and the Axum
//! middleware that checks bearer tokens.
//!
//! # Module Structure
//!
//! - [`auth::password`](crate::auth::password) - Argon2id hashing on the blocking pool
//! - [`auth::credentials`](crate::auth::credentials) - user creation and credential checks
//! - [`auth::jwt`](crate::auth::jwt) - HS256 access-token issuance and verification
//! - [`auth::service`](crate::auth::service) - signup and login flows
//! - [`auth::middleware`](crate::auth::middleware) - Axum layer and extractor for protected routes
//!
//! # Security Features
//!
//! - **Password Hashing**: Argon2id with a random salt per hash, verified via
//!   the algorithm's own routine against the stored PHC string
//! - **No Enumeration**: unknown user and wrong password fail identically
//! - **JWT Tokens**: HS256 signed, short-lived (2 minutes by default), with
//!   zero expiry leeway
//!
//! # Usage
//!
//! ```ignore
//! use gatehouse::auth::jwt::TokenIssuer;
//!
//! let issuer = TokenIssuer::new(&config.jwt_secret()?, config.auth.token_ttl_secs)?;
//! let token = issuer.issue_token("alice")?;
//! let claims = issuer.verify_token(&token.access_token)?;
//! ```
//!
//! ## Middleware
//!
//! ```ignore
//! use axum::middleware;
//! use gatehouse::auth::middleware::auth_middleware;
//!
//! let app = Router::new()
//!     .route("/protected", get(handler))
//!     .layer(middleware::from_fn_with_state(issuer, auth_middleware));
//! ```

/// User creation and credential verification.
pub mod credentials;
/// Access-token issuance and verification.
pub mod jwt;
/// Authentication middleware and extractors for protected routes.
pub mod middleware;
/// Argon2id password hashing.
pub mod password;
/// Signup and login flows.
pub mod service;
