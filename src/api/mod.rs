//! HTTP API Handlers and Routes
//!
//! This module provides the REST API layer for Gatehouse, built on the Axum web framework.
//!
//! # Module Structure
//!
//! - [`api::handlers`](crate::api::handlers) - Request handlers for each endpoint
//! - [`api::routes`](crate::api::routes) - Route definitions and router configuration
//!
//! # API Endpoints
//!
//! ## Authentication (`/api/auth`)
//! - `POST /api/auth/signup` - Register a new user and receive a token
//! - `POST /api/auth/login` - Login and receive a token
//! - `GET /api/auth/me` - Profile of the token holder (bearer token required)
//!
//! ## Health
//! - `GET /health` - Health check endpoint
//!
//! # Authentication
//!
//! Protected endpoints require a valid, unexpired token in the `Authorization` header:
//! ```text
//! Authorization: Bearer <token>
//! ```
//!
//! # OpenAPI Documentation
//!
//! The OpenAPI document is served at `/api-docs/openapi.json`. When the
//! `swagger-ui` feature is enabled, interactive documentation is available
//! at `/swagger-ui/`.

use crate::types::{LoginRequest, SignupRequest, TokenResponse, UserProfile};
use utoipa::OpenApi;

/// Request and response handlers for all API endpoints.
pub mod handlers;
/// Router configuration and route definitions.
pub mod routes;

/// OpenAPI description of the HTTP API.
#[derive(OpenApi)]
#[openapi(
    paths(handlers::auth::signup, handlers::auth::login, handlers::auth::me),
    components(schemas(SignupRequest, LoginRequest, TokenResponse, UserProfile)),
    tags((name = "auth", description = "Signup, login and token introspection"))
)]
pub struct ApiDoc;
