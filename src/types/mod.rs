use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

// ============= Authentication Types =============

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct SignupRequest {
    pub username: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct LoginRequest {
    pub username: String,
    pub password: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct TokenResponse {
    pub access_token: String,
    pub expires_at: DateTime<Utc>,
}

/// JWT claims carried by every access token.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claims {
    /// Username the token was issued to
    pub sub: String,
    /// Issued-at, seconds since the Unix epoch
    pub iat: i64,
    /// Expiry, seconds since the Unix epoch
    pub exp: i64,
    /// Unique token id
    pub jti: String,
}

// ============= User Types =============

/// A registered user as held by the user store.
#[derive(Debug, Clone)]
pub struct User {
    pub username: String,
    /// PHC-formatted Argon2id hash (algorithm, parameters, salt and digest)
    pub password_hash: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

/// Public view of a user, safe to return to clients.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct UserProfile {
    pub username: String,
    pub first_name: String,
    pub last_name: String,
    pub created_at: DateTime<Utc>,
}

impl From<User> for UserProfile {
    fn from(user: User) -> Self {
        Self {
            username: user.username,
            first_name: user.first_name,
            last_name: user.last_name,
            created_at: user.created_at,
        }
    }
}

// ============= Error Types =============

/// Message shared by both login failure causes.
pub const INVALID_CREDENTIALS_MESSAGE: &str =
    "Username or password may be incorrect. Please try again";

#[derive(Debug, thiserror::Error)]
pub enum AppError {
    #[error("User with username '{0}' already exists")]
    DuplicateUser(String),

    #[error("{}", INVALID_CREDENTIALS_MESSAGE)]
    InvalidCredentials,

    #[error("Invalid token: {0}")]
    InvalidToken(String),

    #[error("Token has expired")]
    TokenExpired,

    #[error("Invalid input: {0}")]
    InvalidInput(String),

    #[error("Internal error: {0}")]
    Internal(String),
}

impl axum::response::IntoResponse for AppError {
    fn into_response(self) -> axum::response::Response {
        let status = match &self {
            AppError::DuplicateUser(_) => axum::http::StatusCode::CONFLICT,
            AppError::InvalidCredentials => axum::http::StatusCode::UNAUTHORIZED,
            AppError::InvalidToken(_) => axum::http::StatusCode::UNAUTHORIZED,
            AppError::TokenExpired => axum::http::StatusCode::UNAUTHORIZED,
            AppError::InvalidInput(_) => axum::http::StatusCode::BAD_REQUEST,
            AppError::Internal(_) => axum::http::StatusCode::INTERNAL_SERVER_ERROR,
        };

        let message = match self {
            AppError::Internal(msg) => {
                tracing::error!(error = %msg, "internal error while handling request");
                "Internal server error".to_string()
            }
            other => other.to_string(),
        };

        let body = serde_json::json!({
            "error": message
        });

        (status, axum::Json(body)).into_response()
    }
}

pub type Result<T> = std::result::Result<T, AppError>;
