use crate::auth::credentials::CredentialStore;
use crate::auth::jwt::TokenIssuer;
use crate::types::{AppError, LoginRequest, Result, SignupRequest, TokenResponse, UserProfile};
use std::sync::Arc;
use tracing::{info, warn};

/// Signup and login flows.
///
/// Each flow runs the credential step and, only on success, asks the token
/// issuer for a fresh access token.
pub struct AuthService {
    credentials: CredentialStore,
    issuer: Arc<TokenIssuer>,
}

impl AuthService {
    /// Creates a new AuthService.
    pub fn new(credentials: CredentialStore, issuer: Arc<TokenIssuer>) -> Self {
        Self {
            credentials,
            issuer,
        }
    }

    /// The token issuer, shared with the request authorization middleware.
    pub fn issuer(&self) -> Arc<TokenIssuer> {
        Arc::clone(&self.issuer)
    }

    /// Registers a new user and issues their first token.
    pub async fn signup(&self, request: SignupRequest) -> Result<TokenResponse> {
        let user = self
            .credentials
            .create_user(
                &request.username,
                &request.password,
                &request.first_name,
                &request.last_name,
            )
            .await
            .inspect_err(|e| {
                if let AppError::DuplicateUser(_) = e {
                    warn!(username = %request.username, "signup rejected: username taken");
                }
            })?;

        info!(username = %user.username, "user registered");
        self.issuer.issue_token(&user.username)
    }

    /// Authenticates a user and issues a new token.
    pub async fn login(&self, request: LoginRequest) -> Result<TokenResponse> {
        let user = self
            .credentials
            .verify_credentials(&request.username, &request.password)
            .await
            .inspect_err(|e| {
                if let AppError::InvalidCredentials = e {
                    warn!(username = %request.username, "login rejected");
                }
            })?;

        info!(username = %user.username, "user logged in");
        self.issuer.issue_token(&user.username)
    }

    /// Public profile of the token holder.
    ///
    /// A valid token for a user that no longer exists in the store is
    /// treated as an invalid token.
    pub async fn profile(&self, username: &str) -> Result<UserProfile> {
        self.credentials
            .find_user(username)
            .await?
            .map(UserProfile::from)
            .ok_or_else(|| AppError::InvalidToken("unknown subject".to_string()))
    }
}
