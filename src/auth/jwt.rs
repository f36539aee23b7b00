use crate::types::{AppError, Claims, Result, TokenResponse};
use chrono::{DateTime, Duration, SubsecRound, Utc};
use jsonwebtoken::{
    decode, encode, errors::ErrorKind, Algorithm, DecodingKey, EncodingKey, Header, Validation,
};
use uuid::Uuid;

/// Minimum accepted length of the signing secret, in bytes.
pub const MIN_SECRET_LEN: usize = 32;

/// Token issuer for short-lived HS256 access tokens.
///
/// The signing secret is handed in once at construction and never rotated
/// for the lifetime of the issuer. Verification needs nothing but the token
/// and that same secret.
pub struct TokenIssuer {
    encoding_key: EncodingKey,
    decoding_key: DecodingKey,
    ttl: Duration,
}

impl TokenIssuer {
    /// Creates a new TokenIssuer.
    ///
    /// # Arguments
    /// * `secret` - Secret key for signing JWTs (at least [`MIN_SECRET_LEN`] bytes)
    /// * `ttl_secs` - Access token validity in seconds
    pub fn new(secret: &str, ttl_secs: i64) -> Result<Self> {
        if secret.len() < MIN_SECRET_LEN {
            return Err(AppError::Internal(format!(
                "JWT secret must be at least {} bytes",
                MIN_SECRET_LEN
            )));
        }
        if ttl_secs <= 0 {
            return Err(AppError::Internal(
                "Token TTL must be a positive number of seconds".to_string(),
            ));
        }

        Ok(Self {
            encoding_key: EncodingKey::from_secret(secret.as_bytes()),
            decoding_key: DecodingKey::from_secret(secret.as_bytes()),
            ttl: Duration::seconds(ttl_secs),
        })
    }

    /// Issues an access token for `subject`, valid from now until now + TTL.
    ///
    /// No existence check is made; callers have already authenticated the
    /// subject.
    pub fn issue_token(&self, subject: &str) -> Result<TokenResponse> {
        self.issue_token_at(subject, Utc::now())
    }

    /// Issues an access token as if it had been issued at `issued_at`.
    ///
    /// Issuance is taken at whole-second precision, so the returned
    /// `expires_at` is exactly the instant encoded in the `exp` claim.
    pub fn issue_token_at(
        &self,
        subject: &str,
        issued_at: DateTime<Utc>,
    ) -> Result<TokenResponse> {
        let issued_at = issued_at.trunc_subsecs(0);
        let expires_at = issued_at + self.ttl;
        let claims = Claims {
            sub: subject.to_string(),
            iat: issued_at.timestamp(),
            exp: expires_at.timestamp(),
            jti: Uuid::new_v4().to_string(),
        };

        let access_token = encode(&Header::new(Algorithm::HS256), &claims, &self.encoding_key)
            .map_err(|e| AppError::Internal(format!("Failed to generate token: {}", e)))?;

        tracing::debug!(subject = %subject, expires_at = %expires_at, "issued access token");

        Ok(TokenResponse {
            access_token,
            expires_at,
        })
    }

    /// Verifies a token's signature and expiry and returns its claims.
    ///
    /// A token is expired from the instant its `exp` claim is reached; no
    /// clock leeway is granted.
    pub fn verify_token(&self, token: &str) -> Result<Claims> {
        let mut validation = Validation::new(Algorithm::HS256);
        validation.leeway = 0;
        validation.set_required_spec_claims(&["exp", "sub"]);

        let claims = decode::<Claims>(token, &self.decoding_key, &validation)
            .map(|data| data.claims)
            .map_err(|e| match e.kind() {
                ErrorKind::ExpiredSignature => AppError::TokenExpired,
                _ => AppError::InvalidToken(e.to_string()),
            })?;

        if Utc::now().timestamp() >= claims.exp {
            return Err(AppError::TokenExpired);
        }

        Ok(claims)
    }
}
