use crate::{
    auth::middleware::AuthUser,
    types::{AppError, LoginRequest, Result, SignupRequest, TokenResponse, UserProfile},
    AppState,
};
use axum::{extract::State, Json};

fn require_non_empty(field: &str, value: &str) -> Result<()> {
    if value.trim().is_empty() {
        return Err(AppError::InvalidInput(format!("{} is required", field)));
    }
    Ok(())
}

/// Register a new user
#[utoipa::path(
    post,
    path = "/api/auth/signup",
    request_body = SignupRequest,
    responses(
        (status = 200, description = "User registered successfully", body = TokenResponse),
        (status = 400, description = "Invalid input"),
        (status = 409, description = "User already exists")
    ),
    tag = "auth"
)]
pub async fn signup(
    State(state): State<AppState>,
    Json(payload): Json<SignupRequest>,
) -> Result<Json<TokenResponse>> {
    require_non_empty("username", &payload.username)?;
    require_non_empty("password", &payload.password)?;
    require_non_empty("first_name", &payload.first_name)?;
    require_non_empty("last_name", &payload.last_name)?;

    let token = state.auth_service.signup(payload).await?;

    Ok(Json(token))
}

/// Login with username and password
#[utoipa::path(
    post,
    path = "/api/auth/login",
    request_body = LoginRequest,
    responses(
        (status = 200, description = "Login successful", body = TokenResponse),
        (status = 400, description = "Invalid input"),
        (status = 401, description = "Invalid credentials")
    ),
    tag = "auth"
)]
pub async fn login(
    State(state): State<AppState>,
    Json(payload): Json<LoginRequest>,
) -> Result<Json<TokenResponse>> {
    require_non_empty("username", &payload.username)?;
    require_non_empty("password", &payload.password)?;

    let token = state.auth_service.login(payload).await?;

    Ok(Json(token))
}

/// Profile of the bearer token's subject
#[utoipa::path(
    get,
    path = "/api/auth/me",
    responses(
        (status = 200, description = "Token is valid", body = UserProfile),
        (status = 401, description = "Missing, invalid or expired token")
    ),
    tag = "auth"
)]
pub async fn me(
    State(state): State<AppState>,
    AuthUser(claims): AuthUser,
) -> Result<Json<UserProfile>> {
    let profile = state.auth_service.profile(&claims.sub).await?;

    Ok(Json(profile))
}
