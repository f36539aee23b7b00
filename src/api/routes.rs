use crate::api::{handlers, ApiDoc};
use crate::auth::middleware::auth_middleware;
use crate::AppState;
use axum::{
    http::StatusCode,
    middleware,
    routing::{get, post},
    Json, Router,
};
use std::time::Duration;
use tower::ServiceBuilder;
use tower_http::{limit::RequestBodyLimitLayer, timeout::TimeoutLayer, trace::TraceLayer};
use utoipa::OpenApi;

/// Routes mounted under `/api`.
pub fn create_router(state: &AppState) -> Router<AppState> {
    let public_routes = Router::new()
        // Public routes (no auth required)
        .route("/auth/signup", post(handlers::auth::signup))
        .route("/auth/login", post(handlers::auth::login));

    let protected_routes = Router::new()
        // Protected routes (auth required)
        .route("/auth/me", get(handlers::auth::me))
        .layer(middleware::from_fn_with_state(
            state.auth_service.issuer(),
            auth_middleware,
        ));

    public_routes.merge(protected_routes)
}

/// Complete application: health check, API, OpenAPI document and the
/// transport layers (tracing, request timeout, body limit).
pub fn build_app(state: AppState) -> Router {
    let server = &state.config.server;
    let timeout = Duration::from_secs(server.request_timeout_secs);
    let max_body_bytes = server.max_body_bytes;

    let app = Router::new()
        .route("/health", get(|| async { "OK" }))
        .route(
            "/api-docs/openapi.json",
            get(|| async { Json(ApiDoc::openapi()) }),
        )
        .nest("/api", create_router(&state));

    #[cfg(feature = "swagger-ui")]
    let app = app.merge(
        utoipa_swagger_ui::SwaggerUi::new("/swagger-ui")
            .url("/api-docs/swagger.json", ApiDoc::openapi()),
    );

    app.layer(
        ServiceBuilder::new()
            .layer(TraceLayer::new_for_http())
            .layer(RequestBodyLimitLayer::new(max_body_bytes))
            .layer(TimeoutLayer::with_status_code(
                StatusCode::REQUEST_TIMEOUT,
                timeout,
            )),
    )
    .with_state(state)
}
