use axum_test::TestServer;
use chrono::{DateTime, Duration, SubsecRound, Utc};
use rstest::rstest;
use serde_json::json;

use gatehouse::{
    api::routes::build_app,
    types::SignupRequest,
    utils::toml_config::{Argon2Config, GatehouseConfig},
    AppError, AppState,
};

const TEST_SECRET: &str = "test_jwt_secret_key_for_testing_only";

// ============= Test Helpers =============

fn create_test_state() -> AppState {
    let mut config = GatehouseConfig::default();
    config.auth.argon2 = Argon2Config::low_cost();

    AppState::new(config, TEST_SECRET).expect("Failed to create app state")
}

fn create_test_server() -> TestServer {
    let app = build_app(create_test_state());
    TestServer::new(app).expect("Failed to create test server")
}

async fn signup(server: &TestServer, username: &str, password: &str) -> serde_json::Value {
    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": username,
            "password": password,
            "first_name": "Test",
            "last_name": "User"
        }))
        .await;

    response.assert_status_ok();
    response.json()
}

fn expires_at(body: &serde_json::Value) -> DateTime<Utc> {
    body["expires_at"]
        .as_str()
        .expect("expires_at should be a string")
        .parse()
        .expect("expires_at should be RFC 3339")
}

// ============= Health Check Tests =============

#[tokio::test]
async fn test_health_check() {
    let server = create_test_server();

    let response = server.get("/health").await;
    response.assert_status_ok();
    response.assert_text("OK");
}

#[tokio::test]
async fn test_openapi_document() {
    let server = create_test_server();

    let response = server.get("/api-docs/openapi.json").await;
    response.assert_status_ok();

    let body: serde_json::Value = response.json();
    assert!(body["paths"]["/api/auth/signup"].is_object());
    assert!(body["paths"]["/api/auth/login"].is_object());
}

// ============= Signup Tests =============

#[tokio::test]
async fn test_signup_returns_token() {
    let server = create_test_server();

    let before = Utc::now();
    let body = signup(&server, "alice", "pw123").await;
    let after = Utc::now();

    assert!(body["access_token"].is_string());
    let expires_at = expires_at(&body);
    assert!(expires_at >= before.trunc_subsecs(0) + Duration::seconds(120));
    assert_eq!(expires_at.timestamp_subsec_nanos(), 0);
    assert!(expires_at <= after + Duration::seconds(120));
}

#[tokio::test]
async fn test_signup_duplicate_user() {
    let server = create_test_server();
    signup(&server, "alice", "pw123").await;

    let response = server
        .post("/api/auth/signup")
        .json(&json!({
            "username": "alice",
            "password": "pw456",
            "first_name": "A2",
            "last_name": "L2"
        }))
        .await;

    response.assert_status(axum::http::StatusCode::CONFLICT);
    let body: serde_json::Value = response.json();
    assert!(body["error"].as_str().unwrap().contains("already exists"));
}

#[rstest]
#[case::empty_username(json!({"username": "", "password": "pw", "first_name": "A", "last_name": "B"}))]
#[case::blank_password(json!({"username": "u", "password": "   ", "first_name": "A", "last_name": "B"}))]
#[case::empty_first_name(json!({"username": "u", "password": "pw", "first_name": "", "last_name": "B"}))]
#[case::empty_last_name(json!({"username": "u", "password": "pw", "first_name": "A", "last_name": ""}))]
#[tokio::test]
async fn test_signup_rejects_empty_fields(#[case] payload: serde_json::Value) {
    let server = create_test_server();

    let response = server.post("/api/auth/signup").json(&payload).await;

    response.assert_status_bad_request();
}

#[tokio::test]
async fn test_signup_missing_field() {
    let server = create_test_server();

    let response = server
        .post("/api/auth/signup")
        .json(&json!({ "username": "alice", "password": "pw123" }))
        .await;

    assert!(response.status_code().is_client_error());
}

// ============= Login Tests =============

#[tokio::test]
async fn test_signup_and_login() {
    let server = create_test_server();
    let first = signup(&server, "alice", "pw123").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "pw123" }))
        .await;

    response.assert_status_ok();
    let body: serde_json::Value = response.json();
    assert!(body["access_token"].is_string());
    assert_ne!(body["access_token"], first["access_token"]);
}

#[tokio::test]
async fn test_login_failures_are_indistinguishable() {
    let server = create_test_server();
    signup(&server, "alice", "pw123").await;

    let wrong_password = server
        .post("/api/auth/login")
        .json(&json!({ "username": "alice", "password": "wrongpw" }))
        .await;
    let unknown_user = server
        .post("/api/auth/login")
        .json(&json!({ "username": "nobody", "password": "pw123" }))
        .await;

    wrong_password.assert_status_unauthorized();
    unknown_user.assert_status_unauthorized();
    assert_eq!(wrong_password.text(), unknown_user.text());
}

#[tokio::test]
async fn test_login_is_case_sensitive() {
    let server = create_test_server();
    signup(&server, "alice", "pw123").await;

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "Alice", "password": "pw123" }))
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_login_rejects_empty_fields() {
    let server = create_test_server();

    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "", "password": "" }))
        .await;

    response.assert_status_bad_request();
}

// ============= Protected Route Tests =============

#[tokio::test]
async fn test_me_with_valid_token() {
    let server = create_test_server();
    let body = signup(&server, "alice", "pw123").await;
    let token = body["access_token"].as_str().unwrap();

    let response = server
        .get("/api/auth/me")
        .authorization_bearer(token)
        .await;

    response.assert_status_ok();
    let profile: serde_json::Value = response.json();
    assert_eq!(profile["username"], "alice");
    assert_eq!(profile["first_name"], "Test");
    assert!(profile.get("password_hash").is_none());
}

#[tokio::test]
async fn test_me_without_token() {
    let server = create_test_server();

    let response = server.get("/api/auth/me").await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_me_with_garbage_token() {
    let server = create_test_server();

    let response = server
        .get("/api/auth/me")
        .authorization_bearer("invalid.token.here")
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_me_with_token_from_other_secret() {
    let server = create_test_server();
    signup(&server, "alice", "pw123").await;

    let other = AppState::new(
        {
            let mut config = GatehouseConfig::default();
            config.auth.argon2 = Argon2Config::low_cost();
            config
        },
        "a-completely-different-secret-value-here",
    )
    .unwrap();
    let forged = other.auth_service.issuer().issue_token("alice").unwrap();

    let response = server
        .get("/api/auth/me")
        .authorization_bearer(&forged.access_token)
        .await;

    response.assert_status_unauthorized();
}

#[tokio::test]
async fn test_me_with_expired_token() {
    let state = create_test_state();
    let issuer = state.auth_service.issuer();
    let server = TestServer::new(build_app(state)).unwrap();
    signup(&server, "alice", "pw123").await;

    let expired = issuer
        .issue_token_at("alice", Utc::now() - Duration::minutes(3))
        .unwrap();

    let response = server
        .get("/api/auth/me")
        .authorization_bearer(&expired.access_token)
        .await;

    response.assert_status_unauthorized();
    let body: serde_json::Value = response.json();
    assert_eq!(body["error"], AppError::TokenExpired.to_string());
}

// ============= Concurrency Tests =============

#[tokio::test(flavor = "multi_thread", worker_threads = 4)]
async fn test_concurrent_signups_same_username() {
    let state = create_test_state();
    let mut handles = Vec::new();

    for i in 0..10 {
        let auth_service = state.auth_service.clone();
        handles.push(tokio::spawn(async move {
            let result = auth_service
                .signup(SignupRequest {
                    username: "racer".to_string(),
                    password: format!("pw{}", i),
                    first_name: "R".to_string(),
                    last_name: "R".to_string(),
                })
                .await;
            (i, result)
        }));
    }

    let mut winners = Vec::new();
    let mut duplicates = 0;
    for handle in handles {
        match handle.await.expect("task should not panic") {
            (i, Ok(_)) => winners.push(i),
            (_, Err(AppError::DuplicateUser(_))) => duplicates += 1,
            (_, Err(e)) => panic!("unexpected error: {}", e),
        }
    }

    assert_eq!(winners.len(), 1, "exactly one signup should win");
    assert_eq!(duplicates, 9);

    // Only the winner's password is stored
    let server = TestServer::new(build_app(state)).unwrap();
    let response = server
        .post("/api/auth/login")
        .json(&json!({ "username": "racer", "password": format!("pw{}", winners[0]) }))
        .await;
    response.assert_status_ok();
}
