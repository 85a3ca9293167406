//! Integration tests for the registration, login, and refresh flows.

mod helpers;

use http::StatusCode;

fn registration_body() -> serde_json::Value {
    serde_json::json!({
        "email": "a@x.com",
        "username": "alice",
        "password": "Abc12345!",
        "confirmPassword": "Abc12345!",
        "firstName": "Alice",
    })
}

#[tokio::test]
async fn test_register_success_returns_sanitized_user() {
    let app = helpers::TestApp::new();

    let response = app
        .request("POST", "/auth/register", Some(registration_body()), None)
        .await;

    assert_eq!(response.status, StatusCode::CREATED, "{:?}", response.body);

    let user = response.body.get("user").unwrap();
    assert_eq!(user.get("username").unwrap(), "alice");
    assert_eq!(user.get("email").unwrap(), "a@x.com");
    assert_eq!(user.get("role").unwrap(), "user");
    assert_eq!(user.get("isEmailVerified").unwrap(), false);
    assert!(user.get("passwordHash").is_none());
    assert!(user.get("password_hash").is_none());
    assert!(response.body.get("nextSteps").is_some());
}

#[tokio::test]
async fn test_register_duplicate_email_conflicts() {
    let app = helpers::TestApp::new();
    app.request("POST", "/auth/register", Some(registration_body()), None)
        .await;

    let mut second = registration_body();
    second["username"] = serde_json::json!("alice2");
    let response = app.request("POST", "/auth/register", Some(second), None).await;

    assert_eq!(response.status, StatusCode::CONFLICT);
    let error = response.body.get("error").unwrap();
    assert_eq!(error.get("statusCode").unwrap(), 409);
    assert!(error.get("timestamp").is_some());
    assert_eq!(error.get("path").unwrap(), "/auth/register");
    assert_eq!(error.get("method").unwrap(), "POST");
}

#[tokio::test]
async fn test_register_reports_all_invalid_fields_at_once() {
    let app = helpers::TestApp::new();

    let response = app
        .request(
            "POST",
            "/auth/register",
            Some(serde_json::json!({
                "email": "not-an-email",
                "username": "alice",
                "password": "short",
                "confirmPassword": "short",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);

    let error = response.body.get("error").unwrap();
    let violations = error.get("validationErrors").unwrap().as_array().unwrap();
    let fields: Vec<&str> = violations
        .iter()
        .map(|v| v.get("field").unwrap().as_str().unwrap())
        .collect();

    // Both failures arrive in a single response.
    assert_eq!(violations.len(), 2);
    assert!(fields.contains(&"email"));
    assert!(fields.contains(&"password"));

    let suggestions = error.get("suggestions").unwrap().as_array().unwrap();
    assert_eq!(suggestions.len(), violations.len());

    // Submitted passwords are never echoed back.
    for violation in violations {
        if violation.get("field").unwrap() == "password" {
            assert!(violation.get("value").is_none());
        }
    }
}

#[tokio::test]
async fn test_register_rejects_mismatched_confirmation() {
    let app = helpers::TestApp::new();

    let mut body = registration_body();
    body["confirmPassword"] = serde_json::json!("Different1!");
    let response = app.request("POST", "/auth/register", Some(body), None).await;

    assert_eq!(response.status, StatusCode::BAD_REQUEST);
    let violations = response.body["error"]["validationErrors"].as_array().unwrap();
    assert!(
        violations
            .iter()
            .any(|v| v["field"] == "confirmPassword")
    );
}

#[tokio::test]
async fn test_login_before_email_verification_is_forbidden() {
    let app = helpers::TestApp::new();
    app.request("POST", "/auth/register", Some(registration_body()), None)
        .await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "Abc12345!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn test_login_after_verification_returns_tokens() {
    let app = helpers::TestApp::new();
    app.request("POST", "/auth/register", Some(registration_body()), None)
        .await;
    app.mark_email_verified("alice").await;

    let response = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "Abc12345!",
            })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert!(!response.body["accessToken"].as_str().unwrap().is_empty());
    assert!(!response.body["refreshToken"].as_str().unwrap().is_empty());
    assert_eq!(response.body["expiresIn"], 900);
    assert!(response.body["user"].get("passwordHash").is_none());
}

#[tokio::test]
async fn test_login_failures_share_a_generic_message() {
    let app = helpers::TestApp::new();
    app.request("POST", "/auth/register", Some(registration_body()), None)
        .await;
    app.mark_email_verified("alice").await;

    let wrong_password = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "Wrong1234!",
            })),
            None,
        )
        .await;

    let unknown_user = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "nobody",
                "password": "Abc12345!",
            })),
            None,
        )
        .await;

    assert_eq!(wrong_password.status, StatusCode::UNAUTHORIZED);
    assert_eq!(unknown_user.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        wrong_password.body["error"]["message"],
        unknown_user.body["error"]["message"]
    );
}

#[tokio::test]
async fn test_refresh_rotates_the_full_pair() {
    let app = helpers::TestApp::new();
    app.create_test_user("a@x.com", "alice", "Abc12345!", gatehouse_entity::user::Role::User)
        .await;

    let login = app
        .request(
            "POST",
            "/auth/login",
            Some(serde_json::json!({
                "username": "alice",
                "password": "Abc12345!",
            })),
            None,
        )
        .await;
    let refresh_token = login.body["refreshToken"].as_str().unwrap().to_string();

    let response = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refreshToken": refresh_token })),
            None,
        )
        .await;

    assert_eq!(response.status, StatusCode::OK, "{:?}", response.body);
    assert_eq!(response.body["expiresIn"], 900);
    assert!(!response.body["accessToken"].as_str().unwrap().is_empty());
    assert!(!response.body["refreshToken"].as_str().unwrap().is_empty());

    // The new access token is immediately usable.
    let access = response.body["accessToken"].as_str().unwrap();
    let profile = app.request("GET", "/auth/profile", None, Some(access)).await;
    assert_eq!(profile.status, StatusCode::OK);
}

#[tokio::test]
async fn test_refresh_rejects_access_tokens_and_garbage() {
    let app = helpers::TestApp::new();
    app.create_test_user("a@x.com", "alice", "Abc12345!", gatehouse_entity::user::Role::User)
        .await;
    let access = app.login("alice", "Abc12345!").await;

    let from_access = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refreshToken": access })),
            None,
        )
        .await;
    assert_eq!(from_access.status, StatusCode::UNAUTHORIZED);

    let from_garbage = app
        .request(
            "POST",
            "/auth/refresh",
            Some(serde_json::json!({ "refreshToken": "junk.token.here" })),
            None,
        )
        .await;
    assert_eq!(from_garbage.status, StatusCode::UNAUTHORIZED);
    assert_eq!(
        from_access.body["error"]["message"],
        from_garbage.body["error"]["message"]
    );
}

#[tokio::test]
async fn test_health_endpoint_is_open() {
    let app = helpers::TestApp::new();

    let response = app.request("GET", "/health", None, None).await;

    assert_eq!(response.status, StatusCode::OK);
    assert_eq!(response.body["status"], "ok");
    assert!(response.body.get("uptimeSeconds").is_some());
}
