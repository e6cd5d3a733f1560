//! Integration tests: registration, login, auth gate, profile lookup.
//!
//! Run with `cargo test`. Tests that need a database are skipped unless
//! `TEST_DATABASE_URL` is set (Postgres, run migrations first).

use axum::body::Body;
use axum::http::{Request, StatusCode};
use devconnector::auth::TokenSigner;
use devconnector::{create_app, db, AppState};
use tower::util::ServiceExt;

const TEST_JWT_SECRET: &str = "test-jwt-secret-min-32-chars!!";

async fn test_state(database_url: &str) -> Result<AppState, Box<dyn std::error::Error>> {
    let db_pool = db::create_pool(database_url).await?;
    Ok(AppState {
        db: db_pool,
        token_signer: TokenSigner::new(TEST_JWT_SECRET.to_string()),
    })
}

async fn test_app() -> Option<(axum::Router, AppState)> {
    let database_url = match std::env::var("TEST_DATABASE_URL") {
        Ok(u) => u,
        Err(_) => {
            eprintln!("Skip integration test: set TEST_DATABASE_URL");
            return None;
        }
    };
    let state = match test_state(&database_url).await {
        Ok(s) => s,
        Err(e) => {
            eprintln!("Skip integration test: {}", e);
            return None;
        }
    };
    Some((create_app(state.clone()), state))
}

fn unique_email() -> String {
    format!(
        "test-{}@example.com",
        std::time::SystemTime::now()
            .duration_since(std::time::UNIX_EPOCH)
            .unwrap()
            .as_nanos()
    )
}

fn json_request(method: &str, uri: &str, body: serde_json::Value) -> Request<Body> {
    Request::builder()
        .method(method)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap()
}

async fn body_json(res: axum::response::Response) -> serde_json::Value {
    let bytes = axum::body::to_bytes(res.into_body(), usize::MAX)
        .await
        .unwrap();
    serde_json::from_slice(&bytes).unwrap()
}

#[tokio::test]
async fn root_returns_api_running() {
    let Some((app, _)) = test_app().await else { return };
    let req = Request::builder().uri("/").body(Body::empty()).unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
}

#[tokio::test]
async fn register_then_login_roundtrip() {
    let Some((app, state)) = test_app().await else { return };
    let email = unique_email();

    let req = json_request(
        "POST",
        "/api/users",
        serde_json::json!({ "name": "Test User", "email": email, "password": "password123" }),
    );
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK, "register should succeed");
    let json = body_json(res).await;
    let register_token = json.get("token").and_then(|v| v.as_str()).unwrap();
    let registered_id = state.token_signer.verify(register_token).unwrap();

    let req = json_request(
        "POST",
        "/api/auth",
        serde_json::json!({ "email": email, "password": "password123" }),
    );
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK, "login should succeed");
    let json = body_json(res).await;
    let login_token = json.get("token").and_then(|v| v.as_str()).unwrap();
    assert_eq!(state.token_signer.verify(login_token).unwrap(), registered_id);
}

#[tokio::test]
async fn duplicate_registration_rejected() {
    let Some((app, _)) = test_app().await else { return };
    let email = unique_email();
    let body =
        serde_json::json!({ "name": "Test User", "email": email, "password": "password123" });

    let res = app
        .clone()
        .oneshot(json_request("POST", "/api/users", body.clone()))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    let res = app
        .oneshot(json_request("POST", "/api/users", body))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert_eq!(
        json["errors"][0]["msg"].as_str(),
        Some("User already exists.")
    );
}

#[tokio::test]
async fn register_enumerates_all_validation_errors() {
    let Some((app, _)) = test_app().await else { return };
    let req = json_request(
        "POST",
        "/api/users",
        serde_json::json!({ "name": "", "email": "not-an-email", "password": "shrt" }),
    );
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    let errors = json["errors"].as_array().unwrap();
    assert_eq!(errors.len(), 3, "all three rule violations should be listed");
    let msgs: Vec<&str> = errors.iter().filter_map(|e| e["msg"].as_str()).collect();
    assert!(msgs.contains(&"Name is required."));
    assert!(msgs.contains(&"Please include a valid email."));
    assert!(msgs.contains(&"Please enter a password with 6 or more characters."));
}

#[tokio::test]
async fn login_never_reveals_which_check_failed() {
    let Some((app, _)) = test_app().await else { return };
    let email = unique_email();

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({ "name": "Test User", "email": email, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);

    // Wrong password for a known email.
    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/auth",
            serde_json::json!({ "email": email, "password": "wrongpassword" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let wrong_password = body_json(res).await;

    // Unknown email.
    let res = app
        .oneshot(json_request(
            "POST",
            "/api/auth",
            serde_json::json!({ "email": unique_email(), "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let unknown_email = body_json(res).await;

    assert_eq!(wrong_password, unknown_email);
    assert_eq!(
        wrong_password["errors"][0]["msg"].as_str(),
        Some("Invalid credentials.")
    );
}

#[tokio::test]
async fn protected_route_requires_token() {
    let Some((app, _)) = test_app().await else { return };

    let req = Request::builder()
        .uri("/api/auth")
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(res).await;
    assert_eq!(
        json["msg"].as_str(),
        Some("No token, authorization denied.")
    );

    let req = Request::builder()
        .uri("/api/auth")
        .header("x-auth-token", "garbage")
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::UNAUTHORIZED);
    let json = body_json(res).await;
    assert_eq!(json["msg"].as_str(), Some("Token is not valid."));
}

#[tokio::test]
async fn current_user_omits_password() {
    let Some((app, _)) = test_app().await else { return };
    let email = unique_email();

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({ "name": "Test User", "email": email, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let token = body_json(res).await["token"].as_str().unwrap().to_string();

    let req = Request::builder()
        .uri("/api/auth")
        .header("x-auth-token", &token)
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["email"].as_str(), Some(email.as_str()));
    assert_eq!(json["name"].as_str(), Some("Test User"));
    assert!(json["avatar"].as_str().is_some());
    assert!(json.get("password").is_none());
    assert!(json.get("password_hash").is_none());
}

#[tokio::test]
async fn profile_me_with_and_without_profile() {
    let Some((app, state)) = test_app().await else { return };
    let email = unique_email();

    let res = app
        .clone()
        .oneshot(json_request(
            "POST",
            "/api/users",
            serde_json::json!({ "name": "Profile User", "email": email, "password": "password123" }),
        ))
        .await
        .unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let token = body_json(res).await["token"].as_str().unwrap().to_string();
    let user_id = state.token_signer.verify(&token).unwrap();

    // No profile yet.
    let req = Request::builder()
        .uri("/api/profile/me")
        .header("x-auth-token", &token)
        .body(Body::empty())
        .unwrap();
    let res = app.clone().oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::BAD_REQUEST);
    let json = body_json(res).await;
    assert_eq!(
        json["msg"].as_str(),
        Some("There is no profile for this user.")
    );

    // Seed a profile row and read it back.
    sqlx::query("INSERT INTO profiles (user_id, status, skills) VALUES ($1, $2, $3)")
        .bind(user_id)
        .bind("Developer")
        .bind(vec!["Rust".to_string(), "SQL".to_string()])
        .execute(&state.db)
        .await
        .unwrap();

    let req = Request::builder()
        .uri("/api/profile/me")
        .header("x-auth-token", &token)
        .body(Body::empty())
        .unwrap();
    let res = app.oneshot(req).await.unwrap();
    assert_eq!(res.status(), StatusCode::OK);
    let json = body_json(res).await;
    assert_eq!(json["status"].as_str(), Some("Developer"));
    assert_eq!(json["user"]["name"].as_str(), Some("Profile User"));
    assert!(json["user"]["avatar"].as_str().is_some());
    assert!(json["user"].get("password").is_none());
    assert!(json["user"].get("email").is_none());
}
