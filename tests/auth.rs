use actix_web::{test, web, App};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use taskboard::auth::{LoginResponse, TokenService};
use taskboard::routes;
use taskboard::store::memory::{MemoryTaskStore, MemoryUserStore};
use taskboard::store::{TaskStore, UserStore};

const TEST_SECRET: &str = "test-signing-secret";

#[actix_rt::test]
async fn test_register_and_login_flow() {
    let tokens = web::Data::new(TokenService::new(TEST_SECRET));
    let user_store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let task_store: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());

    // Inline App setup
    let app = test::init_service(
        App::new()
            .app_data(tokens.clone())
            .app_data(web::Data::from(user_store.clone()))
            .app_data(web::Data::from(task_store.clone()))
            .service(routes::health::health)
            .configure(|cfg| routes::config(cfg, tokens.clone().into_inner())),
    )
    .await;

    // Register a new user
    let register_payload = json!({
        "username": "alice",
        "password": "s3cret!"
    });
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let status = resp.status();
    let body_bytes = test::read_body(resp).await;
    assert_eq!(
        status,
        actix_web::http::StatusCode::CREATED,
        "Registration failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes)
    );

    // Registration answers with a message only; the token comes from login.
    let register_response: serde_json::Value = serde_json::from_slice(&body_bytes).unwrap();
    assert_eq!(
        register_response["message"], "User registered successfully",
        "Unexpected registration body"
    );
    assert!(register_response.get("token").is_none());

    // Try to register the same user again (should fail)
    let req_conflict = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&register_payload)
        .to_request();
    let resp_conflict = test::call_service(&app, req_conflict).await;
    let status_conflict = resp_conflict.status();
    let body_conflict: serde_json::Value = test::read_body_json(resp_conflict).await;
    assert_eq!(
        status_conflict,
        actix_web::http::StatusCode::BAD_REQUEST,
        "Duplicate registration did not fail as expected. Body: {:?}",
        body_conflict
    );
    assert_eq!(body_conflict["error"], "Username is already taken");

    // Login with the registered user
    let login_payload = json!({
        "username": "alice",
        "password": "s3cret!"
    });
    let req_login = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&login_payload)
        .to_request();
    let resp_login = test::call_service(&app, req_login).await;
    let status_login = resp_login.status();
    let body_bytes_login = test::read_body(resp_login).await;

    assert_eq!(
        status_login,
        actix_web::http::StatusCode::OK,
        "Login failed. Body: {:?}",
        String::from_utf8_lossy(&body_bytes_login)
    );

    let login_response: LoginResponse =
        serde_json::from_slice(&body_bytes_login).expect("Failed to parse login response JSON");
    assert!(
        !login_response.token.is_empty(),
        "Token should be a non-empty string"
    );

    // The token resolves back to a verified identity: use it on a protected
    // route.
    let req_create_task = test::TestRequest::post()
        .uri("/tasks")
        .append_header(("Authorization", format!("Bearer {}", login_response.token)))
        .set_json(json!({ "title": "Task created by token test" }))
        .to_request();
    let resp_create_task = test::call_service(&app, req_create_task).await;
    assert_eq!(
        resp_create_task.status(),
        actix_web::http::StatusCode::CREATED
    );
}

#[actix_rt::test]
async fn test_concurrent_duplicate_registration() {
    let tokens = web::Data::new(TokenService::new(TEST_SECRET));
    let user_store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let task_store: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());

    let app = test::init_service(
        App::new()
            .app_data(tokens.clone())
            .app_data(web::Data::from(user_store.clone()))
            .app_data(web::Data::from(task_store.clone()))
            .configure(|cfg| routes::config(cfg, tokens.clone().into_inner())),
    )
    .await;

    let payload = json!({
        "username": "racer",
        "password": "Password123!"
    });

    let req_one = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&payload)
        .to_request();
    let req_two = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&payload)
        .to_request();

    let (resp_one, resp_two) = futures::join!(
        test::call_service(&app, req_one),
        test::call_service(&app, req_two),
    );

    let statuses = [resp_one.status(), resp_two.status()];
    let created = statuses
        .iter()
        .filter(|s| **s == actix_web::http::StatusCode::CREATED)
        .count();
    let rejected = statuses
        .iter()
        .filter(|s| **s == actix_web::http::StatusCode::BAD_REQUEST)
        .count();

    assert_eq!(
        created, 1,
        "Exactly one concurrent registration must win. Statuses: {:?}",
        statuses
    );
    assert_eq!(
        rejected, 1,
        "The losing registration must observe the duplicate. Statuses: {:?}",
        statuses
    );
}

#[actix_rt::test]
async fn test_invalid_registration_inputs() {
    let tokens = web::Data::new(TokenService::new(TEST_SECRET));
    let user_store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let task_store: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());

    let app = test::init_service(
        App::new()
            .app_data(tokens.clone())
            .app_data(web::Data::from(user_store.clone()))
            .app_data(web::Data::from(task_store.clone()))
            .configure(|cfg| routes::config(cfg, tokens.clone().into_inner())),
    )
    .await;

    let test_cases = vec![
        (
            json!({ "password": "Password123!" }),
            "missing username",
        ),
        (
            json!({ "username": "testuser" }),
            "missing password",
        ),
        (
            json!({ "username": "u", "password": "Password123!" }),
            "username too short",
        ),
        (
            json!({ "username": "a".repeat(33), "password": "Password123!" }),
            "username too long",
        ),
        (
            json!({ "username": "user name!", "password": "Password123!" }),
            "username with invalid chars",
        ),
        (
            json!({ "username": "testuser", "password": "123" }),
            "password too short",
        ),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/auth/register")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body_bytes = test::read_body(resp).await;

        assert_eq!(
            status,
            actix_web::http::StatusCode::BAD_REQUEST,
            "Test case failed: {}. Got {}. Body: {:?}",
            description,
            status,
            String::from_utf8_lossy(&body_bytes)
        );
    }
}

#[actix_rt::test]
async fn test_invalid_login_inputs() {
    let tokens = web::Data::new(TokenService::new(TEST_SECRET));
    let user_store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let task_store: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());

    let app = test::init_service(
        App::new()
            .app_data(tokens.clone())
            .app_data(web::Data::from(user_store.clone()))
            .app_data(web::Data::from(task_store.clone()))
            .configure(|cfg| routes::config(cfg, tokens.clone().into_inner())),
    )
    .await;

    // Register a user for the wrong-password case.
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(json!({ "username": "login_test_user", "password": "Password123!" }))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert!(
        resp.status().is_success(),
        "Setup: failed to register test user"
    );

    let test_cases = vec![
        (
            json!({ "password": "Password123!" }),
            "missing username",
        ),
        (
            json!({ "username": "login_test_user" }),
            "missing password",
        ),
        (
            json!({ "username": "login_test_user", "password": "WrongPassword123!" }),
            "incorrect password",
        ),
        (
            json!({ "username": "nonexistent_user", "password": "Password123!" }),
            "non-existent user",
        ),
    ];

    for (payload, description) in test_cases {
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(&payload)
            .to_request();

        let resp = test::call_service(&app, req).await;
        let status = resp.status();
        let body_bytes = test::read_body(resp).await;

        assert_eq!(
            status,
            actix_web::http::StatusCode::BAD_REQUEST,
            "Test case failed: {}. Got {}. Body: {:?}",
            description,
            status,
            String::from_utf8_lossy(&body_bytes)
        );
    }

    // Unknown-user and wrong-password rejections carry the same message, so
    // login cannot be used to probe which usernames exist.
    let mut bodies = Vec::new();
    for payload in [
        json!({ "username": "login_test_user", "password": "WrongPassword123!" }),
        json!({ "username": "nonexistent_user", "password": "Password123!" }),
    ] {
        let req = test::TestRequest::post()
            .uri("/auth/login")
            .set_json(&payload)
            .to_request();
        let resp = test::call_service(&app, req).await;
        let body: serde_json::Value = test::read_body_json(resp).await;
        bodies.push(body);
    }
    assert_eq!(bodies[0], bodies[1]);
    assert_eq!(bodies[0]["error"], "Invalid username or password");
}

#[actix_rt::test]
async fn test_tampered_and_foreign_tokens_are_rejected() {
    let tokens = web::Data::new(TokenService::new(TEST_SECRET));
    let user_store: Arc<dyn UserStore> = Arc::new(MemoryUserStore::new());
    let task_store: Arc<dyn TaskStore> = Arc::new(MemoryTaskStore::new());

    let app = test::init_service(
        App::new()
            .app_data(tokens.clone())
            .app_data(web::Data::from(user_store.clone()))
            .app_data(web::Data::from(task_store.clone()))
            .configure(|cfg| routes::config(cfg, tokens.clone().into_inner())),
    )
    .await;

    // Register and log in to obtain a genuine token.
    let creds = json!({ "username": "mallory_target", "password": "Password123!" });
    let req = test::TestRequest::post()
        .uri("/auth/register")
        .set_json(&creds)
        .to_request();
    assert!(test::call_service(&app, req).await.status().is_success());

    let req = test::TestRequest::post()
        .uri("/auth/login")
        .set_json(&creds)
        .to_request();
    let resp = test::call_service(&app, req).await;
    let login: LoginResponse = test::read_body_json(resp).await;

    // The genuine token is accepted.
    let req = test::TestRequest::get()
        .uri("/tasks")
        .append_header(("Authorization", format!("Bearer {}", login.token)))
        .to_request();
    assert_eq!(
        test::call_service(&app, req).await.status(),
        actix_web::http::StatusCode::OK
    );

    // The same token with its signature corrupted is not. The replacement
    // character differs from the original in a high bit, so the corruption
    // lands in signature bits rather than base64 trailing padding.
    let mut tampered = login.token.clone();
    let last = tampered.pop().unwrap();
    tampered.push(if ('Q'..='T').contains(&last) { 'A' } else { 'Q' });

    let req = test::TestRequest::get()
        .uri("/tasks")
        .append_header(("Authorization", format!("Bearer {}", tampered)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    // A token minted under a different secret is not, either.
    let foreign = TokenService::new("some-other-secret")
        .issue(uuid::Uuid::new_v4())
        .unwrap();
    let req = test::TestRequest::get()
        .uri("/tasks")
        .append_header(("Authorization", format!("Bearer {}", foreign)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    assert_eq!(resp.status(), actix_web::http::StatusCode::UNAUTHORIZED);

    // The rejection does not say why.
    let req = test::TestRequest::get()
        .uri("/tasks")
        .append_header(("Authorization", format!("Bearer {}", foreign)))
        .to_request();
    let resp = test::call_service(&app, req).await;
    let body: serde_json::Value = test::read_body_json(resp).await;
    assert_eq!(body["error"], "Invalid or expired token");
}
