use std::sync::Arc;

use api_adapters::{router, AppState};
use auth_adapters::{default_token_ttl, JwtTokenAuthority};
use axum::body::{to_bytes, Body};
use axum::http::header::{AUTHORIZATION, CONTENT_TYPE};
use axum::http::{Method, Request, StatusCode};
use axum::Router;
use serde_json::{json, Value};
use services::BoardService;
use storage_adapters::{InMemoryAdRepository, InMemoryUserRepository};
use tower::ServiceExt;

const KEY: &[u8] = b"http-routes-test-key";

fn app() -> Router {
    let service = BoardService::new(
        Arc::new(InMemoryAdRepository::new()),
        Arc::new(InMemoryUserRepository::new()),
        Arc::new(JwtTokenAuthority::new(KEY, default_token_ttl())),
    );
    router(AppState::new(service))
}

async fn call(
    app: &Router,
    method: Method,
    uri: &str,
    token: Option<&str>,
    body: Option<Value>,
) -> (StatusCode, Value) {
    let mut builder = Request::builder().method(method).uri(uri);
    if let Some(token) = token {
        builder = builder.header(AUTHORIZATION, token);
    }
    let request = match body {
        Some(body) => builder
            .header(CONTENT_TYPE, "application/json")
            .body(Body::from(body.to_string()))
            .unwrap(),
        None => builder.body(Body::empty()).unwrap(),
    };

    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = to_bytes(response.into_body(), usize::MAX).await.unwrap();
    let json = if bytes.is_empty() {
        Value::Null
    } else {
        serde_json::from_slice(&bytes).unwrap()
    };
    (status, json)
}

async fn register(app: &Router, nickname: &str) -> i64 {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/users",
        None,
        Some(json!({
            "first_name": "Timur",
            "second_name": "Zykov",
            "nickname": nickname,
            "password": "abacaba",
            "email": "e@x.com",
            "phone": "123",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"]["user_id"].as_i64().unwrap()
}

async fn login(app: &Router, nickname: &str) -> String {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/users/login",
        None,
        Some(json!({ "nickname": nickname, "password": "abacaba" })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    assert!(body["error"].is_null());
    body["token"].as_str().unwrap().to_string()
}

async fn post_ad(app: &Router, token: &str, user_id: i64, title: &str) -> Value {
    let (status, body) = call(
        app,
        Method::POST,
        "/api/v1/ads",
        Some(token),
        Some(json!({ "title": title, "text": "world", "user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK, "{body}");
    body["data"].clone()
}

#[tokio::test]
async fn register_login_and_post_an_ad() {
    let app = app();
    let user_id = register(&app, "skyberg11").await;
    assert_eq!(user_id, 1);

    let (_, user) = call(&app, Method::GET, "/api/v1/users/1", None, None).await;
    assert_eq!(user["data"]["nickname"], "skyberg11");
    assert!(user["data"].get("password").is_none());

    let token = login(&app, "skyberg11").await;
    let ad = post_ad(&app, &token, user_id, "hello").await;
    assert_eq!(ad["id"], 1);
    assert_eq!(ad["title"], "hello");
    assert_eq!(ad["text"], "world");
    assert_eq!(ad["author_id"], user_id);
    assert_eq!(ad["published"], false);
    assert_eq!(ad["creation_time"], ad["update_time"]);
}

#[tokio::test]
async fn login_failures() {
    let app = app();
    register(&app, "skyberg11").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/users/login",
        None,
        Some(json!({ "nickname": "nobody", "password": "abacaba" })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["data"].is_null());

    let (status, _) = call(
        &app,
        Method::POST,
        "/api/v1/users/login",
        None,
        Some(json!({ "nickname": "skyberg11", "password": "wrong" })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
}

#[tokio::test]
async fn duplicate_nickname_is_rejected() {
    let app = app();
    register(&app, "skyberg11").await;

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/users",
        None,
        Some(json!({
            "first_name": "Other",
            "second_name": "Person",
            "nickname": "skyberg11",
            "password": "x",
            "email": "o@x.com",
            "phone": "9",
        })),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert!(body["error"].is_string());
}

#[tokio::test]
async fn token_failures_map_to_message_bodies() {
    let app = app();
    let alice = register(&app, "alice").await;
    register(&app, "bob").await;
    let bob_token = login(&app, "bob").await;
    let ad = json!({ "title": "hello", "text": "world", "user_id": alice });

    let (status, body) = call(&app, Method::POST, "/api/v1/ads", None, Some(ad.clone())).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "bad request" }));

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/ads",
        Some("garbage"),
        Some(ad.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body, json!({ "message": "bad request" }));

    let (status, body) = call(
        &app,
        Method::POST,
        "/api/v1/ads",
        Some(&bob_token),
        Some(ad.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body, json!({ "message": "unmatch" }));

    let forged = domains::TokenAuthority::issue(
        &JwtTokenAuthority::new(b"another-key", default_token_ttl()),
        alice,
    )
    .unwrap();
    let (status, body) = call(&app, Method::POST, "/api/v1/ads", Some(&forged), Some(ad)).await;
    assert_eq!(status, StatusCode::UNAUTHORIZED);
    assert_eq!(body, json!({ "message": "unauthorized" }));

    let (_, listing) = call(&app, Method::GET, "/api/v1/ads?title=", None, None).await;
    assert_eq!(listing["data"], json!([]));
}

#[tokio::test]
async fn validation_errors_use_the_error_envelope() {
    let app = app();
    let user_id = register(&app, "skyberg11").await;
    let token = login(&app, "skyberg11").await;

    for (title, text) in [
        (String::new(), "world".to_string()),
        ("a".repeat(101), "world".to_string()),
        ("hello".to_string(), "a".repeat(501)),
    ] {
        let (status, body) = call(
            &app,
            Method::POST,
            "/api/v1/ads",
            Some(&token),
            Some(json!({ "title": title, "text": text, "user_id": user_id })),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(body["data"].is_null());
        assert!(body["error"].is_string());
    }
}

#[tokio::test]
async fn only_the_author_may_modify_an_ad() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let alice_token = login(&app, "alice").await;
    let bob_token = login(&app, "bob").await;
    let ad = post_ad(&app, &alice_token, alice, "hello").await;
    let uri = format!("/api/v1/ads/{}", ad["id"]);

    let (status, _) = call(
        &app,
        Method::PUT,
        &uri,
        Some(&bob_token),
        Some(json!({ "title": "mine", "text": "now", "user_id": bob })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("{uri}/status"),
        Some(&alice_token),
        Some(json!({ "published": true, "user_id": alice })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["published"], true);
    assert_eq!(body["data"]["title"], "hello");

    let (status, body) = call(
        &app,
        Method::PUT,
        &uri,
        Some(&alice_token),
        Some(json!({ "title": "best", "text": "ever", "user_id": alice })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["title"], "best");

    let (status, body) = call(
        &app,
        Method::DELETE,
        &uri,
        Some(&alice_token),
        Some(json!({ "user_id": alice })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body, json!({ "data": "delete success", "error": null }));

    let (status, _) = call(&app, Method::GET, &uri, None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn default_listing_shows_published_ads_only() {
    let app = app();
    let user_id = register(&app, "skyberg11").await;
    let token = login(&app, "skyberg11").await;
    post_ad(&app, &token, user_id, "hello").await;
    post_ad(&app, &token, user_id, "best cat").await;

    let (status, _) = call(
        &app,
        Method::PUT,
        "/api/v1/ads/2/status",
        Some(&token),
        Some(json!({ "published": true, "user_id": user_id })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let (_, body) = call(&app, Method::GET, "/api/v1/ads", None, None).await;
    let ads = body["data"].as_array().unwrap();
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0]["id"], 2);

    let (_, body) = call(&app, Method::GET, "/api/v1/ads?title=", None, None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);

    let (_, body) = call(&app, Method::GET, "/api/v1/ads?published=0", None, None).await;
    let ads = body["data"].as_array().unwrap();
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0]["id"], 1);

    let uri = format!("/api/v1/ads?author={user_id}&title=best");
    let (_, body) = call(&app, Method::GET, &uri, None, None).await;
    let ads = body["data"].as_array().unwrap();
    assert_eq!(ads.len(), 1);
    assert_eq!(ads[0]["title"], "best cat");
}

#[tokio::test]
async fn malformed_input_is_a_bad_request() {
    let app = app();
    register(&app, "skyberg11").await;
    let token = login(&app, "skyberg11").await;

    for uri in [
        "/api/v1/ads?author=abc",
        "/api/v1/ads?published=maybe",
        "/api/v1/ads?creation=yesterday",
        "/api/v1/ads/abc",
        "/api/v1/users/abc",
        "/api/v1/ads/42",
        "/api/v1/users/42",
    ] {
        let (status, body) = call(&app, Method::GET, uri, None, None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST, "{uri}");
        assert!(body["data"].is_null(), "{uri}");
    }

    let request = Request::builder()
        .method(Method::POST)
        .uri("/api/v1/ads")
        .header(CONTENT_TYPE, "application/json")
        .header(AUTHORIZATION, token)
        .body(Body::from("{not json"))
        .unwrap();
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn users_edit_and_delete_only_themselves() {
    let app = app();
    let alice = register(&app, "alice").await;
    let bob = register(&app, "bob").await;
    let alice_token = login(&app, "alice").await;
    let bob_token = login(&app, "bob").await;
    let profile = json!({
        "first_name": "Alice",
        "second_name": "Smith",
        "email": "a@x.com",
        "phone": "555",
    });

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/users/{alice}"),
        Some(&bob_token),
        Some(profile.clone()),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert_eq!(body["message"], "unmatch");

    let (status, body) = call(
        &app,
        Method::PUT,
        &format!("/api/v1/users/{alice}"),
        Some(&alice_token),
        Some(profile),
    )
    .await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["data"]["first_name"], "Alice");
    assert_eq!(body["data"]["nickname"], "alice");

    let (status, body) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/users/{alice}"),
        Some(&bob_token),
        Some(json!({ "user_id": bob })),
    )
    .await;
    assert_eq!(status, StatusCode::FORBIDDEN);
    assert!(body["error"].is_string());

    let (status, _) = call(
        &app,
        Method::DELETE,
        &format!("/api/v1/users/{bob}"),
        Some(&bob_token),
        Some(json!({ "user_id": bob })),
    )
    .await;
    assert_eq!(status, StatusCode::OK);

    let bob_uri = format!("/api/v1/users/{bob}");
    let (status, _) = call(&app, Method::GET, &bob_uri, None, None).await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn responses_carry_a_request_id() {
    let app = app();
    let request = Request::builder()
        .uri("/api/v1/ads")
        .body(Body::empty())
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    assert!(response.headers().contains_key("x-request-id"));
}
