//! HTTP-level route tests.
//!
//! Exercises the routes that can be served without the remote catalog,
//! accounts, or payment services: health, the welcome payload, cart state
//! for a fresh visitor, and request validation that fails before any
//! remote call is made.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use gallery_core::CurrencyCode;
use gallery_storefront::config::{AccountsConfig, CatalogConfig, GalleryConfig, PaymentConfig};
use gallery_storefront::state::AppState;
use http_body_util::BodyExt;
use secrecy::SecretString;
use serde_json::Value;
use tower::ServiceExt;

fn test_config() -> GalleryConfig {
    GalleryConfig {
        host: "127.0.0.1".parse().unwrap(),
        port: 0,
        base_url: "http://localhost:3000".to_string(),
        session_secret: SecretString::from("kJ8#mP2$vN5@qR9!wT3^yU6&zB4*xC7%dF1(gH0)".repeat(2)),
        currency: CurrencyCode::INR,
        featured_slug: "mandala-7".to_string(),
        catalog: CatalogConfig {
            // Unroutable; tests must not reach the network
            base_url: "http://127.0.0.1:1".to_string(),
        },
        accounts: AccountsConfig {
            base_url: "http://127.0.0.1:1".to_string(),
        },
        payments: PaymentConfig {
            base_url: "http://127.0.0.1:1".to_string(),
            key_id: "rzp_test_key".to_string(),
            key_secret: SecretString::from("t9Qw7zX2cV5bN8mK3jH6gF1dS4aP0oL"),
        },
        sentry_dsn: None,
    }
}

fn test_app() -> Router {
    gallery_storefront::app(AppState::new(test_config()))
}

async fn get(app: Router, uri: &str) -> (StatusCode, Value) {
    let response = app
        .oneshot(Request::get(uri).body(Body::empty()).unwrap())
        .await
        .unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn post_json(app: Router, uri: &str, body: &str) -> (StatusCode, Value) {
    let request = Request::post(uri)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    let response = app.oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

#[tokio::test]
async fn test_health_returns_ok() {
    let response = test_app()
        .oneshot(Request::get("/health").body(Body::empty()).unwrap())
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    assert_eq!(&bytes[..], b"ok");
}

#[tokio::test]
async fn test_root_serves_welcome_payload() {
    let (status, body) = get(test_app(), "/").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Welcome to the Gallery API");
}

#[tokio::test]
async fn test_fresh_visitor_has_empty_cart() {
    let (status, body) = get(test_app(), "/cart").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item_count"], 0);
    assert_eq!(body["total_quantity"], 0);
    assert!(body["items"].as_array().unwrap().is_empty());
}

#[tokio::test]
async fn test_fresh_visitor_cart_count_is_zero() {
    let (status, body) = get(test_app(), "/cart/count").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["count"], 0);
}

#[tokio::test]
async fn test_remove_without_cart_is_a_noop() {
    let (status, body) = post_json(test_app(), "/cart/remove", r#"{"product_id": 42}"#).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["item_count"], 0);
}

#[tokio::test]
async fn test_checkout_with_empty_cart_is_rejected() {
    let (status, body) = post_json(test_app(), "/cart/checkout", "").await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Cart is empty");
}

#[tokio::test]
async fn test_add_with_zero_quantity_is_rejected() {
    let (status, body) = post_json(
        test_app(),
        "/cart/add",
        r#"{"product_id": 1, "quantity": 0}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "Quantity must be at least 1");
}

#[tokio::test]
async fn test_login_with_malformed_email_is_rejected() {
    let (status, body) = post_json(
        test_app(),
        "/auth/login",
        r#"{"email": "not-an-email", "password": "pw"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "email must contain an @ symbol");
}

#[tokio::test]
async fn test_register_requires_names() {
    let (status, body) = post_json(
        test_app(),
        "/auth/register",
        r#"{"firstname": "  ", "lastname": "Rao", "email": "asha@example.com", "password": "pw"}"#,
    )
    .await;
    assert_eq!(status, StatusCode::BAD_REQUEST);
    assert_eq!(body["detail"], "First and last name are required");
}

#[tokio::test]
async fn test_logout_without_session_succeeds() {
    let (status, body) = post_json(test_app(), "/auth/logout", "").await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["message"], "Logged out");
}

#[tokio::test]
async fn test_unknown_route_is_404() {
    let response = test_app()
        .oneshot(Request::get("/no-such-page").body(Body::empty()).unwrap())
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
}
