//! Integration tests for device registry endpoints.
//!
//! Tests cover:
//! - POST /api/v1/devices
//! - GET /api/v1/devices
//! - GET /api/v1/public-devices
//! - GET /api/v1/devices/:device_id
//! - PUT /api/v1/devices/:device_id
//! - DELETE /api/v1/devices/:device_id
//! - GET /api/v1/owners/:owner_id

mod common;

use axum::http::{Method, StatusCode};
use common::{
    cleanup_all_test_data, create_authenticated_user, create_test_app, create_test_device,
    create_test_pool, create_test_rental_request, delete_request_with_auth, get_request,
    get_request_with_auth, json_request_with_auth, parse_response_body, run_migrations,
    test_config, TestDevice, TestUser,
};
use serde_json::json;
use tower::ServiceExt;

#[tokio::test]
async fn test_create_device_success() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let auth = create_authenticated_user(&app, &TestUser::new()).await;

    let device = create_test_device(&app, &auth, &TestDevice::new()).await;

    assert_eq!(device["title"].as_str().unwrap(), "Steam Deck OLED");
    assert_eq!(device["owner_id"].as_str().unwrap(), auth.user_id);
    assert_eq!(device["price_per_day_cents"].as_i64().unwrap(), 1500);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_device_empty_title() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let auth = create_authenticated_user(&app, &TestUser::new()).await;

    let mut body = TestDevice::new().body();
    body["title"] = json!("");
    let request = json_request_with_auth(Method::POST, "/api/v1/devices", body, &auth.access_token);
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_device_negative_price() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let auth = create_authenticated_user(&app, &TestUser::new()).await;

    let mut body = TestDevice::new().body();
    body["price_per_day_cents"] = json!(-500);
    let request = json_request_with_auth(Method::POST, "/api/v1/devices", body, &auth.access_token);
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_create_device_inverted_availability_window() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let auth = create_authenticated_user(&app, &TestUser::new()).await;

    let mut body = TestDevice::new().body();
    body["available_from"] = json!("2024-12-31");
    body["available_to"] = json!("2024-01-01");
    let request = json_request_with_auth(Method::POST, "/api/v1/devices", body, &auth.access_token);
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::BAD_REQUEST);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_list_own_devices_no_cross_owner_leakage() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let owner_a = create_authenticated_user(&app, &TestUser::new()).await;
    let owner_b = create_authenticated_user(&app, &TestUser::new()).await;

    create_test_device(&app, &owner_a, &TestDevice::new().with_title("A's Deck")).await;
    create_test_device(&app, &owner_b, &TestDevice::new().with_title("B's Switch")).await;

    let request = get_request_with_auth("/api/v1/devices", &owner_a.access_token);
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    let devices = body.as_array().unwrap();
    assert_eq!(devices.len(), 1);
    assert_eq!(devices[0]["title"].as_str().unwrap(), "A's Deck");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_public_devices_listing_requires_no_auth() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let owner_a = create_authenticated_user(&app, &TestUser::new()).await;
    let owner_b = create_authenticated_user(&app, &TestUser::new()).await;

    create_test_device(&app, &owner_a, &TestDevice::new()).await;
    create_test_device(&app, &owner_b, &TestDevice::new()).await;

    let request = get_request("/api/v1/public-devices");
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 2);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_device_detail_is_owner_flag() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let owner = create_authenticated_user(&app, &TestUser::new()).await;
    let visitor = create_authenticated_user(&app, &TestUser::new()).await;

    let device = create_test_device(&app, &owner, &TestDevice::new()).await;
    let device_id = device["id"].as_str().unwrap();
    let uri = format!("/api/v1/devices/{}", device_id);

    // Owner sees is_owner = true
    let response = app
        .clone()
        .oneshot(get_request_with_auth(&uri, &owner.access_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["is_owner"], json!(true));

    // Any other authenticated caller can still read, with is_owner = false
    let response = app
        .clone()
        .oneshot(get_request_with_auth(&uri, &visitor.access_token))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["is_owner"], json!(false));

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_device_detail_unknown_id() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let auth = create_authenticated_user(&app, &TestUser::new()).await;

    let uri = format!("/api/v1/devices/{}", uuid::Uuid::new_v4());
    let response = app
        .clone()
        .oneshot(get_request_with_auth(&uri, &auth.access_token))
        .await
        .unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_update_device_by_owner() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let owner = create_authenticated_user(&app, &TestUser::new()).await;

    let device = create_test_device(&app, &owner, &TestDevice::new()).await;
    let device_id = device["id"].as_str().unwrap();

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/devices/{}", device_id),
        json!({ "title": "Steam Deck OLED (new thumbsticks)", "price_per_day_cents": 1200 }),
        &owner.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(
        body["title"].as_str().unwrap(),
        "Steam Deck OLED (new thumbsticks)"
    );
    assert_eq!(body["price_per_day_cents"].as_i64().unwrap(), 1200);
    // Untouched fields are preserved
    assert_eq!(body["city"].as_str().unwrap(), "Bratislava");

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_update_device_by_non_owner_is_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let owner = create_authenticated_user(&app, &TestUser::new()).await;
    let stranger = create_authenticated_user(&app, &TestUser::new()).await;

    let device = create_test_device(&app, &owner, &TestDevice::new()).await;
    let device_id = device["id"].as_str().unwrap();

    let request = json_request_with_auth(
        Method::PUT,
        &format!("/api/v1/devices/{}", device_id),
        json!({ "title": "hijacked" }),
        &stranger.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_delete_device_by_non_owner_is_not_found() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let owner = create_authenticated_user(&app, &TestUser::new()).await;
    let stranger = create_authenticated_user(&app, &TestUser::new()).await;

    let device = create_test_device(&app, &owner, &TestDevice::new()).await;
    let device_id = device["id"].as_str().unwrap();

    let request = delete_request_with_auth(
        &format!("/api/v1/devices/{}", device_id),
        &stranger.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    // Still visible
    let response = app
        .clone()
        .oneshot(get_request_with_auth(
            &format!("/api/v1/devices/{}", device_id),
            &owner.access_token,
        ))
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_delete_device_cascades_rental_requests() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let owner = create_authenticated_user(&app, &TestUser::new()).await;
    let renter = create_authenticated_user(&app, &TestUser::new()).await;

    let device = create_test_device(&app, &owner, &TestDevice::new()).await;
    let device_id = device["id"].as_str().unwrap();

    create_test_rental_request(&app, &renter, device_id, "2024-03-01", "2024-03-10").await;

    let request = delete_request_with_auth(
        &format!("/api/v1/devices/{}", device_id),
        &owner.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();
    assert_eq!(response.status(), StatusCode::NO_CONTENT);

    // The dependent rental request went with the device
    let response = app
        .clone()
        .oneshot(get_request_with_auth("/api/v1/my-rentals", &renter.access_token))
        .await
        .unwrap();
    let body = parse_response_body(response).await;
    assert_eq!(body.as_array().unwrap().len(), 0);

    cleanup_all_test_data(&pool).await;
}

#[tokio::test]
async fn test_owner_profile_shows_public_subset_and_devices() {
    let pool = create_test_pool().await;
    run_migrations(&pool).await;
    cleanup_all_test_data(&pool).await;

    let app = create_test_app(test_config(), pool.clone());
    let owner = create_authenticated_user(&app, &TestUser::new()).await;
    let visitor = create_authenticated_user(&app, &TestUser::new()).await;

    create_test_device(&app, &owner, &TestDevice::new()).await;

    let request = get_request_with_auth(
        &format!("/api/v1/owners/{}", owner.user_id),
        &visitor.access_token,
    );
    let response = app.clone().oneshot(request).await.unwrap();

    assert_eq!(response.status(), StatusCode::OK);
    let body = parse_response_body(response).await;
    assert_eq!(body["owner"]["id"].as_str().unwrap(), owner.user_id);
    assert!(body["owner"].get("email").is_none());
    assert_eq!(body["devices"].as_array().unwrap().len(), 1);

    cleanup_all_test_data(&pool).await;
}
