//! Catalog browsing and account/auth flows.

use ridegear_integration_tests::{TestClient, memory_backend, seed_catalog};
use ridegear_storefront::config::test_config;
use ridegear_storefront::{AppState, app};
use serde_json::json;

async fn client() -> TestClient {
    let backend = memory_backend();
    seed_catalog(&backend).await;
    TestClient::new(app(AppState::new(test_config(), backend)))
}

#[tokio::test]
async fn lists_and_filters_products() {
    let mut client = client().await;

    let (status, body) = client.get("/api/products").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["total"], json!(2));

    let (_, body) = client.get("/api/products?category=helmets").await;
    assert_eq!(body["data"]["total"], json!(1));
    assert_eq!(body["data"]["items"][0]["slug"], json!("apex-pro-helmet"));

    let (_, body) = client.get("/api/products?q=tarmac").await;
    assert_eq!(body["data"]["total"], json!(1));

    let (_, body) = client.get("/api/products?sort=price_asc").await;
    assert_eq!(
        body["data"]["items"][0]["slug"],
        json!("tarmac-summer-gloves")
    );
}

#[tokio::test]
async fn product_detail_by_slug() {
    let mut client = client().await;

    let (status, body) = client.get("/api/products/apex-pro-helmet").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["title"], json!("Apex Pro Helmet"));
    assert_eq!(body["data"]["price"], json!(5999));

    let (status, _) = client.get("/api/products/hover-bike").await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn categories_list_and_detail() {
    let mut client = client().await;

    let (status, body) = client.get("/api/categories").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"].as_array().expect("array").len(), 2);

    let (status, body) = client.get("/api/categories/helmets").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["name"], json!("Helmets"));
}

#[tokio::test]
async fn reviews_round_trip_and_update_product_aggregates() {
    let mut client = client().await;

    let (status, _) = client
        .post(
            "/api/products/apex-pro-helmet/reviews",
            &json!({ "author": "Jordan", "rating": 5, "body": "Great lid." }),
        )
        .await;
    assert_eq!(status, 200);
    client
        .post(
            "/api/products/apex-pro-helmet/reviews",
            &json!({ "author": "Riley", "rating": 4, "body": "Runs small." }),
        )
        .await;

    let (_, body) = client.get("/api/products/apex-pro-helmet/reviews").await;
    assert_eq!(body["data"].as_array().expect("array").len(), 2);

    let (_, body) = client.get("/api/products/apex-pro-helmet").await;
    assert_eq!(body["data"]["review_count"], json!(2));
    assert!((body["data"]["rating"].as_f64().expect("rating") - 4.5).abs() < 1e-9);
}

#[tokio::test]
async fn review_rating_out_of_range_fails_validation() {
    let mut client = client().await;

    let (status, body) = client
        .post(
            "/api/products/apex-pro-helmet/reviews",
            &json!({ "author": "Jordan", "rating": 9, "body": "!!" }),
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], json!("validation"));
}

#[tokio::test]
async fn register_login_and_account_orders_gating() {
    let mut client = client().await;

    // Account orders require a login.
    let (status, _) = client.get("/api/account/orders").await;
    assert_eq!(status, 401);

    let (status, body) = client
        .post(
            "/api/auth/register",
            &json!({ "email": "rider@example.com", "name": "Jordan" }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["role"], json!("customer"));

    let (status, body) = client.get("/api/auth/me").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["email"], json!("rider@example.com"));

    let (status, body) = client.get("/api/account/orders").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["total"], json!(0));

    // Duplicate registration conflicts.
    let (status, _) = client
        .post(
            "/api/auth/register",
            &json!({ "email": "rider@example.com", "name": "Jordan" }),
        )
        .await;
    assert_eq!(status, 409);

    client.post("/api/auth/logout", &json!({})).await;
    let (status, _) = client.get("/api/auth/me").await;
    assert_eq!(status, 401);

    // Login works for known emails only.
    let (status, _) = client
        .post("/api/auth/login", &json!({ "email": "rider@example.com" }))
        .await;
    assert_eq!(status, 200);
    let (status, _) = client
        .post("/api/auth/login", &json!({ "email": "ghost@example.com" }))
        .await;
    assert_eq!(status, 401);
}
