//! Cart flow driven through the storefront router.

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
async fn empty_cart_has_zero_totals() {
    let mut client = client().await;

    let (status, body) = client.get("/api/cart").await;
    assert_eq!(status, 200);
    assert_eq!(body["success"], json!(true));
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["subtotal"], json!(0));
    assert_eq!(body["data"]["shipping"], json!(0));
    assert_eq!(body["data"]["total"], json!(0));
}

#[tokio::test]
async fn worked_pricing_example() {
    let mut client = client().await;

    // One item at 5999 cents, quantity 2.
    let (status, body) = client
        .post(
            "/api/cart/items",
            &json!({ "slug": "apex-pro-helmet", "quantity": 2 }),
        )
        .await;
    assert_eq!(status, 200);

    let cart = &body["data"];
    assert_eq!(cart["subtotal"], json!(11998));
    assert_eq!(cart["tax"], json!(959));
    assert_eq!(cart["shipping"], json!(0));
    assert_eq!(cart["total"], json!(12957));
}

#[tokio::test]
async fn adding_the_same_product_merges_lines() {
    let mut client = client().await;

    client
        .post("/api/cart/items", &json!({ "slug": "apex-pro-helmet" }))
        .await;
    let (_, body) = client
        .post(
            "/api/cart/items",
            &json!({ "slug": "apex-pro-helmet", "quantity": 2 }),
        )
        .await;

    let items = body["data"]["items"].as_array().expect("items");
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["quantity"], json!(3));
}

#[tokio::test]
async fn quantity_zero_removes_the_line() {
    let mut client = client().await;

    let (_, body) = client
        .post("/api/cart/items", &json!({ "slug": "tarmac-summer-gloves" }))
        .await;
    let item_id = body["data"]["items"][0]["id"].as_str().expect("id").to_string();

    let (status, body) = client
        .patch(
            &format!("/api/cart/items/{item_id}"),
            &json!({ "quantity": 0 }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["items"], json!([]));
    assert_eq!(body["data"]["total"], json!(0));
}

#[tokio::test]
async fn flat_shipping_below_the_threshold() {
    let mut client = client().await;

    // 4 x 2500 = exactly 10000: not strictly over the threshold.
    let (_, body) = client
        .post(
            "/api/cart/items",
            &json!({ "slug": "tarmac-summer-gloves", "quantity": 4 }),
        )
        .await;
    assert_eq!(body["data"]["subtotal"], json!(10_000));
    assert_eq!(body["data"]["shipping"], json!(1500));
}

#[tokio::test]
async fn coupons_discount_the_subtotal() {
    let mut client = client().await;

    client
        .post(
            "/api/cart/items",
            &json!({ "slug": "tarmac-summer-gloves", "quantity": 4 }),
        )
        .await;

    // SAVE10: $10 off a $100 subtotal.
    let (status, body) = client
        .post("/api/cart/coupon", &json!({ "code": "save10" }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["discount"], json!(1000));
    // 10000 + 800 tax + 1500 shipping - 1000
    assert_eq!(body["data"]["total"], json!(11_300));

    // FREE20 replaces it: round(subtotal * 0.2).
    let (_, body) = client
        .post("/api/cart/coupon", &json!({ "code": "FREE20" }))
        .await;
    assert_eq!(body["data"]["discount"], json!(2000));

    let (_, body) = client.delete("/api/cart/coupon").await;
    assert_eq!(body["data"]["discount"], json!(0));
}

#[tokio::test]
async fn unknown_coupon_is_rejected_upstream_of_the_cart() {
    let mut client = client().await;

    client
        .post("/api/cart/items", &json!({ "slug": "apex-pro-helmet" }))
        .await;

    let (status, body) = client
        .post("/api/cart/coupon", &json!({ "code": "NOPE" }))
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("bad_request"));
}

#[tokio::test]
async fn unknown_product_is_a_404_envelope() {
    let mut client = client().await;

    let (status, body) = client
        .post("/api/cart/items", &json!({ "slug": "hover-bike" }))
        .await;
    assert_eq!(status, 404);
    assert_eq!(body["success"], json!(false));
    assert_eq!(body["error"]["code"], json!("not_found"));
}

#[tokio::test]
async fn updating_an_unknown_line_is_a_404() {
    let mut client = client().await;

    let (status, _) = client
        .patch("/api/cart/items/missing", &json!({ "quantity": 2 }))
        .await;
    assert_eq!(status, 404);
}
