//! Order handling across both surfaces: checkout on the storefront, status
//! management and analytics on the admin, one shared backend underneath.

use std::sync::Arc;

use ridegear_integration_tests::{TestClient, memory_backend, seed_admin, seed_catalog};
use ridegear_storefront::services::payment::FixedGateway;
use serde_json::{Value, json};

/// A storefront client and a logged-in admin client over one backend.
async fn paired_clients() -> (TestClient, TestClient) {
    let backend = memory_backend();
    seed_catalog(&backend).await;
    seed_admin(&backend).await;

    let storefront_state = ridegear_storefront::AppState::with_gateway(
        ridegear_storefront::config::test_config(),
        Arc::clone(&backend),
        Arc::new(FixedGateway(true)),
    );
    let storefront = TestClient::new(ridegear_storefront::app(storefront_state));

    let admin_state =
        ridegear_admin::AppState::new(ridegear_admin::config::test_config(), backend);
    let mut admin = TestClient::new(ridegear_admin::app(admin_state));
    let (status, _) = admin
        .post("/auth/login", &json!({ "email": "admin@example.com" }))
        .await;
    assert_eq!(status, 200);

    (storefront, admin)
}

async fn place_order(storefront: &mut TestClient, quantity: u32) -> Value {
    storefront
        .post(
            "/api/cart/items",
            &json!({ "slug": "apex-pro-helmet", "quantity": quantity }),
        )
        .await;
    let (status, body) = storefront
        .post(
            "/api/checkout",
            &json!({
                "email": "rider@example.com",
                "address": {
                    "name": "Jordan Rider",
                    "line1": "1 Apex Way",
                    "city": "Laguna Seca",
                    "state": "CA",
                    "postal_code": "93908",
                    "country": "US"
                },
                "payment_method": "paypal"
            }),
        )
        .await;
    assert_eq!(status, 200);
    body["data"].clone()
}

#[tokio::test]
async fn orders_placed_on_the_storefront_show_up_in_the_admin() {
    let (mut storefront, mut admin) = paired_clients().await;

    let order = place_order(&mut storefront, 1).await;

    let (status, body) = admin.get("/api/admin/orders").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["total"], json!(1));
    assert_eq!(body["data"]["items"][0]["id"], order["id"]);

    let (_, body) = admin.get("/api/admin/orders?status=paid").await;
    assert_eq!(body["data"]["total"], json!(0));
}

#[tokio::test]
async fn status_walks_the_machine_and_rejects_jumps() {
    let (mut storefront, mut admin) = paired_clients().await;

    let order = place_order(&mut storefront, 1).await;
    let id = order["id"].as_str().expect("id").to_string();
    let path = format!("/api/admin/orders/{id}/status");

    // pending -> shipped is an illegal jump.
    let (status, body) = admin.post(&path, &json!({ "status": "shipped" })).await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], json!("bad_request"));

    for next in ["paid", "shipped", "delivered"] {
        let (status, body) = admin.post(&path, &json!({ "status": next })).await;
        assert_eq!(status, 200);
        assert_eq!(body["data"]["status"], json!(next));
    }

    // Delivered is terminal.
    let (status, _) = admin.post(&path, &json!({ "status": "canceled" })).await;
    assert_eq!(status, 400);
}

#[tokio::test]
async fn item_snapshots_survive_catalog_edits() {
    let (mut storefront, mut admin) = paired_clients().await;

    let order = place_order(&mut storefront, 2).await;
    let id = order["id"].as_str().expect("id").to_string();

    // Reprice the product after the order exists.
    let (_, body) = admin.get("/api/admin/products?q=apex").await;
    let product_id = body["data"]["items"][0]["id"].as_str().expect("id").to_string();
    admin
        .put(
            &format!("/api/admin/products/{product_id}"),
            &json!({ "price": 9999 }),
        )
        .await;

    let (_, body) = admin.get(&format!("/api/admin/orders/{id}")).await;
    assert_eq!(body["data"]["items"][0]["unit_price"], json!(5999));
    assert_eq!(body["data"]["subtotal"], json!(11_998));
}

#[tokio::test]
async fn analytics_aggregate_orders_and_skip_canceled_revenue() {
    let (mut storefront, mut admin) = paired_clients().await;

    let first = place_order(&mut storefront, 1).await;
    place_order(&mut storefront, 2).await;

    // Cancel the first order.
    let id = first["id"].as_str().expect("id").to_string();
    admin
        .post(
            &format!("/api/admin/orders/{id}/status"),
            &json!({ "status": "canceled" }),
        )
        .await;

    let (status, body) = admin.get("/api/admin/analytics").await;
    assert_eq!(status, 200);

    let summary = &body["data"];
    assert_eq!(summary["order_count"], json!(1));
    assert_eq!(summary["orders_by_status"]["canceled"], json!(1));
    assert_eq!(summary["orders_by_status"]["pending"], json!(1));
    // Only the surviving order's total counts: 2 x 5999 + tax 959.
    assert_eq!(summary["revenue"], json!(12_957));
    assert_eq!(summary["top_products"][0]["units"], json!(2));
}

#[tokio::test]
async fn settings_round_trip() {
    let (_storefront, mut admin) = paired_clients().await;

    let (status, body) = admin.get("/api/admin/settings").await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["store_name"], json!("RideGear"));

    let mut settings = body["data"].clone();
    settings["store_name"] = json!("RideGear Outlet");
    let (status, _) = admin.put("/api/admin/settings", &settings).await;
    assert_eq!(status, 200);

    let (_, body) = admin.get("/api/admin/settings").await;
    assert_eq!(body["data"]["store_name"], json!("RideGear Outlet"));
}

#[tokio::test]
async fn status_changes_feed_the_event_buffer() {
    let (mut storefront, mut admin) = paired_clients().await;

    let order = place_order(&mut storefront, 1).await;
    let id = order["id"].as_str().expect("id").to_string();
    admin
        .post(
            &format!("/api/admin/orders/{id}/status"),
            &json!({ "status": "paid" }),
        )
        .await;

    let (status, body) = admin.get("/api/admin/events").await;
    assert_eq!(status, 200);
    let events = body["data"].as_array().expect("events");
    assert!(!events.is_empty());
    assert!(
        events[0]["message"]
            .as_str()
            .expect("message")
            .contains("paid")
    );
}
