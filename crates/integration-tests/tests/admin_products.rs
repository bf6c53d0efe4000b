//! Admin product management: auth gating, CRUD, and the bulk CSV import.

use ridegear_admin::config::test_config;
use ridegear_admin::{AppState, app};
use ridegear_integration_tests::{TestClient, memory_backend, seed_admin, seed_catalog};
use serde_json::json;

async fn logged_in_client() -> TestClient {
    let backend = memory_backend();
    seed_catalog(&backend).await;
    seed_admin(&backend).await;

    let mut client = TestClient::new(app(AppState::new(test_config(), backend)));
    let (status, _) = client
        .post("/auth/login", &json!({ "email": "admin@example.com" }))
        .await;
    assert_eq!(status, 200);
    client
}

#[tokio::test]
async fn admin_routes_require_a_session() {
    let backend = memory_backend();
    let mut client = TestClient::new(app(AppState::new(test_config(), backend)));

    let (status, body) = client.get("/api/admin/products").await;
    assert_eq!(status, 401);
    assert_eq!(body["error"]["code"], json!("unauthorized"));
}

#[tokio::test]
async fn customers_cannot_log_into_the_admin() {
    let backend = memory_backend();
    seed_catalog(&backend).await;

    let mut client = TestClient::new(app(AppState::new(test_config(), backend)));

    // No such user at all.
    let (status, _) = client
        .post("/auth/login", &json!({ "email": "rider@example.com" }))
        .await;
    assert_eq!(status, 401);
}

#[tokio::test]
async fn product_crud_round_trip() {
    let mut client = logged_in_client().await;

    let (status, body) = client
        .post(
            "/api/admin/products",
            &json!({
                "title": "Slipstream Rain Suit",
                "brand": "Vortex",
                "category": "helmets",
                "price": 7999,
                "stock": 15
            }),
        )
        .await;
    assert_eq!(status, 200);
    let id = body["data"]["id"].as_str().expect("id").to_string();
    assert_eq!(body["data"]["slug"], json!("slipstream-rain-suit"));

    // Duplicate title derives the same slug: conflict.
    let (status, _) = client
        .post(
            "/api/admin/products",
            &json!({
                "title": "Slipstream Rain Suit",
                "brand": "Vortex",
                "category": "helmets",
                "price": 6999
            }),
        )
        .await;
    assert_eq!(status, 409);

    // Partial update merges.
    let (status, body) = client
        .put(
            &format!("/api/admin/products/{id}"),
            &json!({ "price": 8999, "featured": true }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["price"], json!(8999));
    assert_eq!(body["data"]["featured"], json!(true));
    assert_eq!(body["data"]["brand"], json!("Vortex"));

    // Unknown category on update is a 400.
    let (status, _) = client
        .put(
            &format!("/api/admin/products/{id}"),
            &json!({ "category": "hoverbikes" }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, _) = client.delete(&format!("/api/admin/products/{id}")).await;
    assert_eq!(status, 200);
    let (status, _) = client.get(&format!("/api/admin/products/{id}")).await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn updating_a_missing_product_is_a_404() {
    let mut client = logged_in_client().await;

    let missing = uuid::Uuid::new_v4();
    let (status, _) = client
        .put(
            &format!("/api/admin/products/{missing}"),
            &json!({ "price": 100 }),
        )
        .await;
    assert_eq!(status, 404);
}

#[tokio::test]
async fn csv_import_reports_per_row_outcomes() {
    let mut client = logged_in_client().await;

    let csv = "title,brand,category,price,stock\n\
               Canyon Touring Boots,Switchback,helmets,14500,6\n\
               Bad Price Row,Switchback,helmets,not-a-price,3\n\
               Ghost Category Row,Switchback,hoverbikes,1000,1\n";

    let (status, body) = client.post_csv("/api/admin/products/import", csv).await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["created"], json!(1));
    assert_eq!(body["data"]["failed"], json!(2));
    assert_eq!(body["data"]["errors"].as_array().expect("errors").len(), 2);

    // The good row landed in the catalog.
    let (_, body) = client.get("/api/admin/products?q=canyon").await;
    assert_eq!(body["data"]["total"], json!(1));
}

#[tokio::test]
async fn csv_import_rejects_a_missing_header() {
    let mut client = logged_in_client().await;

    let (status, body) = client
        .post_csv(
            "/api/admin/products/import",
            "Canyon Touring Boots,Switchback,helmets,14500,6\n",
        )
        .await;
    assert_eq!(status, 400);
    assert_eq!(body["error"]["code"], json!("bad_request"));
}

#[tokio::test]
async fn category_delete_does_not_cascade() {
    let mut client = logged_in_client().await;

    let (_, body) = client.get("/api/admin/categories").await;
    let categories = body["data"].as_array().expect("array").clone();
    let helmets = categories
        .iter()
        .find(|c| c["slug"] == json!("helmets"))
        .expect("helmets");
    let id = helmets["id"].as_str().expect("id").to_string();

    let (status, _) = client.delete(&format!("/api/admin/categories/{id}")).await;
    assert_eq!(status, 200);

    // The product that embedded the category still lists fine.
    let (_, body) = client.get("/api/admin/products?q=apex").await;
    assert_eq!(body["data"]["total"], json!(1));
    assert_eq!(
        body["data"]["items"][0]["category"]["slug"],
        json!("helmets")
    );
}

#[tokio::test]
async fn coupon_crud_and_duplicate_codes() {
    let mut client = logged_in_client().await;

    let (status, body) = client
        .post(
            "/api/admin/coupons",
            &json!({ "code": "winter5", "kind": "fixed", "value": 500 }),
        )
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["code"], json!("WINTER5"));
    let id = body["data"]["id"].as_str().expect("id").to_string();

    // Case-insensitive duplicate.
    let (status, _) = client
        .post(
            "/api/admin/coupons",
            &json!({ "code": "WINTER5", "kind": "percent", "value": 5 }),
        )
        .await;
    assert_eq!(status, 409);

    // Percent over 100 is rejected.
    let (status, _) = client
        .post(
            "/api/admin/coupons",
            &json!({ "code": "TOOMUCH", "kind": "percent", "value": 150 }),
        )
        .await;
    assert_eq!(status, 400);

    let (status, body) = client
        .put(&format!("/api/admin/coupons/{id}"), &json!({ "active": false }))
        .await;
    assert_eq!(status, 200);
    assert_eq!(body["data"]["active"], json!(false));
}
