//! Integration test harness for RideGear.
//!
//! Tests drive the production routers in-process with
//! `tower::ServiceExt::oneshot` over the in-memory backend, so the suite is
//! hermetic: no ports, no data directory, no running servers.
//!
//! [`TestClient`] round-trips session cookies between requests, which the
//! cart and auth flows depend on.

use std::collections::BTreeMap;
use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use axum::http::{Request, StatusCode, header};
use http_body_util::BodyExt;
use serde_json::Value;
use tower::ServiceExt;

use ridegear_store::backend::{MemoryBackend, StoreBackend};

/// Multipart boundary used by [`TestClient::post_csv`].
const BOUNDARY: &str = "ridegear-test-boundary";

/// A minimal HTTP client over an in-process router.
///
/// Remembers cookies from `Set-Cookie` responses and sends them back on
/// subsequent requests, like a browser would.
pub struct TestClient {
    app: Router,
    cookies: BTreeMap<String, String>,
}

impl TestClient {
    #[must_use]
    pub fn new(app: Router) -> Self {
        Self {
            app,
            cookies: BTreeMap::new(),
        }
    }

    /// Issue a request and return the status plus the parsed JSON body
    /// (`Value::Null` for empty bodies).
    ///
    /// # Panics
    ///
    /// Panics on malformed requests or non-JSON bodies; tests want loud
    /// failures.
    pub async fn request(
        &mut self,
        method: &str,
        path: &str,
        body: Option<&Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(path);

        if let Some(cookie_header) = self.cookie_header() {
            builder = builder.header(header::COOKIE, cookie_header);
        }

        let request = match body {
            Some(json) => builder
                .header(header::CONTENT_TYPE, "application/json")
                .body(Body::from(json.to_string()))
                .expect("request"),
            None => builder.body(Body::empty()).expect("request"),
        };

        self.send(request).await
    }

    pub async fn get(&mut self, path: &str) -> (StatusCode, Value) {
        self.request("GET", path, None).await
    }

    pub async fn post(&mut self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.request("POST", path, Some(body)).await
    }

    pub async fn patch(&mut self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.request("PATCH", path, Some(body)).await
    }

    pub async fn put(&mut self, path: &str, body: &Value) -> (StatusCode, Value) {
        self.request("PUT", path, Some(body)).await
    }

    pub async fn delete(&mut self, path: &str) -> (StatusCode, Value) {
        self.request("DELETE", path, None).await
    }

    /// Upload CSV text as a `file` multipart field.
    pub async fn post_csv(&mut self, path: &str, csv: &str) -> (StatusCode, Value) {
        let body = format!(
            "--{BOUNDARY}\r\n\
             Content-Disposition: form-data; name=\"file\"; filename=\"products.csv\"\r\n\
             Content-Type: text/csv\r\n\r\n\
             {csv}\r\n\
             --{BOUNDARY}--\r\n"
        );

        let mut builder = Request::builder().method("POST").uri(path).header(
            header::CONTENT_TYPE,
            format!("multipart/form-data; boundary={BOUNDARY}"),
        );
        if let Some(cookie_header) = self.cookie_header() {
            builder = builder.header(header::COOKIE, cookie_header);
        }

        let request = builder.body(Body::from(body)).expect("request");
        self.send(request).await
    }

    async fn send(&mut self, request: Request<Body>) -> (StatusCode, Value) {
        let response = self
            .app
            .clone()
            .oneshot(request)
            .await
            .expect("router never errors");

        let status = response.status();

        for set_cookie in response.headers().get_all(header::SET_COOKIE) {
            if let Ok(raw) = set_cookie.to_str()
                && let Some(pair) = raw.split(';').next()
                && let Some((name, value)) = pair.split_once('=')
            {
                self.cookies
                    .insert(name.trim().to_string(), value.trim().to_string());
            }
        }

        let bytes = response
            .into_body()
            .collect()
            .await
            .expect("body")
            .to_bytes();
        let body = if bytes.is_empty() {
            Value::Null
        } else {
            serde_json::from_slice(&bytes).unwrap_or(Value::Null)
        };

        (status, body)
    }

    fn cookie_header(&self) -> Option<String> {
        if self.cookies.is_empty() {
            return None;
        }
        Some(
            self.cookies
                .iter()
                .map(|(name, value)| format!("{name}={value}"))
                .collect::<Vec<_>>()
                .join("; "),
        )
    }
}

/// A fresh in-memory backend shared by a storefront/admin pair.
#[must_use]
pub fn memory_backend() -> Arc<dyn StoreBackend> {
    Arc::new(MemoryBackend::new())
}

/// Seed the demo catalog the tests lean on.
///
/// Creates the `helmets` and `gloves` categories, two products
/// (`apex-pro-helmet` at 5999 cents, `tarmac-summer-gloves` at 2500), and
/// the `SAVE10` (fixed 1000) and `FREE20` (percent 20) coupons.
///
/// # Panics
///
/// Panics if any write fails; the in-memory backend never does.
pub async fn seed_catalog(backend: &Arc<dyn StoreBackend>) {
    use ridegear_core::{CouponKind, Money};
    use ridegear_store::{CategoryStore, CouponStore, NewCategory, NewCoupon, NewProduct, ProductStore};
    use rust_decimal::Decimal;

    let categories = CategoryStore::new(Arc::clone(backend));
    let products = ProductStore::new(Arc::clone(backend));
    let coupons = CouponStore::new(Arc::clone(backend));

    let helmets = categories
        .create(NewCategory {
            name: "Helmets".into(),
            description: None,
            image: None,
            parent: None,
        })
        .await
        .expect("seed category");
    let gloves = categories
        .create(NewCategory {
            name: "Gloves".into(),
            description: None,
            image: None,
            parent: None,
        })
        .await
        .expect("seed category");

    products
        .create(NewProduct {
            title: "Apex Pro Helmet".into(),
            brand: "Vortex".into(),
            category: helmets,
            price: Money::from_cents(5999),
            compare_at_price: None,
            stock: 12,
            tags: vec!["touring".into()],
            variants: vec![],
            images: vec![],
            description: String::new(),
            specs: BTreeMap::new(),
            features: vec![],
            featured: true,
        })
        .await
        .expect("seed product");
    products
        .create(NewProduct {
            title: "Tarmac Summer Gloves".into(),
            brand: "Tarmac".into(),
            category: gloves,
            price: Money::from_cents(2500),
            compare_at_price: None,
            stock: 30,
            tags: vec!["summer".into()],
            variants: vec![],
            images: vec![],
            description: String::new(),
            specs: BTreeMap::new(),
            features: vec![],
            featured: false,
        })
        .await
        .expect("seed product");

    coupons
        .create(NewCoupon {
            code: "SAVE10".into(),
            kind: CouponKind::Fixed,
            value: Decimal::from(1000),
            active: true,
            scope: None,
        })
        .await
        .expect("seed coupon");
    coupons
        .create(NewCoupon {
            code: "FREE20".into(),
            kind: CouponKind::Percent,
            value: Decimal::from(20),
            active: true,
            scope: None,
        })
        .await
        .expect("seed coupon");
}

/// Seed an admin-role user (`admin@example.com`) for the admin API tests.
///
/// # Panics
///
/// Panics if the write fails.
pub async fn seed_admin(backend: &Arc<dyn StoreBackend>) {
    use ridegear_core::{Email, UserRole};
    use ridegear_store::{NewUser, UserStore};

    UserStore::new(Arc::clone(backend))
        .create(NewUser {
            email: Email::parse("admin@example.com").expect("valid"),
            name: "Admin".into(),
            role: UserRole::Admin,
        })
        .await
        .expect("seed admin");
}
