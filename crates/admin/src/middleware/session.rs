//! Admin session middleware configuration.
//!
//! Separate cookie name and signing key from the storefront, so an admin
//! session never leaks across surfaces.

use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::{self, AdminConfig};

/// Admin session cookie name.
pub const SESSION_COOKIE_NAME: &str = "rg_admin_session";

/// Session expiry time in seconds (24 hours - shorter than the storefront).
const SESSION_EXPIRY_SECONDS: i64 = 24 * 60 * 60;

/// Create the session layer with the in-memory store.
#[must_use]
pub fn create_session_layer(
    config: &AdminConfig,
) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let store = MemoryStore::default();
    let is_secure = config.base_url.starts_with("https://");
    let key = Key::derive_from(config::secret_bytes(&config.session_secret));

    SessionManagerLayer::new(store)
        .with_name(SESSION_COOKIE_NAME)
        .with_expiry(Expiry::OnInactivity(
            tower_sessions::cookie::time::Duration::seconds(SESSION_EXPIRY_SECONDS),
        ))
        .with_secure(is_secure)
        .with_same_site(tower_sessions::cookie::SameSite::Lax)
        .with_http_only(true)
        .with_path("/")
        .with_signed(key)
}
