//! Session middleware configuration.
//!
//! Sessions are cookie-addressed and stored in memory, which matches the
//! rest of the mock persistence story: nothing session-scoped survives a
//! restart. The cookie is signed with the configured session secret.

use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::{self, StorefrontConfig};

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "rg_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with the in-memory store.
#[must_use]
pub fn create_session_layer(
    config: &StorefrontConfig,
) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let store = MemoryStore::default();

    // Determine if we're in production (HTTPS)
    let is_secure = config.base_url.starts_with("https://");

    // Key::derive_from wants at least 32 bytes; config validation enforces that.
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
