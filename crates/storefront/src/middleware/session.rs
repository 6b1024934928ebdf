//! Session middleware configuration.
//!
//! Sets up in-memory sessions using tower-sessions. Carts are explicitly
//! ephemeral (they do not survive a restart), so the in-memory store is
//! the intended backing, not a stopgap.

use secrecy::ExposeSecret;
use tower_sessions::cookie::Key;
use tower_sessions::service::SignedCookie;
use tower_sessions::{Expiry, MemoryStore, SessionManagerLayer};

use crate::config::GalleryConfig;

/// Session cookie name.
pub const SESSION_COOKIE_NAME: &str = "gallery_session";

/// Session expiry time in seconds (7 days).
const SESSION_EXPIRY_SECONDS: i64 = 7 * 24 * 60 * 60;

/// Create the session layer with an in-memory store.
///
/// The signing key is derived from the configured session secret; config
/// loading guarantees the secret is at least 32 bytes.
#[must_use]
pub fn create_session_layer(config: &GalleryConfig) -> SessionManagerLayer<MemoryStore, SignedCookie> {
    let store = MemoryStore::default();

    let key = Key::derive_from(config.session_secret.expose_secret().as_bytes());

    // Secure cookies only when actually served over HTTPS
    let is_secure = config.base_url.starts_with("https://");

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
