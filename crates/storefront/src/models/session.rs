//! Session-related types.
//!
//! Types stored in the session for cart and authentication state.

use gallery_core::Email;
use serde::{Deserialize, Serialize};

/// Session-stored user identity.
///
/// Minimal data kept in the session to identify the logged-in user and
/// authorize calls against the accounts service on their behalf.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CurrentUser {
    /// User's email address.
    pub email: Email,
    /// Bearer token issued by the accounts service.
    pub access_token: String,
}

/// Session keys for storefront data.
pub mod keys {
    /// Key for storing the current logged-in user.
    pub const CURRENT_USER: &str = "current_user";

    /// Key for storing the cart ID.
    pub const CART_ID: &str = "cart_id";
}
