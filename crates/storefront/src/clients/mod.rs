//! HTTP clients for the remote services the storefront depends on.
//!
//! # Architecture
//!
//! The storefront owns no data besides the session cart; products, user
//! accounts, and payment orders all live behind remote JSON APIs. Each
//! service gets one client struct here:
//!
//! - [`catalog::CatalogClient`] - product listing, detail by slug, search;
//!   read-only and cached in memory via `moka` (5 minute TTL)
//! - [`accounts::AccountsClient`] - login and registration
//! - [`payments::PaymentClient`] - payment order creation for checkout
//!
//! Remote validation failures carry a `detail` message which is surfaced to
//! the client verbatim; transport failures collapse to a generic error.

pub mod accounts;
pub mod catalog;
pub mod payments;

pub use accounts::AccountsClient;
pub use catalog::CatalogClient;
pub use payments::PaymentClient;
