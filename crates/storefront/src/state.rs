//! Application state shared across handlers.

use std::sync::Arc;

use crate::cart::CartStore;
use crate::clients::{AccountsClient, CatalogClient, PaymentClient};
use crate::config::GalleryConfig;

/// Application state shared across all handlers.
///
/// This struct is cheaply cloneable via `Arc` and provides access to
/// shared resources: the remote service clients and the cart store.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    config: GalleryConfig,
    catalog: CatalogClient,
    accounts: AccountsClient,
    payments: PaymentClient,
    carts: CartStore,
}

impl AppState {
    /// Create a new application state from configuration.
    #[must_use]
    pub fn new(config: GalleryConfig) -> Self {
        let catalog = CatalogClient::new(&config.catalog);
        let accounts = AccountsClient::new(&config.accounts);
        let payments = PaymentClient::new(&config.payments);
        let carts = CartStore::new(config.currency);

        Self {
            inner: Arc::new(AppStateInner {
                config,
                catalog,
                accounts,
                payments,
                carts,
            }),
        }
    }

    /// Get a reference to the storefront configuration.
    #[must_use]
    pub fn config(&self) -> &GalleryConfig {
        &self.inner.config
    }

    /// Get a reference to the catalog API client.
    #[must_use]
    pub fn catalog(&self) -> &CatalogClient {
        &self.inner.catalog
    }

    /// Get a reference to the accounts API client.
    #[must_use]
    pub fn accounts(&self) -> &AccountsClient {
        &self.inner.accounts
    }

    /// Get a reference to the payment API client.
    #[must_use]
    pub fn payments(&self) -> &PaymentClient {
        &self.inner.payments
    }

    /// Get a reference to the cart store.
    #[must_use]
    pub fn carts(&self) -> &CartStore {
        &self.inner.carts
    }
}
