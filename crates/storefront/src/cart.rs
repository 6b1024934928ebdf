//! In-memory cart store.
//!
//! The store is the single source of truth for everything a visitor intends
//! to purchase: the navbar badge, the cart page, and the checkout total are
//! all derived from it at read time. Carts are keyed by a `CartId` kept in
//! the session cookie and live only as long as the process; durability is an
//! explicit non-goal.
//!
//! Mutations are synchronous and never cross an await point, so each call
//! observes and updates a cart atomically.

use std::collections::HashMap;
use std::sync::{PoisonError, RwLock};

use gallery_core::{CurrencyCode, Price, ProductId};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Identifier for one visitor's cart, stored in the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct CartId(Uuid);

impl CartId {
    /// Generate a fresh cart identifier.
    #[must_use]
    pub fn generate() -> Self {
        Self(Uuid::new_v4())
    }
}

impl std::fmt::Display for CartId {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

/// One entry in a cart: a product snapshot plus a unit count.
///
/// Display fields and prices are copied from the catalog at add time and
/// never mutated afterwards; only `quantity` changes, and only by merging
/// another add of the same product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CartLine {
    pub product_id: ProductId,
    pub name: String,
    pub artist: String,
    pub description: String,
    pub category: String,
    pub image: String,
    pub original_price: Price,
    pub current_price: Price,
    pub quantity: u32,
}

impl CartLine {
    /// The price of this line: unit price times quantity.
    #[must_use]
    pub fn line_total(&self) -> Price {
        self.current_price.times(self.quantity)
    }
}

/// A single visitor's cart: an insertion-ordered list of lines.
///
/// At most one line exists per product id. Adding a product already in the
/// cart accumulates its quantity instead of appending a duplicate row.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Cart {
    currency: CurrencyCode,
    lines: Vec<CartLine>,
    revision: u64,
}

impl Cart {
    /// Create an empty cart in the given currency.
    #[must_use]
    pub const fn new(currency: CurrencyCode) -> Self {
        Self {
            currency,
            lines: Vec::new(),
            revision: 0,
        }
    }

    /// Add a line, merging with an existing line for the same product.
    ///
    /// A zero quantity is treated as one unit; the operation cannot fail.
    pub fn add(&mut self, mut line: CartLine) {
        if line.quantity == 0 {
            line.quantity = 1;
        }

        match self
            .lines
            .iter_mut()
            .find(|existing| existing.product_id == line.product_id)
        {
            Some(existing) => {
                existing.quantity = existing.quantity.saturating_add(line.quantity);
            }
            None => self.lines.push(line),
        }

        self.revision += 1;
    }

    /// Remove the line for a product. A no-op when the product is absent.
    pub fn remove(&mut self, product_id: ProductId) {
        let before = self.lines.len();
        self.lines.retain(|line| line.product_id != product_id);
        if self.lines.len() != before {
            self.revision += 1;
        }
    }

    /// Read-only, insertion-ordered view of the cart contents.
    #[must_use]
    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    /// Number of distinct lines (the navbar badge count).
    #[must_use]
    pub fn line_count(&self) -> usize {
        self.lines.len()
    }

    /// Total units across all lines.
    #[must_use]
    pub fn total_quantity(&self) -> u64 {
        self.lines.iter().map(|line| u64::from(line.quantity)).sum()
    }

    /// Quantity-weighted total: sum of `current_price * quantity`.
    #[must_use]
    pub fn subtotal(&self) -> Price {
        self.lines
            .iter()
            .fold(Price::zero(self.currency), |total, line| {
                total.plus(&line.line_total())
            })
    }

    /// Whether the cart has no lines.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// Counter bumped on every mutation, so consumers can detect change.
    #[must_use]
    pub const fn revision(&self) -> u64 {
        self.revision
    }
}

/// All active carts, shared across request handlers through `AppState`.
///
/// The lock is held only for the duration of a synchronous operation and
/// never across an await point.
pub struct CartStore {
    currency: CurrencyCode,
    carts: RwLock<HashMap<CartId, Cart>>,
}

impl CartStore {
    /// Create an empty store for the given store currency.
    #[must_use]
    pub fn new(currency: CurrencyCode) -> Self {
        Self {
            currency,
            carts: RwLock::new(HashMap::new()),
        }
    }

    /// Snapshot a cart's current contents, or an empty cart if none exists.
    #[must_use]
    pub fn snapshot(&self, id: CartId) -> Cart {
        self.carts
            .read()
            .unwrap_or_else(PoisonError::into_inner)
            .get(&id)
            .cloned()
            .unwrap_or_else(|| Cart::new(self.currency))
    }

    /// Add a line to a cart, creating the cart on first use.
    ///
    /// Returns the updated cart contents.
    pub fn add_line(&self, id: CartId, line: CartLine) -> Cart {
        let mut carts = self.carts.write().unwrap_or_else(PoisonError::into_inner);
        let cart = carts.entry(id).or_insert_with(|| Cart::new(self.currency));
        cart.add(line);
        cart.clone()
    }

    /// Remove a product's line from a cart. A no-op when either the cart or
    /// the line is absent. Returns the updated cart contents.
    pub fn remove_line(&self, id: CartId, product_id: ProductId) -> Cart {
        let mut carts = self.carts.write().unwrap_or_else(PoisonError::into_inner);
        match carts.get_mut(&id) {
            Some(cart) => {
                cart.remove(product_id);
                cart.clone()
            }
            None => Cart::new(self.currency),
        }
    }

    /// Drop a cart entirely (after a successful checkout order).
    pub fn clear(&self, id: CartId) {
        self.carts
            .write()
            .unwrap_or_else(PoisonError::into_inner)
            .remove(&id);
    }
}
