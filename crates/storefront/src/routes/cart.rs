//! Cart route handlers.
//!
//! The cart ID lives in the session; all cart contents live in the
//! in-memory [`CartStore`](crate::cart::CartStore). Every response returns
//! the full, freshly derived cart view so the frontend never has to keep
//! its own copy in sync.

use axum::{Json, extract::State};
use gallery_core::{Price, ProductId};
use serde::{Deserialize, Serialize};
use tower_sessions::Session;
use tracing::instrument;

use crate::cart::{Cart, CartId, CartLine};
use crate::error::{AppError, Result};
use crate::models::{Product, session_keys};
use crate::state::AppState;

// =============================================================================
// View Types
// =============================================================================

/// Cart line display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartLineView {
    pub product_id: ProductId,
    pub name: String,
    pub artist: String,
    pub category: String,
    pub image: String,
    pub quantity: u32,
    pub unit_price: Price,
    pub line_total: Price,
}

/// Full cart display data.
#[derive(Debug, Clone, Serialize)]
pub struct CartView {
    pub items: Vec<CartLineView>,
    /// Number of distinct lines (the navbar badge).
    pub item_count: usize,
    /// Total units across all lines.
    pub total_quantity: u64,
    pub subtotal: Price,
    pub subtotal_display: String,
    pub revision: u64,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        let items = cart
            .lines()
            .iter()
            .map(|line| CartLineView {
                product_id: line.product_id,
                name: line.name.clone(),
                artist: line.artist.clone(),
                category: line.category.clone(),
                image: line.image.clone(),
                quantity: line.quantity,
                unit_price: line.current_price,
                line_total: line.line_total(),
            })
            .collect();

        let subtotal = cart.subtotal();

        Self {
            items,
            item_count: cart.line_count(),
            total_quantity: cart.total_quantity(),
            subtotal,
            subtotal_display: subtotal.display(),
            revision: cart.revision(),
        }
    }
}

// =============================================================================
// Request / Response Types
// =============================================================================

/// Add to cart request body.
#[derive(Debug, Deserialize)]
pub struct AddToCartRequest {
    pub product_id: ProductId,
    pub quantity: Option<u32>,
}

/// Remove from cart request body.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartRequest {
    pub product_id: ProductId,
}

/// Cart badge count.
#[derive(Debug, Serialize)]
pub struct CartCount {
    pub count: usize,
}

/// Payment order details handed to the checkout widget.
#[derive(Debug, Serialize)]
pub struct CheckoutResponse {
    pub order_id: String,
    /// Amount in the smallest currency unit.
    pub amount: i64,
    pub currency: String,
    /// Gateway key id the widget authenticates with.
    pub key_id: String,
}

// =============================================================================
// Session Helpers
// =============================================================================

/// Get the cart ID from the session.
async fn get_cart_id(session: &Session) -> Option<CartId> {
    session
        .get::<CartId>(session_keys::CART_ID)
        .await
        .ok()
        .flatten()
}

/// Get the cart ID from the session, allocating one on first use.
async fn get_or_create_cart_id(session: &Session) -> Result<CartId> {
    if let Some(id) = get_cart_id(session).await {
        return Ok(id);
    }

    let id = CartId::generate();
    session
        .insert(session_keys::CART_ID, id)
        .await
        .map_err(|e| AppError::Internal(format!("Failed to save cart ID to session: {e}")))?;
    Ok(id)
}

/// Build a cart line snapshot from a catalog product.
fn line_from_product(product: &Product, quantity: u32, state: &AppState) -> CartLine {
    let currency = state.config().currency;
    CartLine {
        product_id: product.id,
        name: product.name.clone(),
        artist: product.artist.clone(),
        description: product.description.clone(),
        category: product.category.clone(),
        image: product.image_url.clone(),
        original_price: Price::new(product.original_price, currency),
        current_price: Price::new(product.current_price, currency),
        quantity,
    }
}

// =============================================================================
// Handlers
// =============================================================================

/// Full cart contents.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Json<CartView> {
    let cart = match get_cart_id(&session).await {
        Some(id) => state.carts().snapshot(id),
        None => state.carts().snapshot(CartId::generate()),
    };
    Json(CartView::from(&cart))
}

/// Add a product to the cart.
///
/// The product snapshot (name, artist, prices) is resolved from the
/// catalog by id; repeated adds of the same product accumulate quantity.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<AddToCartRequest>,
) -> Result<Json<CartView>> {
    let quantity = request.quantity.unwrap_or(1);
    if quantity == 0 {
        return Err(AppError::BadRequest(
            "Quantity must be at least 1".to_string(),
        ));
    }

    let product = state.catalog().get_by_id(request.product_id).await?;
    if !product.in_stock() {
        return Err(AppError::BadRequest(format!(
            "{} is out of stock",
            product.name
        )));
    }

    let cart_id = get_or_create_cart_id(&session).await?;
    let line = line_from_product(&product, quantity, &state);
    let cart = state.carts().add_line(cart_id, line);

    Ok(Json(CartView::from(&cart)))
}

/// Remove a product from the cart. A no-op when the product is absent.
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Json(request): Json<RemoveFromCartRequest>,
) -> Json<CartView> {
    let cart = match get_cart_id(&session).await {
        Some(id) => state.carts().remove_line(id, request.product_id),
        None => state.carts().snapshot(CartId::generate()),
    };
    Json(CartView::from(&cart))
}

/// Cart badge count.
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Json<CartCount> {
    let count = match get_cart_id(&session).await {
        Some(id) => state.carts().snapshot(id).line_count(),
        None => 0,
    };
    Json(CartCount { count })
}

/// Create a payment order from the cart contents.
///
/// The quantity-weighted cart total is converted to the smallest currency
/// unit and sent to the payment gateway; on success the cart is cleared
/// and the order details are returned for the checkout widget.
#[instrument(skip(state, session))]
pub async fn checkout(
    State(state): State<AppState>,
    session: Session,
) -> Result<Json<CheckoutResponse>> {
    let Some(cart_id) = get_cart_id(&session).await else {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    };

    let cart = state.carts().snapshot(cart_id);
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".to_string()));
    }

    let amount = cart
        .subtotal()
        .to_minor_units()
        .ok_or_else(|| AppError::Internal("Cart total out of range".to_string()))?;

    let order = state
        .payments()
        .create_order(amount, state.config().currency)
        .await?;

    state.carts().clear(cart_id);

    Ok(Json(CheckoutResponse {
        order_id: order.id,
        amount: order.amount,
        currency: order.currency,
        key_id: state.payments().key_id().to_string(),
    }))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use gallery_core::CurrencyCode;
    use rust_decimal::Decimal;

    fn line(id: i64, price: i64, quantity: u32) -> CartLine {
        CartLine {
            product_id: ProductId::new(id),
            name: format!("Artwork {id}"),
            artist: "A. Jaiswal".to_string(),
            description: String::new(),
            category: "Mandala".to_string(),
            image: format!("uploads/{id}.jpg"),
            original_price: Price::new(Decimal::from(price), CurrencyCode::INR),
            current_price: Price::new(Decimal::from(price), CurrencyCode::INR),
            quantity,
        }
    }

    #[test]
    fn test_cart_view_derives_totals() {
        let mut cart = Cart::new(CurrencyCode::INR);
        cart.add(line(1, 200, 3));
        cart.add(line(2, 100, 1));

        let view = CartView::from(&cart);
        assert_eq!(view.item_count, 2);
        assert_eq!(view.total_quantity, 4);
        assert_eq!(view.subtotal.amount, Decimal::from(700));
        assert_eq!(view.subtotal_display, "₹700.00");
        assert_eq!(view.items[0].line_total.amount, Decimal::from(600));
    }

    #[test]
    fn test_cart_view_empty() {
        let cart = Cart::new(CurrencyCode::INR);
        let view = CartView::from(&cart);
        assert!(view.items.is_empty());
        assert_eq!(view.item_count, 0);
        assert_eq!(view.subtotal.amount, Decimal::ZERO);
    }

    #[test]
    fn test_checkout_amount_is_minor_units() {
        let mut cart = Cart::new(CurrencyCode::INR);
        cart.add(line(1, 500, 1));
        assert_eq!(cart.subtotal().to_minor_units(), Some(50_000));
    }
}
