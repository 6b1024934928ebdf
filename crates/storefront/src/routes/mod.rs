//! HTTP route handlers for the storefront.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                       - Welcome payload
//! GET  /health                 - Health check
//! GET  /featured               - Product of the week
//!
//! # Products
//! GET  /products               - Product listing (pagination + search)
//! GET  /products/{slug}        - Product detail with similar products
//!
//! # Cart
//! GET  /cart                   - Full cart contents
//! POST /cart/add               - Add a product to the cart
//! POST /cart/remove            - Remove a product from the cart
//! GET  /cart/count             - Cart badge count
//! POST /cart/checkout          - Create a payment order from the cart
//!
//! # Auth
//! POST /auth/login             - Login against the accounts service
//! POST /auth/register          - Register a new account
//! POST /auth/logout            - Clear the session user
//! ```

pub mod auth;
pub mod cart;
pub mod home;
pub mod products;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the product routes router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index))
        .route("/{slug}", get(products::show))
}

/// Create the cart routes router.
pub fn cart_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(cart::show))
        .route("/add", post(cart::add))
        .route("/remove", post(cart::remove))
        .route("/count", get(cart::count))
        .route("/checkout", post(cart::checkout))
}

/// Create the auth routes router.
pub fn auth_routes() -> Router<AppState> {
    Router::new()
        .route("/login", post(auth::login))
        .route("/register", post(auth::register))
        .route("/logout", post(auth::logout))
}

/// Create all routes for the storefront.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::root))
        .route("/featured", get(home::featured))
        .nest("/products", product_routes())
        .nest("/cart", cart_routes())
        .nest("/auth", auth_routes())
}
