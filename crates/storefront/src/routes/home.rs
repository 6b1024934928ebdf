//! Landing page route handlers.

use axum::{Json, extract::State};
use serde_json::{Value, json};
use tracing::instrument;

use crate::error::Result;
use crate::models::Product;
use crate::state::AppState;

/// Welcome payload at the API root.
pub async fn root() -> Json<Value> {
    Json(json!({ "message": "Welcome to the Gallery API" }))
}

/// Product of the week: the configured featured slug.
#[instrument(skip(state))]
pub async fn featured(State(state): State<AppState>) -> Result<Json<Product>> {
    let product = state
        .catalog()
        .get_by_slug(&state.config().featured_slug)
        .await?;
    Ok(Json(product))
}
