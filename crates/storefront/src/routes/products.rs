//! Product route handlers.

use axum::{
    Json,
    extract::{Path, Query, State},
};
use serde::{Deserialize, Serialize};
use tracing::instrument;

use crate::error::Result;
use crate::models::Product;
use crate::state::AppState;

/// Default page size for the product listing.
const DEFAULT_PER_PAGE: u32 = 12;

/// Upper bound on requested page size.
const MAX_PER_PAGE: u32 = 100;

/// Listing query parameters: pagination plus optional search.
#[derive(Debug, Deserialize)]
pub struct ListingQuery {
    pub page: Option<u32>,
    pub per_page: Option<u32>,
    pub query: Option<String>,
    pub category: Option<String>,
}

/// One page of the product listing.
#[derive(Debug, Serialize)]
pub struct ProductsPage {
    pub products: Vec<Product>,
    pub page: u32,
    pub per_page: u32,
    pub total: usize,
    pub total_pages: u32,
}

/// Product detail payload: the product plus up to three same-category
/// suggestions.
#[derive(Debug, Serialize)]
pub struct ProductDetail {
    pub product: Product,
    pub similar: Vec<Product>,
}

/// Product listing with pagination; search when `query` or `category`
/// parameters are present.
#[instrument(skip(state))]
pub async fn index(
    State(state): State<AppState>,
    Query(params): Query<ListingQuery>,
) -> Result<Json<ProductsPage>> {
    let page = params.page.unwrap_or(1).max(1);
    let per_page = params
        .per_page
        .unwrap_or(DEFAULT_PER_PAGE)
        .clamp(1, MAX_PER_PAGE);

    let all: Vec<Product> = if params.query.is_some() || params.category.is_some() {
        state
            .catalog()
            .search(params.query.as_deref(), params.category.as_deref())
            .await?
    } else {
        state.catalog().list_products().await?.as_ref().clone()
    };

    let total = all.len();
    let total_pages = page_count(total, per_page);
    let products: Vec<Product> = all
        .into_iter()
        .skip(page_offset(page, per_page))
        .take(per_page as usize)
        .collect();

    Ok(Json(ProductsPage {
        products,
        page,
        per_page,
        total,
        total_pages,
    }))
}

/// Product detail by slug, with similar products from the same category.
#[instrument(skip(state), fields(slug = %slug))]
pub async fn show(
    State(state): State<AppState>,
    Path(slug): Path<String>,
) -> Result<Json<ProductDetail>> {
    let product = state.catalog().get_by_slug(&slug).await?;

    // Suggestions are best-effort; a failed list fetch must not break the
    // detail page
    let similar = state
        .catalog()
        .similar_products(&product.category, product.id)
        .await
        .unwrap_or_else(|err| {
            tracing::warn!("Failed to fetch similar products: {err}");
            Vec::new()
        });

    Ok(Json(ProductDetail { product, similar }))
}

/// Index of the first item on `page` (1-based).
fn page_offset(page: u32, per_page: u32) -> usize {
    (page as usize - 1) * per_page as usize
}

/// Number of pages needed for `total` items.
fn page_count(total: usize, per_page: u32) -> u32 {
    let total = u32::try_from(total).unwrap_or(u32::MAX);
    total.div_ceil(per_page)
}
