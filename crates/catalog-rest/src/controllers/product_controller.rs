//! Product catalog controller.

use crate::{responses::ApiResult, state::AppState};
use axum::{extract::State, routing::get, Json, Router};
use catalog_service::ProductListResponse;
use tracing::debug;

/// Creates the product router.
pub fn router() -> Router<AppState> {
    Router::new().route("/products", get(list_products))
}

/// List every product, from the cache when possible.
#[utoipa::path(
    get,
    path = "/products",
    tag = "products",
    responses(
        (status = 200, description = "Product catalog and the source that served it", body = ProductListResponse),
        (status = 500, description = "Catalog could not be read", body = catalog_core::ErrorResponse)
    )
)]
pub async fn list_products(State(state): State<AppState>) -> ApiResult<ProductListResponse> {
    debug!("List products request");

    let response = state.product_service.list_products().await?;
    Ok(Json(response))
}
