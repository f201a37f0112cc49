use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    catalog::ProductFilter,
    dto::catalog::{ListedProductList, ProductDetail, RelatedProductList},
    error::AppResult,
    response::ApiResponse,
    routes::params::RelatedQuery,
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_products))
        .route("/{id}", get(get_product))
        .route("/{id}/related", get(related_products))
}

#[utoipa::path(
    get,
    path = "/api/products",
    params(
        ("q" = Option<String>, Query, description = "Case-insensitive name filter"),
        ("category" = Option<String>, Query, description = "Category label, `all` for every category"),
        ("min_price" = Option<f64>, Query, description = "Inclusive lower price bound"),
        ("max_price" = Option<f64>, Query, description = "Inclusive upper price bound"),
    ),
    responses(
        (status = 200, description = "Products with their category labels", body = ApiResponse<ListedProductList>)
    ),
    tag = "Catalog"
)]
pub async fn list_products(
    State(state): State<AppState>,
    Query(filter): Query<ProductFilter>,
) -> AppResult<Json<ApiResponse<ListedProductList>>> {
    let resp = catalog_service::list_products(&state, filter).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}",
    params(
        ("id" = i64, Path, description = "Product ID")
    ),
    responses(
        (status = 200, description = "Product with seller, attributes and parent categories", body = ApiResponse<ProductDetail>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Catalog"
)]
pub async fn get_product(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> AppResult<Json<ApiResponse<ProductDetail>>> {
    let resp = catalog_service::get_product(&state, id).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/products/{id}/related",
    params(
        ("id" = i64, Path, description = "Product ID"),
        ("limit" = Option<u64>, Query, description = "Maximum results, default 4, at most 20")
    ),
    responses(
        (status = 200, description = "Products from the same parent category", body = ApiResponse<RelatedProductList>),
        (status = 404, description = "Product not found"),
    ),
    tag = "Catalog"
)]
pub async fn related_products(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Query(query): Query<RelatedQuery>,
) -> AppResult<Json<ApiResponse<RelatedProductList>>> {
    let resp = catalog_service::related_products(&state, id, query).await?;
    Ok(Json(resp))
}
