use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::get,
};

use crate::{
    catalog::ProductFilter,
    dto::catalog::{CategoryList, CategoryPage},
    error::AppResult,
    response::ApiResponse,
    routes::params::{CategoryListQuery, CategoryProductsQuery},
    services::catalog_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_categories))
        .route("/{name}/products", get(category_products))
}

#[utoipa::path(
    get,
    path = "/api/categories",
    params(
        ("top_level" = Option<bool>, Query, description = "Only categories without a parent")
    ),
    responses(
        (status = 200, description = "List categories ordered by id", body = ApiResponse<CategoryList>)
    ),
    tag = "Catalog"
)]
pub async fn list_categories(
    State(state): State<AppState>,
    Query(query): Query<CategoryListQuery>,
) -> AppResult<Json<ApiResponse<CategoryList>>> {
    let resp = catalog_service::list_categories(&state, query.top_level.unwrap_or(false)).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/categories/{name}/products",
    params(
        ("name" = String, Path, description = "Category display name"),
        ("q" = Option<String>, Query, description = "Case-insensitive name filter")
    ),
    responses(
        (status = 200, description = "Products of the category and its children", body = ApiResponse<CategoryPage>),
        (status = 404, description = "Unknown category"),
    ),
    tag = "Catalog"
)]
pub async fn category_products(
    State(state): State<AppState>,
    Path(name): Path<String>,
    Query(query): Query<CategoryProductsQuery>,
) -> AppResult<Json<ApiResponse<CategoryPage>>> {
    let filter = ProductFilter {
        q: query.q,
        ..ProductFilter::default()
    };
    let resp = catalog_service::category_products(&state, &name, filter).await?;
    Ok(Json(resp))
}
