use axum::{
    Json, Router,
    extract::{Query, State},
    routing::{get, post},
};

use crate::{
    dto::orders::{CheckoutRequest, LastOrderView, OrderHistory, OrderWithItems},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    routes::params::Pagination,
    services::order_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/", get(list_orders))
        .route("/checkout", post(checkout))
        .route("/last", get(last_order).delete(clear_last_order))
}

#[utoipa::path(
    post,
    path = "/api/orders/checkout",
    request_body = CheckoutRequest,
    responses(
        (status = 200, description = "Order and items written, cart cleared", body = ApiResponse<OrderWithItems>),
        (status = 400, description = "Cart is empty"),
        (status = 422, description = "Invalid shipping details"),
        (status = 502, description = "Order could not be stored, cart kept"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn checkout(
    State(state): State<AppState>,
    user: AuthUser,
    Json(payload): Json<CheckoutRequest>,
) -> AppResult<Json<ApiResponse<OrderWithItems>>> {
    let resp = order_service::checkout(&state, &user, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders",
    params(
        ("page" = Option<i64>, Query, description = "Page number, default 1"),
        ("per_page" = Option<i64>, Query, description = "Items per page, default 20")
    ),
    responses(
        (status = 200, description = "Order history of the current user, newest first", body = ApiResponse<OrderHistory>)
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn list_orders(
    State(state): State<AppState>,
    user: AuthUser,
    Query(pagination): Query<Pagination>,
) -> AppResult<Json<ApiResponse<OrderHistory>>> {
    let resp = order_service::list_orders(&state, &user, pagination).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/orders/last",
    responses(
        (status = 200, description = "Receipt and tracking of the last order", body = ApiResponse<LastOrderView>),
        (status = 404, description = "No order placed in this session"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn last_order(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<LastOrderView>>> {
    let resp = order_service::last_order(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/orders/last",
    responses(
        (status = 200, description = "Receipt cleared"),
        (status = 404, description = "No order placed in this session"),
    ),
    security(("bearer_auth" = [])),
    tag = "Orders"
)]
pub async fn clear_last_order(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<()>>> {
    let resp = order_service::clear_last_order(&state, &user).await?;
    Ok(Json(resp))
}
