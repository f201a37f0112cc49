use axum::{
    Json, Router,
    extract::{Path, Query, State},
    routing::{get, put},
};

use crate::{
    crud::{Record, SaveMode, TableName},
    dto::admin::{Dashboard, DeleteQuery, TableBlank, TableRows},
    error::AppResult,
    middleware::auth::AuthUser,
    response::ApiResponse,
    services::admin_service,
    state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new()
        .route("/dashboard", get(dashboard))
        .route("/tables/{table}", get(list_table).post(create_record))
        .route("/tables/{table}/blank", get(blank_record))
        .route("/tables/{table}/{id}", put(update_record).delete(delete_record))
}

#[utoipa::path(
    get,
    path = "/api/admin/dashboard",
    responses(
        (status = 200, description = "All eight tables, load errors and totals", body = ApiResponse<Dashboard>),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn dashboard(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<Dashboard>>> {
    let resp = admin_service::dashboard(&state, &user).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/tables/{table}",
    params(
        ("table" = TableName, Path, description = "Table name")
    ),
    responses(
        (status = 200, description = "Every row of the table", body = ApiResponse<TableRows>),
        (status = 403, description = "Forbidden"),
        (status = 502, description = "Backend error"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn list_table(
    State(state): State<AppState>,
    user: AuthUser,
    Path(table): Path<TableName>,
) -> AppResult<Json<ApiResponse<TableRows>>> {
    let resp = admin_service::list_table(&state, &user, table).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    get,
    path = "/api/admin/tables/{table}/blank",
    params(
        ("table" = TableName, Path, description = "Editable table name")
    ),
    responses(
        (status = 200, description = "Empty record and field descriptors for the add form", body = ApiResponse<TableBlank>),
        (status = 400, description = "Table is read-only"),
        (status = 403, description = "Forbidden"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn blank_record(
    user: AuthUser,
    Path(table): Path<TableName>,
) -> AppResult<Json<ApiResponse<TableBlank>>> {
    let resp = admin_service::blank_record(&user, table).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    post,
    path = "/api/admin/tables/{table}",
    params(
        ("table" = TableName, Path, description = "Editable table name")
    ),
    request_body = Record,
    responses(
        (status = 200, description = "Row inserted, table re-fetched", body = ApiResponse<TableRows>),
        (status = 400, description = "Malformed payload or read-only table"),
        (status = 403, description = "Forbidden"),
        (status = 422, description = "Validation failed"),
        (status = 502, description = "Backend rejected the insert"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn create_record(
    State(state): State<AppState>,
    user: AuthUser,
    Path(table): Path<TableName>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<ApiResponse<TableRows>>> {
    let resp = admin_service::save_record(&state, &user, table, SaveMode::Add, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    put,
    path = "/api/admin/tables/{table}/{id}",
    params(
        ("table" = TableName, Path, description = "Editable table name"),
        ("id" = i64, Path, description = "Row ID")
    ),
    request_body = Record,
    responses(
        (status = 200, description = "Row updated, table re-fetched", body = ApiResponse<TableRows>),
        (status = 400, description = "Malformed payload or read-only table"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 422, description = "Validation failed"),
        (status = 502, description = "Backend rejected the update"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn update_record(
    State(state): State<AppState>,
    user: AuthUser,
    Path((table, id)): Path<(TableName, i64)>,
    Json(payload): Json<serde_json::Value>,
) -> AppResult<Json<ApiResponse<TableRows>>> {
    let resp =
        admin_service::save_record(&state, &user, table, SaveMode::Edit { id }, payload).await?;
    Ok(Json(resp))
}

#[utoipa::path(
    delete,
    path = "/api/admin/tables/{table}/{id}",
    params(
        ("table" = TableName, Path, description = "Table name"),
        ("id" = i64, Path, description = "Row ID"),
        ("confirm" = Option<bool>, Query, description = "Must be true")
    ),
    responses(
        (status = 200, description = "Row deleted, table re-fetched", body = ApiResponse<TableRows>),
        (status = 400, description = "Delete not confirmed"),
        (status = 403, description = "Forbidden"),
        (status = 404, description = "Not Found"),
        (status = 502, description = "Backend rejected the delete"),
    ),
    security(("bearer_auth" = [])),
    tag = "Admin"
)]
pub async fn delete_record(
    State(state): State<AppState>,
    user: AuthUser,
    Path((table, id)): Path<(TableName, i64)>,
    Query(query): Query<DeleteQuery>,
) -> AppResult<Json<ApiResponse<TableRows>>> {
    let confirmed = query.confirm.unwrap_or(false);
    let resp = admin_service::delete_record(&state, &user, table, id, confirmed).await?;
    Ok(Json(resp))
}
