use axum::{Json, Router, extract::State, routing::post};

use crate::{
    error::AppResult, middleware::auth::AuthUser, response::ApiResponse,
    services::cart_service, state::AppState,
};

pub fn router() -> Router<AppState> {
    Router::new().route("/logout", post(logout))
}

#[utoipa::path(
    post,
    path = "/api/session/logout",
    responses(
        (status = 200, description = "Cart and last order of the session dropped")
    ),
    security(("bearer_auth" = [])),
    tag = "Session"
)]
pub async fn logout(
    State(state): State<AppState>,
    user: AuthUser,
) -> AppResult<Json<ApiResponse<()>>> {
    let resp = cart_service::logout(&state, &user).await?;
    Ok(Json(resp))
}
