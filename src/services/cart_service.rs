use sea_orm::EntityTrait;

use crate::{
    cart::{CartLine, PLACEHOLDER_IMAGE},
    dto::cart::{AddToCartRequest, CartView, UpdateCartItemRequest},
    entity::Products,
    error::{AppError, AppResult, ValidationError},
    middleware::auth::AuthUser,
    models::in_stock,
    response::{ApiResponse, Meta},
    state::AppState,
};

pub async fn view_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let session = state.sessions.snapshot(user.user_id).await;
    let view = CartView::from(&session.cart);
    let meta = Meta::total(view.items.len());
    Ok(ApiResponse::success("Cart", view, Some(meta)))
}

/// Add a catalog product to the caller's cart. Name, price and seller are
/// taken from the product row, never from the request.
pub async fn add_to_cart(
    state: &AppState,
    user: &AuthUser,
    payload: AddToCartRequest,
) -> AppResult<ApiResponse<CartView>> {
    if payload.quantity <= 0 {
        return Err(ValidationError::NotPositive("quantity").into());
    }

    let product = Products::find_by_id(payload.product_id)
        .one(state.db())
        .await?;
    let product = match product {
        Some(p) => p,
        None => return Err(AppError::BadRequest("product not found".into())),
    };
    if !in_stock(product.quantity, product.status) {
        return Err(AppError::BadRequest(format!("{} is out of stock", product.name)));
    }

    let line = CartLine {
        product_id: product.id,
        name: product.name,
        price: product.price,
        quantity: payload.quantity,
        seller_id: product.seller_id,
        image: PLACEHOLDER_IMAGE.to_string(),
        variant: payload.variant.filter(|v| !v.is_empty()),
    };

    let view = state
        .sessions
        .update(user.user_id, |session| {
            session.cart.add(line);
            CartView::from(&session.cart)
        })
        .await;

    tracing::info!(user_id = %user.user_id, product_id = payload.product_id, "cart item added");
    Ok(ApiResponse::success("Added to cart", view, None))
}

pub async fn update_cart_item(
    state: &AppState,
    user: &AuthUser,
    product_id: i64,
    payload: UpdateCartItemRequest,
) -> AppResult<ApiResponse<CartView>> {
    let variant = payload.variant.filter(|v| !v.is_empty());
    let updated = state
        .sessions
        .update(user.user_id, |session| {
            session
                .cart
                .update_quantity(product_id, variant.as_deref(), payload.quantity)
                .then(|| CartView::from(&session.cart))
        })
        .await;

    match updated {
        Some(view) => {
            tracing::info!(user_id = %user.user_id, product_id, quantity = payload.quantity, "cart item updated");
            Ok(ApiResponse::success("Cart updated", view, None))
        }
        None => Err(AppError::NotFound),
    }
}

pub async fn remove_from_cart(
    state: &AppState,
    user: &AuthUser,
    product_id: i64,
    variant: Option<String>,
) -> AppResult<ApiResponse<CartView>> {
    let variant = variant.filter(|v| !v.is_empty());
    let removed = state
        .sessions
        .update(user.user_id, |session| {
            session
                .cart
                .remove(product_id, variant.as_deref())
                .then(|| CartView::from(&session.cart))
        })
        .await;

    match removed {
        Some(view) => {
            tracing::info!(user_id = %user.user_id, product_id, "cart item removed");
            Ok(ApiResponse::success("Removed from cart", view, None))
        }
        None => Err(AppError::NotFound),
    }
}

pub async fn clear_cart(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<CartView>> {
    let view = state
        .sessions
        .update(user.user_id, |session| {
            session.cart.clear();
            CartView::from(&session.cart)
        })
        .await;
    tracing::info!(user_id = %user.user_id, "cart cleared");
    Ok(ApiResponse::success("Cart cleared", view, None))
}

/// Drop everything the server keeps for this user's session.
pub async fn logout(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<()>> {
    state.sessions.reset(user.user_id).await;
    tracing::info!(user_id = %user.user_id, "session reset");
    Ok(ApiResponse::success("Logged out", (), None))
}
