use std::collections::HashMap;

use chrono::Utc;
use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, EntityTrait, PaginatorTrait, QueryFilter, QueryOrder,
    QuerySelect, TransactionTrait,
};

use crate::{
    cart::PLACEHOLDER_IMAGE,
    dto::orders::{
        CheckoutRequest, LastOrderView, OrderHistory, OrderHistoryEntry, OrderHistoryItem,
        OrderWithItems, ShippingAddress,
    },
    entity::{
        OrderItems, Orders, Products,
        order_items::{ActiveModel as OrderItemActive, Column as OrderItemCol},
        orders::{ActiveModel as OrderActive, Column as OrderCol},
    },
    error::{AppError, AppResult},
    middleware::auth::AuthUser,
    models::{Order, OrderItem},
    response::{ApiResponse, Meta},
    routes::params::Pagination,
    session::LastOrder,
    state::AppState,
    tracking::{TrackingTimeline, estimated_delivery},
};

/// Turn the caller's cart into an order.
///
/// The order row and its items are written in one transaction. The cart and
/// the last-order receipt only change after the commit went through, and only
/// the lines that were ordered leave the cart.
pub async fn checkout(
    state: &AppState,
    user: &AuthUser,
    payload: CheckoutRequest,
) -> AppResult<ApiResponse<OrderWithItems>> {
    let shipping = payload.shipping;
    shipping.validate()?;

    let cart = state.sessions.snapshot(user.user_id).await.cart;
    if cart.is_empty() {
        return Err(AppError::BadRequest("Cart is empty".into()));
    }

    let placed_at = Utc::now();
    let txn = state.db().begin().await?;

    let order = OrderActive {
        id: NotSet,
        customer_id: Set(user.user_id),
        seller_id: Set(cart.common_seller()),
        date_created: Set(placed_at.into()),
        total_amount: Set(cart.total()),
        first_name: Set(shipping.first_name.trim().to_string()),
        last_name: Set(shipping.last_name.trim().to_string()),
        email: Set(shipping.email.trim().to_string()),
        address: Set(shipping.address.trim().to_string()),
        city: Set(shipping.city.trim().to_string()),
        postal_code: Set(shipping.postal_code.trim().to_string()),
        country: Set(shipping.country.trim().to_string()),
    }
    .insert(&txn)
    .await?;

    let mut items: Vec<OrderItem> = Vec::with_capacity(cart.len());
    for line in cart.lines() {
        let item = OrderItemActive {
            id: NotSet,
            order_id: Set(order.id),
            product_id: Set(line.product_id),
            quantity: Set(line.quantity),
            price_at_moment: Set(line.price),
        }
        .insert(&txn)
        .await?;
        items.push(OrderItem::from(item));
    }

    txn.commit().await?;

    let receipt = LastOrder::from_cart(order.id, shipping, &cart, placed_at);
    state
        .sessions
        .update(user.user_id, |session| session.complete_checkout(receipt, &cart))
        .await;

    tracing::info!(
        user_id = %user.user_id,
        order_id = order.id,
        items = items.len(),
        total = %order.total_amount,
        "order placed"
    );

    Ok(ApiResponse::success(
        "Order placed",
        OrderWithItems {
            order: Order::from(order),
            items,
        },
        Some(Meta::empty()),
    ))
}

/// The caller's orders, newest first.
pub async fn list_orders(
    state: &AppState,
    user: &AuthUser,
    pagination: Pagination,
) -> AppResult<ApiResponse<OrderHistory>> {
    let (page, limit, offset) = pagination.normalize();

    let finder = Orders::find()
        .filter(OrderCol::CustomerId.eq(user.user_id))
        .order_by_desc(OrderCol::DateCreated)
        .order_by_desc(OrderCol::Id);

    let total = finder.clone().count(state.db()).await? as i64;

    let orders: Vec<Order> = finder
        .limit(limit as u64)
        .offset(offset as u64)
        .all(state.db())
        .await?
        .into_iter()
        .map(Order::from)
        .collect();

    let mut items_by_order: HashMap<i64, Vec<OrderHistoryItem>> = HashMap::new();
    if !orders.is_empty() {
        let rows = OrderItems::find()
            .filter(OrderItemCol::OrderId.is_in(orders.iter().map(|o| o.id)))
            .order_by_asc(OrderItemCol::Id)
            .find_also_related(Products)
            .all(state.db())
            .await?;
        for (item, product) in rows {
            items_by_order
                .entry(item.order_id)
                .or_default()
                .push(OrderHistoryItem {
                    product_id: item.product_id,
                    name: product
                        .map(|p| p.name)
                        .unwrap_or_else(|| format!("Product #{}", item.product_id)),
                    price: item.price_at_moment,
                    quantity: item.quantity,
                    image: PLACEHOLDER_IMAGE.to_string(),
                });
        }
    }

    let entries = orders
        .into_iter()
        .map(|order| OrderHistoryEntry {
            items: items_by_order.remove(&order.id).unwrap_or_default(),
            shipping_address: ShippingAddress {
                name: format!("{} {}", order.first_name, order.last_name)
                    .trim()
                    .to_string(),
                address: order.address,
                city: order.city,
                postal_code: order.postal_code,
                country: order.country,
            },
            id: order.id,
            date: order.date_created,
            total: order.total_amount,
        })
        .collect();

    let meta = Meta::new(page, limit, total);
    Ok(ApiResponse::success(
        "Orders",
        OrderHistory { items: entries },
        Some(meta),
    ))
}

/// Receipt of the order placed last in this session, with its tracking
/// progress as of now.
pub async fn last_order(
    state: &AppState,
    user: &AuthUser,
) -> AppResult<ApiResponse<LastOrderView>> {
    let last = state.sessions.snapshot(user.user_id).await.last_order;
    let order = match last {
        Some(order) => order,
        None => return Err(AppError::NotFound),
    };

    let timeline = TrackingTimeline::observed_at(state.tracking.clone(), order.placed_at, Utc::now());
    Ok(ApiResponse::success(
        "Last order",
        LastOrderView {
            estimated_delivery: estimated_delivery(order.placed_at),
            stage: timeline.stage(),
            tracking: timeline.steps(),
            order,
        },
        None,
    ))
}

pub async fn clear_last_order(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<()>> {
    let cleared = state
        .sessions
        .update(user.user_id, |session| session.last_order.take())
        .await;
    if cleared.is_none() {
        return Err(AppError::NotFound);
    }
    Ok(ApiResponse::success("Last order cleared", (), None))
}
