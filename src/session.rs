//! Per-user storefront state that never reaches the database.
//!
//! The [`SessionStore`] is created once with the application state. Each
//! authenticated user gets a [`Session`] holding the cart and the receipt of
//! the order placed last. Checkout replaces the receipt and takes the ordered
//! lines out of the cart; logout drops the whole session.

use std::{collections::HashMap, sync::Arc};

use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use serde::Serialize;
use tokio::sync::RwLock;
use utoipa::ToSchema;
use uuid::Uuid;

use crate::{cart::Cart, dto::orders::ShippingDetails};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LastOrderItem {
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub image: String,
    pub variant: Option<String>,
}

/// Snapshot of a just-placed order for the confirmation page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct LastOrder {
    pub order_id: i64,
    pub shipping: ShippingDetails,
    pub items: Vec<LastOrderItem>,
    pub total: Decimal,
    pub placed_at: DateTime<Utc>,
}

impl LastOrder {
    pub fn from_cart(
        order_id: i64,
        shipping: ShippingDetails,
        cart: &Cart,
        placed_at: DateTime<Utc>,
    ) -> Self {
        let items = cart
            .lines()
            .iter()
            .map(|line| LastOrderItem {
                product_id: line.product_id,
                name: line.name.clone(),
                price: line.price,
                quantity: line.quantity,
                image: line.image.clone(),
                variant: line.variant.clone(),
            })
            .collect();
        Self {
            order_id,
            shipping,
            items,
            total: cart.total(),
            placed_at,
        }
    }
}

#[derive(Debug, Clone, Default)]
pub struct Session {
    pub cart: Cart,
    pub last_order: Option<LastOrder>,
}

impl Session {
    /// Record a committed order. `ordered` is the cart copy the order was
    /// built from; the live cart may have changed since.
    pub fn complete_checkout(&mut self, receipt: LastOrder, ordered: &Cart) {
        self.last_order = Some(receipt);
        self.cart.remove_ordered(ordered);
    }
}

#[derive(Debug, Clone, Default)]
pub struct SessionStore {
    inner: Arc<RwLock<HashMap<Uuid, Session>>>,
}

impl SessionStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Copy of the user's session; a user without one sees an empty session.
    pub async fn snapshot(&self, user_id: Uuid) -> Session {
        self.inner
            .read()
            .await
            .get(&user_id)
            .cloned()
            .unwrap_or_default()
    }

    /// Mutate the user's session under the write lock.
    pub async fn update<R>(&self, user_id: Uuid, f: impl FnOnce(&mut Session) -> R) -> R {
        let mut sessions = self.inner.write().await;
        f(sessions.entry(user_id).or_default())
    }

    pub async fn reset(&self, user_id: Uuid) {
        self.inner.write().await.remove(&user_id);
    }
}
