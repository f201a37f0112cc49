use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::cart::{Cart, CartLine};

fn one() -> i32 {
    1
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct AddToCartRequest {
    pub product_id: i64,
    #[serde(default = "one")]
    pub quantity: i32,
    pub variant: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct UpdateCartItemRequest {
    pub quantity: i32,
    pub variant: Option<String>,
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CartItemQuery {
    pub variant: Option<String>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CartView {
    pub items: Vec<CartLine>,
    pub item_count: i64,
    pub total: Decimal,
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart.lines().to_vec(),
            item_count: cart.item_count(),
            total: cart.total(),
        }
    }
}
