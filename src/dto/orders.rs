use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    error::ValidationError,
    models::{Order, OrderItem},
    session::LastOrder,
    tracking::{TrackingStage, TrackingStep},
};

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ShippingDetails {
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

impl ShippingDetails {
    pub fn validate(&self) -> Result<(), ValidationError> {
        let fields = [
            ("first_name", &self.first_name),
            ("last_name", &self.last_name),
            ("email", &self.email),
            ("address", &self.address),
            ("city", &self.city),
            ("postal_code", &self.postal_code),
            ("country", &self.country),
        ];
        for (name, value) in fields {
            if value.trim().is_empty() {
                return Err(ValidationError::Required(name));
            }
        }
        if !self.email.contains('@') {
            return Err(ValidationError::InvalidEmail("email"));
        }
        Ok(())
    }
}

#[derive(Debug, Deserialize, ToSchema)]
pub struct CheckoutRequest {
    #[serde(flatten)]
    pub shipping: ShippingDetails,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderWithItems {
    pub order: Order,
    pub items: Vec<OrderItem>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderHistoryItem {
    pub product_id: i64,
    pub name: String,
    /// Price captured when the order was placed.
    pub price: Decimal,
    pub quantity: i32,
    pub image: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ShippingAddress {
    pub name: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct OrderHistoryEntry {
    pub id: i64,
    pub date: DateTime<Utc>,
    pub total: Decimal,
    pub items: Vec<OrderHistoryItem>,
    pub shipping_address: ShippingAddress,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct OrderHistory {
    #[schema(value_type = Vec<OrderHistoryEntry>)]
    pub items: Vec<OrderHistoryEntry>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct LastOrderView {
    pub order: LastOrder,
    pub estimated_delivery: NaiveDate,
    pub stage: TrackingStage,
    pub tracking: Vec<TrackingStep>,
}
