use chrono::{DateTime, Utc};
use rust_decimal::Decimal;
use sea_orm::{DeriveActiveEnum, EnumIter};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;

use crate::entity;

/// Availability of a product row.
#[derive(
    Debug,
    Clone,
    Copy,
    Default,
    PartialEq,
    Eq,
    Hash,
    EnumIter,
    DeriveActiveEnum,
    Serialize,
    Deserialize,
    ToSchema,
)]
#[sea_orm(rs_type = "String", db_type = "Text")]
#[serde(rename_all = "lowercase")]
pub enum ProductStatus {
    #[default]
    #[sea_orm(string_value = "free")]
    Free,
    #[sea_orm(string_value = "reserved")]
    Reserved,
    #[sea_orm(string_value = "sold")]
    Sold,
}

/// A product can be bought only while it has stock and is not reserved or sold.
pub fn in_stock(quantity: i32, status: ProductStatus) -> bool {
    quantity > 0 && status == ProductStatus::Free
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Product {
    pub id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub status: ProductStatus,
    pub seller_id: Option<i64>,
    pub description: String,
    pub mini_description: String,
    pub in_stock: bool,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Category {
    pub id: i64,
    pub name: String,
    pub parent_id: Option<i64>,
}

impl Category {
    pub fn is_top_level(&self) -> bool {
        self.parent_id.is_none()
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Seller {
    pub id: i64,
    pub full_name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Attribute {
    pub id: i64,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductCategory {
    pub id: i64,
    pub product_id: i64,
    pub category_id: i64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct ProductAttribute {
    pub id: i64,
    pub product_id: i64,
    pub attribute_id: i64,
    pub value: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct Order {
    pub id: i64,
    pub customer_id: Uuid,
    pub seller_id: Option<i64>,
    pub date_created: DateTime<Utc>,
    pub total_amount: Decimal,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub address: String,
    pub city: String,
    pub postal_code: String,
    pub country: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct OrderItem {
    pub id: i64,
    pub order_id: i64,
    pub product_id: i64,
    pub quantity: i32,
    pub price_at_moment: Decimal,
}

impl From<entity::products::Model> for Product {
    fn from(model: entity::products::Model) -> Self {
        Self {
            in_stock: in_stock(model.quantity, model.status),
            id: model.id,
            name: model.name,
            price: model.price,
            quantity: model.quantity,
            status: model.status,
            seller_id: model.seller_id,
            description: model.description,
            mini_description: model.mini_description,
        }
    }
}

impl From<entity::categories::Model> for Category {
    fn from(model: entity::categories::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
            parent_id: model.parent_id,
        }
    }
}

impl From<entity::sellers::Model> for Seller {
    fn from(model: entity::sellers::Model) -> Self {
        Self {
            id: model.id,
            full_name: model.full_name,
            address: model.address,
            phone: model.phone,
        }
    }
}

impl From<entity::attributes::Model> for Attribute {
    fn from(model: entity::attributes::Model) -> Self {
        Self {
            id: model.id,
            name: model.name,
        }
    }
}

impl From<entity::product_categories::Model> for ProductCategory {
    fn from(model: entity::product_categories::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            category_id: model.category_id,
        }
    }
}

impl From<entity::product_attributes::Model> for ProductAttribute {
    fn from(model: entity::product_attributes::Model) -> Self {
        Self {
            id: model.id,
            product_id: model.product_id,
            attribute_id: model.attribute_id,
            value: model.value,
        }
    }
}

impl From<entity::orders::Model> for Order {
    fn from(model: entity::orders::Model) -> Self {
        Self {
            id: model.id,
            customer_id: model.customer_id,
            seller_id: model.seller_id,
            date_created: model.date_created.with_timezone(&Utc),
            total_amount: model.total_amount,
            first_name: model.first_name,
            last_name: model.last_name,
            email: model.email,
            address: model.address,
            city: model.city,
            postal_code: model.postal_code,
            country: model.country,
        }
    }
}

impl From<entity::order_items::Model> for OrderItem {
    fn from(model: entity::order_items::Model) -> Self {
        Self {
            id: model.id,
            order_id: model.order_id,
            product_id: model.product_id,
            quantity: model.quantity,
            price_at_moment: model.price_at_moment,
        }
    }
}
