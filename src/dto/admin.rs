use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{
    crud::{EditableTable, FieldSpec, Record, TableName},
    models::{
        Attribute, Category, Order, OrderItem, Product, ProductAttribute, ProductCategory, Seller,
    },
};

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderRow {
    #[serde(flatten)]
    pub order: Order,
    pub seller_name: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct OrderItemRow {
    #[serde(flatten)]
    pub item: OrderItem,
    pub product_name: Option<String>,
}

/// Full contents of one admin table.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(tag = "table", content = "rows", rename_all = "snake_case")]
pub enum TableRows {
    Products(Vec<Product>),
    Categories(Vec<Category>),
    Sellers(Vec<Seller>),
    Attributes(Vec<Attribute>),
    ProductCategories(Vec<ProductCategory>),
    ProductAttributes(Vec<ProductAttribute>),
    Orders(Vec<OrderRow>),
    OrderItems(Vec<OrderItemRow>),
}

impl TableRows {
    pub fn empty(table: TableName) -> Self {
        match table {
            TableName::Products => TableRows::Products(Vec::new()),
            TableName::Categories => TableRows::Categories(Vec::new()),
            TableName::Sellers => TableRows::Sellers(Vec::new()),
            TableName::Attributes => TableRows::Attributes(Vec::new()),
            TableName::ProductCategories => TableRows::ProductCategories(Vec::new()),
            TableName::ProductAttributes => TableRows::ProductAttributes(Vec::new()),
            TableName::Orders => TableRows::Orders(Vec::new()),
            TableName::OrderItems => TableRows::OrderItems(Vec::new()),
        }
    }

    pub fn table(&self) -> TableName {
        match self {
            TableRows::Products(_) => TableName::Products,
            TableRows::Categories(_) => TableName::Categories,
            TableRows::Sellers(_) => TableName::Sellers,
            TableRows::Attributes(_) => TableName::Attributes,
            TableRows::ProductCategories(_) => TableName::ProductCategories,
            TableRows::ProductAttributes(_) => TableName::ProductAttributes,
            TableRows::Orders(_) => TableName::Orders,
            TableRows::OrderItems(_) => TableName::OrderItems,
        }
    }

    /// Row ids in table order.
    pub fn ids(&self) -> Vec<i64> {
        match self {
            TableRows::Products(rows) => rows.iter().map(|r| r.id).collect(),
            TableRows::Categories(rows) => rows.iter().map(|r| r.id).collect(),
            TableRows::Sellers(rows) => rows.iter().map(|r| r.id).collect(),
            TableRows::Attributes(rows) => rows.iter().map(|r| r.id).collect(),
            TableRows::ProductCategories(rows) => rows.iter().map(|r| r.id).collect(),
            TableRows::ProductAttributes(rows) => rows.iter().map(|r| r.id).collect(),
            TableRows::Orders(rows) => rows.iter().map(|r| r.order.id).collect(),
            TableRows::OrderItems(rows) => rows.iter().map(|r| r.item.id).collect(),
        }
    }

    pub fn len(&self) -> usize {
        self.ids().len()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

#[derive(Debug, Serialize, ToSchema)]
pub struct TableBlank {
    pub table: EditableTable,
    pub record: Record,
    pub fields: Vec<FieldSpec>,
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct DashboardStats {
    pub total_revenue: Decimal,
    pub total_orders: usize,
    pub total_products: usize,
    pub total_tables: usize,
}

impl DashboardStats {
    /// Totals over whatever tables loaded; a failed table counts as empty.
    pub fn from_tables(tables: &[TableRows]) -> Self {
        let mut stats = Self {
            total_revenue: Decimal::ZERO,
            total_orders: 0,
            total_products: 0,
            total_tables: TableName::ALL.len(),
        };
        for rows in tables {
            match rows {
                TableRows::Orders(orders) => {
                    stats.total_orders = orders.len();
                    stats.total_revenue = orders.iter().map(|o| o.order.total_amount).sum();
                }
                TableRows::Products(products) => stats.total_products = products.len(),
                _ => {}
            }
        }
        stats
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct TableLoadError {
    pub table: TableName,
    pub error: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct Dashboard {
    pub tables: Vec<TableRows>,
    pub errors: Vec<TableLoadError>,
    pub stats: DashboardStats,
}

#[derive(Debug, Default, Deserialize, ToSchema)]
pub struct DeleteQuery {
    /// Must be `true`; the row is left alone otherwise.
    pub confirm: Option<bool>,
}
