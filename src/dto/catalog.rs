use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::models::{Category, Product, Seller};

/// A product with every category label it is shown under.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct ListedProduct {
    #[serde(flatten)]
    pub product: Product,
    /// Top-level labels first, then child labels not already present.
    pub categories: Vec<String>,
}

/// A product as listed on a category page.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
pub struct CategoryProduct {
    #[serde(flatten)]
    pub product: Product,
    pub category: String,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct ListedProductList {
    #[schema(value_type = Vec<ListedProduct>)]
    pub items: Vec<ListedProduct>,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct CategoryPage {
    pub category: Category,
    pub children: Vec<Category>,
    pub products: Vec<CategoryProduct>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct CategoryList {
    #[schema(value_type = Vec<Category>)]
    pub items: Vec<Category>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct AttributeValue {
    pub name: String,
    pub value: String,
}

#[derive(Debug, Serialize, ToSchema)]
pub struct ProductDetail {
    pub product: Product,
    pub seller: Option<Seller>,
    pub attributes: Vec<AttributeValue>,
    pub parent_categories: Vec<Category>,
    pub primary_category_id: Option<i64>,
}

#[derive(Debug, Serialize, ToSchema)]
#[serde(transparent)]
pub struct RelatedProductList {
    #[schema(value_type = Vec<Product>)]
    pub items: Vec<Product>,
}
