//! Table descriptors for the admin panel.
//!
//! Every table the admin panel can edit has a [`TableConfig`]: a blank record
//! for the "add" form and a field list. Payloads are narrowed into a typed
//! [`Record`] by table before anything looks at their fields.

use std::fmt;

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

use crate::{error::ValidationError, models::ProductStatus};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum TableName {
    Products,
    Categories,
    Sellers,
    Attributes,
    ProductCategories,
    ProductAttributes,
    Orders,
    OrderItems,
}

impl TableName {
    pub const ALL: [TableName; 8] = [
        TableName::Products,
        TableName::Categories,
        TableName::Sellers,
        TableName::Attributes,
        TableName::ProductCategories,
        TableName::ProductAttributes,
        TableName::Orders,
        TableName::OrderItems,
    ];

    pub fn as_str(self) -> &'static str {
        match self {
            TableName::Products => "products",
            TableName::Categories => "categories",
            TableName::Sellers => "sellers",
            TableName::Attributes => "attributes",
            TableName::ProductCategories => "product_categories",
            TableName::ProductAttributes => "product_attributes",
            TableName::Orders => "orders",
            TableName::OrderItems => "order_items",
        }
    }

    /// `None` for the read-only order tables.
    pub fn editable(self) -> Option<EditableTable> {
        match self {
            TableName::Products => Some(EditableTable::Products),
            TableName::Categories => Some(EditableTable::Categories),
            TableName::Sellers => Some(EditableTable::Sellers),
            TableName::Attributes => Some(EditableTable::Attributes),
            TableName::ProductCategories => Some(EditableTable::ProductCategories),
            TableName::ProductAttributes => Some(EditableTable::ProductAttributes),
            TableName::Orders | TableName::OrderItems => None,
        }
    }
}

impl fmt::Display for TableName {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum EditableTable {
    Products,
    Categories,
    Sellers,
    Attributes,
    ProductCategories,
    ProductAttributes,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum FieldKind {
    Text,
    LongText,
    Money,
    Count,
    Status,
    Reference(TableName),
    OptionalReference(TableName),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, ToSchema)]
pub struct FieldSpec {
    #[schema(value_type = String)]
    pub name: &'static str,
    #[schema(value_type = String)]
    pub label: &'static str,
    pub kind: FieldKind,
    pub required: bool,
}

const fn field(name: &'static str, label: &'static str, kind: FieldKind, required: bool) -> FieldSpec {
    FieldSpec {
        name,
        label,
        kind,
        required,
    }
}

const PRODUCT_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, true),
    field("price", "Price", FieldKind::Money, true),
    field("quantity", "Quantity", FieldKind::Count, true),
    field("status", "Status", FieldKind::Status, true),
    field("seller_id", "Seller", FieldKind::OptionalReference(TableName::Sellers), false),
    field("description", "Description", FieldKind::LongText, false),
    field("mini_description", "Short description", FieldKind::LongText, false),
];

const CATEGORY_FIELDS: &[FieldSpec] = &[
    field("name", "Name", FieldKind::Text, true),
    field("parent_id", "Parent category", FieldKind::OptionalReference(TableName::Categories), false),
];

const SELLER_FIELDS: &[FieldSpec] = &[
    field("full_name", "Full name", FieldKind::Text, true),
    field("address", "Address", FieldKind::Text, true),
    field("phone", "Phone", FieldKind::Text, true),
];

const ATTRIBUTE_FIELDS: &[FieldSpec] = &[field("name", "Name", FieldKind::Text, true)];

const PRODUCT_CATEGORY_FIELDS: &[FieldSpec] = &[
    field("product_id", "Product", FieldKind::Reference(TableName::Products), true),
    field("category_id", "Category", FieldKind::Reference(TableName::Categories), true),
];

const PRODUCT_ATTRIBUTE_FIELDS: &[FieldSpec] = &[
    field("product_id", "Product", FieldKind::Reference(TableName::Products), true),
    field("attribute_id", "Attribute", FieldKind::Reference(TableName::Attributes), true),
    field("value", "Value", FieldKind::Text, true),
];

/// Per-table form configuration.
#[derive(Debug, Clone, Copy)]
pub struct TableConfig {
    pub table: EditableTable,
    pub fields: &'static [FieldSpec],
    blank: fn() -> Record,
}

impl TableConfig {
    pub fn blank(&self) -> Record {
        (self.blank)()
    }
}

impl EditableTable {
    pub const ALL: [EditableTable; 6] = [
        EditableTable::Products,
        EditableTable::Categories,
        EditableTable::Sellers,
        EditableTable::Attributes,
        EditableTable::ProductCategories,
        EditableTable::ProductAttributes,
    ];

    pub fn table(self) -> TableName {
        match self {
            EditableTable::Products => TableName::Products,
            EditableTable::Categories => TableName::Categories,
            EditableTable::Sellers => TableName::Sellers,
            EditableTable::Attributes => TableName::Attributes,
            EditableTable::ProductCategories => TableName::ProductCategories,
            EditableTable::ProductAttributes => TableName::ProductAttributes,
        }
    }

    pub fn config(self) -> TableConfig {
        match self {
            EditableTable::Products => TableConfig {
                table: self,
                fields: PRODUCT_FIELDS,
                blank: || Record::Product(ProductDraft::default()),
            },
            EditableTable::Categories => TableConfig {
                table: self,
                fields: CATEGORY_FIELDS,
                blank: || Record::Category(CategoryDraft::default()),
            },
            EditableTable::Sellers => TableConfig {
                table: self,
                fields: SELLER_FIELDS,
                blank: || Record::Seller(SellerDraft::default()),
            },
            EditableTable::Attributes => TableConfig {
                table: self,
                fields: ATTRIBUTE_FIELDS,
                blank: || Record::Attribute(AttributeDraft::default()),
            },
            EditableTable::ProductCategories => TableConfig {
                table: self,
                fields: PRODUCT_CATEGORY_FIELDS,
                blank: || Record::ProductCategory(ProductCategoryDraft::default()),
            },
            EditableTable::ProductAttributes => TableConfig {
                table: self,
                fields: PRODUCT_ATTRIBUTE_FIELDS,
                blank: || Record::ProductAttribute(ProductAttributeDraft::default()),
            },
        }
    }

    pub fn blank(self) -> Record {
        self.config().blank()
    }

    /// Narrow an untyped form payload into this table's record shape.
    /// Any `id` in the payload is dropped; identity comes from the backend
    /// on insert and from the path on update.
    pub fn record_from_json(self, value: serde_json::Value) -> Result<Record, serde_json::Error> {
        let record = match self {
            EditableTable::Products => Record::Product(serde_json::from_value(value)?),
            EditableTable::Categories => Record::Category(serde_json::from_value(value)?),
            EditableTable::Sellers => Record::Seller(serde_json::from_value(value)?),
            EditableTable::Attributes => Record::Attribute(serde_json::from_value(value)?),
            EditableTable::ProductCategories => Record::ProductCategory(serde_json::from_value(value)?),
            EditableTable::ProductAttributes => Record::ProductAttribute(serde_json::from_value(value)?),
        };
        Ok(record)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProductDraft {
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub status: ProductStatus,
    pub seller_id: Option<i64>,
    pub description: String,
    pub mini_description: String,
}

impl Default for ProductDraft {
    fn default() -> Self {
        Self {
            name: String::new(),
            price: Decimal::ZERO,
            quantity: 0,
            status: ProductStatus::Free,
            seller_id: None,
            description: String::new(),
            mini_description: String::new(),
        }
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct CategoryDraft {
    pub name: String,
    pub parent_id: Option<i64>,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct SellerDraft {
    pub full_name: String,
    pub address: String,
    pub phone: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct AttributeDraft {
    pub name: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProductCategoryDraft {
    pub product_id: i64,
    pub category_id: i64,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize, ToSchema)]
#[serde(default)]
pub struct ProductAttributeDraft {
    pub product_id: i64,
    pub attribute_id: i64,
    pub value: String,
}

/// Form contents for one of the editable tables.
#[derive(Debug, Clone, PartialEq, Serialize, ToSchema)]
#[serde(untagged)]
pub enum Record {
    Product(ProductDraft),
    Category(CategoryDraft),
    Seller(SellerDraft),
    Attribute(AttributeDraft),
    ProductCategory(ProductCategoryDraft),
    ProductAttribute(ProductAttributeDraft),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SaveMode {
    Add,
    Edit { id: i64 },
}

impl Record {
    pub fn from_json(table: EditableTable, value: serde_json::Value) -> Result<Self, serde_json::Error> {
        table.record_from_json(value)
    }

    pub fn table(&self) -> EditableTable {
        match self {
            Record::Product(_) => EditableTable::Products,
            Record::Category(_) => EditableTable::Categories,
            Record::Seller(_) => EditableTable::Sellers,
            Record::Attribute(_) => EditableTable::Attributes,
            Record::ProductCategory(_) => EditableTable::ProductCategories,
            Record::ProductAttribute(_) => EditableTable::ProductAttributes,
        }
    }

    /// Required-field and range checks for the record's table.
    pub fn validate(&self) -> Result<(), ValidationError> {
        match self {
            Record::Product(p) => {
                required("name", &p.name)?;
                if p.price < Decimal::ZERO {
                    return Err(ValidationError::Negative("price"));
                }
                if p.quantity < 0 {
                    return Err(ValidationError::Negative("quantity"));
                }
                if let Some(seller_id) = p.seller_id {
                    positive_id("seller_id", seller_id)?;
                }
                Ok(())
            }
            Record::Category(c) => {
                required("name", &c.name)?;
                if let Some(parent_id) = c.parent_id {
                    positive_id("parent_id", parent_id)?;
                }
                Ok(())
            }
            Record::Seller(s) => {
                required("full_name", &s.full_name)?;
                required("address", &s.address)?;
                required("phone", &s.phone)
            }
            Record::Attribute(a) => required("name", &a.name),
            Record::ProductCategory(pc) => {
                positive_id("product_id", pc.product_id)?;
                positive_id("category_id", pc.category_id)
            }
            Record::ProductAttribute(pa) => {
                positive_id("product_id", pa.product_id)?;
                positive_id("attribute_id", pa.attribute_id)?;
                required("value", &pa.value)
            }
        }
    }

    /// [`Record::validate`] plus checks that depend on the row's own id.
    pub fn validate_for(&self, mode: SaveMode) -> Result<(), ValidationError> {
        self.validate()?;
        if let (Record::Category(c), SaveMode::Edit { id }) = (self, mode) {
            if c.parent_id == Some(id) {
                return Err(ValidationError::SelfParent);
            }
        }
        Ok(())
    }
}

fn required(field: &'static str, value: &str) -> Result<(), ValidationError> {
    if value.trim().is_empty() {
        return Err(ValidationError::Required(field));
    }
    Ok(())
}

fn positive_id(field: &'static str, id: i64) -> Result<(), ValidationError> {
    if id <= 0 {
        return Err(ValidationError::NonPositiveId(field));
    }
    Ok(())
}
