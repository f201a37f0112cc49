use sea_orm::ActiveValue::{NotSet, Set};
use sea_orm::{
    ActiveModelTrait, ColumnTrait, DbErr, EntityTrait, PaginatorTrait, PrimaryKeyTrait,
    QueryFilter, QueryOrder,
};

use crate::{
    crud::{
        AttributeDraft, CategoryDraft, EditableTable, ProductAttributeDraft, ProductCategoryDraft,
        ProductDraft, Record, SaveMode, SellerDraft, TableName,
    },
    db::OrmConn,
    dto::admin::{
        Dashboard, DashboardStats, OrderItemRow, OrderRow, TableBlank, TableLoadError, TableRows,
    },
    entity::{
        Attributes, Categories, OrderItems, Orders, ProductAttributes, ProductCategories,
        Products, Sellers, attributes, categories, order_items, orders, product_attributes,
        product_categories, products, sellers,
    },
    error::{AppError, AppResult, ValidationError},
    middleware::auth::{AuthUser, ensure_admin},
    models::{
        Attribute, Category, Order, OrderItem, Product, ProductAttribute, ProductCategory, Seller,
    },
    response::{ApiResponse, Meta},
    state::AppState,
};

/// Load one admin table. Catalog tables come back in id order, the order
/// tables newest first with the seller or product name joined in.
pub async fn fetch_table(db: &OrmConn, table: TableName) -> Result<TableRows, DbErr> {
    let rows = match table {
        TableName::Products => TableRows::Products(
            Products::find()
                .order_by_asc(products::Column::Id)
                .all(db)
                .await?
                .into_iter()
                .map(Product::from)
                .collect(),
        ),
        TableName::Categories => TableRows::Categories(
            Categories::find()
                .order_by_asc(categories::Column::Id)
                .all(db)
                .await?
                .into_iter()
                .map(Category::from)
                .collect(),
        ),
        TableName::Sellers => TableRows::Sellers(
            Sellers::find()
                .order_by_asc(sellers::Column::Id)
                .all(db)
                .await?
                .into_iter()
                .map(Seller::from)
                .collect(),
        ),
        TableName::Attributes => TableRows::Attributes(
            Attributes::find()
                .order_by_asc(attributes::Column::Id)
                .all(db)
                .await?
                .into_iter()
                .map(Attribute::from)
                .collect(),
        ),
        TableName::ProductCategories => TableRows::ProductCategories(
            ProductCategories::find()
                .order_by_asc(product_categories::Column::Id)
                .all(db)
                .await?
                .into_iter()
                .map(ProductCategory::from)
                .collect(),
        ),
        TableName::ProductAttributes => TableRows::ProductAttributes(
            ProductAttributes::find()
                .order_by_asc(product_attributes::Column::Id)
                .all(db)
                .await?
                .into_iter()
                .map(ProductAttribute::from)
                .collect(),
        ),
        TableName::Orders => TableRows::Orders(
            Orders::find()
                .order_by_desc(orders::Column::Id)
                .find_also_related(Sellers)
                .all(db)
                .await?
                .into_iter()
                .map(|(order, seller)| OrderRow {
                    order: Order::from(order),
                    seller_name: seller.map(|s| s.full_name),
                })
                .collect(),
        ),
        TableName::OrderItems => TableRows::OrderItems(
            OrderItems::find()
                .order_by_desc(order_items::Column::Id)
                .find_also_related(Products)
                .all(db)
                .await?
                .into_iter()
                .map(|(item, product)| OrderItemRow {
                    item: OrderItem::from(item),
                    product_name: product.map(|p| p.name),
                })
                .collect(),
        ),
    };
    Ok(rows)
}

/// All eight tables fetched concurrently. A table that fails to load is
/// reported and left empty; the rest still come back.
pub async fn dashboard(state: &AppState, user: &AuthUser) -> AppResult<ApiResponse<Dashboard>> {
    ensure_admin(user)?;
    let db = state.db();

    let (
        products,
        categories,
        sellers,
        attributes,
        product_categories,
        product_attributes,
        orders,
        order_items,
    ) = tokio::join!(
        fetch_table(db, TableName::Products),
        fetch_table(db, TableName::Categories),
        fetch_table(db, TableName::Sellers),
        fetch_table(db, TableName::Attributes),
        fetch_table(db, TableName::ProductCategories),
        fetch_table(db, TableName::ProductAttributes),
        fetch_table(db, TableName::Orders),
        fetch_table(db, TableName::OrderItems),
    );
    let results = [
        products,
        categories,
        sellers,
        attributes,
        product_categories,
        product_attributes,
        orders,
        order_items,
    ];

    let mut tables = Vec::with_capacity(TableName::ALL.len());
    let mut errors = Vec::new();
    for (table, result) in TableName::ALL.into_iter().zip(results) {
        match result {
            Ok(rows) => tables.push(rows),
            Err(err) => {
                tracing::warn!(table = %table, error = %err, "admin table failed to load");
                errors.push(TableLoadError {
                    table,
                    error: err.to_string(),
                });
                tables.push(TableRows::empty(table));
            }
        }
    }

    let stats = DashboardStats::from_tables(&tables);
    Ok(ApiResponse::success(
        "Dashboard",
        Dashboard {
            tables,
            errors,
            stats,
        },
        None,
    ))
}

pub async fn list_table(
    state: &AppState,
    user: &AuthUser,
    table: TableName,
) -> AppResult<ApiResponse<TableRows>> {
    ensure_admin(user)?;
    let rows = fetch_table(state.db(), table).await?;
    let meta = Meta::total(rows.len());
    Ok(ApiResponse::success(table.as_str(), rows, Some(meta)))
}

pub async fn blank_record(
    user: &AuthUser,
    table: TableName,
) -> AppResult<ApiResponse<TableBlank>> {
    ensure_admin(user)?;
    let editable = editable(table)?;
    let config = editable.config();
    Ok(ApiResponse::success(
        "Blank record",
        TableBlank {
            table: editable,
            record: config.blank(),
            fields: config.fields.to_vec(),
        },
        None,
    ))
}

/// Insert or update one row, then return the refreshed table.
pub async fn save_record(
    state: &AppState,
    user: &AuthUser,
    table: TableName,
    mode: SaveMode,
    payload: serde_json::Value,
) -> AppResult<ApiResponse<TableRows>> {
    ensure_admin(user)?;
    let editable = editable(table)?;
    let record = Record::from_json(editable, payload)
        .map_err(|err| AppError::BadRequest(format!("Invalid {table} payload: {err}")))?;
    record.validate_for(mode)?;
    if let Record::Category(draft) = &record {
        check_category_parent(state.db(), draft, mode).await?;
    }

    let message = match mode {
        SaveMode::Add => {
            let id = insert_record(state.db(), record).await?;
            tracing::info!(table = %table, id, "admin record added");
            "Item added successfully"
        }
        SaveMode::Edit { id } => {
            update_record(state.db(), id, record).await?;
            tracing::info!(table = %table, id, "admin record updated");
            "Item updated successfully"
        }
    };

    let rows = fetch_table(state.db(), table).await?;
    let meta = Meta::total(rows.len());
    Ok(ApiResponse::success(message, rows, Some(meta)))
}

/// Delete one row by id. Nothing is sent to the database unless `confirmed`.
pub async fn delete_record(
    state: &AppState,
    user: &AuthUser,
    table: TableName,
    id: i64,
    confirmed: bool,
) -> AppResult<ApiResponse<TableRows>> {
    ensure_admin(user)?;
    if !confirmed {
        return Err(AppError::BadRequest(
            "Delete must be confirmed with confirm=true".into(),
        ));
    }

    let db = state.db();
    let deleted = match table {
        TableName::Products => delete_row::<Products>(db, id).await?,
        TableName::Categories => delete_row::<Categories>(db, id).await?,
        TableName::Sellers => delete_row::<Sellers>(db, id).await?,
        TableName::Attributes => delete_row::<Attributes>(db, id).await?,
        TableName::ProductCategories => delete_row::<ProductCategories>(db, id).await?,
        TableName::ProductAttributes => delete_row::<ProductAttributes>(db, id).await?,
        TableName::Orders => delete_row::<Orders>(db, id).await?,
        TableName::OrderItems => delete_row::<OrderItems>(db, id).await?,
    };
    if deleted == 0 {
        return Err(AppError::NotFound);
    }
    tracing::info!(table = %table, id, "admin record deleted");

    let rows = fetch_table(db, table).await?;
    let meta = Meta::total(rows.len());
    Ok(ApiResponse::success("Item deleted successfully", rows, Some(meta)))
}

fn editable(table: TableName) -> AppResult<EditableTable> {
    table
        .editable()
        .ok_or_else(|| AppError::BadRequest(format!("{table} is read-only")))
}

async fn check_category_parent(
    db: &OrmConn,
    draft: &CategoryDraft,
    mode: SaveMode,
) -> AppResult<()> {
    let Some(parent_id) = draft.parent_id else {
        return Ok(());
    };
    let parent = Categories::find_by_id(parent_id)
        .one(db)
        .await?
        .map(Category::from)
        .ok_or(ValidationError::UnknownReference("parent_id"))?;
    if !parent.is_top_level() {
        return Err(ValidationError::NestedParent.into());
    }
    if let SaveMode::Edit { id } = mode {
        let children = Categories::find()
            .filter(categories::Column::ParentId.eq(id))
            .count(db)
            .await?;
        if children > 0 {
            return Err(ValidationError::NestedParent.into());
        }
    }
    Ok(())
}

async fn insert_record(db: &OrmConn, record: Record) -> Result<i64, DbErr> {
    let id = match record {
        Record::Product(draft) => product_active(draft).insert(db).await?.id,
        Record::Category(draft) => category_active(draft).insert(db).await?.id,
        Record::Seller(draft) => seller_active(draft).insert(db).await?.id,
        Record::Attribute(draft) => attribute_active(draft).insert(db).await?.id,
        Record::ProductCategory(draft) => product_category_active(draft).insert(db).await?.id,
        Record::ProductAttribute(draft) => product_attribute_active(draft).insert(db).await?.id,
    };
    Ok(id)
}

async fn update_record(db: &OrmConn, id: i64, record: Record) -> AppResult<()> {
    let result = match record {
        Record::Product(draft) => {
            Products::update_many()
                .set(product_active(draft))
                .filter(products::Column::Id.eq(id))
                .exec(db)
                .await?
        }
        Record::Category(draft) => {
            Categories::update_many()
                .set(category_active(draft))
                .filter(categories::Column::Id.eq(id))
                .exec(db)
                .await?
        }
        Record::Seller(draft) => {
            Sellers::update_many()
                .set(seller_active(draft))
                .filter(sellers::Column::Id.eq(id))
                .exec(db)
                .await?
        }
        Record::Attribute(draft) => {
            Attributes::update_many()
                .set(attribute_active(draft))
                .filter(attributes::Column::Id.eq(id))
                .exec(db)
                .await?
        }
        Record::ProductCategory(draft) => {
            ProductCategories::update_many()
                .set(product_category_active(draft))
                .filter(product_categories::Column::Id.eq(id))
                .exec(db)
                .await?
        }
        Record::ProductAttribute(draft) => {
            ProductAttributes::update_many()
                .set(product_attribute_active(draft))
                .filter(product_attributes::Column::Id.eq(id))
                .exec(db)
                .await?
        }
    };
    if result.rows_affected == 0 {
        return Err(AppError::NotFound);
    }
    Ok(())
}

async fn delete_row<E>(db: &OrmConn, id: i64) -> Result<u64, DbErr>
where
    E: EntityTrait,
    i64: Into<<E::PrimaryKey as PrimaryKeyTrait>::ValueType>,
{
    Ok(E::delete_by_id(id).exec(db).await?.rows_affected)
}

fn product_active(draft: ProductDraft) -> products::ActiveModel {
    products::ActiveModel {
        id: NotSet,
        name: Set(draft.name.trim().to_string()),
        price: Set(draft.price),
        quantity: Set(draft.quantity),
        status: Set(draft.status),
        seller_id: Set(draft.seller_id),
        description: Set(draft.description),
        mini_description: Set(draft.mini_description),
    }
}

fn category_active(draft: CategoryDraft) -> categories::ActiveModel {
    categories::ActiveModel {
        id: NotSet,
        name: Set(draft.name.trim().to_string()),
        parent_id: Set(draft.parent_id),
    }
}

fn seller_active(draft: SellerDraft) -> sellers::ActiveModel {
    sellers::ActiveModel {
        id: NotSet,
        full_name: Set(draft.full_name.trim().to_string()),
        address: Set(draft.address),
        phone: Set(draft.phone),
    }
}

fn attribute_active(draft: AttributeDraft) -> attributes::ActiveModel {
    attributes::ActiveModel {
        id: NotSet,
        name: Set(draft.name.trim().to_string()),
    }
}

fn product_category_active(
    draft: ProductCategoryDraft,
) -> product_categories::ActiveModel {
    product_categories::ActiveModel {
        id: NotSet,
        product_id: Set(draft.product_id),
        category_id: Set(draft.category_id),
    }
}

fn product_attribute_active(
    draft: ProductAttributeDraft,
) -> product_attributes::ActiveModel {
    product_attributes::ActiveModel {
        id: NotSet,
        product_id: Set(draft.product_id),
        attribute_id: Set(draft.attribute_id),
        value: Set(draft.value),
    }
}
