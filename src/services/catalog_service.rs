use std::collections::HashMap;

use sea_orm::{ColumnTrait, DbErr, EntityTrait, QueryFilter, QueryOrder, QuerySelect};

use crate::{
    catalog::{
        ProductFilter, aggregate_products, category_tree_ids, collect_product_ids,
        parent_categories, resolve_category_products,
    },
    db::OrmConn,
    dto::catalog::{
        AttributeValue, CategoryList, CategoryPage, ListedProductList, ProductDetail,
        RelatedProductList,
    },
    entity::{
        Attributes, Categories, ProductAttributes, ProductCategories, Products, Sellers,
        categories::Column as CategoryCol, product_attributes::Column as ProductAttributeCol,
        product_categories::Column as ProductCategoryCol, products::Column as ProductCol,
    },
    error::{AppError, AppResult},
    models::{Category, Product, ProductCategory, Seller},
    response::{ApiResponse, Meta},
    routes::params::RelatedQuery,
    state::AppState,
};

pub async fn list_categories(
    state: &AppState,
    top_level_only: bool,
) -> AppResult<ApiResponse<CategoryList>> {
    let mut finder = Categories::find();
    if top_level_only {
        finder = finder.filter(CategoryCol::ParentId.is_null());
    }
    let items: Vec<Category> = finder
        .order_by_asc(CategoryCol::Id)
        .all(state.db())
        .await?
        .into_iter()
        .map(Category::from)
        .collect();

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Categories",
        CategoryList { items },
        Some(meta),
    ))
}

/// Products tagged with the named category or one of its children.
pub async fn category_products(
    state: &AppState,
    name: &str,
    filter: ProductFilter,
) -> AppResult<ApiResponse<CategoryPage>> {
    let category = Categories::find()
        .filter(CategoryCol::Name.eq(name))
        .one(state.db())
        .await?
        .map(Category::from);
    let category = match category {
        Some(c) => c,
        None => return Err(AppError::NotFound),
    };

    let children: Vec<Category> = Categories::find()
        .filter(CategoryCol::ParentId.eq(category.id))
        .order_by_asc(CategoryCol::Id)
        .all(state.db())
        .await?
        .into_iter()
        .map(Category::from)
        .collect();

    let mut category_ids = vec![category.id];
    category_ids.extend(children.iter().map(|c| c.id));

    let links = links_for_categories(state.db(), &category_ids, None).await?;
    let product_ids = collect_product_ids(&links, &category_ids);
    let products = products_by_ids(state.db(), product_ids, None).await?;

    let products: Vec<_> = resolve_category_products(&category, &children, &links, products)
        .into_iter()
        .filter(|p| filter.matches_name(&p.product.name))
        .collect();

    tracing::debug!(
        category = %category.name,
        children = children.len(),
        products = products.len(),
        "resolved category products"
    );

    let meta = Meta::total(products.len());
    Ok(ApiResponse::success(
        "Category products",
        CategoryPage {
            category,
            children,
            products,
        },
        Some(meta),
    ))
}

pub async fn list_products(
    state: &AppState,
    filter: ProductFilter,
) -> AppResult<ApiResponse<ListedProductList>> {
    let categories = all_categories(state.db()).await?;
    let links: Vec<ProductCategory> = ProductCategories::find()
        .order_by_asc(ProductCategoryCol::Id)
        .all(state.db())
        .await?
        .into_iter()
        .map(ProductCategory::from)
        .collect();
    let products: Vec<Product> = Products::find()
        .order_by_asc(ProductCol::Id)
        .all(state.db())
        .await?
        .into_iter()
        .map(Product::from)
        .collect();

    let items = filter.apply(aggregate_products(products, &categories, &links));
    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Products",
        ListedProductList { items },
        Some(meta),
    ))
}

pub async fn get_product(state: &AppState, id: i64) -> AppResult<ApiResponse<ProductDetail>> {
    let found = Products::find_by_id(id)
        .find_also_related(Sellers)
        .one(state.db())
        .await?;
    let (product, seller) = match found {
        Some(row) => row,
        None => return Err(AppError::NotFound),
    };

    let attributes = ProductAttributes::find()
        .filter(ProductAttributeCol::ProductId.eq(id))
        .order_by_asc(ProductAttributeCol::Id)
        .find_also_related(Attributes)
        .all(state.db())
        .await?
        .into_iter()
        .filter_map(|(link, attribute)| {
            attribute.map(|a| AttributeValue {
                name: a.name,
                value: link.value,
            })
        })
        .collect();

    let parents = product_parent_categories(state.db(), id).await?;
    let primary_category_id = parents.first().map(|c| c.id);

    Ok(ApiResponse::success(
        "Product",
        ProductDetail {
            product: Product::from(product),
            seller: seller.map(Seller::from),
            attributes,
            parent_categories: parents,
            primary_category_id,
        },
        None,
    ))
}

/// Other products from the same top-level category tree.
pub async fn related_products(
    state: &AppState,
    id: i64,
    query: RelatedQuery,
) -> AppResult<ApiResponse<RelatedProductList>> {
    let exists = Products::find_by_id(id).one(state.db()).await?;
    if exists.is_none() {
        return Err(AppError::NotFound);
    }

    let categories = all_categories(state.db()).await?;
    let lookup = category_lookup(&categories);
    let linked = linked_category_ids(state.db(), id).await?;
    let items = match parent_categories(&linked, &lookup).first() {
        Some(primary) => {
            let tree = category_tree_ids(primary.id, &categories);
            let links = links_for_categories(state.db(), &tree, Some(id)).await?;
            let product_ids = collect_product_ids(&links, &tree);
            products_by_ids(state.db(), product_ids, Some(query.normalize())).await?
        }
        None => Vec::new(),
    };

    let meta = Meta::total(items.len());
    Ok(ApiResponse::success(
        "Related products",
        RelatedProductList { items },
        Some(meta),
    ))
}

async fn all_categories(db: &OrmConn) -> Result<Vec<Category>, DbErr> {
    Ok(Categories::find()
        .order_by_asc(CategoryCol::Id)
        .all(db)
        .await?
        .into_iter()
        .map(Category::from)
        .collect())
}

fn category_lookup(categories: &[Category]) -> HashMap<i64, Category> {
    categories.iter().map(|c| (c.id, c.clone())).collect()
}

async fn linked_category_ids(db: &OrmConn, product_id: i64) -> Result<Vec<i64>, DbErr> {
    Ok(ProductCategories::find()
        .filter(ProductCategoryCol::ProductId.eq(product_id))
        .order_by_asc(ProductCategoryCol::Id)
        .all(db)
        .await?
        .into_iter()
        .map(|link| link.category_id)
        .collect())
}

async fn product_parent_categories(db: &OrmConn, product_id: i64) -> Result<Vec<Category>, DbErr> {
    let linked = linked_category_ids(db, product_id).await?;
    if linked.is_empty() {
        return Ok(Vec::new());
    }
    let categories = all_categories(db).await?;
    Ok(parent_categories(&linked, &category_lookup(&categories)))
}

async fn links_for_categories(
    db: &OrmConn,
    category_ids: &[i64],
    exclude_product: Option<i64>,
) -> Result<Vec<ProductCategory>, DbErr> {
    let mut finder = ProductCategories::find()
        .filter(ProductCategoryCol::CategoryId.is_in(category_ids.iter().copied()));
    if let Some(product_id) = exclude_product {
        finder = finder.filter(ProductCategoryCol::ProductId.ne(product_id));
    }
    Ok(finder
        .order_by_asc(ProductCategoryCol::Id)
        .all(db)
        .await?
        .into_iter()
        .map(ProductCategory::from)
        .collect())
}

async fn products_by_ids(
    db: &OrmConn,
    ids: Vec<i64>,
    limit: Option<u64>,
) -> Result<Vec<Product>, DbErr> {
    if ids.is_empty() {
        return Ok(Vec::new());
    }
    let mut finder = Products::find()
        .filter(ProductCol::Id.is_in(ids))
        .order_by_asc(ProductCol::Id);
    if let Some(limit) = limit {
        finder = finder.limit(limit);
    }
    Ok(finder
        .all(db)
        .await?
        .into_iter()
        .map(Product::from)
        .collect())
}
