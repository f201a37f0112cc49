use utoipa::{
    Modify, OpenApi,
    openapi::{
        self,
        OpenApi as OpenApiSpec,
        security::{HttpAuthScheme, HttpBuilder, SecurityScheme},
    },
};
use utoipa_scalar::{Scalar, Servable};

use crate::{
    cart::CartLine,
    catalog::ProductFilter,
    crud::{
        AttributeDraft, CategoryDraft, EditableTable, FieldKind, FieldSpec, ProductAttributeDraft,
        ProductCategoryDraft, ProductDraft, Record, SellerDraft, TableName,
    },
    dto::{
        admin::{
            Dashboard, DashboardStats, DeleteQuery, OrderItemRow, OrderRow, TableBlank,
            TableLoadError, TableRows,
        },
        cart::{AddToCartRequest, CartView, UpdateCartItemRequest},
        catalog::{
            AttributeValue, CategoryList, CategoryPage, CategoryProduct, ListedProduct,
            ListedProductList, ProductDetail, RelatedProductList,
        },
        orders::{
            CheckoutRequest, LastOrderView, OrderHistory, OrderHistoryEntry, OrderHistoryItem,
            OrderWithItems, ShippingAddress, ShippingDetails,
        },
    },
    models::{
        Attribute, Category, Order, OrderItem, Product, ProductAttribute, ProductCategory,
        ProductStatus, Seller,
    },
    response::{ApiResponse, Meta},
    routes::{admin, cart, categories, health, orders, params, products, session},
    session::{LastOrder, LastOrderItem},
    tracking::{TrackingStage, TrackingStep},
};

struct SecurityAddon;

impl Modify for SecurityAddon {
    fn modify(&self, openapi: &mut openapi::OpenApi) {
        let components = openapi.components.get_or_insert_with(Default::default);
        components.add_security_scheme(
            "bearer_auth",
            SecurityScheme::Http(
                HttpBuilder::new()
                    .scheme(HttpAuthScheme::Bearer)
                    .bearer_format("JWT")
                    .build(),
            ),
        );
    }
}

#[derive(OpenApi)]
#[openapi(
    paths(
        health::health_check,
        categories::list_categories,
        categories::category_products,
        products::list_products,
        products::get_product,
        products::related_products,
        cart::view_cart,
        cart::add_to_cart,
        cart::update_cart_item,
        cart::remove_from_cart,
        cart::clear_cart,
        session::logout,
        orders::checkout,
        orders::list_orders,
        orders::last_order,
        orders::clear_last_order,
        admin::dashboard,
        admin::list_table,
        admin::blank_record,
        admin::create_record,
        admin::update_record,
        admin::delete_record
    ),
    components(
        schemas(
            Product,
            ProductStatus,
            Category,
            Seller,
            Attribute,
            ProductCategory,
            ProductAttribute,
            Order,
            OrderItem,
            ProductFilter,
            ListedProduct,
            ListedProductList,
            CategoryProduct,
            CategoryPage,
            CategoryList,
            AttributeValue,
            ProductDetail,
            RelatedProductList,
            CartLine,
            CartView,
            AddToCartRequest,
            UpdateCartItemRequest,
            ShippingDetails,
            CheckoutRequest,
            OrderWithItems,
            OrderHistory,
            OrderHistoryEntry,
            OrderHistoryItem,
            ShippingAddress,
            LastOrder,
            LastOrderItem,
            LastOrderView,
            TrackingStage,
            TrackingStep,
            TableName,
            EditableTable,
            FieldKind,
            FieldSpec,
            Record,
            ProductDraft,
            CategoryDraft,
            SellerDraft,
            AttributeDraft,
            ProductCategoryDraft,
            ProductAttributeDraft,
            TableRows,
            OrderRow,
            OrderItemRow,
            TableBlank,
            TableLoadError,
            DashboardStats,
            Dashboard,
            DeleteQuery,
            params::Pagination,
            params::CategoryListQuery,
            params::CategoryProductsQuery,
            params::RelatedQuery,
            Meta,
            ApiResponse<ProductDetail>,
            ApiResponse<ListedProductList>,
            ApiResponse<CartView>,
            ApiResponse<OrderWithItems>,
            ApiResponse<OrderHistory>,
            ApiResponse<TableRows>,
            ApiResponse<Dashboard>
        )
    ),
    security(
        ("bearer_auth" = [])
    ),
    modifiers(&SecurityAddon),
    tags(
        (name = "Health", description = "Health check endpoint"),
        (name = "Catalog", description = "Category and product browsing"),
        (name = "Cart", description = "Session cart endpoints"),
        (name = "Session", description = "Session lifecycle"),
        (name = "Orders", description = "Checkout, history and order tracking"),
        (name = "Admin", description = "Table management for administrators"),
    )
)]
pub struct ApiDoc;

pub fn scalar_docs() -> Scalar<OpenApiSpec> {
    Scalar::with_url("/docs", ApiDoc::openapi())
}
