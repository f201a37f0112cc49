use std::sync::Arc;

use rust_decimal::Decimal;
use sea_orm::{DatabaseBackend, DatabaseConnection, DbErr, MockDatabase, MockExecResult};
use serde_json::json;
use storefront_api::{
    crud::{SaveMode, TableName},
    dto::admin::{DashboardStats, OrderRow, TableRows},
    entity::{categories, products, sellers},
    error::{AppError, ValidationError},
    middleware::auth::AuthUser,
    models::{Order, ProductStatus},
    services::admin_service,
    session::SessionStore,
    state::AppState,
    tracking::TrackingSchedule,
};
use uuid::Uuid;

fn state(orm: DatabaseConnection) -> AppState {
    AppState {
        orm: Arc::new(orm),
        sessions: SessionStore::new(),
        jwt_secret: Arc::from("test-secret"),
        tracking: TrackingSchedule::default(),
    }
}

fn admin() -> AuthUser {
    AuthUser {
        user_id: Uuid::new_v4(),
        role: "admin".into(),
    }
}

fn seller(id: i64) -> sellers::Model {
    sellers::Model {
        id,
        full_name: format!("Seller {id}"),
        address: "Somewhere".into(),
        phone: "000".into(),
    }
}

fn category(id: i64, parent_id: Option<i64>) -> categories::Model {
    categories::Model {
        id,
        name: format!("Category {id}"),
        parent_id,
    }
}

fn deleted(rows_affected: u64) -> MockExecResult {
    MockExecResult {
        last_insert_id: 0,
        rows_affected,
    }
}

#[tokio::test]
async fn delete_removes_exactly_that_row_from_the_refetch() -> anyhow::Result<()> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([deleted(1)])
        .append_query_results([vec![seller(1), seller(3)]])
        .into_connection();
    let state = state(db);

    let resp = admin_service::delete_record(&state, &admin(), TableName::Sellers, 2, true).await?;
    assert_eq!(resp.message, "Item deleted successfully");
    let rows = resp.data.expect("refetched rows");
    assert_eq!(rows.table(), TableName::Sellers);
    assert_eq!(rows.ids(), vec![1, 3]);
    Ok(())
}

#[tokio::test]
async fn unconfirmed_delete_never_reaches_the_database() {
    // An empty mock fails any call made against it.
    let state = state(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let err = admin_service::delete_record(&state, &admin(), TableName::Products, 1, false)
        .await
        .expect_err("confirmation required");
    assert!(matches!(err, AppError::BadRequest(_)));
}

#[tokio::test]
async fn deleting_a_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([deleted(0)])
        .into_connection();
    let err = admin_service::delete_record(&state(db), &admin(), TableName::Attributes, 9, true)
        .await
        .expect_err("nothing deleted");
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn admin_surface_requires_the_admin_role() {
    let state = state(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let customer = AuthUser {
        user_id: Uuid::new_v4(),
        role: "customer".into(),
    };
    assert!(matches!(
        admin_service::list_table(&state, &customer, TableName::Products).await,
        Err(AppError::Forbidden)
    ));
    assert!(matches!(
        admin_service::delete_record(&state, &customer, TableName::Products, 1, true).await,
        Err(AppError::Forbidden)
    ));
}

#[tokio::test]
async fn order_tables_are_read_only() {
    let state = state(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let err = admin_service::save_record(
        &state,
        &admin(),
        TableName::Orders,
        SaveMode::Add,
        json!({ "total_amount": 10 }),
    )
    .await
    .expect_err("orders are read-only");
    assert!(matches!(err, AppError::BadRequest(_)));

    assert!(matches!(
        admin_service::blank_record(&admin(), TableName::OrderItems).await,
        Err(AppError::BadRequest(_))
    ));
}

#[tokio::test]
async fn invalid_record_is_rejected_before_insert() {
    let state = state(MockDatabase::new(DatabaseBackend::Postgres).into_connection());
    let err = admin_service::save_record(
        &state,
        &admin(),
        TableName::Sellers,
        SaveMode::Add,
        json!({ "full_name": "", "address": "x", "phone": "y" }),
    )
    .await
    .expect_err("name required");
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::Required("full_name"))
    ));
}

#[tokio::test]
async fn add_inserts_then_refetches_that_table() -> anyhow::Result<()> {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![seller(4)]])
        .append_query_results([vec![seller(1), seller(4)]])
        .into_connection();
    let state = state(db);

    let resp = admin_service::save_record(
        &state,
        &admin(),
        TableName::Sellers,
        SaveMode::Add,
        json!({ "id": 99, "full_name": "Seller 4", "address": "Somewhere", "phone": "000" }),
    )
    .await?;
    assert_eq!(resp.message, "Item added successfully");
    assert_eq!(resp.data.expect("rows").ids(), vec![1, 4]);
    Ok(())
}

#[tokio::test]
async fn update_of_missing_row_is_not_found() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_exec_results([deleted(0)])
        .into_connection();
    let err = admin_service::save_record(
        &state(db),
        &admin(),
        TableName::Attributes,
        SaveMode::Edit { id: 5 },
        json!({ "name": "Color" }),
    )
    .await
    .expect_err("no row updated");
    assert!(matches!(err, AppError::NotFound));
}

#[tokio::test]
async fn category_parent_must_be_top_level() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![category(2, Some(1))]])
        .into_connection();
    let err = admin_service::save_record(
        &state(db),
        &admin(),
        TableName::Categories,
        SaveMode::Add,
        json!({ "name": "Zip Hoodies", "parent_id": 2 }),
    )
    .await
    .expect_err("grandchild category");
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::NestedParent)
    ));
}

#[tokio::test]
async fn category_parent_must_exist() {
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([Vec::<categories::Model>::new()])
        .into_connection();
    let err = admin_service::save_record(
        &state(db),
        &admin(),
        TableName::Categories,
        SaveMode::Add,
        json!({ "name": "Hoodies", "parent_id": 42 }),
    )
    .await
    .expect_err("missing parent");
    assert!(matches!(
        err,
        AppError::Validation(ValidationError::UnknownReference("parent_id"))
    ));
}

#[tokio::test]
async fn dashboard_reports_a_failed_table_and_keeps_the_rest() -> anyhow::Result<()> {
    let product = products::Model {
        id: 1,
        name: "Hoodie".into(),
        price: Decimal::new(4999, 2),
        quantity: 3,
        status: ProductStatus::Free,
        seller_id: None,
        description: String::new(),
        mini_description: String::new(),
    };
    // Queries are answered in fetch order: products, categories, sellers, then
    // the five remaining tables.
    let db = MockDatabase::new(DatabaseBackend::Postgres)
        .append_query_results([vec![product]])
        .append_query_results([vec![category(1, None), category(2, Some(1))]])
        .append_query_errors([DbErr::Custom("sellers unavailable".into())])
        .append_query_results([
            Vec::<sellers::Model>::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
            Vec::new(),
        ])
        .into_connection();

    let resp = admin_service::dashboard(&state(db), &admin()).await?;
    let dashboard = resp.data.expect("dashboard");

    assert_eq!(dashboard.errors.len(), 1);
    assert_eq!(dashboard.errors[0].table, TableName::Sellers);
    assert!(dashboard.errors[0].error.contains("sellers unavailable"));

    assert_eq!(dashboard.tables.len(), TableName::ALL.len());
    assert_eq!(dashboard.tables[2], TableRows::empty(TableName::Sellers));
    assert_eq!(dashboard.tables[0].ids(), vec![1]);
    assert_eq!(dashboard.tables[1].ids(), vec![1, 2]);
    assert_eq!(dashboard.stats.total_products, 1);
    assert_eq!(dashboard.stats.total_orders, 0);
    Ok(())
}

#[test]
fn dashboard_stats_count_loaded_tables() {
    let order = |id: i64, total: i64| OrderRow {
        order: Order {
            id,
            customer_id: Uuid::nil(),
            seller_id: None,
            date_created: chrono::Utc::now(),
            total_amount: Decimal::new(total, 2),
            first_name: "A".into(),
            last_name: "B".into(),
            email: "a@b.c".into(),
            address: "x".into(),
            city: "y".into(),
            postal_code: "z".into(),
            country: "w".into(),
        },
        seller_name: None,
    };
    let tables = vec![
        TableRows::empty(TableName::Products),
        TableRows::Orders(vec![order(1, 1000), order(2, 2550)]),
    ];

    let stats = DashboardStats::from_tables(&tables);
    assert_eq!(stats.total_orders, 2);
    assert_eq!(stats.total_products, 0);
    assert_eq!(stats.total_revenue, Decimal::new(3550, 2));
    assert_eq!(stats.total_tables, 8);
}
