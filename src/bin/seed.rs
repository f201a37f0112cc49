use std::str::FromStr;

use rust_decimal::Decimal;
use storefront_api::{
    config::AppConfig,
    db::{DbPool, create_pool, run_migrations},
};

const SELLERS: &[(&str, &str, &str)] = &[
    ("Ferris Goods", "12 Harbor Street, Portsmouth", "+44 20 7946 0018"),
    ("Crab Outfitters", "4 Rue des Quais, Nantes", "+33 2 40 00 00 00"),
];

const CATEGORIES: &[(&str, &[&str])] = &[
    ("Clothing", &["Hoodies", "T-Shirts"]),
    ("Home", &["Mugs", "Posters"]),
    ("Books", &[]),
];

const ATTRIBUTES: &[&str] = &["Color", "Material", "Size"];

// name, price, quantity, status, seller index, category, attributes
type ProductSeed = (
    &'static str,
    &'static str,
    i32,
    &'static str,
    usize,
    &'static str,
    &'static [(&'static str, &'static str)],
);

const PRODUCTS: &[ProductSeed] = &[
    ("Axum Hoodie", "55.00", 50, "free", 0, "Hoodies", &[("Color", "Orange"), ("Material", "Cotton")]),
    ("Borrow Checker Tee", "24.90", 120, "free", 0, "T-Shirts", &[("Size", "M")]),
    ("Ferris Mug", "12.00", 100, "free", 1, "Mugs", &[("Material", "Ceramic")]),
    ("Lifetimes Poster", "18.50", 0, "free", 1, "Posters", &[]),
    ("Async Rust in Practice", "39.00", 20, "reserved", 0, "Books", &[]),
    ("Clothing Gift Card", "50.00", 999, "free", 0, "Clothing", &[]),
];

#[tokio::main]
async fn main() -> anyhow::Result<()> {
    dotenvy::dotenv().ok();
    let config = AppConfig::from_env()?;

    let pool = create_pool(&config.database_url, 2).await?;
    run_migrations(&pool).await?;

    let existing: (i64,) = sqlx::query_as("SELECT COUNT(*) FROM products")
        .fetch_one(&pool)
        .await?;
    if existing.0 > 0 {
        println!("Catalog already has {} products, nothing to seed", existing.0);
        return Ok(());
    }

    let seller_ids = seed_sellers(&pool).await?;
    seed_categories(&pool).await?;
    seed_attributes(&pool).await?;
    seed_products(&pool, &seller_ids).await?;

    println!("Seed completed");
    Ok(())
}

async fn seed_sellers(pool: &DbPool) -> anyhow::Result<Vec<i64>> {
    let mut ids = Vec::with_capacity(SELLERS.len());
    for (full_name, address, phone) in SELLERS {
        let (id,): (i64,) = sqlx::query_as(
            "INSERT INTO sellers (full_name, address, phone) VALUES ($1, $2, $3) RETURNING id",
        )
        .bind(full_name)
        .bind(address)
        .bind(phone)
        .fetch_one(pool)
        .await?;
        ids.push(id);
    }
    println!("Seeded {} sellers", ids.len());
    Ok(ids)
}

async fn seed_categories(pool: &DbPool) -> anyhow::Result<()> {
    for (parent, children) in CATEGORIES {
        let parent_id = upsert_category(pool, parent, None).await?;
        for child in *children {
            upsert_category(pool, child, Some(parent_id)).await?;
        }
    }
    println!("Seeded categories");
    Ok(())
}

async fn upsert_category(pool: &DbPool, name: &str, parent_id: Option<i64>) -> anyhow::Result<i64> {
    let (id,): (i64,) = sqlx::query_as(
        r#"
        INSERT INTO categories (name, parent_id)
        VALUES ($1, $2)
        ON CONFLICT (name) DO UPDATE SET parent_id = EXCLUDED.parent_id
        RETURNING id
        "#,
    )
    .bind(name)
    .bind(parent_id)
    .fetch_one(pool)
    .await?;
    Ok(id)
}

async fn seed_attributes(pool: &DbPool) -> anyhow::Result<()> {
    for name in ATTRIBUTES {
        sqlx::query("INSERT INTO attributes (name) VALUES ($1)")
            .bind(name)
            .execute(pool)
            .await?;
    }
    println!("Seeded attributes");
    Ok(())
}

async fn seed_products(pool: &DbPool, seller_ids: &[i64]) -> anyhow::Result<()> {
    for (name, price, quantity, status, seller, category, attributes) in PRODUCTS {
        let (product_id,): (i64,) = sqlx::query_as(
            r#"
            INSERT INTO products (name, price, quantity, status, seller_id, description, mini_description)
            VALUES ($1, $2, $3, $4, $5, $6, $7)
            RETURNING id
            "#,
        )
        .bind(name)
        .bind(Decimal::from_str(price)?)
        .bind(quantity)
        .bind(status)
        .bind(seller_ids.get(*seller).copied())
        .bind(format!("{name} from the demo catalog."))
        .bind(format!("Demo {}", category.to_lowercase()))
        .fetch_one(pool)
        .await?;

        sqlx::query(
            r#"
            INSERT INTO product_categories (product_id, category_id)
            SELECT $1, id FROM categories WHERE name = $2
            "#,
        )
        .bind(product_id)
        .bind(category)
        .execute(pool)
        .await?;

        for (attribute, value) in *attributes {
            sqlx::query(
                r#"
                INSERT INTO product_attributes (product_id, attribute_id, value)
                SELECT $1, id, $3 FROM attributes WHERE name = $2
                "#,
            )
            .bind(product_id)
            .bind(attribute)
            .bind(value)
            .execute(pool)
            .await?;
        }
    }

    println!("Seeded {} products", PRODUCTS.len());
    Ok(())
}
