use std::collections::HashMap;

use rust_decimal::Decimal;
use storefront_api::{
    catalog::{
        ProductFilter, aggregate_products, category_label, category_tree_ids, collect_product_ids,
        parent_categories, resolve_category_products,
    },
    models::{Category, Product, ProductCategory, ProductStatus, in_stock},
};

fn category(id: i64, name: &str, parent_id: Option<i64>) -> Category {
    Category {
        id,
        name: name.to_string(),
        parent_id,
    }
}

fn product(id: i64, name: &str, price: i64) -> Product {
    Product {
        id,
        name: name.to_string(),
        price: Decimal::new(price, 2),
        quantity: 5,
        status: ProductStatus::Free,
        seller_id: None,
        description: String::new(),
        mini_description: String::new(),
        in_stock: true,
    }
}

fn link(id: i64, product_id: i64, category_id: i64) -> ProductCategory {
    ProductCategory {
        id,
        product_id,
        category_id,
    }
}

/// Clothing(1) -> Hoodies(2), T-Shirts(3); Home(4) -> Mugs(5).
fn tree() -> Vec<Category> {
    vec![
        category(1, "Clothing", None),
        category(2, "Hoodies", Some(1)),
        category(3, "T-Shirts", Some(1)),
        category(4, "Home", None),
        category(5, "Mugs", Some(4)),
    ]
}

#[test]
fn in_stock_requires_quantity_and_free_status() {
    assert!(in_stock(1, ProductStatus::Free));
    assert!(!in_stock(0, ProductStatus::Free));
    assert!(!in_stock(-1, ProductStatus::Free));
    assert!(!in_stock(10, ProductStatus::Reserved));
    assert!(!in_stock(10, ProductStatus::Sold));
}

#[test]
fn collect_product_ids_dedups_across_parent_and_children() {
    let links = vec![
        link(1, 10, 2),
        link(2, 11, 1),
        link(3, 10, 1),
        link(4, 12, 5),
        link(5, 11, 3),
    ];
    let ids = collect_product_ids(&links, &[1, 2, 3]);
    assert_eq!(ids, vec![10, 11]);
}

#[test]
fn category_tree_ids_lists_root_then_children() {
    assert_eq!(category_tree_ids(1, &tree()), vec![1, 2, 3]);
    assert_eq!(category_tree_ids(5, &tree()), vec![5]);
}

#[test]
fn category_label_prefers_first_linked_child() {
    let categories = tree();
    let clothing = &categories[0];
    let children = &categories[1..3];
    let links = vec![link(1, 10, 3), link(2, 10, 2), link(3, 11, 1)];

    // Children are checked in their own order, not link order.
    assert_eq!(category_label(10, clothing, children, &links), "Hoodies");
    assert_eq!(category_label(11, clothing, children, &links), "Clothing");
}

#[test]
fn resolve_category_products_labels_every_product() {
    let categories = tree();
    let links = vec![link(1, 10, 2), link(2, 11, 1)];
    let resolved = resolve_category_products(
        &categories[0],
        &categories[1..3],
        &links,
        vec![product(10, "Axum Hoodie", 5500), product(11, "Gift Card", 5000)],
    );
    let labels: Vec<_> = resolved.iter().map(|p| p.category.as_str()).collect();
    assert_eq!(labels, vec!["Hoodies", "Clothing"]);
}

#[test]
fn parent_categories_promotes_children_once() {
    let lookup: HashMap<i64, Category> = tree().into_iter().map(|c| (c.id, c)).collect();
    let parents = parent_categories(&[2, 3, 5, 99, 1], &lookup);
    let names: Vec<_> = parents.iter().map(|c| c.name.as_str()).collect();
    assert_eq!(names, vec!["Clothing", "Home"]);
}

#[test]
fn aggregate_lists_top_level_labels_before_children() {
    let products = vec![product(10, "Axum Hoodie", 5500), product(11, "Ferris Mug", 1200)];
    let links = vec![link(1, 10, 2), link(2, 10, 4), link(3, 11, 5)];
    let listed = aggregate_products(products, &tree(), &links);

    assert_eq!(listed[0].categories, vec!["Clothing", "Home", "Hoodies"]);
    assert_eq!(listed[1].categories, vec!["Home", "Mugs"]);
}

#[test]
fn aggregate_keeps_unlinked_products_without_labels() {
    let listed = aggregate_products(vec![product(7, "Orphan", 100)], &tree(), &[]);
    assert_eq!(listed.len(), 1);
    assert!(listed[0].categories.is_empty());
}

#[test]
fn filter_predicates_compose() {
    let products = vec![
        product(10, "Axum Hoodie", 5500),
        product(11, "Ferris Mug", 1200),
        product(12, "Ferris Hoodie", 6000),
    ];
    let links = vec![link(1, 10, 2), link(2, 11, 5), link(3, 12, 2)];
    let listed = aggregate_products(products, &tree(), &links);

    let all = ProductFilter::default().apply(listed.clone());
    assert_eq!(all.len(), 3);

    let filter = ProductFilter {
        q: Some("FERRIS".into()),
        category: Some("Clothing".into()),
        min_price: Some(Decimal::new(5000, 2)),
        max_price: Some(Decimal::new(6000, 2)),
    };
    let ids: Vec<_> = filter.apply(listed.clone()).iter().map(|p| p.product.id).collect();
    assert_eq!(ids, vec![12]);

    // Bounds are inclusive and "all" disables the category predicate.
    let filter = ProductFilter {
        q: None,
        category: Some("all".into()),
        min_price: Some(Decimal::new(1200, 2)),
        max_price: Some(Decimal::new(5500, 2)),
    };
    let ids: Vec<_> = filter.apply(listed).iter().map(|p| p.product.id).collect();
    assert_eq!(ids, vec![10, 11]);
}

#[test]
fn filter_matches_child_labels() {
    let listed = aggregate_products(
        vec![product(11, "Ferris Mug", 1200)],
        &tree(),
        &[link(1, 11, 5)],
    );
    let filter = ProductFilter {
        category: Some("Mugs".into()),
        ..ProductFilter::default()
    };
    assert_eq!(filter.apply(listed).len(), 1);
}
