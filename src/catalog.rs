//! Category tree and product listing rules.
//!
//! Categories form a two-level tree: top-level rows have no parent and every
//! child points at a top-level row. Products are tagged through
//! `product_categories` links, either directly with a top-level category or
//! with one of its children. Everything in this module works on rows that
//! were already loaded, so the services only decide what to fetch.

use std::collections::{HashMap, HashSet};

use rust_decimal::Decimal;
use serde::Deserialize;
use utoipa::ToSchema;

use crate::{
    dto::catalog::{CategoryProduct, ListedProduct},
    models::{Category, Product, ProductCategory},
};

/// Distinct product ids linked to any of `category_ids`, in link order.
pub fn collect_product_ids(links: &[ProductCategory], category_ids: &[i64]) -> Vec<i64> {
    let wanted: HashSet<i64> = category_ids.iter().copied().collect();
    let mut seen = HashSet::new();
    links
        .iter()
        .filter(|link| wanted.contains(&link.category_id))
        .filter(|link| seen.insert(link.product_id))
        .map(|link| link.product_id)
        .collect()
}

/// `root` followed by the ids of its direct children, in id order.
pub fn category_tree_ids(root: i64, categories: &[Category]) -> Vec<i64> {
    let mut children: Vec<i64> = categories
        .iter()
        .filter(|c| c.parent_id == Some(root))
        .map(|c| c.id)
        .collect();
    children.sort_unstable();
    let mut ids = vec![root];
    ids.extend(children);
    ids
}

/// Label of a product on a category page: the first child category it is
/// linked to, falling back to the page's own category.
pub fn category_label(
    product_id: i64,
    category: &Category,
    children: &[Category],
    links: &[ProductCategory],
) -> String {
    children
        .iter()
        .find(|child| {
            links
                .iter()
                .any(|link| link.product_id == product_id && link.category_id == child.id)
        })
        .map(|child| child.name.clone())
        .unwrap_or_else(|| category.name.clone())
}

/// Shape the products of a category page.
pub fn resolve_category_products(
    category: &Category,
    children: &[Category],
    links: &[ProductCategory],
    products: Vec<Product>,
) -> Vec<CategoryProduct> {
    products
        .into_iter()
        .map(|product| CategoryProduct {
            category: category_label(product.id, category, children, links),
            product,
        })
        .collect()
}

/// Top-level categories reached from `category_ids`, promoting a child to
/// its parent. Unknown ids are ignored and each parent appears once.
pub fn parent_categories(category_ids: &[i64], lookup: &HashMap<i64, Category>) -> Vec<Category> {
    let mut parents: Vec<Category> = Vec::new();
    for id in category_ids {
        let Some(category) = lookup.get(id) else {
            continue;
        };
        let parent = match category.parent_id {
            None => Some(category),
            Some(parent_id) => lookup.get(&parent_id),
        };
        if let Some(parent) = parent {
            if !parents.iter().any(|p| p.id == parent.id) {
                parents.push(parent.clone());
            }
        }
    }
    parents
}

/// Category labels of one product: top-level labels (including parents of
/// linked children) followed by child labels not already present.
pub fn category_labels(category_ids: &[i64], lookup: &HashMap<i64, Category>) -> Vec<String> {
    let mut top_level: Vec<String> = Vec::new();
    let mut child_labels: Vec<String> = Vec::new();

    for id in category_ids {
        let Some(category) = lookup.get(id) else {
            continue;
        };
        match category.parent_id {
            None => push_unique(&mut top_level, &category.name),
            Some(parent_id) => {
                push_unique(&mut child_labels, &category.name);
                if let Some(parent) = lookup.get(&parent_id) {
                    push_unique(&mut top_level, &parent.name);
                }
            }
        }
    }

    for label in child_labels {
        if !top_level.contains(&label) {
            top_level.push(label);
        }
    }
    top_level
}

fn push_unique(labels: &mut Vec<String>, name: &str) {
    if !labels.iter().any(|l| l == name) {
        labels.push(name.to_string());
    }
}

/// Join every product with its category labels.
pub fn aggregate_products(
    products: Vec<Product>,
    categories: &[Category],
    links: &[ProductCategory],
) -> Vec<ListedProduct> {
    let lookup: HashMap<i64, Category> = categories.iter().map(|c| (c.id, c.clone())).collect();
    let mut by_product: HashMap<i64, Vec<i64>> = HashMap::new();
    for link in links {
        by_product
            .entry(link.product_id)
            .or_default()
            .push(link.category_id);
    }

    products
        .into_iter()
        .map(|product| {
            let ids = by_product.get(&product.id).map(Vec::as_slice).unwrap_or(&[]);
            ListedProduct {
                categories: category_labels(ids, &lookup),
                product,
            }
        })
        .collect()
}

/// Composable listing filter; every predicate that is set must hold.
#[derive(Debug, Clone, Default, Deserialize, ToSchema)]
pub struct ProductFilter {
    /// Case-insensitive substring of the product name.
    pub q: Option<String>,
    /// Category label, `all` disables the predicate.
    pub category: Option<String>,
    pub min_price: Option<Decimal>,
    pub max_price: Option<Decimal>,
}

impl ProductFilter {
    pub fn matches_name(&self, name: &str) -> bool {
        match self.q.as_deref().map(str::trim).filter(|q| !q.is_empty()) {
            Some(term) => name.to_lowercase().contains(&term.to_lowercase()),
            None => true,
        }
    }

    pub fn matches_category(&self, labels: &[String]) -> bool {
        match self.category.as_deref().filter(|c| !c.is_empty() && *c != "all") {
            Some(selected) => labels.iter().any(|label| label == selected),
            None => true,
        }
    }

    pub fn matches_price(&self, price: Decimal) -> bool {
        self.min_price.is_none_or(|min| price >= min) && self.max_price.is_none_or(|max| price <= max)
    }

    pub fn matches(&self, listed: &ListedProduct) -> bool {
        self.matches_name(&listed.product.name)
            && self.matches_category(&listed.categories)
            && self.matches_price(listed.product.price)
    }

    pub fn apply(&self, products: Vec<ListedProduct>) -> Vec<ListedProduct> {
        products.into_iter().filter(|p| self.matches(p)).collect()
    }
}
