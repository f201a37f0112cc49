//! Per-session shopping cart.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;

pub const PLACEHOLDER_IMAGE: &str = "/placeholder.svg";

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize, ToSchema)]
pub struct CartLine {
    pub product_id: i64,
    pub name: String,
    pub price: Decimal,
    pub quantity: i32,
    pub seller_id: Option<i64>,
    pub image: String,
    pub variant: Option<String>,
}

impl CartLine {
    pub fn line_total(&self) -> Decimal {
        self.price * Decimal::from(self.quantity)
    }

    fn is(&self, product_id: i64, variant: Option<&str>) -> bool {
        self.product_id == product_id && self.variant.as_deref() == variant
    }
}

/// Ordered cart lines keyed by (product id, variant).
#[derive(Debug, Clone, Default, PartialEq)]
pub struct Cart {
    lines: Vec<CartLine>,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    pub fn len(&self) -> usize {
        self.lines.len()
    }

    /// Sum of quantities across lines.
    pub fn item_count(&self) -> i64 {
        self.lines.iter().map(|l| i64::from(l.quantity)).sum()
    }

    pub fn total(&self) -> Decimal {
        self.lines.iter().map(CartLine::line_total).sum()
    }

    /// The seller shared by every line, if there is exactly one.
    pub fn common_seller(&self) -> Option<i64> {
        let first = self.lines.first()?.seller_id?;
        self.lines
            .iter()
            .all(|l| l.seller_id == Some(first))
            .then_some(first)
    }

    pub fn get(&self, product_id: i64, variant: Option<&str>) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.is(product_id, variant))
    }

    /// Repeat adds of the same product and variant increase the quantity;
    /// anything else is appended as a new line.
    pub fn add(&mut self, line: CartLine) {
        match self
            .lines
            .iter_mut()
            .find(|l| l.is(line.product_id, line.variant.as_deref()))
        {
            Some(existing) => existing.quantity = existing.quantity.saturating_add(line.quantity),
            None => self.lines.push(line),
        }
    }

    /// Set a line's quantity; zero or less removes it. Returns `false` when
    /// no such line exists.
    pub fn update_quantity(&mut self, product_id: i64, variant: Option<&str>, quantity: i32) -> bool {
        if quantity <= 0 {
            return self.remove(product_id, variant);
        }
        match self.lines.iter_mut().find(|l| l.is(product_id, variant)) {
            Some(line) => {
                line.quantity = quantity;
                true
            }
            None => false,
        }
    }

    pub fn remove(&mut self, product_id: i64, variant: Option<&str>) -> bool {
        let before = self.lines.len();
        self.lines.retain(|l| !l.is(product_id, variant));
        self.lines.len() != before
    }

    pub fn clear(&mut self) {
        self.lines.clear();
    }

    /// Take the quantities of an already-ordered copy out of this cart.
    /// Lines added after the copy was taken, and any quantity added on top of
    /// an ordered line, stay behind.
    pub fn remove_ordered(&mut self, ordered: &Cart) {
        for done in &ordered.lines {
            let variant = done.variant.as_deref();
            if let Some(line) = self.lines.iter_mut().find(|l| l.is(done.product_id, variant)) {
                line.quantity = line.quantity.saturating_sub(done.quantity);
            }
        }
        self.lines.retain(|l| l.quantity > 0);
    }
}
