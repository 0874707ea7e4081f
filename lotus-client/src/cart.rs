//! Cart assembly for the product-sale flow
//!
//! Lines are unique by item id; adding an item that is already present
//! merges quantities and takes the most recently supplied price. The
//! payable total is recomputed synchronously on every mutation, so it
//! is always a pure function of the current lines and extras.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::money;

/// One priced, quantified product entry in the in-progress checkout
///
/// The price is frozen at the moment the line is created (or rewritten
/// by an applied offer); later catalog changes do not affect it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CartLine {
    pub item_id: String,
    pub name: String,
    pub unit_price: f64,
    pub quantity: u32,
}

/// A selected package or membership with a flat price
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SelectionExtra {
    pub name: String,
    pub price: f64,
}

/// At most one package and one membership per checkout
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct SelectionExtras {
    pub package: Option<SelectionExtra>,
    pub membership: Option<SelectionExtra>,
}

impl SelectionExtras {
    pub fn is_empty(&self) -> bool {
        self.package.is_none() && self.membership.is_none()
    }
}

/// The mutable line-item set of one checkout session
#[derive(Debug, Clone, Default)]
pub struct Cart {
    lines: Vec<CartLine>,
    extras: SelectionExtras,
    total: Decimal,
}

impl Cart {
    pub fn new() -> Self {
        Self::default()
    }

    /// Add an item, merging into an existing line by item id
    ///
    /// Merging adds the quantity and overwrites the unit price with the
    /// most recently supplied one.
    pub fn add_or_merge_line(
        &mut self,
        item_id: impl Into<String>,
        name: impl Into<String>,
        unit_price: f64,
        quantity: u32,
    ) {
        if quantity == 0 {
            return;
        }
        let item_id = item_id.into();
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity += quantity;
            line.unit_price = unit_price;
        } else {
            self.lines.push(CartLine {
                item_id,
                name: name.into(),
                unit_price,
                quantity,
            });
        }
        self.recompute();
    }

    /// Set a line's quantity; zero or negative removes the line
    pub fn set_quantity(&mut self, item_id: &str, quantity: i32) {
        if quantity <= 0 {
            self.remove_line(item_id);
            return;
        }
        if let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) {
            line.quantity = quantity as u32;
            self.recompute();
        }
    }

    pub fn remove_line(&mut self, item_id: &str) {
        let before = self.lines.len();
        self.lines.retain(|l| l.item_id != item_id);
        if self.lines.len() != before {
            self.recompute();
        }
    }

    /// Rewrite a line's unit price in place (offer application hook)
    ///
    /// Returns false when no line matches the item id.
    pub fn override_unit_price(&mut self, item_id: &str, unit_price: f64) -> bool {
        let Some(line) = self.lines.iter_mut().find(|l| l.item_id == item_id) else {
            return false;
        };
        line.unit_price = unit_price;
        self.recompute();
        true
    }

    pub fn select_package(&mut self, name: impl Into<String>, price: f64) {
        self.extras.package = Some(SelectionExtra {
            name: name.into(),
            price,
        });
        self.recompute();
    }

    pub fn clear_package(&mut self) {
        self.extras.package = None;
        self.recompute();
    }

    pub fn select_membership(&mut self, name: impl Into<String>, price: f64) {
        self.extras.membership = Some(SelectionExtra {
            name: name.into(),
            price,
        });
        self.recompute();
    }

    pub fn clear_membership(&mut self) {
        self.extras.membership = None;
        self.recompute();
    }

    /// Empty lines and extras and reset the payable amount to zero
    pub fn clear(&mut self) {
        self.lines.clear();
        self.extras = SelectionExtras::default();
        self.total = Decimal::ZERO;
    }

    pub fn lines(&self) -> &[CartLine] {
        &self.lines
    }

    pub fn line(&self, item_id: &str) -> Option<&CartLine> {
        self.lines.iter().find(|l| l.item_id == item_id)
    }

    pub fn extras(&self) -> &SelectionExtras {
        &self.extras
    }

    /// Current payable amount
    pub fn total(&self) -> Decimal {
        self.total
    }

    pub fn is_empty(&self) -> bool {
        self.lines.is_empty() && self.extras.is_empty()
    }

    fn recompute(&mut self) {
        self.total = money::cart_total(&self.lines, &self.extras);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::money::to_f64;

    #[test]
    fn test_merge_same_item_sums_quantity_and_takes_latest_price() {
        let mut cart = Cart::new();
        cart.add_or_merge_line("p1", "Face Serum", 100.0, 2);
        cart.add_or_merge_line("p1", "Face Serum", 90.0, 3);

        assert_eq!(cart.lines().len(), 1);
        let line = cart.line("p1").unwrap();
        assert_eq!(line.quantity, 5);
        assert_eq!(line.unit_price, 90.0);
        assert_eq!(to_f64(cart.total()), 450.0);
    }

    #[test]
    fn test_set_quantity_zero_removes_line() {
        let mut cart = Cart::new();
        cart.add_or_merge_line("p1", "Face Serum", 100.0, 2);
        cart.set_quantity("p1", 0);

        assert!(cart.lines().is_empty());
        assert_eq!(to_f64(cart.total()), 0.0);
    }

    #[test]
    fn test_extras_add_to_total_without_becoming_lines() {
        let mut cart = Cart::new();
        cart.add_or_merge_line("p1", "Face Serum", 100.0, 1);
        cart.select_package("Gold Package", 250.0);
        cart.select_membership("Annual", 99.5);

        assert_eq!(cart.lines().len(), 1);
        assert_eq!(to_f64(cart.total()), 449.5);

        cart.clear_membership();
        assert_eq!(to_f64(cart.total()), 350.0);
    }

    #[test]
    fn test_total_is_pure_function_of_final_state() {
        // Same final state reached through different mutation orders
        let mut a = Cart::new();
        a.add_or_merge_line("p1", "Serum", 100.0, 1);
        a.add_or_merge_line("p2", "Lotion", 50.0, 4);
        a.set_quantity("p2", 2);
        a.select_package("Gold", 30.0);

        let mut b = Cart::new();
        b.select_package("Gold", 30.0);
        b.add_or_merge_line("p2", "Lotion", 50.0, 2);
        b.add_or_merge_line("p1", "Serum", 100.0, 1);

        assert_eq!(a.total(), b.total());
        assert_eq!(to_f64(a.total()), 230.0);
    }

    #[test]
    fn test_override_unit_price_recomputes_total() {
        let mut cart = Cart::new();
        cart.add_or_merge_line("p1", "Serum", 500.0, 2);
        assert!(cart.override_unit_price("p1", 400.0));
        assert_eq!(to_f64(cart.total()), 800.0);

        assert!(!cart.override_unit_price("missing", 1.0));
    }

    #[test]
    fn test_clear_resets_everything() {
        let mut cart = Cart::new();
        cart.add_or_merge_line("p1", "Serum", 100.0, 1);
        cart.select_package("Gold", 30.0);
        cart.clear();

        assert!(cart.is_empty());
        assert_eq!(cart.total(), rust_decimal::Decimal::ZERO);
    }
}
