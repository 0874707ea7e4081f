//! Catalog Models (products and promotional offers)

use serde::{Deserialize, Serialize};

/// Item kind an offer applies to
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum ItemType {
    Product,
    Service,
    Package,
    Membership,
}

/// Discount kind
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum DiscountType {
    Percentage,
    Fixed,
}

/// Product entity (only the fields the checkout flow reads)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Product {
    pub id: String,
    pub name: String,
    /// Catalog sale price, the base for discount recomputation
    pub sale_price: f64,
    pub is_active: bool,
}

/// Promotional offer (read-only reference data)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Offer {
    pub id: String,
    pub item_type: ItemType,
    pub item_id: String,
    pub discount_type: DiscountType,
    /// Percentage (20 = 20%) or fixed amount, per `discount_type`
    pub discount_value: f64,
    pub description: Option<String>,
}
