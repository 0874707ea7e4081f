//! Sale Model
//!
//! A sale correlates a discounted item, its discount, and the appointment
//! it is attributed to. Its id later drives invoice-number generation.

use serde::{Deserialize, Serialize};

use super::catalog::ItemType;

/// Create sale payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleCreate {
    pub item_type: ItemType,
    pub item_id: String,
    pub discount_id: String,
    pub appointment_id: String,
    pub remarks: Option<String>,
}

/// Sale entity as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: String,
}
