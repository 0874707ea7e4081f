//! Payment Model

use serde::{Deserialize, Serialize};

/// Payment submission payload
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentRequest {
    pub payment_method: String,
    /// Must equal the session's payable amount at submission time
    pub amount: f64,
    pub remarks: Option<String>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub sale_id: Option<String>,
    /// Client-generated key so a retried submission is charged once
    pub idempotency_key: String,
}

/// Payment entity as returned by the backend
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaymentCreated {
    pub id: String,
}
