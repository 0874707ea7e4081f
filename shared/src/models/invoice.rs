//! Invoice Model

use serde::{Deserialize, Serialize};

/// Invoice reference held by a checkout session
///
/// At most one open invoice exists per guest; the backend enforces
/// get-or-create semantics and the session caches the result.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Invoice {
    /// Opaque invoice identifier (UUID)
    pub id: String,
    /// Human-readable invoice number, once known
    pub invoice_no: Option<String>,
    pub guest_id: String,
}

/// Response of the get-or-create invoice endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceEnsured {
    pub invoice_id: String,
    pub invoice_no: Option<String>,
}

/// Response of the invoice detail endpoint (number backfill)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceNumber {
    pub invoice_no: String,
}

/// Response of the generate-from-sale endpoint
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct InvoiceGenerated {
    pub invoice_id: Option<String>,
    pub invoice_no: Option<String>,
}
