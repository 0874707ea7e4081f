//! Checkout session state
//!
//! One aggregate owns everything mutable in a checkout: the resolved
//! guest, the cached invoice, the appointment cache, the cart, the
//! reference-data caches and the payment cycle state. Operations borrow
//! the session mutably, so mutations are serialized by ownership rather
//! than locks.

use serde::{Deserialize, Serialize};
use shared::models::{GuestSnapshot, Offer, Product};

use crate::cart::{Cart, SelectionExtra};
use crate::payment::PaymentState;

/// The full mutable state of one operator transaction
#[derive(Debug, Default)]
pub struct CheckoutSession {
    /// Resolved guest, if any
    pub guest: Option<GuestSnapshot>,

    /// Cached invoice identifier for the guest's open invoice
    pub invoice_id: Option<String>,
    /// Human-readable invoice number, once known
    pub invoice_no: Option<String>,

    /// Latest appointment id for the guest (None is a valid cached result)
    pub appointment_id: Option<String>,
    /// Whether the appointment lookup already ran this session
    pub appointment_resolved: bool,

    /// Line items plus package/membership extras
    pub cart: Cart,

    /// Promotional offers, fetched once per session
    pub offers: Vec<Offer>,
    pub offers_loaded: bool,
    /// Product catalog (discount base prices), fetched once per session
    pub products: Vec<Product>,
    pub products_loaded: bool,

    /// Sale created by the last applied offer; correlates the payment
    /// with invoice-number generation
    pub sale_id: Option<String>,

    /// Current payment cycle state
    pub payment_state: PaymentState,
    /// Key reused across retries of one checkout cycle
    pub idempotency_key: Option<String>,

    /// Receipt of the last confirmed payment; never invalidated by
    /// later failures
    pub last_receipt: Option<Receipt>,
}

impl CheckoutSession {
    pub fn new() -> Self {
        Self::default()
    }
}

/// One line on a local receipt
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ReceiptLine {
    pub name: String,
    pub quantity: u32,
    pub unit_price: f64,
    pub line_total: f64,
}

/// Local record of a confirmed payment
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Receipt {
    pub payment_id: String,
    pub amount: f64,
    /// Payment method, uppercased for display
    pub method: String,
    pub guest_name: Option<String>,
    pub guest_code: Option<String>,
    pub invoice_no: Option<String>,
    pub lines: Vec<ReceiptLine>,
    pub package: Option<SelectionExtra>,
    pub membership: Option<SelectionExtra>,
    /// Formatted local timestamp of the confirmation
    pub completed_at: String,
}
