//! Payment submission
//!
//! Drives one checkout cycle through validation, invoice ensuring, and
//! submission. The invoice-ensure retry is a single explicit awaited
//! call rather than a timer, and the payable amount always comes from
//! the cart, never recomputed here.

use rust_decimal::Decimal;
use shared::models::PaymentRequest;
use tracing::{error, info, warn};
use uuid::Uuid;

use crate::error::{CheckoutError, CheckoutResult};
use crate::http::SpaBackend;
use crate::invoice::InvoiceLedger;
use crate::money;
use crate::session::{CheckoutSession, Receipt, ReceiptLine};

/// Checkout cycle states
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum PaymentState {
    #[default]
    Idle,
    Validating,
    EnsuringInvoice,
    Submitting,
    Succeeded,
    Failed,
}

/// Operator input for one checkout
#[derive(Debug, Clone)]
pub struct CheckoutRequest {
    pub payment_method: String,
    pub remarks: Option<String>,
}

/// A confirmed payment
///
/// `warning` carries a partial-success note (payment stands, but the
/// best-effort invoice-number derivation failed).
#[derive(Debug, Clone)]
pub struct PaymentOutcome {
    pub receipt: Receipt,
    pub warning: Option<String>,
}

pub struct PaymentSubmitter;

impl PaymentSubmitter {
    /// Run one checkout cycle
    ///
    /// On failure the session's form state (cart, sale, invoice cache)
    /// is preserved so the operator can correct and resubmit; a
    /// resubmission restarts validation from scratch with the same
    /// idempotency key. On success the transient checkout state is
    /// reset and the receipt returned.
    pub async fn submit(
        backend: &dyn SpaBackend,
        session: &mut CheckoutSession,
        request: CheckoutRequest,
    ) -> CheckoutResult<PaymentOutcome> {
        session.payment_state = PaymentState::Validating;

        let amount = session.cart.total();
        if session.cart.is_empty() {
            return Self::fail(
                session,
                CheckoutError::Validation(
                    "Add at least one product, package or membership before checkout.".to_string(),
                ),
            );
        }
        if amount <= Decimal::ZERO {
            return Self::fail(
                session,
                CheckoutError::Validation("Payable amount must be greater than zero.".to_string()),
            );
        }

        // One key per checkout cycle, reused across retries, so a
        // deduplicating backend charges a retried submission once
        let idempotency_key = session
            .idempotency_key
            .get_or_insert_with(|| Uuid::new_v4().to_string())
            .clone();

        session.payment_state = PaymentState::EnsuringInvoice;
        if session.invoice_id.is_none() {
            let Some(guest_id) = session.guest.as_ref().map(|g| g.id.clone()) else {
                return Self::fail(
                    session,
                    CheckoutError::MissingPrecondition("Invoice ID is required".to_string()),
                );
            };

            if InvoiceLedger::ensure(backend, session, &guest_id).await.is_err() {
                warn!(guest_id = %guest_id, "invoice ensure failed, retrying once");
                if InvoiceLedger::ensure(backend, session, &guest_id).await.is_err() {
                    return Self::fail(
                        session,
                        CheckoutError::BackendUnavailable(
                            "Failed to create invoice. Please try again.".to_string(),
                        ),
                    );
                }
            }
        }

        let Some(invoice_id) = session.invoice_id.clone() else {
            return Self::fail(
                session,
                CheckoutError::InvalidResponse(
                    "invoice ensure returned no invoice id".to_string(),
                ),
            );
        };

        if !is_canonical_uuid(&invoice_id) {
            return Self::fail(
                session,
                CheckoutError::Validation("Invalid invoice ID format".to_string()),
            );
        }

        session.payment_state = PaymentState::Submitting;
        let payment = PaymentRequest {
            payment_method: request.payment_method.clone(),
            amount: money::to_f64(amount),
            remarks: request.remarks.clone(),
            sale_id: session.sale_id.clone(),
            idempotency_key,
        };

        let created = match backend.create_payment(&payment).await {
            Ok(created) => created,
            Err(err) => {
                error!(error = %err, "payment submission failed");
                return Self::fail(session, err);
            }
        };

        session.payment_state = PaymentState::Succeeded;
        info!(payment_id = %created.id, amount = payment.amount, "payment accepted");

        // Best-effort: derive the final invoice number from the sale.
        // A failure here never rolls back the confirmed payment.
        let mut warning = None;
        if let Some(sale_id) = session.sale_id.clone() {
            match backend.generate_invoice(&sale_id).await {
                Ok(generated) => {
                    if let Some(no) = generated.invoice_no {
                        session.invoice_no = Some(no);
                    } else if let Some(id) = generated.invoice_id {
                        if let Err(err) =
                            InvoiceLedger::fetch_number(backend, session, &id).await
                        {
                            warn!(error = %err, "invoice number backfill failed");
                        }
                    }
                }
                Err(err) => {
                    warn!(error = %err, "invoice number generation failed after payment");
                    warning = Some(format!(
                        "Payment recorded, but generating the invoice number failed: {}",
                        err
                    ));
                }
            }
        } else if session.invoice_no.is_none() {
            if let Err(err) = InvoiceLedger::fetch_number(backend, session, &invoice_id).await {
                warn!(error = %err, "invoice number backfill failed");
            }
        }

        let receipt = build_receipt(session, &created.id, amount, &request.payment_method);
        session.last_receipt = Some(receipt.clone());
        reset_transient(session);

        Ok(PaymentOutcome { receipt, warning })
    }

    fn fail<T>(session: &mut CheckoutSession, err: CheckoutError) -> CheckoutResult<T> {
        session.payment_state = PaymentState::Failed;
        Err(err)
    }
}

/// Canonical 8-4-4-4-12 hexadecimal UUID shape
///
/// Malformed ids are rejected outright, never truncated or corrected.
fn is_canonical_uuid(value: &str) -> bool {
    let bytes = value.as_bytes();
    if bytes.len() != 36 {
        return false;
    }
    bytes.iter().enumerate().all(|(i, b)| match i {
        8 | 13 | 18 | 23 => *b == b'-',
        _ => b.is_ascii_hexdigit(),
    })
}

fn build_receipt(
    session: &CheckoutSession,
    payment_id: &str,
    amount: Decimal,
    method: &str,
) -> Receipt {
    let lines = session
        .cart
        .lines()
        .iter()
        .map(|l| ReceiptLine {
            name: l.name.clone(),
            quantity: l.quantity,
            unit_price: l.unit_price,
            line_total: money::to_f64(money::line_total(l)),
        })
        .collect();

    Receipt {
        payment_id: payment_id.to_string(),
        amount: money::to_f64(amount),
        method: method.to_uppercase(),
        guest_name: session.guest.as_ref().map(|g| g.full_name.clone()),
        guest_code: session.guest.as_ref().map(|g| g.code.clone()),
        invoice_no: session.invoice_no.clone(),
        lines,
        package: session.cart.extras().package.clone(),
        membership: session.cart.extras().membership.clone(),
        completed_at: chrono::Local::now()
            .format("%Y-%m-%d %H:%M:%S")
            .to_string(),
    }
}

/// Reset what one confirmed checkout consumes; the guest and the
/// appointment cache stay for a follow-up sale
fn reset_transient(session: &mut CheckoutSession) {
    session.cart.clear();
    session.sale_id = None;
    session.invoice_id = None;
    session.invoice_no = None;
    session.idempotency_key = None;
}
