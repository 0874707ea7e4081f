//! Invoice ledger
//!
//! Obtains-or-creates exactly one open invoice per guest and caches its
//! identifier and number on the session.

use shared::models::Invoice;
use tracing::{debug, info, warn};

use crate::error::CheckoutResult;
use crate::http::SpaBackend;
use crate::session::CheckoutSession;

pub struct InvoiceLedger;

impl InvoiceLedger {
    /// Get or create the guest's open invoice
    ///
    /// Idempotent within a session: a cached id short-circuits, and the
    /// backend applies get-or-create semantics on a miss, so repeated
    /// calls never create a second invoice. On failure the cache stays
    /// unset and the caller may retry.
    pub async fn ensure(
        backend: &dyn SpaBackend,
        session: &mut CheckoutSession,
        guest_id: &str,
    ) -> CheckoutResult<Invoice> {
        if let Some(invoice_id) = &session.invoice_id {
            debug!(%invoice_id, "invoice already cached");
            return Ok(Invoice {
                id: invoice_id.clone(),
                invoice_no: session.invoice_no.clone(),
                guest_id: guest_id.to_string(),
            });
        }

        let ensured = match backend.ensure_invoice(guest_id).await {
            Ok(ensured) => ensured,
            Err(err) => {
                warn!(guest_id, error = %err, "invoice get-or-create failed");
                return Err(err);
            }
        };

        info!(guest_id, invoice_id = %ensured.invoice_id, "invoice ensured");
        session.invoice_id = Some(ensured.invoice_id.clone());
        session.invoice_no = ensured.invoice_no.clone();

        Ok(Invoice {
            id: ensured.invoice_id,
            invoice_no: ensured.invoice_no,
            guest_id: guest_id.to_string(),
        })
    }

    /// Backfill the human-readable number when only the id is known
    pub async fn fetch_number(
        backend: &dyn SpaBackend,
        session: &mut CheckoutSession,
        invoice_id: &str,
    ) -> CheckoutResult<String> {
        let detail = backend.invoice_number(invoice_id).await?;
        session.invoice_no = Some(detail.invoice_no.clone());
        Ok(detail.invoice_no)
    }
}
