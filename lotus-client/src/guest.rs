//! Guest resolution
//!
//! Resolves a human-entered guest code into a session snapshot and
//! kicks off invoice and appointment resolution as side effects.

use shared::models::{Guest, GuestSnapshot};
use tracing::{info, warn};

use crate::appointment::AppointmentLinker;
use crate::http::SpaBackend;
use crate::invoice::InvoiceLedger;
use crate::payment::PaymentState;
use crate::session::CheckoutSession;

/// Outcome of a guest-code lookup
///
/// `NotFound` covers both a missing guest and a network failure; it is
/// a displayable, recoverable state rather than an error.
#[derive(Debug, Clone)]
pub enum GuestLookup {
    Found(GuestSnapshot),
    NotFound,
    /// Empty input is a no-op, not an error
    Empty,
}

pub struct GuestResolver;

impl GuestResolver {
    /// Resolve a guest by code and hydrate the session
    ///
    /// On success the invoice ledger and appointment linker run as
    /// best-effort side effects; their failures are logged and left for
    /// the payment/offer steps to retry.
    pub async fn resolve_by_code(
        backend: &dyn SpaBackend,
        session: &mut CheckoutSession,
        code: &str,
    ) -> GuestLookup {
        let code = code.trim();
        if code.is_empty() {
            return GuestLookup::Empty;
        }

        let guest = match backend.guest_by_code(code).await {
            Ok(guest) => guest,
            Err(err) => {
                warn!(code, error = %err, "guest lookup failed");
                return GuestLookup::NotFound;
            }
        };

        let snapshot = snapshot_from(&guest);
        info!(guest_id = %snapshot.id, code, "guest resolved");
        session.guest = Some(snapshot.clone());

        if let Err(err) = InvoiceLedger::ensure(backend, session, &guest.id).await {
            warn!(guest_id = %guest.id, error = %err, "invoice ensure failed during guest resolution");
        }
        if let Err(err) = AppointmentLinker::resolve_latest(backend, session, &guest.id).await {
            warn!(guest_id = %guest.id, error = %err, "appointment resolution failed during guest resolution");
        }

        GuestLookup::Found(snapshot)
    }

    /// Clear the guest and everything scoped to it
    ///
    /// Guest, invoice and cart share a session lifetime; the last
    /// confirmed receipt is the only state that survives.
    pub fn clear_guest(session: &mut CheckoutSession) {
        session.guest = None;
        session.invoice_id = None;
        session.invoice_no = None;
        session.appointment_id = None;
        session.appointment_resolved = false;
        session.cart.clear();
        session.sale_id = None;
        session.idempotency_key = None;
        session.payment_state = PaymentState::Idle;
    }
}

fn snapshot_from(guest: &Guest) -> GuestSnapshot {
    GuestSnapshot {
        id: guest.id.clone(),
        code: guest.code.clone(),
        full_name: format!("{} {}", guest.first_name, guest.last_name)
            .trim()
            .to_string(),
        gender: guest.gender.clone(),
        is_minor: guest.is_minor,
        country_code: guest.country_code.clone(),
        local_phone: derive_local_phone(guest.country_code.as_deref(), guest.phone.as_deref()),
        email: guest.email.clone(),
        center_name: guest.center_name.clone(),
    }
}

/// Strip the known country-code prefix from a stored full phone number
fn derive_local_phone(country_code: Option<&str>, phone: Option<&str>) -> Option<String> {
    let phone = phone?.trim();
    if phone.is_empty() {
        return None;
    }
    let digits = phone.trim_start_matches('+');

    if let Some(cc) = country_code {
        let cc = cc.trim().trim_start_matches('+');
        if !cc.is_empty() {
            if let Some(local) = digits.strip_prefix(cc) {
                let local = local.trim_start();
                if !local.is_empty() {
                    return Some(local.to_string());
                }
            }
        }
    }

    Some(digits.to_string())
}
