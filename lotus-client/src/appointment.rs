//! Appointment linking
//!
//! Promotional sales must reference an appointment; only the guest's
//! most recent one matters. The winner (or its absence) is cached for
//! the session.

use chrono::{DateTime, FixedOffset};
use shared::models::AppointmentRef;
use tracing::debug;

use crate::error::CheckoutResult;
use crate::http::SpaBackend;
use crate::session::CheckoutSession;

pub struct AppointmentLinker;

impl AppointmentLinker {
    /// Resolve the guest's latest appointment id
    ///
    /// Latest by `updated_at` desc, then `created_at` desc, then
    /// `appointment_date` desc; missing or unparseable timestamps sort
    /// earliest. A guest without appointments resolves to `None`, which
    /// is a valid cached state rather than an error.
    pub async fn resolve_latest(
        backend: &dyn SpaBackend,
        session: &mut CheckoutSession,
        guest_id: &str,
    ) -> CheckoutResult<Option<String>> {
        if session.appointment_resolved {
            debug!(guest_id, appointment_id = ?session.appointment_id, "appointment cache hit");
            return Ok(session.appointment_id.clone());
        }

        let appointments = backend.guest_appointments(guest_id).await?;
        let winner = latest(&appointments).map(|a| a.id.clone());

        debug!(guest_id, appointment_id = ?winner, count = appointments.len(), "appointment resolved");
        session.appointment_id = winner.clone();
        session.appointment_resolved = true;
        Ok(winner)
    }

    /// Drop the cached result so the next resolution re-fetches
    pub fn invalidate(session: &mut CheckoutSession) {
        session.appointment_id = None;
        session.appointment_resolved = false;
    }
}

fn latest(appointments: &[AppointmentRef]) -> Option<&AppointmentRef> {
    appointments
        .iter()
        .max_by_key(|a| (ts(&a.updated_at), ts(&a.created_at), ts(&a.appointment_date)))
}

/// None sorts before any parsed timestamp, so missing fields lose ties
fn ts(value: &Option<String>) -> Option<DateTime<FixedOffset>> {
    value
        .as_deref()
        .and_then(|v| DateTime::parse_from_rfc3339(v).ok())
}
