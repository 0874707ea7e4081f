//! Appointment Model

use serde::{Deserialize, Serialize};

/// Appointment reference for a guest
///
/// Timestamps are RFC 3339 strings as sent by the backend; any of them
/// may be absent on legacy records.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AppointmentRef {
    pub id: String,
    pub updated_at: Option<String>,
    pub created_at: Option<String>,
    pub appointment_date: Option<String>,
}
