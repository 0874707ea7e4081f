//! Guest Model

use serde::{Deserialize, Serialize};

/// Guest entity as returned by the guest-code lookup
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Guest {
    pub id: String,
    pub code: String,
    pub first_name: String,
    pub last_name: String,
    pub gender: Option<String>,
    pub is_minor: bool,
    /// Dialing prefix on file, e.g. "+34"
    pub country_code: Option<String>,
    /// Full phone number including the dialing prefix
    pub phone: Option<String>,
    pub email: Option<String>,
    pub center_name: Option<String>,
}

/// Resolved guest as held by a checkout session (display-ready fields)
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct GuestSnapshot {
    pub id: String,
    pub code: String,
    pub full_name: String,
    pub gender: Option<String>,
    pub is_minor: bool,
    pub country_code: Option<String>,
    /// Phone number with the country prefix stripped
    pub local_phone: Option<String>,
    pub email: Option<String>,
    pub center_name: Option<String>,
}
