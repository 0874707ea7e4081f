//! Shared types for the Lotus console
//!
//! Wire models and response structures used by the checkout engine and
//! any front-end embedding it.

pub mod models;
pub mod response;

// Re-exports
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
