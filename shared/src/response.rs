//! API Response types
//!
//! The backend wraps every JSON body in a success/data/error envelope.

use serde::{Deserialize, Serialize};

/// Unified API response envelope
///
/// All backend responses follow this format:
/// ```json
/// {
///     "success": true,
///     "data": { ... },
///     "error": null
/// }
/// ```
#[derive(Debug, Serialize, Deserialize)]
pub struct ApiResponse<T> {
    /// Whether the request succeeded
    pub success: bool,
    /// Response data (present on success)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Error message (present on failure)
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a successful response
    pub fn ok(data: T) -> Self {
        Self {
            success: true,
            data: Some(data),
            error: None,
        }
    }

    /// Create an error response
    pub fn error(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            error: Some(message.into()),
        }
    }

    /// Unwrap the envelope into the carried data or the reported error
    pub fn into_result(self) -> Result<T, String> {
        if self.success {
            self.data
                .ok_or_else(|| "missing data in successful response".to_string())
        } else {
            Err(self.error.unwrap_or_else(|| "unknown error".to_string()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_decode_success_envelope() {
        let body = r#"{"success":true,"data":{"id":"abc"}}"#;

        #[derive(Deserialize)]
        struct Payload {
            id: String,
        }

        let resp: ApiResponse<Payload> = serde_json::from_str(body).unwrap();
        let payload = resp.into_result().unwrap();
        assert_eq!(payload.id, "abc");
    }

    #[test]
    fn test_decode_error_envelope() {
        let body = r#"{"success":false,"error":"guest not found"}"#;
        let resp: ApiResponse<()> = serde_json::from_str(body).unwrap();
        assert_eq!(resp.into_result().unwrap_err(), "guest not found");
    }

    #[test]
    fn test_success_without_data_is_an_error() {
        let body = r#"{"success":true}"#;
        let resp: ApiResponse<String> = serde_json::from_str(body).unwrap();
        assert!(resp.into_result().is_err());
    }
}
