//! Shared response envelope for API handlers.
//!
//! Every response, success or failure, has the shape
//! `{ "success", "message", "data"?, "total"?, "error_code"?, "details"? }`.
//! Use [`ApiResponse`] instead of ad-hoc `serde_json::json!` bodies.

use serde::Serialize;

/// Standard response envelope.
///
/// # Example
///
/// ```ignore
/// Ok(Json(ApiResponse::ok("Material found", material)))
/// ```
#[derive(Debug, Serialize)]
pub struct ApiResponse<T: Serialize = ()> {
    pub success: bool,
    pub message: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub data: Option<T>,
    /// Item count, set by list endpoints only.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub total: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub error_code: Option<&'static str>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub details: Option<serde_json::Value>,
}

impl<T: Serialize> ApiResponse<T> {
    /// Successful response carrying `data`.
    pub fn ok(message: impl Into<String>, data: T) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: Some(data),
            total: None,
            error_code: None,
            details: None,
        }
    }

    pub fn with_total(mut self, total: usize) -> Self {
        self.total = Some(total);
        self
    }
}

impl ApiResponse {
    /// Successful response with no payload.
    pub fn message(message: impl Into<String>) -> Self {
        Self {
            success: true,
            message: message.into(),
            data: None,
            total: None,
            error_code: None,
            details: None,
        }
    }

    /// Failure response.
    pub fn error(
        error_code: &'static str,
        message: impl Into<String>,
        details: Option<serde_json::Value>,
    ) -> Self {
        Self {
            success: false,
            message: message.into(),
            data: None,
            total: None,
            error_code: Some(error_code),
            details,
        }
    }
}
