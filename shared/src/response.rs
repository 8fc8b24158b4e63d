//! API Response types
//!
//! Every request function answers with the same envelope:
//! ```json
//! {
//!     "success": true,
//!     "data": { ... },
//!     "message": "Restaurant added"
//! }
//! ```
//! On failure `success` is false, `data` is `null` (or `[]` for list
//! functions) and `message` carries the human-readable reason.

use serde::{Deserialize, Serialize};

use crate::error::AppResult;

/// Unified API response structure
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct ApiResponse<T> {
    /// Whether the call succeeded
    pub success: bool,
    /// Response data (`null` when absent)
    pub data: Option<T>,
    /// Human-readable message (`null` when absent)
    pub message: Option<String>,
}

impl<T> ApiResponse<T> {
    /// Create a failure response with `data: null`
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: None,
            message: Some(message.into()),
        }
    }

    /// Create a failure response that still carries data
    pub fn failure_with_data(data: T, message: impl Into<String>) -> Self {
        Self {
            success: false,
            data: Some(data),
            message: Some(message.into()),
        }
    }

    /// Fold a service result into the envelope
    pub fn from_result(result: AppResult<T>, message: Option<String>) -> Self {
        match result {
            Ok(data) => Self {
                success: true,
                data: Some(data),
                message,
            },
            Err(err) => Self::failure(err.message),
        }
    }
}

impl<T> ApiResponse<Vec<T>> {
    /// Fold a list result into the envelope; failures carry `data: []`
    pub fn from_list_result(result: AppResult<Vec<T>>, message: Option<String>) -> Self {
        match result {
            Ok(items) => Self {
                success: true,
                data: Some(items),
                message,
            },
            Err(err) => Self::failure_with_data(Vec::new(), err.message),
        }
    }
}

impl<T: Serialize> axum::response::IntoResponse for ApiResponse<T> {
    fn into_response(self) -> axum::response::Response {
        (http::StatusCode::OK, axum::Json(self)).into_response()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::AppError;

    #[test]
    fn test_success_serializes_null_message() {
        let json = serde_json::to_value(ApiResponse::from_result(Ok(vec![1, 2]), None)).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": true, "data": [1, 2], "message": null})
        );
    }

    #[test]
    fn test_failure_serializes_null_data() {
        let resp: ApiResponse<String> = ApiResponse::failure("Restaurant not found");
        let json = serde_json::to_value(resp).unwrap();
        assert_eq!(
            json,
            serde_json::json!({"success": false, "data": null, "message": "Restaurant not found"})
        );
    }

    #[test]
    fn test_list_failure_carries_empty_array() {
        let result: AppResult<Vec<String>> = Err(AppError::storage("sheet unreachable"));
        let resp = ApiResponse::from_list_result(result, None);
        assert!(!resp.success);
        assert_eq!(resp.data, Some(Vec::new()));
        assert_eq!(resp.message.as_deref(), Some("sheet unreachable"));
    }

    #[test]
    fn test_from_result_keeps_success_message() {
        let resp = ApiResponse::from_result(Ok(7), Some("done".to_string()));
        assert!(resp.success);
        assert_eq!(resp.data, Some(7));
        assert_eq!(resp.message.as_deref(), Some("done"));
    }
}
