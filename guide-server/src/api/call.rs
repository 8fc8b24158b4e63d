//! Per-function logging and envelope folding

use std::time::Instant;

use axum::Json;
use axum::extract::rejection::JsonRejection;
use serde::Serialize;
use serde_json::Value;
use shared::{ApiResponse, AppError, AppResult};

/// One invocation of a named request function
///
/// Logs entry on creation and the outcome when the result is folded into
/// the envelope.
pub(crate) struct ApiCall {
    name: &'static str,
    started: Instant,
}

impl ApiCall {
    pub fn start(name: &'static str) -> Self {
        tracing::info!(function = name, "Call started");
        Self {
            name,
            started: Instant::now(),
        }
    }

    /// Like [`start`](Self::start), with a short parameter summary
    pub fn start_with(name: &'static str, params: &str) -> Self {
        tracing::info!(function = name, params = %params, "Call started");
        Self {
            name,
            started: Instant::now(),
        }
    }

    /// Fold a result into the envelope; failures carry `data: null`
    pub fn finish<T: Serialize>(
        self,
        result: AppResult<T>,
        message: Option<&str>,
    ) -> ApiResponse<T> {
        self.log(&result);
        ApiResponse::from_result(result, message.map(str::to_string))
    }

    /// Fold a list result into the envelope; failures carry `data: []`
    pub fn finish_list<T: Serialize>(
        self,
        result: AppResult<Vec<T>>,
        message: Option<&str>,
    ) -> ApiResponse<Vec<T>> {
        self.log(&result);
        ApiResponse::from_list_result(result, message.map(str::to_string))
    }

    fn log<T: Serialize>(&self, result: &AppResult<T>) {
        let duration_ms = self.started.elapsed().as_millis() as u64;
        match result {
            Ok(data) => tracing::info!(
                function = self.name,
                data = %summarize(data),
                duration_ms,
                "Call succeeded"
            ),
            Err(e) if e.is_system() => tracing::error!(
                function = self.name,
                code = %e.code,
                error = %e,
                duration_ms,
                "Call failed"
            ),
            Err(e) => tracing::warn!(
                function = self.name,
                code = %e.code,
                error = %e,
                duration_ms,
                "Call rejected"
            ),
        }
    }
}

/// `Array(n)`, `Object` or the scalar kind
fn summarize<T: Serialize>(data: &T) -> String {
    match serde_json::to_value(data) {
        Ok(Value::Array(items)) => format!("Array({})", items.len()),
        Ok(Value::Object(_)) => "Object".to_string(),
        Ok(Value::Null) => "null".to_string(),
        Ok(other) => other.to_string(),
        Err(_) => "unserializable".to_string(),
    }
}

/// `key=value` summary for the entry log; blank values are left out
pub(crate) fn params(pairs: &[(&str, &str)]) -> String {
    pairs
        .iter()
        .filter(|(_, value)| !value.trim().is_empty())
        .map(|(key, value)| format!("{key}={value}"))
        .collect::<Vec<_>>()
        .join(" ")
}

/// Unwrap a JSON body, turning a rejection into an envelope failure
pub(crate) fn json_body<T>(payload: Result<Json<T>, JsonRejection>) -> AppResult<T> {
    payload
        .map(|Json(body)| body)
        .map_err(|rejection| AppError::invalid_request(rejection.body_text()))
}
