//! Shared types for the restaurant guide
//!
//! Entity models, request forms, error codes and the
//! `{ success, data, message }` response envelope used by the server
//! and its web client.

pub mod error;
pub mod models;
pub mod request;
pub mod response;
pub mod util;

// Re-exports
pub use error::{AppError, AppResult, ErrorCategory, ErrorCode};
pub use response::ApiResponse;
pub use serde::{Deserialize, Serialize};
