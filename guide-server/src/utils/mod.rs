//! Utilities
//!
//! - [`logger`] - tracing subscriber setup
//! - [`text`] - formula-injection escaping for free text
//! - [`time`] - tolerant timestamp parsing
//! - [`validation`] - input validation helpers

pub mod logger;
pub mod text;
pub mod time;
pub mod validation;

pub use shared::{ApiResponse, AppError, AppResult, ErrorCode};
