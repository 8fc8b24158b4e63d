//! Session identity
//!
//! Authentication is done by the platform in front of the server (an
//! identity-aware proxy); the server only reads the asserted email:
//! - [`CurrentUser`] - identity of the caller, possibly anonymous
//! - [`extractor`] - axum extractor reading the identity header

pub mod extractor;
pub mod identity;

pub use identity::{CurrentUser, parse_identity_header};
