//! Identity Extractor
//!
//! Reads the configured identity header on every request. A missing or
//! unreadable header yields an anonymous user rather than a rejection;
//! each operation decides whether it needs an identity.

use std::convert::Infallible;

use axum::{extract::FromRequestParts, http::request::Parts};

use crate::auth::{CurrentUser, parse_identity_header};
use crate::core::ServerState;

impl FromRequestParts<ServerState> for CurrentUser {
    type Rejection = Infallible;

    async fn from_request_parts(
        parts: &mut Parts,
        state: &ServerState,
    ) -> Result<Self, Self::Rejection> {
        if let Some(user) = parts.extensions.get::<CurrentUser>() {
            return Ok(user.clone());
        }

        let email = parts
            .headers
            .get(state.config.identity_header.as_str())
            .and_then(|h| h.to_str().ok())
            .map(parse_identity_header)
            .unwrap_or_default();

        let user = CurrentUser::new(email, &state.config.admin_emails);
        tracing::debug!(email = %user.email, is_admin = user.is_admin, "Resolved caller identity");

        parts.extensions.insert(user.clone());
        Ok(user)
    }
}
