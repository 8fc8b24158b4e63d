//! Request surface
//!
//! Every function answers HTTP 200 with the `{ success, data, message }`
//! envelope; failures only show up as `success: false`.
//!
//! # Structure
//!
//! - [`health`] - liveness check
//! - [`user`] - caller identity
//! - [`restaurants`] - restaurant CRUD
//! - [`menus`] - menu listing
//! - [`reviews`] - review CRUD
//! - [`likes`] - per-user likes

mod call;
pub mod middleware;

pub mod health;
pub mod likes;
pub mod menus;
pub mod restaurants;
pub mod reviews;
pub mod user;

use axum::Router;
use axum::middleware as axum_middleware;
use http::{HeaderName, HeaderValue};
use tower_http::compression::CompressionLayer;
use tower_http::cors::CorsLayer;
use tower_http::request_id::{
    MakeRequestId, PropagateRequestIdLayer, RequestId, SetRequestIdLayer,
};
use tower_http::trace::TraceLayer;
use uuid::Uuid;

use crate::core::ServerState;

pub(crate) use call::{ApiCall, json_body, params};

const REQUEST_ID_HEADER: &str = "x-request-id";

#[derive(Clone)]
struct XRequestId;

impl MakeRequestId for XRequestId {
    fn make_request_id<B>(&mut self, _request: &http::Request<B>) -> Option<RequestId> {
        HeaderValue::from_str(&Uuid::new_v4().to_string())
            .ok()
            .map(RequestId::new)
    }
}

/// Every route, without middleware or state
pub fn build_router() -> Router<ServerState> {
    Router::new()
        .merge(health::router())
        .merge(user::router())
        .merge(restaurants::router())
        .merge(menus::router())
        .merge(reviews::router())
        .merge(likes::router())
}

/// Fully layered application, used by the server and the router tests
pub fn build_app(state: ServerState) -> Router {
    build_router()
        .layer(CorsLayer::permissive())
        .layer(CompressionLayer::new())
        .layer(axum_middleware::from_fn(middleware::log_request))
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::new(
            HeaderName::from_static(REQUEST_ID_HEADER),
            XRequestId,
        ))
        .layer(PropagateRequestIdLayer::new(HeaderName::from_static(
            REQUEST_ID_HEADER,
        )))
        .with_state(state)
}
