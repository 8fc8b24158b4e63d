//! Menu API Handlers

use axum::extract::rejection::QueryRejection;
use axum::extract::{Query, State};
use shared::models::Menu;
use shared::request::RestaurantMenusQuery;
use shared::{ApiResponse, AppError};

use crate::api::{ApiCall, params};
use crate::core::ServerState;

/// GET /api/getRestaurantMenus?restaurantId=
pub async fn by_restaurant(
    State(state): State<ServerState>,
    query: Result<Query<RestaurantMenusQuery>, QueryRejection>,
) -> ApiResponse<Vec<Menu>> {
    let call = match &query {
        Ok(Query(q)) => ApiCall::start_with(
            "getRestaurantMenus",
            &params(&[("restaurant_id", q.restaurant_id.as_str())]),
        ),
        Err(_) => ApiCall::start("getRestaurantMenus"),
    };
    let result = match query.map_err(|e| AppError::invalid_request(e.body_text())) {
        Ok(Query(q)) => state.restaurants().menus(&q.restaurant_id).await,
        Err(e) => Err(e),
    };
    call.finish_list(result, None)
}

/// GET /api/getAllMenus
pub async fn list(State(state): State<ServerState>) -> ApiResponse<Vec<Menu>> {
    let call = ApiCall::start("getAllMenus");
    call.finish_list(state.menus().list_all().await, None)
}
