//! Request payloads shared by several functions

use serde::{Deserialize, Serialize};

/// Single-id payload (`deleteRestaurant`, `deleteReview`, `toggleLike`)
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IdRequest {
    #[serde(default)]
    pub id: String,
}

/// `getRestaurantMenus` query
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantMenusQuery {
    #[serde(rename = "restaurantId", default)]
    pub restaurant_id: String,
}
