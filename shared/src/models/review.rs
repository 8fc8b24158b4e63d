//! Review Model

use std::collections::BTreeMap;

use serde::{Deserialize, Serialize};

use super::serde_helpers::loose_f64;

/// Review entity
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Review {
    pub id: String,
    pub restaurant_id: String,
    /// 1..=5
    pub rate: i64,
    pub comment: String,
    pub user_name: String,
    /// Author identity, stamped from the session
    pub user_email: String,
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Add / update review payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct ReviewForm {
    /// Required for update
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub restaurant_id: Option<String>,
    #[serde(default, deserialize_with = "loose_f64")]
    pub rate: Option<f64>,
    #[serde(default)]
    pub comment: Option<String>,
    #[serde(default)]
    pub user_name: Option<String>,
}

/// `getAllReviews` payload
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct ReviewList {
    /// Newest first
    pub reviews: Vec<Review>,
    /// Enabled review count per restaurant id
    #[serde(rename = "reviewCountMap")]
    pub review_count_map: BTreeMap<String, i64>,
}
