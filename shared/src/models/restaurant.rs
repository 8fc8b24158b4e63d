//! Restaurant Model

use serde::{Deserialize, Serialize};

use super::menu::MenuInput;

/// Default category for restaurants submitted without one
pub const DEFAULT_CATEGORY: &str = "기타";

/// Restaurant entity as returned to the client
///
/// `price`, `rate`, `like_count` and `review_count` are caches derived
/// from the menu, review and like tabs.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Restaurant {
    pub id: String,
    pub name: String,
    pub category: String,
    /// Split from the comma-joined `tag` column
    pub tags: Vec<String>,
    /// Location label
    pub location: String,
    /// Map link attached to the location cell (empty when none)
    #[serde(rename = "mapUrl")]
    pub map_url: String,
    pub signature_menu: String,
    /// Average menu price
    pub price: i64,
    /// Average rating, one decimal
    pub rate: f64,
    pub like_count: i64,
    pub review_count: i64,
    pub enabled: bool,
    /// ISO 8601, `null` when the stored value cannot be parsed
    pub created_at: Option<String>,
    pub updated_at: Option<String>,
}

/// Add / update restaurant payload
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct RestaurantForm {
    /// Required for update, ignored on create
    #[serde(default)]
    pub id: Option<String>,
    #[serde(default)]
    pub name: String,
    #[serde(default)]
    pub category: Option<String>,
    #[serde(default)]
    pub tags: Option<Vec<String>>,
    /// When present the restaurant's menu rows are overwritten
    #[serde(default)]
    pub menus: Option<Vec<MenuInput>>,
}

impl RestaurantForm {
    /// Category with the default applied
    pub fn category_or_default(&self) -> String {
        match self.category.as_deref().map(str::trim) {
            Some(c) if !c.is_empty() => c.to_string(),
            _ => DEFAULT_CATEGORY.to_string(),
        }
    }

    /// Tags joined the way the `tag` column stores them
    pub fn joined_tags(&self) -> String {
        self.tags.as_deref().map(|t| t.join(",")).unwrap_or_default()
    }

    /// Label of the first menu flagged as signature
    pub fn signature_name(&self) -> Option<String> {
        self.menus
            .as_deref()?
            .iter()
            .find(|m| m.is_signature)
            .map(|m| m.name.clone())
    }
}
