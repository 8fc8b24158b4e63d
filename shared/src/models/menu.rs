//! Menu Model

use serde::{Deserialize, Serialize};

use super::serde_helpers::{bool_false, loose_f64};

/// Menu item entity (one row of the `menu` tab)
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Menu {
    pub id: String,
    pub restaurant_id: String,
    pub name: String,
    pub price: i64,
    pub is_signature: bool,
}

/// Submitted menu entry (part of a restaurant form)
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct MenuInput {
    #[serde(default)]
    pub name: String,
    #[serde(default, deserialize_with = "loose_f64")]
    pub price: Option<f64>,
    #[serde(default, deserialize_with = "bool_false")]
    pub is_signature: bool,
}

impl MenuInput {
    /// Entries with a blank name are ignored everywhere
    pub fn has_name(&self) -> bool {
        !self.name.trim().is_empty()
    }
}
