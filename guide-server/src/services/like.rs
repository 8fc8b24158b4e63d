//! Like service
//!
//! One row per (restaurant, user) pair; toggling flips `enabled` on that
//! row instead of appending a new one.

use std::sync::Arc;

use shared::models::LikeToggle;
use shared::util::{generate_id, now, to_iso};
use shared::{AppError, AppResult};

use super::RestaurantService;
use crate::auth::CurrentUser;
use crate::sheets::{
    CellUpdate, LIKE_SHEET, SheetStore, ensure_columns, fetch_or_create, fetch_or_empty,
};

/// Header written when the like tab has to be created
pub const LIKE_HEADERS: [&str; 6] = [
    "id",
    "restaurant_id",
    "user_email",
    "enabled",
    "created_at",
    "updated_at",
];

#[derive(Clone)]
pub struct LikeService {
    store: Arc<dyn SheetStore>,
}

impl LikeService {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    /// Restaurant ids the caller currently likes
    pub async fn user_likes(&self, user: &CurrentUser) -> AppResult<Vec<String>> {
        if user.is_anonymous() {
            return Ok(Vec::new());
        }
        let table = fetch_or_empty(self.store.as_ref(), LIKE_SHEET).await?;

        let mut ids: Vec<String> = Vec::new();
        for r in table.records() {
            if !r.is_enabled() || !user.is_owner(&r.text("user_email")) {
                continue;
            }
            let id = r.text("restaurant_id");
            if !id.is_empty() && !ids.contains(&id) {
                ids.push(id);
            }
        }
        Ok(ids)
    }

    /// Flip the caller's like on a restaurant and refresh `like_count`
    pub async fn toggle(&self, restaurant_id: &str, user: &CurrentUser) -> AppResult<LikeToggle> {
        let restaurant_id = restaurant_id.trim();
        if restaurant_id.is_empty() {
            return Err(AppError::required("restaurantId"));
        }
        if user.is_anonymous() {
            return Err(AppError::not_authenticated());
        }

        let store = self.store.as_ref();
        let table = fetch_or_create(store, LIKE_SHEET, &LIKE_HEADERS).await?;
        let stamp = to_iso(&now());

        let existing = table
            .records()
            .find(|r| r.text("restaurant_id") == restaurant_id && user.is_owner(&r.text("user_email")));

        let liked = match existing {
            Some(record) => {
                let liked = !record.is_enabled();
                let row = record.grid_row();
                let cols = ensure_columns(store, LIKE_SHEET, &table, &["enabled"]).await?;
                let mut updates = vec![CellUpdate::new(row, cols[0], liked)];
                updates.extend(table.cell_update(row, "updated_at", stamp.as_str()));
                store.update_cells(LIKE_SHEET, updates).await?;
                liked
            }
            None => {
                let row = table.layout_row(&[
                    ("id", generate_id().into()),
                    ("restaurant_id", restaurant_id.into()),
                    ("user_email", user.email.as_str().into()),
                    ("enabled", true.into()),
                    ("created_at", stamp.as_str().into()),
                    ("updated_at", stamp.as_str().into()),
                ]);
                store.append_rows(LIKE_SHEET, vec![row]).await?;
                true
            }
        };
        tracing::info!(restaurant_id = %restaurant_id, user = %user.email, liked, "Like toggled");

        RestaurantService::new(self.store.clone())
            .recount_likes(restaurant_id)
            .await?;
        Ok(LikeToggle { liked })
    }
}
