//! Menu service
//!
//! A restaurant's menu is overwritten in place: submitted entries reuse the
//! restaurant's existing rows by position, surplus rows are soft-deleted
//! and missing rows are appended.

use std::sync::Arc;

use shared::models::{Menu, MenuInput};
use shared::util::{generate_id, now, to_iso};
use shared::AppResult;

use crate::sheets::{
    CellValue, MENU_SHEET, Record, SheetStore, fetch_or_create, fetch_or_empty,
};
use crate::utils::text::{escape_for_sheet, unescape_from_sheet};

/// Header written when the menu tab has to be created
pub const MENU_HEADERS: [&str; 8] = [
    "id",
    "restaurant_id",
    "name",
    "price",
    "is_signature",
    "enabled",
    "created_at",
    "updated_at",
];

#[derive(Clone)]
pub struct MenuService {
    store: Arc<dyn SheetStore>,
}

impl MenuService {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    /// All enabled menu items
    pub async fn list_all(&self) -> AppResult<Vec<Menu>> {
        let table = fetch_or_empty(self.store.as_ref(), MENU_SHEET).await?;
        Ok(table
            .records()
            .filter(Record::is_enabled)
            .map(|r| menu_from_record(&r))
            .collect())
    }

    /// Enabled menu items of one restaurant, in sheet order
    pub async fn list_by_restaurant(&self, restaurant_id: &str) -> AppResult<Vec<Menu>> {
        let mut menus = self.list_all().await?;
        menus.retain(|m| m.restaurant_id == restaurant_id);
        Ok(menus)
    }

    /// Overwrite a restaurant's menu rows and return the average price
    pub async fn reconcile(&self, restaurant_id: &str, menus: &[MenuInput]) -> AppResult<i64> {
        let store = self.store.as_ref();
        let table = fetch_or_create(store, MENU_SHEET, &MENU_HEADERS).await?;

        let existing_rows: Vec<usize> = table
            .records()
            .filter(|r| r.text("restaurant_id") == restaurant_id)
            .map(|r| r.grid_row())
            .collect();
        let submitted: Vec<&MenuInput> = menus.iter().filter(|m| m.has_name()).collect();
        let stamp = to_iso(&now());

        let mut updates = Vec::new();

        // Reuse existing rows in order
        for (&row, menu) in existing_rows.iter().zip(&submitted) {
            updates.extend(table.cell_update(row, "name", escape_for_sheet(&menu.name)));
            updates.extend(table.cell_update(row, "price", clamp_price(menu.price)));
            updates.extend(table.cell_update(row, "enabled", true));
            updates.extend(table.cell_update(row, "updated_at", stamp.as_str()));
            updates.extend(table.cell_update(row, "is_signature", menu.is_signature));
        }

        // Disable rows beyond the submitted list
        for &row in existing_rows.iter().skip(submitted.len()) {
            updates.extend(table.cell_update(row, "enabled", false));
            updates.extend(table.cell_update(row, "updated_at", stamp.as_str()));
            updates.extend(table.cell_update(row, "is_signature", false));
        }

        // Append entries that had no row to reuse
        let new_rows: Vec<Vec<CellValue>> = submitted
            .iter()
            .skip(existing_rows.len())
            .map(|menu| {
                table.layout_row(&[
                    ("id", generate_id().into()),
                    ("restaurant_id", restaurant_id.into()),
                    ("name", escape_for_sheet(&menu.name).into()),
                    ("price", clamp_price(menu.price).into()),
                    ("is_signature", menu.is_signature.into()),
                    ("enabled", true.into()),
                    ("created_at", stamp.as_str().into()),
                    ("updated_at", stamp.as_str().into()),
                ])
            })
            .collect();

        tracing::debug!(
            restaurant_id = %restaurant_id,
            reused = existing_rows.len().min(submitted.len()),
            disabled = existing_rows.len().saturating_sub(submitted.len()),
            appended = new_rows.len(),
            "Reconciling menu rows"
        );

        if !updates.is_empty() {
            store.update_cells(MENU_SHEET, updates).await?;
        }
        if !new_rows.is_empty() {
            store.append_rows(MENU_SHEET, new_rows).await?;
        }

        Ok(average_price(menus))
    }
}

/// Mean of the positive prices of named entries, rounded; 0 when none qualify
pub fn average_price(menus: &[MenuInput]) -> i64 {
    let prices: Vec<f64> = menus
        .iter()
        .filter(|m| m.has_name())
        .filter_map(|m| m.price)
        .filter(|p| *p > 0.0)
        .collect();
    if prices.is_empty() {
        return 0;
    }
    (prices.iter().sum::<f64>() / prices.len() as f64).round() as i64
}

/// Negative or missing prices are stored as 0
fn clamp_price(price: Option<f64>) -> f64 {
    price.filter(|p| *p >= 0.0).unwrap_or(0.0)
}

fn menu_from_record(r: &Record<'_>) -> Menu {
    Menu {
        id: r.text("id"),
        restaurant_id: r.text("restaurant_id"),
        name: unescape_from_sheet(&r.text("name")),
        price: r.get("price").number_or_zero().round() as i64,
        is_signature: r.get("is_signature").flag(),
    }
}
