//! Restaurant service

use std::collections::BTreeMap;
use std::sync::Arc;

use shared::models::{Menu, Restaurant, RestaurantForm};
use shared::util::{generate_id, now, to_iso};
use shared::{AppError, AppResult, ErrorCode};

use super::{MenuService, ReviewService, average_price};
use crate::sheets::{
    CellUpdate, CellValue, LIKE_SHEET, RESTAURANT_SHEET, Record, SheetStore, Table,
    ensure_columns, fetch_or_create, fetch_or_empty, fetch_required,
};
use crate::utils::text::{escape_for_sheet, unescape_from_sheet};
use crate::utils::time::{created_iso, updated_iso};
use crate::utils::validation::{
    MAX_NAME_LEN, MAX_TAG_LEN, validate_optional_text, validate_required_text,
};

/// Header written when the restaurant tab has to be created
pub const RESTAURANT_HEADERS: [&str; 13] = [
    "id",
    "name",
    "category",
    "tag",
    "location",
    "signature_menu",
    "price",
    "rate",
    "like_count",
    "review_count",
    "enabled",
    "created_at",
    "updated_at",
];

#[derive(Clone)]
pub struct RestaurantService {
    store: Arc<dyn SheetStore>,
}

impl RestaurantService {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    /// Enabled restaurants with review counts merged in
    pub async fn list(&self) -> AppResult<Vec<Restaurant>> {
        let table = fetch_or_empty(self.store.as_ref(), RESTAURANT_SHEET).await?;

        let review_counts = match ReviewService::new(self.store.clone()).list().await {
            Ok(list) => list.review_count_map,
            Err(e) => {
                tracing::warn!(error = %e, "Review counts unavailable, defaulting to 0");
                BTreeMap::new()
            }
        };

        Ok(table
            .records()
            .filter(Record::is_enabled)
            .map(|r| {
                let mut restaurant = restaurant_from_record(&r);
                restaurant.review_count = review_counts.get(&restaurant.id).copied().unwrap_or(0);
                restaurant
            })
            .collect())
    }

    pub async fn create(&self, form: RestaurantForm) -> AppResult<Restaurant> {
        validate_form(&form)?;
        let store = self.store.as_ref();
        let table = fetch_or_create(store, RESTAURANT_SHEET, &RESTAURANT_HEADERS).await?;

        let id = generate_id();
        let stamp = to_iso(&now());
        let category = form.category_or_default();
        let tags = form.joined_tags();

        let mut price = 0;
        let mut signature = String::new();
        if let Some(menus) = form.menus.as_deref().filter(|m| !m.is_empty()) {
            price = average_price(menus);
            signature = form.signature_name().unwrap_or_default();
            MenuService::new(self.store.clone())
                .reconcile(&id, menus)
                .await?;
        }

        let row = table.layout_row(&[
            ("id", id.as_str().into()),
            ("name", escape_for_sheet(&form.name).into()),
            ("category", escape_for_sheet(&category).into()),
            ("tag", escape_for_sheet(&tags).into()),
            ("signature_menu", escape_for_sheet(&signature).into()),
            ("price", price.into()),
            ("rate", 0i64.into()),
            ("like_count", 0i64.into()),
            ("review_count", 0i64.into()),
            ("enabled", true.into()),
            ("created_at", stamp.as_str().into()),
            ("updated_at", stamp.as_str().into()),
        ]);
        store.append_rows(RESTAURANT_SHEET, vec![row]).await?;
        tracing::info!(restaurant_id = %id, name = %form.name, "Restaurant added");

        Ok(Restaurant {
            id,
            name: form.name.clone(),
            category,
            tags: form.tags.unwrap_or_default(),
            location: String::new(),
            map_url: String::new(),
            signature_menu: signature,
            price,
            rate: 0.0,
            like_count: 0,
            review_count: 0,
            enabled: true,
            created_at: Some(stamp.clone()),
            updated_at: Some(stamp),
        })
    }

    /// Rewrite the editable columns of an existing restaurant
    ///
    /// Submitted menus replace the restaurant's menu rows and drive the
    /// stored price and signature; without menus both are kept.
    pub async fn update(&self, form: RestaurantForm) -> AppResult<Restaurant> {
        let id = form
            .id
            .clone()
            .filter(|id| !id.trim().is_empty())
            .ok_or_else(|| AppError::required("id"))?;
        validate_form(&form)?;

        let store = self.store.as_ref();
        let table = fetch_required(store, RESTAURANT_SHEET).await?;
        let record = find_restaurant(&table, &id)?;
        let row = record.grid_row();

        let (price, signature) = match form.menus.as_deref() {
            Some(menus) => {
                let price = MenuService::new(self.store.clone())
                    .reconcile(&id, menus)
                    .await?;
                (price, form.signature_name().unwrap_or_default())
            }
            None => (
                stored_price(&record),
                unescape_from_sheet(&record.text("signature_menu")),
            ),
        };

        let stamp = to_iso(&now());
        let category = form.category_or_default();
        let tags = form.joined_tags();

        let updates: Vec<CellUpdate> = [
            table.cell_update(row, "name", escape_for_sheet(&form.name)),
            table.cell_update(row, "category", escape_for_sheet(&category)),
            table.cell_update(row, "tag", escape_for_sheet(&tags)),
            table.cell_update(row, "signature_menu", escape_for_sheet(&signature)),
            table.cell_update(row, "price", price),
            table.cell_update(row, "updated_at", stamp.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect();
        store.update_cells(RESTAURANT_SHEET, updates).await?;
        tracing::info!(restaurant_id = %id, "Restaurant updated");

        let (location, map_url) = location_of(&record);
        Ok(Restaurant {
            id,
            name: form.name.clone(),
            category,
            tags: form.tags.unwrap_or_default(),
            location,
            map_url,
            signature_menu: signature,
            price,
            rate: record.get("rate").number_or_zero(),
            like_count: record.get("like_count").number_or_zero() as i64,
            review_count: record.get("review_count").number_or_zero() as i64,
            enabled: true,
            created_at: created_iso(&record),
            updated_at: Some(stamp),
        })
    }

    /// Soft delete: the row stays, `enabled` becomes false
    pub async fn delete(&self, id: &str) -> AppResult<()> {
        if id.trim().is_empty() {
            return Err(AppError::required("id"));
        }
        let store = self.store.as_ref();
        let table = fetch_required(store, RESTAURANT_SHEET).await?;
        let row = find_restaurant(&table, id)?.grid_row();

        let cols = ensure_columns(store, RESTAURANT_SHEET, &table, &["enabled"]).await?;
        let mut updates = vec![CellUpdate::new(row, cols[0], false)];
        updates.extend(table.cell_update(row, "updated_at", to_iso(&now())));
        store.update_cells(RESTAURANT_SHEET, updates).await?;

        tracing::info!(restaurant_id = %id, "Restaurant disabled");
        Ok(())
    }

    /// Enabled menus of one restaurant
    pub async fn menus(&self, restaurant_id: &str) -> AppResult<Vec<Menu>> {
        if restaurant_id.trim().is_empty() {
            return Err(AppError::required("restaurantId"));
        }
        MenuService::new(self.store.clone())
            .list_by_restaurant(restaurant_id)
            .await
    }

    /// Write cached aggregate columns of one restaurant
    ///
    /// Missing columns are appended to the header first. A restaurant
    /// that cannot be found is logged and skipped.
    pub async fn set_aggregates(&self, id: &str, values: &[(&str, CellValue)]) -> AppResult<()> {
        let store = self.store.as_ref();
        let table = fetch_required(store, RESTAURANT_SHEET).await?;

        let Some(record) = table.find("id", id) else {
            tracing::warn!(restaurant_id = %id, "Restaurant row not found, aggregate not stored");
            return Ok(());
        };
        let row = record.grid_row();

        let names: Vec<&str> = values.iter().map(|(name, _)| *name).collect();
        let cols = ensure_columns(store, RESTAURANT_SHEET, &table, &names).await?;

        let mut updates: Vec<CellUpdate> = cols
            .into_iter()
            .zip(values)
            .map(|(col, (_, value))| CellUpdate::new(row, col, value.clone()))
            .collect();
        updates.extend(table.cell_update(row, "updated_at", to_iso(&now())));
        store.update_cells(RESTAURANT_SHEET, updates).await?;
        Ok(())
    }

    /// Recount enabled likes and store `like_count`
    pub async fn recount_likes(&self, id: &str) -> AppResult<i64> {
        let likes = fetch_or_empty(self.store.as_ref(), LIKE_SHEET).await?;
        let count = likes
            .records()
            .filter(|r| r.is_enabled() && r.text("restaurant_id") == id)
            .count() as i64;

        self.set_aggregates(id, &[("like_count", count.into())])
            .await?;
        tracing::debug!(restaurant_id = %id, like_count = count, "Like count updated");
        Ok(count)
    }
}

fn validate_form(form: &RestaurantForm) -> AppResult<()> {
    validate_required_text(&form.name, "name", MAX_NAME_LEN)?;
    validate_optional_text(form.category.as_deref(), "category", MAX_NAME_LEN)?;
    for tag in form.tags.iter().flatten() {
        validate_optional_text(Some(tag), "tag", MAX_TAG_LEN)?;
    }
    Ok(())
}

fn find_restaurant<'a>(table: &'a Table, id: &str) -> AppResult<Record<'a>> {
    table
        .find("id", id)
        .ok_or_else(|| AppError::new(ErrorCode::RestaurantNotFound).with_detail("id", id))
}

fn stored_price(record: &Record<'_>) -> i64 {
    record.get("price").number_or_zero().round() as i64
}

/// Location label and map link; the link comes from the rich cell, or a
/// `mapUrl` column when one exists
fn location_of(record: &Record<'_>) -> (String, String) {
    let cell = record.get("location");
    let map_url = cell
        .link_url()
        .map(str::to_string)
        .unwrap_or_else(|| record.text("mapUrl"));
    (cell.text(), map_url)
}

fn split_tags(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|t| !t.is_empty())
        .map(str::to_string)
        .collect()
}

fn restaurant_from_record(r: &Record<'_>) -> Restaurant {
    let (location, map_url) = location_of(r);
    Restaurant {
        id: r.text("id"),
        name: unescape_from_sheet(&r.text("name")),
        category: unescape_from_sheet(&r.text("category")),
        tags: split_tags(&unescape_from_sheet(&r.text("tag"))),
        location,
        map_url,
        signature_menu: unescape_from_sheet(&r.text("signature_menu")),
        price: stored_price(r),
        rate: r.get("rate").number_or_zero(),
        like_count: r.get("like_count").number_or_zero() as i64,
        review_count: 0,
        enabled: true,
        created_at: created_iso(r),
        updated_at: updated_iso(r),
    }
}
