//! Review service
//!
//! Every mutation recomputes the restaurant's cached `rate` and
//! `review_count` from the enabled reviews.

use std::collections::BTreeMap;
use std::sync::Arc;

use chrono::{DateTime, Utc};
use shared::models::{Review, ReviewForm, ReviewList};
use shared::util::{generate_id, now, to_iso};
use shared::{AppError, AppResult, ErrorCode};

use super::RestaurantService;
use crate::auth::CurrentUser;
use crate::sheets::{
    CellUpdate, REVIEW_SHEET, Record, SheetStore, Table, ensure_columns, fetch_or_create,
    fetch_or_empty, fetch_required,
};
use crate::utils::text::{escape_for_sheet, unescape_from_sheet};
use crate::utils::time::{CREATED_FIELDS, created_iso, parse_timestamp, updated_iso};
use crate::utils::validation::{
    MAX_COMMENT_LEN, MAX_NAME_LEN, validate_rating, validate_required_text,
};

/// Header written when the review tab has to be created
pub const REVIEW_HEADERS: [&str; 9] = [
    "id",
    "restaurant_id",
    "rate",
    "comment",
    "user_name",
    "user_email",
    "enabled",
    "created_at",
    "updated_at",
];

#[derive(Clone)]
pub struct ReviewService {
    store: Arc<dyn SheetStore>,
}

impl ReviewService {
    pub fn new(store: Arc<dyn SheetStore>) -> Self {
        Self { store }
    }

    /// Enabled reviews, newest first, plus per-restaurant counts
    pub async fn list(&self) -> AppResult<ReviewList> {
        let table = fetch_or_empty(self.store.as_ref(), REVIEW_SHEET).await?;

        let mut review_count_map = BTreeMap::new();
        let mut dated: Vec<(Option<DateTime<Utc>>, Review)> = table
            .records()
            .filter(Record::is_enabled)
            .map(|r| {
                let review = review_from_record(&r);
                *review_count_map
                    .entry(review.restaurant_id.clone())
                    .or_insert(0) += 1;
                (parse_timestamp(r.first_present(&CREATED_FIELDS)), review)
            })
            .collect();

        // Stable: undated reviews sort last and keep sheet order
        dated.sort_by(|a, b| b.0.cmp(&a.0));

        Ok(ReviewList {
            reviews: dated.into_iter().map(|(_, review)| review).collect(),
            review_count_map,
        })
    }

    pub async fn list_by_restaurant(&self, restaurant_id: &str) -> AppResult<Vec<Review>> {
        let mut reviews = self.list().await?.reviews;
        reviews.retain(|r| r.restaurant_id == restaurant_id);
        Ok(reviews)
    }

    pub async fn create(&self, form: ReviewForm, user: &CurrentUser) -> AppResult<Review> {
        let rate = validate_rating(form.rate)?;
        let restaurant_id = required(form.restaurant_id.as_deref(), "restaurant_id", MAX_NAME_LEN)?;
        let user_name = required(form.user_name.as_deref(), "user_name", MAX_NAME_LEN)?;
        let comment = required(form.comment.as_deref(), "comment", MAX_COMMENT_LEN)?;
        if user.is_anonymous() {
            return Err(AppError::not_authenticated());
        }

        let store = self.store.as_ref();
        let table = fetch_or_create(store, REVIEW_SHEET, &REVIEW_HEADERS).await?;

        let id = generate_id();
        let stamp = to_iso(&now());
        let row = table.layout_row(&[
            ("id", id.as_str().into()),
            ("restaurant_id", restaurant_id.as_str().into()),
            ("rate", rate.into()),
            ("comment", escape_for_sheet(&comment).into()),
            ("user_name", escape_for_sheet(&user_name).into()),
            ("user_email", user.email.as_str().into()),
            ("enabled", true.into()),
            ("created_at", stamp.as_str().into()),
            ("updated_at", stamp.as_str().into()),
        ]);
        store.append_rows(REVIEW_SHEET, vec![row]).await?;
        tracing::info!(review_id = %id, restaurant_id = %restaurant_id, rate, "Review added");

        self.recalculate(&restaurant_id).await?;

        Ok(Review {
            id,
            restaurant_id,
            rate,
            comment,
            user_name,
            user_email: user.email.clone(),
            created_at: Some(stamp.clone()),
            updated_at: Some(stamp),
        })
    }

    /// Rewrite rating and comment; owners and admins only
    pub async fn update(&self, form: ReviewForm, user: &CurrentUser) -> AppResult<Review> {
        let id = required(form.id.as_deref(), "id", MAX_NAME_LEN)?;
        let rate = validate_rating(form.rate)?;
        let comment = required(form.comment.as_deref(), "comment", MAX_COMMENT_LEN)?;

        let store = self.store.as_ref();
        let table = fetch_required(store, REVIEW_SHEET).await?;
        let record = table
            .find("id", &id)
            .filter(Record::is_enabled)
            .ok_or_else(|| review_not_found(&id))?;
        let owner = record.text("user_email");
        if !user.can_modify(&owner) {
            tracing::warn!(review_id = %id, caller = %user.email, "Review update denied");
            return Err(AppError::permission_denied("Only the author or an admin can edit this review"));
        }

        let row = record.grid_row();
        let restaurant_id = record.text("restaurant_id");
        let stamp = to_iso(&now());
        let updates: Vec<CellUpdate> = [
            table.cell_update(row, "rate", rate),
            table.cell_update(row, "comment", escape_for_sheet(&comment)),
            table.cell_update(row, "updated_at", stamp.as_str()),
        ]
        .into_iter()
        .flatten()
        .collect();
        store.update_cells(REVIEW_SHEET, updates).await?;
        tracing::info!(review_id = %id, rate, "Review updated");

        if !restaurant_id.is_empty() {
            self.recalculate(&restaurant_id).await?;
        }

        Ok(Review {
            id,
            restaurant_id,
            rate,
            comment,
            user_name: unescape_from_sheet(&record.text("user_name")),
            user_email: owner,
            created_at: created_iso(&record),
            updated_at: Some(stamp),
        })
    }

    /// Soft delete; owners and admins only, nothing is written otherwise
    pub async fn delete(&self, id: &str, user: &CurrentUser) -> AppResult<()> {
        let id = required(Some(id), "id", MAX_NAME_LEN)?;
        let store = self.store.as_ref();
        let table = fetch_required(store, REVIEW_SHEET).await?;
        let record = table.find("id", &id).ok_or_else(|| review_not_found(&id))?;

        if !user.can_modify(&record.text("user_email")) {
            tracing::warn!(review_id = %id, caller = %user.email, "Review delete denied");
            return Err(AppError::permission_denied("Only the author or an admin can delete this review"));
        }

        let row = record.grid_row();
        let restaurant_id = record.text("restaurant_id");
        let cols = ensure_columns(store, REVIEW_SHEET, &table, &["enabled"]).await?;
        let mut updates = vec![CellUpdate::new(row, cols[0], false)];
        updates.extend(table.cell_update(row, "updated_at", to_iso(&now())));
        store.update_cells(REVIEW_SHEET, updates).await?;
        tracing::info!(review_id = %id, "Review disabled");

        if !restaurant_id.is_empty() {
            self.recalculate(&restaurant_id).await?;
        }
        Ok(())
    }

    /// Recompute and store a restaurant's `review_count` and `rate`
    ///
    /// Returns `(count, rating)`; the rating is the mean of enabled ratings
    /// rounded to one decimal, 0 without reviews.
    pub async fn recalculate(&self, restaurant_id: &str) -> AppResult<(i64, f64)> {
        let table = fetch_or_empty(self.store.as_ref(), REVIEW_SHEET).await?;
        let (count, rating) = rating_of(&table, restaurant_id);

        RestaurantService::new(self.store.clone())
            .set_aggregates(
                restaurant_id,
                &[("review_count", count.into()), ("rate", rating.into())],
            )
            .await?;
        tracing::debug!(restaurant_id = %restaurant_id, count, rating, "Restaurant rating recalculated");
        Ok((count, rating))
    }
}

/// Enabled review count and rounded mean rating for one restaurant
fn rating_of(table: &Table, restaurant_id: &str) -> (i64, f64) {
    let rates: Vec<f64> = table
        .records()
        .filter(|r| r.is_enabled() && r.text("restaurant_id") == restaurant_id)
        .map(|r| r.get("rate").number_or_zero())
        .collect();
    if rates.is_empty() {
        return (0, 0.0);
    }
    let mean = rates.iter().sum::<f64>() / rates.len() as f64;
    (rates.len() as i64, (mean * 10.0).round() / 10.0)
}

/// Non-blank text, kept exactly as submitted
fn required(value: Option<&str>, field: &str, max_len: usize) -> AppResult<String> {
    let value = value.unwrap_or_default();
    validate_required_text(value, field, max_len)?;
    Ok(value.to_string())
}

fn review_not_found(id: &str) -> AppError {
    AppError::new(ErrorCode::ReviewNotFound).with_detail("id", id)
}

fn review_from_record(r: &Record<'_>) -> Review {
    Review {
        id: r.text("id"),
        restaurant_id: r.text("restaurant_id"),
        rate: r.get("rate").number_or_zero().round() as i64,
        comment: unescape_from_sheet(&r.text("comment")),
        user_name: unescape_from_sheet(&r.text("user_name")),
        user_email: r.text("user_email"),
        created_at: created_iso(r),
        updated_at: updated_iso(r),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::services::fixtures::{ADMIN, ALICE, BOB, seeded_store, user};
    use crate::sheets::{CellValue, MemorySheetStore, RESTAURANT_SHEET};

    fn service(store: &MemorySheetStore) -> ReviewService {
        ReviewService::new(Arc::new(store.clone()))
    }

    fn form(restaurant_id: &str, rate: f64, comment: &str) -> ReviewForm {
        ReviewForm {
            restaurant_id: Some(restaurant_id.into()),
            rate: Some(rate),
            comment: Some(comment.into()),
            user_name: Some("Alice".into()),
            ..Default::default()
        }
    }

    async fn aggregates(store: &MemorySheetStore, id: &str) -> (CellValue, CellValue) {
        let table = fetch_required(store, RESTAURANT_SHEET).await.unwrap();
        let r = table.find("id", id).unwrap();
        (r.get("review_count").clone(), r.get("rate").clone())
    }

    #[tokio::test]
    async fn test_list_sorted_newest_first_with_counts() {
        let store = seeded_store();
        let list = service(&store).list().await.unwrap();

        let ids: Vec<_> = list.reviews.iter().map(|r| r.id.as_str()).collect();
        // v2 newer than v1; v4 has no date and sorts last
        assert_eq!(ids, vec!["v2", "v1", "v4"]);
        assert_eq!(list.review_count_map.get("r1"), Some(&2));
        // counted even though r3 itself is disabled
        assert_eq!(list.review_count_map.get("r3"), Some(&1));
        assert_eq!(list.review_count_map.get("r2"), None);
        assert_eq!(list.reviews[0].comment, "-_- meh");
        assert_eq!(list.reviews[2].created_at, None);
    }

    #[tokio::test]
    async fn test_create_recalculates_rating() {
        let store = seeded_store();
        let svc = service(&store);

        let review = svc
            .create(form("r1", 2.0, "=too salty"), &user(ALICE))
            .await
            .unwrap();
        assert_eq!(review.user_email, ALICE);
        assert_eq!(review.comment, "=too salty");

        // 5 + 3 + 2
        let (count, rate) = aggregates(&store, "r1").await;
        assert_eq!(count, CellValue::Number(3.0));
        assert_eq!(rate, CellValue::Number(3.3));

        let stored = svc.list_by_restaurant("r1").await.unwrap();
        assert!(stored.iter().any(|r| r.comment == "=too salty"));
    }

    #[tokio::test]
    async fn test_create_keeps_comment_whitespace() {
        let store = seeded_store();
        let svc = service(&store);

        let review = svc
            .create(form("r1", 4.0, "  crispy edges\n"), &user(ALICE))
            .await
            .unwrap();
        assert_eq!(review.comment, "  crispy edges\n");

        let stored = svc.list_by_restaurant("r1").await.unwrap();
        assert!(stored.iter().any(|r| r.comment == "  crispy edges\n"));
    }

    #[tokio::test]
    async fn test_create_validation() {
        let store = seeded_store();
        let svc = service(&store);

        let err = svc.create(form("r1", 6.0, "hi"), &user(ALICE)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RatingOutOfRange);

        let err = svc.create(form("r1", 4.0, "  "), &user(ALICE)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::RequiredField);

        let err = svc
            .create(form("r1", 4.0, "hi"), &CurrentUser::anonymous())
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::NotAuthenticated);
    }

    #[tokio::test]
    async fn test_update_by_owner() {
        let store = seeded_store();
        let svc = service(&store);

        let updated = svc
            .update(
                ReviewForm {
                    id: Some("v1".into()),
                    rate: Some(1.0),
                    comment: Some("changed my mind".into()),
                    ..Default::default()
                },
                &user(ALICE),
            )
            .await
            .unwrap();
        assert_eq!(updated.user_name, "Alice");
        assert_eq!(updated.restaurant_id, "r1");

        // 1 + 3
        let (_, rate) = aggregates(&store, "r1").await;
        assert_eq!(rate, CellValue::Number(2.0));
    }

    #[tokio::test]
    async fn test_update_by_stranger_is_denied() {
        let store = seeded_store();
        let before = store.grid(REVIEW_SHEET);
        let err = service(&store)
            .update(
                ReviewForm {
                    id: Some("v1".into()),
                    rate: Some(1.0),
                    comment: Some("vandalism".into()),
                    ..Default::default()
                },
                &user(BOB),
            )
            .await
            .unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(store.grid(REVIEW_SHEET), before);
    }

    #[tokio::test]
    async fn test_delete_by_stranger_leaves_store_untouched() {
        let store = seeded_store();
        let reviews_before = store.grid(REVIEW_SHEET);
        let restaurants_before = store.grid(RESTAURANT_SHEET);

        let err = service(&store).delete("v1", &user(BOB)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::PermissionDenied);
        assert_eq!(store.grid(REVIEW_SHEET), reviews_before);
        assert_eq!(store.grid(RESTAURANT_SHEET), restaurants_before);
    }

    #[tokio::test]
    async fn test_admin_delete_recalculates() {
        let store = seeded_store();
        let svc = service(&store);

        svc.delete("v1", &user(ADMIN)).await.unwrap();
        let (count, rate) = aggregates(&store, "r1").await;
        assert_eq!(count, CellValue::Number(1.0));
        assert_eq!(rate, CellValue::Number(3.0));

        svc.delete("v2", &user(BOB)).await.unwrap();
        let (count, rate) = aggregates(&store, "r1").await;
        assert_eq!(count, CellValue::Number(0.0));
        assert_eq!(rate, CellValue::Number(0.0));

        let err = svc.delete("missing", &user(ADMIN)).await.unwrap_err();
        assert_eq!(err.code, ErrorCode::ReviewNotFound);
    }

    #[test]
    fn test_rating_rounds_to_one_decimal() {
        let table = Table::from_grid(vec![
            vec!["restaurant_id".into(), "rate".into(), "enabled".into()],
            vec!["r".into(), 5i64.into(), true.into()],
            vec!["r".into(), 4i64.into(), "TRUE".into()],
            vec!["r".into(), 4i64.into(), true.into()],
            vec!["r".into(), 1i64.into(), false.into()],
            vec!["other".into(), 1i64.into(), true.into()],
        ]);
        assert_eq!(rating_of(&table, "r"), (3, 4.3));
        assert_eq!(rating_of(&table, "none"), (0, 0.0));
    }
}
