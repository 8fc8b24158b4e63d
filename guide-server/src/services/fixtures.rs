//! Shared seed data for the service tests

use shared::models::MenuInput;

use crate::auth::CurrentUser;
use crate::sheets::{
    CellValue, LIKE_SHEET, MENU_SHEET, MemorySheetStore, RESTAURANT_SHEET, REVIEW_SHEET,
};

pub const ALICE: &str = "alice@example.com";
pub const BOB: &str = "bob@example.com";
pub const ADMIN: &str = "admin@example.com";

/// Caller resolved against an admin list containing only [`ADMIN`]
pub fn user(email: &str) -> CurrentUser {
    CurrentUser::new(email, &[ADMIN.to_string()])
}

pub fn menu_input(name: &str, price: Option<f64>) -> MenuInput {
    MenuInput {
        name: name.to_string(),
        price,
        is_signature: false,
    }
}

fn header(names: &[&str]) -> Vec<CellValue> {
    names.iter().map(|n| CellValue::from(*n)).collect()
}

/// Three restaurants (r3 disabled), four menu rows, four reviews and two likes
pub fn seeded_store() -> MemorySheetStore {
    let store = MemorySheetStore::new();

    store.insert_sheet(
        RESTAURANT_SHEET,
        vec![
            header(&[
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
            ]),
            vec![
                "r1".into(),
                "'+Plus Kitchen".into(),
                "한식".into(),
                "noodles, late night".into(),
                CellValue::Link {
                    text: "Gangnam Station".into(),
                    url: "https://maps.example/r1".into(),
                },
                "'=Special".into(),
                12000i64.into(),
                4i64.into(),
                1i64.into(),
                2i64.into(),
                true.into(),
                45413i64.into(),
                45413i64.into(),
            ],
            vec![
                "r2".into(),
                "Noodle Bar".into(),
                "분식".into(),
                "".into(),
                "Hongdae".into(),
                "".into(),
                8000i64.into(),
                0i64.into(),
                0i64.into(),
                0i64.into(),
                "TRUE".into(),
            ],
            vec![
                "r3".into(),
                "Closed Place".into(),
                "기타".into(),
                "".into(),
                "".into(),
                "".into(),
                0i64.into(),
                4i64.into(),
                0i64.into(),
                1i64.into(),
                false.into(),
            ],
        ],
    );

    store.insert_sheet(
        MENU_SHEET,
        vec![
            header(&[
                "id",
                "restaurant_id",
                "name",
                "price",
                "is_signature",
                "enabled",
                "created_at",
                "updated_at",
            ]),
            vec![
                "m1".into(),
                "r1".into(),
                "'=Special".into(),
                12000i64.into(),
                "TRUE".into(),
                true.into(),
            ],
            vec![
                "m2".into(),
                "r1".into(),
                "Noodle".into(),
                "abc".into(),
                false.into(),
                "TRUE".into(),
            ],
            vec![
                "m3".into(),
                "r1".into(),
                "Old".into(),
                5000i64.into(),
                false.into(),
                false.into(),
            ],
            vec![
                "m4".into(),
                "r2".into(),
                "Pasta".into(),
                15000i64.into(),
                false.into(),
                true.into(),
            ],
        ],
    );

    store.insert_sheet(
        REVIEW_SHEET,
        vec![
            header(&[
                "id",
                "restaurant_id",
                "rate",
                "comment",
                "user_name",
                "user_email",
                "enabled",
                "created_at",
                "updated_at",
            ]),
            vec![
                "v1".into(),
                "r1".into(),
                5i64.into(),
                "Great broth".into(),
                "Alice".into(),
                ALICE.into(),
                true.into(),
                45413i64.into(),
            ],
            vec![
                "v2".into(),
                "r1".into(),
                3i64.into(),
                "'-_- meh".into(),
                "Bob".into(),
                BOB.into(),
                true.into(),
                "2024-06-01T10:00:00Z".into(),
            ],
            vec![
                "v3".into(),
                "r1".into(),
                1i64.into(),
                "deleted".into(),
                "Bob".into(),
                BOB.into(),
                false.into(),
                "2024-07-01T10:00:00Z".into(),
            ],
            vec![
                "v4".into(),
                "r3".into(),
                4i64.into(),
                "undated".into(),
                "Carol".into(),
                "carol@example.com".into(),
                true.into(),
            ],
        ],
    );

    store.insert_sheet(
        LIKE_SHEET,
        vec![
            header(&[
                "id",
                "restaurant_id",
                "user_email",
                "enabled",
                "created_at",
                "updated_at",
            ]),
            vec!["l1".into(), "r1".into(), ALICE.into(), true.into()],
            vec!["l2".into(), "r2".into(), BOB.into(), false.into()],
        ],
    );

    store
}
