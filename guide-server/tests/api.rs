//! Router tests: every function is driven through the full middleware
//! stack against the in-memory row store.

use std::sync::Arc;

use axum::Router;
use axum::body::Body;
use http::{Request, StatusCode};
use http_body_util::BodyExt;
use serde_json::{Value, json};
use tower::ServiceExt;

use guide_server::api::build_app;
use guide_server::core::config::DEFAULT_IDENTITY_HEADER;
use guide_server::{Config, MemorySheetStore, ServerState};

const ADMIN: &str = "admin@example.com";
const ALICE: &str = "alice@example.com";
const BOB: &str = "bob@example.com";

fn app() -> Router {
    let state = ServerState::with_store(
        Config::in_memory(&[ADMIN]),
        Arc::new(MemorySheetStore::new()),
    );
    build_app(state)
}

async fn send(app: &Router, request: Request<Body>) -> (StatusCode, Value) {
    let response = app.clone().oneshot(request).await.unwrap();
    let status = response.status();
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    (status, serde_json::from_slice(&bytes).unwrap())
}

async fn get(app: &Router, uri: &str, user: Option<&str>) -> Value {
    let mut builder = Request::get(uri);
    if let Some(email) = user {
        builder = builder.header(DEFAULT_IDENTITY_HEADER, format!("accounts.google.com:{email}"));
    }
    let (status, body) = send(app, builder.body(Body::empty()).unwrap()).await;
    assert_eq!(status, StatusCode::OK);
    body
}

async fn post(app: &Router, uri: &str, user: Option<&str>, payload: Value) -> Value {
    let mut builder = Request::post(uri).header("content-type", "application/json");
    if let Some(email) = user {
        builder = builder.header(DEFAULT_IDENTITY_HEADER, format!("accounts.google.com:{email}"));
    }
    let request = builder.body(Body::from(payload.to_string())).unwrap();
    let (status, body) = send(app, request).await;
    assert_eq!(status, StatusCode::OK);
    body
}

#[tokio::test]
async fn test_health() {
    let app = app();
    let body = get(&app, "/health", None).await;
    assert_eq!(body["status"], "ok");
    assert_eq!(body["backend"], "memory");
}

#[tokio::test]
async fn test_current_user() {
    let app = app();

    let body = get(&app, "/api/getCurrentUser", None).await;
    assert_eq!(
        body,
        json!({"success": true, "data": {"email": "", "isAdmin": false}, "message": null})
    );

    let body = get(&app, "/api/getCurrentUser", Some("Admin@Example.com")).await;
    assert_eq!(body["data"]["email"], "Admin@Example.com");
    assert_eq!(body["data"]["isAdmin"], true);
}

#[tokio::test]
async fn test_restaurant_review_like_flow() {
    let app = app();

    // Empty store reads as empty lists
    let body = get(&app, "/api/getRestaurants", None).await;
    assert_eq!(body["data"], json!([]));

    let body = post(
        &app,
        "/api/addRestaurant",
        Some(ADMIN),
        json!({
            "name": "-Minus Cafe",
            "tags": ["coffee", "dessert"],
            "menus": [
                {"name": "Latte", "price": "5000", "is_signature": true},
                {"name": "Cake", "price": 7000},
                {"name": "", "price": 99999}
            ]
        }),
    )
    .await;
    assert_eq!(body["success"], true, "{body}");
    assert_eq!(body["message"], "Restaurant added");
    assert_eq!(body["data"]["price"], 6000);
    assert_eq!(body["data"]["signature_menu"], "Latte");
    assert_eq!(body["data"]["category"], "기타");
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let body = get(&app, &format!("/api/getRestaurantMenus?restaurantId={id}"), None).await;
    assert_eq!(body["data"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"][0]["name"], "Latte");

    // Review from Alice drives the cached rating
    let body = post(
        &app,
        "/api/addReview",
        Some(ALICE),
        json!({"restaurant_id": id, "rate": "4", "comment": "=good", "user_name": "Alice"}),
    )
    .await;
    assert_eq!(body["success"], true, "{body}");
    assert_eq!(body["data"]["user_email"], ALICE);
    let review_id = body["data"]["id"].as_str().unwrap().to_string();

    let body = get(&app, "/api/getAllReviews", None).await;
    assert_eq!(body["data"]["reviews"][0]["comment"], "=good");
    assert_eq!(body["data"]["reviewCountMap"][&id], 1);

    let body = get(&app, "/api/getRestaurants", None).await;
    let restaurant = &body["data"][0];
    assert_eq!(restaurant["name"], "-Minus Cafe");
    assert_eq!(restaurant["rate"], 4.0);
    assert_eq!(restaurant["review_count"], 1);

    // Bob may not delete Alice's review
    let body = post(&app, "/api/deleteReview", Some(BOB), json!({"id": review_id})).await;
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);

    // Likes
    let body = post(&app, "/api/toggleLike", Some(BOB), json!({"id": id})).await;
    assert_eq!(body["data"]["liked"], true);
    assert_eq!(body["message"], "Like added");

    let body = get(&app, "/api/getUserLikes", Some(BOB)).await;
    assert_eq!(body["data"], json!([id]));

    let body = get(&app, "/api/getRestaurants", None).await;
    assert_eq!(body["data"][0]["like_count"], 1);

    let body = post(&app, "/api/toggleLike", Some(BOB), json!({"id": id})).await;
    assert_eq!(body["data"]["liked"], false);
    assert_eq!(body["message"], "Like removed");

    // Alice can delete her own review; the rating falls back to 0
    let body = post(&app, "/api/deleteReview", Some(ALICE), json!({"id": review_id})).await;
    assert_eq!(body["success"], true, "{body}");
    let body = get(&app, "/api/getRestaurants", None).await;
    assert_eq!(body["data"][0]["rate"], 0.0);
    assert_eq!(body["data"][0]["review_count"], 0);

    // Soft delete hides the restaurant
    let body = post(&app, "/api/deleteRestaurant", Some(ADMIN), json!({"id": id})).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["message"], "Restaurant deleted");
    let body = get(&app, "/api/getRestaurants", None).await;
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_update_restaurant() {
    let app = app();
    let body = post(&app, "/api/addRestaurant", None, json!({"name": "Old Name"})).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let body = post(
        &app,
        "/api/updateRestaurant",
        None,
        json!({"id": id, "name": "New Name", "category": "양식"}),
    )
    .await;
    assert_eq!(body["success"], true, "{body}");
    assert_eq!(body["message"], "Restaurant updated");

    let body = get(&app, "/api/getRestaurants", None).await;
    assert_eq!(body["data"][0]["name"], "New Name");
    assert_eq!(body["data"][0]["category"], "양식");

    let body = post(
        &app,
        "/api/updateRestaurant",
        None,
        json!({"id": "missing", "name": "X"}),
    )
    .await;
    assert_eq!(body["success"], false);
    assert_eq!(body["message"], "Restaurant not found");
}

#[tokio::test]
async fn test_list_failures_carry_empty_arrays() {
    let app = app();

    let body = get(&app, "/api/getRestaurantMenus", None).await;
    assert_eq!(
        body,
        json!({"success": false, "data": [], "message": "restaurantId is required"})
    );

    let body = get(&app, "/api/getUserLikes", None).await;
    assert_eq!(body["success"], true);
    assert_eq!(body["data"], json!([]));
}

#[tokio::test]
async fn test_rejections_use_the_envelope() {
    let app = app();

    let request = Request::post("/api/addReview")
        .header("content-type", "application/json")
        .body(Body::from("{not json"))
        .unwrap();
    let (status, body) = send(&app, request).await;
    assert_eq!(status, StatusCode::OK);
    assert_eq!(body["success"], false);
    assert_eq!(body["data"], Value::Null);

    let body = post(
        &app,
        "/api/addReview",
        Some(ALICE),
        json!({"restaurant_id": "r1", "rate": 9, "comment": "hi", "user_name": "A"}),
    )
    .await;
    assert_eq!(body["success"], false);
    assert!(!body["message"].as_str().unwrap().is_empty());

    let body = post(&app, "/api/toggleLike", None, json!({"id": "r1"})).await;
    assert_eq!(body["success"], false);
}
