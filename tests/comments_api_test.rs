mod common;

use common::TestApp;
use serde_json::json;
use stockflow_api::services::{items::CreateItemInput, locations::CreateLocationInput};
use uuid::Uuid;

async fn seed(app: &TestApp) -> (Uuid, Uuid) {
    let item = app
        .state
        .services
        .items
        .create(CreateItemInput {
            name: "Sony Alpha a7S III".to_string(),
            brand: "Sony".to_string(),
            model: "ILCE7SM3".to_string(),
            category: "Camera".to_string(),
            min_stock_threshold: 2,
            tags: vec![],
            image_url: "https://example.com/a7s3.jpg".to_string(),
            description: String::new(),
        })
        .await
        .expect("create item");

    let location = app
        .state
        .services
        .locations
        .create(CreateLocationInput {
            name: "Main Warehouse".to_string(),
            kind: stockflow_api::entities::LocationKind::Warehouse,
            parent_id: None,
            address: None,
            contact_info: None,
        })
        .await
        .expect("create location");

    (item.id, location.id)
}

#[tokio::test]
async fn comment_create_attributes_the_default_user() {
    let app = TestApp::new().await;
    let (item_id, _) = seed(&app).await;

    let (status, body) = app
        .post(
            "/api/v1/comments",
            json!({
                "entity_type": "ITEM",
                "entity_id": item_id,
                "text": "Lens cap missing on one unit.",
            }),
        )
        .await;

    assert_eq!(status, axum::http::StatusCode::CREATED);
    assert_eq!(body["data"]["entity_type"], "ITEM");
    assert_eq!(body["data"]["author_name"], "System Admin");
}

#[tokio::test]
async fn listing_filters_to_one_entity_newest_first() {
    let app = TestApp::new().await;
    let (item_id, location_id) = seed(&app).await;

    for text in ["first", "second"] {
        let (status, _) = app
            .post(
                "/api/v1/comments",
                json!({ "entity_type": "ITEM", "entity_id": item_id, "text": text }),
            )
            .await;
        assert_eq!(status, axum::http::StatusCode::CREATED);
        // CreatedAt ordering needs distinct timestamps on SQLite.
        tokio::time::sleep(std::time::Duration::from_millis(5)).await;
    }
    let (status, _) = app
        .post(
            "/api/v1/comments",
            json!({ "entity_type": "LOCATION", "entity_id": location_id, "text": "Door code changed" }),
        )
        .await;
    assert_eq!(status, axum::http::StatusCode::CREATED);

    let (status, body) = app
        .get(&format!(
            "/api/v1/comments?entity_type=ITEM&entity_id={}",
            item_id
        ))
        .await;
    assert_eq!(status, axum::http::StatusCode::OK);
    let comments = body["data"].as_array().unwrap();
    assert_eq!(comments.len(), 2);
    assert_eq!(comments[0]["text"], "second");
    assert_eq!(comments[1]["text"], "first");
    assert!(comments
        .iter()
        .all(|c| c["entity_id"] == json!(item_id.to_string())));

    // Unfiltered listing sees all three.
    let (_, body) = app.get("/api/v1/comments").await;
    assert_eq!(body["data"].as_array().unwrap().len(), 3);
}

#[tokio::test]
async fn half_specified_filter_is_rejected() {
    let app = TestApp::new().await;
    let (status, body) = app.get("/api/v1/comments?entity_type=ITEM").await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    assert!(body["message"]
        .as_str()
        .unwrap()
        .contains("must be provided together"));
}

#[tokio::test]
async fn commenting_a_missing_entity_is_not_found() {
    let app = TestApp::new().await;
    seed(&app).await;

    let (status, _) = app
        .post(
            "/api/v1/comments",
            json!({
                "entity_type": "MOVEMENT",
                "entity_id": Uuid::new_v4(),
                "text": "ghost",
            }),
        )
        .await;
    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn empty_text_is_rejected() {
    let app = TestApp::new().await;
    let (item_id, _) = seed(&app).await;

    let (status, _) = app
        .post(
            "/api/v1/comments",
            json!({ "entity_type": "ITEM", "entity_id": item_id, "text": "" }),
        )
        .await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
}

#[tokio::test]
async fn delete_removes_the_comment() {
    let app = TestApp::new().await;
    let (item_id, _) = seed(&app).await;

    let (_, body) = app
        .post(
            "/api/v1/comments",
            json!({ "entity_type": "ITEM", "entity_id": item_id, "text": "temp" }),
        )
        .await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app.delete(&format!("/api/v1/comments/{}", id)).await;
    assert_eq!(status, axum::http::StatusCode::OK);

    let (_, body) = app
        .get(&format!(
            "/api/v1/comments?entity_type=ITEM&entity_id={}",
            item_id
        ))
        .await;
    assert!(body["data"].as_array().unwrap().is_empty());

    let (status, _) = app.delete(&format!("/api/v1/comments/{}", id)).await;
    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
}
