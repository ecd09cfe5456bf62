mod common;

use common::TestApp;
use serde_json::json;

fn sample_item(name: &str) -> serde_json::Value {
    json!({
        "name": name,
        "brand": "Sennheiser",
        "model": "MKH 416",
        "category": "Audio",
        "min_stock_threshold": 3,
        "tags": ["shotgun", "microphone"],
        "image_url": "https://example.com/mkh416.jpg",
        "description": "Industry standard shotgun microphone.",
    })
}

#[tokio::test]
async fn create_then_fetch_item() {
    let app = TestApp::new().await;

    let (status, body) = app.post("/api/v1/items", sample_item("Sennheiser MKH 416")).await;
    assert_eq!(status, axum::http::StatusCode::CREATED);
    let id = body["data"]["id"].as_str().unwrap().to_string();
    assert_eq!(body["data"]["current_stock"], 0);
    assert_eq!(body["data"]["status"], "UNAVAILABLE");
    assert_eq!(body["data"]["tags"], json!(["shotgun", "microphone"]));

    let (status, body) = app.get(&format!("/api/v1/items/{}", id)).await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(body["data"]["name"], "Sennheiser MKH 416");
}

#[tokio::test]
async fn create_rejects_missing_fields_with_detail() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post(
            "/api/v1/items",
            json!({
                "name": "",
                "brand": "Sony",
                "model": "X",
                "category": "Camera",
                "image_url": "not a url",
            }),
        )
        .await;

    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
    let details = body["details"].as_str().unwrap();
    assert!(details.contains("name"));
    assert!(details.contains("image_url"));
}

#[tokio::test]
async fn list_paginates_and_searches() {
    let app = TestApp::new().await;
    for name in ["Alpha Camera", "Beta Mic", "Gamma Cable"] {
        let (status, _) = app.post("/api/v1/items", sample_item(name)).await;
        assert_eq!(status, axum::http::StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/v1/items?page=1&limit=2").await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(body["data"]["items"].as_array().unwrap().len(), 2);
    assert_eq!(body["data"]["total"], 3);
    assert_eq!(body["data"]["total_pages"], 2);

    let (_, body) = app.get("/api/v1/items?search=Mic").await;
    let items = body["data"]["items"].as_array().unwrap();
    assert_eq!(items.len(), 1);
    assert_eq!(items[0]["name"], "Beta Mic");
}

#[tokio::test]
async fn update_cannot_touch_stock() {
    let app = TestApp::new().await;
    let (_, body) = app.post("/api/v1/items", sample_item("Tripod")).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    // current_stock is not an accepted update field; it is derived from the
    // ledger and survives any PUT untouched.
    let (status, body) = app
        .put(
            &format!("/api/v1/items/{}", id),
            json!({ "name": "Tripod 504X", "min_stock_threshold": 4, "current_stock": 99 }),
        )
        .await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(body["data"]["name"], "Tripod 504X");
    assert_eq!(body["data"]["current_stock"], 0);

    let (_, body) = app.get(&format!("/api/v1/items/{}", id)).await;
    assert_eq!(body["data"]["current_stock"], 0);
}

#[tokio::test]
async fn low_stock_lists_items_at_or_below_threshold() {
    let app = TestApp::new().await;
    let (_, ok_item) = app.post("/api/v1/items", sample_item("Well Stocked")).await;
    let (_, low_item) = app.post("/api/v1/items", sample_item("Running Low")).await;

    let ok_id = ok_item["data"]["id"].as_str().unwrap();
    let low_id = low_item["data"]["id"].as_str().unwrap();

    // threshold is 3: stock one to 10 (OK), the other to 2 (LOW)
    for (id, qty) in [(ok_id, 10), (low_id, 2)] {
        let (status, _) = app
            .post(
                "/api/v1/movements",
                json!({ "item_id": id, "type": "IN", "quantity": qty }),
            )
            .await;
        assert_eq!(status, axum::http::StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/v1/items/low-stock").await;
    assert_eq!(status, axum::http::StatusCode::OK);
    let low = body["data"].as_array().unwrap();
    assert_eq!(low.len(), 1);
    assert_eq!(low[0]["id"], low_id);
}

#[tokio::test]
async fn delete_cascades_and_then_404s() {
    let app = TestApp::new().await;
    let (_, body) = app.post("/api/v1/items", sample_item("Short Lived")).await;
    let id = body["data"]["id"].as_str().unwrap().to_string();

    let (status, _) = app.delete(&format!("/api/v1/items/{}", id)).await;
    assert_eq!(status, axum::http::StatusCode::OK);

    let (status, _) = app.get(&format!("/api/v1/items/{}", id)).await;
    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);

    let (status, _) = app.delete(&format!("/api/v1/items/{}", id)).await;
    assert_eq!(status, axum::http::StatusCode::NOT_FOUND);
}

#[tokio::test]
async fn csv_export_contains_header_and_rows() {
    let app = TestApp::new().await;
    let (_, body) = app.post("/api/v1/items", sample_item("Export Me")).await;
    let id = body["data"]["id"].as_str().unwrap();
    let (status, _) = app
        .post(
            "/api/v1/movements",
            json!({ "item_id": id, "type": "IN", "quantity": 7 }),
        )
        .await;
    assert_eq!(status, axum::http::StatusCode::CREATED);

    let (status, csv) = app.get_raw("/api/v1/reports/inventory/export").await;
    assert_eq!(status, axum::http::StatusCode::OK);
    let mut lines = csv.lines();
    assert_eq!(
        lines.next().unwrap(),
        "ID,Name,Brand,Model,Category,Current Stock,Min Threshold,Status"
    );
    let row = lines.next().unwrap();
    assert!(row.contains("\"Export Me\""));
    assert!(row.contains(",7,3,OK"));
}

#[tokio::test]
async fn dashboard_aggregates_stock_and_loans() {
    let app = TestApp::new().await;
    let (_, camera) = app.post("/api/v1/items", sample_item("Camera")).await;
    let (_, mic) = app.post("/api/v1/items", sample_item("Mic")).await;
    let camera_id = camera["data"]["id"].as_str().unwrap();
    let mic_id = mic["data"]["id"].as_str().unwrap();

    for (id, kind, qty) in [
        (camera_id, "IN", 10),
        (mic_id, "IN", 3),
        (camera_id, "OUT", 2),
    ] {
        let (status, _) = app
            .post(
                "/api/v1/movements",
                json!({ "item_id": id, "type": kind, "quantity": qty }),
            )
            .await;
        assert_eq!(status, axum::http::StatusCode::CREATED);
    }

    let (status, body) = app.get("/api/v1/reports/dashboard").await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(body["data"]["total_units"], 11); // 8 cameras + 3 mics
    assert_eq!(body["data"]["low_stock_items"], 1); // mic at threshold
    assert_eq!(body["data"]["active_loans"], 1); // one OUT in last 30 days
    let categories = body["data"]["categories"].as_array().unwrap();
    assert_eq!(categories.len(), 1); // both items share the Audio category
    assert_eq!(categories[0]["units"], 11);
}

#[tokio::test]
async fn assistant_degrades_gracefully_without_api_key() {
    let app = TestApp::new().await;

    let (status, body) = app
        .post("/api/v1/assistant/analyze", json!({ "query": "what is low?" }))
        .await;
    assert_eq!(status, axum::http::StatusCode::OK);
    assert_eq!(
        body["data"]["analysis"],
        "API Key is missing. Please configure the environment variable."
    );

    let (status, _) = app.post("/api/v1/assistant/analyze", json!({ "query": "" })).await;
    assert_eq!(status, axum::http::StatusCode::BAD_REQUEST);
}
