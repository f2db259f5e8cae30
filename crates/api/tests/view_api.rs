//! Integration tests for the order, item and summary endpoints.

mod common;

use std::sync::Arc;

use axum::http::StatusCode;
use common::{body_json, build_test_app, catalog, get, post_json};
use serde_json::json;

// ---------------------------------------------------------------------------
// Order view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn order_view_renders_oldest_item_and_newest_version() {
    let app = build_test_app(Arc::new(catalog()));

    let response = get(app, "/api/v1/orders/48213/view").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["phase"]["status"], "ready");
    assert_eq!(data["active_item_id"], 11);
    assert_eq!(data["current_version_id"], 102);
    assert_eq!(data["active_tab"], "cad");

    let page = &data["page"];
    assert_eq!(page["retailer_name"], "Brilliant & Co");
    assert_eq!(page["retailer_logo_url"], "https://catalog.test/storage/uploads/logo.png");
    assert_eq!(page["item_title"], "Solitaire Ring");
    assert_eq!(page["version_label"], "Version 2");
    assert_eq!(page["images"][0]["url"], "https://catalog.test/storage/uploads/photo.jpg");

    let cad_tab = &page["tabs"][1];
    assert_eq!(cad_tab["tab"], "cad");
    assert_eq!(cad_tab["active"], true);
    assert_eq!(cad_tab["media"][0]["url"], "https://catalog.test/storage/uploads/cad.png");
    assert_eq!(cad_tab["media"][0]["kind"], "image");

    let fields = page["version_fields"].as_array().unwrap();
    assert!(fields.contains(&json!({ "label": "Metal Type", "value": "18k White Gold" })));
}

#[tokio::test]
async fn unknown_order_returns_404_error() {
    let catalog = Arc::new(catalog());
    let app = build_test_app(Arc::clone(&catalog));

    let response = get(app, "/api/v1/orders/99999/view").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let json = body_json(response).await;
    assert_eq!(json["code"], "NOT_FOUND");
    assert_eq!(catalog.count("list_order_items"), 0);
}

#[tokio::test]
async fn order_without_versions_returns_not_found_view() {
    let app = build_test_app(Arc::new(catalog()));

    let response = get(app, "/api/v1/orders/50000/view").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);

    let data = &body_json(response).await["data"];
    assert_eq!(
        data["phase"],
        json!({ "status": "not_found", "redirect_after_secs": 10 })
    );
    assert_eq!(data["active_item_id"], 31);
}

#[tokio::test]
async fn backend_failure_returns_502() {
    let mut failing = catalog();
    failing.failing.insert("list_order_items");
    let app = build_test_app(Arc::new(failing));

    let response = get(app, "/api/v1/orders/48213/view").await;
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let json = body_json(response).await;
    assert_eq!(json["code"], "BAD_GATEWAY");
    assert!(json["error"].as_str().unwrap().contains("upstream unavailable"));
}

#[tokio::test]
async fn query_parameters_switch_item_and_tab() {
    let app = build_test_app(Arc::new(catalog()));

    let response = get(app, "/api/v1/orders/48213/view?item_id=12&tab=sketch").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["active_item_id"], 12);
    assert_eq!(data["current_version_id"], 201);
    assert_eq!(data["active_tab"], "sketch");
    assert_eq!(data["tab_pinned"], true);
}

#[tokio::test]
async fn query_parameter_selects_older_version() {
    let app = build_test_app(Arc::new(catalog()));

    let response = get(app, "/api/v1/orders/48213/view?version_id=101").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["current_version_id"], 101);
    assert_eq!(data["media"]["cads"], json!([]));
    assert_eq!(data["cursor"]["cads"], 0);
}

#[tokio::test]
async fn selecting_an_empty_tab_is_rejected() {
    let app = build_test_app(Arc::new(catalog()));

    let response = get(app, "/api/v1/orders/48213/view?tab=sketch").await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "VALIDATION_ERROR");
}

#[tokio::test]
async fn selecting_a_foreign_version_is_404() {
    let app = build_test_app(Arc::new(catalog()));

    let response = get(app, "/api/v1/orders/48213/view?version_id=201").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

// ---------------------------------------------------------------------------
// Item view
// ---------------------------------------------------------------------------

#[tokio::test]
async fn item_view_resolves_single_item() {
    let catalog = Arc::new(catalog());
    let app = build_test_app(Arc::clone(&catalog));

    let response = get(app, "/api/v1/items/12/view").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["lookup"], json!({ "kind": "item_id", "value": 12 }));
    assert_eq!(data["items"].as_array().unwrap().len(), 1);
    assert_eq!(data["active_tab"], "sketch");
    assert_eq!(data["page"]["retailer_name"], "Brilliant & Co");
    assert_eq!(catalog.count("get_item"), 1);
}

#[tokio::test]
async fn unknown_item_returns_404_error() {
    let app = build_test_app(Arc::new(catalog()));

    let response = get(app, "/api/v1/items/404/view").await;
    assert_eq!(response.status(), StatusCode::NOT_FOUND);
    assert_eq!(body_json(response).await["code"], "NOT_FOUND");
}

#[tokio::test]
async fn posted_navigation_state_skips_item_and_version_fetches() {
    let catalog = Arc::new(catalog());
    let app = build_test_app(Arc::clone(&catalog));
    let navigation = json!({
        "item": { "id": 11, "item_name": "Solitaire Ring", "po_i_no": "48213-1", "fkb_orders_to_items": "48213" },
        "versions": [
            { "id": 101, "version_number": 1 },
            { "id": 102, "version_number": 2 }
        ]
    });

    let response = post_json(app, "/api/v1/items/11/view", navigation).await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["current_version_id"], 102);
    assert_eq!(catalog.count("get_item"), 0);
    assert_eq!(catalog.count("list_item_versions"), 0);
}

#[tokio::test]
async fn posted_navigation_for_another_item_is_rejected() {
    let app = build_test_app(Arc::new(catalog()));

    let response = post_json(app, "/api/v1/items/11/view", json!({ "item": { "id": 12 } })).await;
    assert_eq!(response.status(), StatusCode::BAD_REQUEST);
    assert_eq!(body_json(response).await["code"], "BAD_REQUEST");
}

// ---------------------------------------------------------------------------
// Order summary
// ---------------------------------------------------------------------------

#[tokio::test]
async fn order_summary_lists_items_with_versions() {
    let app = build_test_app(Arc::new(catalog()));

    let response = get(app, "/api/v1/orders/48213/items").await;
    assert_eq!(response.status(), StatusCode::OK);

    let data = &body_json(response).await["data"];
    assert_eq!(data["order"]["po_no"], "48213");
    let items = data["items"].as_array().unwrap();
    assert_eq!(items.len(), 2);
    assert_eq!(items[0]["item"]["id"], 11);
    assert_eq!(items[0]["versions"][0]["id"], 102);
    assert_eq!(items[1]["versions"].as_array().unwrap().len(), 1);
}
