#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use axum::body::Body;
use axum::http::{Method, Request};
use axum::response::Response;
use axum::Router;
use http_body_util::BodyExt;
use serde_json::{json, Value};
use tower::ServiceExt;

use showcase_api::config::ServerConfig;
use showcase_api::router::build_app_router;
use showcase_api::state::AppState;
use showcase_client::{CatalogSource, ClientConfig, DataApiError};
use showcase_core::item::Item;
use showcase_core::media::{MediaAsset, MediaCollection};
use showcase_core::order::Order;
use showcase_core::types::RecordId;
use showcase_core::version::Version;

pub const BASE_URL: &str = "https://catalog.test";

// ---------------------------------------------------------------------------
// Fake catalog
// ---------------------------------------------------------------------------

#[derive(Default)]
pub struct FakeCatalog {
    pub orders: Vec<Order>,
    pub items: Vec<Item>,
    pub versions: Vec<Version>,
    pub media: HashMap<(RecordId, MediaCollection), Vec<MediaAsset>>,
    /// Calls (by method name) that answer with a 503.
    pub failing: HashSet<&'static str>,
    calls: Mutex<Vec<&'static str>>,
}

impl FakeCatalog {
    pub fn count(&self, method: &str) -> usize {
        self.calls.lock().unwrap().iter().filter(|c| **c == method).count()
    }

    fn record(&self, method: &'static str) -> Result<(), DataApiError> {
        self.calls.lock().unwrap().push(method);
        if self.failing.contains(method) {
            return Err(DataApiError::Status {
                status: 503,
                body: "upstream unavailable".to_string(),
            });
        }
        Ok(())
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    fn media_base_url(&self) -> &str {
        BASE_URL
    }

    async fn find_order(&self, po: &str) -> Result<Option<Order>, DataApiError> {
        self.record("find_order")?;
        Ok(self.orders.iter().find(|o| o.po_no.as_deref() == Some(po)).cloned())
    }

    async fn find_retailer_user_id(&self, _retailer_id: RecordId) -> Result<Option<RecordId>, DataApiError> {
        self.record("find_retailer_user_id")?;
        Ok(Some(9))
    }

    async fn find_user_logo(&self, _user_id: RecordId) -> Result<Option<String>, DataApiError> {
        self.record("find_user_logo")?;
        Ok(Some(format!("{BASE_URL}/storage/uploads/logo.png")))
    }

    async fn list_order_items(&self, po: &str) -> Result<Vec<Item>, DataApiError> {
        self.record("list_order_items")?;
        Ok(self.items.iter().filter(|i| i.po_number() == Some(po)).cloned().collect())
    }

    async fn get_item(&self, item_id: RecordId) -> Result<Option<Item>, DataApiError> {
        self.record("get_item")?;
        Ok(self.items.iter().find(|i| i.id == item_id).cloned())
    }

    async fn list_item_versions(&self, item_number: &str) -> Result<Vec<Version>, DataApiError> {
        self.record("list_item_versions")?;
        Ok(self
            .versions
            .iter()
            .filter(|v| v.item_number() == Some(item_number))
            .cloned()
            .collect())
    }

    async fn list_order_versions(&self, _po: &str) -> Result<Vec<Version>, DataApiError> {
        self.record("list_order_versions")?;
        Ok(self.versions.clone())
    }

    async fn list_version_media(
        &self,
        version_id: RecordId,
        collection: MediaCollection,
    ) -> Result<Vec<MediaAsset>, DataApiError> {
        self.record("list_version_media")?;
        Ok(self.media.get(&(version_id, collection)).cloned().unwrap_or_default())
    }
}

fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

/// Order 48213: item 11 (versions 1 and 2, version 2 has a CAD image and
/// a reference photo) and item 12 (one version with a sketch). Order
/// 50000 has an item without versions.
pub fn catalog() -> FakeCatalog {
    let mut media = HashMap::new();
    media.insert(
        (102, MediaCollection::Cad),
        vec![from_json(json!({ "id": 1, "title": "Top view", "url": "/storage/uploads/cad.png", "mimetype": "image/png" }))],
    );
    media.insert(
        (102, MediaCollection::References),
        vec![from_json(json!({ "id": 2, "url": "/storage/uploads/photo.jpg", "mimetype": "image/jpeg" }))],
    );
    media.insert(
        (201, MediaCollection::Sketch),
        vec![from_json(json!({ "id": 3, "url": "/storage/uploads/sketch.png", "mimetype": "image/png" }))],
    );

    FakeCatalog {
        orders: vec![
            from_json(json!({
                "id": 1, "po_no": "48213", "retailer_id": 4,
                "retailer": { "id": 4, "retailer_name": "Brilliant & Co" }
            })),
            from_json(json!({ "id": 2, "po_no": "50000" })),
        ],
        items: vec![
            from_json(json!({
                "id": 11, "item_name": "Solitaire Ring", "po_i_no": "48213-1",
                "fkb_orders_to_items": "48213", "Quantity": 1,
                "createdAt": "2024-03-01T10:00:00Z"
            })),
            from_json(json!({
                "id": 12, "item_name": "Pendant", "po_i_no": "48213-2",
                "fkb_orders_to_items": "48213", "createdAt": "2024-03-02T10:00:00Z"
            })),
            from_json(json!({ "id": 31, "po_i_no": "50000-1", "fkb_orders_to_items": "50000" })),
        ],
        versions: vec![
            from_json(json!({ "id": 101, "version_number": 1, "v_i_fk": { "po_i_no": "48213-1" } })),
            from_json(json!({
                "id": 102, "version_number": 2, "version_name": "Final",
                "metal_type1": "18k White Gold", "v_i_fk": { "po_i_no": "48213-1" }
            })),
            from_json(json!({ "id": 201, "version_number": 1, "v_i_fk": { "po_i_no": "48213-2" } })),
        ],
        media,
        ..Default::default()
    }
}

// ---------------------------------------------------------------------------
// App helpers
// ---------------------------------------------------------------------------

/// Build a test `ServerConfig` with safe defaults.
pub fn test_config() -> ServerConfig {
    ServerConfig {
        host: "127.0.0.1".to_string(),
        port: 0,
        cors_origins: vec!["http://localhost:5173".to_string()],
        request_timeout_secs: 30,
        catalog: ClientConfig::new(BASE_URL, "test-token"),
    }
}

/// Build the full application router over `catalog`.
pub fn build_test_app(catalog: Arc<FakeCatalog>) -> Router {
    let config = test_config();
    let state = AppState::new(catalog, config.clone());
    build_app_router(state, &config)
}

pub async fn get(app: Router, uri: &str) -> Response {
    let request = Request::builder()
        .method(Method::GET)
        .uri(uri)
        .body(Body::empty())
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn post_json(app: Router, uri: &str, body: Value) -> Response {
    let request = Request::builder()
        .method(Method::POST)
        .uri(uri)
        .header("content-type", "application/json")
        .body(Body::from(body.to_string()))
        .unwrap();
    app.oneshot(request).await.unwrap()
}

pub async fn body_json(response: Response) -> Value {
    let bytes = response.into_body().collect().await.unwrap().to_bytes();
    serde_json::from_slice(&bytes).unwrap()
}
