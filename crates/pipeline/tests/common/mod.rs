#![allow(dead_code)]

use std::collections::{HashMap, HashSet};
use std::sync::{Arc, Mutex};

use async_trait::async_trait;
use serde_json::{json, Value};
use tokio::sync::Semaphore;

use showcase_client::{CatalogSource, DataApiError};
use showcase_core::item::Item;
use showcase_core::media::{MediaAsset, MediaCollection};
use showcase_core::order::Order;
use showcase_core::types::RecordId;
use showcase_core::version::Version;

pub const BASE_URL: &str = "https://catalog.test";

/// In-memory catalog that records every call.
#[derive(Default)]
pub struct FakeCatalog {
    pub orders: Vec<Order>,
    pub items: Vec<Item>,
    pub versions: Mutex<Vec<Version>>,
    pub media: HashMap<(RecordId, MediaCollection), Vec<MediaAsset>>,
    pub failing_media: HashSet<(RecordId, MediaCollection)>,
    /// Calls (by method name) that answer with a 500.
    pub failing: HashSet<&'static str>,
    pub retailer_users: HashMap<RecordId, RecordId>,
    pub user_logos: HashMap<RecordId, String>,
    /// Media fetches for these versions wait for a permit.
    pub media_gates: HashMap<RecordId, Arc<Semaphore>>,
    calls: Mutex<Vec<String>>,
}

impl FakeCatalog {
    pub fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }

    pub fn count(&self, method: &str) -> usize {
        self.calls().iter().filter(|c| c.as_str() == method).count()
    }

    pub fn gate(&mut self, version_id: RecordId) -> Arc<Semaphore> {
        let gate = Arc::new(Semaphore::new(0));
        self.media_gates.insert(version_id, Arc::clone(&gate));
        gate
    }

    pub fn set_media(&mut self, version_id: RecordId, collection: MediaCollection, assets: Vec<MediaAsset>) {
        self.media.insert((version_id, collection), assets);
    }

    fn record(&self, method: &'static str) -> Result<(), DataApiError> {
        self.calls.lock().unwrap().push(method.to_string());
        if self.failing.contains(method) {
            return Err(server_error());
        }
        Ok(())
    }
}

fn server_error() -> DataApiError {
    DataApiError::Status {
        status: 500,
        body: "Internal Server Error".to_string(),
    }
}

#[async_trait]
impl CatalogSource for FakeCatalog {
    fn media_base_url(&self) -> &str {
        BASE_URL
    }

    async fn find_order(&self, po: &str) -> Result<Option<Order>, DataApiError> {
        self.record("find_order")?;
        Ok(self
            .orders
            .iter()
            .find(|o| o.po_no.as_deref() == Some(po))
            .cloned())
    }

    async fn find_retailer_user_id(&self, retailer_id: RecordId) -> Result<Option<RecordId>, DataApiError> {
        self.record("find_retailer_user_id")?;
        Ok(self.retailer_users.get(&retailer_id).copied())
    }

    async fn find_user_logo(&self, user_id: RecordId) -> Result<Option<String>, DataApiError> {
        self.record("find_user_logo")?;
        Ok(self.user_logos.get(&user_id).cloned())
    }

    async fn list_order_items(&self, po: &str) -> Result<Vec<Item>, DataApiError> {
        self.record("list_order_items")?;
        Ok(self
            .items
            .iter()
            .filter(|i| i.po_number() == Some(po))
            .cloned()
            .collect())
    }

    async fn get_item(&self, item_id: RecordId) -> Result<Option<Item>, DataApiError> {
        self.record("get_item")?;
        Ok(self.items.iter().find(|i| i.id == item_id).cloned())
    }

    /// Answers with every stored version so callers must do the join.
    async fn list_item_versions(&self, _item_number: &str) -> Result<Vec<Version>, DataApiError> {
        self.record("list_item_versions")?;
        Ok(self.versions.lock().unwrap().clone())
    }

    async fn list_order_versions(&self, _po: &str) -> Result<Vec<Version>, DataApiError> {
        self.record("list_order_versions")?;
        Ok(self.versions.lock().unwrap().clone())
    }

    async fn list_version_media(
        &self,
        version_id: RecordId,
        collection: MediaCollection,
    ) -> Result<Vec<MediaAsset>, DataApiError> {
        self.record("list_version_media")?;
        if let Some(gate) = self.media_gates.get(&version_id) {
            let _permit = gate.acquire().await.unwrap();
        }
        if self.failing_media.contains(&(version_id, collection)) {
            return Err(server_error());
        }
        Ok(self
            .media
            .get(&(version_id, collection))
            .cloned()
            .unwrap_or_default())
    }
}

// ---------------------------------------------------------------------------
// Record builders
// ---------------------------------------------------------------------------

fn from_json<T: serde::de::DeserializeOwned>(value: Value) -> T {
    serde_json::from_value(value).unwrap()
}

pub fn order(id: RecordId, po: &str) -> Order {
    from_json(json!({
        "id": id,
        "po_no": po,
        "retailer_id": 4,
        "retailer": { "id": 4, "retailer_name": "Brilliant & Co" }
    }))
}

pub fn item(id: RecordId, po: &str, number: &str, created_at: &str) -> Item {
    from_json(json!({
        "id": id,
        "item_name": format!("Item {id}"),
        "po_i_no": number,
        "fkb_orders_to_items": po,
        "createdAt": created_at
    }))
}

pub fn version(id: RecordId, item_number: &str, number: i64) -> Version {
    from_json(json!({
        "id": id,
        "version_number": number,
        "metal_type": "18k",
        "v_i_fk": { "po_i_no": item_number }
    }))
}

pub fn asset(id: RecordId, url: &str, mimetype: &str) -> MediaAsset {
    from_json(json!({ "id": id, "url": url, "mimetype": mimetype }))
}

/// Order 48213 with two items; the older item (11) has versions 1, 3, 2
/// and the newer (12) has a single version. Version 103 (the newest of
/// item 11) has a CAD image, a reference image and a reference video.
pub fn standard_catalog() -> FakeCatalog {
    let mut catalog = FakeCatalog {
        orders: vec![order(1, "48213")],
        items: vec![
            item(12, "48213", "48213-2", "2024-03-02T10:00:00Z"),
            item(11, "48213", "48213-1", "2024-03-01T10:00:00Z"),
        ],
        versions: Mutex::new(vec![
            version(101, "48213-1", 1),
            version(103, "48213-1", 3),
            version(102, "48213-1", 2),
            version(201, "48213-2", 1),
            version(301, "48213-10", 9),
        ]),
        ..Default::default()
    };
    catalog.retailer_users.insert(4, 9);
    catalog
        .user_logos
        .insert(9, format!("{BASE_URL}/storage/uploads/logo.png"));
    catalog.set_media(
        103,
        MediaCollection::References,
        vec![
            asset(1, "/storage/uploads/front.jpg", "image/jpeg"),
            asset(2, "/storage/uploads/turn.mp4", "video/mp4"),
        ],
    );
    catalog.set_media(
        103,
        MediaCollection::Cad,
        vec![asset(3, "/storage/uploads/cad.png", "image/png")],
    );
    catalog.set_media(
        102,
        MediaCollection::Sketch,
        vec![asset(4, "/storage/uploads/sketch.png", "image/png")],
    );
    catalog.set_media(
        201,
        MediaCollection::Model3d,
        vec![asset(5, "/storage/uploads/ring.glb", "model/gltf-binary")],
    );
    catalog
}
