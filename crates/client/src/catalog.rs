//! The catalog lookups the resolution pipeline depends on.

use async_trait::async_trait;
use serde::Deserialize;

use showcase_core::item::Item;
use showcase_core::media::{resolve_url, MediaAsset, MediaCollection};
use showcase_core::order::Order;
use showcase_core::types::{non_empty, RecordId};
use showcase_core::version::Version;

use crate::api::{DataApi, DataApiError};
use crate::filter::Filter;
use crate::query::ListQuery;

/// Read-only access to orders, items, versions and their media.
///
/// `Ok(None)` / an empty list means the backend answered but had no
/// matching rows; `Err` means the call itself failed.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    /// Host that relative attachment URLs resolve against.
    fn media_base_url(&self) -> &str;

    /// The order with purchase order number `po`, with its retailer and
    /// associate appended.
    async fn find_order(&self, po: &str) -> Result<Option<Order>, DataApiError>;

    /// The most recently updated user that represents `retailer_id`
    /// (has a company set).
    async fn find_retailer_user_id(
        &self,
        retailer_id: RecordId,
    ) -> Result<Option<RecordId>, DataApiError>;

    /// Absolute URL of the first retailer logo uploaded for `user_id`.
    async fn find_user_logo(&self, user_id: RecordId) -> Result<Option<String>, DataApiError>;

    /// Items of order `po`.
    async fn list_order_items(&self, po: &str) -> Result<Vec<Item>, DataApiError>;

    async fn get_item(&self, item_id: RecordId) -> Result<Option<Item>, DataApiError>;

    /// Versions whose item relation carries `item_number`.
    async fn list_item_versions(&self, item_number: &str) -> Result<Vec<Version>, DataApiError>;

    /// Every version of every item in order `po`, in one query.
    async fn list_order_versions(&self, po: &str) -> Result<Vec<Version>, DataApiError>;

    async fn list_version_media(
        &self,
        version_id: RecordId,
        collection: MediaCollection,
    ) -> Result<Vec<MediaAsset>, DataApiError>;
}

// ---------------------------------------------------------------------------
// HTTP implementation
// ---------------------------------------------------------------------------

const ITEMS_PAGE_SIZE: u32 = 100;
const ITEM_VERSIONS_PAGE_SIZE: u32 = 100;
const ORDER_VERSIONS_PAGE_SIZE: u32 = 200;
const RETAILER_USERS_PAGE_SIZE: u32 = 20;

#[derive(Debug, Deserialize)]
struct UserRow {
    id: RecordId,
}

#[derive(Debug, Deserialize)]
struct UserLogo {
    #[serde(default)]
    retailer_logo: Option<Vec<MediaAsset>>,
}

/// [`CatalogSource`] backed by the live data API.
#[derive(Debug, Clone)]
pub struct HttpCatalog {
    api: DataApi,
}

impl HttpCatalog {
    pub fn new(api: DataApi) -> Self {
        Self { api }
    }

    pub fn api(&self) -> &DataApi {
        &self.api
    }
}

#[async_trait]
impl CatalogSource for HttpCatalog {
    fn media_base_url(&self) -> &str {
        self.api.base_url()
    }

    async fn find_order(&self, po: &str) -> Result<Option<Order>, DataApiError> {
        let query = ListQuery::new()
            .page_size(1)
            .page(1)
            .append("associate")
            .append("retailer")
            .filter(Filter::eq("po_no", po));
        let orders: Vec<Order> = self.api.list("orders", &query).await?;
        tracing::debug!(po = %po, found = !orders.is_empty(), "Order lookup");
        Ok(orders.into_iter().next())
    }

    async fn find_retailer_user_id(
        &self,
        retailer_id: RecordId,
    ) -> Result<Option<RecordId>, DataApiError> {
        let query = ListQuery::new()
            .page_size(RETAILER_USERS_PAGE_SIZE)
            .page(1)
            .sort("-updatedAt")
            .filter(Filter::and([
                Filter::eq("retailer_id", retailer_id),
                Filter::not_empty("company"),
            ]));
        let users: Vec<UserRow> = self.api.list("users", &query).await?;
        Ok(users.first().map(|u| u.id))
    }

    async fn find_user_logo(&self, user_id: RecordId) -> Result<Option<String>, DataApiError> {
        let user: Option<UserLogo> = self.api.get("users", user_id, &[]).await?;
        let logo = user
            .and_then(|u| u.retailer_logo)
            .and_then(|logos| logos.into_iter().next());
        Ok(logo.and_then(|logo| {
            non_empty(logo.url.as_deref()).map(|url| resolve_url(self.api.base_url(), url))
        }))
    }

    async fn list_order_items(&self, po: &str) -> Result<Vec<Item>, DataApiError> {
        let query = ListQuery::new()
            .page_size(ITEMS_PAGE_SIZE)
            .page(1)
            .sort("createdAt")
            .append("order_id")
            .filter(Filter::eq("order_id.po_no", po));
        let items: Vec<Item> = self.api.list("items", &query).await?;
        tracing::debug!(po = %po, count = items.len(), "Order items fetched");
        Ok(items)
    }

    async fn get_item(&self, item_id: RecordId) -> Result<Option<Item>, DataApiError> {
        self.api.get("items", item_id, &["order_id"]).await
    }

    async fn list_item_versions(&self, item_number: &str) -> Result<Vec<Version>, DataApiError> {
        let query = ListQuery::new()
            .page_size(ITEM_VERSIONS_PAGE_SIZE)
            .page(1)
            .sort("-updatedAt")
            .append("v_i_fk")
            .filter(Filter::eq("v_i_fk.po_i_no", item_number));
        let versions: Vec<Version> = self.api.list("versions", &query).await?;
        tracing::debug!(item_number = %item_number, count = versions.len(), "Item versions fetched");
        Ok(versions)
    }

    async fn list_order_versions(&self, po: &str) -> Result<Vec<Version>, DataApiError> {
        let query = ListQuery::new()
            .page_size(ORDER_VERSIONS_PAGE_SIZE)
            .page(1)
            .sort("-updatedAt")
            .sort("-fkb_items_and_versions")
            .append("v_i_fk")
            .filter(Filter::eq("v_i_fk.order_id.po_no", po));
        self.api.list("versions", &query).await
    }

    async fn list_version_media(
        &self,
        version_id: RecordId,
        collection: MediaCollection,
    ) -> Result<Vec<MediaAsset>, DataApiError> {
        self.api
            .list_association("versions", version_id, collection.association())
            .await
    }
}
