//! Order overview: every item of an order with its versions.

use serde::Serialize;

use showcase_client::CatalogSource;
use showcase_core::item::{sort_items_by_creation, Item};
use showcase_core::order::{Order, Retailer};
use showcase_core::version::{sort_versions_desc, versions_for_item, Version};

use crate::error::PipelineError;
use crate::retailer::retailer_logo;

#[derive(Debug, Clone, Serialize)]
pub struct OrderSummary {
    pub order: Order,
    pub retailer: Option<Retailer>,
    pub retailer_logo_url: Option<String>,
    pub items: Vec<ItemSummary>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ItemSummary {
    pub item: Item,
    /// Newest first.
    pub versions: Vec<Version>,
}

impl OrderSummary {
    pub fn version_count(&self) -> usize {
        self.items.iter().map(|i| i.versions.len()).sum()
    }
}

/// Load order `po` with all of its items and their versions.
///
/// Versions come from a single order-wide query and are joined to items
/// by item number. If that query fails the items are listed without
/// versions.
pub async fn summarize_order<S>(source: &S, po: &str) -> Result<OrderSummary, PipelineError>
where
    S: CatalogSource + ?Sized,
{
    let order = source
        .find_order(po)
        .await
        .map_err(PipelineError::backend("order"))?
        .ok_or_else(|| PipelineError::OrderNotFound { po: po.to_string() })?;

    let mut items = source
        .list_order_items(po)
        .await
        .map_err(PipelineError::backend("items"))?;
    sort_items_by_creation(&mut items);

    let versions = match source.list_order_versions(po).await {
        Ok(versions) => versions,
        Err(e) => {
            tracing::warn!(po = %po, error = %e, "Order versions fetch failed");
            Vec::new()
        }
    };

    let items = items
        .into_iter()
        .map(|item| {
            let mut joined: Vec<Version> = versions_for_item(&item, &versions)
                .into_iter()
                .cloned()
                .collect();
            sort_versions_desc(&mut joined);
            ItemSummary {
                item,
                versions: joined,
            }
        })
        .collect();

    let retailer_logo_url = retailer_logo(source, &order).await;
    let summary = OrderSummary {
        retailer: order.retailer.clone(),
        order,
        retailer_logo_url,
        items,
    };
    tracing::info!(
        po = %po,
        items = summary.items.len(),
        versions = summary.version_count(),
        "Order summarized"
    );
    Ok(summary)
}
