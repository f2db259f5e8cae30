//! Sequential resolution of a lookup into a view.

use std::sync::Arc;

use serde::{Deserialize, Serialize};

use showcase_client::CatalogSource;
use showcase_core::item::Item;
use showcase_core::order::Order;
use showcase_core::types::RecordId;
use showcase_core::version::{versions_for_item, Version};
use showcase_core::view::{Lookup, SelectionTag, ViewState};

use crate::error::PipelineError;
use crate::media::load_version_media;
use crate::retailer::retailer_logo;

/// Records a list page already holds when it links to a detail page.
///
/// Supplied data is used as-is and the matching fetch is skipped.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct NavigationState {
    #[serde(default)]
    pub item: Option<Item>,
    /// Versions of `item` (or of the looked-up item when `item` is absent).
    #[serde(default)]
    pub versions: Option<Vec<Version>>,
}

impl NavigationState {
    /// Supplied versions, if they belong to `item_id`.
    fn versions_for(&self, item_id: Option<RecordId>) -> Option<Vec<Version>> {
        let matches = match &self.item {
            Some(item) => Some(item.id) == item_id,
            None => true,
        };
        if matches {
            self.versions.clone()
        } else {
            None
        }
    }
}

/// Resolves lookups against a [`CatalogSource`].
pub struct OrderResolver<S: ?Sized> {
    source: Arc<S>,
}

impl<S: ?Sized> Clone for OrderResolver<S> {
    fn clone(&self) -> Self {
        Self {
            source: Arc::clone(&self.source),
        }
    }
}

impl<S> OrderResolver<S>
where
    S: CatalogSource + ?Sized,
{
    pub fn new(source: Arc<S>) -> Self {
        Self { source }
    }

    pub fn source(&self) -> &Arc<S> {
        &self.source
    }

    /// Resolve `lookup` into a terminal view.
    ///
    /// Returns `Err` only for fatal failures: the order (for a PO lookup)
    /// or the item (for an item lookup) is missing or could not be
    /// fetched, or the item list / version list call failed. A lookup that
    /// resolves but leaves no item or no version comes back as a view in
    /// the not-found phase.
    pub async fn resolve(
        &self,
        lookup: Lookup,
        navigation: Option<NavigationState>,
    ) -> Result<ViewState, PipelineError> {
        let navigation = navigation.unwrap_or_default();
        let mut state = ViewState::new(lookup.clone());
        tracing::info!(lookup = %lookup, "Resolving view");

        let tag = match &lookup {
            Lookup::PoNumber(po) => self.resolve_po(&mut state, po, &navigation).await?,
            Lookup::ItemId(id) => self.resolve_item(&mut state, *id, &navigation).await?,
        };

        if let Some(tag) = tag {
            let supplied = navigation.versions_for(state.active_item_id);
            load_versions_and_media(self.source.as_ref(), &mut state, tag, supplied).await?;
        }

        state.finish();
        tracing::info!(
            lookup = %lookup,
            item_id = ?state.active_item_id,
            version_id = ?state.current_version_id,
            phase = ?state.phase,
            "View resolved"
        );
        Ok(state)
    }

    // ---- lookups ----

    async fn resolve_po(
        &self,
        state: &mut ViewState,
        po: &str,
        navigation: &NavigationState,
    ) -> Result<Option<SelectionTag>, PipelineError> {
        let order = self
            .source
            .find_order(po)
            .await
            .map_err(PipelineError::backend("order"))?
            .ok_or_else(|| PipelineError::OrderNotFound { po: po.to_string() })?;
        self.attach_order(state, order).await;

        let items = self
            .source
            .list_order_items(po)
            .await
            .map_err(PipelineError::backend("items"))?;
        let mut tag = state.set_items(items);

        if let Some(wanted) = navigation.item.as_ref().map(|i| i.id) {
            if state.active_item_id != Some(wanted) && state.items.iter().any(|i| i.id == wanted) {
                tag = Some(state.begin_item_switch(wanted)?);
            }
        }
        Ok(tag)
    }

    async fn resolve_item(
        &self,
        state: &mut ViewState,
        item_id: RecordId,
        navigation: &NavigationState,
    ) -> Result<Option<SelectionTag>, PipelineError> {
        let supplied = navigation.item.clone().filter(|i| i.id == item_id);
        let item = match supplied {
            Some(item) => item,
            None => self
                .source
                .get_item(item_id)
                .await
                .map_err(PipelineError::backend("item"))?
                .ok_or(PipelineError::ItemNotFound { item_id })?,
        };

        if let Some(po) = item.po_number() {
            match self.source.find_order(po).await {
                Ok(Some(order)) => self.attach_order(state, order).await,
                Ok(None) => tracing::debug!(item_id, po = %po, "Item's order not found"),
                Err(e) => {
                    tracing::warn!(item_id, po = %po, error = %e, "Order lookup for item failed");
                }
            }
        }

        Ok(state.set_items(vec![item]))
    }

    async fn attach_order(&self, state: &mut ViewState, order: Order) {
        let logo = retailer_logo(self.source.as_ref(), &order).await;
        state.set_order(order);
        state.set_retailer_logo(logo);
    }
}

/// Versions of `item` from the backend, restricted to exact item-number
/// matches. An item without an item number has no versions.
pub(crate) async fn fetch_item_versions<S>(
    source: &S,
    item: &Item,
) -> Result<Vec<Version>, PipelineError>
where
    S: CatalogSource + ?Sized,
{
    let Some(number) = item.item_number() else {
        tracing::debug!(item_id = item.id, "Item has no item number");
        return Ok(Vec::new());
    };
    let fetched = source
        .list_item_versions(number)
        .await
        .map_err(PipelineError::backend("versions"))?;
    Ok(versions_for_item(item, &fetched).into_iter().cloned().collect())
}

/// Fill versions and the current version's media for the item selected by
/// `tag`. Completions for a tag that is no longer current are dropped.
///
/// Returns `false` when anything was dropped as stale.
pub(crate) async fn load_versions_and_media<S>(
    source: &S,
    state: &mut ViewState,
    tag: SelectionTag,
    supplied: Option<Vec<Version>>,
) -> Result<bool, PipelineError>
where
    S: CatalogSource + ?Sized,
{
    let versions = match supplied {
        Some(versions) => versions,
        None => match state.active_item().cloned() {
            Some(item) => fetch_item_versions(source, &item).await?,
            None => Vec::new(),
        },
    };

    let Some(media_tag) = state.apply_versions(&tag, versions) else {
        return Ok(false);
    };
    let Some(version_id) = media_tag.version_id else {
        return Ok(true);
    };

    let media = load_version_media(source, version_id).await;
    Ok(state.apply_media(&media_tag, media))
}
