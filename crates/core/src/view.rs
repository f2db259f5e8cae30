//! Serializable view state for the item detail page.
//!
//! The state is only changed through the transition methods below. Any
//! transition that starts a fetch (switching item or version) returns a
//! [`SelectionTag`]; the fetch result is committed only if its tag is
//! still current, so a slow response for an abandoned selection can never
//! overwrite a newer one.

use serde::{Deserialize, Serialize};

use crate::error::CoreError;
use crate::item::{sort_items_by_creation, Item};
use crate::media::{MediaSlot, VersionMedia};
use crate::order::{Order, Retailer};
use crate::tabs::{default_tab, ensure_valid, MediaTab, TabAvailability};
use crate::types::RecordId;
use crate::version::{sort_versions_desc, Version};

/// Seconds the not-found page waits before sending the visitor home.
pub const REDIRECT_DELAY_SECS: u64 = 10;

/// What the visitor asked to see.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", content = "value", rename_all = "snake_case")]
pub enum Lookup {
    PoNumber(String),
    ItemId(RecordId),
}

impl std::fmt::Display for Lookup {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::PoNumber(po) => write!(f, "purchase order {po}"),
            Self::ItemId(id) => write!(f, "item {id}"),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "snake_case")]
pub enum ViewPhase {
    Loading,
    Ready,
    /// Terminal: no item or no version could be resolved.
    NotFound { redirect_after_secs: u64 },
    /// Terminal: a fatal lookup failed.
    Failed { message: String },
}

/// Identifies the selection a fetch was issued for.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionTag {
    pub generation: u64,
    pub item_id: Option<RecordId>,
    pub version_id: Option<RecordId>,
}

/// Active index within every media list.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct MediaCursor {
    pub images: usize,
    pub videos: usize,
    pub cads: usize,
    pub renders: usize,
    pub sketches: usize,
    pub models: usize,
}

impl MediaCursor {
    pub fn get(&self, slot: MediaSlot) -> usize {
        match slot {
            MediaSlot::Images => self.images,
            MediaSlot::Videos => self.videos,
            MediaSlot::Cads => self.cads,
            MediaSlot::Renders => self.renders,
            MediaSlot::Sketches => self.sketches,
            MediaSlot::Models => self.models,
        }
    }

    fn set(&mut self, slot: MediaSlot, index: usize) {
        let field = match slot {
            MediaSlot::Images => &mut self.images,
            MediaSlot::Videos => &mut self.videos,
            MediaSlot::Cads => &mut self.cads,
            MediaSlot::Renders => &mut self.renders,
            MediaSlot::Sketches => &mut self.sketches,
            MediaSlot::Models => &mut self.models,
        };
        *field = index;
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ViewState {
    pub lookup: Lookup,
    pub phase: ViewPhase,
    pub order: Option<Order>,
    pub retailer: Option<Retailer>,
    pub retailer_logo_url: Option<String>,
    pub items: Vec<Item>,
    pub active_item_id: Option<RecordId>,
    /// Versions of the active item, newest first.
    pub versions: Vec<Version>,
    pub current_version_id: Option<RecordId>,
    pub media: VersionMedia,
    /// False between a version switch and its media arriving.
    pub media_loaded: bool,
    pub active_tab: MediaTab,
    /// Set once the visitor picks a tab; stops default re-selection.
    pub tab_pinned: bool,
    pub cursor: MediaCursor,
    generation: u64,
}

impl ViewState {
    pub fn new(lookup: Lookup) -> Self {
        Self {
            lookup,
            phase: ViewPhase::Loading,
            order: None,
            retailer: None,
            retailer_logo_url: None,
            items: Vec::new(),
            active_item_id: None,
            versions: Vec::new(),
            current_version_id: None,
            media: VersionMedia::default(),
            media_loaded: false,
            active_tab: MediaTab::Model3d,
            tab_pinned: false,
            cursor: MediaCursor::default(),
            generation: 0,
        }
    }

    // ---- accessors ----

    pub fn active_item(&self) -> Option<&Item> {
        let id = self.active_item_id?;
        self.items.iter().find(|i| i.id == id)
    }

    pub fn current_version(&self) -> Option<&Version> {
        let id = self.current_version_id?;
        self.versions.iter().find(|v| v.id == id)
    }

    pub fn tab_availability(&self) -> TabAvailability {
        TabAvailability::for_version(self.current_version(), &self.media)
    }

    /// Tag describing the current selection.
    pub fn current_tag(&self) -> SelectionTag {
        SelectionTag {
            generation: self.generation,
            item_id: self.active_item_id,
            version_id: self.current_version_id,
        }
    }

    pub fn is_current(&self, tag: &SelectionTag) -> bool {
        tag.generation == self.generation
    }

    pub fn is_terminal(&self) -> bool {
        matches!(self.phase, ViewPhase::NotFound { .. } | ViewPhase::Failed { .. })
    }

    // ---- order and retailer ----

    /// Store the order; an appended retailer becomes the page retailer.
    pub fn set_order(&mut self, order: Order) {
        if let Some(retailer) = order.retailer.clone() {
            self.retailer = Some(retailer);
        }
        self.order = Some(order);
    }

    pub fn set_retailer_logo(&mut self, url: Option<String>) {
        self.retailer_logo_url = url;
    }

    // ---- item selection ----

    /// Store the order's items and select the oldest one.
    ///
    /// Returns the tag for the version fetch of the selected item, or
    /// `None` when there are no items.
    pub fn set_items(&mut self, mut items: Vec<Item>) -> Option<SelectionTag> {
        sort_items_by_creation(&mut items);
        let first = items.first().map(|i| i.id);
        self.items = items;
        match first {
            Some(id) => self.begin_item_switch(id).ok(),
            None => {
                self.active_item_id = None;
                self.clear_versions();
                None
            }
        }
    }

    /// Make `item_id` active and drop everything that belonged to the
    /// previous item before its versions are fetched.
    pub fn begin_item_switch(&mut self, item_id: RecordId) -> Result<SelectionTag, CoreError> {
        if !self.items.iter().any(|i| i.id == item_id) {
            return Err(CoreError::NotFound {
                entity: "Item",
                key: item_id.to_string(),
            });
        }
        self.active_item_id = Some(item_id);
        self.clear_versions();
        self.generation += 1;
        Ok(self.current_tag())
    }

    /// Commit the versions fetched for `tag`.
    ///
    /// Versions are sorted newest first and the highest-numbered one
    /// becomes current. Returns the tag for that version's media fetch, or
    /// `None` if `tag` is stale and nothing was committed.
    pub fn apply_versions(
        &mut self,
        tag: &SelectionTag,
        mut versions: Vec<Version>,
    ) -> Option<SelectionTag> {
        if !self.is_current(tag) {
            return None;
        }
        sort_versions_desc(&mut versions);
        let current = versions.first().map(|v| v.id);
        self.versions = versions;
        match current {
            Some(id) => self.begin_version_switch(id).ok(),
            None => {
                self.current_version_id = None;
                self.clear_media();
                self.generation += 1;
                Some(self.current_tag())
            }
        }
    }

    // ---- version selection ----

    /// Make `version_id` current and clear its predecessor's media before
    /// the new media is fetched.
    pub fn begin_version_switch(&mut self, version_id: RecordId) -> Result<SelectionTag, CoreError> {
        if !self.versions.iter().any(|v| v.id == version_id) {
            return Err(CoreError::NotFound {
                entity: "Version",
                key: version_id.to_string(),
            });
        }
        self.current_version_id = Some(version_id);
        self.clear_media();
        self.generation += 1;
        Ok(self.current_tag())
    }

    /// Commit media fetched for `tag`. Returns `false` for a stale tag.
    pub fn apply_media(&mut self, tag: &SelectionTag, media: VersionMedia) -> bool {
        if !self.is_current(tag) {
            return false;
        }
        self.media = media;
        self.media_loaded = true;
        self.settle_tab();
        true
    }

    /// Replace the current version's record with refreshed data, keeping
    /// the selection and the loaded media.
    pub fn replace_version(&mut self, version: Version) -> Result<(), CoreError> {
        let slot = self
            .versions
            .iter_mut()
            .find(|v| v.id == version.id)
            .ok_or_else(|| CoreError::NotFound {
                entity: "Version",
                key: version.id.to_string(),
            })?;
        *slot = version;
        self.settle_tab();
        Ok(())
    }

    // ---- visitor input ----

    /// Switch the media tab. Only tabs with content can be selected.
    pub fn select_tab(&mut self, tab: MediaTab) -> Result<(), CoreError> {
        if !self.tab_availability().has(tab) {
            return Err(CoreError::Validation(format!(
                "{} tab has nothing to show",
                tab.label()
            )));
        }
        if tab != self.active_tab {
            self.cursor = MediaCursor::default();
        }
        self.active_tab = tab;
        self.tab_pinned = true;
        Ok(())
    }

    pub fn select_media_index(&mut self, slot: MediaSlot, index: usize) -> Result<(), CoreError> {
        let len = self.media.slot(slot).len();
        if index >= len {
            return Err(CoreError::Validation(format!(
                "Media index {index} out of range for {slot:?} ({len} available)"
            )));
        }
        self.cursor.set(slot, index);
        Ok(())
    }

    // ---- terminal phases ----

    /// Close resolution: `Ready` when an item and a version exist,
    /// otherwise the not-found page with its redirect countdown.
    pub fn finish(&mut self) {
        self.phase = if self.active_item().is_some() && self.current_version().is_some() {
            ViewPhase::Ready
        } else {
            ViewPhase::NotFound {
                redirect_after_secs: REDIRECT_DELAY_SECS,
            }
        };
    }

    pub fn fail(&mut self, message: impl Into<String>) {
        self.phase = ViewPhase::Failed {
            message: message.into(),
        };
    }

    // ---- private helpers ----

    fn clear_versions(&mut self) {
        self.versions.clear();
        self.current_version_id = None;
        self.clear_media();
    }

    fn clear_media(&mut self) {
        self.media = VersionMedia::default();
        self.media_loaded = false;
        self.cursor = MediaCursor::default();
    }

    fn settle_tab(&mut self) {
        let availability = self.tab_availability();
        let next = if self.tab_pinned {
            ensure_valid(self.active_tab, &availability)
        } else {
            default_tab(&availability)
        };
        if next != self.active_tab {
            self.cursor = MediaCursor::default();
            self.active_tab = next;
        }
    }
}

/* --------------------------------------------------------------------------
Tests
-------------------------------------------------------------------------- */
