//! The page-ready rendering of a resolved view.
//!
//! [`ViewDocument`] carries the full [`ViewState`] plus everything a
//! browser needs to draw the page without further lookups: absolute media
//! URLs grouped by tab, specification rows and retailer branding.

use serde::Serialize;

use showcase_core::media::{MediaAsset, MediaKind};
use showcase_core::spec_fields::{item_fields, version_fields, SpecField};
use showcase_core::tabs::{MediaTab, TAB_PREFERENCE};
use showcase_core::types::RecordId;
use showcase_core::view::ViewState;

#[derive(Debug, Serialize)]
pub struct ViewDocument {
    #[serde(flatten)]
    pub view: ViewState,
    pub page: PageData,
}

#[derive(Debug, Serialize)]
pub struct PageData {
    pub retailer_name: Option<String>,
    pub retailer_logo_url: Option<String>,
    pub item_title: Option<String>,
    pub version_label: Option<String>,
    /// Every tab in preference order, with its media.
    pub tabs: Vec<TabDocument>,
    pub images: Vec<MediaDocument>,
    pub videos: Vec<MediaDocument>,
    pub renders: Vec<MediaDocument>,
    pub version_fields: Vec<SpecField>,
    pub item_fields: Vec<SpecField>,
    /// External viewer link (`render_link`) of the current version.
    pub model_link: Option<String>,
}

#[derive(Debug, Serialize)]
pub struct TabDocument {
    pub tab: MediaTab,
    pub label: &'static str,
    pub available: bool,
    pub active: bool,
    pub media: Vec<MediaDocument>,
}

#[derive(Debug, Serialize)]
pub struct MediaDocument {
    pub id: Option<RecordId>,
    pub title: Option<String>,
    pub url: String,
    pub kind: MediaKind,
    pub mimetype: Option<String>,
}

fn media_documents(assets: &[MediaAsset], base_url: &str) -> Vec<MediaDocument> {
    assets
        .iter()
        .filter_map(|asset| {
            let url = asset.absolute_url(base_url)?;
            Some(MediaDocument {
                id: asset.id,
                title: asset.title.clone(),
                url,
                kind: asset.kind(),
                mimetype: asset.mimetype.clone(),
            })
        })
        .collect()
}

impl ViewDocument {
    /// Render `view`, resolving attachment URLs against `base_url`.
    /// Assets without a URL are left out.
    pub fn render(view: ViewState, base_url: &str) -> Self {
        let availability = view.tab_availability();
        let tabs = TAB_PREFERENCE
            .into_iter()
            .map(|tab| TabDocument {
                tab,
                label: tab.label(),
                available: availability.has(tab),
                active: tab == view.active_tab,
                media: media_documents(view.media.slot(tab.slot()), base_url),
            })
            .collect();

        let item = view.active_item();
        let version = view.current_version();

        let page = PageData {
            retailer_name: view
                .retailer
                .as_ref()
                .and_then(|r| r.display_name())
                .map(str::to_string),
            retailer_logo_url: view.retailer_logo_url.clone(),
            item_title: item.and_then(|i| i.display_name()).map(str::to_string),
            version_label: version.map(|v| v.label()),
            tabs,
            images: media_documents(&view.media.images, base_url),
            videos: media_documents(&view.media.videos, base_url),
            renders: media_documents(&view.media.renders, base_url),
            version_fields: version.map(version_fields).unwrap_or_default(),
            item_fields: item.map(item_fields).unwrap_or_default(),
            model_link: version.and_then(|v| v.render_link.clone()),
        };

        Self { view, page }
    }
}
