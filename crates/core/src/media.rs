//! Media attachments of a version and how they are categorised.
//!
//! Each version exposes several attachment collections on the backend
//! (generic references, CAD renders, render images, sketches, 3D model
//! files). Attachment URLs are relative to the API host and must be
//! resolved before they reach a browser.

use serde::{Deserialize, Serialize};

use crate::types::{lenient_i64, non_empty, RecordId};

/// An attachment row: title, relative URL and mime type.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MediaAsset {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub url: Option<String>,
    #[serde(default)]
    pub mimetype: Option<String>,
    #[serde(default)]
    pub extname: Option<String>,
    #[serde(default)]
    pub preview: Option<String>,
}

/// What a browser should use to present an asset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaKind {
    Image,
    Video,
    Model3d,
    Other,
}

/// File extensions rendered by the 3D viewer.
const MODEL_EXTENSIONS: &[&str] = &["glb", "gltf"];

impl MediaAsset {
    /// Categorise by mime-type prefix, falling back to the extension for
    /// model files (which are often uploaded as `application/octet-stream`).
    pub fn kind(&self) -> MediaKind {
        let mime = self.mimetype.as_deref().unwrap_or_default();
        if mime.starts_with("image/") {
            MediaKind::Image
        } else if mime.starts_with("video/") {
            MediaKind::Video
        } else if mime.starts_with("model/") || self.has_model_extension() {
            MediaKind::Model3d
        } else {
            MediaKind::Other
        }
    }

    fn has_model_extension(&self) -> bool {
        let ext = self
            .extname
            .as_deref()
            .or_else(|| self.url.as_deref().and_then(|u| u.rsplit_once('.').map(|(_, e)| e)))
            .unwrap_or_default()
            .trim_start_matches('.')
            .to_ascii_lowercase();
        MODEL_EXTENSIONS.contains(&ext.as_str())
    }

    /// Absolute URL of the asset against the API base, if it has one.
    pub fn absolute_url(&self, base_url: &str) -> Option<String> {
        non_empty(self.url.as_deref()).map(|url| resolve_url(base_url, url))
    }
}

/// Resolve an attachment URL against the API base URL.
///
/// Absolute `http(s)` URLs pass through unchanged; relative paths are
/// joined with exactly one `/` between base and path.
pub fn resolve_url(base_url: &str, url: &str) -> String {
    if url.starts_with("http://") || url.starts_with("https://") {
        return url.to_string();
    }
    format!(
        "{}/{}",
        base_url.trim_end_matches('/'),
        url.trim_start_matches('/')
    )
}

/// Split a version's reference collection into images and videos.
///
/// Anything that is neither is dropped.
pub fn partition_references(assets: Vec<MediaAsset>) -> (Vec<MediaAsset>, Vec<MediaAsset>) {
    let mut images = Vec::new();
    let mut videos = Vec::new();
    for asset in assets {
        match asset.kind() {
            MediaKind::Image => images.push(asset),
            MediaKind::Video => videos.push(asset),
            _ => {}
        }
    }
    (images, videos)
}

/* --------------------------------------------------------------------------
Collections
-------------------------------------------------------------------------- */

/// Attachment collections exposed per version by the backend.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaCollection {
    References,
    Cad,
    Render,
    Sketch,
    Model3d,
}

impl MediaCollection {
    /// Every collection, in the order they are requested.
    pub const ALL: [MediaCollection; 5] = [
        Self::References,
        Self::Cad,
        Self::Render,
        Self::Sketch,
        Self::Model3d,
    ];

    /// Association name on the `versions` resource.
    pub fn association(self) -> &'static str {
        match self {
            Self::References => "references",
            Self::Cad => "cad_file",
            Self::Render => "render_image",
            Self::Sketch => "sketch_file",
            Self::Model3d => "threed_model",
        }
    }
}

/// A displayable media list on the page, each with its own cursor.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaSlot {
    Images,
    Videos,
    Cads,
    Renders,
    Sketches,
    Models,
}

/// All media loaded for one version.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct VersionMedia {
    pub images: Vec<MediaAsset>,
    pub videos: Vec<MediaAsset>,
    pub cads: Vec<MediaAsset>,
    pub renders: Vec<MediaAsset>,
    pub sketches: Vec<MediaAsset>,
    pub models: Vec<MediaAsset>,
}

impl VersionMedia {
    /// Store the result of one collection fetch, replacing what was there.
    pub fn insert(&mut self, collection: MediaCollection, assets: Vec<MediaAsset>) {
        match collection {
            MediaCollection::References => {
                let (images, videos) = partition_references(assets);
                self.images = images;
                self.videos = videos;
            }
            MediaCollection::Cad => self.cads = assets,
            MediaCollection::Render => self.renders = assets,
            MediaCollection::Sketch => self.sketches = assets,
            MediaCollection::Model3d => self.models = assets,
        }
    }

    pub fn slot(&self, slot: MediaSlot) -> &[MediaAsset] {
        match slot {
            MediaSlot::Images => &self.images,
            MediaSlot::Videos => &self.videos,
            MediaSlot::Cads => &self.cads,
            MediaSlot::Renders => &self.renders,
            MediaSlot::Sketches => &self.sketches,
            MediaSlot::Models => &self.models,
        }
    }

    pub fn is_empty(&self) -> bool {
        self.images.is_empty()
            && self.videos.is_empty()
            && self.cads.is_empty()
            && self.renders.is_empty()
            && self.sketches.is_empty()
            && self.models.is_empty()
    }
}
