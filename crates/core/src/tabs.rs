//! Media tab policy for the item detail page.
//!
//! The page shows one of three tabs: the 3D model, CAD images, or
//! sketches. Preference order is 3D > CAD > Sketch. The 3D tab counts as
//! available when the version has model files or an external model/render
//! link, even if no model file was uploaded.

use serde::{Deserialize, Serialize};

use crate::media::{MediaSlot, VersionMedia};
use crate::version::Version;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum MediaTab {
    Model3d,
    Cad,
    Sketch,
}

/// Tabs in preference order.
pub const TAB_PREFERENCE: [MediaTab; 3] = [MediaTab::Model3d, MediaTab::Cad, MediaTab::Sketch];

impl MediaTab {
    pub fn label(self) -> &'static str {
        match self {
            Self::Model3d => "3D Model",
            Self::Cad => "CAD",
            Self::Sketch => "Sketch",
        }
    }

    /// Media list whose cursor this tab drives.
    pub fn slot(self) -> MediaSlot {
        match self {
            Self::Model3d => MediaSlot::Models,
            Self::Cad => MediaSlot::Cads,
            Self::Sketch => MediaSlot::Sketches,
        }
    }
}

/// Which tabs have something to show for the current version.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct TabAvailability {
    pub model3d: bool,
    pub cad: bool,
    pub sketch: bool,
}

impl TabAvailability {
    pub fn for_version(version: Option<&Version>, media: &VersionMedia) -> Self {
        Self {
            model3d: !media.models.is_empty() || version.is_some_and(Version::has_model_link),
            cad: !media.cads.is_empty(),
            sketch: !media.sketches.is_empty(),
        }
    }

    pub fn has(&self, tab: MediaTab) -> bool {
        match tab {
            MediaTab::Model3d => self.model3d,
            MediaTab::Cad => self.cad,
            MediaTab::Sketch => self.sketch,
        }
    }

    /// Available tabs in preference order.
    pub fn tabs(&self) -> Vec<MediaTab> {
        TAB_PREFERENCE.into_iter().filter(|t| self.has(*t)).collect()
    }
}

/// Tab to open for a freshly loaded version.
///
/// With nothing available the page still lands on the 3D slot, which
/// renders its own placeholder.
pub fn default_tab(availability: &TabAvailability) -> MediaTab {
    TAB_PREFERENCE
        .into_iter()
        .find(|t| availability.has(*t))
        .unwrap_or(MediaTab::Model3d)
}

/// Keep `active` if it still has content, otherwise fall over to the
/// next available tab in preference order.
pub fn ensure_valid(active: MediaTab, availability: &TabAvailability) -> MediaTab {
    if availability.has(active) {
        active
    } else {
        default_tab(availability)
    }
}
