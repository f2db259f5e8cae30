//! Design versions of an item and the rules that tie them to items.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::item::Item;
use crate::types::{lenient_i64, lenient_string, non_empty, RecordId};

/// A row from the `versions` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Version {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub version_number: Option<i64>,
    #[serde(default)]
    pub version_name: Option<String>,
    #[serde(default, alias = "version_desc")]
    pub version_description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub item_size: Option<String>,
    #[serde(default)]
    pub item_description: Option<String>,
    #[serde(default, alias = "metal_type1")]
    pub metal_type: Option<String>,
    #[serde(default)]
    pub metal_color: Option<String>,
    #[serde(default)]
    pub stamp_engraving: Option<String>,
    #[serde(default)]
    pub melee_stones_info: Option<String>,
    #[serde(default)]
    pub center_stone_info: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub version_quantity: Option<i64>,
    /// Item number of the owning item, stored as a plain column.
    #[serde(default, deserialize_with = "lenient_string")]
    pub fkb_items_and_versions: Option<String>,
    #[serde(default)]
    pub ijewel_model_id: Option<String>,
    #[serde(default)]
    pub render_link: Option<String>,
    /// The owning item, when the request appended the relation.
    #[serde(default, alias = "v_i_fk", alias = "f_s201x17a2bx")]
    pub item: Option<ItemRef>,
}

/// Appended item relation on a version row.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ItemRef {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<RecordId>,
    #[serde(default, deserialize_with = "lenient_string")]
    pub po_i_no: Option<String>,
}

impl Version {
    /// Item number this version joins on.
    pub fn item_number(&self) -> Option<&str> {
        self.item
            .as_ref()
            .and_then(|i| non_empty(i.po_i_no.as_deref()))
            .or_else(|| non_empty(self.fkb_items_and_versions.as_deref()))
    }

    /// Whether the version points at an external 3D model or render.
    pub fn has_model_link(&self) -> bool {
        non_empty(self.ijewel_model_id.as_deref()).is_some()
            || non_empty(self.render_link.as_deref()).is_some()
    }

    /// Button label: `Version 3`, or `Version #<id>` when unnumbered.
    pub fn label(&self) -> String {
        match self.version_number {
            Some(n) => format!("Version {n}"),
            None => format!("Version #{}", self.id),
        }
    }
}

/// The versions of `item`: exactly those whose join key equals its item
/// number. An item without an item number has no versions.
pub fn versions_for_item<'a>(item: &Item, versions: &'a [Version]) -> Vec<&'a Version> {
    let Some(number) = item.item_number() else {
        return Vec::new();
    };
    versions
        .iter()
        .filter(|v| v.item_number() == Some(number))
        .collect()
}

/// Sort newest design first: highest `version_number`, unnumbered last,
/// ties broken by descending id.
pub fn sort_versions_desc(versions: &mut [Version]) {
    versions.sort_by(compare_desc);
}

/// The current version: the one with the highest version number.
pub fn current_version(versions: &[Version]) -> Option<&Version> {
    versions.iter().min_by(|a, b| compare_desc(a, b))
}

fn compare_desc(a: &Version, b: &Version) -> Ordering {
    match (a.version_number, b.version_number) {
        (Some(x), Some(y)) => y.cmp(&x),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
    .then(b.id.cmp(&a.id))
}
