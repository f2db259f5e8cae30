//! Specification rows shown next to the media viewer.

use serde::Serialize;

use crate::item::Item;
use crate::types::non_empty;
use crate::version::Version;

/// One label/value row in the details card.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct SpecField {
    pub label: &'static str,
    pub value: String,
}

fn push_text(fields: &mut Vec<SpecField>, label: &'static str, value: Option<&str>) {
    if let Some(v) = non_empty(value) {
        fields.push(SpecField { label, value: v.to_string() });
    }
}

fn push_number(fields: &mut Vec<SpecField>, label: &'static str, value: Option<i64>) {
    if let Some(v) = value {
        fields.push(SpecField { label, value: v.to_string() });
    }
}

/// Populated descriptive fields of a version, in display order.
pub fn version_fields(version: &Version) -> Vec<SpecField> {
    let mut fields = Vec::new();
    push_text(&mut fields, "Version Name", version.version_name.as_deref());
    push_number(&mut fields, "Version Number", version.version_number);
    push_text(&mut fields, "Item Size", version.item_size.as_deref());
    push_number(&mut fields, "Quantity", version.version_quantity);
    push_text(&mut fields, "Metal Type", version.metal_type.as_deref());
    push_text(&mut fields, "Metal Color", version.metal_color.as_deref());
    push_text(&mut fields, "Center Stone", version.center_stone_info.as_deref());
    push_text(&mut fields, "Melee Stones", version.melee_stones_info.as_deref());
    push_text(&mut fields, "Stamp / Engraving", version.stamp_engraving.as_deref());
    push_text(&mut fields, "Version Description", version.item_description.as_deref());
    fields
}

/// Populated item-level fields, in display order.
pub fn item_fields(item: &Item) -> Vec<SpecField> {
    let mut fields = Vec::new();
    push_text(&mut fields, "Item Number", item.po_i_no.as_deref());
    push_number(&mut fields, "Quantity", item.quantity);
    push_text(&mut fields, "Purchase Order", item.fkb_orders_to_items.as_deref());
    push_text(&mut fields, "Purchase Item Number", item.purchase_item_number.as_deref());
    push_text(&mut fields, "Description", item.item_description.as_deref());
    fields
}
