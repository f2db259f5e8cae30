//! Items: the individual jewelry pieces inside a purchase order.

use std::cmp::Ordering;

use serde::{Deserialize, Serialize};

use crate::types::{lenient_i64, lenient_string, lenient_timestamp, non_empty, RecordId, Timestamp};

/// A row from the `items` collection.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Item {
    pub id: RecordId,
    #[serde(default)]
    pub item_name: Option<String>,
    #[serde(default)]
    pub new_name: Option<String>,
    #[serde(default, alias = "item_desc")]
    pub item_description: Option<String>,
    #[serde(default, alias = "Quantity", deserialize_with = "lenient_i64")]
    pub quantity: Option<i64>,
    /// Item number; versions join to the item on this value.
    #[serde(default, deserialize_with = "lenient_string")]
    pub po_i_no: Option<String>,
    /// Purchase-order number of the owning order.
    #[serde(default, deserialize_with = "lenient_string")]
    pub fkb_orders_to_items: Option<String>,
    #[serde(default, alias = "Purchase_Item_Number", deserialize_with = "lenient_string")]
    pub purchase_item_number: Option<String>,
    #[serde(default)]
    pub item_type: Option<String>,
    #[serde(default, alias = "createdAt", deserialize_with = "lenient_timestamp")]
    pub created_at: Option<Timestamp>,
}

impl Item {
    /// Join key to this item's versions.
    pub fn item_number(&self) -> Option<&str> {
        non_empty(self.po_i_no.as_deref())
    }

    /// Purchase-order number of the order this item belongs to.
    pub fn po_number(&self) -> Option<&str> {
        non_empty(self.fkb_orders_to_items.as_deref())
    }

    /// Customer-facing name: the renamed title when set, else the raw name.
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.new_name.as_deref()).or_else(|| non_empty(self.item_name.as_deref()))
    }
}

/// Order items by creation time, oldest first.
///
/// Items without a timestamp sort after timestamped ones; ties fall back
/// to the record id so the first item is stable across fetches.
pub fn sort_items_by_creation(items: &mut [Item]) {
    items.sort_by(|a, b| match (a.created_at, b.created_at) {
        (Some(x), Some(y)) => x.cmp(&y).then(a.id.cmp(&b.id)),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => a.id.cmp(&b.id),
    });
}

#[cfg(test)]
mod tests {
    use super::*;

    fn item(id: RecordId, created_at: Option<&str>) -> Item {
        serde_json::from_value(serde_json::json!({
            "id": id,
            "createdAt": created_at,
        }))
        .unwrap()
    }

    #[test]
    fn backend_field_names_decode() {
        let item: Item = serde_json::from_value(serde_json::json!({
            "id": 5,
            "item_name": "Halo ring",
            "new_name": "",
            "Quantity": "2",
            "po_i_no": "48213-1",
            "fkb_orders_to_items": 48213,
            "Purchase_Item_Number": "PI-9"
        }))
        .unwrap();

        assert_eq!(item.quantity, Some(2));
        assert_eq!(item.item_number(), Some("48213-1"));
        assert_eq!(item.po_number(), Some("48213"));
        assert_eq!(item.purchase_item_number.as_deref(), Some("PI-9"));
        assert_eq!(item.display_name(), Some("Halo ring"));
    }

    #[test]
    fn creation_order_is_oldest_first_with_id_tiebreak() {
        let mut items = vec![
            item(3, Some("2025-02-01T00:00:00Z")),
            item(9, None),
            item(1, Some("2025-01-01T00:00:00Z")),
            item(2, Some("2025-02-01T00:00:00Z")),
        ];
        sort_items_by_creation(&mut items);
        let ids: Vec<_> = items.iter().map(|i| i.id).collect();
        assert_eq!(ids, vec![1, 2, 3, 9]);
    }
}
