//! Purchase orders and the retailers that placed them.

use serde::{Deserialize, Serialize};

use crate::types::{lenient_i64, lenient_string, non_empty, RecordId};

/// A row from the `orders` collection.
///
/// Only `id` is guaranteed; every other column depends on how the
/// collection is configured on the backend.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Order {
    pub id: RecordId,
    #[serde(default, deserialize_with = "lenient_string")]
    pub po_no: Option<String>,
    #[serde(default)]
    pub description: Option<String>,
    #[serde(default)]
    pub status: Option<String>,
    #[serde(default, deserialize_with = "lenient_i64")]
    pub retailer_id: Option<RecordId>,
    #[serde(default)]
    pub start_date: Option<String>,
    #[serde(default)]
    pub closing_date: Option<String>,
    #[serde(default, alias = "fedex_tracking_number")]
    pub tracking_number: Option<String>,
    /// Present when the request asked for `appends[]=retailer`.
    #[serde(default)]
    pub retailer: Option<Retailer>,
    /// Present when the request asked for `appends[]=associate`.
    #[serde(default)]
    pub associate: Option<Associate>,
}

/// The retailer an order belongs to.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Retailer {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub retailer_name: Option<String>,
    #[serde(default)]
    pub company: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
    #[serde(default)]
    pub name_plus_id: Option<String>,
    #[serde(default, alias = "logo")]
    pub logo_url: Option<String>,
}

impl Retailer {
    /// Name shown in the page header: `name_plus_id`, then
    /// `retailer_name`, then `company`.
    pub fn display_name(&self) -> Option<&str> {
        non_empty(self.name_plus_id.as_deref())
            .or_else(|| non_empty(self.retailer_name.as_deref()))
            .or_else(|| non_empty(self.company.as_deref()))
    }
}

/// Sales associate attached to an order.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Associate {
    #[serde(default, deserialize_with = "lenient_i64")]
    pub id: Option<RecordId>,
    #[serde(default)]
    pub nickname: Option<String>,
    #[serde(default)]
    pub username: Option<String>,
    #[serde(default)]
    pub email: Option<String>,
    #[serde(default)]
    pub phone: Option<String>,
}
