//! Client for the catalog's generic REST data API.
//!
//! - [`filter`] / [`query`] build the JSON filter and list parameters the
//!   API understands (`$and`, `$eq`, `$in`, `$notEmpty`, `appends[]`,
//!   `fields[]`, `sort[]`, paging).
//! - [`api::DataApi`] performs authenticated list/get calls and unwraps
//!   the `{ "data": ... }` envelope.
//! - [`catalog::CatalogSource`] is the seam the resolution pipeline talks
//!   to; [`catalog::HttpCatalog`] implements it against the live API.

pub mod api;
pub mod catalog;
pub mod config;
pub mod filter;
pub mod query;

pub use api::{DataApi, DataApiError};
pub use catalog::{CatalogSource, HttpCatalog};
pub use config::{ClientConfig, ConfigError};
