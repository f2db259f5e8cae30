//! Order resolution: turns a purchase-order number or item id into a
//! fully populated [`ViewState`](showcase_core::view::ViewState).
//!
//! Resolution runs strictly in dependency order (order, items, versions,
//! media). Only the per-version media collections are fetched
//! concurrently, and each of them may fail on its own without aborting
//! the others.

pub mod error;
pub mod media;
pub mod redirect;
pub mod resolver;
pub mod retailer;
pub mod session;
pub mod summary;

pub use error::PipelineError;
pub use media::load_version_media;
pub use redirect::{RedirectCountdown, RedirectEvent};
pub use resolver::{NavigationState, OrderResolver};
pub use session::ViewSession;
pub use summary::{summarize_order, ItemSummary, OrderSummary};
