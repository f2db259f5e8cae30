pub mod health;
pub mod items;
pub mod orders;

use axum::Router;

use crate::state::AppState;

/// Build the `/api/v1` route tree.
///
/// ```text
/// /orders/{po}/view          resolved view for a purchase order
/// /orders/{po}/items         order summary with every item's versions
/// /items/{id}/view           resolved view for one item (GET, or POST with
///                            navigation data)
/// ```
pub fn api_routes() -> Router<AppState> {
    Router::new()
        .nest("/orders", orders::router())
        .nest("/items", items::router())
}
