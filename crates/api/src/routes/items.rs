use axum::routing::get;
use axum::Router;

use crate::handlers::items;
use crate::state::AppState;

/// Routes mounted at `/items`.
///
/// ```text
/// GET  /{id}/view    view
/// POST /{id}/view    view_with_navigation
/// ```
pub fn router() -> Router<AppState> {
    Router::new().route(
        "/{id}/view",
        get(items::view).post(items::view_with_navigation),
    )
}
