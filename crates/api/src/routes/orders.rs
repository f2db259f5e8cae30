use axum::routing::get;
use axum::Router;

use crate::handlers::orders;
use crate::state::AppState;

/// Routes mounted at `/orders`.
///
/// ```text
/// GET /{po}/view     view
/// GET /{po}/items    summary
/// ```
pub fn router() -> Router<AppState> {
    Router::new()
        .route("/{po}/view", get(orders::view))
        .route("/{po}/items", get(orders::summary))
}
