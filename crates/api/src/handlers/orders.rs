//! Handlers for purchase-order pages.

use axum::extract::{Path, Query, State};
use axum::response::{IntoResponse, Response};
use axum::Json;

use showcase_core::view::Lookup;
use showcase_pipeline::summarize_order;

use crate::error::{AppError, AppResult};
use crate::handlers::view::{apply_selection, render, SelectionParams};
use crate::response::DataResponse;
use crate::state::AppState;

// ---------------------------------------------------------------------------
// Handlers
// ---------------------------------------------------------------------------

/// GET /api/v1/orders/{po}/view?item_id=&version_id=&tab=
///
/// Resolve the order's page: oldest item, newest version, its media.
pub async fn view(
    State(state): State<AppState>,
    Path(po): Path<String>,
    Query(params): Query<SelectionParams>,
) -> AppResult<Response> {
    let po = normalize_po(&po)?;
    let view = state.resolver().resolve(Lookup::PoNumber(po), None).await?;
    let view = apply_selection(&state, view, &params).await?;
    Ok(render(&state, view))
}

/// GET /api/v1/orders/{po}/items
///
/// Every item of the order with its versions.
pub async fn summary(
    State(state): State<AppState>,
    Path(po): Path<String>,
) -> AppResult<impl IntoResponse> {
    let po = normalize_po(&po)?;
    let summary = summarize_order(state.catalog.as_ref(), &po).await?;
    Ok(Json(DataResponse { data: summary }))
}

fn normalize_po(raw: &str) -> AppResult<String> {
    let po = raw.trim();
    if po.is_empty() {
        return Err(AppError::BadRequest(
            "Purchase order number must not be empty".to_string(),
        ));
    }
    Ok(po.to_string())
}
