//! Handlers for single-item pages.

use axum::extract::{Path, Query, State};
use axum::response::Response;
use axum::Json;

use showcase_core::types::RecordId;
use showcase_core::view::Lookup;
use showcase_pipeline::NavigationState;

use crate::error::{AppError, AppResult};
use crate::handlers::view::{apply_selection, render, SelectionParams};
use crate::state::AppState;

/// GET /api/v1/items/{id}/view?version_id=&tab=
pub async fn view(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Query(params): Query<SelectionParams>,
) -> AppResult<Response> {
    resolve_item(&state, id, None, params).await
}

/// POST /api/v1/items/{id}/view
///
/// Same as [`view`], reusing the item and versions the list page already
/// loaded instead of fetching them again.
pub async fn view_with_navigation(
    State(state): State<AppState>,
    Path(id): Path<RecordId>,
    Query(params): Query<SelectionParams>,
    Json(navigation): Json<NavigationState>,
) -> AppResult<Response> {
    if let Some(item) = &navigation.item {
        if item.id != id {
            return Err(AppError::BadRequest(format!(
                "Navigation item {} does not match requested item {id}",
                item.id
            )));
        }
    }
    resolve_item(&state, id, Some(navigation), params).await
}

async fn resolve_item(
    state: &AppState,
    id: RecordId,
    navigation: Option<NavigationState>,
    params: SelectionParams,
) -> AppResult<Response> {
    if params.item_id.is_some_and(|wanted| wanted != id) {
        return Err(AppError::BadRequest(
            "item_id cannot differ from the item in the path".to_string(),
        ));
    }
    let view = state.resolver().resolve(Lookup::ItemId(id), navigation).await?;
    let view = apply_selection(state, view, &params).await?;
    Ok(render(state, view))
}
