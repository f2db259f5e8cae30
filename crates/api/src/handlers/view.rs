//! Shared steps for the view endpoints: applying the visitor's selection
//! to a resolved view and rendering the response.

use std::sync::Arc;

use axum::http::StatusCode;
use axum::response::{IntoResponse, Response};
use axum::Json;
use serde::Deserialize;

use showcase_core::tabs::MediaTab;
use showcase_core::types::RecordId;
use showcase_core::view::{ViewPhase, ViewState};
use showcase_pipeline::ViewSession;

use crate::document::ViewDocument;
use crate::error::AppResult;
use crate::response::DataResponse;
use crate::state::AppState;

/// Selection requested through query parameters.
#[derive(Debug, Default, Deserialize)]
pub struct SelectionParams {
    pub item_id: Option<RecordId>,
    pub version_id: Option<RecordId>,
    pub tab: Option<MediaTab>,
}

impl SelectionParams {
    fn is_empty(&self) -> bool {
        self.item_id.is_none() && self.version_id.is_none() && self.tab.is_none()
    }
}

/// Run the requested item, version and tab switches, in that order, on a
/// freshly resolved view.
pub async fn apply_selection(
    state: &AppState,
    view: ViewState,
    params: &SelectionParams,
) -> AppResult<ViewState> {
    if params.is_empty() {
        return Ok(view);
    }

    let session = ViewSession::new(Arc::clone(&state.catalog), view);
    let snapshot = session.snapshot().await;

    if let Some(item_id) = params.item_id.filter(|id| snapshot.active_item_id != Some(*id)) {
        session.select_item(item_id).await?;
    }
    if let Some(version_id) = params.version_id {
        if session.snapshot().await.current_version_id != Some(version_id) {
            session.select_version(version_id).await?;
        }
    }
    if let Some(tab) = params.tab {
        session.select_tab(tab).await?;
    }
    Ok(session.into_state())
}

/// Wrap a view in the data envelope. A not-found view is sent with 404 so
/// the front-end shows its redirect countdown.
pub fn render(state: &AppState, view: ViewState) -> Response {
    let status = match view.phase {
        ViewPhase::NotFound { .. } => StatusCode::NOT_FOUND,
        _ => StatusCode::OK,
    };
    let document = ViewDocument::render(view, state.catalog.media_base_url());
    (status, Json(DataResponse { data: document })).into_response()
}
