//! Interactive selection on a resolved view.
//!
//! A [`ViewSession`] can be shared between concurrent callers. Every
//! switch clears the previous selection's data under the lock before any
//! request is issued, and a completion is committed only if nothing newer
//! was selected in the meantime.

use std::sync::Arc;

use tokio::sync::Mutex;

use showcase_client::CatalogSource;
use showcase_core::media::MediaSlot;
use showcase_core::tabs::MediaTab;
use showcase_core::types::RecordId;
use showcase_core::view::{SelectionTag, ViewState};

use crate::error::PipelineError;
use crate::media::load_version_media;
use crate::resolver::fetch_item_versions;

pub struct ViewSession<S: ?Sized> {
    source: Arc<S>,
    state: Mutex<ViewState>,
}

impl<S> ViewSession<S>
where
    S: CatalogSource + ?Sized,
{
    pub fn new(source: Arc<S>, state: ViewState) -> Self {
        Self {
            source,
            state: Mutex::new(state),
        }
    }

    /// Copy of the current view.
    pub async fn snapshot(&self) -> ViewState {
        self.state.lock().await.clone()
    }

    pub fn into_state(self) -> ViewState {
        self.state.into_inner()
    }

    /// Switch to another item of the order, then load its versions and
    /// the newest version's media.
    ///
    /// Returns `Ok(false)` if a newer selection superseded this one before
    /// it completed.
    pub async fn select_item(&self, item_id: RecordId) -> Result<bool, PipelineError> {
        let (tag, item) = {
            let mut state = self.state.lock().await;
            let tag = state.begin_item_switch(item_id)?;
            (tag, state.active_item().cloned())
        };
        tracing::debug!(item_id, generation = tag.generation, "Item switch started");

        let versions = match item {
            Some(item) => fetch_item_versions(self.source.as_ref(), &item).await,
            None => Ok(Vec::new()),
        };
        let versions = match versions {
            Ok(versions) => versions,
            Err(e) => return self.fail_if_current(&tag, e).await,
        };

        let media_tag = {
            let mut state = self.state.lock().await;
            match state.apply_versions(&tag, versions) {
                Some(media_tag) => media_tag,
                None => {
                    tracing::debug!(item_id, "Discarding versions for superseded item");
                    return Ok(false);
                }
            }
        };
        self.complete_with_media(media_tag).await
    }

    /// Switch to another version of the active item and load its media.
    pub async fn select_version(&self, version_id: RecordId) -> Result<bool, PipelineError> {
        let tag = self.state.lock().await.begin_version_switch(version_id)?;
        tracing::debug!(version_id, generation = tag.generation, "Version switch started");
        self.complete_with_media(tag).await
    }

    /// Re-read the current version's record without touching its media.
    ///
    /// The active tab moves on if the refreshed record no longer backs it.
    pub async fn refresh_current_version(&self) -> Result<bool, PipelineError> {
        let (tag, item) = {
            let state = self.state.lock().await;
            (state.current_tag(), state.active_item().cloned())
        };
        let (Some(item), Some(version_id)) = (item, tag.version_id) else {
            return Ok(false);
        };

        let versions = fetch_item_versions(self.source.as_ref(), &item).await?;
        let mut state = self.state.lock().await;
        if !state.is_current(&tag) {
            return Ok(false);
        }
        match versions.into_iter().find(|v| v.id == version_id) {
            Some(version) => {
                state.replace_version(version)?;
                Ok(true)
            }
            None => Ok(false),
        }
    }

    pub async fn select_tab(&self, tab: MediaTab) -> Result<(), PipelineError> {
        Ok(self.state.lock().await.select_tab(tab)?)
    }

    pub async fn select_media_index(
        &self,
        slot: MediaSlot,
        index: usize,
    ) -> Result<(), PipelineError> {
        Ok(self.state.lock().await.select_media_index(slot, index)?)
    }

    // ---- private helpers ----

    async fn complete_with_media(&self, tag: SelectionTag) -> Result<bool, PipelineError> {
        let media = match tag.version_id {
            Some(version_id) => Some(load_version_media(self.source.as_ref(), version_id).await),
            None => None,
        };

        let mut state = self.state.lock().await;
        let committed = match media {
            Some(media) => state.apply_media(&tag, media),
            None => state.is_current(&tag),
        };
        if committed {
            state.finish();
        } else {
            tracing::debug!(generation = tag.generation, "Discarding media for superseded version");
        }
        Ok(committed)
    }

    async fn fail_if_current(
        &self,
        tag: &SelectionTag,
        error: PipelineError,
    ) -> Result<bool, PipelineError> {
        let mut state = self.state.lock().await;
        if !state.is_current(tag) {
            return Ok(false);
        }
        state.fail(error.to_string());
        Err(error)
    }
}
