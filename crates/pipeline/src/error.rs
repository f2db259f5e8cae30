use showcase_client::DataApiError;
use showcase_core::error::CoreError;
use showcase_core::types::RecordId;

/// Fatal resolution failures. Media fetches never produce one of these;
/// they degrade to empty collections instead.
#[derive(Debug, thiserror::Error)]
pub enum PipelineError {
    #[error("No order found for purchase order {po}")]
    OrderNotFound { po: String },

    #[error("No item found with id {item_id}")]
    ItemNotFound { item_id: RecordId },

    /// A required backend call failed (non-2xx or transport error).
    #[error("Failed to fetch {step}: {source}")]
    Backend {
        step: &'static str,
        source: DataApiError,
    },

    /// The visitor asked for an item, version or tab that the view does
    /// not have.
    #[error(transparent)]
    Selection(#[from] CoreError),
}

impl PipelineError {
    pub(crate) fn backend(step: &'static str) -> impl FnOnce(DataApiError) -> Self {
        move |source| Self::Backend { step, source }
    }
}
