use futures::future::join_all;

use showcase_client::CatalogSource;
use showcase_core::media::{MediaCollection, VersionMedia};
use showcase_core::types::RecordId;

/// Fetch every media collection of a version concurrently.
///
/// A collection whose fetch fails is logged and left empty; the others
/// are still populated.
pub async fn load_version_media<S>(source: &S, version_id: RecordId) -> VersionMedia
where
    S: CatalogSource + ?Sized,
{
    let fetches = MediaCollection::ALL.map(|collection| async move {
        (
            collection,
            source.list_version_media(version_id, collection).await,
        )
    });

    let mut media = VersionMedia::default();
    for (collection, result) in join_all(fetches).await {
        match result {
            Ok(assets) => media.insert(collection, assets),
            Err(e) => {
                tracing::warn!(
                    version_id,
                    collection = collection.association(),
                    error = %e,
                    "Media fetch failed, showing collection as empty"
                );
            }
        }
    }

    tracing::debug!(
        version_id,
        images = media.images.len(),
        videos = media.videos.len(),
        cads = media.cads.len(),
        renders = media.renders.len(),
        sketches = media.sketches.len(),
        models = media.models.len(),
        "Version media loaded"
    );
    media
}
