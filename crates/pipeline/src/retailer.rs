//! Retailer branding for the page header.

use showcase_client::CatalogSource;
use showcase_core::media::resolve_url;
use showcase_core::order::Order;
use showcase_core::types::{non_empty, RecordId};

/// Logo URL for the order's retailer.
///
/// A logo on the appended retailer wins; otherwise the retailer is mapped
/// to its user account and that account's uploaded logo is used. Every
/// failure along the way yields `None`.
pub async fn retailer_logo<S>(source: &S, order: &Order) -> Option<String>
where
    S: CatalogSource + ?Sized,
{
    let embedded = order
        .retailer
        .as_ref()
        .and_then(|r| non_empty(r.logo_url.as_deref()));
    if let Some(url) = embedded {
        return Some(resolve_url(source.media_base_url(), url));
    }

    let retailer_id = order
        .retailer
        .as_ref()
        .and_then(|r| r.id)
        .or(order.retailer_id)?;
    logo_for_retailer(source, retailer_id).await
}

async fn logo_for_retailer<S>(source: &S, retailer_id: RecordId) -> Option<String>
where
    S: CatalogSource + ?Sized,
{
    let user_id = match source.find_retailer_user_id(retailer_id).await {
        Ok(Some(id)) => id,
        Ok(None) => {
            tracing::debug!(retailer_id, "No user account for retailer");
            return None;
        }
        Err(e) => {
            tracing::warn!(retailer_id, error = %e, "Retailer user lookup failed");
            return None;
        }
    };

    match source.find_user_logo(user_id).await {
        Ok(logo) => logo,
        Err(e) => {
            tracing::warn!(retailer_id, user_id, error = %e, "Retailer logo lookup failed");
            None
        }
    }
}
