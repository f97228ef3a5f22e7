//! # Catalog API Module
//!
//! Read-only discovery queries over the shared provider/service catalog.
//! No operation here requires an authenticated actor; browsing is open.

use crate::{errors, models, repo};
use std::cmp::Ordering;
use uuid::Uuid;

/// Searches providers by business type and free text.
///
/// Both filters are conjunctive. The text filter is a case-insensitive
/// substring match against the business name OR the district. Results
/// are ordered by rating descending; ties fall back to business name so
/// the ordering is deterministic.
///
/// # Arguments
/// * `catalog` - Catalog instance for read operations
/// * `type_filter` - Restrict to one provider type; `None` means all
/// * `search_text` - Substring to match; `None` or blank means no text filter
pub async fn list_providers(
    catalog: &repo::ImplCatalog,
    type_filter: Option<models::provider::ProviderType>,
    search_text: Option<&str>,
) -> errors::Result<Vec<models::provider::Provider>> {
    let needle = search_text
        .map(str::trim)
        .filter(|text| !text.is_empty())
        .map(str::to_lowercase);

    let mut providers: Vec<_> = catalog
        .get_all_providers()
        .await?
        .into_iter()
        .filter(|provider| {
            type_filter.is_none_or(|wanted| provider.business_type == wanted)
        })
        .filter(|provider| {
            needle.as_ref().is_none_or(|needle| {
                provider.business_name.to_lowercase().contains(needle)
                    || provider.district.to_lowercase().contains(needle)
            })
        })
        .collect();

    providers.sort_by(|a, b| {
        b.rating
            .partial_cmp(&a.rating)
            .unwrap_or(Ordering::Equal)
            .then_with(|| a.business_name.cmp(&b.business_name))
    });

    Ok(providers)
}

/// Fetches one provider with its full service collection.
pub async fn get_provider(
    catalog: &repo::ImplCatalog,
    provider_id: Uuid,
) -> errors::Result<Option<models::provider::Provider>> {
    Ok(catalog.get_provider_by_id(provider_id).await?)
}

/// Lists a provider's services, including currently unavailable ones.
pub async fn list_services(
    catalog: &repo::ImplCatalog,
    provider_id: Uuid,
) -> errors::Result<Vec<models::provider::Service>> {
    Ok(catalog.get_services_by_provider(provider_id).await?)
}

/// The whole catalog, ordered by business name.
pub async fn list_all_providers(
    catalog: &repo::ImplCatalog,
) -> errors::Result<Vec<models::provider::Provider>> {
    let mut providers = catalog.get_all_providers().await?;
    providers.sort_by(|a, b| a.business_name.cmp(&b.business_name));
    Ok(providers)
}

/// Maps a raw type-filter token to a typed filter.
///
/// `"all"`, an empty string, and unrecognized tokens all mean no filter.
pub fn parse_type_filter(raw: &str) -> Option<models::provider::ProviderType> {
    serde_json::from_str(&format!("\"{}\"", raw.trim())).ok()
}
