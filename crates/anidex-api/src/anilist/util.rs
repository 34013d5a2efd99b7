//! `AniList` pagination utilities.

use anyhow::Result;
use tracing::instrument;

use super::api::LocalAniListApi;
use super::params::QueryVariables;
use super::types::{Media, PageInfo};

/// Media accumulated over several pages.
#[derive(Debug, Clone, Default)]
pub struct PagedMedia {
    /// Records of all fetched pages, in page order.
    pub media: Vec<Media>,
    /// Pagination state of the last fetched page.
    pub page_info: PageInfo,
    /// Number of pages fetched.
    pub pages_fetched: u32,
}

/// Fetches consecutive pages starting at `variables.page` (default 1),
/// appending results until `hasNextPage` is false or `max_pages` pages
/// were fetched.
///
/// Pagination state always comes from the latest response.
///
/// # Errors
///
/// Returns the first failing page's error unchanged. Pages fetched before
/// the failure are discarded.
#[instrument(skip_all)]
pub async fn fetch_pages(
    api: &(impl LocalAniListApi + Sync),
    variables: &QueryVariables,
    max_pages: u32,
) -> Result<PagedMedia> {
    let mut result = PagedMedia::default();
    let mut page = variables.page.unwrap_or(1);

    while result.pages_fetched < max_pages {
        let page_vars = variables.clone().page(page);
        let fetched = api.search_media(&page_vars).await?;

        tracing::debug!(
            page,
            fetched = fetched.media.len(),
            has_next_page = fetched.page_info.has_next_page,
            "Search page completed"
        );

        result.media.extend(fetched.media);
        result.page_info = fetched.page_info;
        result.pages_fetched = result.pages_fetched.saturating_add(1);

        if !result.page_info.has_next_page {
            break;
        }
        page = page.saturating_add(1);
    }

    Ok(result)
}
