//! Paginated compartment source and the listing loop over it.

use crate::error::ApiError;
use crate::tree::CompartmentTree;
use crate::types::CompartmentRecord;
use async_trait::async_trait;

/// One page of the compartment listing
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct CompartmentPage {
    pub items: Vec<CompartmentRecord>,
    /// Token for the following page; `None` or empty ends the listing
    pub next_page: Option<String>,
}

/// Port for anything that can enumerate a tenancy's compartments page by page.
#[async_trait]
pub trait CompartmentSource: Send + Sync {
    /// Id of the tenancy the listing is rooted at.
    fn tenancy_id(&self) -> &str;

    /// Fetch one page; `page` is `None` for the first request.
    async fn list_page(&self, page: Option<&str>) -> Result<CompartmentPage, ApiError>;
}

/// Result of walking every page of a source
#[derive(Debug, Clone)]
pub struct CompartmentListing {
    pub tree: CompartmentTree,
    pub pages: usize,
}

/// Fetch every page from `source` sequentially into a tree rooted at the tenancy.
///
/// The tenancy is seeded as `ROOT` with no parent before the first page. Any
/// page failure aborts the whole listing.
pub async fn collect_compartments(
    source: &dyn CompartmentSource,
) -> Result<CompartmentListing, ApiError> {
    let mut tree = CompartmentTree::with_root(source.tenancy_id());
    let mut pages = 0usize;
    let mut page: Option<String> = None;

    loop {
        let response = source.list_page(page.as_deref()).await?;
        pages += 1;
        tracing::debug!(
            page = pages,
            items = response.items.len(),
            has_next = response.next_page.is_some(),
            "Fetched compartment page"
        );
        tree.extend(response.items);

        match response.next_page {
            Some(next) if !next.is_empty() => page = Some(next),
            _ => break,
        }
    }

    tracing::info!(
        tenancy = source.tenancy_id(),
        pages,
        compartments = tree.len(),
        "Listed compartments"
    );
    Ok(CompartmentListing { tree, pages })
}
