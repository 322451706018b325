use crate::catalog::{CatalogApi, CatalogError, CatalogKind, TrackDescriptor, TrackPage};
use crate::CatalogId;
use std::sync::Arc;
use tracing::debug;

pub const DEFAULT_PAGE_SIZE: u32 = 10;

#[derive(Debug, thiserror::Error)]
pub enum ResolutionError {
    #[error(transparent)]
    Catalog(#[from] CatalogError),
}

impl ResolutionError {
    pub fn catalog_error(&self) -> &CatalogError {
        match self {
            ResolutionError::Catalog(error) => error,
        }
    }
}

pub struct CollectionPaginator {
    catalog_api: Arc<dyn CatalogApi>,
    page_size: u32,
}

impl CollectionPaginator {
    pub fn new(catalog_api: Arc<dyn CatalogApi>, page_size: u32) -> Self {
        Self {
            catalog_api,
            page_size: page_size.max(1),
        }
    }

    pub fn page_size(&self) -> u32 {
        self.page_size
    }

    pub async fn fetch_page(
        &self,
        kind: CatalogKind,
        id: &CatalogId,
        offset: u32,
    ) -> Result<TrackPage, ResolutionError> {
        debug!(%kind, %id, offset, page_size = self.page_size, "Fetching collection page...");

        let page = self
            .catalog_api
            .get_collection_page(kind, id, offset, self.page_size)
            .await?;

        // A page from elsewhere in the collection would duplicate or skip tracks.
        if page.offset != offset {
            return Err(CatalogError::generic(format!(
                "Requested page at offset {} but received offset {}",
                offset, page.offset
            ))
            .into());
        }

        Ok(TrackPage::new(offset, self.page_size, page))
    }

    /// Lazily walks the collection one page at a time.
    pub fn pages(&self, kind: CatalogKind, id: CatalogId) -> PageCursor<'_> {
        PageCursor {
            paginator: self,
            kind,
            id,
            next_offset: Some(0),
        }
    }

    /// Collects every track of the collection in page order. Non-track
    /// entries are dropped.
    pub async fn fetch_all(
        &self,
        kind: CatalogKind,
        id: &CatalogId,
    ) -> Result<Vec<TrackDescriptor>, ResolutionError> {
        let mut cursor = self.pages(kind, id.clone());
        let mut tracks = vec![];

        while let Some(page) = cursor.next_page().await? {
            tracks.extend(page.into_tracks());
        }

        debug!(%kind, %id, tracks = tracks.len(), "Collection fully enumerated");

        Ok(tracks)
    }
}

pub struct PageCursor<'a> {
    paginator: &'a CollectionPaginator,
    kind: CatalogKind,
    id: CatalogId,
    next_offset: Option<u32>,
}

impl PageCursor<'_> {
    /// Returns `None` once the collection is exhausted. A failed request
    /// leaves the cursor where it was, so the same page can be requested again.
    pub async fn next_page(&mut self) -> Result<Option<TrackPage>, ResolutionError> {
        let offset = match self.next_offset {
            Some(offset) => offset,
            None => return Ok(None),
        };

        let page = self.paginator.fetch_page(self.kind, &self.id, offset).await?;
        self.next_offset = page.next_offset;

        Ok(Some(page))
    }

    pub fn restart(&mut self) {
        self.next_offset = Some(0);
    }

    pub fn is_exhausted(&self) -> bool {
        self.next_offset.is_none()
    }
}
