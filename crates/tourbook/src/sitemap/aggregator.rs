use std::sync::Arc;

use tracing::{debug, info, warn};

use super::{dedup_entries, SitemapEntry};
use crate::catalog::{CatalogItem, SitemapSource, SourceKind};
use crate::site::SiteUrls;
use crate::store::{SourceError, SourceOutcome};

/// Merges tour and hotel feeds into one de-duplicated sitemap.
///
/// Sources are queried concurrently and concatenated tours-first, so when both publish
/// the same URL the tour entry is the one kept. A failing source fails the whole build;
/// a source reporting recognized absence contributes nothing.
pub struct SitemapAggregator<T, H> {
    tours: Arc<T>,
    hotels: Arc<H>,
    urls: SiteUrls,
}

impl<T, H> SitemapAggregator<T, H>
where
    T: SitemapSource + 'static,
    H: SitemapSource + 'static,
{
    pub fn new(tours: Arc<T>, hotels: Arc<H>, urls: SiteUrls) -> Self {
        Self {
            tours,
            hotels,
            urls,
        }
    }

    pub fn urls(&self) -> &SiteUrls {
        &self.urls
    }

    pub async fn build(&self) -> Result<Vec<SitemapEntry>, SourceError> {
        self.build_restricted(&SourceKind::ordered()).await
    }

    /// Build from the listed source kinds only, e.g. `&[SourceKind::Hotels]`.
    pub async fn build_restricted(
        &self,
        kinds: &[SourceKind],
    ) -> Result<Vec<SitemapEntry>, SourceError> {
        let (tours, hotels) = tokio::try_join!(
            self.collect(SourceKind::Tours, kinds, self.tours.as_ref()),
            self.collect(SourceKind::Hotels, kinds, self.hotels.as_ref()),
        )?;

        let mut entries = tours;
        entries.extend(hotels);
        let total = entries.len();
        let entries = dedup_entries(entries);

        info!(
            kinds = ?kinds,
            entries = entries.len(),
            duplicates = total - entries.len(),
            "sitemap built"
        );
        Ok(entries)
    }

    async fn collect<S: SitemapSource>(
        &self,
        kind: SourceKind,
        wanted: &[SourceKind],
        source: &S,
    ) -> Result<Vec<SitemapEntry>, SourceError> {
        if !wanted.contains(&kind) {
            return Ok(Vec::new());
        }

        match source.items().await {
            SourceOutcome::Ok(items) => Ok(items
                .iter()
                .filter_map(|item| self.entry_for(item))
                .collect()),
            SourceOutcome::Empty => {
                warn!(source = ?kind, "sitemap source has no data");
                Ok(Vec::new())
            }
            SourceOutcome::Failure(err) => {
                warn!(source = ?kind, error = %err, "sitemap source failed");
                Err(err)
            }
        }
    }

    fn entry_for(&self, item: &CatalogItem) -> Option<SitemapEntry> {
        let Some(url) = self
            .urls
            .localized(&item.locale, &[item.kind.path_segment(), item.slug.as_str()])
        else {
            debug!(slug = %item.slug, locale = %item.locale, "skipping offer in unserved locale");
            return None;
        };

        Some(SitemapEntry {
            url: url.into(),
            priority: item.priority,
            last_modified: item.last_modified,
        })
    }
}
