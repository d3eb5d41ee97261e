use chrono::{TimeZone, Utc};
use metrics_exporter_prometheus::PrometheusHandle;
use std::collections::HashMap;
use std::fs::File;
use std::io::BufReader;
use std::path::Path;
use std::sync::atomic::AtomicBool;
use std::sync::{Arc, Mutex};
use tourbook::catalog::{parse_catalog, CatalogItem, SitemapSource, SourceKind};
use tourbook::config::SiteConfig;
use tourbook::error::AppError;
use tourbook::notifications::{Notification, NotificationId, NotificationStore};
use tourbook::site::{ContentRegistry, LegacyRedirects, LocaleTag, SiteDirectory, SiteState};
use tourbook::sitemap::SitemapAggregator;
use tourbook::store::{SourceError, SourceOutcome};
use tracing::info;

#[derive(Clone)]
pub(crate) struct AppState {
    pub(crate) readiness: Arc<AtomicBool>,
    pub(crate) metrics: Arc<PrometheusHandle>,
}

/// Offers loaded once at startup.
#[derive(Debug, Default)]
pub(crate) struct InMemoryCatalog {
    items: Vec<CatalogItem>,
}

impl InMemoryCatalog {
    pub(crate) fn new(items: Vec<CatalogItem>) -> Self {
        Self { items }
    }

    pub(crate) fn len(&self) -> usize {
        self.items.len()
    }
}

/// One kind of offer from the shared catalog, exposed as a sitemap source.
pub(crate) struct CatalogView {
    catalog: Arc<InMemoryCatalog>,
    kind: SourceKind,
}

impl CatalogView {
    pub(crate) fn new(catalog: Arc<InMemoryCatalog>, kind: SourceKind) -> Self {
        Self { catalog, kind }
    }
}

impl SitemapSource for CatalogView {
    async fn items(&self) -> SourceOutcome<Vec<CatalogItem>> {
        SourceOutcome::Ok(
            self.catalog
                .items
                .iter()
                .filter(|item| item.kind == self.kind)
                .cloned()
                .collect(),
        )
    }
}

#[derive(Default)]
pub(crate) struct InMemoryNotificationStore {
    records: Mutex<HashMap<NotificationId, Notification>>,
}

impl InMemoryNotificationStore {
    pub(crate) fn push(&self, notification: Notification) {
        let mut guard = self.records.lock().expect("notification mutex poisoned");
        guard.insert(notification.id.clone(), notification);
    }
}

impl NotificationStore for InMemoryNotificationStore {
    fn list(&self) -> SourceOutcome<Vec<Notification>> {
        let guard = self.records.lock().expect("notification mutex poisoned");
        SourceOutcome::Ok(guard.values().cloned().collect())
    }

    fn mark_read(&self, id: &NotificationId) -> Result<Option<Notification>, SourceError> {
        let mut guard = self.records.lock().expect("notification mutex poisoned");
        Ok(guard.get_mut(id).map(|record| {
            record.read = true;
            record.clone()
        }))
    }
}

pub(crate) type CatalogSiteState = SiteState<CatalogView, CatalogView>;

/// Build the routing tables and sitemap sources from configuration.
pub(crate) fn build_site(
    config: &SiteConfig,
) -> Result<(CatalogSiteState, Arc<InMemoryCatalog>), AppError> {
    let urls = config.site_urls()?;
    let locales = urls.locales().clone();
    let catalog = Arc::new(load_catalog(
        config.catalog_csv.as_deref(),
        locales.default_locale(),
    )?);

    let directory = SiteDirectory::new(
        locales,
        ContentRegistry::standard()?,
        LegacyRedirects::standard(),
    );
    let aggregator = SitemapAggregator::new(
        Arc::new(CatalogView::new(catalog.clone(), SourceKind::Tours)),
        Arc::new(CatalogView::new(catalog.clone(), SourceKind::Hotels)),
        urls,
    );

    info!(
        pages = directory.pages().len(),
        offers = catalog.len(),
        "site directory loaded"
    );
    Ok((
        SiteState::new(Arc::new(directory), Arc::new(aggregator)),
        catalog,
    ))
}

pub(crate) fn load_catalog(
    path: Option<&Path>,
    default_locale: &LocaleTag,
) -> Result<InMemoryCatalog, AppError> {
    match path {
        Some(path) => {
            let reader = BufReader::new(File::open(path)?);
            let items = parse_catalog(reader, default_locale)?;
            info!(path = %path.display(), offers = items.len(), "catalog imported");
            Ok(InMemoryCatalog::new(items))
        }
        None => Ok(InMemoryCatalog::new(seed_catalog(default_locale))),
    }
}

fn seed_catalog(default_locale: &LocaleTag) -> Vec<CatalogItem> {
    let offer = |kind, slug: &str, locale: LocaleTag, priority| CatalogItem {
        kind,
        slug: slug.to_string(),
        locale,
        last_modified: Utc.with_ymd_and_hms(2025, 1, 6, 0, 0, 0).single(),
        priority: Some(priority),
    };

    vec![
        offer(SourceKind::Tours, "arenal-volcano", default_locale.clone(), 0.9),
        offer(SourceKind::Tours, "manuel-antonio", default_locale.clone(), 0.8),
        offer(SourceKind::Tours, "arenal-volcano", LocaleTag::new("en"), 0.9),
        offer(SourceKind::Hotels, "nayara-springs", default_locale.clone(), 0.7),
        offer(SourceKind::Hotels, "nayara-springs", LocaleTag::new("en"), 0.7),
    ]
}
