//! Sitemap entries aggregated from the catalog sources.

mod aggregator;
mod xml;

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::Serialize;

pub use aggregator::SitemapAggregator;
pub use xml::{static_sitemap, SITEMAP_CACHE_CONTROL};

/// One URL advertised to search engines.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct SitemapEntry {
    pub url: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub priority: Option<f32>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub last_modified: Option<DateTime<Utc>>,
}

impl SitemapEntry {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            priority: None,
            last_modified: None,
        }
    }
}

/// Drop entries whose `url` was already seen. The first occurrence keeps its position.
pub fn dedup_entries(entries: Vec<SitemapEntry>) -> Vec<SitemapEntry> {
    let mut seen = HashSet::with_capacity(entries.len());
    entries
        .into_iter()
        .filter(|entry| seen.insert(entry.url.clone()))
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    fn urls(entries: &[SitemapEntry]) -> Vec<&str> {
        entries.iter().map(|entry| entry.url.as_str()).collect()
    }

    #[test]
    fn first_occurrence_wins() {
        let mut tour = SitemapEntry::new("/t/a");
        tour.priority = Some(0.9);
        let mut hotel_duplicate = SitemapEntry::new("/t/a");
        hotel_duplicate.priority = Some(0.1);

        let merged = dedup_entries(vec![tour, hotel_duplicate, SitemapEntry::new("/h/b")]);

        assert_eq!(urls(&merged), ["/t/a", "/h/b"]);
        assert_eq!(merged[0].priority, Some(0.9));
    }

    #[test]
    fn order_is_preserved_across_many_duplicates() {
        let entries = ["/c", "/a", "/c", "/b", "/a", "/c"]
            .into_iter()
            .map(SitemapEntry::new)
            .collect();
        assert_eq!(urls(&dedup_entries(entries)), ["/c", "/a", "/b"]);
    }

    #[test]
    fn serializes_camel_case_and_omits_absent_metadata() {
        let entry = SitemapEntry::new("https://example.com/tours/a");
        let value = serde_json::to_value(&entry).expect("serializes");
        assert_eq!(value, serde_json::json!({ "url": "https://example.com/tours/a" }));

        let mut dated = entry;
        dated.last_modified = Some(DateTime::<Utc>::UNIX_EPOCH);
        let value = serde_json::to_value(&dated).expect("serializes");
        assert!(value.get("lastModified").is_some());
    }
}
