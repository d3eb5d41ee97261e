//! Tour and hotel offers as the routing layer sees them.

mod import;

use std::future::Future;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::site::LocaleTag;
use crate::store::SourceOutcome;

pub use import::{parse_catalog, CatalogImportError};

/// Kind of offer; also fixes the order sources are concatenated in.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SourceKind {
    Tours,
    Hotels,
}

impl SourceKind {
    pub const fn ordered() -> [Self; 2] {
        [Self::Tours, Self::Hotels]
    }

    /// First path segment offers of this kind are published under.
    pub const fn path_segment(self) -> &'static str {
        match self {
            Self::Tours => "tours",
            Self::Hotels => "hotels",
        }
    }

    pub(crate) fn parse(value: &str) -> Option<Self> {
        match value.trim().to_ascii_lowercase().as_str() {
            "tour" | "tours" => Some(Self::Tours),
            "hotel" | "hotels" => Some(Self::Hotels),
            _ => None,
        }
    }
}

/// A published offer.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CatalogItem {
    pub kind: SourceKind,
    pub slug: String,
    pub locale: LocaleTag,
    pub last_modified: Option<DateTime<Utc>>,
    pub priority: Option<f32>,
}

/// Read-only feed of published offers, one implementation per backing table.
pub trait SitemapSource: Send + Sync {
    fn items(&self) -> impl Future<Output = SourceOutcome<Vec<CatalogItem>>> + Send;
}
