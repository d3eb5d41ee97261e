use std::io::Read;

use chrono::{DateTime, NaiveDate, Utc};
use serde::{Deserialize, Deserializer};

use super::{CatalogItem, SourceKind};
use crate::site::LocaleTag;

#[derive(Debug, thiserror::Error)]
pub enum CatalogImportError {
    #[error("failed to read catalog export: {0}")]
    Io(#[from] std::io::Error),
    #[error("invalid catalog CSV data: {0}")]
    Csv(#[from] csv::Error),
    #[error("row {row}: unknown offer kind '{kind}'")]
    UnknownKind { row: usize, kind: String },
    #[error("row {row}: slug must not be blank")]
    BlankSlug { row: usize },
    #[error("row {row}: unreadable timestamp '{value}'")]
    Timestamp { row: usize, value: String },
    #[error("row {row}: priority {value} is outside 0.0..=1.0")]
    Priority { row: usize, value: f32 },
}

/// Parse a catalog export with `Kind,Slug,Locale,Last Modified,Priority` columns.
///
/// Rows without a locale are published under `default_locale`.
pub fn parse_catalog<R: Read>(
    reader: R,
    default_locale: &LocaleTag,
) -> Result<Vec<CatalogItem>, CatalogImportError> {
    let mut csv_reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .from_reader(reader);
    let mut items = Vec::new();

    for (index, record) in csv_reader.deserialize::<CatalogRow>().enumerate() {
        // header is line 1
        let row_number = index + 2;
        let row = record?;
        items.push(row.into_item(row_number, default_locale)?);
    }

    Ok(items)
}

#[derive(Debug, Deserialize)]
struct CatalogRow {
    #[serde(rename = "Kind")]
    kind: String,
    #[serde(rename = "Slug")]
    slug: String,
    #[serde(rename = "Locale", default, deserialize_with = "empty_string_as_none")]
    locale: Option<String>,
    #[serde(
        rename = "Last Modified",
        default,
        deserialize_with = "empty_string_as_none"
    )]
    last_modified: Option<String>,
    #[serde(rename = "Priority", default)]
    priority: Option<f32>,
}

impl CatalogRow {
    fn into_item(
        self,
        row: usize,
        default_locale: &LocaleTag,
    ) -> Result<CatalogItem, CatalogImportError> {
        let kind = SourceKind::parse(&self.kind).ok_or_else(|| CatalogImportError::UnknownKind {
            row,
            kind: self.kind.clone(),
        })?;

        let slug = self.slug.trim_matches('/').to_string();
        if slug.is_empty() {
            return Err(CatalogImportError::BlankSlug { row });
        }

        let last_modified = match self.last_modified {
            Some(value) => Some(
                parse_timestamp(&value).ok_or(CatalogImportError::Timestamp { row, value })?,
            ),
            None => None,
        };

        if let Some(value) = self.priority {
            if !(0.0..=1.0).contains(&value) {
                return Err(CatalogImportError::Priority { row, value });
            }
        }

        Ok(CatalogItem {
            kind,
            slug,
            locale: self
                .locale
                .map(LocaleTag::new)
                .unwrap_or_else(|| default_locale.clone()),
            last_modified,
            priority: self.priority,
        })
    }
}

fn empty_string_as_none<'de, D>(deserializer: D) -> Result<Option<String>, D::Error>
where
    D: Deserializer<'de>,
{
    let opt = Option::<String>::deserialize(deserializer)?;
    Ok(opt.filter(|value| !value.trim().is_empty()))
}

fn parse_timestamp(value: &str) -> Option<DateTime<Utc>> {
    let trimmed = value.trim();

    if let Ok(dt) = DateTime::parse_from_rfc3339(trimmed) {
        return Some(dt.with_timezone(&Utc));
    }

    NaiveDate::parse_from_str(trimmed, "%Y-%m-%d")
        .ok()
        .and_then(|date| date.and_hms_opt(0, 0, 0))
        .map(|naive| naive.and_utc())
}
