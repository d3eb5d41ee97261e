use url::{Position, Url};

use super::locale::{LocaleSet, LocaleTag};

/// Builds public URLs for the site from its configured base.
#[derive(Debug, Clone)]
pub struct SiteUrls {
    base: Url,
    locales: LocaleSet,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum SiteUrlError {
    #[error("base url does not parse: {0}")]
    Parse(#[from] url::ParseError),
    #[error("base url must be an absolute http(s) url, got '{0}'")]
    NotHttp(String),
}

impl SiteUrls {
    pub fn new(base: &str, locales: LocaleSet) -> Result<Self, SiteUrlError> {
        let base = Url::parse(base.trim())?;
        if !matches!(base.scheme(), "http" | "https") || base.cannot_be_a_base() {
            return Err(SiteUrlError::NotHttp(base.to_string()));
        }
        Ok(Self { base, locales })
    }

    pub fn base(&self) -> &Url {
        &self.base
    }

    pub fn locales(&self) -> &LocaleSet {
        &self.locales
    }

    /// Absolute URL for `segments` served under `locale`, or `None` when the locale is not
    /// part of the site. Each segment is percent-encoded on its own.
    pub fn localized(&self, locale: &LocaleTag, segments: &[&str]) -> Option<Url> {
        let prefix = self.locales.prefix_for(locale)?;
        Some(self.absolute(prefix.into_iter().chain(segments.iter().copied())))
    }

    /// Origin-relative path (`/a/b`) for `segments`, ignoring any path on the base.
    pub fn relative<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> String {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.clear().extend(segments);
        }
        url[Position::BeforePath..].to_string()
    }

    fn absolute<'a>(&self, segments: impl IntoIterator<Item = &'a str>) -> Url {
        let mut url = self.base.clone();
        url.set_query(None);
        url.set_fragment(None);
        if let Ok(mut path) = url.path_segments_mut() {
            path.pop_if_empty().extend(segments);
        }
        url
    }
}
