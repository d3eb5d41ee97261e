//! Locale-prefixed routing over the static content registry and legacy redirect map.

pub mod content;
pub mod locale;
pub mod redirect;
pub mod router;
pub mod urls;

pub use content::{normalize_path, ContentPage, ContentRegistry, RegistryError};
pub use locale::{LocaleSet, LocaleSetError, LocaleTag};
pub use redirect::LegacyRedirects;
pub use router::{site_router, SiteState};
pub use urls::{SiteUrlError, SiteUrls};

use std::borrow::Cow;

use percent_encoding::percent_decode_str;

/// Where an inbound path leads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RouteOutcome<'a> {
    /// Deprecated path; answer with a permanent redirect to the target.
    Redirect(&'a str),
    Page(&'a ContentPage),
    NotFound { locale: &'a LocaleTag, path: String },
}

/// Process-wide routing tables, built once at startup and never mutated.
#[derive(Debug, Clone)]
pub struct SiteDirectory {
    locales: LocaleSet,
    pages: ContentRegistry,
    redirects: LegacyRedirects,
}

impl SiteDirectory {
    pub fn new(locales: LocaleSet, pages: ContentRegistry, redirects: LegacyRedirects) -> Self {
        Self {
            locales,
            pages,
            redirects,
        }
    }

    pub fn pages(&self) -> &ContentRegistry {
        &self.pages
    }

    /// Route a raw request path: legacy redirects first, then locale-prefixed content.
    ///
    /// Redirects match the path as received. Content segments are percent-decoded first.
    pub fn route(&self, raw_path: &str) -> RouteOutcome<'_> {
        if let Some(target) = self.redirects.redirect_for(raw_path) {
            return RouteOutcome::Redirect(target);
        }

        let segments: Vec<Cow<'_, str>> = raw_path
            .split('/')
            .filter(|s| !s.is_empty())
            .map(|s| percent_decode_str(s).decode_utf8_lossy())
            .collect();
        let (locale, remainder) = self.locales.resolve(&segments);
        match self.pages.find(locale, remainder) {
            Some(page) => RouteOutcome::Page(page),
            None => RouteOutcome::NotFound {
                locale,
                path: normalize_path(remainder),
            },
        }
    }
}
