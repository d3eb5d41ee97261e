use std::fmt;

use serde::{Deserialize, Serialize};

/// Language/region variant of the site, e.g. `en` or `fr`.
#[derive(Debug, Clone, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(transparent)]
pub struct LocaleTag(String);

impl LocaleTag {
    pub fn new(tag: impl Into<String>) -> Self {
        Self(tag.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for LocaleTag {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

/// The closed set of locales the site serves.
///
/// Exactly one locale is the default and it is never written as a path prefix. Every
/// alternate must appear as the first path segment to be recognized.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct LocaleSet {
    default: LocaleTag,
    alternates: Vec<LocaleTag>,
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum LocaleSetError {
    #[error("locale tags must not be blank or contain '/'")]
    InvalidTag,
    #[error("default locale '{0}' must not also be listed as an alternate")]
    DefaultIsAlternate(LocaleTag),
    #[error("locale '{0}' is listed more than once")]
    Duplicate(LocaleTag),
}

impl LocaleSet {
    pub fn new(default: LocaleTag, alternates: Vec<LocaleTag>) -> Result<Self, LocaleSetError> {
        for tag in std::iter::once(&default).chain(&alternates) {
            if tag.0.trim().is_empty() || tag.0.contains('/') {
                return Err(LocaleSetError::InvalidTag);
            }
        }

        for (index, tag) in alternates.iter().enumerate() {
            if *tag == default {
                return Err(LocaleSetError::DefaultIsAlternate(tag.clone()));
            }
            if alternates[..index].contains(tag) {
                return Err(LocaleSetError::Duplicate(tag.clone()));
            }
        }

        Ok(Self {
            default,
            alternates,
        })
    }

    pub fn default_locale(&self) -> &LocaleTag {
        &self.default
    }

    pub fn alternates(&self) -> &[LocaleTag] {
        &self.alternates
    }

    pub fn is_default(&self, tag: &LocaleTag) -> bool {
        self.default == *tag
    }

    /// Split a recognized locale prefix off `segments`.
    ///
    /// Matching is exact and case-sensitive. The default locale is never consumed, so
    /// `/es/tours` under an `es` default keeps `es` as a content segment.
    pub fn resolve<'s, S: AsRef<str>>(&self, segments: &'s [S]) -> (&LocaleTag, &'s [S]) {
        let Some((first, rest)) = segments.split_first() else {
            return (&self.default, segments);
        };

        match self
            .alternates
            .iter()
            .find(|tag| tag.as_str() == first.as_ref())
        {
            Some(tag) => (tag, rest),
            None => (&self.default, segments),
        }
    }

    /// Path prefix under which `tag` is served: `Some(None)` for the default locale,
    /// `None` for a tag outside the set.
    pub fn prefix_for(&self, tag: &LocaleTag) -> Option<Option<&str>> {
        if self.is_default(tag) {
            Some(None)
        } else {
            self.alternates
                .iter()
                .find(|candidate| *candidate == tag)
                .map(|candidate| Some(candidate.as_str()))
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn locales() -> LocaleSet {
        LocaleSet::new(
            LocaleTag::new("es"),
            vec![LocaleTag::new("en"), LocaleTag::new("fr")],
        )
        .expect("valid locale set")
    }

    #[test]
    fn empty_path_resolves_to_default() {
        let set = locales();
        let segments: [&str; 0] = [];
        let (locale, rest) = set.resolve(&segments);
        assert_eq!(locale.as_str(), "es");
        assert!(rest.is_empty());
    }

    #[test]
    fn alternate_prefix_is_stripped_once() {
        let set = locales();
        let segments = ["fr", "news", "my-post"];
        let (locale, rest) = set.resolve(&segments);
        assert_eq!(locale.as_str(), "fr");
        assert_eq!(rest, ["news", "my-post"]);

        let doubled = ["en", "en", "tours"];
        let (locale, rest) = set.resolve(&doubled);
        assert_eq!(locale.as_str(), "en");
        assert_eq!(rest, ["en", "tours"]);
    }

    #[test]
    fn default_locale_is_never_consumed() {
        let set = locales();
        let segments = ["es", "tours"];
        let (locale, rest) = set.resolve(&segments);
        assert_eq!(locale.as_str(), "es");
        assert_eq!(rest, segments);
    }

    #[test]
    fn matching_is_case_sensitive() {
        let set = locales();
        let segments = vec!["EN".to_string(), "tours".to_string()];
        let (locale, rest) = set.resolve(&segments);
        assert_eq!(locale.as_str(), "es");
        assert_eq!(rest.len(), 2);
    }

    #[test]
    fn unprefixed_paths_pass_through() {
        let set = locales();
        for segments in [vec!["tours"], vec!["english", "x"], vec!["", "fr"]] {
            let (locale, rest) = set.resolve(&segments);
            assert_eq!(locale.as_str(), "es");
            assert_eq!(rest, segments.as_slice());
        }
    }

    #[test]
    fn rejects_duplicates_and_blank_tags() {
        let duplicate = LocaleSet::new(
            LocaleTag::new("es"),
            vec![LocaleTag::new("en"), LocaleTag::new("en")],
        );
        assert_eq!(
            duplicate,
            Err(LocaleSetError::Duplicate(LocaleTag::new("en")))
        );

        let blank = LocaleSet::new(LocaleTag::new(" "), Vec::new());
        assert_eq!(blank, Err(LocaleSetError::InvalidTag));
    }

    #[test]
    fn prefix_reflects_default_and_membership() {
        let set = locales();
        assert_eq!(set.prefix_for(&LocaleTag::new("es")), Some(None));
        assert_eq!(set.prefix_for(&LocaleTag::new("fr")), Some(Some("fr")));
        assert_eq!(set.prefix_for(&LocaleTag::new("de")), None);
    }
}
