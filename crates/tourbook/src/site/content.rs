use std::collections::HashMap;

use serde::Serialize;

use super::locale::LocaleTag;

/// A CMS-style landing page served at a locale-free path.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct ContentPage {
    pub path: String,
    pub locale: LocaleTag,
    pub title: String,
    pub body: String,
}

impl ContentPage {
    pub fn new(
        path: &str,
        locale: &str,
        title: impl Into<String>,
        body: impl Into<String>,
    ) -> Self {
        Self {
            path: normalize_path(path.split('/')),
            locale: LocaleTag::new(locale),
            title: title.into(),
            body: body.into(),
        }
    }
}

/// Join non-empty segments into a canonical `/a/b` path; no segments yield `/`.
pub fn normalize_path<I, S>(segments: I) -> String
where
    I: IntoIterator<Item = S>,
    S: AsRef<str>,
{
    let mut path = String::new();
    for segment in segments {
        let segment = segment.as_ref();
        if segment.is_empty() {
            continue;
        }
        path.push('/');
        path.push_str(segment);
    }

    if path.is_empty() {
        path.push('/');
    }
    path
}

#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum RegistryError {
    #[error("content page '{path}' is registered twice for locale '{locale}'")]
    DuplicatePath { locale: LocaleTag, path: String },
}

/// Read-only lookup of content pages keyed by locale and canonical path.
#[derive(Debug, Clone, Default)]
pub struct ContentRegistry {
    pages: HashMap<(LocaleTag, String), ContentPage>,
}

impl ContentRegistry {
    pub fn builder() -> ContentRegistryBuilder {
        ContentRegistryBuilder::default()
    }

    /// Landing pages shipped with the site.
    pub fn standard() -> Result<Self, RegistryError> {
        let mut builder = Self::builder();
        for page in standard_pages() {
            builder.insert(page)?;
        }
        Ok(builder.build())
    }

    /// Look up the page for locale-stripped `segments`. Empty segments are ignored, so
    /// `["", "news", "my-post", ""]` and `["news", "my-post"]` find the same page.
    pub fn find<S: AsRef<str>>(&self, locale: &LocaleTag, segments: &[S]) -> Option<&ContentPage> {
        let key = (locale.clone(), normalize_path(segments));
        self.pages.get(&key)
    }

    pub fn len(&self) -> usize {
        self.pages.len()
    }

    pub fn is_empty(&self) -> bool {
        self.pages.is_empty()
    }
}

#[derive(Debug, Default)]
pub struct ContentRegistryBuilder {
    pages: HashMap<(LocaleTag, String), ContentPage>,
}

impl ContentRegistryBuilder {
    pub fn insert(&mut self, page: ContentPage) -> Result<&mut Self, RegistryError> {
        let key = (page.locale.clone(), page.path.clone());
        if self.pages.contains_key(&key) {
            return Err(RegistryError::DuplicatePath {
                locale: key.0,
                path: key.1,
            });
        }
        self.pages.insert(key, page);
        Ok(self)
    }

    pub fn build(self) -> ContentRegistry {
        ContentRegistry { pages: self.pages }
    }
}

fn standard_pages() -> Vec<ContentPage> {
    vec![
        ContentPage::new(
            "/",
            "es",
            "Tours y traslados en Costa Rica",
            "Reserva tours, hoteles y traslados con guias locales.",
        ),
        ContentPage::new(
            "/",
            "en",
            "Costa Rica tours and transfers",
            "Book tours, hotels, and transfers with local guides.",
        ),
        ContentPage::new(
            "/",
            "fr",
            "Excursions et transferts au Costa Rica",
            "Reservez excursions, hotels et transferts avec des guides locaux.",
        ),
        ContentPage::new(
            "/traslado",
            "es",
            "Traslados privados",
            "Traslados puerta a puerta desde el aeropuerto a su hotel.",
        ),
        ContentPage::new(
            "/traslado",
            "en",
            "Private transfers",
            "Door-to-door transfers from the airport to your hotel.",
        ),
        ContentPage::new(
            "/traslado",
            "fr",
            "Transferts prives",
            "Transferts porte-a-porte de l'aeroport a votre hotel.",
        ),
        ContentPage::new(
            "/news/my-post",
            "en",
            "Dry season is here",
            "Our guide to the best tours between December and April.",
        ),
        ContentPage::new(
            "/news/my-post",
            "fr",
            "La saison seche est arrivee",
            "Notre guide des meilleures excursions de decembre a avril.",
        ),
        ContentPage::new(
            "/proveedores",
            "es",
            "Proveedores",
            "Publique sus ofertas de tours y hospedaje en nuestro catalogo.",
        ),
        ContentPage::new(
            "/suppliers",
            "en",
            "Suppliers",
            "List your tour and lodging offers in our catalog.",
        ),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn normalization_collapses_empty_segments() {
        assert_eq!(normalize_path(["", "news", "", "my-post", ""]), "/news/my-post");
        assert_eq!(normalize_path(Vec::<String>::new()), "/");
        assert_eq!(normalize_path("//".split('/')), "/");
    }

    #[test]
    fn find_matches_equivalent_segment_lists() {
        let registry = ContentRegistry::standard().expect("standard registry is unique");
        let fr = LocaleTag::new("fr");

        let plain = registry.find(&fr, &["news", "my-post"]);
        let padded = registry.find(&fr, &["", "news", "my-post", ""]);
        assert_eq!(plain, padded);
        let page = plain.expect("french post");
        assert_eq!(page.path, "/news/my-post");
        assert_eq!(page.locale, fr);
    }

    #[test]
    fn find_is_locale_scoped() {
        let registry = ContentRegistry::standard().expect("standard registry is unique");
        assert!(registry
            .find(&LocaleTag::new("es"), &["news", "my-post"])
            .is_none());
        assert!(registry.find(&LocaleTag::new("es"), &["traslado"]).is_some());
    }

    #[test]
    fn builder_rejects_duplicate_paths() {
        let mut builder = ContentRegistry::builder();
        builder
            .insert(ContentPage::new("/about", "en", "About", "first"))
            .expect("first insert");
        let err = builder
            .insert(ContentPage::new("about/", "en", "About", "second"))
            .expect_err("same normalized path");
        assert_eq!(
            err,
            RegistryError::DuplicatePath {
                locale: LocaleTag::new("en"),
                path: "/about".to_string(),
            }
        );

        builder
            .insert(ContentPage::new("/about", "fr", "A propos", "third"))
            .expect("other locale is a separate key");
        assert_eq!(builder.build().len(), 2);
    }
}
